// ABOUTME: Library surface exposing internal modules for integration tests and the binary

pub mod builtins;
pub mod env;
pub mod error;
pub mod eval;
pub mod reader;
pub mod symbol;
pub mod value;

use std::rc::Rc;

/// A fresh global environment with every primitive installed.
pub fn default_environment() -> Rc<env::Environment> {
    let env = env::Environment::new();
    builtins::register_builtins(&env);
    env
}
