//! Built-in primitives installed into the initial environment.
//!
//! Grouped the way the teacher splits builtins: one sub-module per category,
//! one `register` function each, combined here.

pub mod arithmetic;
pub mod comparison;
pub mod io;
pub mod lists;
pub mod math;
pub mod strings;

use crate::env::Environment;
use std::rc::Rc;

/// Install every primitive into `env`.
pub fn register_builtins(env: &Rc<Environment>) {
    arithmetic::register(env);
    comparison::register(env);
    math::register(env);
    lists::register(env);
    strings::register(env);
    io::register(env);
}

/// Helper shared by every category: coerce an argument to a number or fail
/// with a type-mismatch error naming the primitive and the offending value.
pub(crate) fn expect_number(
    arg: &crate::value::Value,
    context: &str,
) -> Result<f64, crate::error::EvalError> {
    match arg {
        crate::value::Value::Number(n) => Ok(*n),
        other => Err(crate::error::EvalError::type_error(context, "number", other)),
    }
}

pub(crate) fn expect_string<'a>(
    arg: &'a crate::value::Value,
    context: &str,
) -> Result<&'a str, crate::error::EvalError> {
    match arg {
        crate::value::Value::String(s) => Ok(s.as_str()),
        other => Err(crate::error::EvalError::type_error(context, "string", other)),
    }
}

pub(crate) fn expect_list<'a>(
    arg: &'a crate::value::Value,
    context: &str,
) -> Result<&'a [crate::value::Value], crate::error::EvalError> {
    match arg {
        crate::value::Value::List(items) => Ok(items),
        other => Err(crate::error::EvalError::type_error(context, "list", other)),
    }
}
