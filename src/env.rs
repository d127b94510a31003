// ABOUTME: Environment chain — ordered bindings plus an optional parent scope

use crate::symbol::Symbol;
use crate::value::Value;
use std::cell::RefCell;
use std::rc::Rc;

/// A lexical scope: an ordered, append-only (per frame) sequence of
/// (symbol, value) pairs plus an optional link to the enclosing scope.
///
/// The bindings are a `Vec`, not a `HashMap` — `Value::Environment` wraps
/// this type directly and is compared structurally elsewhere (same length,
/// pairwise equal), which only makes sense over an ordered sequence.
#[derive(Debug)]
pub struct Environment {
    bindings: RefCell<Vec<(Symbol, Value)>>,
    outer: Option<Rc<Environment>>,
}

impl Environment {
    /// A fresh global environment with no parent.
    pub fn new() -> Rc<Self> {
        Rc::new(Environment {
            bindings: RefCell::new(Vec::new()),
            outer: None,
        })
    }

    /// A child scope whose lookups fall through to `parent` when unbound here.
    pub fn with_parent(parent: Rc<Environment>) -> Rc<Self> {
        Rc::new(Environment {
            bindings: RefCell::new(Vec::new()),
            outer: Some(parent),
        })
    }

    /// Scan this frame, then recurse into the parent chain.
    pub fn lookup(&self, symbol: &Symbol) -> Option<Value> {
        if let Some((_, value)) = self.bindings.borrow().iter().find(|(s, _)| s == symbol) {
            return Some(value.clone());
        }
        self.outer.as_ref().and_then(|outer| outer.lookup(symbol))
    }

    /// Overwrite an existing binding in *this* frame, or append a new pair.
    /// Never walks into outer frames — `def` in a nested scope always
    /// creates a binding local to that scope.
    pub fn extend(&self, symbol: Symbol, value: Value) -> Value {
        let mut bindings = self.bindings.borrow_mut();
        if let Some(entry) = bindings.iter_mut().find(|(s, _)| *s == symbol) {
            entry.1 = value.clone();
        } else {
            bindings.push((symbol, value.clone()));
        }
        value
    }

    /// A snapshot of this frame's own bindings, used for structural equality
    /// and printing. Deliberately does not walk into `outer`.
    pub fn bindings(&self) -> Vec<(Symbol, Value)> {
        self.bindings.borrow().clone()
    }

    pub fn outer(&self) -> Option<Rc<Environment>> {
        self.outer.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::symbol::intern;

    #[test]
    fn define_and_lookup() {
        let env = Environment::new();
        env.extend(intern("x"), Value::Number(42.0));
        assert_eq!(env.lookup(&intern("x")), Some(Value::Number(42.0)));
    }

    #[test]
    fn unbound_symbol_is_none() {
        let env = Environment::new();
        assert_eq!(env.lookup(&intern("zzz")), None);
    }

    #[test]
    fn extend_overwrites_in_current_frame_without_shadowing() {
        let env = Environment::new();
        env.extend(intern("x"), Value::Number(1.0));
        env.extend(intern("x"), Value::Number(2.0));
        assert_eq!(env.lookup(&intern("x")), Some(Value::Number(2.0)));
        assert_eq!(env.bindings().len(), 1);
    }

    #[test]
    fn child_extend_never_mutates_parent() {
        let parent = Environment::new();
        parent.extend(intern("x"), Value::Number(1.0));

        let child = Environment::with_parent(parent.clone());
        child.extend(intern("x"), Value::Number(2.0));

        assert_eq!(parent.lookup(&intern("x")), Some(Value::Number(1.0)));
        assert_eq!(child.lookup(&intern("x")), Some(Value::Number(2.0)));
    }

    #[test]
    fn lookup_falls_through_to_parent() {
        let parent = Environment::new();
        parent.extend(intern("a"), Value::Number(1.0));

        let child = Environment::with_parent(parent);
        child.extend(intern("b"), Value::Number(2.0));

        assert_eq!(child.lookup(&intern("a")), Some(Value::Number(1.0)));
        assert_eq!(child.lookup(&intern("b")), Some(Value::Number(2.0)));
    }
}
