// ABOUTME: Value types representing every runtime entity the evaluator handles

use crate::env::Environment;
use crate::error::EvalError;
use crate::symbol::Symbol;
use std::fmt;
use std::rc::Rc;

/// A native primitive: an opaque callable plus the minimum number of
/// arguments it requires. Receives the already-evaluated argument list and
/// the environment the call site was evaluated in (so `env` can return it).
pub type BuiltinFn = fn(&[Value], &Rc<Environment>) -> Result<Value, EvalError>;

#[derive(Clone, Copy)]
pub struct Operator {
    pub func: BuiltinFn,
    pub min_args: usize,
    pub name: &'static str,
}

impl fmt::Debug for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Operator({})", self.name)
    }
}

#[derive(Debug, Clone)]
pub enum Value {
    Number(f64),
    Symbol(Symbol),
    String(String),
    List(Vec<Value>),
    Operator(Operator),
    Lambda {
        params: Vec<Symbol>,
        body: Box<Value>,
        env: Rc<Environment>,
    },
    Macro {
        params: Vec<Symbol>,
        body: Box<Value>,
        env: Rc<Environment>,
    },
    Environment(Rc<Environment>),
}

impl Value {
    /// The canonical empty list — falsy/unit value, EOF sentinel for `read`.
    pub fn nil() -> Value {
        Value::List(Vec::new())
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Number(_) => "number",
            Value::Symbol(_) => "symbol",
            Value::String(_) => "string",
            Value::List(_) => "list",
            Value::Operator(_) => "operator",
            Value::Lambda { .. } => "lambda",
            Value::Macro { .. } => "macro",
            Value::Environment(_) => "environment",
        }
    }
}

/// Structural equality, used by the `==` primitive and internally. Two
/// values are equal iff they have the same kind and their payload matches:
/// numbers as reals, symbols/strings by lexeme, lists/environments by
/// length and pairwise equality, operators by native action, and
/// lambdas/macros by body and parameter list (the captured environment is
/// deliberately ignored).
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::Symbol(a), Value::Symbol(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::List(a), Value::List(b)) => {
                a.len() == b.len() && a.iter().zip(b.iter()).all(|(x, y)| x == y)
            }
            (Value::Operator(a), Value::Operator(b)) => a.func as usize == b.func as usize,
            (
                Value::Lambda {
                    params: pa,
                    body: ba,
                    ..
                },
                Value::Lambda {
                    params: pb,
                    body: bb,
                    ..
                },
            ) => pa == pb && ba == bb,
            (
                Value::Macro {
                    params: pa,
                    body: ba,
                    ..
                },
                Value::Macro {
                    params: pb,
                    body: bb,
                    ..
                },
            ) => pa == pb && ba == bb,
            (Value::Environment(a), Value::Environment(b)) => {
                let ba = a.bindings();
                let bb = b.bindings();
                ba.len() == bb.len()
                    && ba
                        .iter()
                        .zip(bb.iter())
                        .all(|((sa, va), (sb, vb))| sa == sb && va == vb)
            }
            _ => false,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Number(n) => {
                if n.fract() == 0.0 && n.is_finite() && n.abs() < 1e15 {
                    write!(f, "{}", *n as i64)
                } else {
                    write!(f, "{}", n)
                }
            }
            Value::Symbol(s) => write!(f, "{}", s),
            Value::String(s) => write!(f, "\"{}\"", s),
            Value::List(items) => {
                write!(f, "(")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, " ")?;
                    }
                    write!(f, "{}", item)?;
                }
                write!(f, ")")
            }
            Value::Operator(op) => write!(f, "#<primitive:{}>", op.name),
            Value::Lambda { .. } => write!(f, "#<lambda>"),
            Value::Macro { .. } => write!(f, "#<macro>"),
            Value::Environment(_) => write!(f, "#<environment>"),
        }
    }
}
