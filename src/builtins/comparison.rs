//! Comparison operations: < <= > >= ==
//!
//! `<`/`<=`/`>`/`>=` take the leftmost number and compare pairwise across
//! the list, returning 1 if every adjacent pair satisfies the relation and
//! 0 otherwise. Fewer than two arguments means zero adjacent pairs, which
//! vacuously satisfies the relation — these return 1. `==` is structural
//! equality (`Value`'s `PartialEq`), not numeric comparison.

use super::expect_number;
use crate::env::Environment;
use crate::error::EvalError;
use crate::value::{Operator, Value};
use std::rc::Rc;

fn relation(args: &[Value], name: &'static str, rel: fn(f64, f64) -> bool) -> Result<Value, EvalError> {
    let nums = args
        .iter()
        .map(|a| expect_number(a, name))
        .collect::<Result<Vec<_>, _>>()?;
    if nums.len() < 2 {
        return Ok(Value::Number(1.0));
    }
    for pair in nums.windows(2) {
        if !rel(pair[0], pair[1]) {
            return Ok(Value::Number(0.0));
        }
    }
    Ok(Value::Number(1.0))
}

fn builtin_lt(args: &[Value], _env: &Rc<Environment>) -> Result<Value, EvalError> {
    relation(args, "<", |a, b| a < b)
}

fn builtin_le(args: &[Value], _env: &Rc<Environment>) -> Result<Value, EvalError> {
    relation(args, "<=", |a, b| a <= b)
}

fn builtin_gt(args: &[Value], _env: &Rc<Environment>) -> Result<Value, EvalError> {
    relation(args, ">", |a, b| a > b)
}

fn builtin_ge(args: &[Value], _env: &Rc<Environment>) -> Result<Value, EvalError> {
    relation(args, ">=", |a, b| a >= b)
}

fn builtin_eq(args: &[Value], _env: &Rc<Environment>) -> Result<Value, EvalError> {
    if args.len() != 2 {
        return Err(EvalError::arity("==", 2, args.len()));
    }
    Ok(Value::Number(if args[0] == args[1] { 1.0 } else { 0.0 }))
}

fn op(func: crate::value::BuiltinFn, name: &'static str, min_args: usize) -> Value {
    Value::Operator(Operator { func, min_args, name })
}

pub fn register(env: &Rc<Environment>) {
    env.extend(crate::symbol::intern("<"), op(builtin_lt, "<", 0));
    env.extend(crate::symbol::intern("<="), op(builtin_le, "<=", 0));
    env.extend(crate::symbol::intern(">"), op(builtin_gt, ">", 0));
    env.extend(crate::symbol::intern(">="), op(builtin_ge, ">=", 0));
    env.extend(crate::symbol::intern("=="), op(builtin_eq, "==", 2));
}
