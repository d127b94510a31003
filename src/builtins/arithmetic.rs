//! Arithmetic operations: + - * /
//!
//! n-ary over numbers. With one argument the operator is applied to its
//! unit (`+x`/`*x` return `x`, `-x` returns `-x`, `/x` returns `1/x`). With
//! two or more, a left fold starting at the first argument — not the unit.

use super::expect_number;
use crate::env::Environment;
use crate::error::EvalError;
use crate::value::{Operator, Value};
use std::rc::Rc;

fn fold(
    args: &[Value],
    name: &'static str,
    unit: f64,
    op: fn(f64, f64) -> f64,
) -> Result<Value, EvalError> {
    if args.is_empty() {
        return Err(EvalError::arity_at_least(name, 1, 0));
    }
    let first = expect_number(&args[0], name)?;
    if args.len() == 1 {
        return Ok(Value::Number(op(unit, first)));
    }
    let mut acc = first;
    for arg in &args[1..] {
        acc = op(acc, expect_number(arg, name)?);
    }
    Ok(Value::Number(acc))
}

fn builtin_add(args: &[Value], _env: &Rc<Environment>) -> Result<Value, EvalError> {
    fold(args, "+", 0.0, |a, b| a + b)
}

fn builtin_sub(args: &[Value], _env: &Rc<Environment>) -> Result<Value, EvalError> {
    fold(args, "-", 0.0, |a, b| a - b)
}

fn builtin_mul(args: &[Value], _env: &Rc<Environment>) -> Result<Value, EvalError> {
    fold(args, "*", 1.0, |a, b| a * b)
}

fn builtin_div(args: &[Value], _env: &Rc<Environment>) -> Result<Value, EvalError> {
    fold(args, "/", 1.0, |a, b| a / b)
}

pub fn register(env: &Rc<Environment>) {
    env.extend(
        crate::symbol::intern("+"),
        Value::Operator(Operator {
            func: builtin_add,
            min_args: 1,
            name: "+",
        }),
    );
    env.extend(
        crate::symbol::intern("-"),
        Value::Operator(Operator {
            func: builtin_sub,
            min_args: 1,
            name: "-",
        }),
    );
    env.extend(
        crate::symbol::intern("*"),
        Value::Operator(Operator {
            func: builtin_mul,
            min_args: 1,
            name: "*",
        }),
    );
    env.extend(
        crate::symbol::intern("/"),
        Value::Operator(Operator {
            func: builtin_div,
            min_args: 1,
            name: "/",
        }),
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env() -> Rc<Environment> {
        Environment::new()
    }

    #[test]
    fn sum_of_many() {
        assert_eq!(
            builtin_add(&[Value::Number(1.0), Value::Number(2.0), Value::Number(3.0)], &env())
                .unwrap(),
            Value::Number(6.0)
        );
    }

    #[test]
    fn unary_identities() {
        assert_eq!(builtin_add(&[Value::Number(5.0)], &env()).unwrap(), Value::Number(5.0));
        assert_eq!(builtin_mul(&[Value::Number(5.0)], &env()).unwrap(), Value::Number(5.0));
        assert_eq!(builtin_sub(&[Value::Number(5.0)], &env()).unwrap(), Value::Number(-5.0));
        assert_eq!(builtin_div(&[Value::Number(5.0)], &env()).unwrap(), Value::Number(0.2));
    }

    #[test]
    fn left_fold_subtraction_and_division() {
        assert_eq!(
            builtin_sub(&[Value::Number(10.0), Value::Number(3.0), Value::Number(2.0)], &env())
                .unwrap(),
            Value::Number(5.0)
        );
        assert_eq!(
            builtin_div(&[Value::Number(100.0), Value::Number(2.0), Value::Number(5.0)], &env())
                .unwrap(),
            Value::Number(10.0)
        );
    }

    #[test]
    fn type_mismatch_on_non_number() {
        assert!(builtin_add(&[Value::String("x".into())], &env()).is_err());
    }
}
