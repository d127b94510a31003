//! Unary math: sqrt sin cos log abs exp — standard host floating-point semantics.

use super::expect_number;
use crate::env::Environment;
use crate::error::EvalError;
use crate::value::{Operator, Value};
use std::rc::Rc;

fn unary(args: &[Value], name: &'static str, f: fn(f64) -> f64) -> Result<Value, EvalError> {
    if args.len() != 1 {
        return Err(EvalError::arity(name, 1, args.len()));
    }
    Ok(Value::Number(f(expect_number(&args[0], name)?)))
}

fn builtin_sqrt(args: &[Value], _env: &Rc<Environment>) -> Result<Value, EvalError> {
    unary(args, "sqrt", f64::sqrt)
}

fn builtin_sin(args: &[Value], _env: &Rc<Environment>) -> Result<Value, EvalError> {
    unary(args, "sin", f64::sin)
}

fn builtin_cos(args: &[Value], _env: &Rc<Environment>) -> Result<Value, EvalError> {
    unary(args, "cos", f64::cos)
}

fn builtin_log(args: &[Value], _env: &Rc<Environment>) -> Result<Value, EvalError> {
    unary(args, "log", f64::ln)
}

fn builtin_abs(args: &[Value], _env: &Rc<Environment>) -> Result<Value, EvalError> {
    unary(args, "abs", f64::abs)
}

fn builtin_exp(args: &[Value], _env: &Rc<Environment>) -> Result<Value, EvalError> {
    unary(args, "exp", f64::exp)
}

fn op(func: crate::value::BuiltinFn, name: &'static str) -> Value {
    Value::Operator(Operator { func, min_args: 1, name })
}

pub fn register(env: &Rc<Environment>) {
    env.extend(crate::symbol::intern("sqrt"), op(builtin_sqrt, "sqrt"));
    env.extend(crate::symbol::intern("sin"), op(builtin_sin, "sin"));
    env.extend(crate::symbol::intern("cos"), op(builtin_cos, "cos"));
    env.extend(crate::symbol::intern("log"), op(builtin_log, "log"));
    env.extend(crate::symbol::intern("abs"), op(builtin_abs, "abs"));
    env.extend(crate::symbol::intern("exp"), op(builtin_exp, "exp"));
}
