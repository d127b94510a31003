//! List construction: list head tail

use super::expect_list;
use crate::env::Environment;
use crate::error::EvalError;
use crate::value::{Operator, Value};
use std::rc::Rc;

fn builtin_list(args: &[Value], _env: &Rc<Environment>) -> Result<Value, EvalError> {
    Ok(Value::List(args.to_vec()))
}

fn builtin_head(args: &[Value], _env: &Rc<Environment>) -> Result<Value, EvalError> {
    if args.len() != 1 {
        return Err(EvalError::arity("head", 1, args.len()));
    }
    let items = expect_list(&args[0], "head")?;
    Ok(items.first().cloned().unwrap_or_else(Value::nil))
}

fn builtin_tail(args: &[Value], _env: &Rc<Environment>) -> Result<Value, EvalError> {
    if args.len() != 1 {
        return Err(EvalError::arity("tail", 1, args.len()));
    }
    let items = expect_list(&args[0], "tail")?;
    if items.len() < 2 {
        Ok(Value::nil())
    } else {
        Ok(Value::List(items[1..].to_vec()))
    }
}

pub fn register(env: &Rc<Environment>) {
    env.extend(
        crate::symbol::intern("list"),
        Value::Operator(Operator {
            func: builtin_list,
            min_args: 0,
            name: "list",
        }),
    );
    env.extend(
        crate::symbol::intern("head"),
        Value::Operator(Operator {
            func: builtin_head,
            min_args: 1,
            name: "head",
        }),
    );
    env.extend(
        crate::symbol::intern("tail"),
        Value::Operator(Operator {
            func: builtin_tail,
            min_args: 1,
            name: "tail",
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
    fn list_returns_args_as_is() {
        let args = [Value::Number(1.0), Value::Number(2.0)];
        assert_eq!(builtin_list(&args, &env()).unwrap(), Value::List(args.to_vec()));
    }

    #[test]
    fn head_and_tail_of_nonempty_list() {
        let l = Value::List(vec![Value::Number(1.0), Value::Number(2.0), Value::Number(3.0)]);
        assert_eq!(builtin_head(&[l.clone()], &env()).unwrap(), Value::Number(1.0));
        assert_eq!(
            builtin_tail(&[l], &env()).unwrap(),
            Value::List(vec![Value::Number(2.0), Value::Number(3.0)])
        );
    }

    #[test]
    fn head_and_tail_of_empty_or_singleton_return_empty_list() {
        assert_eq!(builtin_head(&[Value::nil()], &env()).unwrap(), Value::nil());
        assert_eq!(builtin_tail(&[Value::nil()], &env()).unwrap(), Value::nil());
        let one = Value::List(vec![Value::Number(1.0)]);
        assert_eq!(builtin_tail(&[one], &env()).unwrap(), Value::nil());
    }
}
