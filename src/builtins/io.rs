//! Reflective and side-effecting primitives: env eval apply read load display
//!
//! `eval` and `apply` are registered as ordinary `Operator`s so they behave
//! like any other callable (quotable, passable to `apply` themselves), but
//! their native bodies are never actually invoked — `eval::eval`'s call
//! dispatch recognizes `EVAL_MARKER`/`APPLY_MARKER` by function-pointer
//! identity and handles them itself, looping in tail position instead of
//! recursing through this module.

use crate::env::Environment;
use crate::error::EvalError;
use crate::reader::Reader;
use crate::value::{Operator, Value};
use std::cell::RefCell;
use std::rc::Rc;

/// Never invoked directly; see the module doc comment.
pub fn eval_marker_body(_args: &[Value], _env: &Rc<Environment>) -> Result<Value, EvalError> {
    unreachable!("eval is intercepted by the evaluator's call dispatch")
}

/// Never invoked directly; see the module doc comment.
pub fn apply_marker_body(_args: &[Value], _env: &Rc<Environment>) -> Result<Value, EvalError> {
    unreachable!("apply is intercepted by the evaluator's call dispatch")
}

pub const EVAL_MARKER: crate::value::BuiltinFn = eval_marker_body;
pub const APPLY_MARKER: crate::value::BuiltinFn = apply_marker_body;

fn builtin_env(args: &[Value], env: &Rc<Environment>) -> Result<Value, EvalError> {
    if !args.is_empty() {
        return Err(EvalError::arity("env", 0, args.len()));
    }
    Ok(Value::Environment(env.clone()))
}

thread_local! {
    /// Input carried over between `read` calls: whatever trailed the last
    /// expression parsed out of stdin, unconsumed.
    static STDIN_REMAINDER: RefCell<String> = RefCell::new(String::new());
}

/// An `EvalError::Read` caused by running out of characters mid-form (an
/// unterminated string/list, or a quote with nothing after it) means stdin
/// just needs another line; anything else is a genuine syntax error.
fn needs_more_input(message: &str) -> bool {
    message.contains("unterminated") || message.contains("unexpected end of input")
}

/// Reads one expression from stdin, leaving everything after it buffered
/// for the next call — repeated calls step through the stream the way the
/// original host's `read` does, rather than draining all of stdin at once.
/// True end of stream reads back as the empty list, matching `Reader::read`'s
/// sentinel for the in-memory case.
fn builtin_read(args: &[Value], _env: &Rc<Environment>) -> Result<Value, EvalError> {
    if !args.is_empty() {
        return Err(EvalError::arity("read", 0, args.len()));
    }
    STDIN_REMAINDER.with(|cell| {
        let mut buffer = cell.borrow_mut();
        loop {
            let mut reader = Reader::new(buffer.as_str());
            match reader.read_opt() {
                Ok(Some(value)) => {
                    *buffer = reader.remainder();
                    return Ok(value);
                }
                Ok(None) => {}
                Err(EvalError::Read(message)) if needs_more_input(&message) => {}
                Err(e) => return Err(e),
            }

            let mut line = String::new();
            let read = std::io::stdin()
                .read_line(&mut line)
                .map_err(|e| EvalError::Io(e.to_string()))?;
            if read == 0 {
                return if buffer.trim().is_empty() {
                    Ok(Value::nil())
                } else {
                    Err(EvalError::Read("unexpected end of input".into()))
                };
            }
            buffer.push_str(&line);
        }
    })
}

/// Evaluates every top-level form in a file sequentially against `env`,
/// returning the value of the last one (or the empty list for an empty
/// file).
fn builtin_load(args: &[Value], env: &Rc<Environment>) -> Result<Value, EvalError> {
    if args.len() != 1 {
        return Err(EvalError::arity("load", 1, args.len()));
    }
    let path = match &args[0] {
        Value::String(s) => s.clone(),
        other => return Err(EvalError::type_error("load", "string", other)),
    };
    let source = std::fs::read_to_string(&path).map_err(|e| EvalError::Io(e.to_string()))?;
    let mut reader = Reader::new(&source);
    let mut result = Value::nil();
    while let Some(form) = reader.read_opt()? {
        result = crate::eval::eval(form, env.clone())?;
    }
    Ok(result)
}

fn builtin_display(args: &[Value], _env: &Rc<Environment>) -> Result<Value, EvalError> {
    for arg in args {
        print!("{arg}");
    }
    Ok(Value::List(args.to_vec()))
}

pub fn register(env: &Rc<Environment>) {
    env.extend(
        crate::symbol::intern("env"),
        Value::Operator(Operator {
            func: builtin_env,
            min_args: 0,
            name: "env",
        }),
    );
    env.extend(
        crate::symbol::intern("eval"),
        Value::Operator(Operator {
            func: EVAL_MARKER,
            min_args: 1,
            name: "eval",
        }),
    );
    env.extend(
        crate::symbol::intern("apply"),
        Value::Operator(Operator {
            func: APPLY_MARKER,
            min_args: 0,
            name: "apply",
        }),
    );
    env.extend(
        crate::symbol::intern("read"),
        Value::Operator(Operator {
            func: builtin_read,
            min_args: 0,
            name: "read",
        }),
    );
    env.extend(
        crate::symbol::intern("load"),
        Value::Operator(Operator {
            func: builtin_load,
            min_args: 1,
            name: "load",
        }),
    );
    env.extend(
        crate::symbol::intern("display"),
        Value::Operator(Operator {
            func: builtin_display,
            min_args: 0,
            name: "display",
        }),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reader::read_one;

    fn fresh_env() -> Rc<Environment> {
        let env = Environment::new();
        crate::builtins::register_builtins(&env);
        env
    }

    #[test]
    fn env_returns_the_calling_environment() {
        let env = fresh_env();
        env.extend(crate::symbol::intern("x"), Value::Number(1.0));
        let result = crate::eval::eval(read_one("(env)").unwrap(), env.clone()).unwrap();
        assert_eq!(result, Value::Environment(env));
    }

    #[test]
    fn eval_reevaluates_a_quoted_form() {
        let env = fresh_env();
        let result = crate::eval::eval(read_one("(eval (quote (+ 1 2)))").unwrap(), env).unwrap();
        assert_eq!(result, Value::Number(3.0));
    }

    #[test]
    fn apply_splices_evaluated_operands_into_a_fresh_call() {
        let env = fresh_env();
        let result = crate::eval::eval(read_one("(apply + 1 2 3)").unwrap(), env).unwrap();
        assert_eq!(result, Value::Number(6.0));
    }

    #[test]
    fn load_evaluates_each_form_and_returns_the_last() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prog.lisp");
        std::fs::write(&path, "(def x 1) (def y 2) (+ x y)").unwrap();

        let env = fresh_env();
        let expr = format!("(load \"{}\")", path.display());
        let result = crate::eval::eval(read_one(&expr).unwrap(), env).unwrap();
        assert_eq!(result, Value::Number(3.0));
    }

    #[test]
    fn load_of_missing_file_is_an_io_error() {
        let env = fresh_env();
        let err = crate::eval::eval(read_one("(load \"/no/such/file\")").unwrap(), env).unwrap_err();
        assert!(matches!(err, EvalError::Io(_)));
    }

    #[test]
    fn display_returns_its_arguments_unchanged() {
        let env = fresh_env();
        let result =
            crate::eval::eval(read_one("(display \"hi\" 1)").unwrap(), env).unwrap();
        assert_eq!(
            result,
            Value::List(vec![Value::String("hi".into()), Value::Number(1.0)])
        );
    }
}
