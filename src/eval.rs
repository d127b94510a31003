// ABOUTME: The iterative evaluator — tail positions loop, everything else recurses

use crate::env::Environment;
use crate::error::EvalError;
use crate::symbol::{reserved, Symbol};
use crate::value::Value;
use std::rc::Rc;

/// Reduce `(node, env)` to a value. `if`, `begin`'s last clause, a lambda
/// body's final form, `eval`'s argument, and `apply`'s constructed form are
/// all re-entered by mutating `node`/`env` and looping, so a tail-recursive
/// user program runs in bounded host-stack depth. Everything else (argument
/// lists, `if`'s condition, `begin`'s non-last forms) recurses normally.
pub fn eval(mut node: Value, mut env: Rc<Environment>) -> Result<Value, EvalError> {
    let reserved = reserved();
    loop {
        match &node {
            Value::Symbol(sym) => {
                return env
                    .lookup(sym)
                    .ok_or_else(|| EvalError::UnboundSymbol(sym.to_string()));
            }
            Value::List(items) if items.is_empty() => return Ok(Value::nil()),
            Value::List(items) => {
                if let Value::Symbol(head) = &items[0] {
                    if *head == reserved.def {
                        return eval_def(items, &env);
                    }
                    if *head == reserved.quote {
                        return eval_quote(items);
                    }
                    if *head == reserved.fn_ {
                        return eval_fn(items, &env, false);
                    }
                    if *head == reserved.macro_ {
                        return eval_fn(items, &env, true);
                    }
                    if *head == reserved.if_ {
                        match eval_if_select(items, &env)? {
                            Some(next) => {
                                node = next;
                                continue;
                            }
                            None => return Ok(Value::nil()),
                        }
                    }
                    if *head == reserved.begin {
                        node = eval_begin(items, &env)?;
                        continue;
                    }
                }

                // Function application.
                let func = eval(items[0].clone(), env.clone())?;
                let is_macro = matches!(func, Value::Macro { .. });
                let args: Vec<Value> = if is_macro {
                    items[1..].to_vec()
                } else {
                    items[1..]
                        .iter()
                        .map(|a| eval(a.clone(), env.clone()))
                        .collect::<Result<_, _>>()?
                };

                match func {
                    Value::Lambda {
                        params,
                        body,
                        env: captured,
                    } => {
                        if args.len() < params.len() {
                            return Err(EvalError::arity_at_least(
                                "lambda call",
                                params.len(),
                                args.len(),
                            ));
                        }
                        let new_env = Environment::with_parent(captured);
                        bind_params(&params, &args, &new_env);
                        node = *body;
                        env = new_env;
                    }
                    Value::Macro {
                        params,
                        body,
                        env: captured,
                    } => {
                        if args.len() < params.len() {
                            return Err(EvalError::arity_at_least(
                                "macro call",
                                params.len(),
                                args.len(),
                            ));
                        }
                        let new_env = Environment::with_parent(captured);
                        bind_params(&params, &args, &new_env);
                        let expansion = eval(*body, new_env.clone())?;
                        node = expansion;
                        env = new_env;
                    }
                    Value::Operator(op) => {
                        if args.len() < op.min_args {
                            return Err(EvalError::arity_at_least(op.name, op.min_args, args.len()));
                        }
                        if op.func as usize == crate::builtins::io::EVAL_MARKER as usize {
                            node = args.into_iter().next().unwrap_or_else(Value::nil);
                        } else if op.func as usize == crate::builtins::io::APPLY_MARKER as usize {
                            node = Value::List(args);
                        } else {
                            return (op.func)(&args, &env);
                        }
                    }
                    other => return Err(EvalError::NotCallable(format!("{other}"))),
                }
            }
            other => return Ok(other.clone()),
        }
    }
}

fn bind_params(params: &[Symbol], args: &[Value], env: &Rc<Environment>) {
    for (param, arg) in params.iter().zip(args.iter()) {
        env.extend(param.clone(), arg.clone());
    }
}

fn eval_def(items: &[Value], env: &Rc<Environment>) -> Result<Value, EvalError> {
    if items.len() != 3 {
        return Err(EvalError::arity("def", 3, items.len()));
    }
    let symbol = match &items[1] {
        Value::Symbol(s) => s.clone(),
        other => return Err(EvalError::type_error("def", "symbol", other)),
    };
    let value = eval(items[2].clone(), env.clone())?;
    Ok(env.extend(symbol, value))
}

fn eval_quote(items: &[Value]) -> Result<Value, EvalError> {
    if items.len() != 2 {
        return Err(EvalError::arity("quote", 2, items.len()));
    }
    Ok(items[1].clone())
}

fn params_list(params: &Value, context: &str) -> Result<Vec<Symbol>, EvalError> {
    match params {
        Value::List(items) => items
            .iter()
            .map(|p| match p {
                Value::Symbol(s) => Ok(s.clone()),
                other => Err(EvalError::type_error(context, "symbol", other)),
            })
            .collect(),
        other => Err(EvalError::type_error(context, "parameter list", other)),
    }
}

fn eval_fn(items: &[Value], env: &Rc<Environment>, is_macro: bool) -> Result<Value, EvalError> {
    let context = if is_macro { "macro" } else { "fn" };
    if items.len() != 3 {
        return Err(EvalError::arity(context, 3, items.len()));
    }
    let params = params_list(&items[1], context)?;
    let body = Box::new(items[2].clone());
    let env = env.clone();
    Ok(if is_macro {
        Value::Macro { params, body, env }
    } else {
        Value::Lambda { params, body, env }
    })
}

/// Evaluates the condition and returns the branch to continue on in tail
/// position, or `None` when there's no else-branch to fall back to.
fn eval_if_select(items: &[Value], env: &Rc<Environment>) -> Result<Option<Value>, EvalError> {
    if items.len() != 3 && items.len() != 4 {
        return Err(EvalError::Arity {
            context: "if".to_string(),
            expected: 3,
            actual: items.len(),
        });
    }
    let condition = eval(items[1].clone(), env.clone())?;
    let n = match condition {
        Value::Number(n) => n,
        other => return Err(EvalError::type_error("if", "number", other)),
    };
    if n != 0.0 {
        Ok(Some(items[2].clone()))
    } else if items.len() == 4 {
        Ok(Some(items[3].clone()))
    } else {
        Ok(None)
    }
}

fn eval_begin(items: &[Value], env: &Rc<Environment>) -> Result<Value, EvalError> {
    if items.len() < 2 {
        return Err(EvalError::arity_at_least("begin", 1, items.len().saturating_sub(1)));
    }
    for item in &items[1..items.len() - 1] {
        eval(item.clone(), env.clone())?;
    }
    Ok(items[items.len() - 1].clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builtins::register_builtins;
    use crate::reader::read_one;

    fn fresh_env() -> Rc<Environment> {
        let env = Environment::new();
        register_builtins(&env);
        env
    }

    fn run(src: &str, env: &Rc<Environment>) -> Value {
        eval(read_one(src).unwrap(), env.clone()).unwrap()
    }

    #[test]
    fn arithmetic_sum() {
        let env = fresh_env();
        assert_eq!(run("(+ 1 2 3)", &env), Value::Number(6.0));
    }

    #[test]
    fn factorial_via_recursion() {
        let env = fresh_env();
        run(
            "(def fact (fn (n) (if (<= n 1) 1 (* n (fact (- n 1))))))",
            &env,
        );
        assert_eq!(run("(fact 5)", &env), Value::Number(120.0));
    }

    #[test]
    fn tail_recursive_loop_runs_deep_without_overflow() {
        let env = fresh_env();
        run(
            "(def loop (fn (n) (if (<= n 0) (quote done) (loop (- n 1)))))",
            &env,
        );
        let result = run("(loop 100000)", &env);
        assert_eq!(result, Value::Symbol(crate::symbol::intern("done")));
    }

    #[test]
    fn macro_expands_unevaluated_args_and_reevaluates_result() {
        let env = fresh_env();
        run("(def mac (macro (x) (list (quote +) x x)))", &env);
        assert_eq!(run("(mac 3)", &env), Value::Number(6.0));
    }

    #[test]
    fn if_without_else_returns_empty_list() {
        let env = fresh_env();
        assert_eq!(run("(if 0 1 2)", &env), Value::Number(2.0));
        assert_eq!(run("(if 1 (quote a))", &env), Value::Symbol(crate::symbol::intern("a")));
        assert_eq!(run("(if 0 (quote a))", &env), Value::nil());
    }

    #[test]
    fn structural_equality_builtin() {
        let env = fresh_env();
        assert_eq!(run("(== (list 1 2) (list 1 2))", &env), Value::Number(1.0));
        assert_eq!(run("(== (quote a) (quote a))", &env), Value::Number(1.0));
        assert_eq!(run("(== 1 \"1\")", &env), Value::Number(0.0));
    }

    #[test]
    fn unbound_symbol_error_names_the_symbol() {
        let env = fresh_env();
        let err = eval(read_one("zzz").unwrap(), env).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("unbound"), "{msg}");
        assert!(msg.contains("zzz"), "{msg}");
    }

    #[test]
    fn def_in_inner_scope_does_not_mutate_outer() {
        let env = fresh_env();
        run("(def x 1)", &env);
        run(
            "(def f (fn (x) (begin (def x 2) x)))",
            &env,
        );
        assert_eq!(run("(f 99)", &env), Value::Number(2.0));
        assert_eq!(run("x", &env), Value::Number(1.0));
    }

    #[test]
    fn lambda_tolerates_extra_arguments() {
        let env = fresh_env();
        run("(def f (fn (x) x))", &env);
        assert_eq!(run("(f 1 2 3)", &env), Value::Number(1.0));
    }
}
