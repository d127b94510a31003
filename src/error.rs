// ABOUTME: Error types for reader and evaluator failures

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum EvalError {
    /// Unterminated string, unsupported escape, unexpected close-paren, etc.
    #[error("read error: {0}")]
    Read(String),

    #[error("unbound symbol: {0}")]
    UnboundSymbol(String),

    #[error("{context}: expected {expected}, got {actual}")]
    TypeMismatch {
        context: String,
        expected: &'static str,
        actual: String,
    },

    #[error("{context}: expected {expected} argument{}, got {actual}", if *expected == 1 { "" } else { "s" })]
    Arity {
        context: String,
        expected: usize,
        actual: usize,
    },

    #[error("{context}: expected at least {expected} argument{}, got {actual}", if *expected == 1 { "" } else { "s" })]
    ArityAtLeast {
        context: String,
        expected: usize,
        actual: usize,
    },

    #[error("function expected, got {0}")]
    NotCallable(String),

    #[error("io error: {0}")]
    Io(String),
}

impl EvalError {
    pub fn type_error(context: &str, expected: &'static str, actual: impl std::fmt::Display) -> Self {
        EvalError::TypeMismatch {
            context: context.to_string(),
            expected,
            actual: actual.to_string(),
        }
    }

    pub fn arity(context: &str, expected: usize, actual: usize) -> Self {
        EvalError::Arity {
            context: context.to_string(),
            expected,
            actual,
        }
    }

    pub fn arity_at_least(context: &str, expected: usize, actual: usize) -> Self {
        EvalError::ArityAtLeast {
            context: context.to_string(),
            expected,
            actual,
        }
    }
}
