//! Error types for the expression language.

use thiserror::Error;

/// A malformed directive body, reported at template compile time.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("syntax error at offset {pos}: {message}")]
pub struct SyntaxError {
    /// Byte offset into the directive body.
    pub pos: usize,
    pub message: String,
}

impl SyntaxError {
    pub fn new(pos: usize, message: impl Into<String>) -> Self {
        Self {
            pos,
            message: message.into(),
        }
    }
}

/// A failed evaluation, reported at render time and propagated unchanged
/// out of the render procedure.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EvalError {
    /// Member access or indexing on `undefined`/`null`.
    #[error("cannot read {access} of {of}")]
    UndefinedAccess { access: String, of: &'static str },

    /// An operator or method applied to a value of the wrong type.
    #[error("type mismatch: {0}")]
    TypeMismatch(String),

    /// A method name outside the builtin set.
    #[error("unknown method `{method}` on {on}")]
    UnknownMethod { method: String, on: &'static str },

    /// A builtin method called with the wrong number of arguments.
    #[error("method `{method}` expects {expected} argument(s), got {found}")]
    WrongArgCount {
        method: String,
        expected: usize,
        found: usize,
    },
}

/// Result alias for expression evaluation.
pub type EvalResult<T> = Result<T, EvalError>;
