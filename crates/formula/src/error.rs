//! Formula-level failures.

use calcdown_core::EvalError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FormulaError {
    #[error("unexpected character `{ch}` at position {pos}")]
    UnexpectedChar { ch: char, pos: usize },

    #[error("unterminated string literal starting at position {pos}")]
    UnterminatedString { pos: usize },

    #[error("unexpected {found} at position {pos}")]
    UnexpectedToken { found: String, pos: usize },

    #[error("expected {expected}, found {found} at position {pos}")]
    ExpectedToken {
        expected: String,
        found: String,
        pos: usize,
    },

    #[error("{0}")]
    Type(String),

    #[error("unknown function `{0}`")]
    UnknownFunction(String),

    #[error("`{name}` expects {expected} argument(s), received {received}")]
    BuiltinArity {
        name: String,
        expected: String,
        received: usize,
    },

    /// A resolver-side failure; passed through to the caller untouched.
    #[error(transparent)]
    Scope(#[from] EvalError),
}
