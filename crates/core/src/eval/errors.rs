//! Error types for term resolution and expression evaluation.

use thiserror::Error;

/// Failures raised while resolving terms or evaluating expressions.
///
/// All of these surface synchronously to the caller of the render or
/// evaluate entry point; nothing is caught and continued except where a
/// calculation wraps a nested failure to add its own name.
#[derive(Debug, Error)]
pub enum EvalError {
    /// Name not present in the parameter model or the supplied values.
    #[error("unknown term: {0}")]
    UnknownTerm(String),

    /// Render or evaluate was requested before an expression backend was
    /// attached. A sequencing bug in the caller, not a document error.
    #[error("expression evaluator not initialised")]
    Uninitialised,

    /// The backend rejected or failed to evaluate a raw expression.
    #[error("failed to evaluate expression `{expression}`: {message}")]
    Expression { expression: String, message: String },

    /// A named term failed to evaluate; carries the nested message.
    #[error("failed to evaluate `{term}` (expression `{expression}`): {message}")]
    Evaluation {
        term: String,
        expression: String,
        message: String,
    },

    /// A calculation transitively depends on itself, or function calls
    /// nested past the recursion limit.
    #[error("cyclic dependency: {}", chain.join(" -> "))]
    Cycle { chain: Vec<String> },

    /// An input parameter has neither a stored value nor a default.
    #[error("no default for input `{0}`")]
    MissingDefault(String),

    /// A numeric input holds a value that cannot be coerced to a number.
    #[error("input `{term}` expects a number, got `{value}`")]
    NotNumeric { term: String, value: String },

    /// A function name was used where a value is required.
    #[error("`{0}` is a function and must be called with arguments")]
    NotAValue(String),

    /// A function was invoked with the wrong number of arguments.
    #[error("`{term}` expects {expected} argument(s), received {received}")]
    Arity {
        term: String,
        expected: usize,
        received: usize,
    },
}

impl EvalError {
    /// Convenience for backends reporting a grammar or runtime failure.
    pub fn expression(expression: impl Into<String>, message: impl Into<String>) -> Self {
        EvalError::Expression {
            expression: expression.into(),
            message: message.into(),
        }
    }
}
