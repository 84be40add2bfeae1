//! calcdown-formula: the expression evaluator behind calcdown's
//! [`ExpressionBackend`] boundary.
//!
//! A deliberately small formula grammar: numbers, strings, booleans,
//! arithmetic, comparison and logical operators, a handful of builtin
//! functions, and call syntax into the document's own named functions.
//! The backend owns no state; every unknown name goes back through the
//! term scope handed in per evaluation.

mod error;
mod interp;
mod parser;
mod token;

pub use error::FormulaError;

use calcdown_core::{EvalError, ExpressionBackend, TermScope, Value};

use parser::Parser;
use token::Lexer;

/// Parse and evaluate one expression against a term scope.
pub fn evaluate_str(expression: &str, scope: &dyn TermScope) -> Result<Value, FormulaError> {
    let tokens = Lexer::new(expression).tokenize()?;
    let expr = Parser::new(tokens).parse()?;
    interp::evaluate(&expr, scope)
}

/// Stateless [`ExpressionBackend`] over the formula grammar.
#[derive(Debug, Default, Clone, Copy)]
pub struct FormulaBackend;

impl FormulaBackend {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl ExpressionBackend for FormulaBackend {
    fn expression_to_value(
        &self,
        expression: &str,
        scope: &dyn TermScope,
    ) -> Result<Value, EvalError> {
        match evaluate_str(expression, scope) {
            Ok(value) => Ok(value),
            // Resolver-side failures pass through so the facade can
            // recognise unknown terms and cycles.
            Err(FormulaError::Scope(err)) => Err(err),
            Err(err) => Err(EvalError::expression(expression, err.to_string())),
        }
    }
}
