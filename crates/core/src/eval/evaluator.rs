//! Expression evaluation facade.
//!
//! One [`Evaluator`] exists per render pass. It borrows an immutable
//! `(Parameters, Values)` snapshot plus an expression backend, and owns
//! the cycle bookkeeping for recursive evaluation. The resolver handed to
//! the backend borrows the facade, so the resolver/facade dependency is a
//! plain borrow rather than a shared mutable handle.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;

use crate::params::{DisplayOptions, ParameterDefinition, Parameters, Value, Values, format_value};

use super::errors::EvalError;
use super::resolver::{ScopedResolver, TermScope};

/// Maximum nesting of function calls before evaluation is aborted.
pub(crate) const MAX_CALL_DEPTH: usize = 64;

/// External expression evaluator boundary.
///
/// Implementations own the grammar. Unknown terms are resolved through
/// the supplied scope; invocations of document functions go through
/// [`TermScope::call`]. Resolver-side errors must be propagated
/// unchanged, not re-wrapped.
pub trait ExpressionBackend {
    fn expression_to_value(
        &self,
        expression: &str,
        scope: &dyn TermScope,
    ) -> Result<Value, EvalError>;
}

/// One render pass worth of evaluation state.
///
/// Re-evaluating anything against the same snapshot yields the same
/// result: interior state is limited to cycle bookkeeping, which is empty
/// again whenever no evaluation is in flight.
pub struct Evaluator<'a> {
    parameters: &'a Parameters,
    values: &'a Values,
    backend: &'a dyn ExpressionBackend,
    stack: RefCell<Vec<String>>,
    depth: Cell<usize>,
}

impl<'a> Evaluator<'a> {
    pub fn new(
        parameters: &'a Parameters,
        values: &'a Values,
        backend: &'a dyn ExpressionBackend,
    ) -> Self {
        Self {
            parameters,
            values,
            backend,
            stack: RefCell::new(Vec::new()),
            depth: Cell::new(0),
        }
    }

    pub(crate) fn parameters(&self) -> &Parameters {
        self.parameters
    }

    pub(crate) fn values(&self) -> &Values {
        self.values
    }

    /// Evaluate an expression with no argument overrides.
    pub fn evaluate(&self, expression: &str) -> Result<Value, EvalError> {
        let overrides = HashMap::new();
        self.evaluate_with(expression, &overrides)
    }

    /// Evaluate with `overrides` shadowing resolver lookups for the
    /// duration of this one call.
    pub fn evaluate_with(
        &self,
        expression: &str,
        overrides: &HashMap<String, Value>,
    ) -> Result<Value, EvalError> {
        let scope = ScopedResolver { evaluator: self, overrides };
        self.backend.expression_to_value(expression, &scope)
    }

    /// Resolve a named parameter to its current value.
    pub fn evaluate_term(&self, name: &str) -> Result<Value, EvalError> {
        let overrides = HashMap::new();
        let scope = ScopedResolver { evaluator: self, overrides: &overrides };
        scope.resolve(name)
    }

    /// Rendered textual form of a parameter: constants and calculations
    /// evaluate to text, functions render as their own name, inputs as
    /// their current value.
    pub fn render_term(
        &self,
        name: &str,
        options: &DisplayOptions,
    ) -> Result<String, EvalError> {
        match self.parameters.get(name) {
            Some(ParameterDefinition::Function { .. }) => Ok(name.to_string()),
            _ => {
                let value = self.evaluate_term(name)?;
                Ok(format_value(&value, options))
            }
        }
    }

    /// Evaluate a calculation's expression, guarding against reference
    /// cycles and wrapping failures with the calculation's name.
    pub(crate) fn evaluate_calculation(
        &self,
        name: &str,
        expression: &str,
    ) -> Result<Value, EvalError> {
        {
            let stack = self.stack.borrow();
            if stack.iter().any(|entry| entry == name) {
                let mut chain = stack.clone();
                chain.push(name.to_string());
                return Err(EvalError::Cycle { chain });
            }
        }

        self.stack.borrow_mut().push(name.to_string());
        let result = self.evaluate(expression);
        self.stack.borrow_mut().pop();

        result.map_err(|err| wrap_term_error(name, expression, err))
    }

    /// Evaluate a function body under the bound-argument scope. The
    /// bindings exist for this call only.
    pub(crate) fn evaluate_function(
        &self,
        name: &str,
        expression: &str,
        bound: HashMap<String, Value>,
    ) -> Result<Value, EvalError> {
        if self.depth.get() >= MAX_CALL_DEPTH {
            let mut chain = self.stack.borrow().clone();
            chain.push(name.to_string());
            return Err(EvalError::Cycle { chain });
        }

        self.depth.set(self.depth.get() + 1);
        self.stack.borrow_mut().push(name.to_string());
        let result = self.evaluate_with(expression, &bound);
        self.stack.borrow_mut().pop();
        self.depth.set(self.depth.get() - 1);

        result.map_err(|err| wrap_term_error(name, expression, err))
    }
}

/// Cycles pass through untouched so callers can recognise them; anything
/// else gains the failing term's name and raw expression.
fn wrap_term_error(name: &str, expression: &str, err: EvalError) -> EvalError {
    match err {
        err @ EvalError::Cycle { .. } => err,
        err => EvalError::Evaluation {
            term: name.to_string(),
            expression: expression.to_string(),
            message: err.to_string(),
        },
    }
}
