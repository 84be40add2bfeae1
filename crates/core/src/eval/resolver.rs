//! Term resolution against the parameter graph.
//!
//! The expression backend never sees the parameter model directly; it
//! resolves names through a [`TermScope`]. One scope exists per backend
//! invocation, so function-argument overrides shadow the model for
//! exactly one call and leak nowhere.

use std::collections::HashMap;

use crate::params::{InputDefinition, InputKind, ParameterDefinition, Value, Values};

use super::errors::EvalError;
use super::evaluator::Evaluator;

/// How the expression backend should treat a name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TermKind {
    /// Resolves to a plain value.
    Value,
    /// A document function; must be invoked with call syntax.
    Callable,
    /// Not a known parameter, value or override.
    Unknown,
}

/// Name resolution surface handed to the expression backend.
///
/// `resolve` answers value lookups, `call` dispatches invocations of
/// document functions, and `classify` lets the backend pick between the
/// two without guessing.
pub trait TermScope {
    fn resolve(&self, name: &str) -> Result<Value, EvalError>;
    fn classify(&self, name: &str) -> TermKind;
    fn call(&self, name: &str, args: &[Value]) -> Result<Value, EvalError>;
}

/// Scope for one backend invocation. Borrows the facade so calculations
/// and function bodies recurse through it; the overrides map holds the
/// bound arguments of the function call being evaluated, if any.
pub(crate) struct ScopedResolver<'a> {
    pub(crate) evaluator: &'a Evaluator<'a>,
    pub(crate) overrides: &'a HashMap<String, Value>,
}

impl TermScope for ScopedResolver<'_> {
    fn resolve(&self, name: &str) -> Result<Value, EvalError> {
        if let Some(value) = self.overrides.get(name) {
            return Ok(value.clone());
        }

        match self.evaluator.parameters().get(name) {
            Some(ParameterDefinition::Constant { value }) => Ok(value.clone()),
            Some(ParameterDefinition::Calculation { expression }) => {
                self.evaluator.evaluate_calculation(name, expression)
            }
            Some(ParameterDefinition::Function { .. }) => {
                Err(EvalError::NotAValue(name.to_string()))
            }
            Some(ParameterDefinition::Input(input)) => {
                resolve_input(name, input, self.evaluator.values())
            }
            // A stored value with no definition still resolves; the
            // editor can hold values for parameters that were deleted
            // from the model.
            None => match self.evaluator.values().get(name) {
                Some(value) if !value.is_empty_marker() => Ok(value.clone()),
                _ => Err(EvalError::UnknownTerm(name.to_string())),
            },
        }
    }

    fn classify(&self, name: &str) -> TermKind {
        if self.overrides.contains_key(name) {
            return TermKind::Value;
        }
        match self.evaluator.parameters().get(name) {
            Some(ParameterDefinition::Function { .. }) => TermKind::Callable,
            Some(_) => TermKind::Value,
            None if self.evaluator.values().contains_key(name) => TermKind::Value,
            None => TermKind::Unknown,
        }
    }

    fn call(&self, name: &str, args: &[Value]) -> Result<Value, EvalError> {
        let Some(ParameterDefinition::Function { arguments, expression }) =
            self.evaluator.parameters().get(name)
        else {
            return Err(EvalError::UnknownTerm(name.to_string()));
        };

        if arguments.len() != args.len() {
            return Err(EvalError::Arity {
                term: name.to_string(),
                expected: arguments.len(),
                received: args.len(),
            });
        }

        let bound: HashMap<String, Value> = arguments
            .iter()
            .cloned()
            .zip(args.iter().cloned())
            .collect();

        self.evaluator.evaluate_function(name, expression, bound)
    }
}

/// Resolution rule for inputs: stored value, else default, else a
/// type-appropriate empty value where one exists.
fn resolve_input(
    name: &str,
    input: &InputDefinition,
    values: &Values,
) -> Result<Value, EvalError> {
    let stored = values.get(name).filter(|v| !v.is_empty_marker());
    let chosen = stored.cloned().or_else(|| input.default.clone());

    let Some(value) = chosen else {
        return match input.kind {
            InputKind::Text { .. } => Ok(Value::Text(String::new())),
            _ => Err(EvalError::MissingDefault(name.to_string())),
        };
    };

    if input.is_numeric() {
        let n = value.as_number().ok_or_else(|| EvalError::NotNumeric {
            term: name.to_string(),
            value: value.to_string(),
        })?;
        let clamped = match &input.kind {
            InputKind::Number { range: Some(range) } => range.clamp(n),
            InputKind::Random { range: Some(range), .. } => range.clamp(n),
            _ => n,
        };
        return Ok(Value::Number(clamped));
    }

    Ok(value)
}
