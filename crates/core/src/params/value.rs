//! Runtime values and their textual rendering.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// A value flowing through the parameter graph: a constant's literal, an
/// input's chosen value, or the result of evaluating an expression.
///
/// The untagged representation matches what authors write in parameter
/// files: plain YAML/JSON scalars, sequences and mappings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Null,
    Bool(bool),
    Number(f64),
    Text(String),
    List(Vec<Value>),
    Map(BTreeMap<String, Value>),
    /// No value at all. Never written by authors; an evaluation that
    /// legitimately yields nothing produces this.
    Empty,
}

impl Value {
    /// Numeric view of the value, if one exists.
    ///
    /// Text is parsed, since interactive widgets hand values back as
    /// strings. Everything else has no numeric reading.
    #[must_use]
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            Value::Text(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_empty_marker(&self) -> bool {
        matches!(self, Value::Empty)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

/// Canonical text form: text verbatim, numbers in shortest form without a
/// trailing `.0`, lists and maps as JSON. Used for error messages and as
/// the base of [`format_value`].
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("null"),
            Value::Empty => Ok(()),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Number(n) => f.write_str(&format_number(*n)),
            Value::Text(s) => f.write_str(s),
            other => f.write_str(&serde_json::to_string(other).unwrap_or_default()),
        }
    }
}

/// Display labels for values that have no natural textual form.
///
/// Consulted only by the rendering functions, never mutated by them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DisplayOptions {
    pub null_label: String,
    pub nan_label: String,
    pub undefined_label: String,
}

impl Default for DisplayOptions {
    fn default() -> Self {
        Self {
            null_label: "Null".to_string(),
            nan_label: "NaN".to_string(),
            undefined_label: "Undefined".to_string(),
        }
    }
}

/// Render a value the way it appears in a substituted document.
#[must_use]
pub fn format_value(value: &Value, options: &DisplayOptions) -> String {
    match value {
        Value::Null => options.null_label.clone(),
        Value::Empty => options.undefined_label.clone(),
        Value::Number(n) if n.is_nan() => options.nan_label.clone(),
        other => other.to_string(),
    }
}

fn format_number(n: f64) -> String {
    if n.is_infinite() {
        return if n > 0.0 { "Infinity".to_string() } else { "-Infinity".to_string() };
    }
    if n == n.trunc() && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        format!("{n}")
    }
}
