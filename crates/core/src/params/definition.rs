//! Parameter graph definitions.
//!
//! A document's parameter model is a flat mapping of names to typed
//! definitions. Four closed variants exist: constants, interactive
//! inputs, derived calculations and reusable functions. Everything else
//! in the crate consumes this model through exhaustive matching; there is
//! no field probing.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::value::Value;

/// The parameter model: name -> definition. Names are unique, insertion
/// order carries no meaning.
pub type Parameters = HashMap<String, ParameterDefinition>;

/// Currently chosen values for `input` parameters only. Constants,
/// calculations and functions never appear here.
pub type Values = HashMap<String, Value>;

/// One named entry of the parameter model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ParameterDefinition {
    /// An immutable literal value.
    Constant { value: Value },

    /// A derived value: the expression is evaluated against the model at
    /// render time. Must not reference itself through other calculations.
    Calculation { expression: String },

    /// A named, parameterised expression. Invoking it binds positional
    /// arguments to the declared names for one evaluation, then discards
    /// them.
    Function {
        arguments: Vec<String>,
        expression: String,
    },

    /// A value the end user supplies interactively.
    Input(InputDefinition),
}

impl ParameterDefinition {
    /// Inputs render as interactive anchors rather than values.
    #[must_use]
    pub fn is_interactive(&self) -> bool {
        matches!(self, ParameterDefinition::Input(_))
    }

    /// Functions are callable only; they have no value of their own.
    #[must_use]
    pub fn is_callable(&self) -> bool {
        matches!(self, ParameterDefinition::Function { .. })
    }
}

/// Common shape of all interactive inputs plus the subtype payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputDefinition {
    #[serde(flatten)]
    pub kind: InputKind,

    /// Widget width: pixels or a CSS length. Widget-layer data.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<Dimension>,

    /// Widget height in pixels. Widget-layer data.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,

    /// Fallback used when no value has been stored for the input.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
}

impl InputDefinition {
    #[must_use]
    pub fn is_text(&self) -> bool {
        matches!(self.kind, InputKind::Text { .. })
    }

    #[must_use]
    pub fn is_number(&self) -> bool {
        matches!(self.kind, InputKind::Number { .. })
    }

    #[must_use]
    pub fn is_choice(&self) -> bool {
        matches!(self.kind, InputKind::Choice { .. })
    }

    #[must_use]
    pub fn is_random(&self) -> bool {
        matches!(self.kind, InputKind::Random { .. })
    }

    /// Whether stored values must be coerced to numbers before use.
    ///
    /// Number inputs always are. Random inputs are numeric when they draw
    /// from a numeric range, or from a values list containing only
    /// numbers. Choice values are author-typed and pass through as-is.
    #[must_use]
    pub fn is_numeric(&self) -> bool {
        match &self.kind {
            InputKind::Number { .. } => true,
            InputKind::Random { range, values } => {
                range.is_some()
                    || values
                        .as_ref()
                        .is_some_and(|vs| !vs.is_empty() && vs.iter().all(|v| matches!(v, Value::Number(_))))
            }
            InputKind::Text { .. } | InputKind::Choice { .. } => false,
        }
    }

    /// The declared numeric range, if the subtype carries one.
    #[must_use]
    pub fn numeric_range(&self) -> Option<(f64, f64)> {
        match &self.kind {
            InputKind::Number { range } => range.as_ref().map(|r| (r.min.value, r.max.value)),
            InputKind::Random { range, .. } => range.as_ref().map(|r| (r.min.value, r.max.value)),
            InputKind::Text { .. } | InputKind::Choice { .. } => None,
        }
    }
}

/// The closed set of input subtypes, discriminated by `inputType`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "inputType", rename_all = "lowercase")]
pub enum InputKind {
    /// Free text, optionally length-limited.
    Text {
        #[serde(default, rename = "maxLength", skip_serializing_if = "Option::is_none")]
        max_length: Option<u32>,
    },

    /// A number, optionally clamped into a range.
    Number {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        range: Option<NumberRange>,
    },

    /// One of a fixed list of author-supplied values.
    Choice { values: Vec<Value> },

    /// A randomisable value drawn from a range or a values list by the
    /// widget layer.
    Random {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        range: Option<RandomRange>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        values: Option<Vec<Value>>,
    },
}

/// Widget width: `100` (pixels) or `"100%"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Dimension {
    Pixels(f64),
    Css(String),
}

/// Inclusive numeric bounds for number inputs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NumberRange {
    pub min: RangeBound,
    pub max: RangeBound,
}

impl NumberRange {
    /// Clamp into `[min.value, max.value]`.
    #[must_use]
    pub fn clamp(&self, n: f64) -> f64 {
        clamp(n, self.min.value, self.max.value)
    }
}

/// Bounds for random inputs; `type` selects integer or float sampling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RandomRange {
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<RandomRangeKind>,
    pub min: RangeBound,
    pub max: RangeBound,
}

impl RandomRange {
    /// Clamp into `[min.value, max.value]`.
    #[must_use]
    pub fn clamp(&self, n: f64) -> f64 {
        clamp(n, self.min.value, self.max.value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RandomRangeKind {
    Integer,
    Float,
}

/// One bound of a range. `inclusive` only matters for integer sampling
/// (max defaults to exclusive, min to inclusive); clamping always uses
/// the bound value itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RangeBound {
    pub value: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inclusive: Option<bool>,
}

fn clamp(n: f64, min: f64, max: f64) -> f64 {
    if n < min {
        min
    } else if n > max {
        max
    } else {
        n
    }
}
