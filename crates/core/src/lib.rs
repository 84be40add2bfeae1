//! calcdown core: parameterised calculation documents.
//!
//! A template mixes markdown text, math regions and references to a
//! typed parameter graph (constants, interactive inputs, derived
//! calculations, reusable functions). This crate segments the template,
//! resolves every reference through the graph, and re-assembles HTML
//! through external markdown and math-typesetting services. The
//! expression grammar itself is supplied from outside through the
//! [`ExpressionBackend`] boundary.

pub mod eval;
pub mod params;
pub mod session;
pub mod template;

pub use eval::{EvalError, Evaluator, ExpressionBackend, TermKind, TermScope};
pub use params::{
    Dimension, DisplayOptions, InputDefinition, InputKind, NumberRange, ParameterDefinition,
    Parameters, RandomRange, RandomRangeKind, RangeBound, Value, Values, format_value,
};
pub use session::Session;
pub use template::{
    Delimiters, MacroTable, MathError, MathOptions, MathRenderer, Region, SegmentError,
    TemplateError, TextSpan, extract_variables, render_template,
};

pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
