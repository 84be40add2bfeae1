//! The typed parameter graph consumed by the rest of the crate.

pub mod definition;
pub mod value;

pub use definition::{
    Dimension, InputDefinition, InputKind, NumberRange, ParameterDefinition, Parameters,
    RandomRange, RandomRangeKind, RangeBound, Values,
};
pub use value::{DisplayOptions, Value, format_value};
