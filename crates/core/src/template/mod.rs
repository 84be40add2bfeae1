//! Template segmentation, substitution and rendering.

pub mod engine;
pub mod extractor;
pub mod markdown;
pub mod math;
pub mod segmenter;

pub use engine::{RenderContext, TemplateError, render_template, render_variable};
pub use extractor::{extract_variables, extract_variables_with};
pub use markdown::render_markdown;
pub use math::{MacroTable, MathError, MathOptions, MathRenderer};
pub use segmenter::{Delimiters, Region, SegmentError, TextSpan, segment};
