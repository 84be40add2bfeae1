//! Math typesetting boundary.
//!
//! The typesetter itself is external. This module defines what it is
//! handed: the math text (after macro expansion), a static macro table,
//! and the display/trust flags.

use std::collections::HashMap;

use thiserror::Error;

/// Static macros forwarded untouched to the typesetter, name to body
/// (e.g. `\RR` -> `\mathbb{R}`). Parameter macros are expanded before
/// the text gets here and never appear in this table.
pub type MacroTable = HashMap<String, String>;

/// Options forwarded to the external typesetter.
#[derive(Debug)]
pub struct MathOptions<'a> {
    pub macros: &'a MacroTable,
    pub display_mode: bool,
    pub trust: bool,
}

/// Structured failure from the typesetter, surfaced as-is.
#[derive(Debug, Error)]
#[error("math markup error: {message}")]
pub struct MathError {
    pub message: String,
}

impl MathError {
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }
}

/// External math typesetting service.
pub trait MathRenderer {
    fn render_to_string(&self, math: &str, options: &MathOptions<'_>) -> Result<String, MathError>;
}

/// KaTeX understands `aligned`, not `align`.
pub(crate) fn fix_align_environments(math: &str) -> String {
    math.replace("\\begin{align}", "\\begin{aligned}")
        .replace("\\end{align}", "\\end{aligned}")
}
