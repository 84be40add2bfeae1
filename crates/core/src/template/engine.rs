//! Template rendering: placeholder substitution, macro expansion and
//! region re-assembly.
//!
//! Text regions get `${name}` placeholders substituted and then go
//! through the Markdown boundary; math regions get `\eval{name}` /
//! `\evalb{name}` macros expanded and then go through the typesetter.
//! Regions re-join in their original order. A failure in any region
//! fails the whole render; there is no partial output.

use regex::Regex;
use thiserror::Error;
use tracing::debug;

use crate::eval::{EvalError, Evaluator};
use crate::params::{DisplayOptions, ParameterDefinition, format_value};

use super::markdown::render_markdown;
use super::math::{MacroTable, MathError, MathOptions, MathRenderer, fix_align_environments};
use super::segmenter::{Delimiters, Region, SegmentError, TextSpan, segment};

/// Placeholder syntax in plain text: `${name}`.
pub(crate) const PLACEHOLDER_PATTERN: &str = r"\$\{([^}]+)\}";

/// Macro syntax in math regions: `\eval{name}` and `\evalb{name}`.
pub(crate) const MACRO_PATTERN: &str = r"\\(evalb|eval)\{([^}]*)\}";

#[derive(Debug, Error)]
pub enum TemplateError {
    #[error(transparent)]
    Segment(#[from] SegmentError),

    /// The template references a parameter the model does not declare.
    #[error("parameter `{0}` is not defined")]
    UnknownParameter(String),

    #[error(transparent)]
    Math(#[from] MathError),

    #[error(transparent)]
    Eval(#[from] EvalError),

    #[error("invalid placeholder pattern: {0}")]
    Pattern(String),
}

/// Everything one rendering pass consults. Constructed by the session,
/// borrowed by every rendering function, discarded with the pass.
pub struct RenderContext<'a> {
    pub evaluator: &'a Evaluator<'a>,
    pub math: &'a dyn MathRenderer,
    pub macros: &'a MacroTable,
    pub options: &'a DisplayOptions,
    pub delimiters: &'a Delimiters,
}

/// Render the full template to HTML: segment, substitute, typeset, join.
pub fn render_template(template: &str, ctx: &RenderContext<'_>) -> Result<String, TemplateError> {
    let regions = segment(template, ctx.delimiters)?;
    debug!(regions = regions.len(), "rendering template");

    let mut rendered = Vec::with_capacity(regions.len());
    for region in &regions {
        match region {
            Region::Text(spans) => rendered.push(render_text_region(spans, ctx)?),
            Region::BlockMath(math) => {
                rendered.push(format!("<p>{}</p>", render_math(math, true, ctx)?));
            }
        }
    }
    Ok(rendered.join("\n"))
}

/// Substitute placeholders in every plain span, typeset every inline
/// span, then hand the joined region to the Markdown boundary.
fn render_text_region(spans: &[TextSpan], ctx: &RenderContext<'_>) -> Result<String, TemplateError> {
    let mut out = String::new();
    for span in spans {
        match span {
            TextSpan::Plain(text) => out.push_str(&substitute_placeholders(text, ctx)?),
            TextSpan::InlineMath(math) => out.push_str(&render_math(math, false, ctx)?),
        }
    }
    Ok(render_markdown(&out))
}

fn substitute_placeholders(text: &str, ctx: &RenderContext<'_>) -> Result<String, TemplateError> {
    let re = Regex::new(PLACEHOLDER_PATTERN).map_err(|e| TemplateError::Pattern(e.to_string()))?;

    let mut out = String::with_capacity(text.len());
    let mut last = 0;
    for caps in re.captures_iter(text) {
        let Some(whole) = caps.get(0) else { continue };
        out.push_str(&text[last..whole.start()]);
        out.push_str(&render_variable(&caps[1], ctx)?);
        last = whole.end();
    }
    out.push_str(&text[last..]);
    Ok(out)
}

/// The substitution rule for `${name}`: constants and calculations
/// render to their evaluated text, inputs and functions to an anchor the
/// widget layer binds onto later.
pub fn render_variable(name: &str, ctx: &RenderContext<'_>) -> Result<String, TemplateError> {
    match rendered_form(name, ctx)? {
        RenderedForm::Text(text) => Ok(text),
        RenderedForm::Anchor => Ok(format!("<a href=\"#eval-{name}\">{name}</a>")),
    }
}

enum RenderedForm {
    Text(String),
    Anchor,
}

fn rendered_form(name: &str, ctx: &RenderContext<'_>) -> Result<RenderedForm, TemplateError> {
    let Some(parameter) = ctx.evaluator.parameters().get(name) else {
        return Err(TemplateError::UnknownParameter(name.to_string()));
    };
    match parameter {
        ParameterDefinition::Constant { .. } | ParameterDefinition::Calculation { .. } => {
            let value = ctx.evaluator.evaluate_term(name)?;
            Ok(RenderedForm::Text(format_value(&value, ctx.options)))
        }
        ParameterDefinition::Input(_) | ParameterDefinition::Function { .. } => {
            Ok(RenderedForm::Anchor)
        }
    }
}

/// Expand parameter macros, fix up environments, and hand the math text
/// to the typesetter together with the static macro table.
fn render_math(
    math: &str,
    display_mode: bool,
    ctx: &RenderContext<'_>,
) -> Result<String, TemplateError> {
    let expanded = expand_math_macros(math, ctx)?;
    let fixed = fix_align_environments(&expanded);
    let options = MathOptions { macros: ctx.macros, display_mode, trust: true };
    Ok(ctx.math.render_to_string(&fixed, &options)?)
}

/// `\eval{name}` follows the substitution rule with a math-safe anchor;
/// `\evalb{name}` leaves a data marker for the widget layer.
fn expand_math_macros(math: &str, ctx: &RenderContext<'_>) -> Result<String, TemplateError> {
    let re = Regex::new(MACRO_PATTERN).map_err(|e| TemplateError::Pattern(e.to_string()))?;

    let mut out = String::with_capacity(math.len());
    let mut last = 0;
    for caps in re.captures_iter(math) {
        let Some(whole) = caps.get(0) else { continue };
        let name = &caps[2];
        out.push_str(&math[last..whole.start()]);
        match &caps[1] {
            "evalb" => {
                out.push_str(&format!("\\htmlData{{type=var, name={name}}}{{{name}}}"));
            }
            _ => match rendered_form(name, ctx)? {
                RenderedForm::Text(text) => out.push_str(&text),
                RenderedForm::Anchor => {
                    out.push_str(&format!("\\href{{#eval-{name}}}{{{name}}}"));
                }
            },
        }
        last = whole.end();
    }
    out.push_str(&math[last..]);
    Ok(out)
}
