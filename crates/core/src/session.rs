//! Request-scoped wiring for one render pass.

use crate::eval::{EvalError, Evaluator, ExpressionBackend};
use crate::params::{DisplayOptions, Parameters, Values};
use crate::template::engine::{RenderContext, TemplateError, render_template};
use crate::template::extractor::extract_variables_with;
use crate::template::math::{MacroTable, MathRenderer};
use crate::template::segmenter::Delimiters;

/// Everything one render pass needs, constructed fresh per request and
/// discarded afterwards. Two sessions over different snapshots share
/// nothing and may run in parallel.
///
/// The expression backend is attached separately so a session can serve
/// extraction before any evaluator exists; rendering or evaluating
/// without one is a sequencing error, reported, never a panic.
pub struct Session<'a> {
    parameters: &'a Parameters,
    values: &'a Values,
    math: &'a dyn MathRenderer,
    backend: Option<&'a dyn ExpressionBackend>,
    macros: MacroTable,
    options: DisplayOptions,
    delimiters: Delimiters,
}

impl<'a> Session<'a> {
    pub fn new(
        parameters: &'a Parameters,
        values: &'a Values,
        math: &'a dyn MathRenderer,
    ) -> Self {
        Self {
            parameters,
            values,
            math,
            backend: None,
            macros: MacroTable::new(),
            options: DisplayOptions::default(),
            delimiters: Delimiters::default(),
        }
    }

    /// Attach the expression evaluator used for calculations and
    /// functions. Required before [`render_template`](Self::render_template)
    /// or [`evaluate`](Self::evaluate).
    #[must_use]
    pub fn with_backend(mut self, backend: &'a dyn ExpressionBackend) -> Self {
        self.backend = Some(backend);
        self
    }

    /// Static macros forwarded to the typesetter alongside each math
    /// region.
    #[must_use]
    pub fn with_macros(mut self, macros: MacroTable) -> Self {
        self.macros = macros;
        self
    }

    /// Display labels for null/NaN/undefined results.
    #[must_use]
    pub fn with_options(mut self, options: DisplayOptions) -> Self {
        self.options = options;
        self
    }

    /// Custom math fences.
    #[must_use]
    pub fn with_delimiters(mut self, delimiters: Delimiters) -> Self {
        self.delimiters = delimiters;
        self
    }

    /// Render the template to HTML.
    pub fn render_template(&self, template: &str) -> Result<String, TemplateError> {
        let backend = self.backend.ok_or(EvalError::Uninitialised)?;
        let evaluator = Evaluator::new(self.parameters, self.values, backend);
        let ctx = RenderContext {
            evaluator: &evaluator,
            math: self.math,
            macros: &self.macros,
            options: &self.options,
            delimiters: &self.delimiters,
        };
        render_template(template, &ctx)
    }

    /// Rendered text form of a single parameter, as used for in-code
    /// evaluation and by the widget layer.
    pub fn evaluate(&self, name: &str) -> Result<String, EvalError> {
        let backend = self.backend.ok_or(EvalError::Uninitialised)?;
        let evaluator = Evaluator::new(self.parameters, self.values, backend);
        evaluator.render_term(name, &self.options)
    }

    /// Parameter names referenced anywhere in the template. Works
    /// without a backend.
    pub fn extract_variables(&self, template: &str) -> Result<Vec<String>, TemplateError> {
        extract_variables_with(template, &self.delimiters)
    }
}
