//! Markdown boundary (comrak).

use comrak::{Options, markdown_to_html};

/// comrak options for rendered documents.
///
/// GFM extensions on, raw HTML passthrough on: substituted anchors and
/// typeset math arrive as embedded HTML and must survive the conversion.
fn default_options() -> Options<'static> {
    let mut options = Options::default();
    options.extension.strikethrough = true;
    options.extension.table = true;
    options.extension.autolink = true;
    options.extension.tasklist = true;
    options.extension.footnotes = true;
    options.extension.description_lists = true;

    options.parse.smart = false;

    options.render.hardbreaks = false;
    options.render.github_pre_lang = true;
    options.render.unsafe_ = true;

    options
}

/// Convert one substituted text region to HTML.
pub fn render_markdown(text: &str) -> String {
    markdown_to_html(text, &default_options())
}
