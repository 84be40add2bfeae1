//! Math markup for client-side typesetting.
//!
//! `cdoc` does not typeset math itself; it emits the expanded math
//! source wrapped the way KaTeX's auto-render extension expects, and the
//! page does the rest. Static macros are prepended as `\newcommand`
//! definitions so they travel with the math they belong to.

use calcdown_core::{MathError, MathOptions, MathRenderer};

pub struct KatexMarkup;

impl MathRenderer for KatexMarkup {
    fn render_to_string(
        &self,
        math: &str,
        options: &MathOptions<'_>,
    ) -> Result<String, MathError> {
        let mut source = String::new();

        // Deterministic output regardless of table order.
        let mut macros: Vec<_> = options.macros.iter().collect();
        macros.sort();
        for (name, body) in macros {
            source.push_str(&format!("\\newcommand{{{name}}}{{{body}}}"));
        }
        source.push_str(math);

        let escaped = escape_html(&source);
        if options.display_mode {
            Ok(format!("<span class=\"math display\">\\[{escaped}\\]</span>"))
        } else {
            Ok(format!("<span class=\"math inline\">\\({escaped}\\)</span>"))
        }
    }
}

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}
