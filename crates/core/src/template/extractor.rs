//! Read-only collection of referenced parameter names.

use std::collections::HashSet;

use regex::Regex;

use super::engine::{MACRO_PATTERN, PLACEHOLDER_PATTERN, TemplateError};
use super::segmenter::{Delimiters, Region, TextSpan, segment};

/// Collect every parameter name a template references, through `${name}`
/// placeholders or `\eval{name}` / `\evalb{name}` macros, across all
/// text and math regions.
///
/// Pure text analysis: needs no parameter model and evaluates nothing.
/// Names come back in first-seen order, deduplicated. Drives the "scan
/// for undeclared parameters" affordance in the editing layer.
pub fn extract_variables(template: &str) -> Result<Vec<String>, TemplateError> {
    extract_variables_with(template, &Delimiters::default())
}

/// [`extract_variables`] with custom math fences.
pub fn extract_variables_with(
    template: &str,
    delimiters: &Delimiters,
) -> Result<Vec<String>, TemplateError> {
    let placeholder =
        Regex::new(PLACEHOLDER_PATTERN).map_err(|e| TemplateError::Pattern(e.to_string()))?;
    let macro_ref =
        Regex::new(MACRO_PATTERN).map_err(|e| TemplateError::Pattern(e.to_string()))?;

    let mut seen = HashSet::new();
    let mut names = Vec::new();

    let mut collect = |re: &Regex, group: usize, text: &str| {
        for caps in re.captures_iter(text) {
            if let Some(name) = caps.get(group) {
                let name = name.as_str().to_string();
                if seen.insert(name.clone()) {
                    names.push(name);
                }
            }
        }
    };

    for region in segment(template, delimiters)? {
        match region {
            Region::Text(spans) => {
                for span in spans {
                    match span {
                        TextSpan::Plain(text) => collect(&placeholder, 1, &text),
                        TextSpan::InlineMath(math) => {
                            collect(&macro_ref, 2, &math);
                            collect(&placeholder, 1, &math);
                        }
                    }
                }
            }
            Region::BlockMath(math) => {
                collect(&macro_ref, 2, &math);
                collect(&placeholder, 1, &math);
            }
        }
    }

    Ok(names)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collects_placeholders_in_order() {
        let names = extract_variables("${b} and ${a} and ${b}").unwrap();
        assert_eq!(names, vec!["b".to_string(), "a".to_string()]);
    }

    #[test]
    fn test_collects_macros_in_math_regions() {
        let names =
            extract_variables(r"value \(\eval{x}\) and $$y = \evalb{y}$$").unwrap();
        assert_eq!(names, vec!["x".to_string(), "y".to_string()]);
    }

    #[test]
    fn test_collects_escaped_placeholders_in_math() {
        // Authors write \${name} inside math so the text pass leaves it
        // alone; the name still counts as referenced.
        let names = extract_variables(r"$$a=\${inputa}$$").unwrap();
        assert_eq!(names, vec!["inputa".to_string()]);
    }

    #[test]
    fn test_requires_no_parameter_model() {
        let names = extract_variables("${ghost}").unwrap();
        assert_eq!(names, vec!["ghost".to_string()]);
    }

    #[test]
    fn test_is_deterministic() {
        let template = r"${a} \(\eval{b}\) ${c}";
        assert_eq!(
            extract_variables(template).unwrap(),
            extract_variables(template).unwrap()
        );
    }

    #[test]
    fn test_unbalanced_template_is_an_error() {
        assert!(extract_variables("broken $$ math").is_err());
    }

    #[test]
    fn test_plain_template_yields_nothing() {
        assert!(extract_variables("no references here").unwrap().is_empty());
    }
}
