//! Two-level template segmentation.
//!
//! A template is first partitioned on the block-math fence, then each
//! text chunk is partitioned again on the inline-math fence. The result
//! is lossless apart from the fence tokens themselves; an unterminated
//! fence is an error, never a silent pass-through.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SegmentError {
    /// A math fence was opened but never closed.
    #[error("unterminated math region: no closing `{0}`")]
    UnbalancedDelimiter(String),
}

/// Fence tokens around math regions. The defaults are `$$ … $$` for
/// block math and `\( … \)` for inline math.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Delimiters {
    pub block_open: String,
    pub block_close: String,
    pub inline_open: String,
    pub inline_close: String,
}

impl Default for Delimiters {
    fn default() -> Self {
        Self {
            block_open: "$$".to_string(),
            block_close: "$$".to_string(),
            inline_open: r"\(".to_string(),
            inline_close: r"\)".to_string(),
        }
    }
}

/// Top-level partition of a template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Region {
    Text(Vec<TextSpan>),
    BlockMath(String),
}

/// Second-level partition of a text region.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TextSpan {
    Plain(String),
    InlineMath(String),
}

/// Partition `template` into alternating text and block-math regions,
/// splitting each text region into plain and inline-math spans.
pub fn segment(template: &str, delimiters: &Delimiters) -> Result<Vec<Region>, SegmentError> {
    let chunks = split_fenced(template, &delimiters.block_open, &delimiters.block_close)?;

    let mut regions = Vec::with_capacity(chunks.len());
    for (i, chunk) in chunks.into_iter().enumerate() {
        if i % 2 == 0 {
            regions.push(Region::Text(segment_text(&chunk, delimiters)?));
        } else {
            regions.push(Region::BlockMath(chunk));
        }
    }
    Ok(regions)
}

fn segment_text(text: &str, delimiters: &Delimiters) -> Result<Vec<TextSpan>, SegmentError> {
    let chunks = split_fenced(text, &delimiters.inline_open, &delimiters.inline_close)?;
    Ok(chunks
        .into_iter()
        .enumerate()
        .map(|(i, chunk)| {
            if i % 2 == 0 {
                TextSpan::Plain(chunk)
            } else {
                TextSpan::InlineMath(chunk)
            }
        })
        .collect())
}

/// Split on an open/close token pair. Returns an odd-length list
/// alternating outside/inside chunks; a dangling open token is an error.
fn split_fenced(text: &str, open: &str, close: &str) -> Result<Vec<String>, SegmentError> {
    let mut chunks = Vec::new();
    let mut rest = text;

    loop {
        match rest.find(open) {
            None => {
                chunks.push(rest.to_string());
                return Ok(chunks);
            }
            Some(start) => {
                chunks.push(rest[..start].to_string());
                let after = &rest[start + open.len()..];
                let Some(end) = after.find(close) else {
                    return Err(SegmentError::UnbalancedDelimiter(close.to_string()));
                };
                chunks.push(after[..end].to_string());
                rest = &after[end + close.len()..];
            }
        }
    }
}
