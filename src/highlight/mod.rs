//! Syntax highlighting styles
//!
//! This module provides:
//! - The token tag taxonomy grammars emit
//! - Highlight style tables mapping tags to text styles
//! - Resolution of tagged tokens into styled spans

mod style;
mod tags;

pub use style::{default_highlight_style, HighlightRule, HighlightStyle, Span, TokenStyle};
pub use tags::{Modifier, Tag, TagKind};

/// A token produced by a grammar, before styling
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenSpan {
    /// Byte offset where this token starts (inclusive)
    pub start: usize,
    /// Byte offset where this token ends (exclusive)
    pub end: usize,
    pub tag: Tag,
}

impl TokenSpan {
    pub fn new(start: usize, end: usize, tag: Tag) -> Self {
        Self { start, end, tag }
    }
}

/// Style tokens with a stack of highlighters.
///
/// Later highlighters are layered over earlier ones. Tokens no highlighter
/// styles are dropped.
pub fn style_tokens(tokens: &[TokenSpan], highlighters: &[&HighlightStyle]) -> Vec<Span> {
    tokens
        .iter()
        .filter_map(|token| {
            let style = highlighters
                .iter()
                .filter_map(|h| h.style_for(token.tag))
                .reduce(TokenStyle::merge)?;
            Some(Span::new(token.start, token.end, style))
        })
        .collect()
}
