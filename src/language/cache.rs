//! Per-editor token cache
//!
//! Tokens are computed line by line, carrying multiline state forward.
//! Edits invalidate from the first touched line; everything before it is
//! reused.

use super::grammar::Grammar;
use super::rules::LineState;
use crate::highlight::TokenSpan;

/// Cached tokens and line states for one document
#[derive(Debug, Default)]
pub struct HighlightCache {
    /// State at the end of each line
    line_states: Vec<LineState>,
    /// Tokens per line
    line_tokens: Vec<Vec<TokenSpan>>,
    /// First line that needs recomputation
    invalid_from: usize,
}

impl HighlightCache {
    /// Create a new empty cache
    pub fn new() -> Self {
        Self::default()
    }

    /// Invalidate cache from a specific line onwards
    pub fn invalidate_from(&mut self, line: usize) {
        self.invalid_from = self.invalid_from.min(line);
    }

    /// First line that will be recomputed on the next refresh
    pub fn invalid_from(&self) -> usize {
        self.invalid_from
    }

    /// Bring the cache up to date with `lines` and return tokens per line
    pub fn refresh<'a, I>(&mut self, grammar: &Grammar, lines: I) -> &[Vec<TokenSpan>]
    where
        I: IntoIterator<Item = &'a str>,
    {
        let lines: Vec<&str> = lines.into_iter().collect();
        let start = self.invalid_from.min(lines.len()).min(self.line_tokens.len());

        self.line_states.truncate(start);
        self.line_tokens.truncate(start);

        let mut state = start
            .checked_sub(1)
            .and_then(|prev| self.line_states.get(prev).copied())
            .unwrap_or_default();

        for text in &lines[start..] {
            let result = grammar.highlight_line(text, state);
            state = result.end_state;
            self.line_states.push(result.end_state);
            self.line_tokens.push(result.tokens);
        }

        self.invalid_from = usize::MAX;
        &self.line_tokens
    }
}
