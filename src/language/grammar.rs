//! Grammar definitions for syntax highlighting
//!
//! A [`Grammar`] combines pattern rules and multiline rules for one
//! language and turns lines of text into tagged tokens.

use super::rules::{LineState, LineTokens, MultilineRule, PatternRule};
use crate::highlight::TokenSpan;

/// A complete grammar for one language
pub struct Grammar {
    /// Grammar name (e.g., "Python")
    pub name: String,
    /// File extensions (e.g., ["py", "pyw"])
    pub extensions: Vec<String>,
    /// Pattern rules, highest priority first
    pub patterns: Vec<PatternRule>,
    /// Rules whose matches may span lines
    pub multiline_rules: Vec<MultilineRule>,
}

impl Grammar {
    /// Create a new empty grammar
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            extensions: Vec::new(),
            patterns: Vec::new(),
            multiline_rules: Vec::new(),
        }
    }

    pub fn add_extension(&mut self, ext: &str) {
        self.extensions.push(ext.to_string());
    }

    /// Add a pattern rule (None is skipped, so builders can pass constructors straight in)
    pub fn add_pattern(&mut self, rule: Option<PatternRule>) {
        if let Some(rule) = rule {
            self.patterns.push(rule);
            // Stable sort keeps insertion order among equal priorities
            self.patterns.sort_by(|a, b| b.priority.cmp(&a.priority));
        }
    }

    /// Add a multiline rule; invalid rules are skipped
    pub fn add_multiline(&mut self, rule: Option<MultilineRule>) {
        if let Some(rule) = rule {
            self.multiline_rules.push(rule);
        }
    }

    /// The multiline rule owning a state id
    fn get_multiline_rule(&self, state_id: u8) -> Option<&MultilineRule> {
        self.multiline_rules.iter().find(|r| r.state_id == state_id)
    }

    /// Earliest multiline start at or after `pos`; the first rule wins ties
    fn next_multiline(&self, text: &str, pos: usize) -> Option<(usize, usize, &MultilineRule)> {
        let mut best: Option<(usize, usize, &MultilineRule)> = None;
        for rule in &self.multiline_rules {
            if let Some((start, end)) = rule.find_start(text, pos) {
                if best.map_or(true, |(s, _, _)| start < s) {
                    best = Some((start, end, rule));
                }
            }
        }
        best
    }

    /// Earliest pattern match at or after `pos`; the highest priority wins ties
    fn next_pattern(&self, text: &str, pos: usize) -> Option<(usize, &PatternRule)> {
        let mut best: Option<(usize, &PatternRule)> = None;
        for rule in &self.patterns {
            if let Some((start, _)) = rule.find_at(text, pos) {
                if best.map_or(true, |(s, _)| start < s) {
                    best = Some((start, rule));
                }
                if start == pos {
                    break;
                }
            }
        }
        best
    }

    /// Tokenize a single line of text
    ///
    /// `prev_state` is the state the previous line ended in.
    /// Returns tokens and the state for the next line.
    pub fn highlight_line(&self, text: &str, prev_state: LineState) -> LineTokens {
        let mut tokens = Vec::new();
        let mut pos = 0;

        // Finish a construct carried over from the previous line
        if prev_state.is_inside_multiline() {
            if let Some(rule) = self.get_multiline_rule(prev_state.multiline_id) {
                match rule.find_end(text, 0) {
                    Some(end) => {
                        if end > 0 {
                            tokens.push(TokenSpan::new(0, end, rule.tag));
                        }
                        pos = end;
                    }
                    None => {
                        if !text.is_empty() {
                            tokens.push(TokenSpan::new(0, text.len(), rule.tag));
                        }
                        return LineTokens {
                            tokens,
                            end_state: prev_state,
                        };
                    }
                }
            }
        }

        while pos < text.len() {
            let multiline = self.next_multiline(text, pos);
            let pattern = self.next_pattern(text, pos);

            // Multiline constructs win ties with patterns
            let take_multiline = match (&multiline, &pattern) {
                (Some((ms, _, _)), Some((ps, _))) => ms <= ps,
                (Some(_), None) => true,
                (None, _) => false,
            };

            if take_multiline {
                let Some((start, open_end, rule)) = multiline else {
                    break;
                };
                match rule.find_end(text, open_end) {
                    Some(close) => {
                        tokens.push(TokenSpan::new(start, close, rule.tag));
                        pos = close.max(start + 1);
                    }
                    None => {
                        tokens.push(TokenSpan::new(start, text.len(), rule.tag));
                        return LineTokens {
                            tokens,
                            end_state: LineState::inside(rule.state_id),
                        };
                    }
                }
                continue;
            }

            let Some((start, rule)) = pattern else {
                break;
            };
            match rule.tokens_at(text, start) {
                Some((found, resume)) => {
                    tokens.extend(found.into_iter().filter(|t| t.end > t.start));
                    pos = resume.max(start + 1);
                }
                None => pos = start + 1,
            }
            while pos < text.len() && !text.is_char_boundary(pos) {
                pos += 1;
            }
        }

        LineTokens {
            tokens,
            end_state: LineState::default(),
        }
    }

    /// Tokenize a run of lines from the normal state
    pub fn highlight_lines<'a>(
        &self,
        lines: impl IntoIterator<Item = &'a str>,
    ) -> Vec<Vec<TokenSpan>> {
        let mut state = LineState::default();
        lines
            .into_iter()
            .map(|line| {
                let result = self.highlight_line(line, state);
                state = result.end_state;
                result.tokens
            })
            .collect()
    }
}
