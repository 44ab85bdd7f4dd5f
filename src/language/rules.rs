//! Pattern rules for grammars
//!
//! This module defines the rule types used to match and tag
//! source text for syntax highlighting.

use regex::Regex;

use crate::highlight::{Tag, TokenSpan};

/// A regex matched within one line
///
/// Matches a regex pattern and assigns tags to the match. With group tags,
/// only the participating capture groups are tagged and matching resumes
/// after the last group, so trailing context (such as the `(` of a call) is
/// left for other rules.
pub struct PatternRule {
    pub name: String,
    pub pattern: Regex,
    /// Tag for the whole match
    pub tag: Tag,
    /// Tags for capture groups 1..=n, if any
    pub group_tags: Vec<Tag>,
    /// Rules with higher priority are tried first
    pub priority: i32,
}

impl PatternRule {
    /// Compile a rule; `None` if the pattern is invalid
    pub fn new(name: &str, pattern: &str, tag: impl Into<Tag>, priority: i32) -> Option<Self> {
        let tag = tag.into();
        Regex::new(pattern).ok().map(|regex| Self {
            name: name.to_string(),
            pattern: regex,
            tag,
            group_tags: Vec::new(),
            priority,
        })
    }

    /// Create a rule that tags capture groups individually
    pub fn with_groups(
        name: &str,
        pattern: &str,
        group_tags: &[Tag],
        priority: i32,
    ) -> Option<Self> {
        let first = *group_tags.first()?;
        let mut rule = Self::new(name, pattern, first, priority)?;
        if rule.pattern.captures_len() <= group_tags.len() {
            return None;
        }
        rule.group_tags = group_tags.to_vec();
        Some(rule)
    }

    /// Find the first match in text at or after position
    pub fn find_at(&self, text: &str, start: usize) -> Option<(usize, usize)> {
        if start >= text.len() {
            return None;
        }
        self.pattern.find_at(text, start).map(|m| (m.start(), m.end()))
    }

    /// Tokens for a match starting at `start`, and where scanning resumes
    pub fn tokens_at(&self, text: &str, start: usize) -> Option<(Vec<TokenSpan>, usize)> {
        if self.group_tags.is_empty() {
            let (s, e) = self.find_at(text, start)?;
            return Some((vec![TokenSpan::new(s, e, self.tag)], e));
        }

        let caps = self.pattern.captures_at(text, start)?;
        let whole = caps.get(0)?;
        let mut tokens = Vec::new();
        let mut resume = whole.start();
        for (i, tag) in self.group_tags.iter().enumerate() {
            if let Some(group) = caps.get(i + 1) {
                if !group.is_empty() {
                    tokens.push(TokenSpan::new(group.start(), group.end(), *tag));
                }
                resume = resume.max(group.end());
            }
        }
        // Never stall on a match whose groups are all empty
        if resume <= whole.start() {
            resume = whole.end().max(whole.start() + 1);
        }
        Some((tokens, resume))
    }
}

/// A delimited construct that may continue onto later lines, such as a
/// block comment or a triple-quoted string
pub struct MultilineRule {
    pub name: String,
    pub start: Regex,
    pub end: Regex,
    /// Tag for this construct
    pub tag: Tag,
    /// Character that escapes the end delimiter
    pub escape_char: Option<char>,
    /// Nonzero id carried in [`LineState`] while inside the construct
    pub state_id: u8,
}

impl MultilineRule {
    pub fn new(
        name: &str,
        start_pattern: &str,
        end_pattern: &str,
        tag: impl Into<Tag>,
        state_id: u8,
    ) -> Option<Self> {
        let start = Regex::new(start_pattern).ok()?;
        let end = Regex::new(end_pattern).ok()?;
        Some(Self {
            name: name.to_string(),
            start,
            end,
            tag: tag.into(),
            escape_char: None,
            state_id,
        })
    }

    /// Like [`MultilineRule::new`], with an escape character
    pub fn with_escape(
        name: &str,
        start_pattern: &str,
        end_pattern: &str,
        tag: impl Into<Tag>,
        state_id: u8,
        escape_char: char,
    ) -> Option<Self> {
        let mut rule = Self::new(name, start_pattern, end_pattern, tag, state_id)?;
        rule.escape_char = Some(escape_char);
        Some(rule)
    }

    /// First opening delimiter at or after `start`
    pub fn find_start(&self, text: &str, start: usize) -> Option<(usize, usize)> {
        if start >= text.len() {
            return None;
        }
        self.start.find_at(text, start).map(|m| (m.start(), m.end()))
    }

    /// End offset of the first unescaped closing delimiter
    pub fn find_end(&self, text: &str, start: usize) -> Option<usize> {
        if start > text.len() {
            return None;
        }

        let mut pos = start;
        while pos <= text.len() {
            let m = self.end.find_at(text, pos)?;
            let escaped = self.escape_char.is_some_and(|esc| {
                let run = text[start..m.start()]
                    .chars()
                    .rev()
                    .take_while(|&c| c == esc)
                    .count();
                run % 2 == 1
            });
            if !escaped {
                return Some(m.end());
            }
            // Odd number of escapes: skip past this occurrence
            pos = m.end().max(m.start() + 1);
        }
        None
    }
}

/// Highlighter state carried from one line to the next
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LineState {
    /// Id of the open multiline construct, 0 when none
    pub multiline_id: u8,
}

impl LineState {
    pub fn inside(state_id: u8) -> Self {
        Self {
            multiline_id: state_id,
        }
    }

    pub fn is_inside_multiline(&self) -> bool {
        self.multiline_id != 0
    }

    pub fn is_normal(&self) -> bool {
        self.multiline_id == 0
    }
}

/// Result of tokenizing a single line
#[derive(Debug, Clone)]
pub struct LineTokens {
    /// Tagged tokens in this line
    pub tokens: Vec<TokenSpan>,
    /// State handed to the following line
    pub end_state: LineState,
}
