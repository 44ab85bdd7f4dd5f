//! Language support
//!
//! This module provides the grammar machinery and the fixed set of
//! supported languages:
//! - Pattern and multiline rules
//! - Grammars that turn lines into tagged tokens
//! - A per-editor token cache
//! - Language metadata used by folding and indent-on-input

mod builtin;
mod cache;
mod grammar;
mod rules;

use std::fmt;

use once_cell::sync::Lazy;

pub use cache::HighlightCache;
pub use grammar::Grammar;
pub use rules::{LineState, LineTokens, MultilineRule, PatternRule};

static PYTHON: Lazy<Grammar> = Lazy::new(builtin::python_grammar);
static JAVASCRIPT: Lazy<Grammar> = Lazy::new(builtin::javascript_grammar);
static MARKDOWN: Lazy<Grammar> = Lazy::new(builtin::markdown_grammar);

/// How foldable ranges are found
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FoldStrategy {
    /// A line folds the following lines indented deeper than it
    Indentation,
    /// A heading folds everything up to the next heading of the same or higher level
    Headings,
}

/// A supported language
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Language {
    Python,
    JavaScript,
    #[default]
    Markdown,
}

impl Language {
    pub const ALL: [Language; 3] = [Language::Python, Language::JavaScript, Language::Markdown];

    /// Parse a language name (case-insensitive, common aliases accepted)
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "python" | "py" => Some(Language::Python),
            "javascript" | "js" => Some(Language::JavaScript),
            "markdown" | "md" => Some(Language::Markdown),
            _ => None,
        }
    }

    /// Resolve an optional name, falling back to Markdown
    pub fn resolve(name: Option<&str>) -> Self {
        name.and_then(Self::from_name).unwrap_or_default()
    }

    /// Detect a language from a file extension
    pub fn from_extension(ext: &str) -> Option<Self> {
        let ext = ext.to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|lang| lang.grammar().extensions.iter().any(|e| *e == ext))
    }

    pub fn name(&self) -> &'static str {
        match self {
            Language::Python => "python",
            Language::JavaScript => "javascript",
            Language::Markdown => "markdown",
        }
    }

    /// The shared grammar for this language
    pub fn grammar(&self) -> &'static Grammar {
        match self {
            Language::Python => &PYTHON,
            Language::JavaScript => &JAVASCRIPT,
            Language::Markdown => &MARKDOWN,
        }
    }

    pub fn fold_strategy(&self) -> FoldStrategy {
        match self {
            Language::Python | Language::JavaScript => FoldStrategy::Indentation,
            Language::Markdown => FoldStrategy::Headings,
        }
    }

    /// Keywords that dedent their line when the closing `:` is typed
    pub fn dedent_keywords(&self) -> &'static [&'static str] {
        match self {
            Language::Python => &["else", "elif", "except", "finally"],
            Language::JavaScript | Language::Markdown => &[],
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_name() {
        assert_eq!(Language::from_name("python"), Some(Language::Python));
        assert_eq!(Language::from_name("JS"), Some(Language::JavaScript));
        assert_eq!(Language::from_name(" markdown "), Some(Language::Markdown));
        assert_eq!(Language::from_name("cobol"), None);
    }

    #[test]
    fn test_resolve_falls_back_to_markdown() {
        assert_eq!(Language::resolve(None), Language::Markdown);
        assert_eq!(Language::resolve(Some("rust")), Language::Markdown);
        assert_eq!(Language::resolve(Some("javascript")), Language::JavaScript);
    }

    #[test]
    fn test_from_extension() {
        assert_eq!(Language::from_extension("py"), Some(Language::Python));
        assert_eq!(Language::from_extension("MJS"), Some(Language::JavaScript));
        assert_eq!(Language::from_extension("md"), Some(Language::Markdown));
        assert_eq!(Language::from_extension("rs"), None);
    }

    #[test]
    fn test_grammars_are_shared() {
        let a = Language::Python.grammar() as *const Grammar;
        let b = Language::Python.grammar() as *const Grammar;
        assert_eq!(a, b);
        assert_eq!(Language::JavaScript.grammar().name, "JavaScript");
    }
}
