//! Editor extensions
//!
//! An editor is configured by a flat list of independent extensions.
//! Bundles nest; resolving a list flattens it, drops repeated behaviors
//! (first occurrence wins) and checks that exactly one language is present.

use std::fmt;
use std::sync::Arc;

use crate::error::{EditorError, Result};
use crate::highlight::{default_highlight_style, HighlightStyle};
use crate::language::Language;
use crate::theme::Theme;
use crate::view::ViewUpdate;

/// Indentation unit width used when none is configured
pub const DEFAULT_INDENT_UNIT: usize = 4;

/// Which key binding set a keymap extension installs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Keymap {
    /// Cursor motion, deletion, newline, select-all, plus the bindings of
    /// history, folding and bracket matching when those are active
    Standard,
    /// Tab indents, Shift-Tab dedents
    IndentWithTab,
}

/// Callback run after every dispatched transaction
pub struct UpdateListener(Box<dyn FnMut(&ViewUpdate<'_>)>);

impl UpdateListener {
    pub fn new(f: impl FnMut(&ViewUpdate<'_>) + 'static) -> Self {
        Self(Box::new(f))
    }

    pub(crate) fn call(&mut self, update: &ViewUpdate<'_>) {
        (self.0)(update)
    }
}

impl fmt::Debug for UpdateListener {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("UpdateListener(..)")
    }
}

/// One unit of editor configuration
#[derive(Debug)]
pub enum Extension {
    /// A group of extensions, flattened on resolution
    Bundle(Vec<Extension>),
    Keymap(Keymap),
    AllowMultipleSelections,
    HighlightActiveLine,
    HighlightSelectionMatches,
    LineWrapping,
    History,
    BracketMatching,
    FoldGutter,
    IndentOnInput,
    /// A token highlighter. Fallback highlighters apply only when no
    /// regular highlighter is configured.
    SyntaxHighlighting {
        style: Arc<HighlightStyle>,
        fallback: bool,
    },
    HighlightActiveLineGutter,
    HighlightSpecialChars,
    DropCursor,
    RectangularSelection,
    CrosshairCursor,
    IndentUnit(usize),
    UpdateListener(UpdateListener),
    Language(Language),
    LineNumbers,
    Theme(Arc<Theme>),
}

/// Identity of an extension, used for deduplication and queries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExtensionKind {
    Keymap(Keymap),
    AllowMultipleSelections,
    HighlightActiveLine,
    HighlightSelectionMatches,
    LineWrapping,
    History,
    BracketMatching,
    FoldGutter,
    IndentOnInput,
    SyntaxHighlighting,
    HighlightActiveLineGutter,
    HighlightSpecialChars,
    DropCursor,
    RectangularSelection,
    CrosshairCursor,
    IndentUnit,
    UpdateListener,
    Language(Language),
    LineNumbers,
    Theme,
}

impl ExtensionKind {
    /// Kinds that may appear more than once after resolution
    fn is_repeatable(&self) -> bool {
        matches!(self, ExtensionKind::SyntaxHighlighting | ExtensionKind::UpdateListener)
    }

    /// Kinds compared without their payload when deduplicating
    fn slot(&self) -> ExtensionKind {
        match self {
            ExtensionKind::Language(_) => ExtensionKind::Language(Language::default()),
            other => *other,
        }
    }
}

impl Extension {
    /// The baseline: standard keymap, multiple selections, active line and
    /// selection-match highlighting
    pub fn basic_setup() -> Self {
        Extension::Bundle(vec![
            Extension::Keymap(Keymap::Standard),
            Extension::AllowMultipleSelections,
            Extension::HighlightActiveLine,
            Extension::HighlightSelectionMatches,
        ])
    }

    /// The default highlight style, used only when nothing else highlights
    pub fn default_highlighting() -> Self {
        Extension::SyntaxHighlighting {
            style: Arc::new(default_highlight_style()),
            fallback: true,
        }
    }

    pub fn update_listener(f: impl FnMut(&ViewUpdate<'_>) + 'static) -> Self {
        Extension::UpdateListener(UpdateListener::new(f))
    }

    /// Kind of this extension; None for bundles
    pub fn kind(&self) -> Option<ExtensionKind> {
        let kind = match self {
            Extension::Bundle(_) => return None,
            Extension::Keymap(k) => ExtensionKind::Keymap(*k),
            Extension::AllowMultipleSelections => ExtensionKind::AllowMultipleSelections,
            Extension::HighlightActiveLine => ExtensionKind::HighlightActiveLine,
            Extension::HighlightSelectionMatches => ExtensionKind::HighlightSelectionMatches,
            Extension::LineWrapping => ExtensionKind::LineWrapping,
            Extension::History => ExtensionKind::History,
            Extension::BracketMatching => ExtensionKind::BracketMatching,
            Extension::FoldGutter => ExtensionKind::FoldGutter,
            Extension::IndentOnInput => ExtensionKind::IndentOnInput,
            Extension::SyntaxHighlighting { .. } => ExtensionKind::SyntaxHighlighting,
            Extension::HighlightActiveLineGutter => ExtensionKind::HighlightActiveLineGutter,
            Extension::HighlightSpecialChars => ExtensionKind::HighlightSpecialChars,
            Extension::DropCursor => ExtensionKind::DropCursor,
            Extension::RectangularSelection => ExtensionKind::RectangularSelection,
            Extension::CrosshairCursor => ExtensionKind::CrosshairCursor,
            Extension::IndentUnit(_) => ExtensionKind::IndentUnit,
            Extension::UpdateListener(_) => ExtensionKind::UpdateListener,
            Extension::Language(lang) => ExtensionKind::Language(*lang),
            Extension::LineNumbers => ExtensionKind::LineNumbers,
            Extension::Theme(_) => ExtensionKind::Theme,
        };
        Some(kind)
    }
}

/// Flatten nested bundles, preserving order
pub fn flatten(extensions: Vec<Extension>) -> Vec<Extension> {
    let mut out = Vec::with_capacity(extensions.len());
    for ext in extensions {
        match ext {
            Extension::Bundle(inner) => out.extend(flatten(inner)),
            other => out.push(other),
        }
    }
    out
}

/// A resolved, validated extension list
#[derive(Debug)]
pub struct ExtensionSet {
    kinds: Vec<ExtensionKind>,
    language: Language,
    theme: Option<Arc<Theme>>,
    highlighters: Vec<(Arc<HighlightStyle>, bool)>,
    indent_unit: usize,
    listeners: Vec<UpdateListener>,
}

impl ExtensionSet {
    /// Flatten, deduplicate and validate an extension list.
    ///
    /// Fails with [`EditorError::Composition`] unless exactly one language
    /// is present.
    pub fn resolve(extensions: Vec<Extension>) -> Result<Self> {
        let flat = flatten(extensions);

        let languages: Vec<Language> = flat
            .iter()
            .filter_map(|ext| match ext {
                Extension::Language(lang) => Some(*lang),
                _ => None,
            })
            .collect();
        match languages.as_slice() {
            [_] => {}
            [] => return Err(EditorError::Composition("no language extension".into())),
            many => {
                let names: Vec<&str> = many.iter().map(Language::name).collect();
                return Err(EditorError::Composition(format!(
                    "expected one language, found {}",
                    names.join(", ")
                )));
            }
        }

        let mut set = Self {
            kinds: Vec::with_capacity(flat.len()),
            language: languages[0],
            theme: None,
            highlighters: Vec::new(),
            indent_unit: DEFAULT_INDENT_UNIT,
            listeners: Vec::new(),
        };

        for ext in flat {
            let Some(kind) = ext.kind() else { continue };
            if !kind.is_repeatable() && set.kinds.iter().any(|k| k.slot() == kind.slot()) {
                continue;
            }
            set.kinds.push(kind);

            match ext {
                Extension::SyntaxHighlighting { style, fallback } => {
                    set.highlighters.push((style, fallback))
                }
                Extension::IndentUnit(width) => set.indent_unit = width.clamp(1, 8),
                Extension::UpdateListener(listener) => set.listeners.push(listener),
                Extension::Theme(theme) => set.theme = Some(theme),
                _ => {}
            }
        }

        Ok(set)
    }

    /// Resolved kinds in order
    pub fn kinds(&self) -> &[ExtensionKind] {
        &self.kinds
    }

    pub fn has(&self, kind: ExtensionKind) -> bool {
        self.kinds.contains(&kind)
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn theme(&self) -> Option<&Arc<Theme>> {
        self.theme.as_ref()
    }

    pub fn indent_unit(&self) -> usize {
        self.indent_unit
    }

    /// Highlighters in effect, in layering order.
    ///
    /// The theme's token style counts as a regular highlighter. Fallback
    /// highlighters are returned only when there is no regular one.
    pub fn highlighters(&self) -> Vec<&HighlightStyle> {
        let mut regular: Vec<&HighlightStyle> = self
            .highlighters
            .iter()
            .filter(|(_, fallback)| !fallback)
            .map(|(style, _)| style.as_ref())
            .collect();
        if let Some(theme) = &self.theme {
            regular.push(&theme.highlight);
        }
        if !regular.is_empty() {
            return regular;
        }
        self.highlighters
            .iter()
            .filter(|(_, fallback)| *fallback)
            .map(|(style, _)| style.as_ref())
            .collect()
    }

    pub(crate) fn take_listeners(&mut self) -> Vec<UpdateListener> {
        std::mem::take(&mut self.listeners)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::highlight::{Tag, TagKind};

    #[test]
    fn test_flatten_nested_bundles() {
        let flat = flatten(vec![
            Extension::Bundle(vec![Extension::History, Extension::Bundle(vec![Extension::DropCursor])]),
            Extension::LineNumbers,
        ]);
        let kinds: Vec<_> = flat.iter().filter_map(Extension::kind).collect();
        assert_eq!(
            kinds,
            vec![ExtensionKind::History, ExtensionKind::DropCursor, ExtensionKind::LineNumbers]
        );
    }

    #[test]
    fn test_language_required() {
        let err = ExtensionSet::resolve(vec![Extension::History]).unwrap_err();
        assert!(matches!(err, EditorError::Composition(_)));
    }

    #[test]
    fn test_two_languages_rejected() {
        let err = ExtensionSet::resolve(vec![
            Extension::Language(Language::Python),
            Extension::Language(Language::JavaScript),
        ])
        .unwrap_err();
        assert!(err.to_string().contains("python, javascript"));
    }

    #[test]
    fn test_first_occurrence_wins() {
        let set = ExtensionSet::resolve(vec![
            Extension::IndentUnit(2),
            Extension::History,
            Extension::Language(Language::Python),
            Extension::History,
            Extension::IndentUnit(8),
        ])
        .unwrap();
        assert_eq!(set.indent_unit(), 2);
        assert_eq!(
            set.kinds(),
            &[ExtensionKind::IndentUnit, ExtensionKind::History, ExtensionKind::Language(Language::Python)]
        );
    }

    #[test]
    fn test_listeners_and_highlighters_repeat() {
        let set = ExtensionSet::resolve(vec![
            Extension::update_listener(|_| {}),
            Extension::update_listener(|_| {}),
            Extension::default_highlighting(),
            Extension::Language(Language::Markdown),
        ])
        .unwrap();
        assert_eq!(set.listeners.len(), 2);
        assert_eq!(set.highlighters().len(), 1);
    }

    #[test]
    fn test_fallback_ignored_when_theme_present() {
        let set = ExtensionSet::resolve(vec![
            Extension::default_highlighting(),
            Extension::Language(Language::Markdown),
            Extension::Theme(Theme::dracula()),
        ])
        .unwrap();
        let highlighters = set.highlighters();
        assert_eq!(highlighters.len(), 1);
        assert_eq!(highlighters[0], &Theme::dracula().highlight);

        let keyword = highlighters[0].style_for(Tag::new(TagKind::Keyword)).unwrap();
        assert_eq!(keyword.color.map(|c| c.to_string()), Some("#ff79c6".to_string()));
    }
}
