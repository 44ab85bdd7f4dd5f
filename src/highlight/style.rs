//! Token styles and highlight style tables
//!
//! A [`HighlightStyle`] maps token tags to [`TokenStyle`]s. Grammar spans
//! carry tags; resolving them through a highlight style yields styled
//! [`Span`]s for a renderer.

use super::tags::{Tag, TagKind};
use crate::theme::Color;

/// Text style attributes for a token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TokenStyle {
    /// Foreground color (None = inherit)
    pub color: Option<Color>,
    /// Bold text
    pub bold: bool,
    /// Italic text
    pub italic: bool,
    /// Underlined text
    pub underline: bool,
    /// Struck-through text
    pub strikethrough: bool,
}

impl TokenStyle {
    /// Create a style with just a foreground color
    pub fn fg(color: Color) -> Self {
        Self {
            color: Some(color),
            ..Default::default()
        }
    }

    /// Builder: set bold
    pub fn with_bold(mut self) -> Self {
        self.bold = true;
        self
    }

    /// Builder: set italic
    pub fn with_italic(mut self) -> Self {
        self.italic = true;
        self
    }

    /// Builder: set underline
    pub fn with_underline(mut self) -> Self {
        self.underline = true;
        self
    }

    /// Builder: set strikethrough
    pub fn with_strikethrough(mut self) -> Self {
        self.strikethrough = true;
        self
    }

    /// Layer `other` on top of this style
    pub fn merge(self, other: TokenStyle) -> Self {
        Self {
            color: other.color.or(self.color),
            bold: self.bold || other.bold,
            italic: self.italic || other.italic,
            underline: self.underline || other.underline,
            strikethrough: self.strikethrough || other.strikethrough,
        }
    }
}

/// One entry of a highlight style: every tag in `tags` gets `style`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HighlightRule {
    pub tags: Vec<Tag>,
    pub style: TokenStyle,
}

/// Ordered table of highlight rules
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HighlightStyle {
    pub rules: Vec<HighlightRule>,
}

impl HighlightStyle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: add a rule
    pub fn rule(mut self, tags: impl IntoIterator<Item = Tag>, style: TokenStyle) -> Self {
        self.rules.push(HighlightRule {
            tags: tags.into_iter().collect(),
            style,
        });
        self
    }

    /// Style for a tag as written, merging every rule that lists it
    fn exact(&self, tag: Tag) -> Option<TokenStyle> {
        self.rules
            .iter()
            .filter(|rule| rule.tags.contains(&tag))
            .map(|rule| rule.style)
            .reduce(TokenStyle::merge)
    }

    /// Resolve a tag, walking its fallback chain.
    ///
    /// Returns `None` when nothing on the chain is styled; the token then
    /// renders with the editor's default text style.
    pub fn style_for(&self, tag: Tag) -> Option<TokenStyle> {
        tag.fallbacks().into_iter().find_map(|candidate| self.exact(candidate))
    }
}

/// A styled span of text within a line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    /// Byte offset where this span starts (inclusive)
    pub start: usize,
    /// Byte offset where this span ends (exclusive)
    pub end: usize,
    /// Style to apply to this span
    pub style: TokenStyle,
}

impl Span {
    /// Create a new span
    pub fn new(start: usize, end: usize, style: TokenStyle) -> Self {
        Self { start, end, style }
    }

    /// Check if this span contains a byte position
    pub fn contains(&self, pos: usize) -> bool {
        pos >= self.start && pos < self.end
    }

    /// Get the length of this span in bytes
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// Check if span is empty
    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }
}

/// Light-background style used when no theme highlighter is configured
pub fn default_highlight_style() -> HighlightStyle {
    let hex = |s: &str| Color::from_hex(s).unwrap_or(Color::BLACK);

    HighlightStyle::new()
        .rule([Tag::new(TagKind::Meta)], TokenStyle::fg(hex("#404740")))
        .rule([Tag::new(TagKind::Link)], TokenStyle::default().with_underline())
        .rule(
            [Tag::new(TagKind::Heading)],
            TokenStyle::default().with_bold().with_underline(),
        )
        .rule([Tag::new(TagKind::Emphasis)], TokenStyle::default().with_italic())
        .rule([Tag::new(TagKind::Strong)], TokenStyle::default().with_bold())
        .rule(
            [Tag::new(TagKind::Strikethrough)],
            TokenStyle::default().with_strikethrough(),
        )
        .rule([Tag::new(TagKind::Keyword)], TokenStyle::fg(hex("#770088")))
        .rule(
            [
                Tag::new(TagKind::Atom),
                Tag::new(TagKind::Bool),
                Tag::new(TagKind::Url),
                Tag::new(TagKind::ContentSeparator),
                Tag::new(TagKind::LabelName),
            ],
            TokenStyle::fg(hex("#221199")),
        )
        .rule(
            [Tag::new(TagKind::Literal), Tag::new(TagKind::Inserted)],
            TokenStyle::fg(hex("#116644")),
        )
        .rule(
            [Tag::new(TagKind::String), Tag::new(TagKind::Deleted)],
            TokenStyle::fg(hex("#aa1111")),
        )
        .rule(
            [
                Tag::new(TagKind::Regexp),
                Tag::new(TagKind::Escape),
                Tag::special(TagKind::String),
            ],
            TokenStyle::fg(hex("#ee4400")),
        )
        .rule(
            [Tag::definition(TagKind::VariableName)],
            TokenStyle::fg(hex("#0000ff")),
        )
        .rule([Tag::local(TagKind::VariableName)], TokenStyle::fg(hex("#3300aa")))
        .rule(
            [Tag::new(TagKind::TypeName), Tag::new(TagKind::Namespace)],
            TokenStyle::fg(hex("#008855")),
        )
        .rule([Tag::new(TagKind::ClassName)], TokenStyle::fg(hex("#116677")))
        .rule(
            [
                Tag::special(TagKind::VariableName),
                Tag::new(TagKind::MacroName),
            ],
            TokenStyle::fg(hex("#225566")),
        )
        .rule(
            [Tag::definition(TagKind::PropertyName)],
            TokenStyle::fg(hex("#0000cc")),
        )
        .rule([Tag::new(TagKind::Comment)], TokenStyle::fg(hex("#994400")))
        .rule([Tag::new(TagKind::Invalid)], TokenStyle::fg(hex("#ff0000")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merge_layers_attributes() {
        let base = TokenStyle::fg(Color::rgb(1, 1, 1)).with_bold();
        let top = TokenStyle::default().with_underline();
        let merged = base.merge(top);
        assert_eq!(merged.color, Some(Color::rgb(1, 1, 1)));
        assert!(merged.bold && merged.underline);
    }

    #[test]
    fn rules_listing_same_tag_merge() {
        let style = HighlightStyle::new()
            .rule([Tag::new(TagKind::Link)], TokenStyle::fg(Color::rgb(9, 9, 9)))
            .rule([Tag::new(TagKind::Link)], TokenStyle::default().with_underline());

        let link = style.style_for(Tag::new(TagKind::Link)).unwrap();
        assert_eq!(link.color, Some(Color::rgb(9, 9, 9)));
        assert!(link.underline);
    }

    #[test]
    fn unstyled_family_resolves_to_none() {
        let style = HighlightStyle::new()
            .rule([Tag::new(TagKind::Keyword)], TokenStyle::fg(Color::rgb(1, 0, 0)));
        assert!(style.style_for(Tag::new(TagKind::Paren)).is_none());
        assert!(style.style_for(Tag::new(TagKind::ControlKeyword)).is_some());
    }

    #[test]
    fn default_style_covers_core_kinds() {
        let style = default_highlight_style();
        for kind in [TagKind::Keyword, TagKind::String, TagKind::Comment, TagKind::Number] {
            assert!(style.style_for(Tag::new(kind)).is_some(), "{kind:?}");
        }
    }

    #[test]
    fn span_contains() {
        let span = Span::new(5, 10, TokenStyle::default());
        assert!(!span.contains(4));
        assert!(span.contains(5));
        assert!(!span.contains(10));
        assert_eq!(span.len(), 5);
    }
}
