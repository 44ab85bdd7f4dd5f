//! Chrome stylesheet: styling for the non-text surfaces of the editor
//! (root, caret, selection, gutters, panels, tooltips).

use std::fmt::{self, Write};

use super::palette::{ColorRole, Palette};
use super::Color;
use crate::error::Result;

/// A non-text surface of the editor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChromeSelector {
    Root,
    Scroller,
    Content,
    Cursor,
    Selection,
    PanelsAll,
    PanelsTop,
    PanelsBottom,
    SearchMatch,
    SearchMatchSelected,
    ActiveLine,
    SelectionMatch,
    Bracket,
    Gutters,
    ActiveLineGutter,
    FoldPlaceholder,
    Tooltip,
    TooltipArrowBefore,
    TooltipArrowAfter,
    AutocompleteSelected,
}

impl ChromeSelector {
    /// CSS selector, with `&` standing for the editor root
    pub fn css(&self) -> &'static str {
        match self {
            ChromeSelector::Root => "&",
            ChromeSelector::Scroller => ".cm-scroller",
            ChromeSelector::Content => ".cm-content",
            ChromeSelector::Cursor => ".cm-cursor, .cm-dropCursor",
            ChromeSelector::Selection => {
                "&.cm-focused .cm-selectionBackground, .cm-selectionBackground, .cm-content ::selection"
            }
            ChromeSelector::PanelsAll => ".cm-panels",
            ChromeSelector::PanelsTop => ".cm-panels.cm-panels-top",
            ChromeSelector::PanelsBottom => ".cm-panels.cm-panels-bottom",
            ChromeSelector::SearchMatch => ".cm-searchMatch",
            ChromeSelector::SearchMatchSelected => ".cm-searchMatch.cm-searchMatch-selected",
            ChromeSelector::ActiveLine => ".cm-activeLine",
            ChromeSelector::SelectionMatch => ".cm-selectionMatch",
            ChromeSelector::Bracket => {
                "&.cm-focused .cm-matchingBracket, &.cm-focused .cm-nonmatchingBracket"
            }
            ChromeSelector::Gutters => ".cm-gutters",
            ChromeSelector::ActiveLineGutter => ".cm-activeLineGutter",
            ChromeSelector::FoldPlaceholder => ".cm-foldPlaceholder",
            ChromeSelector::Tooltip => ".cm-tooltip",
            ChromeSelector::TooltipArrowBefore => ".cm-tooltip .cm-tooltip-arrow:before",
            ChromeSelector::TooltipArrowAfter => ".cm-tooltip .cm-tooltip-arrow:after",
            ChromeSelector::AutocompleteSelected => {
                ".cm-tooltip-autocomplete > ul > li[aria-selected]"
            }
        }
    }
}

/// Value of a single declaration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StyleValue {
    Color(Color),
    /// A color that wins over engine defaults
    Important(Color),
    /// Border or outline shorthand, e.g. `1px solid #191a21`
    Line { px: u8, style: &'static str, color: Color },
    Keyword(&'static str),
}

impl StyleValue {
    /// The color carried by this value, if any
    pub fn color(&self) -> Option<Color> {
        match self {
            StyleValue::Color(c) | StyleValue::Important(c) => Some(*c),
            StyleValue::Line { color, .. } => Some(*color),
            StyleValue::Keyword(_) => None,
        }
    }
}

impl fmt::Display for StyleValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StyleValue::Color(c) => write!(f, "{c}"),
            StyleValue::Important(c) => write!(f, "{c} !important"),
            StyleValue::Line { px, style, color } => write!(f, "{px}px {style} {color}"),
            StyleValue::Keyword(k) => f.write_str(k),
        }
    }
}

/// A CSS property and its value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Declaration {
    pub property: &'static str,
    pub value: StyleValue,
}

/// One selector with its declarations
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChromeRule {
    pub selector: ChromeSelector,
    pub declarations: Vec<Declaration>,
}

/// Ordered chrome stylesheet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChromeStyle {
    pub dark: bool,
    pub rules: Vec<ChromeRule>,
}

impl ChromeStyle {
    /// Value of a property on a surface; later rules win
    pub fn lookup(&self, selector: ChromeSelector, property: &str) -> Option<StyleValue> {
        self.rules
            .iter()
            .filter(|rule| rule.selector == selector)
            .flat_map(|rule| rule.declarations.iter())
            .filter(|decl| decl.property == property)
            .last()
            .map(|decl| decl.value)
    }

    /// Color of a property on a surface
    pub fn color(&self, selector: ChromeSelector, property: &str) -> Option<Color> {
        self.lookup(selector, property).and_then(|v| v.color())
    }

    /// Render as a stylesheet scoped under `scope` (a class name without the dot)
    pub fn to_css(&self, scope: &str) -> String {
        let root = format!(".{scope}");
        let mut css = String::new();

        for rule in &self.rules {
            let selector = rule
                .selector
                .css()
                .split(", ")
                .map(|part| match part.strip_prefix('&') {
                    Some(rest) => format!("{root}{rest}"),
                    None => format!("{root} {part}"),
                })
                .collect::<Vec<_>>()
                .join(", ");

            let _ = writeln!(css, "{selector} {{");
            for decl in &rule.declarations {
                let _ = writeln!(css, "  {}: {};", decl.property, decl.value);
            }
            css.push_str("}\n");
        }

        css
    }
}

/// Shorthand for building rule lists
fn rule(selector: ChromeSelector, declarations: &[(&'static str, StyleValue)]) -> ChromeRule {
    ChromeRule {
        selector,
        declarations: declarations
            .iter()
            .map(|&(property, value)| Declaration { property, value })
            .collect(),
    }
}

/// Build the chrome stylesheet from a palette
pub fn build_chrome_style(palette: &Palette) -> Result<ChromeStyle> {
    use ChromeSelector as S;
    use StyleValue::{Color as C, Important, Keyword as K, Line};

    let background = palette.color(ColorRole::Background)?;
    let foreground = palette.color(ColorRole::Foreground)?;
    let cursor = palette.color(ColorRole::Cursor)?;
    let selection = palette.color(ColorRole::Selection)?;
    let selection_match = palette.color(ColorRole::SelectionMatch)?;
    let dropdown_bg = palette.color(ColorRole::DropdownBackground)?;
    let dropdown_border = palette.color(ColorRole::DropdownBorder)?;
    let active_line = palette.color(ColorRole::ActiveLine)?;
    let matching_bracket = palette.color(ColorRole::MatchingBracket)?;
    let active_line_border = Color::rgb(0x44, 0x47, 0x5a);

    let rules = vec![
        rule(
            S::Root,
            &[
                ("color", C(foreground)),
                ("background-color", C(background)),
                ("height", K("100%")),
                ("width", K("100%")),
            ],
        ),
        rule(S::Scroller, &[("overflow", K("auto"))]),
        rule(S::Content, &[("caret-color", C(cursor))]),
        rule(S::Cursor, &[("border-left-color", C(cursor))]),
        rule(S::Selection, &[("background-color", Important(selection))]),
        rule(
            S::PanelsAll,
            &[("background-color", C(dropdown_bg)), ("color", C(foreground))],
        ),
        rule(
            S::PanelsTop,
            &[("border-bottom", Line { px: 2, style: "solid", color: Color::BLACK })],
        ),
        rule(
            S::PanelsBottom,
            &[("border-top", Line { px: 2, style: "solid", color: Color::BLACK })],
        ),
        rule(
            S::SearchMatch,
            &[
                ("background-color", C(dropdown_bg)),
                ("outline", Line { px: 1, style: "solid", color: dropdown_border }),
            ],
        ),
        rule(S::SearchMatchSelected, &[("background-color", C(selection_match))]),
        rule(
            S::ActiveLine,
            &[
                ("background-color", C(active_line)),
                ("border", Line { px: 1, style: "dotted", color: active_line_border }),
            ],
        ),
        rule(S::SelectionMatch, &[("background-color", C(selection_match))]),
        rule(
            S::Bracket,
            &[("background-color", C(matching_bracket)), ("outline", K("none"))],
        ),
        rule(
            S::Gutters,
            &[
                ("background-color", C(background)),
                ("color", C(foreground)),
                ("border", K("none")),
            ],
        ),
        rule(S::ActiveLineGutter, &[("background-color", C(background))]),
        rule(
            S::FoldPlaceholder,
            &[
                ("background-color", K("transparent")),
                ("border", K("none")),
                ("color", C(foreground)),
            ],
        ),
        rule(
            S::Tooltip,
            &[
                ("border", Line { px: 1, style: "solid", color: dropdown_border }),
                ("background-color", C(dropdown_bg)),
                ("color", C(foreground)),
            ],
        ),
        rule(
            S::TooltipArrowBefore,
            &[
                ("border-top-color", K("transparent")),
                ("border-bottom-color", K("transparent")),
            ],
        ),
        rule(
            S::TooltipArrowAfter,
            &[
                ("border-top-color", C(foreground)),
                ("border-bottom-color", C(foreground)),
            ],
        ),
        rule(
            S::AutocompleteSelected,
            &[("background", C(selection)), ("color", C(foreground))],
        ),
    ];

    Ok(ChromeStyle {
        dark: palette.dark,
        rules,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dracula() -> ChromeStyle {
        build_chrome_style(&Palette::dracula()).unwrap()
    }

    #[test]
    fn root_surface_uses_palette() {
        let style = dracula();
        assert_eq!(
            style.color(ChromeSelector::Root, "background-color"),
            Color::from_hex("#282A36")
        );
        assert_eq!(style.color(ChromeSelector::Root, "color"), Color::from_hex("#F8F8F2"));
        assert_eq!(style.color(ChromeSelector::Content, "caret-color"), Color::from_hex("#F8F8F2"));
        assert!(style.dark);
    }

    #[test]
    fn selection_is_forced_and_match_is_distinct() {
        let style = dracula();
        let selection = style.lookup(ChromeSelector::Selection, "background-color").unwrap();
        assert!(matches!(selection, StyleValue::Important(_)));

        let matched = style.color(ChromeSelector::SelectionMatch, "background-color").unwrap();
        assert_ne!(selection.color().unwrap(), matched);
        assert_eq!(matched.a, 0x44);
    }

    #[test]
    fn gutters_are_not_hidden() {
        let style = dracula();
        assert!(style.lookup(ChromeSelector::Gutters, "display").is_none());
        assert!(style.color(ChromeSelector::Gutters, "background-color").is_some());
    }

    #[test]
    fn missing_role_fails() {
        let mut palette = Palette::dracula();
        palette.remove(ColorRole::DropdownBorder);
        assert!(build_chrome_style(&palette).is_err());
    }

    #[test]
    fn css_is_scoped() {
        let css = dracula().to_css("ed-1");
        assert!(css.contains(".ed-1 {\n  color: #f8f8f2;"));
        assert!(css.contains(".ed-1.cm-focused .cm-selectionBackground"));
        assert!(css.contains(".ed-1 .cm-content ::selection"));
        assert!(css.contains("background-color: #ef4146 !important;"));
        assert!(css.contains("outline: 1px solid #191a21;"));
    }
}
