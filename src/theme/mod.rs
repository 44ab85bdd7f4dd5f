//! Editor theme
//!
//! A theme is one palette expanded into two stylesheets: the chrome style
//! for editor surfaces and the token style for syntax coloring. Both are
//! derived from the same color roles so they stay consistent.

mod chrome;
mod colors;
mod palette;
mod syntax;

use std::sync::Arc;

use once_cell::sync::Lazy;

pub use chrome::{
    build_chrome_style, ChromeRule, ChromeSelector, ChromeStyle, Declaration, StyleValue,
};
pub use colors::Color;
pub use palette::{ColorRole, Palette};
pub use syntax::build_token_style;

use crate::error::Result;
use crate::highlight::HighlightStyle;

static DRACULA: Lazy<Arc<Theme>> = Lazy::new(|| {
    Arc::new(compose(&Palette::dracula()).expect("dracula palette defines every color role"))
});

/// A composed theme, attached to editors as a single unit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    pub name: String,
    pub dark: bool,
    pub chrome: ChromeStyle,
    pub highlight: HighlightStyle,
}

impl Theme {
    /// The shared Dracula theme.
    ///
    /// Built on first use and never mutated afterwards; every call returns a
    /// handle to the same value.
    pub fn dracula() -> Arc<Theme> {
        Arc::clone(&DRACULA)
    }

    /// Editor background
    pub fn background(&self) -> Option<Color> {
        self.chrome.color(ChromeSelector::Root, "background-color")
    }

    /// Default text color
    pub fn foreground(&self) -> Option<Color> {
        self.chrome.color(ChromeSelector::Root, "color")
    }
}

/// Combine chrome and token styles for a palette
pub fn compose(palette: &Palette) -> Result<Theme> {
    Ok(Theme {
        name: palette.name.clone(),
        dark: palette.dark,
        chrome: build_chrome_style(palette)?,
        highlight: build_token_style(palette)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dracula_is_shared() {
        let a = Theme::dracula();
        let b = Theme::dracula();
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(a.name, "dracula");
        assert!(a.dark);
    }

    #[test]
    fn compose_is_deterministic() {
        let palette = Palette::dracula();
        assert_eq!(compose(&palette).unwrap(), compose(&palette).unwrap());
    }

    #[test]
    fn chrome_and_tokens_agree_on_foreground() {
        use crate::highlight::{Tag, TagKind};

        let theme = Theme::dracula();
        let variable = theme
            .highlight
            .style_for(Tag::new(TagKind::VariableName))
            .and_then(|s| s.color);
        assert_eq!(variable, theme.foreground());
    }

    #[test]
    fn compose_rejects_partial_palette() {
        let mut palette = Palette::dracula();
        palette.remove(ColorRole::Cursor);
        assert!(compose(&palette).is_err());
    }
}
