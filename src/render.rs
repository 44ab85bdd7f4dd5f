//! Terminal preview
//!
//! Paints a view's visible lines with truecolor escape sequences: the
//! themed gutter, syntax colors, fold placeholders and invisible-character
//! placeholders. Long lines wrap at a fixed column when the view wraps.

use std::io::Write;

use crossterm::queue;
use crossterm::style::{
    Attribute, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor,
};
use unicode_width::UnicodeWidthChar;

use crate::decorations::{Decorations, FOLD_PLACEHOLDER};
use crate::error::Result;
use crate::highlight::{Span, TokenStyle};
use crate::theme::{ChromeSelector, Color, Theme};
use crate::view::EditorView;

/// Colors the preview takes from the theme chrome
#[derive(Debug, Clone, Copy)]
struct Chrome {
    background: Option<Color>,
    foreground: Option<Color>,
    gutter: Option<Color>,
    active_gutter: Option<Color>,
    placeholder: Option<Color>,
}

impl Chrome {
    fn from_theme(theme: Option<&Theme>) -> Self {
        let Some(theme) = theme else {
            return Self {
                background: None,
                foreground: None,
                gutter: None,
                active_gutter: None,
                placeholder: None,
            };
        };
        let background = theme.background();
        let solid = |c: Color| match background {
            Some(bg) => c.over(bg),
            None => c,
        };
        let get = |selector, property| theme.chrome.color(selector, property).map(solid);
        Self {
            background,
            foreground: theme.foreground(),
            gutter: get(ChromeSelector::Gutters, "color"),
            active_gutter: get(ChromeSelector::ActiveLineGutter, "background-color"),
            placeholder: get(ChromeSelector::FoldPlaceholder, "color"),
        }
    }
}

/// Renders an editor view to a terminal stream
#[derive(Debug, Clone)]
pub struct Preview {
    wrap_column: usize,
}

impl Preview {
    pub fn new(wrap_column: usize) -> Self {
        Self {
            wrap_column: wrap_column.max(1),
        }
    }

    /// Write every visible line of `view` to `out`
    pub fn render<W: Write>(&self, view: &EditorView, out: &mut W) -> Result<()> {
        let chrome = Chrome::from_theme(view.theme().map(|t| t.as_ref()));
        let decorations = view.decorations();
        let wrap = view.line_wrapping().then_some(self.wrap_column);

        let label_width = decorations
            .line_numbers
            .as_ref()
            .and_then(|labels| labels.iter().map(|l| l.label.len()).max())
            .unwrap_or(0);
        let fold_column = !decorations.fold_markers.is_empty() || !decorations.folds.is_empty();

        for line in view.visible_lines() {
            let gutter = Gutter {
                line,
                label_width,
                fold_column,
            };
            gutter.render(&decorations, &chrome, out, false)?;

            let text = view.document().line(line).map(|l| l.text()).unwrap_or("");
            let start = view.document().line_start(line);
            let spans = decorations.syntax.get(line).map(Vec::as_slice).unwrap_or(&[]);

            let mut current: Option<TokenStyle> = None;
            let mut col = 0;
            for (offset, ch) in text.char_indices() {
                let shown = decorations
                    .special_chars
                    .iter()
                    .find(|s| s.offset == start + offset)
                    .map_or(ch, |s| s.placeholder);
                let width = UnicodeWidthChar::width(shown).unwrap_or(1);
                if let Some(limit) = wrap {
                    if col > 0 && col + width > limit {
                        queue!(out, ResetColor, SetAttribute(Attribute::Reset), Print("\r\n"))?;
                        gutter.render(&decorations, &chrome, out, true)?;
                        current = None;
                        col = 0;
                    }
                }
                let style = style_at(spans, offset);
                if current != Some(style) {
                    apply_style(out, &style, &chrome)?;
                    current = Some(style);
                }
                queue!(out, Print(shown))?;
                col += width;
            }

            if decorations.folds.iter().any(|f| f.start_line == line) {
                queue!(out, SetAttribute(Attribute::Reset))?;
                set_colors(out, chrome.placeholder.or(chrome.foreground), chrome.background)?;
                queue!(out, Print(' '), Print(FOLD_PLACEHOLDER))?;
            }
            queue!(out, ResetColor, SetAttribute(Attribute::Reset), Print("\r\n"))?;
        }
        out.flush()?;
        Ok(())
    }
}

/// Line-number and fold-marker columns for one line
struct Gutter {
    line: usize,
    label_width: usize,
    fold_column: bool,
}

impl Gutter {
    fn render<W: Write>(
        &self,
        decorations: &Decorations,
        chrome: &Chrome,
        out: &mut W,
        continuation: bool,
    ) -> Result<()> {
        let Some(labels) = decorations.line_numbers.as_ref() else {
            return self.render_fold_marker(decorations, chrome, out, continuation);
        };
        let active = decorations.active_gutter_lines.contains(&self.line);
        let background = if active {
            chrome.active_gutter.or(chrome.background)
        } else {
            chrome.background
        };
        set_colors(out, chrome.gutter, background)?;
        let label = match labels.iter().find(|l| l.line == self.line) {
            Some(l) if !continuation => l.label.as_str(),
            _ => "",
        };
        queue!(out, Print(format!("{:>width$} ", label, width = self.label_width)))?;
        self.render_fold_marker(decorations, chrome, out, continuation)
    }

    fn render_fold_marker<W: Write>(
        &self,
        decorations: &Decorations,
        chrome: &Chrome,
        out: &mut W,
        continuation: bool,
    ) -> Result<()> {
        if !self.fold_column {
            return Ok(());
        }
        set_colors(out, chrome.gutter, chrome.background)?;
        let marker = decorations
            .fold_markers
            .iter()
            .find(|(line, _)| *line == self.line && !continuation)
            .map_or(' ', |(_, marker)| marker.symbol());
        queue!(out, Print(marker), Print(' '))?;
        Ok(())
    }
}

/// Style of the span covering a byte offset, or the default style
fn style_at(spans: &[Span], offset: usize) -> TokenStyle {
    spans
        .iter()
        .find(|s| s.contains(offset))
        .map(|s| s.style)
        .unwrap_or_default()
}

fn set_colors<W: Write>(out: &mut W, fg: Option<Color>, bg: Option<Color>) -> Result<()> {
    if let Some(fg) = fg {
        queue!(out, SetForegroundColor(fg.to_crossterm()))?;
    }
    if let Some(bg) = bg {
        queue!(out, SetBackgroundColor(bg.to_crossterm()))?;
    }
    Ok(())
}

fn apply_style<W: Write>(out: &mut W, style: &TokenStyle, chrome: &Chrome) -> Result<()> {
    queue!(out, SetAttribute(Attribute::Reset))?;
    set_colors(out, style.color.or(chrome.foreground), chrome.background)?;
    if style.bold {
        queue!(out, SetAttribute(Attribute::Bold))?;
    }
    if style.italic {
        queue!(out, SetAttribute(Attribute::Italic))?;
    }
    if style.underline {
        queue!(out, SetAttribute(Attribute::Underlined))?;
    }
    if style.strikethrough {
        queue!(out, SetAttribute(Attribute::CrossedOut))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::factory::{create_rich_editor, EditorOptions};
    use crate::mount::MountTarget;

    fn render(text: &str, options: EditorOptions, wrap: usize) -> String {
        let mount = MountTarget::new();
        let view = create_rich_editor(&mount, text, options).unwrap();
        let mut out = Vec::new();
        Preview::new(wrap).render(&view, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    /// Drop escape sequences, keeping printed text
    fn plain(rendered: &str) -> String {
        let mut text = String::new();
        let mut chars = rendered.chars();
        while let Some(ch) = chars.next() {
            if ch == '\u{1b}' {
                for c in chars.by_ref() {
                    if c.is_ascii_alphabetic() {
                        break;
                    }
                }
            } else if ch != '\r' {
                text.push(ch);
            }
        }
        text
    }

    #[test]
    fn test_line_numbers_in_gutter() {
        let out = plain(&render("a\nb", EditorOptions::new().show_line_numbers(true), 80));
        let lines: Vec<&str> = out.lines().collect();
        assert!(lines[0].starts_with("1 "));
        assert!(lines[0].ends_with('a'));
        assert!(lines[1].starts_with("2 "));
    }

    #[test]
    fn test_no_line_numbers() {
        let out = plain(&render("a\nb", EditorOptions::new(), 80));
        assert_eq!(out, "a\nb\n");
    }

    #[test]
    fn test_wraps_long_lines() {
        let out = plain(&render("abcdefghijkl", EditorOptions::new(), 5));
        assert_eq!(out, "abcde\nfghij\nkl\n");
    }

    #[test]
    fn test_uses_truecolor() {
        let out = render("x", EditorOptions::new(), 80);
        // Dracula background #282a36
        assert!(out.contains("48;2;40;42;54"));
    }

    #[test]
    fn test_special_char_placeholder() {
        let out = plain(&render("a\u{200b}b", EditorOptions::new(), 80));
        assert_eq!(out, "a\u{2022}b\n");
    }
}
