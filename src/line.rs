//! Document lines and display-column arithmetic

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// One line of a document, without its newline
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Line {
    text: String,
}

impl Line {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Length in bytes
    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Whitespace only (or empty)
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }

    /// Byte length of the leading whitespace
    pub fn indent_len(&self) -> usize {
        self.text.len() - self.text.trim_start().len()
    }

    /// Width of the leading whitespace; a tab counts `tab_width` columns
    pub fn indent_columns(&self, tab_width: usize) -> usize {
        self.text
            .chars()
            .take_while(|c| c.is_whitespace())
            .map(|c| if c == '\t' { tab_width } else { 1 })
            .sum()
    }

    /// Byte offset of display column `col`.
    ///
    /// A column inside a wide character resolves to the next character.
    /// `None` when the line is narrower than `col`.
    pub fn col_to_byte(&self, col: usize) -> Option<usize> {
        let mut width = 0;
        for (offset, ch) in self.text.char_indices() {
            if width >= col {
                return Some(offset);
            }
            width += UnicodeWidthChar::width(ch).unwrap_or(1);
        }
        (width >= col).then_some(self.text.len())
    }

    /// Display column of a byte offset
    pub fn byte_to_col(&self, offset: usize) -> usize {
        let end = self.floor_char_boundary(offset);
        self.text[..end].width()
    }

    /// Largest char boundary not after `offset`, clamped to the line
    pub fn floor_char_boundary(&self, offset: usize) -> usize {
        if offset >= self.text.len() {
            return self.text.len();
        }
        (0..=offset)
            .rev()
            .find(|&p| self.text.is_char_boundary(p))
            .unwrap_or(0)
    }
}

impl From<&str> for Line {
    fn from(s: &str) -> Self {
        Self { text: s.to_string() }
    }
}

impl From<String> for Line {
    fn from(text: String) -> Self {
        Self { text }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_columns_with_wide_chars() {
        let line = Line::from("你好ab");
        assert_eq!(line.byte_to_col(6), 4);
        assert_eq!(line.col_to_byte(4), Some(6));
        assert_eq!(line.col_to_byte(5), Some(7));
        assert_eq!(line.col_to_byte(6), Some(8));
        assert_eq!(line.col_to_byte(9), None);
    }

    #[test]
    fn test_column_inside_wide_char() {
        let line = Line::from("你x");
        assert_eq!(line.col_to_byte(1), Some(3));
        assert_eq!(line.byte_to_col(1), 0);
    }

    #[test]
    fn test_floor_char_boundary() {
        let line = Line::from("a😀b");
        assert_eq!(line.floor_char_boundary(3), 1);
        assert_eq!(line.floor_char_boundary(5), 5);
        assert_eq!(line.floor_char_boundary(99), 6);
    }

    #[test]
    fn test_indent() {
        let line = Line::from("\t  x");
        assert_eq!(line.indent_len(), 3);
        assert_eq!(line.indent_columns(4), 6);
        assert!(Line::from("   ").is_blank());
        assert!(!line.is_empty());
    }
}
