//! Document representation - the lines of text an editor holds
//!
//! Positions are byte offsets into the full text, with lines joined by
//! `\n`. Offsets passed in are clamped to the document and snapped back to
//! a character boundary.

use crate::line::Line;

/// Line/column position (column in bytes)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Pos {
    pub line: usize,
    pub col: usize,
}

/// The text of one editor
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    /// Lines of text, never empty
    lines: Vec<Line>,
}

impl Document {
    /// Create an empty document
    pub fn new() -> Self {
        Self {
            lines: vec![Line::new()], // Always have at least one line
        }
    }

    /// Create a document from text
    pub fn from_text(text: &str) -> Self {
        Self {
            lines: text.split('\n').map(Line::from).collect(),
        }
    }

    /// The full text
    pub fn text(&self) -> String {
        self.lines
            .iter()
            .map(Line::text)
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Length of the full text in bytes
    pub fn len(&self) -> usize {
        self.lines.iter().map(Line::len).sum::<usize>() + self.lines.len() - 1
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Get number of lines
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Get a line by index
    pub fn line(&self, idx: usize) -> Option<&Line> {
        self.lines.get(idx)
    }

    /// Get all lines
    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    /// Iterate line texts
    pub fn line_texts(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().map(Line::text)
    }

    /// Offset of the first byte of a line
    pub fn line_start(&self, idx: usize) -> usize {
        self.lines[..idx.min(self.lines.len())]
            .iter()
            .map(|l| l.len() + 1)
            .sum()
    }

    /// Offset just past the last byte of a line (before its newline)
    pub fn line_end(&self, idx: usize) -> usize {
        let idx = idx.min(self.lines.len() - 1);
        self.line_start(idx) + self.lines[idx].len()
    }

    /// Clamp an offset into the document and onto a char boundary
    pub fn clamp(&self, offset: usize) -> usize {
        let pos = self.offset_to_pos(offset);
        self.pos_to_offset(pos)
    }

    /// Convert an offset to a line/column position
    pub fn offset_to_pos(&self, offset: usize) -> Pos {
        let mut remaining = offset;
        for (idx, line) in self.lines.iter().enumerate() {
            if remaining <= line.len() {
                return Pos {
                    line: idx,
                    col: line.floor_char_boundary(remaining),
                };
            }
            remaining -= line.len() + 1;
        }
        let last = self.lines.len() - 1;
        Pos {
            line: last,
            col: self.lines[last].len(),
        }
    }

    /// Convert a line/column position to an offset
    pub fn pos_to_offset(&self, pos: Pos) -> usize {
        let line = pos.line.min(self.lines.len() - 1);
        let col = self.lines[line].floor_char_boundary(pos.col);
        self.line_start(line) + col
    }

    /// Text between two offsets
    pub fn slice(&self, from: usize, to: usize) -> String {
        let (from, to) = (self.clamp(from.min(to)), self.clamp(from.max(to)));
        let text = self.text();
        text[from..to].to_string()
    }

    /// Replace the text between two offsets, returning what was removed
    pub fn replace(&mut self, from: usize, to: usize, insert: &str) -> String {
        let start = self.offset_to_pos(from.min(to));
        let end = self.offset_to_pos(from.max(to));
        let removed = self.slice(from, to);

        let mut joined = String::new();
        joined.push_str(&self.lines[start.line].text()[..start.col]);
        joined.push_str(insert);
        joined.push_str(&self.lines[end.line].text()[end.col..]);

        let replacement: Vec<Line> = joined.split('\n').map(Line::from).collect();
        self.lines.splice(start.line..=end.line, replacement);

        removed
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_roundtrip_keeps_trailing_newline() {
        for text in ["", "a", "a\n", "a\nb", "\n\n"] {
            assert_eq!(Document::from_text(text).text(), text);
            assert_eq!(Document::from_text(text).len(), text.len());
        }
    }

    #[test]
    fn test_offsets() {
        let doc = Document::from_text("ab\ncde\n");
        assert_eq!(doc.line_start(1), 3);
        assert_eq!(doc.line_end(1), 6);
        assert_eq!(doc.offset_to_pos(4), Pos { line: 1, col: 1 });
        assert_eq!(doc.pos_to_offset(Pos { line: 2, col: 0 }), 7);
        assert_eq!(doc.offset_to_pos(100), Pos { line: 2, col: 0 });
    }

    #[test]
    fn test_replace_within_line() {
        let mut doc = Document::from_text("hello world");
        let removed = doc.replace(0, 5, "goodbye");
        assert_eq!(removed, "hello");
        assert_eq!(doc.text(), "goodbye world");
    }

    #[test]
    fn test_replace_across_lines() {
        let mut doc = Document::from_text("one\ntwo\nthree");
        let removed = doc.replace(2, 9, "X\nY");
        assert_eq!(removed, "e\ntwo\nt");
        assert_eq!(doc.text(), "onX\nYhree");
        assert_eq!(doc.line_count(), 2);
    }

    #[test]
    fn test_insert_into_empty() {
        let mut doc = Document::new();
        doc.replace(0, 0, "a");
        doc.replace(1, 1, "b");
        assert_eq!(doc.text(), "ab");
    }

    #[test]
    fn test_clamp_snaps_to_char_boundary() {
        let doc = Document::from_text("é");
        assert_eq!(doc.clamp(1), 0);
        assert_eq!(doc.clamp(2), 2);
    }
}
