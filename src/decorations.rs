//! View decorations
//!
//! Everything an editor host paints on top of the plain text: styled syntax
//! spans, bracket highlights, active lines, placeholders for invisible
//! characters, selection matches, fold markers and gutter labels.

use crate::brackets::BracketMatch;
use crate::document::Document;
use crate::fold::FoldRange;
use crate::highlight::Span;
use crate::transaction::Selection;

/// Longest selection that is searched for elsewhere in the document
pub const MAX_SELECTION_MATCH_LEN: usize = 200;

/// Placeholder text shown in place of folded lines
pub const FOLD_PLACEHOLDER: &str = "…";

/// An invisible or confusable character replaced by a placeholder
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecialChar {
    /// Byte offset in the document
    pub offset: usize,
    pub ch: char,
    pub placeholder: char,
}

impl SpecialChar {
    /// Tooltip text, e.g. `\u{200b}`
    pub fn title(&self) -> String {
        format!("\\u{{{:x}}}", self.ch as u32)
    }
}

/// Characters replaced by a placeholder (tab and newline excluded)
pub fn is_special_char(ch: char) -> bool {
    matches!(ch,
        '\u{0}'..='\u{8}'
        | '\u{b}'..='\u{1f}'
        | '\u{7f}'..='\u{9f}'
        | '\u{ad}'
        | '\u{61c}'
        | '\u{200b}'
        | '\u{200e}'
        | '\u{200f}'
        | '\u{2028}'
        | '\u{2029}'
        | '\u{202d}'
        | '\u{202e}'
        | '\u{2066}'
        | '\u{2067}'
        | '\u{2069}'
        | '\u{feff}'
        | '\u{fff9}'..='\u{fffc}')
}

fn placeholder_for(ch: char) -> char {
    let code = ch as u32;
    if code < 0x20 {
        // Unicode control pictures
        char::from_u32(0x2400 + code).unwrap_or('\u{2022}')
    } else if code == 0x7f {
        '\u{2421}'
    } else {
        '\u{2022}'
    }
}

/// Find special characters in a document
pub fn special_chars(doc: &Document) -> Vec<SpecialChar> {
    let mut found = Vec::new();
    for (idx, text) in doc.line_texts().enumerate() {
        let start = doc.line_start(idx);
        for (offset, ch) in text.char_indices() {
            if is_special_char(ch) {
                found.push(SpecialChar {
                    offset: start + offset,
                    ch,
                    placeholder: placeholder_for(ch),
                });
            }
        }
    }
    found
}

/// Other occurrences of the selected text.
///
/// Only a single, non-empty, single-line selection with some non-whitespace
/// content is searched for. The selection itself is not reported.
pub fn selection_matches(doc: &Document, selection: &Selection) -> Vec<(usize, usize)> {
    if selection.ranges().len() > 1 {
        return Vec::new();
    }
    let range = selection.main();
    let len = range.to() - range.from();
    if len == 0 || len > MAX_SELECTION_MATCH_LEN {
        return Vec::new();
    }
    let query = doc.slice(range.from(), range.to());
    if query.contains('\n') || query.trim().is_empty() {
        return Vec::new();
    }

    let text = doc.text();
    text.match_indices(query.as_str())
        .map(|(from, m)| (from, from + m.len()))
        .filter(|&(from, to)| from != range.from() || to != range.to())
        .collect()
}

/// State of a fold gutter marker
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FoldMarker {
    Open,
    Folded,
}

impl FoldMarker {
    pub fn symbol(&self) -> char {
        match self {
            FoldMarker::Open => '⌄',
            FoldMarker::Folded => '›',
        }
    }
}

/// Pointer shown over the editor content
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PointerStyle {
    #[default]
    Text,
    Crosshair,
}

/// A line-number gutter label
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineLabel {
    pub line: usize,
    pub label: String,
}

/// Everything painted over the text of a view
#[derive(Debug, Clone, Default)]
pub struct Decorations {
    /// Styled syntax spans per line, offsets relative to the line
    pub syntax: Vec<Vec<Span>>,
    pub bracket: Option<BracketMatch>,
    pub active_lines: Vec<usize>,
    pub active_gutter_lines: Vec<usize>,
    pub special_chars: Vec<SpecialChar>,
    pub selection_matches: Vec<(usize, usize)>,
    /// Folded ranges, each shown as a placeholder after its first line
    pub folds: Vec<FoldRange>,
    pub fold_markers: Vec<(usize, FoldMarker)>,
    /// Present only when the line-number gutter is enabled
    pub line_numbers: Option<Vec<LineLabel>>,
    pub drop_cursor: Option<usize>,
}
