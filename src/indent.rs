//! Indentation commands and indent-on-input

use crate::brackets::{match_brackets, Side};
use crate::document::Document;
use crate::language::Language;
use crate::transaction::{Change, Selection};

/// Tab width used when measuring existing indentation
pub const TAB_WIDTH: usize = 4;

/// Whitespace for an indentation of `columns`
pub fn indent_string(columns: usize) -> String {
    " ".repeat(columns)
}

/// Lines touched by a selection, once each and in order.
///
/// A non-empty range that ends at the very start of a line does not count
/// that line.
pub fn selected_lines(doc: &Document, selection: &Selection) -> Vec<usize> {
    let mut lines: Vec<usize> = Vec::new();
    for range in selection.ranges() {
        let first = doc.offset_to_pos(range.from()).line;
        let end = doc.offset_to_pos(range.to());
        let last = if !range.is_empty() && end.col == 0 && end.line > first {
            end.line - 1
        } else {
            end.line
        };
        for line in first..=last {
            if lines.last().map_or(true, |&prev| line > prev) {
                lines.push(line);
            }
        }
    }
    lines
}

/// Add one indentation unit to every selected line
pub fn indent_more(doc: &Document, selection: &Selection, unit: usize) -> Vec<Change> {
    selected_lines(doc, selection)
        .into_iter()
        .map(|line| Change::insert(doc.line_start(line), indent_string(unit)))
        .collect()
}

/// Remove one indentation unit from every selected line
pub fn indent_less(doc: &Document, selection: &Selection, unit: usize) -> Vec<Change> {
    selected_lines(doc, selection)
        .into_iter()
        .filter_map(|line| reindent(doc, line, |cols| cols.saturating_sub(unit)))
        .collect()
}

/// Change a line's indentation, keeping the unchanged prefix in place
fn reindent(doc: &Document, line: usize, target: impl Fn(usize) -> usize) -> Option<Change> {
    let text = doc.line(line)?.text();
    let space = &text[..text.len() - text.trim_start().len()];
    if space.is_empty() && target(0) == 0 {
        return None;
    }
    let columns = doc.line(line)?.indent_columns(TAB_WIDTH);
    let insert = indent_string(target(columns));
    if insert == space {
        return None;
    }

    let keep = space
        .bytes()
        .zip(insert.bytes())
        .take_while(|(a, b)| a == b)
        .count();
    let start = doc.line_start(line);
    Some(Change::new(start + keep, start + space.len(), &insert[keep..]))
}

/// Text to insert for Enter at `pos`, and where the cursor goes within it.
///
/// The new line copies the current indentation, adding a unit after an
/// opening bracket (or a Python `:`). Between a bracket pair the closer moves
/// to its own line.
pub fn newline_and_indent(
    doc: &Document,
    pos: usize,
    language: Language,
    unit: usize,
) -> (String, usize) {
    let at = doc.offset_to_pos(pos);
    let line = doc.line(at.line).map(|l| l.text()).unwrap_or("");
    let base = doc.line(at.line).map_or(0, |l| l.indent_columns(TAB_WIDTH));
    let before = line[..at.col].trim_end();
    let after = line[at.col..].trim_start();

    let opens = match language {
        Language::Markdown => false,
        Language::Python => before.ends_with(['(', '[', '{', ':']),
        Language::JavaScript => before.ends_with(['(', '[', '{']),
    };
    if !opens {
        let insert = format!("\n{}", indent_string(base));
        let cursor = insert.len();
        return (insert, cursor);
    }

    let inner = format!("\n{}", indent_string(base + unit));
    let closes_pair = matches!(
        (before.chars().last(), after.chars().next()),
        (Some('('), Some(')')) | (Some('['), Some(']')) | (Some('{'), Some('}'))
    );
    if closes_pair {
        let cursor = inner.len();
        (format!("{}\n{}", inner, indent_string(base)), cursor)
    } else {
        let cursor = inner.len();
        (inner, cursor)
    }
}

/// Reindent a line after typing, if its content asks for it.
///
/// A closing bracket alone on a line takes the indentation of the line with
/// its opener. In Python a clause keyword such as `else:` dedents one unit
/// below the line above it.
pub fn indent_on_input(
    doc: &Document,
    line: usize,
    language: Language,
    unit: usize,
) -> Option<Change> {
    if language == Language::Markdown {
        return None;
    }
    let text = doc.line(line)?.text();
    let content = text.trim();

    if matches!(content, ")" | "]" | "}") {
        let closer = doc.line_start(line) + (text.len() - text.trim_start().len());
        let full = doc.text();
        let found = match_brackets(&full, closer, Side::After)?;
        let (open_at, _) = found.end.filter(|_| found.matched)?;
        let open_line = doc.offset_to_pos(open_at).line;
        let target = doc.line(open_line)?.indent_columns(TAB_WIDTH);
        return reindent(doc, line, |_| target);
    }

    let keyword = content
        .strip_suffix(':')
        .and_then(|head| head.split_whitespace().next())?;
    if !language.dedent_keywords().contains(&keyword) {
        return None;
    }
    let current = doc.line(line)?.indent_columns(TAB_WIDTH);
    let above = (0..line)
        .rev()
        .filter_map(|idx| doc.line(idx))
        .find(|l| !l.is_blank())
        .map_or(0, |l| l.indent_columns(TAB_WIDTH));
    if current == 0 || current < above {
        return None;
    }
    reindent(doc, line, |cols| cols.saturating_sub(unit))
}
