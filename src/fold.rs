//! Code folding
//!
//! A fold keeps its first line visible and hides the lines after it up to
//! and including `end_line`.

use crate::document::Document;
use crate::language::FoldStrategy;

/// Tab width used when measuring indentation for folding
const TAB_WIDTH: usize = 4;

/// A foldable (or folded) line range
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct FoldRange {
    pub start_line: usize,
    pub end_line: usize,
}

impl FoldRange {
    /// Whether this range hides `line`
    pub fn hides(&self, line: usize) -> bool {
        line > self.start_line && line <= self.end_line
    }
}

/// ATX heading level of a Markdown line
fn heading_level(text: &str) -> Option<usize> {
    let lead = text.len() - text.trim_start_matches(' ').len();
    if lead > 3 {
        return None;
    }
    let rest = &text[lead..];
    let level = rest.len() - rest.trim_start_matches('#').len();
    if !(1..=6).contains(&level) {
        return None;
    }
    match rest[level..].chars().next() {
        None => Some(level),
        Some(c) if c.is_whitespace() => Some(level),
        _ => None,
    }
}

fn is_fence(text: &str) -> bool {
    let trimmed = text.trim_start();
    trimmed.starts_with("```") || trimmed.starts_with("~~~")
}

/// Heading level per line, ignoring lines inside code fences
fn heading_levels(doc: &Document) -> Vec<Option<usize>> {
    let mut in_fence = false;
    doc.line_texts()
        .map(|text| {
            if is_fence(text) {
                in_fence = !in_fence;
                return None;
            }
            if in_fence {
                None
            } else {
                heading_level(text)
            }
        })
        .collect()
}

/// Drop trailing blank lines from a candidate range
fn trim_blank_tail(doc: &Document, start: usize, mut end: usize) -> Option<FoldRange> {
    while end > start && doc.line(end).map_or(true, |l| l.is_blank()) {
        end -= 1;
    }
    (end > start).then_some(FoldRange {
        start_line: start,
        end_line: end,
    })
}

fn foldable_by_indent(doc: &Document, line: usize) -> Option<FoldRange> {
    let first = doc.line(line)?;
    if first.is_blank() {
        return None;
    }
    let base = first.indent_columns(TAB_WIDTH);

    let mut end = line;
    for idx in line + 1..doc.line_count() {
        let Some(next) = doc.line(idx) else { break };
        if next.is_blank() {
            continue;
        }
        if next.indent_columns(TAB_WIDTH) <= base {
            break;
        }
        end = idx;
    }
    trim_blank_tail(doc, line, end)
}

fn foldable_by_heading(doc: &Document, levels: &[Option<usize>], line: usize) -> Option<FoldRange> {
    let level = (*levels.get(line)?)?;
    let next = levels[line + 1..]
        .iter()
        .position(|l| l.map_or(false, |l| l <= level))
        .map(|offset| line + 1 + offset)
        .unwrap_or(doc.line_count());
    trim_blank_tail(doc, line, next - 1)
}

/// The range a fold starting at `line` would cover
pub fn foldable(doc: &Document, line: usize, strategy: FoldStrategy) -> Option<FoldRange> {
    match strategy {
        FoldStrategy::Indentation => foldable_by_indent(doc, line),
        FoldStrategy::Headings => foldable_by_heading(doc, &heading_levels(doc), line),
    }
}

/// Every foldable range in the document, by start line
pub fn foldable_ranges(doc: &Document, strategy: FoldStrategy) -> Vec<FoldRange> {
    match strategy {
        FoldStrategy::Indentation => (0..doc.line_count())
            .filter_map(|line| foldable_by_indent(doc, line))
            .collect(),
        FoldStrategy::Headings => {
            let levels = heading_levels(doc);
            (0..doc.line_count())
                .filter_map(|line| foldable_by_heading(doc, &levels, line))
                .collect()
        }
    }
}

/// Keep folds valid across an edit that touched old lines
/// `first..=last` and shifted later lines by `delta`.
///
/// Folds overlapping the edited lines are dropped.
pub fn map_folds(folds: &mut Vec<FoldRange>, first: usize, last: usize, delta: isize) {
    folds.retain(|f| f.end_line < first || f.start_line > last);
    for fold in folds.iter_mut() {
        if fold.start_line > last {
            fold.start_line = (fold.start_line as isize + delta) as usize;
            fold.end_line = (fold.end_line as isize + delta) as usize;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_indent_fold() {
        let doc = Document::from_text("def f():\n    a = 1\n\n    return a\n\nx = 2");
        let range = foldable(&doc, 0, FoldStrategy::Indentation).unwrap();
        assert_eq!(range, FoldRange { start_line: 0, end_line: 3 });
        assert_eq!(foldable(&doc, 1, FoldStrategy::Indentation), None);
        assert_eq!(foldable(&doc, 5, FoldStrategy::Indentation), None);
    }

    #[test]
    fn test_heading_fold() {
        let doc = Document::from_text("# A\ntext\n## B\nmore\n\n# C\nend");
        assert_eq!(
            foldable(&doc, 0, FoldStrategy::Headings),
            Some(FoldRange { start_line: 0, end_line: 3 })
        );
        assert_eq!(
            foldable(&doc, 2, FoldStrategy::Headings),
            Some(FoldRange { start_line: 2, end_line: 3 })
        );
        assert_eq!(
            foldable(&doc, 5, FoldStrategy::Headings),
            Some(FoldRange { start_line: 5, end_line: 6 })
        );
        assert_eq!(foldable(&doc, 1, FoldStrategy::Headings), None);
    }

    #[test]
    fn test_heading_inside_fence_ignored() {
        let doc = Document::from_text("# A\n```\n# not a heading\n```\nafter");
        let ranges = foldable_ranges(&doc, FoldStrategy::Headings);
        assert_eq!(ranges, vec![FoldRange { start_line: 0, end_line: 4 }]);
    }

    #[test]
    fn test_heading_needs_space() {
        assert_eq!(heading_level("#tag"), None);
        assert_eq!(heading_level("### Three"), Some(3));
        assert_eq!(heading_level("####### seven"), None);
        assert_eq!(heading_level("    # code"), None);
    }

    #[test]
    fn test_map_folds() {
        let mut folds = vec![
            FoldRange { start_line: 0, end_line: 2 },
            FoldRange { start_line: 4, end_line: 6 },
            FoldRange { start_line: 8, end_line: 9 },
        ];
        map_folds(&mut folds, 5, 5, 2);
        assert_eq!(
            folds,
            vec![FoldRange { start_line: 0, end_line: 2 }, FoldRange { start_line: 10, end_line: 11 }]
        );
    }
}
