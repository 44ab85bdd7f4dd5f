//! Bracket matching
//!
//! Brackets are matched by depth across all three bracket kinds. The kind is
//! only compared once the partner is found, so `(]` is reported as an
//! unmatched pair rather than skipped.

/// Maximum distance scanned for a partner bracket
pub const MAX_SCAN_DISTANCE: usize = 10_000;

const BRACKETS: &str = "()[]{}";

/// Side of the cursor to look at
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Before,
    After,
}

/// A bracket and its partner
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BracketMatch {
    /// The bracket next to the cursor
    pub start: (usize, usize),
    /// Its partner, if one was found in range
    pub end: Option<(usize, usize)>,
    /// Whether the partner is the right kind
    pub matched: bool,
}

/// Returns (is_opening, partner) for a bracket character
fn bracket_info(ch: char) -> Option<(bool, char)> {
    let idx = BRACKETS.find(ch)?;
    let opening = idx % 2 == 0;
    let partner = if opening {
        BRACKETS.as_bytes()[idx + 1] as char
    } else {
        BRACKETS.as_bytes()[idx - 1] as char
    };
    Some((opening, partner))
}

/// Match the bracket on one side of `pos`
pub fn match_brackets(text: &str, pos: usize, side: Side) -> Option<BracketMatch> {
    let pos = pos.min(text.len());
    if !text.is_char_boundary(pos) {
        return None;
    }
    let (at, ch) = match side {
        Side::Before => text[..pos].char_indices().next_back()?,
        Side::After => (pos, text[pos..].chars().next()?),
    };
    let (opening, partner) = bracket_info(ch)?;
    let start = (at, at + ch.len_utf8());

    let mut depth = 0usize;
    let mut scanned = 0usize;
    let found = if opening {
        let mut found = None;
        for (offset, c) in text[start.1..].char_indices() {
            scanned += 1;
            if scanned > MAX_SCAN_DISTANCE {
                break;
            }
            let Some((c_opening, _)) = bracket_info(c) else { continue };
            if c_opening {
                depth += 1;
            } else if depth == 0 {
                found = Some((start.1 + offset, c));
                break;
            } else {
                depth -= 1;
            }
        }
        found
    } else {
        let mut found = None;
        for (offset, c) in text[..start.0].char_indices().rev() {
            scanned += 1;
            if scanned > MAX_SCAN_DISTANCE {
                break;
            }
            let Some((c_opening, _)) = bracket_info(c) else { continue };
            if !c_opening {
                depth += 1;
            } else if depth == 0 {
                found = Some((offset, c));
                break;
            } else {
                depth -= 1;
            }
        }
        found
    };

    Some(match found {
        Some((offset, c)) => BracketMatch {
            start,
            end: Some((offset, offset + c.len_utf8())),
            matched: c == partner,
        },
        None => BracketMatch {
            start,
            end: None,
            matched: false,
        },
    })
}

/// Match the bracket touching a cursor, preferring the one before it
pub fn match_at_cursor(text: &str, pos: usize) -> Option<BracketMatch> {
    match_brackets(text, pos, Side::Before).or_else(|| match_brackets(text, pos, Side::After))
}
