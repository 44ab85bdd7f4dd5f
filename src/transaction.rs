//! Transactions: document changes plus an optional new selection
//!
//! Changes in a [`ChangeSet`] are expressed in coordinates of the document
//! *before* the transaction, and never overlap.

use crate::document::Document;

/// One replacement of `from..to` by `insert`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Change {
    pub from: usize,
    pub to: usize,
    pub insert: String,
}

impl Change {
    pub fn new(from: usize, to: usize, insert: impl Into<String>) -> Self {
        Self {
            from: from.min(to),
            to: from.max(to),
            insert: insert.into(),
        }
    }

    pub fn insert(at: usize, text: impl Into<String>) -> Self {
        Self::new(at, at, text)
    }

    pub fn delete(from: usize, to: usize) -> Self {
        Self::new(from, to, "")
    }

    /// Change in document length
    fn delta(&self) -> isize {
        self.insert.len() as isize - (self.to - self.from) as isize
    }
}

/// A set of non-overlapping changes, sorted by position
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChangeSet {
    changes: Vec<Change>,
}

impl ChangeSet {
    pub fn new(mut changes: Vec<Change>) -> Self {
        changes.sort_by_key(|c| (c.from, c.to));
        // Drop changes that overlap an earlier one
        let mut kept: Vec<Change> = Vec::with_capacity(changes.len());
        for change in changes {
            if kept.last().map_or(true, |prev| change.from >= prev.to) {
                kept.push(change);
            }
        }
        Self { changes: kept }
    }

    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    pub fn changes(&self) -> &[Change] {
        &self.changes
    }

    /// Map a pre-change position to its post-change position.
    ///
    /// Positions inside a replaced range move to its end when `assoc_after`
    /// is set and to its start otherwise.
    pub fn map_pos(&self, pos: usize, assoc_after: bool) -> usize {
        let mut delta: isize = 0;
        for change in &self.changes {
            if pos < change.from || (pos == change.from && !assoc_after) {
                break;
            }
            if pos < change.to || (pos == change.to && pos == change.from) {
                let base = (change.from as isize + delta) as usize;
                return if assoc_after { base + change.insert.len() } else { base };
            }
            delta += change.delta();
        }
        (pos as isize + delta).max(0) as usize
    }

    /// Snap every change onto `doc`: offsets past the end clamp to it and
    /// offsets inside a character move back to its start
    pub fn clamp(&self, doc: &Document) -> ChangeSet {
        let changes = self
            .changes
            .iter()
            .map(|c| Change::new(doc.clamp(c.from), doc.clamp(c.to), c.insert.clone()))
            .collect();
        ChangeSet::new(changes)
    }

    /// Combine with `next`, whose positions are after this set.
    ///
    /// `between` is the document with this set applied. The result takes the
    /// original document straight to the one `next` produces.
    pub fn compose(&self, next: &ChangeSet, between: &Document) -> ChangeSet {
        if next.is_empty() {
            return self.clone();
        }

        // Post-change extents; `Some(delta)` marks one of ours
        let mut spans: Vec<(usize, usize, Option<isize>)> = Vec::new();
        let mut delta: isize = 0;
        for change in &self.changes {
            let from = (change.from as isize + delta) as usize;
            spans.push((from, from + change.insert.len(), Some(change.delta())));
            delta += change.delta();
        }
        spans.extend(next.changes.iter().map(|c| (c.from, c.to, None)));
        spans.sort_by_key(|&(from, to, own)| (from, to, own.is_none()));

        // Touching or overlapping spans collapse into one change
        let mut composed = Vec::new();
        let mut shift: isize = 0;
        let mut i = 0;
        while i < spans.len() {
            let start = spans[i].0;
            let mut end = spans[i].1;
            let mut own_delta: isize = 0;
            let mut j = i;
            while j < spans.len() && spans[j].0 <= end {
                end = end.max(spans[j].1);
                if let Some(d) = spans[j].2 {
                    own_delta += d;
                }
                j += 1;
            }

            let mut text = between.slice(start, end);
            for change in next.changes.iter().rev() {
                if change.from >= start && change.to <= end {
                    text.replace_range(change.from - start..change.to - start, &change.insert);
                }
            }
            let from = (start as isize - shift) as usize;
            let to = (from as isize + (end - start) as isize - own_delta) as usize;
            composed.push(Change::new(from, to, text));

            shift += own_delta;
            i = j;
        }
        ChangeSet { changes: composed }
    }

    /// Apply to a document; returns whether the text actually changed and
    /// the inverse change set (in post-change coordinates)
    pub fn apply(&self, doc: &mut Document) -> (bool, ChangeSet) {
        let changes = self.clamp(doc).changes;
        let mut text_changed = false;
        let mut inverse = Vec::with_capacity(changes.len());
        let mut delta: isize = 0;

        // Compute inverses front to back, apply back to front so earlier
        // offsets stay valid
        let mut removed_texts = Vec::with_capacity(changes.len());
        for change in changes.iter().rev() {
            removed_texts.push(doc.replace(change.from, change.to, &change.insert));
        }
        removed_texts.reverse();

        for (change, removed) in changes.iter().zip(removed_texts) {
            if removed != change.insert {
                text_changed = true;
            }
            let from = (change.from as isize + delta) as usize;
            inverse.push(Change::new(from, from + change.insert.len(), removed));
            delta += change.delta();
        }

        (text_changed, ChangeSet { changes: inverse })
    }
}

/// A selected range; `anchor == head` is a cursor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectionRange {
    pub anchor: usize,
    pub head: usize,
}

impl SelectionRange {
    pub fn new(anchor: usize, head: usize) -> Self {
        Self { anchor, head }
    }

    pub fn cursor(pos: usize) -> Self {
        Self::new(pos, pos)
    }

    pub fn from(&self) -> usize {
        self.anchor.min(self.head)
    }

    pub fn to(&self) -> usize {
        self.anchor.max(self.head)
    }

    pub fn is_empty(&self) -> bool {
        self.anchor == self.head
    }

    fn map(&self, changes: &ChangeSet) -> Self {
        if self.is_empty() {
            return Self::cursor(changes.map_pos(self.head, true));
        }
        let forward = self.head >= self.anchor;
        let from = changes.map_pos(self.from(), false);
        let to = changes.map_pos(self.to(), true);
        if forward {
            Self::new(from, to)
        } else {
            Self::new(to, from)
        }
    }
}

/// One or more selected ranges, one of which is the main range
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    ranges: Vec<SelectionRange>,
    main: usize,
}

impl Selection {
    pub fn cursor(pos: usize) -> Self {
        Self::single(SelectionRange::cursor(pos))
    }

    pub fn single(range: SelectionRange) -> Self {
        Self {
            ranges: vec![range],
            main: 0,
        }
    }

    /// Build from ranges, sorting and merging overlaps. `main` indexes `ranges`.
    pub fn new(ranges: Vec<SelectionRange>, main: usize) -> Self {
        if ranges.is_empty() {
            return Self::cursor(0);
        }
        let main_range = ranges[main.min(ranges.len() - 1)];

        let mut sorted = ranges;
        sorted.sort_by_key(|r| (r.from(), r.to()));
        let mut merged: Vec<SelectionRange> = Vec::with_capacity(sorted.len());
        for range in sorted {
            match merged.last_mut() {
                Some(prev)
                    if range.from() < prev.to()
                        || (range.from() == prev.to() && (range.is_empty() || prev.is_empty())) =>
                {
                    let from = prev.from().min(range.from());
                    let to = prev.to().max(range.to());
                    *prev = if prev.head < prev.anchor {
                        SelectionRange::new(to, from)
                    } else {
                        SelectionRange::new(from, to)
                    };
                }
                _ => merged.push(range),
            }
        }

        let main = merged
            .iter()
            .position(|r| r.from() <= main_range.from() && r.to() >= main_range.to())
            .unwrap_or(0);
        Self {
            ranges: merged,
            main,
        }
    }

    pub fn ranges(&self) -> &[SelectionRange] {
        &self.ranges
    }

    pub fn main(&self) -> SelectionRange {
        self.ranges[self.main]
    }

    pub fn main_index(&self) -> usize {
        self.main
    }

    /// Keep only the main range
    pub fn as_single(&self) -> Self {
        Self::single(self.main())
    }

    /// Map through document changes
    pub fn map(&self, changes: &ChangeSet) -> Self {
        let ranges = self.ranges.iter().map(|r| r.map(changes)).collect();
        Self::new(ranges, self.main)
    }

    /// Clamp every range into a document
    pub fn clamp(&self, doc: &Document) -> Self {
        let ranges = self
            .ranges
            .iter()
            .map(|r| SelectionRange::new(doc.clamp(r.anchor), doc.clamp(r.head)))
            .collect();
        Self::new(ranges, self.main)
    }
}

impl Default for Selection {
    fn default() -> Self {
        Self::cursor(0)
    }
}

/// A document change and/or selection update dispatched to an editor
#[derive(Debug, Clone, Default)]
pub struct Transaction {
    pub changes: ChangeSet,
    /// New selection, in post-change coordinates. None = map the old one.
    pub selection: Option<Selection>,
    /// Kind of user action, e.g. "input.type" or "select"
    pub user_event: Option<&'static str>,
    /// Whether undo history records this transaction
    pub add_to_history: bool,
}

impl Transaction {
    fn with_changes(changes: Vec<Change>) -> Self {
        Self {
            changes: ChangeSet::new(changes),
            selection: None,
            user_event: None,
            add_to_history: true,
        }
    }

    pub fn insert(at: usize, text: impl Into<String>) -> Self {
        Self::with_changes(vec![Change::insert(at, text)])
    }

    pub fn replace(from: usize, to: usize, text: impl Into<String>) -> Self {
        Self::with_changes(vec![Change::new(from, to, text)])
    }

    pub fn changes(changes: Vec<Change>) -> Self {
        Self::with_changes(changes)
    }

    /// Selection-only transaction
    pub fn select(selection: Selection) -> Self {
        Self {
            selection: Some(selection),
            user_event: Some("select"),
            add_to_history: true,
            ..Default::default()
        }
    }

    pub fn with_selection(mut self, selection: Selection) -> Self {
        self.selection = Some(selection);
        self
    }

    pub fn user_event(mut self, event: &'static str) -> Self {
        self.user_event = Some(event);
        self
    }

    pub fn without_history(mut self) -> Self {
        self.add_to_history = false;
        self
    }
}
