//! The editor view
//!
//! An [`EditorView`] owns one document and selection, applies transactions
//! to them, and reports every update to the listeners its extensions
//! installed. Behaviors (history, folding, bracket matching, ...) are active
//! only when the corresponding extension is present.

use std::cell::RefCell;
use std::sync::Arc;

use tracing::trace;

use crate::brackets::{self, BracketMatch, Side};
use crate::command::KeyTable;
use crate::decorations::{self, Decorations, FoldMarker, LineLabel, PointerStyle};
use crate::document::Document;
use crate::error::Result;
use crate::extension::{Extension, ExtensionKind, ExtensionSet, UpdateListener};
use crate::fold::{self, FoldRange};
use crate::highlight::{style_tokens, Span};
use crate::history::{History, HistoryStep};
use crate::indent;
use crate::input::Key;
use crate::language::{HighlightCache, Language};
use crate::mount::{MountTarget, Surface, SurfaceId};
use crate::theme::Theme;
use crate::transaction::{Change, ChangeSet, Selection, SelectionRange, Transaction};

/// What a listener sees after each transaction
#[derive(Debug)]
pub struct ViewUpdate<'a> {
    /// The document text differs from before
    pub doc_changed: bool,
    /// The transaction set the selection explicitly
    pub selection_set: bool,
    pub user_event: Option<&'static str>,
    doc: &'a Document,
    selection: &'a Selection,
}

impl ViewUpdate<'_> {
    /// The complete document text after the update
    pub fn text(&self) -> String {
        self.doc.text()
    }

    pub fn document(&self) -> &Document {
        self.doc
    }

    pub fn selection(&self) -> &Selection {
        self.selection
    }
}

/// Outcome of a dispatched transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dispatched {
    pub doc_changed: bool,
    pub selection_set: bool,
}

/// A live editor instance mounted in a host container
pub struct EditorView {
    doc: Document,
    selection: Selection,
    extensions: ExtensionSet,
    listeners: Vec<UpdateListener>,
    history: Option<History>,
    keymap: KeyTable,
    cache: RefCell<HighlightCache>,
    folds: Vec<FoldRange>,
    drop_cursor: Option<usize>,
    modifier_held: bool,
    surface: Surface,
}

impl EditorView {
    /// Build a view over `text`, configured by `extensions`, inside `mount`.
    ///
    /// Fails without registering anything if the extension list is
    /// malformed or the mount is detached.
    pub fn new(text: &str, extensions: Vec<Extension>, mount: &MountTarget) -> Result<Self> {
        let mut extensions = ExtensionSet::resolve(extensions)?;
        let surface = Surface::attach(mount)?;

        let listeners = extensions.take_listeners();
        let history = extensions.has(ExtensionKind::History).then(History::new);
        let keymap = KeyTable::for_extensions(&extensions);

        trace!(
            mount = mount.id(),
            language = %extensions.language(),
            extensions = extensions.kinds().len(),
            "view created"
        );

        Ok(Self {
            doc: Document::from_text(text),
            selection: Selection::cursor(0),
            extensions,
            listeners,
            history,
            keymap,
            cache: RefCell::new(HighlightCache::new()),
            folds: Vec::new(),
            drop_cursor: None,
            modifier_held: false,
            surface,
        })
    }

    pub fn text(&self) -> String {
        self.doc.text()
    }

    pub fn document(&self) -> &Document {
        &self.doc
    }

    pub fn line_count(&self) -> usize {
        self.doc.line_count()
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn language(&self) -> Language {
        self.extensions.language()
    }

    pub fn theme(&self) -> Option<&Arc<Theme>> {
        self.extensions.theme()
    }

    /// Resolved extension kinds, in order
    pub fn extensions(&self) -> &[ExtensionKind] {
        self.extensions.kinds()
    }

    pub fn has_extension(&self, kind: ExtensionKind) -> bool {
        self.extensions.has(kind)
    }

    pub fn indent_unit(&self) -> usize {
        self.extensions.indent_unit()
    }

    pub fn keymap(&self) -> &KeyTable {
        &self.keymap
    }

    pub fn mount(&self) -> &MountTarget {
        self.surface.mount()
    }

    pub fn surface_id(&self) -> SurfaceId {
        self.surface.id()
    }

    pub fn can_undo(&self) -> bool {
        self.history.as_ref().map_or(false, History::can_undo)
    }

    pub fn can_redo(&self) -> bool {
        self.history.as_ref().map_or(false, History::can_redo)
    }

    // --- transactions ---

    /// Apply a transaction and notify listeners
    pub fn dispatch(&mut self, tr: Transaction) -> Dispatched {
        let selection_before = self.selection.clone();
        let changes = tr.changes.clamp(&self.doc);
        let (doc_changed, inverse) = if changes.is_empty() {
            (false, ChangeSet::default())
        } else {
            self.apply_changes(&changes)
        };

        let selection_set = tr.selection.is_some();
        let selection = match tr.selection {
            Some(selection) => selection,
            None => selection_before.map(&changes),
        };
        self.selection = self.constrain(selection);

        if doc_changed && tr.add_to_history {
            if let Some(history) = self.history.as_mut() {
                history.record(
                    HistoryStep {
                        changes,
                        inverse,
                    },
                    selection_before,
                    self.selection.clone(),
                    tr.user_event,
                );
            }
        }

        trace!(doc_changed, selection_set, event = ?tr.user_event, "dispatch");
        self.notify(doc_changed, selection_set, tr.user_event);
        Dispatched {
            doc_changed,
            selection_set,
        }
    }

    /// Apply changes to the document, keeping caches and folds in step.
    /// Returns whether the text changed and the inverse changes.
    fn apply_changes(&mut self, changes: &ChangeSet) -> (bool, ChangeSet) {
        let (Some(first), Some(last)) = (changes.changes().first(), changes.changes().last()) else {
            return (false, ChangeSet::default());
        };
        let first_line = self.doc.offset_to_pos(first.from).line;
        let last_line = self.doc.offset_to_pos(last.to).line;
        let old_count = self.doc.line_count() as isize;

        let (changed, inverse) = changes.apply(&mut self.doc);
        if changed {
            let delta = self.doc.line_count() as isize - old_count;
            fold::map_folds(&mut self.folds, first_line, last_line, delta);
            self.cache.get_mut().invalidate_from(first_line);
        }
        (changed, inverse)
    }

    /// Clamp a selection into the document, reducing it to its main range
    /// unless multiple selections are allowed
    fn constrain(&self, selection: Selection) -> Selection {
        let selection = selection.clamp(&self.doc);
        if self.has_extension(ExtensionKind::AllowMultipleSelections) {
            selection
        } else {
            selection.as_single()
        }
    }

    fn notify(&mut self, doc_changed: bool, selection_set: bool, user_event: Option<&'static str>) {
        let mut listeners = std::mem::take(&mut self.listeners);
        let update = ViewUpdate {
            doc_changed,
            selection_set,
            user_event,
            doc: &self.doc,
            selection: &self.selection,
        };
        for listener in listeners.iter_mut() {
            listener.call(&update);
        }
        trace!(listeners = listeners.len(), doc_changed, "listeners notified");
        self.listeners = listeners;
    }

    // --- input ---

    /// Run the command bound to a key, or insert a printable character
    pub fn handle_key(&mut self, key: Key) -> bool {
        if let Some(command) = self.keymap.lookup(key) {
            return command(self);
        }
        match key.base_char() {
            Some(ch) if key.is_self_insert() => {
                self.insert_text(&ch.to_string());
                true
            }
            _ => false,
        }
    }

    /// Replace every selection range with typed text.
    ///
    /// With indent-on-input active, a reindent the typed character triggers
    /// goes into the same transaction.
    pub fn insert_text(&mut self, text: &str) {
        let changes: Vec<Change> = self
            .selection
            .ranges()
            .iter()
            .map(|r| Change::new(r.from(), r.to(), text))
            .collect();
        let mut set = ChangeSet::new(changes).clamp(&self.doc);
        let cursors = self
            .selection
            .ranges()
            .iter()
            .map(|r| SelectionRange::cursor(set.map_pos(r.to(), true)))
            .collect();
        let mut selection = Selection::new(cursors, self.selection.main_index());

        if self.has_extension(ExtensionKind::IndentOnInput) && text.chars().count() == 1 {
            let mut between = self.doc.clone();
            set.apply(&mut between);
            let reindent = self.indent_on_input(&between, &selection);
            if !reindent.is_empty() {
                selection = selection.map(&reindent);
                set = set.compose(&reindent, &between);
            }
        }

        self.dispatch(
            Transaction::changes(set.changes().to_vec())
                .with_selection(selection)
                .user_event("input.type"),
        );
    }

    /// Reindent changes for the lines holding `selection` in `doc`
    fn indent_on_input(&self, doc: &Document, selection: &Selection) -> ChangeSet {
        let language = self.language();
        let unit = self.indent_unit();
        let mut lines: Vec<usize> = selection
            .ranges()
            .iter()
            .map(|r| doc.offset_to_pos(r.head).line)
            .collect();
        lines.dedup();

        let changes = lines
            .into_iter()
            .filter_map(|line| indent::indent_on_input(doc, line, language, unit))
            .collect();
        ChangeSet::new(changes)
    }

    /// Insert a newline, indenting the new line
    pub fn insert_newline_and_indent(&mut self) -> bool {
        let language = self.language();
        let unit = self.indent_unit();
        let mut changes = Vec::new();
        let mut heads = Vec::new();
        for range in self.selection.ranges() {
            let (insert, cursor) =
                indent::newline_and_indent(&self.doc, range.from(), language, unit);
            heads.push((range.from(), range.to(), cursor));
            changes.push(Change::new(range.from(), range.to(), insert));
        }
        let set = ChangeSet::new(changes);
        let cursors = heads
            .into_iter()
            .map(|(from, _, cursor)| SelectionRange::cursor(set.map_pos(from, false) + cursor))
            .collect();
        let selection = Selection::new(cursors, self.selection.main_index());
        self.dispatch(
            Transaction::changes(set.changes().to_vec())
                .with_selection(selection)
                .user_event("input"),
        );
        true
    }

    /// Delete the selection, or the character before each cursor
    pub fn delete_char_backward(&mut self) -> bool {
        self.delete_by(|view, pos| view.char_left(pos), "delete.backward")
    }

    /// Delete the selection, or the character after each cursor
    pub fn delete_char_forward(&mut self) -> bool {
        self.delete_by(|view, pos| view.char_right(pos), "delete.forward")
    }

    fn delete_by(&mut self, target: impl Fn(&Self, usize) -> usize, event: &'static str) -> bool {
        let changes: Vec<Change> = self
            .selection
            .ranges()
            .iter()
            .filter_map(|r| {
                if !r.is_empty() {
                    return Some(Change::delete(r.from(), r.to()));
                }
                let other = target(self, r.head);
                (other != r.head).then(|| Change::delete(r.head, other))
            })
            .collect();
        if changes.is_empty() {
            return false;
        }
        let set = ChangeSet::new(changes);
        let cursors = self
            .selection
            .ranges()
            .iter()
            .map(|r| SelectionRange::cursor(set.map_pos(r.from(), false)))
            .collect();
        let selection = Selection::new(cursors, self.selection.main_index());
        self.dispatch(
            Transaction::changes(set.changes().to_vec())
                .with_selection(selection)
                .user_event(event),
        );
        true
    }

    // --- cursor motion ---

    fn char_left(&self, pos: usize) -> usize {
        let at = self.doc.offset_to_pos(pos);
        if at.col > 0 {
            let line = &self.doc.lines()[at.line];
            return self.doc.line_start(at.line) + line.floor_char_boundary(at.col - 1);
        }
        if at.line == 0 {
            return pos;
        }
        self.doc.line_end(self.visible_line_at_or_before(at.line - 1))
    }

    fn char_right(&self, pos: usize) -> usize {
        let at = self.doc.offset_to_pos(pos);
        let text = self.doc.lines()[at.line].text();
        if let Some(ch) = text[at.col..].chars().next() {
            return pos + ch.len_utf8();
        }
        match self.next_visible_line(at.line) {
            Some(next) => self.doc.line_start(next),
            None => pos,
        }
    }

    fn vertical(&self, pos: usize, down: bool) -> usize {
        let at = self.doc.offset_to_pos(pos);
        let target = if down {
            self.next_visible_line(at.line)
        } else {
            self.prev_visible_line(at.line)
        };
        let Some(target) = target else {
            return if down { self.doc.len() } else { 0 };
        };
        let column = self.doc.lines()[at.line].byte_to_col(at.col);
        let line = &self.doc.lines()[target];
        let col = line.col_to_byte(column).unwrap_or(line.len());
        self.doc.line_start(target) + col
    }

    /// Move every range head; collapse ranges unless extending
    fn move_heads(
        &mut self,
        extend: bool,
        target: impl Fn(&Self, SelectionRange) -> usize,
    ) -> bool {
        let ranges = self
            .selection
            .ranges()
            .iter()
            .map(|&r| {
                let head = target(self, r);
                if extend {
                    SelectionRange::new(r.anchor, head)
                } else {
                    SelectionRange::cursor(head)
                }
            })
            .collect();
        let selection = Selection::new(ranges, self.selection.main_index());
        self.dispatch(Transaction::select(selection));
        true
    }

    pub fn move_char(&mut self, forward: bool, extend: bool) -> bool {
        self.move_heads(extend, |view, r| match (forward, extend || r.is_empty()) {
            (true, true) => view.char_right(r.head),
            (false, true) => view.char_left(r.head),
            (true, false) => r.to(),
            (false, false) => r.from(),
        })
    }

    pub fn move_line(&mut self, down: bool, extend: bool) -> bool {
        self.move_heads(extend, |view, r| view.vertical(r.head, down))
    }

    pub fn move_line_boundary(&mut self, end: bool, extend: bool) -> bool {
        self.move_heads(extend, |view, r| {
            let line = view.doc.offset_to_pos(r.head).line;
            if end {
                view.doc.line_end(line)
            } else {
                view.doc.line_start(line)
            }
        })
    }

    pub fn move_doc_boundary(&mut self, end: bool, extend: bool) -> bool {
        self.move_heads(extend, |view, _| if end { view.doc.len() } else { 0 })
    }

    pub fn select_all(&mut self) -> bool {
        let range = SelectionRange::new(0, self.doc.len());
        self.dispatch(Transaction::select(Selection::single(range)));
        true
    }

    /// Move the cursor to the bracket matching the one next to it
    pub fn cursor_matching_bracket(&mut self) -> bool {
        if !self.has_extension(ExtensionKind::BracketMatching) {
            return false;
        }
        let text = self.doc.text();
        let head = self.selection.main().head;
        let Some(found) = brackets::match_at_cursor(&text, head) else {
            return false;
        };
        let Some((from, to)) = found.end else {
            return false;
        };
        // Land on the outside of the partner bracket
        let target = if from >= found.start.1 { to } else { from };
        self.dispatch(Transaction::select(Selection::cursor(target)));
        true
    }

    // --- history ---

    pub fn undo(&mut self) -> bool {
        let Some(entry) = self.history.as_mut().and_then(History::take_undo) else {
            return false;
        };
        let mut changed = false;
        for step in entry.steps.iter().rev() {
            changed |= self.apply_changes(&step.inverse).0;
        }
        self.selection = self.constrain(entry.selection_before.clone());
        if let Some(history) = self.history.as_mut() {
            history.undone(entry);
        }
        trace!(changed, "undo");
        self.notify(changed, true, Some("undo"));
        true
    }

    pub fn redo(&mut self) -> bool {
        let Some(entry) = self.history.as_mut().and_then(History::take_redo) else {
            return false;
        };
        let mut changed = false;
        for step in &entry.steps {
            changed |= self.apply_changes(&step.changes).0;
        }
        self.selection = self.constrain(entry.selection_after.clone());
        if let Some(history) = self.history.as_mut() {
            history.redone(entry);
        }
        trace!(changed, "redo");
        self.notify(changed, true, Some("redo"));
        true
    }

    // --- indentation ---

    pub fn indent_more(&mut self) -> bool {
        let changes = indent::indent_more(&self.doc, &self.selection, self.indent_unit());
        self.dispatch_indent(changes)
    }

    pub fn indent_less(&mut self) -> bool {
        let changes = indent::indent_less(&self.doc, &self.selection, self.indent_unit());
        self.dispatch_indent(changes)
    }

    fn dispatch_indent(&mut self, changes: Vec<Change>) -> bool {
        if !changes.is_empty() {
            self.dispatch(Transaction::changes(changes).user_event("input.indent"));
        }
        true
    }

    // --- folding ---

    /// Currently folded ranges
    pub fn folds(&self) -> &[FoldRange] {
        &self.folds
    }

    fn fold_lines(&self) -> Vec<usize> {
        let mut lines: Vec<usize> = self
            .selection
            .ranges()
            .iter()
            .map(|r| self.doc.offset_to_pos(r.head).line)
            .collect();
        lines.dedup();
        lines
    }

    fn add_fold(&mut self, range: FoldRange) -> bool {
        if self.folds.contains(&range) {
            return false;
        }
        self.folds.push(range);
        self.folds.sort();
        true
    }

    /// Fold the range starting on each cursor's line
    pub fn fold_code(&mut self) -> bool {
        if !self.has_extension(ExtensionKind::FoldGutter) {
            return false;
        }
        let strategy = self.language().fold_strategy();
        let mut folded = false;
        for line in self.fold_lines() {
            if let Some(range) = fold::foldable(&self.doc, line, strategy) {
                folded |= self.add_fold(range);
            }
        }
        if folded {
            self.move_out_of_folds();
        }
        folded
    }

    /// Remove folds starting on or covering each cursor's line
    pub fn unfold_code(&mut self) -> bool {
        let lines = self.fold_lines();
        let before = self.folds.len();
        self.folds
            .retain(|f| !lines.iter().any(|&l| l == f.start_line || f.hides(l)));
        self.folds.len() != before
    }

    /// Fold every top-level foldable range
    pub fn fold_all(&mut self) -> bool {
        if !self.has_extension(ExtensionKind::FoldGutter) {
            return false;
        }
        let ranges = fold::foldable_ranges(&self.doc, self.language().fold_strategy());
        let mut folded = false;
        for range in ranges {
            if !self.is_hidden(range.start_line) {
                folded |= self.add_fold(range);
            }
        }
        if folded {
            self.move_out_of_folds();
        }
        folded
    }

    pub fn unfold_all(&mut self) -> bool {
        let had = !self.folds.is_empty();
        self.folds.clear();
        had
    }

    /// Toggle the fold starting at a line, as a gutter click does
    pub fn toggle_fold_at(&mut self, line: usize) -> bool {
        if let Some(idx) = self.folds.iter().position(|f| f.start_line == line) {
            self.folds.remove(idx);
            return true;
        }
        if !self.has_extension(ExtensionKind::FoldGutter) {
            return false;
        }
        match fold::foldable(&self.doc, line, self.language().fold_strategy()) {
            Some(range) => {
                let added = self.add_fold(range);
                self.move_out_of_folds();
                added
            }
            None => false,
        }
    }

    /// Move cursors that ended up inside a fold to the end of its first line
    fn move_out_of_folds(&mut self) {
        let ranges: Vec<SelectionRange> = self
            .selection
            .ranges()
            .iter()
            .map(|r| {
                let line = self.doc.offset_to_pos(r.head).line;
                match self.folds.iter().find(|f| f.hides(line)) {
                    Some(f) => SelectionRange::cursor(self.doc.line_end(f.start_line)),
                    None => *r,
                }
            })
            .collect();
        let selection = Selection::new(ranges, self.selection.main_index());
        if selection != self.selection {
            self.dispatch(Transaction::select(selection));
        }
    }

    pub fn is_hidden(&self, line: usize) -> bool {
        self.folds.iter().any(|f| f.hides(line))
    }

    /// Lines not hidden by a fold
    pub fn visible_lines(&self) -> Vec<usize> {
        (0..self.doc.line_count())
            .filter(|&line| !self.is_hidden(line))
            .collect()
    }

    fn next_visible_line(&self, line: usize) -> Option<usize> {
        (line + 1..self.doc.line_count()).find(|&l| !self.is_hidden(l))
    }

    fn prev_visible_line(&self, line: usize) -> Option<usize> {
        (0..line).rev().find(|&l| !self.is_hidden(l))
    }

    fn visible_line_at_or_before(&self, line: usize) -> usize {
        if self.is_hidden(line) {
            self.prev_visible_line(line).unwrap_or(0)
        } else {
            line
        }
    }

    // --- rectangular selection, drop cursor, crosshair ---

    /// Select a rectangle between two (line, display column) corners.
    ///
    /// Lines too short to reach the rectangle are skipped; a zero-width
    /// rectangle puts a cursor on every line instead.
    pub fn select_rectangle(&mut self, anchor: (usize, usize), head: (usize, usize)) -> bool {
        if !self.has_extension(ExtensionKind::RectangularSelection) {
            return false;
        }
        let last_line = self.doc.line_count() - 1;
        let top = anchor.0.min(head.0).min(last_line);
        let bottom = anchor.0.max(head.0).min(last_line);
        let (left, right) = (anchor.1.min(head.1), anchor.1.max(head.1));
        let backward = head.1 < anchor.1;
        let head_line = head.0.min(last_line);

        let mut ranges = Vec::new();
        let mut main = 0;
        for idx in top..=bottom {
            let line = &self.doc.lines()[idx];
            let start = self.doc.line_start(idx);
            let range = if left == right {
                SelectionRange::cursor(start + line.col_to_byte(left).unwrap_or(line.len()))
            } else {
                let Some(from) = line.col_to_byte(left) else { continue };
                let to = line.col_to_byte(right).unwrap_or(line.len());
                if backward {
                    SelectionRange::new(start + to, start + from)
                } else {
                    SelectionRange::new(start + from, start + to)
                }
            };
            if idx <= head_line {
                main = ranges.len();
            }
            ranges.push(range);
        }
        if ranges.is_empty() {
            return false;
        }

        let selection = Selection::new(ranges, main);
        self.dispatch(Transaction::select(selection).user_event("select.pointer"));
        true
    }

    /// Show (or hide) the drop cursor while something is dragged over the editor
    pub fn set_drop_cursor(&mut self, pos: Option<usize>) -> bool {
        if !self.has_extension(ExtensionKind::DropCursor) {
            return false;
        }
        self.drop_cursor = pos.map(|p| self.doc.clamp(p));
        true
    }

    pub fn drop_cursor(&self) -> Option<usize> {
        self.drop_cursor
    }

    /// Insert dropped text and select it
    pub fn drop_text(&mut self, pos: usize, text: &str) -> bool {
        self.drop_cursor = None;
        let pos = self.doc.clamp(pos);
        let range = SelectionRange::new(pos, pos + text.len());
        self.dispatch(
            Transaction::insert(pos, text)
                .with_selection(Selection::single(range))
                .user_event("input.drop"),
        );
        true
    }

    /// Record whether the rectangular-selection modifier is held
    pub fn set_modifier_held(&mut self, held: bool) {
        self.modifier_held = held;
    }

    pub fn pointer_style(&self) -> PointerStyle {
        if self.modifier_held && self.has_extension(ExtensionKind::CrosshairCursor) {
            PointerStyle::Crosshair
        } else {
            PointerStyle::Text
        }
    }

    pub fn line_wrapping(&self) -> bool {
        self.has_extension(ExtensionKind::LineWrapping)
    }

    // --- decorations ---

    fn bracket_match(&self) -> Option<BracketMatch> {
        let main = self.selection.main();
        if !main.is_empty() {
            return None;
        }
        let text = self.doc.text();
        brackets::match_brackets(&text, main.head, Side::Before)
            .or_else(|| brackets::match_brackets(&text, main.head, Side::After))
    }

    fn head_lines(&self) -> Vec<usize> {
        let mut lines: Vec<usize> = self
            .selection
            .ranges()
            .iter()
            .map(|r| self.doc.offset_to_pos(r.head).line)
            .collect();
        lines.dedup();
        lines
    }

    /// Compute everything the host paints over the text
    pub fn decorations(&self) -> Decorations {
        let highlighters = self.extensions.highlighters();
        let syntax: Vec<Vec<Span>> = {
            let mut cache = self.cache.borrow_mut();
            let tokens = cache.refresh(self.language().grammar(), self.doc.line_texts());
            tokens
                .iter()
                .map(|line| style_tokens(line, &highlighters))
                .collect()
        };

        let has = |kind| self.has_extension(kind);
        let visible = self.visible_lines();

        Decorations {
            syntax,
            bracket: has(ExtensionKind::BracketMatching)
                .then(|| self.bracket_match())
                .flatten(),
            active_lines: if has(ExtensionKind::HighlightActiveLine) {
                self.head_lines()
            } else {
                Vec::new()
            },
            active_gutter_lines: if has(ExtensionKind::HighlightActiveLineGutter) {
                self.head_lines()
            } else {
                Vec::new()
            },
            special_chars: if has(ExtensionKind::HighlightSpecialChars) {
                decorations::special_chars(&self.doc)
            } else {
                Vec::new()
            },
            selection_matches: if has(ExtensionKind::HighlightSelectionMatches) {
                decorations::selection_matches(&self.doc, &self.selection)
            } else {
                Vec::new()
            },
            folds: self.folds.clone(),
            fold_markers: if has(ExtensionKind::FoldGutter) {
                fold::foldable_ranges(&self.doc, self.language().fold_strategy())
                    .into_iter()
                    .filter(|r| !self.is_hidden(r.start_line))
                    .map(|r| {
                        let marker = if self.folds.iter().any(|f| f.start_line == r.start_line) {
                            FoldMarker::Folded
                        } else {
                            FoldMarker::Open
                        };
                        (r.start_line, marker)
                    })
                    .collect()
            } else {
                Vec::new()
            },
            line_numbers: has(ExtensionKind::LineNumbers).then(|| {
                visible
                    .iter()
                    .map(|&line| LineLabel {
                        line,
                        label: (line + 1).to_string(),
                    })
                    .collect()
            }),
            drop_cursor: self.drop_cursor,
        }
    }
}

impl std::fmt::Debug for EditorView {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EditorView")
            .field("language", &self.language())
            .field("lines", &self.doc.line_count())
            .field("selection", &self.selection)
            .field("extensions", &self.extensions.kinds())
            .field("surface", &self.surface.id())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extension::Keymap;
    use crate::input::special;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn full_extensions(language: Language) -> Vec<Extension> {
        vec![
            Extension::basic_setup(),
            Extension::History,
            Extension::BracketMatching,
            Extension::FoldGutter,
            Extension::IndentOnInput,
            Extension::HighlightActiveLineGutter,
            Extension::HighlightSpecialChars,
            Extension::DropCursor,
            Extension::RectangularSelection,
            Extension::CrosshairCursor,
            Extension::Keymap(Keymap::IndentWithTab),
            Extension::Language(language),
        ]
    }

    fn view(text: &str, language: Language) -> EditorView {
        EditorView::new(text, full_extensions(language), &MountTarget::new()).unwrap()
    }

    #[test]
    fn test_dispatch_reports_changes() {
        let mut v = view("", Language::Markdown);
        let d = v.dispatch(Transaction::insert(0, "hi"));
        assert!(d.doc_changed);
        assert!(!d.selection_set);
        assert_eq!(v.text(), "hi");
        assert_eq!(v.selection().main(), SelectionRange::cursor(2));

        let d = v.dispatch(Transaction::select(Selection::cursor(1)));
        assert!(!d.doc_changed);
        assert!(d.selection_set);
    }

    #[test]
    fn test_listener_sees_every_update() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let mut exts = full_extensions(Language::Markdown);
        exts.push(Extension::update_listener(move |u| {
            sink.borrow_mut().push((u.doc_changed, u.text()))
        }));
        let mut v = EditorView::new("", exts, &MountTarget::new()).unwrap();

        v.dispatch(Transaction::insert(0, "a"));
        v.dispatch(Transaction::select(Selection::cursor(0)));
        v.dispatch(Transaction::replace(0, 1, "a"));
        assert_eq!(
            *seen.borrow(),
            vec![(true, "a".to_string()), (false, "a".to_string()), (false, "a".to_string())]
        );
    }

    #[test]
    fn test_typing_and_undo_redo() {
        let mut v = view("", Language::Markdown);
        v.handle_key(Key::char('a'));
        v.handle_key(Key::char('b'));
        assert_eq!(v.text(), "ab");

        assert!(v.handle_key(Key::ctrl('z')));
        assert_eq!(v.text(), "");
        assert!(v.can_redo());

        assert!(v.handle_key(Key::ctrl('y')));
        assert_eq!(v.text(), "ab");
        assert_eq!(v.selection().main(), SelectionRange::cursor(2));
    }

    #[test]
    fn test_no_history_without_extension() {
        let mut v = EditorView::new(
            "",
            vec![Extension::basic_setup(), Extension::Language(Language::Markdown)],
            &MountTarget::new(),
        )
        .unwrap();
        v.insert_text("x");
        assert!(!v.undo());
        assert_eq!(v.text(), "x");
    }

    #[test]
    fn test_single_selection_without_multiple_selections() {
        let mut v = EditorView::new(
            "abc\ndef",
            vec![Extension::Language(Language::Markdown), Extension::RectangularSelection],
            &MountTarget::new(),
        )
        .unwrap();
        assert!(v.select_rectangle((0, 1), (1, 2)));
        assert_eq!(v.selection().ranges().len(), 1);
        assert_eq!(v.selection().main(), SelectionRange::new(5, 6));
    }

    #[test]
    fn test_rectangular_selection() {
        let mut v = view("abcdef\n\nabcdef", Language::Markdown);
        assert!(v.select_rectangle((0, 1), (2, 4)));
        let ranges = v.selection().ranges();
        // The empty line is too short to reach the rectangle
        assert_eq!(ranges, &[SelectionRange::new(1, 4), SelectionRange::new(9, 12)]);
        assert_eq!(v.selection().main(), SelectionRange::new(9, 12));

        v.insert_text("X");
        assert_eq!(v.text(), "aXef\n\naXef");
    }

    #[test]
    fn test_backspace_joins_lines() {
        let mut v = view("a\nb", Language::Markdown);
        v.dispatch(Transaction::select(Selection::cursor(2)));
        assert!(v.handle_key(Key::special(special::BACKSPACE)));
        assert_eq!(v.text(), "ab");
        assert_eq!(v.selection().main(), SelectionRange::cursor(1));
    }

    #[test]
    fn test_tab_indents_selected_lines() {
        let mut v = view("a\nb", Language::Python);
        v.select_all();
        assert!(v.handle_key(Key::special(special::TAB)));
        assert_eq!(v.text(), "    a\n    b");
        assert!(v.handle_key(Key::special(special::TAB).with_shift()));
        assert_eq!(v.text(), "a\nb");
    }

    #[test]
    fn test_enter_indents_python_block() {
        let mut v = view("if x:", Language::Python);
        v.dispatch(Transaction::select(Selection::cursor(5)));
        v.handle_key(Key::special(special::ENTER));
        assert_eq!(v.text(), "if x:\n    ");
        for ch in "pass".chars() {
            v.handle_key(Key::char(ch));
        }
        v.handle_key(Key::special(special::ENTER));
        for ch in "else:".chars() {
            v.handle_key(Key::char(ch));
        }
        assert_eq!(v.text(), "if x:\n    pass\nelse:");
    }

    #[test]
    fn test_closing_brace_reindents() {
        let mut v = view("function f() {\n  x();\n  ", Language::JavaScript);
        v.dispatch(Transaction::select(Selection::cursor(v.document().len())));
        v.insert_text("}");
        assert_eq!(v.text(), "function f() {\n  x();\n}");
    }

    #[test]
    fn test_fold_and_unfold() {
        let mut v = view("def f():\n    a\n    b\nc", Language::Python);
        assert!(v.fold_code());
        assert_eq!(v.folds(), &[FoldRange { start_line: 0, end_line: 2 }]);
        assert_eq!(v.visible_lines(), vec![0, 3]);

        // Cursor skips the folded lines
        v.move_line(true, false);
        assert_eq!(v.document().offset_to_pos(v.selection().main().head).line, 3);

        let deco = v.decorations();
        assert_eq!(deco.fold_markers, vec![(0, FoldMarker::Folded)]);

        v.dispatch(Transaction::select(Selection::cursor(0)));
        assert!(v.unfold_code());
        assert!(v.folds().is_empty());
    }

    #[test]
    fn test_fold_markdown_heading() {
        let mut v = view("# Title\nbody\n# Next", Language::Markdown);
        assert!(v.fold_all());
        assert_eq!(v.visible_lines(), vec![0, 2]);
        assert!(v.unfold_all());
    }

    #[test]
    fn test_edit_inside_fold_drops_it() {
        let mut v = view("def f():\n    a\n    b\nc", Language::Python);
        v.fold_code();
        v.dispatch(Transaction::insert(12, "x"));
        assert!(v.folds().is_empty());
    }

    #[test]
    fn test_bracket_decoration() {
        let mut v = view("f(x)", Language::JavaScript);
        v.dispatch(Transaction::select(Selection::cursor(4)));
        let bracket = v.decorations().bracket.unwrap();
        assert_eq!(bracket.start, (3, 4));
        assert_eq!(bracket.end, Some((1, 2)));
        assert!(bracket.matched);

        assert!(v.cursor_matching_bracket());
        assert_eq!(v.selection().main(), SelectionRange::cursor(1));
    }

    #[test]
    fn test_drop_cursor_and_drop() {
        let mut v = view("ab", Language::Markdown);
        assert!(v.set_drop_cursor(Some(1)));
        assert_eq!(v.decorations().drop_cursor, Some(1));
        v.drop_text(1, "XY");
        assert_eq!(v.text(), "aXYb");
        assert_eq!(v.selection().main(), SelectionRange::new(1, 3));
        assert_eq!(v.drop_cursor(), None);
    }

    #[test]
    fn test_crosshair_needs_extension_and_modifier() {
        let mut v = view("", Language::Markdown);
        assert_eq!(v.pointer_style(), PointerStyle::Text);
        v.set_modifier_held(true);
        assert_eq!(v.pointer_style(), PointerStyle::Crosshair);

        let mut plain =
            EditorView::new("", vec![Extension::Language(Language::Markdown)], &MountTarget::new())
                .unwrap();
        plain.set_modifier_held(true);
        assert_eq!(plain.pointer_style(), PointerStyle::Text);
    }

    #[test]
    fn test_decorations_follow_extensions() {
        let mut v = view("one\u{200b}\ntwo one", Language::Markdown);
        v.dispatch(Transaction::select(Selection::single(SelectionRange::new(0, 3))));
        let deco = v.decorations();
        assert_eq!(deco.active_lines, vec![0]);
        assert_eq!(deco.active_gutter_lines, vec![0]);
        assert_eq!(deco.special_chars.len(), 1);
        assert_eq!(deco.selection_matches, vec![(11, 14)]);
        assert!(deco.line_numbers.is_none());

        let bare = EditorView::new(
            "one\u{200b}",
            vec![Extension::Language(Language::Markdown), Extension::LineNumbers],
            &MountTarget::new(),
        )
        .unwrap();
        let deco = bare.decorations();
        assert!(deco.active_lines.is_empty());
        assert!(deco.special_chars.is_empty());
        assert_eq!(deco.line_numbers.unwrap()[0].label, "1");
    }

    #[test]
    fn test_drop_detaches_surface() {
        let mount = MountTarget::new();
        let v = EditorView::new("", vec![Extension::Language(Language::Python)], &mount).unwrap();
        assert_eq!(mount.surface_count(), 1);
        assert_eq!(v.mount().id(), mount.id());
        drop(v);
        assert_eq!(mount.surface_count(), 0);
    }

    #[test]
    fn test_failed_construction_registers_nothing() {
        let mount = MountTarget::new();
        assert!(EditorView::new("", vec![], &mount).is_err());
        assert_eq!(mount.surface_count(), 0);
    }

    #[test]
    fn test_gutter_click_toggles_fold() {
        let mut v = view("# A\ntext\n# B\nmore", Language::Markdown);
        assert!(v.toggle_fold_at(0));
        assert_eq!(v.visible_lines(), vec![0, 2, 3]);
        assert!(v.toggle_fold_at(0));
        assert!(v.folds().is_empty());
        assert!(!v.toggle_fold_at(1));
    }

    #[test]
    fn test_edit_without_history() {
        let mut v = view("", Language::Markdown);
        v.dispatch(Transaction::insert(0, "x").without_history());
        assert_eq!(v.text(), "x");
        assert!(!v.can_undo());
    }

    #[test]
    fn test_undo_after_out_of_range_edit() {
        let mut v = view("ab", Language::Markdown);
        v.dispatch(Transaction::insert(100, "x"));
        assert_eq!(v.text(), "abx");
        assert!(v.undo());
        assert_eq!(v.text(), "ab");

        let mut v = view("é!", Language::Markdown);
        v.dispatch(Transaction::insert(1, "x"));
        assert_eq!(v.text(), "xé!");
        assert!(v.undo());
        assert_eq!(v.text(), "é!");
    }

    #[test]
    fn test_reindent_joins_typing_undo_step() {
        let mut v = view("function f() {\n  x();\n  ", Language::JavaScript);
        v.dispatch(Transaction::select(Selection::cursor(v.document().len())));
        v.insert_text("}");
        assert_eq!(v.text(), "function f() {\n  x();\n}");
        assert_eq!(v.selection().main(), SelectionRange::cursor(v.document().len()));
        assert!(v.undo());
        assert_eq!(v.text(), "function f() {\n  x();\n  ");
        assert!(!v.can_undo());
    }
}
