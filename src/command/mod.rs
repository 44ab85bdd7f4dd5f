//! Key bindings and editor commands
//!
//! Commands live in submodules by category. A view's key table only binds
//! commands whose extensions are active.

mod editing;
mod folding;
mod misc;
mod navigation;

use std::collections::HashMap;

use crate::extension::{ExtensionKind, ExtensionSet, Keymap};
use crate::input::{special, Key};
use crate::view::EditorView;

/// Command function signature; returns whether the command applied
pub type CommandFn = fn(&mut EditorView) -> bool;

struct BindingEntry {
    function: CommandFn,
    name: &'static str,
}

/// Maps keys to named commands
pub struct KeyTable {
    bindings: HashMap<u32, BindingEntry>,
}

impl KeyTable {
    pub fn new() -> Self {
        Self {
            bindings: HashMap::new(),
        }
    }

    /// Create the key table for a resolved extension set
    pub fn for_extensions(extensions: &ExtensionSet) -> Self {
        let mut table = Self::new();
        if extensions.has(ExtensionKind::Keymap(Keymap::Standard)) {
            table.setup_standard(extensions);
        }
        if extensions.has(ExtensionKind::Keymap(Keymap::IndentWithTab)) {
            table.setup_indent_with_tab();
        }
        table
    }

    /// Add a key binding with command name; an existing binding is kept
    pub fn bind_named(&mut self, key: Key, cmd: CommandFn, name: &'static str) {
        self.bindings
            .entry(key.code())
            .or_insert(BindingEntry { function: cmd, name });
    }

    pub fn unbind(&mut self, key: Key) {
        self.bindings.remove(&key.code());
    }

    pub fn lookup(&self, key: Key) -> Option<CommandFn> {
        self.bindings.get(&key.code()).map(|e| e.function)
    }

    pub fn lookup_name(&self, key: Key) -> Option<&'static str> {
        self.bindings.get(&key.code()).map(|e| e.name)
    }

    /// Get all bindings as (key name, command name) pairs, sorted by command
    pub fn all_bindings(&self) -> Vec<(String, &'static str)> {
        let mut bindings: Vec<_> = self
            .bindings
            .iter()
            .map(|(&code, entry)| (Key(code).display_name(), entry.name))
            .collect();
        bindings.sort_by(|a, b| a.1.cmp(b.1).then_with(|| a.0.cmp(&b.0)));
        bindings
    }

    /// Any binding of the named command
    pub fn lookup_by_name(&self, name: &str) -> Option<CommandFn> {
        self.bindings
            .values()
            .find(|entry| entry.name == name)
            .map(|entry| entry.function)
    }

    /// Bound command names, sorted and deduplicated
    pub fn command_names(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.bindings.values().map(|entry| entry.name).collect();
        names.sort();
        names.dedup();
        names
    }

    /// Cursor motion and editing, plus the bindings of active behaviors
    fn setup_standard(&mut self, extensions: &ExtensionSet) {
        use editing::*;
        use folding::*;
        use misc::*;
        use navigation::*;

        let key = Key::special;

        // Cursor movement
        self.bind_named(key(special::LEFT), cursor_char_left, "cursorCharLeft");
        self.bind_named(key(special::RIGHT), cursor_char_right, "cursorCharRight");
        self.bind_named(key(special::UP), cursor_line_up, "cursorLineUp");
        self.bind_named(key(special::DOWN), cursor_line_down, "cursorLineDown");
        self.bind_named(key(special::HOME), cursor_line_start, "cursorLineStart");
        self.bind_named(key(special::END), cursor_line_end, "cursorLineEnd");
        self.bind_named(key(special::HOME).with_ctrl(), cursor_doc_start, "cursorDocStart");
        self.bind_named(key(special::END).with_ctrl(), cursor_doc_end, "cursorDocEnd");

        // Selection extension
        self.bind_named(key(special::LEFT).with_shift(), select_char_left, "selectCharLeft");
        self.bind_named(key(special::RIGHT).with_shift(), select_char_right, "selectCharRight");
        self.bind_named(key(special::UP).with_shift(), select_line_up, "selectLineUp");
        self.bind_named(key(special::DOWN).with_shift(), select_line_down, "selectLineDown");
        self.bind_named(key(special::HOME).with_shift(), select_line_start, "selectLineStart");
        self.bind_named(key(special::END).with_shift(), select_line_end, "selectLineEnd");
        self.bind_named(
            key(special::HOME).with_ctrl().with_shift(),
            select_doc_start,
            "selectDocStart",
        );
        self.bind_named(
            key(special::END).with_ctrl().with_shift(),
            select_doc_end,
            "selectDocEnd",
        );
        self.bind_named(Key::ctrl('a'), select_all, "selectAll");

        // Editing
        self.bind_named(key(special::BACKSPACE), delete_char_backward, "deleteCharBackward");
        self.bind_named(key(special::DELETE), delete_char_forward, "deleteCharForward");
        self.bind_named(key(special::ENTER), insert_newline_and_indent, "insertNewlineAndIndent");
        self.bind_named(Key::ctrl(']'), indent_more, "indentMore");
        self.bind_named(Key::ctrl('['), indent_less, "indentLess");

        if extensions.has(ExtensionKind::History) {
            self.bind_named(Key::ctrl('z'), undo, "undo");
            self.bind_named(Key::ctrl('y'), redo, "redo");
            self.bind_named(Key::ctrl('z').with_shift(), redo, "redo");
        }

        if extensions.has(ExtensionKind::FoldGutter) {
            self.bind_named(Key::ctrl('[').with_shift(), fold_code, "foldCode");
            self.bind_named(Key::ctrl(']').with_shift(), unfold_code, "unfoldCode");
            self.bind_named(Key::ctrl('[').with_alt(), fold_all, "foldAll");
            self.bind_named(Key::ctrl(']').with_alt(), unfold_all, "unfoldAll");
        }

        if extensions.has(ExtensionKind::BracketMatching) {
            self.bind_named(
                Key::ctrl('\\').with_shift(),
                cursor_matching_bracket,
                "cursorMatchingBracket",
            );
        }
    }

    fn setup_indent_with_tab(&mut self) {
        use editing::*;

        self.bind_named(Key::special(special::TAB), indent_more, "indentMore");
        self.bind_named(Key::special(special::TAB).with_shift(), indent_less, "indentLess");
    }
}

impl Default for KeyTable {
    fn default() -> Self {
        Self::new()
    }
}
