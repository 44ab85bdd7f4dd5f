//! Miscellaneous commands

use crate::view::EditorView;

pub fn select_all(view: &mut EditorView) -> bool {
    view.select_all()
}

pub fn cursor_matching_bracket(view: &mut EditorView) -> bool {
    view.cursor_matching_bracket()
}
