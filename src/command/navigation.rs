//! Navigation commands - cursor movement and selection extension

use crate::view::EditorView;

pub fn cursor_char_left(view: &mut EditorView) -> bool {
    view.move_char(false, false)
}

pub fn cursor_char_right(view: &mut EditorView) -> bool {
    view.move_char(true, false)
}

pub fn cursor_line_up(view: &mut EditorView) -> bool {
    view.move_line(false, false)
}

pub fn cursor_line_down(view: &mut EditorView) -> bool {
    view.move_line(true, false)
}

pub fn cursor_line_start(view: &mut EditorView) -> bool {
    view.move_line_boundary(false, false)
}

pub fn cursor_line_end(view: &mut EditorView) -> bool {
    view.move_line_boundary(true, false)
}

pub fn cursor_doc_start(view: &mut EditorView) -> bool {
    view.move_doc_boundary(false, false)
}

pub fn cursor_doc_end(view: &mut EditorView) -> bool {
    view.move_doc_boundary(true, false)
}

pub fn select_char_left(view: &mut EditorView) -> bool {
    view.move_char(false, true)
}

pub fn select_char_right(view: &mut EditorView) -> bool {
    view.move_char(true, true)
}

pub fn select_line_up(view: &mut EditorView) -> bool {
    view.move_line(false, true)
}

pub fn select_line_down(view: &mut EditorView) -> bool {
    view.move_line(true, true)
}

pub fn select_line_start(view: &mut EditorView) -> bool {
    view.move_line_boundary(false, true)
}

pub fn select_line_end(view: &mut EditorView) -> bool {
    view.move_line_boundary(true, true)
}

pub fn select_doc_start(view: &mut EditorView) -> bool {
    view.move_doc_boundary(false, true)
}

pub fn select_doc_end(view: &mut EditorView) -> bool {
    view.move_doc_boundary(true, true)
}
