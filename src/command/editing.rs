//! Editing commands - deletion, newlines, indentation and history

use crate::view::EditorView;

pub fn delete_char_backward(view: &mut EditorView) -> bool {
    view.delete_char_backward()
}

pub fn delete_char_forward(view: &mut EditorView) -> bool {
    view.delete_char_forward()
}

pub fn insert_newline_and_indent(view: &mut EditorView) -> bool {
    view.insert_newline_and_indent()
}

pub fn indent_more(view: &mut EditorView) -> bool {
    view.indent_more()
}

pub fn indent_less(view: &mut EditorView) -> bool {
    view.indent_less()
}

pub fn undo(view: &mut EditorView) -> bool {
    view.undo()
}

pub fn redo(view: &mut EditorView) -> bool {
    view.redo()
}
