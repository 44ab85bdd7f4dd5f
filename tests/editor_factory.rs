use std::cell::RefCell;
use std::rc::Rc;

use richedit::highlight::{Tag, TagKind};
use richedit::input::Key;
use richedit::theme::Color;
use richedit::{
    create_rich_editor, select_extensions, EditorError, EditorOptions, EditorView, Extension,
    ExtensionKind, Language, MountTarget, Selection, Theme, Transaction,
};

fn recorder() -> (Rc<RefCell<Vec<String>>>, EditorOptions) {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    let options =
        EditorOptions::new().on_update(move |text| sink.borrow_mut().push(text.to_string()));
    (seen, options)
}

fn editor_at_end(text: &str, language: Language) -> (Rc<RefCell<Vec<String>>>, EditorView) {
    let (seen, options) = recorder();
    let mut view =
        create_rich_editor(&MountTarget::new(), text, options.language(language)).unwrap();
    view.dispatch(Transaction::select(Selection::cursor(text.len())));
    (seen, view)
}

fn grammar_count(extensions: &[Extension]) -> usize {
    extensions
        .iter()
        .filter(|e| matches!(e, Extension::Language(_)))
        .count()
}

#[test]
fn test_one_grammar_per_language() {
    for (name, expected) in [
        ("python", Language::Python),
        ("javascript", Language::JavaScript),
        ("markdown", Language::Markdown),
        ("haskell", Language::Markdown),
    ] {
        let options = EditorOptions::new().with_language_name(name);
        assert_eq!(grammar_count(&select_extensions(options)), 1);

        let mount = MountTarget::new();
        let options = EditorOptions::new().with_language_name(name);
        let view = create_rich_editor(&mount, "", options).unwrap();
        assert_eq!(view.language(), expected, "language for {name}");
    }
}

#[test]
fn test_markdown_is_default() {
    let options = EditorOptions::new();
    assert_eq!(options.language, Language::Markdown);
    let extensions = select_extensions(options);
    assert!(extensions
        .iter()
        .any(|e| matches!(e, Extension::Language(Language::Markdown))));
}

#[test]
fn test_line_numbers_iff_flag() {
    let mount = MountTarget::new();
    let options = EditorOptions::new().show_line_numbers(true);
    let with = create_rich_editor(&mount, "a\nb", options).unwrap();
    let without = create_rich_editor(&mount, "a\nb", EditorOptions::new()).unwrap();

    assert!(with.has_extension(ExtensionKind::LineNumbers));
    assert!(!without.has_extension(ExtensionKind::LineNumbers));

    let labels = with.decorations().line_numbers.unwrap();
    assert_eq!(labels.len(), 2);
    assert_eq!(labels[1].label, "2");
    assert!(without.decorations().line_numbers.is_none());
}

#[test]
fn test_callback_receives_full_text() {
    let (seen, options) = recorder();
    let mount = MountTarget::new();
    let mut view = create_rich_editor(&mount, "", options).unwrap();

    view.insert_text("a");
    view.handle_key(Key::char('b'));

    assert_eq!(*seen.borrow(), vec!["a".to_string(), "ab".to_string()]);
}

#[test]
fn test_selection_only_never_fires() {
    let (seen, options) = recorder();
    let mount = MountTarget::new();
    let mut view = create_rich_editor(&mount, "hello", options).unwrap();

    view.dispatch(Transaction::select(Selection::cursor(3)));
    view.handle_key(Key::special(richedit::input::special::RIGHT));
    view.handle_key(Key::ctrl('a'));
    // Replacing text with itself is not a change either
    view.dispatch(Transaction::replace(0, 1, "h"));

    assert!(seen.borrow().is_empty());
    assert_eq!(view.selection().main().head, 5);
}

#[test]
fn test_missing_callback_is_fine() {
    let mount = MountTarget::new();
    let mut view = create_rich_editor(&mount, "", EditorOptions::new()).unwrap();
    view.insert_text("x");
    assert_eq!(view.text(), "x");
}

#[test]
fn test_keyword_and_string_colors() {
    let theme = Theme::dracula();
    let keyword = theme
        .highlight
        .style_for(Tag::new(TagKind::Keyword))
        .and_then(|s| s.color)
        .unwrap();
    let string = theme
        .highlight
        .style_for(Tag::new(TagKind::String))
        .and_then(|s| s.color)
        .unwrap();

    assert_eq!(keyword, Color::from_hex("#FF79C6").unwrap());
    assert_eq!(string, Color::from_hex("#F1FA8C").unwrap());
    assert_ne!(keyword, string);
}

#[test]
fn test_editor_paints_theme_colors() {
    let mount = MountTarget::new();
    let options = EditorOptions::new().language(Language::JavaScript);
    let view = create_rich_editor(&mount, "if (x) return \"y\";", options).unwrap();
    let decorations = view.decorations();
    let spans = &decorations.syntax[0];

    let color_at = |offset: usize| {
        spans
            .iter()
            .find(|s| s.contains(offset))
            .and_then(|s| s.style.color)
    };
    assert_eq!(color_at(0), Color::from_hex("#ff79c6"));
    assert_eq!(color_at(15), Color::from_hex("#f1fa8c"));
}

#[test]
fn test_instances_on_one_mount_are_independent() {
    let mount = MountTarget::new();
    let (seen_a, options_a) = recorder();
    let (seen_b, options_b) = recorder();
    let mut a = create_rich_editor(&mount, "", options_a).unwrap();
    let b = create_rich_editor(&mount, "shared?", options_b).unwrap();

    assert_eq!(mount.surface_count(), 2);
    assert_ne!(a.surface_id(), b.surface_id());

    a.insert_text("only a");
    assert_eq!(a.text(), "only a");
    assert_eq!(b.text(), "shared?");
    assert_eq!(seen_a.borrow().len(), 1);
    assert!(seen_b.borrow().is_empty());

    drop(a);
    assert_eq!(mount.surface_count(), 1);
    drop(b);
    assert_eq!(mount.surface_count(), 0);
}

#[test]
fn test_empty_default_editor() {
    let mount = MountTarget::new();
    let view = create_rich_editor(&mount, "", EditorOptions::new()).unwrap();
    assert_eq!(view.text(), "");
    assert_eq!(view.language(), Language::Markdown);
    assert!(view.theme().is_some());
}

#[test]
fn test_detached_mount_is_error() {
    let mount = MountTarget::detached();
    let err = create_rich_editor(&mount, "text", EditorOptions::new()).unwrap_err();
    assert!(matches!(err, EditorError::DetachedMount(id) if id == mount.id()));
    assert_eq!(mount.surface_count(), 0);
}

#[test]
fn test_composition_error_leaves_mount_untouched() {
    let mount = MountTarget::new();
    let mut extensions = select_extensions(EditorOptions::new());
    extensions.push(Extension::Language(Language::Python));
    let err = richedit::EditorView::new("", extensions, &mount).unwrap_err();
    assert!(matches!(err, EditorError::Composition(_)));
    assert_eq!(mount.surface_count(), 0);
}

#[test]
fn test_undo_restores_and_notifies() {
    let (seen, options) = recorder();
    let mount = MountTarget::new();
    let mut view = create_rich_editor(&mount, "", options).unwrap();

    view.insert_text("a");
    view.insert_text("b");
    assert!(view.handle_key(Key::ctrl('z')));
    assert_eq!(view.text(), "");
    assert_eq!(seen.borrow().last().map(String::as_str), Some(""));
}

#[test]
fn test_closing_brace_is_one_change() {
    let before = "function f() {\n  x();\n  ";
    let (seen, mut view) = editor_at_end(before, Language::JavaScript);

    view.insert_text("}");
    assert_eq!(*seen.borrow(), vec!["function f() {\n  x();\n}".to_string()]);

    assert!(view.undo());
    assert_eq!(view.text(), before);
    assert_eq!(seen.borrow().len(), 2);
}

#[test]
fn test_python_clause_dedent_is_one_change() {
    let before = "if x:\n    y()\n    else";
    let (seen, mut view) = editor_at_end(before, Language::Python);

    view.handle_key(Key::char(':'));
    assert_eq!(*seen.borrow(), vec!["if x:\n    y()\nelse:".to_string()]);

    assert!(view.undo());
    assert_eq!(view.text(), before);
}

#[test]
fn test_newline_and_indent_fires_once() {
    let (seen, mut view) = editor_at_end("if x:", Language::Python);
    view.handle_key(Key::special(richedit::input::special::ENTER));
    assert_eq!(*seen.borrow(), vec!["if x:\n    ".to_string()]);
}

#[test]
fn test_tab_over_lines_fires_once() {
    let (seen, mut view) = editor_at_end("a\nb\nc", Language::Python);
    view.handle_key(Key::ctrl('a'));
    view.handle_key(Key::special(richedit::input::special::TAB));
    assert_eq!(*seen.borrow(), vec!["    a\n    b\n    c".to_string()]);
}

#[test]
fn test_undo_and_redo_fire_once_each() {
    let (seen, mut view) = editor_at_end("", Language::Markdown);
    view.insert_text("a");
    view.insert_text("b");
    assert!(view.undo());
    assert!(view.redo());
    assert_eq!(
        *seen.borrow(),
        vec!["a".to_string(), "ab".to_string(), "".to_string(), "ab".to_string()]
    );
}
