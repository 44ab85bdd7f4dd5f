//! Folding commands

use crate::view::EditorView;

pub fn fold_code(view: &mut EditorView) -> bool {
    view.fold_code()
}

pub fn unfold_code(view: &mut EditorView) -> bool {
    view.unfold_code()
}

pub fn fold_all(view: &mut EditorView) -> bool {
    view.fold_all()
}

pub fn unfold_all(view: &mut EditorView) -> bool {
    view.unfold_all()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extension::Extension;
    use crate::fold::FoldRange;
    use crate::language::Language;
    use crate::mount::MountTarget;

    const SOURCE: &str = "def f():\n    return 1\n\ndef g():\n    return 2";

    fn view(extensions: Vec<Extension>) -> EditorView {
        let mut extensions = extensions;
        extensions.push(Extension::Language(Language::Python));
        EditorView::new(SOURCE, extensions, &MountTarget::new()).unwrap()
    }

    #[test]
    fn test_fold_at_cursor() {
        let mut v = view(vec![Extension::FoldGutter]);
        assert!(fold_code(&mut v));
        assert_eq!(v.folds(), &[FoldRange { start_line: 0, end_line: 1 }]);
        assert!(unfold_code(&mut v));
        assert!(v.folds().is_empty());
    }

    #[test]
    fn test_fold_all_and_unfold_all() {
        let mut v = view(vec![Extension::FoldGutter]);
        assert!(fold_all(&mut v));
        assert_eq!(v.folds().len(), 2);
        assert_eq!(v.visible_lines(), vec![0, 2, 3]);
        assert!(unfold_all(&mut v));
        assert!(!unfold_all(&mut v));
    }

    #[test]
    fn test_fold_requires_gutter() {
        let mut v = view(Vec::new());
        assert!(!fold_code(&mut v));
        assert!(!fold_all(&mut v));
    }
}
