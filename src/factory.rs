//! Editor factory
//!
//! Builds a ready-to-use editor from a small set of options: the fixed
//! baseline of behaviors, one grammar, the optional line-number gutter and
//! the Dracula theme, in that order.

use std::fmt;

use tracing::{debug, warn};

use crate::error::Result;
use crate::extension::{Extension, Keymap, DEFAULT_INDENT_UNIT};
use crate::language::Language;
use crate::mount::MountTarget;
use crate::theme::Theme;
use crate::view::EditorView;

/// Callback receiving the complete document text after each change
pub type OnUpdate = Box<dyn FnMut(&str)>;

/// Options accepted by [`create_rich_editor`]
pub struct EditorOptions {
    pub on_update: Option<OnUpdate>,
    pub language: Language,
    pub show_line_numbers: bool,
    /// Spaces per indentation unit
    pub indent_width: usize,
}

impl Default for EditorOptions {
    fn default() -> Self {
        Self {
            on_update: None,
            language: Language::default(),
            show_line_numbers: false,
            indent_width: DEFAULT_INDENT_UNIT,
        }
    }
}

impl EditorOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_update(mut self, f: impl FnMut(&str) + 'static) -> Self {
        self.on_update = Some(Box::new(f));
        self
    }

    pub fn language(mut self, language: Language) -> Self {
        self.language = language;
        self
    }

    /// Select a language by name; names other than python and javascript
    /// mean Markdown
    pub fn with_language_name(mut self, name: &str) -> Self {
        self.language = match Language::from_name(name) {
            Some(language) => language,
            None => {
                warn!(requested = name, "unknown language, using markdown");
                Language::Markdown
            }
        };
        self
    }

    pub fn show_line_numbers(mut self, show: bool) -> Self {
        self.show_line_numbers = show;
        self
    }

    pub fn indent_width(mut self, width: usize) -> Self {
        self.indent_width = width;
        self
    }
}

impl fmt::Debug for EditorOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EditorOptions")
            .field("on_update", &self.on_update.as_ref().map(|_| "<callback>"))
            .field("language", &self.language)
            .field("show_line_numbers", &self.show_line_numbers)
            .field("indent_width", &self.indent_width)
            .finish()
    }
}

/// The ordered extension list for a set of options
pub fn select_extensions(options: EditorOptions) -> Vec<Extension> {
    let EditorOptions {
        on_update,
        language,
        show_line_numbers,
        indent_width,
    } = options;

    let mut extensions = vec![
        Extension::basic_setup(),
        Extension::LineWrapping,
        Extension::History,
        Extension::BracketMatching,
        Extension::FoldGutter,
        Extension::IndentOnInput,
        Extension::default_highlighting(),
        Extension::HighlightActiveLineGutter,
        Extension::HighlightSpecialChars,
        Extension::DropCursor,
        Extension::RectangularSelection,
        Extension::CrosshairCursor,
        Extension::Keymap(Keymap::IndentWithTab),
        Extension::IndentUnit(indent_width),
    ];

    let mut on_update = on_update;
    extensions.push(Extension::update_listener(move |update| {
        if !update.doc_changed {
            return;
        }
        if let Some(callback) = on_update.as_mut() {
            callback(&update.text());
        }
    }));

    extensions.push(Extension::Language(language));

    if show_line_numbers {
        extensions.push(Extension::LineNumbers);
    }

    extensions.push(Extension::Theme(Theme::dracula()));
    extensions
}

/// Create an editor inside `mount` holding `initial` text
pub fn create_rich_editor(
    mount: &MountTarget,
    initial: &str,
    options: EditorOptions,
) -> Result<EditorView> {
    let language = options.language;
    let line_numbers = options.show_line_numbers;
    let extensions = select_extensions(options);
    debug!(
        mount = mount.id(),
        %language,
        line_numbers,
        extensions = extensions.len(),
        "creating editor"
    );

    EditorView::new(initial, extensions, mount)
}
