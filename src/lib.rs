//! richedit - an embeddable code editor core
//!
//! Builds editor instances from an ordered list of extensions: editing
//! behaviors, one grammar (Python, JavaScript or Markdown), an optional
//! line-number gutter and the Dracula theme. [`create_rich_editor`] wires
//! the standard set together; [`EditorView`] is the live instance.

pub mod brackets;
pub mod command;
pub mod config;
pub mod decorations;
pub mod document;
pub mod error;
pub mod extension;
pub mod factory;
pub mod fold;
pub mod highlight;
pub mod history;
pub mod indent;
pub mod input;
pub mod language;
pub mod line;
pub mod mount;
pub mod render;
pub mod theme;
pub mod transaction;
pub mod view;

pub use config::Config;
pub use error::{EditorError, Result};
pub use extension::{Extension, ExtensionKind, Keymap};
pub use factory::{create_rich_editor, select_extensions, EditorOptions};
pub use language::Language;
pub use mount::MountTarget;
pub use render::Preview;
pub use theme::Theme;
pub use transaction::{Selection, SelectionRange, Transaction};
pub use view::{EditorView, ViewUpdate};
