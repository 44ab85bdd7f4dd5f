//! Error types for richedit

use thiserror::Error;

use crate::theme::ColorRole;

/// Result type alias for richedit operations
pub type Result<T> = std::result::Result<T, EditorError>;

/// Everything that can go wrong building or configuring an editor
#[derive(Error, Debug)]
pub enum EditorError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config error: {0}")]
    Config(#[from] toml::de::Error),

    #[error("Palette '{palette}' has no color for role '{role}'")]
    MissingColorRole { palette: String, role: ColorRole },

    #[error("Invalid color: {0}")]
    InvalidColor(String),

    #[error("Mount target {0} is detached")]
    DetachedMount(u64),

    #[error("Malformed extension list: {0}")]
    Composition(String),
}
