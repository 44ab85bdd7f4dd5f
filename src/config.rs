//! Configuration file support
//!
//! Loads settings from ~/.richedit.toml (or %USERPROFILE%\.richedit.toml on Windows)
//!
//! Example:
//! ```toml
//! # richedit configuration
//! language = "python"
//! line-numbers = true
//! indent-width = 2
//! wrap-column = 100
//! ```

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::Result;
use crate::extension::DEFAULT_INDENT_UNIT;
use crate::language::Language;

const CONFIG_FILE: &str = ".richedit.toml";

/// Configuration settings
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct Config {
    /// Language name; unknown names mean Markdown
    pub language: String,
    /// Whether to show the line-number gutter
    pub line_numbers: bool,
    /// Spaces per indentation unit
    pub indent_width: usize,
    /// Column at which the preview wraps long lines
    pub wrap_column: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            language: Language::Markdown.name().to_string(),
            line_numbers: false,
            indent_width: DEFAULT_INDENT_UNIT,
            wrap_column: 80,
        }
    }
}

impl Config {
    /// Get the config file path
    pub fn config_path() -> Option<PathBuf> {
        #[cfg(windows)]
        {
            std::env::var("USERPROFILE")
                .ok()
                .map(|home| PathBuf::from(home).join(CONFIG_FILE))
        }

        #[cfg(not(windows))]
        {
            std::env::var("HOME")
                .ok()
                .map(|home| PathBuf::from(home).join(CONFIG_FILE))
        }
    }

    /// Load configuration from the default location.
    ///
    /// A missing file yields the defaults; a malformed one is an error.
    pub fn load() -> Result<Self> {
        match Self::config_path() {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    /// Load configuration from a specific file
    pub fn load_from(path: &Path) -> Result<Self> {
        match fs::read_to_string(path) {
            Ok(contents) => Self::parse(&contents),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(e.into()),
        }
    }

    /// Parse config file contents
    pub fn parse(contents: &str) -> Result<Self> {
        let mut config: Config = toml::from_str(contents)?;
        config.indent_width = config.indent_width.clamp(1, 8);
        config.wrap_column = config.wrap_column.max(10);
        Ok(config)
    }

    /// The configured language, falling back to Markdown
    pub fn language(&self) -> Language {
        Language::resolve(Some(&self.language))
    }
}
