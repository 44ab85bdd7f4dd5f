//! Semantic color roles and the palette that maps them to colors

use std::collections::HashMap;
use std::fmt;

use super::Color;
use crate::error::{EditorError, Result};

/// Semantic color roles consumed by the chrome and token stylesheets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ColorRole {
    Background,
    Foreground,
    Selection,
    SelectionMatch,
    Cursor,
    DropdownBackground,
    DropdownBorder,
    ActiveLine,
    MatchingBracket,
    Keyword,
    Storage,
    Variable,
    Parameter,
    Function,
    String,
    Constant,
    Type,
    Class,
    Number,
    Comment,
    Heading,
    Invalid,
    Regexp,
}

impl ColorRole {
    pub const ALL: [ColorRole; 23] = [
        ColorRole::Background,
        ColorRole::Foreground,
        ColorRole::Selection,
        ColorRole::SelectionMatch,
        ColorRole::Cursor,
        ColorRole::DropdownBackground,
        ColorRole::DropdownBorder,
        ColorRole::ActiveLine,
        ColorRole::MatchingBracket,
        ColorRole::Keyword,
        ColorRole::Storage,
        ColorRole::Variable,
        ColorRole::Parameter,
        ColorRole::Function,
        ColorRole::String,
        ColorRole::Constant,
        ColorRole::Type,
        ColorRole::Class,
        ColorRole::Number,
        ColorRole::Comment,
        ColorRole::Heading,
        ColorRole::Invalid,
        ColorRole::Regexp,
    ];

    /// Key used in color tables
    pub fn name(&self) -> &'static str {
        match self {
            ColorRole::Background => "background",
            ColorRole::Foreground => "foreground",
            ColorRole::Selection => "selection",
            ColorRole::SelectionMatch => "selectionMatch",
            ColorRole::Cursor => "cursor",
            ColorRole::DropdownBackground => "dropdownBackground",
            ColorRole::DropdownBorder => "dropdownBorder",
            ColorRole::ActiveLine => "activeLine",
            ColorRole::MatchingBracket => "matchingBracket",
            ColorRole::Keyword => "keyword",
            ColorRole::Storage => "storage",
            ColorRole::Variable => "variable",
            ColorRole::Parameter => "parameter",
            ColorRole::Function => "function",
            ColorRole::String => "string",
            ColorRole::Constant => "constant",
            ColorRole::Type => "type",
            ColorRole::Class => "class",
            ColorRole::Number => "number",
            ColorRole::Comment => "comment",
            ColorRole::Heading => "heading",
            ColorRole::Invalid => "invalid",
            ColorRole::Regexp => "regexp",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|role| role.name() == name)
    }
}

impl fmt::Display for ColorRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Dracula color table
const DRACULA: &[(&str, &str)] = &[
    ("background", "#282A36"),
    ("foreground", "#F8F8F2"),
    ("selection", "#ef4146"),
    ("selectionMatch", "#ef414644"),
    ("cursor", "#F8F8F2"),
    ("dropdownBackground", "#282A36"),
    ("dropdownBorder", "#191A21"),
    ("activeLine", "#44475A00"),
    ("matchingBracket", "#ef4146"),
    ("keyword", "#FF79C6"),
    ("storage", "#FF79C6"),
    ("variable", "#F8F8F2"),
    ("parameter", "#F8F8F2"),
    ("function", "#50FA7B"),
    ("string", "#F1FA8C"),
    ("constant", "#BD93F9"),
    ("type", "#8BE9FD"),
    ("class", "#8BE9FD"),
    ("number", "#BD93F9"),
    ("comment", "#909cc3"),
    ("heading", "#BD93F9"),
    ("invalid", "#FF5555"),
    ("regexp", "#F1FA8C"),
];

/// A named color table
#[derive(Debug, Clone)]
pub struct Palette {
    pub name: String,
    /// Whether this is a dark palette
    pub dark: bool,
    colors: HashMap<ColorRole, Color>,
}

impl Palette {
    /// Build a palette from (role name, hex) pairs.
    ///
    /// Keys that do not name a role are ignored. A recognized key with an
    /// unparseable value is an error.
    pub fn from_entries(name: &str, dark: bool, entries: &[(&str, &str)]) -> Result<Self> {
        let mut colors = HashMap::new();
        for (key, hex) in entries {
            let Some(role) = ColorRole::from_name(key) else {
                continue;
            };
            let color = Color::from_hex(hex)
                .ok_or_else(|| EditorError::InvalidColor(format!("{key} = {hex}")))?;
            colors.insert(role, color);
        }

        Ok(Self {
            name: name.to_string(),
            dark,
            colors,
        })
    }

    /// The Dracula palette with a red selection
    pub fn dracula() -> Self {
        let colors = DRACULA
            .iter()
            .filter_map(|(key, hex)| Some((ColorRole::from_name(key)?, Color::from_hex(hex)?)))
            .collect();

        Self {
            name: "dracula".to_string(),
            dark: true,
            colors,
        }
    }

    /// Look up a role. Missing roles are a configuration error.
    pub fn color(&self, role: ColorRole) -> Result<Color> {
        self.colors
            .get(&role)
            .copied()
            .ok_or_else(|| EditorError::MissingColorRole {
                palette: self.name.clone(),
                role,
            })
    }

    /// Whether every role has a color
    pub fn is_total(&self) -> bool {
        ColorRole::ALL.iter().all(|role| self.colors.contains_key(role))
    }

    pub fn set(&mut self, role: ColorRole, color: Color) {
        self.colors.insert(role, color);
    }

    pub fn remove(&mut self, role: ColorRole) -> Option<Color> {
        self.colors.remove(&role)
    }
}
