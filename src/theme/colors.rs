//! Color values used by the theme
//!
//! Colors carry an alpha channel because several chrome surfaces are
//! translucent overlays (selection matches, the active line).

use std::fmt;

/// An RGBA color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    /// Opaque color
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 0xff }
    }

    /// Color with explicit alpha
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const TRANSPARENT: Color = Color::rgba(0, 0, 0, 0);
    pub const BLACK: Color = Color::rgb(0, 0, 0);

    /// Parse "#RRGGBB" or "#RRGGBBAA" (the '#' is optional)
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.trim_start_matches('#');
        if !hex.is_ascii() {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();

        match hex.len() {
            6 => Some(Self::rgb(channel(0)?, channel(2)?, channel(4)?)),
            8 => Some(Self::rgba(channel(0)?, channel(2)?, channel(4)?, channel(6)?)),
            _ => None,
        }
    }

    /// Same color with a different alpha
    pub const fn with_alpha(self, a: u8) -> Self {
        Self { a, ..self }
    }

    pub fn is_opaque(&self) -> bool {
        self.a == 0xff
    }

    /// Composite this color over an opaque backdrop
    pub fn over(self, backdrop: Color) -> Color {
        let a = self.a as u16;
        let mix = |fg: u8, bg: u8| ((fg as u16 * a + bg as u16 * (255 - a)) / 255) as u8;
        Color::rgb(mix(self.r, backdrop.r), mix(self.g, backdrop.g), mix(self.b, backdrop.b))
    }

    /// Convert to a crossterm color (alpha is dropped)
    pub fn to_crossterm(&self) -> crossterm::style::Color {
        crossterm::style::Color::Rgb {
            r: self.r,
            g: self.g,
            b: self.b,
        }
    }
}

impl fmt::Display for Color {
    /// Lowercase CSS hex, with the alpha byte only when not opaque
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)?;
        if !self.is_opaque() {
            write!(f, "{:02x}", self.a)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_hex_parses_rgb() {
        let color = Color::from_hex("#FF79C6").unwrap();
        assert_eq!(color, Color::rgb(0xff, 0x79, 0xc6));
        assert!(color.is_opaque());
    }

    #[test]
    fn from_hex_parses_alpha() {
        let color = Color::from_hex("#ef414644").unwrap();
        assert_eq!(color.a, 0x44);
        assert_eq!(color.to_string(), "#ef414644");
    }

    #[test]
    fn from_hex_rejects_garbage() {
        assert!(Color::from_hex("fff").is_none());
        assert!(Color::from_hex("#gggggg").is_none());
        assert!(Color::from_hex("#ééé").is_none());
    }

    #[test]
    fn transparent_over_backdrop_is_backdrop() {
        let bg = Color::rgb(0x28, 0x2a, 0x36);
        assert_eq!(Color::TRANSPARENT.over(bg), bg);
        assert_eq!(Color::rgb(1, 2, 3).over(bg), Color::rgb(1, 2, 3));
    }
}
