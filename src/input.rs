//! Input handling - key representation and translation

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Key modifier flags
pub mod key_flags {
    pub const CONTROL: u32 = 0x1000_0000;
    pub const ALT: u32 = 0x2000_0000;
    pub const SHIFT: u32 = 0x4000_0000;
    pub const SPECIAL: u32 = 0x8000_0000;
}

/// Codes for named (non-character) keys, used with [`key_flags::SPECIAL`]
pub mod special {
    pub const ENTER: u32 = 0x01;
    pub const TAB: u32 = 0x02;
    pub const BACKSPACE: u32 = 0x03;
    pub const DELETE: u32 = 0x04;
    pub const ESCAPE: u32 = 0x05;
    pub const HOME: u32 = 0x47;
    pub const UP: u32 = 0x48;
    pub const PAGE_UP: u32 = 0x49;
    pub const LEFT: u32 = 0x4b;
    pub const RIGHT: u32 = 0x4d;
    pub const END: u32 = 0x4f;
    pub const DOWN: u32 = 0x50;
    pub const PAGE_DOWN: u32 = 0x51;
}

/// A key press with modifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Key(pub u32);

impl Key {
    /// A plain character
    pub fn char(ch: char) -> Self {
        Key(ch as u32)
    }

    /// Ctrl plus a character (Mod- on non-Mac hosts)
    pub fn ctrl(ch: char) -> Self {
        Key(key_flags::CONTROL | ch.to_ascii_lowercase() as u32)
    }

    /// Alt plus a character
    pub fn alt(ch: char) -> Self {
        Key(key_flags::ALT | ch.to_ascii_lowercase() as u32)
    }

    /// A named key such as an arrow or Enter
    pub fn special(code: u32) -> Self {
        Key(key_flags::SPECIAL | code)
    }

    pub fn with_ctrl(self) -> Self {
        Key(self.0 | key_flags::CONTROL)
    }

    pub fn with_alt(self) -> Self {
        Key(self.0 | key_flags::ALT)
    }

    pub fn with_shift(self) -> Self {
        Key(self.0 | key_flags::SHIFT)
    }

    /// Get the raw key code
    pub fn code(&self) -> u32 {
        self.0
    }

    pub fn is_ctrl(&self) -> bool {
        self.0 & key_flags::CONTROL != 0
    }

    pub fn is_alt(&self) -> bool {
        self.0 & key_flags::ALT != 0
    }

    pub fn is_shift(&self) -> bool {
        self.0 & key_flags::SHIFT != 0
    }

    pub fn is_special(&self) -> bool {
        self.0 & key_flags::SPECIAL != 0
    }

    /// Get the base character (without modifiers)
    pub fn base_char(&self) -> Option<char> {
        if self.is_special() {
            return None;
        }
        char::from_u32(self.0 & 0x00FF_FFFF)
    }

    /// Check if this is a printable self-insert character
    pub fn is_self_insert(&self) -> bool {
        if self.0 & 0xF000_0000 != 0 {
            return false;
        }
        match char::from_u32(self.0) {
            Some(ch) => ch >= ' ' && ch != '\x7f',
            None => false,
        }
    }

    /// Human-readable name, e.g. "Ctrl-z", "Shift-Tab", "Ctrl-Alt-["
    pub fn display_name(&self) -> String {
        let mut result = String::new();
        if self.is_ctrl() {
            result.push_str("Ctrl-");
        }
        if self.is_alt() {
            result.push_str("Alt-");
        }
        if self.is_shift() {
            result.push_str("Shift-");
        }

        let base = self.0 & 0x00FF_FFFF;
        if self.is_special() {
            let name = match base {
                special::ENTER => "Enter",
                special::TAB => "Tab",
                special::BACKSPACE => "Backspace",
                special::DELETE => "Delete",
                special::ESCAPE => "Escape",
                special::HOME => "Home",
                special::UP => "ArrowUp",
                special::PAGE_UP => "PageUp",
                special::LEFT => "ArrowLeft",
                special::RIGHT => "ArrowRight",
                special::END => "End",
                special::DOWN => "ArrowDown",
                special::PAGE_DOWN => "PageDown",
                _ => return format!("{}special-0x{:02x}", result, base),
            };
            result.push_str(name);
            return result;
        }

        match char::from_u32(base) {
            Some(' ') => result.push_str("Space"),
            Some(ch) => result.push(ch),
            None => result.push_str(&format!("0x{:x}", base)),
        }
        result
    }

    /// Translate a crossterm key event
    pub fn from_event(event: KeyEvent) -> Option<Key> {
        let KeyEvent {
            code, modifiers, kind, ..
        } = event;

        // Only process key press events, ignore release and repeat
        if kind != KeyEventKind::Press {
            return None;
        }

        let ctrl = modifiers.contains(KeyModifiers::CONTROL);
        let alt = modifiers.contains(KeyModifiers::ALT);
        let shift = modifiers.contains(KeyModifiers::SHIFT);

        let key = match code {
            KeyCode::Char(ch) => {
                if !ctrl && !alt {
                    // Shift is already part of the character
                    return Some(Key::char(ch));
                }
                let mut key = Key(ch.to_ascii_lowercase() as u32);
                if shift || ch.is_ascii_uppercase() {
                    key = key.with_shift();
                }
                key
            }
            KeyCode::Enter => Key::special(special::ENTER),
            KeyCode::Tab => Key::special(special::TAB),
            KeyCode::BackTab => Key::special(special::TAB).with_shift(),
            KeyCode::Backspace => Key::special(special::BACKSPACE),
            KeyCode::Delete => Key::special(special::DELETE),
            KeyCode::Esc => Key::special(special::ESCAPE),
            KeyCode::Home => Key::special(special::HOME),
            KeyCode::End => Key::special(special::END),
            KeyCode::PageUp => Key::special(special::PAGE_UP),
            KeyCode::PageDown => Key::special(special::PAGE_DOWN),
            KeyCode::Up => Key::special(special::UP),
            KeyCode::Down => Key::special(special::DOWN),
            KeyCode::Left => Key::special(special::LEFT),
            KeyCode::Right => Key::special(special::RIGHT),
            _ => return None,
        };

        let mut key = key;
        if ctrl {
            key = key.with_ctrl();
        }
        if alt {
            key = key.with_alt();
        }
        if shift && key.is_special() {
            key = key.with_shift();
        }
        Some(key)
    }
}
