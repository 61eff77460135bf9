#![no_std]

//! # Input Types
//!
//! This crate defines the key event types consumed by the Breaking Boot harness.
//!
//! ## Philosophy
//!
//! - **Firmware-shaped**: A key is a UTF-16 code unit plus a scan code, exactly what
//!   a firmware text-input device delivers
//! - **Immutable**: A `KeyEvent` has no identity beyond the single read that produced it
//! - **Testable**: Events are serializable and can be injected for testing
//!
//! ## Non-Goals
//!
//! This is NOT:
//! - A key-mapping or keyboard-layout library
//! - Modifier or key-repeat tracking
//! - A complete input subsystem (just the types)

extern crate alloc;

use core::fmt;
use serde::{Deserialize, Serialize};

/// Non-printable key marker; the key's meaning is in its scan code
pub const CHAR_NULL: u16 = 0x0000;
/// Backspace control character
pub const CHAR_BACKSPACE: u16 = 0x0008;
/// Horizontal tab
pub const CHAR_TAB: u16 = 0x0009;
/// Line feed
pub const CHAR_LINEFEED: u16 = 0x000A;
/// Carriage return (submit)
pub const CHAR_CARRIAGE_RETURN: u16 = 0x000D;

/// Width directive: following code units occupy one display cell each
pub const NARROW_CHAR: u16 = 0xFFF0;
/// Width directive: following code units occupy two display cells each
pub const WIDE_CHAR: u16 = 0xFFF1;

/// Firmware scan code
///
/// Only meaningful when the key's `unicode_char` is [`CHAR_NULL`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScanCode(pub u16);

impl ScanCode {
    pub const NULL: Self = Self(0x00);
    pub const UP: Self = Self(0x01);
    pub const DOWN: Self = Self(0x02);
    pub const RIGHT: Self = Self(0x03);
    pub const LEFT: Self = Self(0x04);
    pub const HOME: Self = Self(0x05);
    pub const END: Self = Self(0x06);
    pub const INSERT: Self = Self(0x07);
    pub const DELETE: Self = Self(0x08);
    pub const PAGE_UP: Self = Self(0x09);
    pub const PAGE_DOWN: Self = Self(0x0A);
    pub const F1: Self = Self(0x0B);
    pub const F2: Self = Self(0x0C);
    pub const F3: Self = Self(0x0D);
    pub const F4: Self = Self(0x0E);
    pub const F5: Self = Self(0x0F);
    pub const F6: Self = Self(0x10);
    pub const F7: Self = Self(0x11);
    pub const F8: Self = Self(0x12);
    pub const F9: Self = Self(0x13);
    pub const F10: Self = Self(0x14);
    pub const F11: Self = Self(0x15);
    pub const F12: Self = Self(0x16);
    pub const ESC: Self = Self(0x17);

    /// Returns the raw scan code value
    pub fn raw(&self) -> u16 {
        self.0
    }

    /// Returns a human-readable name for well-known scan codes
    pub fn name(&self) -> Option<&'static str> {
        let name = match *self {
            Self::NULL => "Null",
            Self::UP => "Up",
            Self::DOWN => "Down",
            Self::RIGHT => "Right",
            Self::LEFT => "Left",
            Self::HOME => "Home",
            Self::END => "End",
            Self::INSERT => "Insert",
            Self::DELETE => "Delete",
            Self::PAGE_UP => "PageUp",
            Self::PAGE_DOWN => "PageDown",
            Self::ESC => "Esc",
            Self(code) if (Self::F1.0..=Self::F12.0).contains(&code) => {
                return Some(FUNCTION_KEY_NAMES[(code - Self::F1.0) as usize]);
            }
            _ => return None,
        };
        Some(name)
    }
}

const FUNCTION_KEY_NAMES: [&str; 12] = [
    "F1", "F2", "F3", "F4", "F5", "F6", "F7", "F8", "F9", "F10", "F11", "F12",
];

impl fmt::Display for ScanCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => write!(f, "{}", name),
            None => write!(f, "Scan({:#04x})", self.0),
        }
    }
}

/// Keyboard event
///
/// One key as delivered by the firmware text-input device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct KeyEvent {
    /// UTF-16 code unit, or [`CHAR_NULL`] for non-printable keys
    pub unicode_char: u16,
    /// Scan code; carries the meaning of non-printable keys
    pub scan_code: ScanCode,
}

impl KeyEvent {
    /// Creates a new key event
    pub const fn new(unicode_char: u16, scan_code: ScanCode) -> Self {
        Self {
            unicode_char,
            scan_code,
        }
    }

    /// Creates a printable key event from a code unit
    pub const fn unit(unicode_char: u16) -> Self {
        Self::new(unicode_char, ScanCode::NULL)
    }

    /// Creates a printable key event from a BMP character
    ///
    /// Characters outside the BMP have no single code unit and map to
    /// [`CHAR_NULL`].
    pub fn char(ch: char) -> Self {
        let mut units = [0u16; 2];
        let encoded = ch.encode_utf16(&mut units);
        let unit = if encoded.len() == 1 { encoded[0] } else { CHAR_NULL };
        Self::unit(unit)
    }

    /// Creates a non-printable key event carrying a scan code
    pub const fn scan(scan_code: ScanCode) -> Self {
        Self::new(CHAR_NULL, scan_code)
    }

    /// Escape key
    pub const fn escape() -> Self {
        Self::scan(ScanCode::ESC)
    }

    /// Carriage-return key
    pub const fn enter() -> Self {
        Self::unit(CHAR_CARRIAGE_RETURN)
    }

    /// Backspace key
    pub const fn backspace() -> Self {
        Self::unit(CHAR_BACKSPACE)
    }

    /// Returns true if this key carries a code unit
    pub fn is_printable(&self) -> bool {
        self.unicode_char != CHAR_NULL
    }

    /// Returns true if this key is the Escape scan code
    pub fn is_escape(&self) -> bool {
        self.scan_code == ScanCode::ESC
    }

    /// Returns the key's character, if it decodes to one
    pub fn as_char(&self) -> Option<char> {
        if !self.is_printable() {
            return None;
        }
        char::from_u32(u32::from(self.unicode_char))
    }
}

impl fmt::Display for KeyEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.unicode_char {
            CHAR_NULL => write!(f, "<{}>", self.scan_code),
            CHAR_CARRIAGE_RETURN => write!(f, "<Enter>"),
            CHAR_BACKSPACE => write!(f, "<Backspace>"),
            NARROW_CHAR => write!(f, "<Narrow>"),
            WIDE_CHAR => write!(f, "<Wide>"),
            _ => match self.as_char() {
                Some(ch) if !ch.is_control() => write!(f, "{}", ch),
                _ => write!(f, "U+{:04X}", self.unicode_char),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn test_printable_key() {
        let key = KeyEvent::char('f');
        assert!(key.is_printable());
        assert!(!key.is_escape());
        assert_eq!(key.unicode_char, 0x66);
        assert_eq!(key.scan_code, ScanCode::NULL);
        assert_eq!(key.as_char(), Some('f'));
    }

    #[test]
    fn test_escape_key() {
        let key = KeyEvent::escape();
        assert!(!key.is_printable());
        assert!(key.is_escape());
        assert_eq!(key.as_char(), None);
    }

    #[test]
    fn test_char_outside_bmp_is_not_printable() {
        let key = KeyEvent::char('\u{1F600}');
        assert_eq!(key.unicode_char, CHAR_NULL);
        assert!(!key.is_printable());
    }

    #[test]
    fn test_scan_code_names() {
        assert_eq!(ScanCode::ESC.name(), Some("Esc"));
        assert_eq!(ScanCode::F1.name(), Some("F1"));
        assert_eq!(ScanCode::F12.name(), Some("F12"));
        assert_eq!(ScanCode(0x42).name(), None);
        assert_eq!(ScanCode(0x42).to_string(), "Scan(0x42)");
    }

    #[test]
    fn test_key_display() {
        assert_eq!(KeyEvent::char('a').to_string(), "a");
        assert_eq!(KeyEvent::enter().to_string(), "<Enter>");
        assert_eq!(KeyEvent::backspace().to_string(), "<Backspace>");
        assert_eq!(KeyEvent::escape().to_string(), "<Esc>");
        assert_eq!(KeyEvent::unit(WIDE_CHAR).to_string(), "<Wide>");
        assert_eq!(KeyEvent::unit(0x0001).to_string(), "U+0001");
    }

    #[test]
    fn test_key_event_serialization() {
        let event = KeyEvent::scan(ScanCode::ESC);
        let json = serde_json::to_string(&event).unwrap();
        assert_eq!(json, r#"{"unicode_char":0,"scan_code":23}"#);
        let deserialized: KeyEvent = serde_json::from_str(&json).unwrap();

        assert_eq!(event, deserialized);
    }
}
