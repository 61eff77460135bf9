//! # Key Script Parser
//!
//! Provides a simple scripted key format for deterministic runs and demos.
//!
//! ## Format
//!
//! Scripts are line-based, with each line producing one or more keys:
//! - Key names: `Enter`, `Esc`/`Escape`, `Backspace`, `Tab`, `Space`
//! - Scan keys: `Up`, `Down`, `Left`, `Right`, `Home`, `End`, `F1`..`F12`
//! - Width directives: `Wide`, `Narrow`
//! - Single characters: `f`, `N`, `7`
//! - Text strings: `"Hello"` (expanded to one key per character)
//! - Raw code units: `U+3042`
//! - Comments: `# whole line` or `key  # trailing`
//!
//! ## Example
//!
//! ```text
//! # Show support, then run a normal dispatch
//! s
//! n        # declared length
//! Esc
//! ```

use input_types::{KeyEvent, ScanCode, CHAR_TAB, NARROW_CHAR, WIDE_CHAR};
use thiserror::Error;

/// Key script error types
#[derive(Debug, Error, PartialEq, Eq)]
pub enum InputScriptError {
    #[error("Invalid key name: {0}")]
    InvalidKeyName(String),

    #[error("Invalid code unit: {0}")]
    InvalidCodeUnit(String),

    #[error("Parse error at line {line}: {message}")]
    ParseError { line: usize, message: String },

    #[error("Empty script")]
    EmptyScript,
}

/// Parsed key script
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputScript {
    keys: Vec<KeyEvent>,
}

impl InputScript {
    /// Parses a script from text
    pub fn from_text(text: &str) -> Result<Self, InputScriptError> {
        let mut keys = Vec::new();

        for (index, raw) in text.lines().enumerate() {
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let parsed = Self::parse_line(line).map_err(|e| InputScriptError::ParseError {
                line: index + 1,
                message: e.to_string(),
            })?;
            keys.extend(parsed);
        }

        if keys.is_empty() {
            return Err(InputScriptError::EmptyScript);
        }

        Ok(Self { keys })
    }

    pub fn keys(&self) -> &[KeyEvent] {
        &self.keys
    }

    pub fn into_keys(self) -> Vec<KeyEvent> {
        self.keys
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    fn parse_line(line: &str) -> Result<Vec<KeyEvent>, InputScriptError> {
        if let Some(rest) = line.strip_prefix('"') {
            let end = rest
                .rfind('"')
                .ok_or_else(|| InputScriptError::InvalidKeyName(line.to_string()))?;
            let text = &rest[..end];
            return Ok(text.encode_utf16().map(KeyEvent::unit).collect());
        }

        let token = match line.find(" #") {
            Some(pos) => line[..pos].trim_end(),
            None => line,
        };
        Self::parse_token(token).map(|key| vec![key])
    }

    fn parse_token(token: &str) -> Result<KeyEvent, InputScriptError> {
        if let Some(hex) = token
            .strip_prefix("U+")
            .or_else(|| token.strip_prefix("u+"))
        {
            let unit = u16::from_str_radix(hex, 16)
                .map_err(|_| InputScriptError::InvalidCodeUnit(token.to_string()))?;
            return Ok(KeyEvent::unit(unit));
        }

        let mut chars = token.chars();
        if let (Some(ch), None) = (chars.next(), chars.next()) {
            return Ok(KeyEvent::char(ch));
        }

        let key = match token.to_ascii_lowercase().as_str() {
            "enter" | "return" => KeyEvent::enter(),
            "esc" | "escape" => KeyEvent::escape(),
            "backspace" => KeyEvent::backspace(),
            "tab" => KeyEvent::unit(CHAR_TAB),
            "space" => KeyEvent::char(' '),
            "wide" => KeyEvent::unit(WIDE_CHAR),
            "narrow" => KeyEvent::unit(NARROW_CHAR),
            "up" => KeyEvent::scan(ScanCode::UP),
            "down" => KeyEvent::scan(ScanCode::DOWN),
            "left" => KeyEvent::scan(ScanCode::LEFT),
            "right" => KeyEvent::scan(ScanCode::RIGHT),
            "home" => KeyEvent::scan(ScanCode::HOME),
            "end" => KeyEvent::scan(ScanCode::END),
            "insert" => KeyEvent::scan(ScanCode::INSERT),
            "delete" => KeyEvent::scan(ScanCode::DELETE),
            "pageup" => KeyEvent::scan(ScanCode::PAGE_UP),
            "pagedown" => KeyEvent::scan(ScanCode::PAGE_DOWN),
            name => match Self::function_key(name) {
                Some(scan) => KeyEvent::scan(scan),
                None => return Err(InputScriptError::InvalidKeyName(token.to_string())),
            },
        };
        Ok(key)
    }

    fn function_key(name: &str) -> Option<ScanCode> {
        let n: u16 = name.strip_prefix('f')?.parse().ok()?;
        (1..=12)
            .contains(&n)
            .then(|| ScanCode(ScanCode::F1.raw() + n - 1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_menu_script() {
        let script = InputScript::from_text("# demo\ns\nn   # normal\n\nEsc\n").unwrap();
        assert_eq!(
            script.keys(),
            &[KeyEvent::char('s'), KeyEvent::char('n'), KeyEvent::escape()]
        );
    }

    #[test]
    fn test_quoted_text_and_directives() {
        let script = InputScript::from_text("Wide\n\"ab\"\nNarrow\nU+3042\nBackspace\nEnter").unwrap();
        assert_eq!(
            script.into_keys(),
            vec![
                KeyEvent::unit(WIDE_CHAR),
                KeyEvent::char('a'),
                KeyEvent::char('b'),
                KeyEvent::unit(NARROW_CHAR),
                KeyEvent::unit(0x3042),
                KeyEvent::backspace(),
                KeyEvent::enter(),
            ]
        );
    }

    #[test]
    fn test_quoted_hash_is_text() {
        let script = InputScript::from_text("\"a #b\"").unwrap();
        assert_eq!(script.len(), 4);
    }

    #[test]
    fn test_function_keys() {
        let script = InputScript::from_text("F1\nf12").unwrap();
        assert_eq!(
            script.keys(),
            &[KeyEvent::scan(ScanCode::F1), KeyEvent::scan(ScanCode::F12)]
        );
        assert!(InputScript::from_text("F13").is_err());
    }

    #[test]
    fn test_errors_carry_line_numbers() {
        assert_eq!(
            InputScript::from_text("f\nBogus"),
            Err(InputScriptError::ParseError {
                line: 2,
                message: "Invalid key name: Bogus".to_string(),
            })
        );
        assert!(matches!(
            InputScript::from_text("U+XYZ"),
            Err(InputScriptError::ParseError { line: 1, .. })
        ));
        assert_eq!(
            InputScript::from_text("# nothing\n"),
            Err(InputScriptError::EmptyScript)
        );
    }
}
