//! Terminal adapters
//!
//! Bridges process stdio to the harness seams: byte input becomes a
//! [`KeySource`], and any `io::Write` becomes a `fmt::Write` console.

use hal::KeySource;
use input_types::KeyEvent;
use std::fmt;
use std::io::{self, Read, Write};

/// Key source reading raw bytes from a stream
///
/// Mapping:
/// - `0x1B` becomes Escape
/// - `\r` or `\n` becomes Enter (a `\n` directly after `\r` is dropped)
/// - `0x08` and `0x7F` become Backspace
/// - UTF-8 sequences become one key per UTF-16 code unit; a sequence cut
///   short by a non-continuation byte becomes U+FFFD and that byte is read
///   again as the next key
/// - End of input or a read error becomes Escape, so the menu always exits
pub struct ByteKeySource<R> {
    reader: R,
    pending: Vec<u16>,
    held: Option<u8>,
    last_was_cr: bool,
    exhausted: bool,
}

impl<R: Read> ByteKeySource<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            pending: Vec::new(),
            held: None,
            last_was_cr: false,
            exhausted: false,
        }
    }

    /// Returns true once end of input has been reached
    pub fn is_exhausted(&self) -> bool {
        self.exhausted
    }

    fn read_byte(&mut self) -> Option<u8> {
        if let Some(byte) = self.held.take() {
            return Some(byte);
        }
        let mut byte = [0u8; 1];
        loop {
            match self.reader.read(&mut byte) {
                Ok(0) => return None,
                Ok(_) => return Some(byte[0]),
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(_) => return None,
            }
        }
    }

    fn decode(&mut self, lead: u8) -> Option<char> {
        let len = match lead {
            0x00..=0x7F => return Some(char::from(lead)),
            0xC0..=0xDF => 2,
            0xE0..=0xEF => 3,
            0xF0..=0xF7 => 4,
            _ => return Some(char::REPLACEMENT_CHARACTER),
        };
        let mut buf = [lead, 0, 0, 0];
        for slot in buf.iter_mut().take(len).skip(1) {
            let byte = self.read_byte()?;
            if !(0x80..=0xBF).contains(&byte) {
                self.held = Some(byte);
                return Some(char::REPLACEMENT_CHARACTER);
            }
            *slot = byte;
        }
        Some(
            std::str::from_utf8(&buf[..len])
                .ok()
                .and_then(|s| s.chars().next())
                .unwrap_or(char::REPLACEMENT_CHARACTER),
        )
    }
}

impl<R: Read> KeySource for ByteKeySource<R> {
    fn wait_for_key(&mut self) -> KeyEvent {
        if let Some(unit) = self.pending.pop() {
            return KeyEvent::unit(unit);
        }

        loop {
            let Some(byte) = self.read_byte() else {
                self.exhausted = true;
                return KeyEvent::escape();
            };

            let after_cr = std::mem::replace(&mut self.last_was_cr, byte == b'\r');
            match byte {
                0x1B => return KeyEvent::escape(),
                b'\n' if after_cr => continue,
                b'\r' | b'\n' => return KeyEvent::enter(),
                0x08 | 0x7F => return KeyEvent::backspace(),
                lead => {
                    let Some(ch) = self.decode(lead) else {
                        self.exhausted = true;
                        return KeyEvent::escape();
                    };
                    let mut units = [0u16; 2];
                    let encoded = ch.encode_utf16(&mut units);
                    // Surrogate pairs are delivered high unit first
                    if let [high, low] = *encoded {
                        self.pending.push(low);
                        return KeyEvent::unit(high);
                    }
                    return KeyEvent::unit(encoded[0]);
                }
            }
        }
    }
}

/// Console writing text to an `io::Write` sink
///
/// Every write is flushed so echoed keys appear immediately.
pub struct IoConsole<W> {
    inner: W,
}

impl<W: Write> IoConsole<W> {
    pub fn new(inner: W) -> Self {
        Self { inner }
    }

    pub fn into_inner(self) -> W {
        self.inner
    }
}

impl<W: Write> fmt::Write for IoConsole<W> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.inner.write_all(s.as_bytes()).map_err(|_| fmt::Error)?;
        self.inner.flush().map_err(|_| fmt::Error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fmt::Write as _;

    fn keys_from(bytes: &[u8], count: usize) -> Vec<KeyEvent> {
        let mut source = ByteKeySource::new(bytes);
        (0..count).map(|_| source.wait_for_key()).collect()
    }

    #[test]
    fn test_control_bytes() {
        assert_eq!(
            keys_from(b"a\x08\x7f\x1b", 4),
            vec![
                KeyEvent::char('a'),
                KeyEvent::backspace(),
                KeyEvent::backspace(),
                KeyEvent::escape(),
            ]
        );
    }

    #[test]
    fn test_crlf_is_one_enter() {
        assert_eq!(
            keys_from(b"n\r\nf\n", 4),
            vec![
                KeyEvent::char('n'),
                KeyEvent::enter(),
                KeyEvent::char('f'),
                KeyEvent::enter(),
            ]
        );
    }

    #[test]
    fn test_eof_reads_as_escape() {
        let mut source = ByteKeySource::new(&b""[..]);
        assert_eq!(source.wait_for_key(), KeyEvent::escape());
        assert!(source.is_exhausted());
        assert_eq!(source.wait_for_key(), KeyEvent::escape());
    }

    #[test]
    fn test_utf8_decoding() {
        let text = "\u{3042}\u{1F600}";
        let keys = keys_from(text.as_bytes(), 3);
        let expected: Vec<KeyEvent> = text.encode_utf16().map(KeyEvent::unit).collect();
        assert_eq!(keys, expected);
    }

    #[test]
    fn test_truncated_utf8_is_escape() {
        assert_eq!(keys_from(&[0xE3, 0x81], 1), vec![KeyEvent::escape()]);
    }

    #[test]
    fn test_cut_short_utf8_keeps_next_byte() {
        assert_eq!(
            keys_from(&[0xC3, b'f', 0xE3, 0x81, b'\r', b'\n'], 4),
            vec![
                KeyEvent::unit(0xFFFD),
                KeyEvent::char('f'),
                KeyEvent::unit(0xFFFD),
                KeyEvent::enter(),
            ]
        );
    }

    #[test]
    fn test_io_console_writes_through() {
        let mut console = IoConsole::new(Vec::new());
        write!(console, "Status - {}", 3).unwrap();
        assert_eq!(console.into_inner(), b"Status - 3");
    }
}
