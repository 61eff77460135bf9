//! BoundedLineEditor state machine
//!
//! Consumes one key at a time against a single edit buffer. The editor ends on
//! submit (carriage return) or cancel (Escape); nothing else bounds it.

use alloc::string::String;
use core::fmt;

use hal::KeySource;
use input_types::{KeyEvent, CHAR_BACKSPACE, CHAR_CARRIAGE_RETURN, NARROW_CHAR, WIDE_CHAR};

use crate::buffer::EditBuffer;
use crate::snapshot::LineSnapshot;

/// Narrow characters the default bound admits
pub const DEFAULT_MAX_CHARS: usize = 11;

/// Default bound in display cells: [`DEFAULT_MAX_CHARS`] plus the terminator
pub const DEFAULT_MAX_CELLS: usize = DEFAULT_MAX_CHARS + 1;

/// Reasons a line read ends without a value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadLineError {
    /// Operator pressed Escape
    Cancelled,
    /// The edit buffer could not be allocated or grown
    OutOfResources,
}

impl fmt::Display for ReadLineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Cancelled => write!(f, "input cancelled"),
            Self::OutOfResources => write!(f, "edit buffer allocation failed"),
        }
    }
}

/// Outcome from applying a key to the editor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditOutcome {
    /// Code unit appended
    Accepted(u16),
    /// Code unit refused: it would push the width past the bound
    Rejected(u16),
    /// Last code unit removed
    Erased,
    /// Key had no effect
    Ignored,
    /// Carriage return: the line is complete
    Submitted,
    /// Escape: the line is abandoned
    Cancelled,
}

impl EditOutcome {
    /// Returns true if the editor has finished
    pub fn is_final(&self) -> bool {
        matches!(self, Self::Submitted | Self::Cancelled)
    }
}

/// Line editor bounded by display width
#[derive(Debug)]
pub struct BoundedLineEditor {
    buffer: EditBuffer,
}

impl BoundedLineEditor {
    /// Creates an editor with a freshly allocated buffer
    pub fn new(max_cells: usize) -> Result<Self, ReadLineError> {
        Ok(Self {
            buffer: EditBuffer::allocate(max_cells)?,
        })
    }

    /// Apply a key event and return the outcome
    pub fn apply_key(&mut self, key: &KeyEvent) -> Result<EditOutcome, ReadLineError> {
        if !key.is_printable() {
            return Ok(if key.is_escape() {
                EditOutcome::Cancelled
            } else {
                EditOutcome::Ignored
            });
        }

        let outcome = match key.unicode_char {
            CHAR_CARRIAGE_RETURN => EditOutcome::Submitted,
            CHAR_BACKSPACE => match self.buffer.pop() {
                Some(_) => EditOutcome::Erased,
                None => EditOutcome::Ignored,
            },
            unit => {
                // An empty buffer is trivially under the bound
                if self.buffer.is_empty() || self.buffer.fits(unit) {
                    self.buffer.push(unit)?;
                    EditOutcome::Accepted(unit)
                } else {
                    EditOutcome::Rejected(unit)
                }
            }
        };
        Ok(outcome)
    }

    pub fn buffer(&self) -> &EditBuffer {
        &self.buffer
    }

    /// Get a snapshot of editor state
    pub fn snapshot(&self) -> LineSnapshot {
        LineSnapshot {
            units: self.buffer.units().to_vec(),
            width: self.buffer.width(),
            max_cells: self.buffer.max_cells(),
        }
    }

    /// Releases the buffer, returning its contents
    pub fn submit(self) -> String {
        self.buffer.to_string_lossy()
    }

    /// Releases the buffer after zero-filling it
    pub fn cancel(mut self) {
        self.buffer.wipe();
    }
}

/// Reads one line of operator input bounded by `max_cells` display cells
///
/// Accepted characters and backspaces are echoed to `console`; rejected and
/// ignored keys are not. The buffer never outlives the call.
pub fn read_bounded_line<K, W>(
    keys: &mut K,
    console: &mut W,
    max_cells: usize,
) -> Result<String, ReadLineError>
where
    K: KeySource + ?Sized,
    W: fmt::Write + ?Sized,
{
    let mut editor = BoundedLineEditor::new(max_cells)?;

    loop {
        let key = keys.wait_for_key();
        match editor.apply_key(&key) {
            Ok(EditOutcome::Submitted) => return Ok(editor.submit()),
            Ok(EditOutcome::Cancelled) => {
                editor.cancel();
                return Err(ReadLineError::Cancelled);
            }
            Ok(EditOutcome::Accepted(unit)) => echo_unit(console, unit),
            Ok(EditOutcome::Erased) => {
                let _ = console.write_char('\u{8}');
            }
            Ok(EditOutcome::Rejected(_)) | Ok(EditOutcome::Ignored) => {}
            Err(err) => {
                editor.cancel();
                return Err(err);
            }
        }
    }
}

fn echo_unit<W: fmt::Write + ?Sized>(console: &mut W, unit: u16) {
    if unit == NARROW_CHAR || unit == WIDE_CHAR {
        return;
    }
    if let Some(ch) = char::from_u32(u32::from(unit)) {
        let _ = console.write_char(ch);
    }
}
