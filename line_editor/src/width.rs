//! Display-width calculation for directive-marked strings
//!
//! A string may switch between narrow and wide interpretation inline. The
//! directive markers themselves occupy no cells; every other code unit costs
//! one cell in narrow mode and two in wide mode. Narrow is the initial mode.
//! The terminator always adds exactly one cell.

use core::fmt;
use input_types::{CHAR_NULL, NARROW_CHAR, WIDE_CHAR};

/// Errors from the checked width entry point
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WidthError {
    /// No string was supplied
    InvalidArgument,
}

impl fmt::Display for WidthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidArgument => write!(f, "invalid argument: no string supplied"),
        }
    }
}

/// Returns the width of `units` in display cells, terminator included
///
/// Scanning stops at the first [`CHAR_NULL`]; a slice without one is treated
/// as terminated at its end.
pub fn display_width(units: &[u16]) -> usize {
    let mut cells = 0;
    let mut cost = 1;

    for &unit in units {
        match unit {
            CHAR_NULL => break,
            NARROW_CHAR => cost = 1,
            WIDE_CHAR => cost = 2,
            _ => cells += cost,
        }
    }

    cells + 1
}

/// [`display_width`] with an explicit check for an absent string
pub fn checked_display_width(units: Option<&[u16]>) -> Result<usize, WidthError> {
    units.map(display_width).ok_or(WidthError::InvalidArgument)
}

/// Storage size in bytes of a UTF-16 string of the given width
pub fn storage_size(units: &[u16]) -> usize {
    display_width(units) * core::mem::size_of::<u16>()
}
