#![no_std]

//! # Line Editor
//!
//! Bounded single-line input for the harness.
//!
//! ## Philosophy
//!
//! - **No_std compatible**: Uses alloc but not std
//! - **Deterministic**: Same key trace => same buffer
//! - **Cells, not units**: The bound is a display width; wide runs fill it twice as fast
//! - **Owned buffer**: The edit buffer lives exactly as long as one read
//!
//! ## Design
//!
//! The crate provides:
//! - `display_width`: width of a directive-marked UTF-16 string
//! - `EditBuffer`: zero-filled storage with a cell bound
//! - `BoundedLineEditor`: key-by-key state machine
//! - `read_bounded_line`: blocking driver over a `KeySource`

extern crate alloc;

pub mod buffer;
pub mod editor;
pub mod snapshot;
pub mod width;

pub use buffer::{EditBuffer, MIN_MAX_CELLS};
pub use editor::{
    read_bounded_line, BoundedLineEditor, EditOutcome, ReadLineError, DEFAULT_MAX_CELLS,
    DEFAULT_MAX_CHARS,
};
pub use snapshot::LineSnapshot;
pub use width::{checked_display_width, display_width, storage_size, WidthError};
