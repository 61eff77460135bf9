//! Edit buffer bounded by display width

use alloc::string::String;
use alloc::vec::Vec;

use crate::editor::ReadLineError;
use crate::width::display_width;

/// Smallest accepted bound: one narrow unit plus the terminator
pub const MIN_MAX_CELLS: usize = 2;

/// Editable UTF-16 buffer with a capacity measured in display cells
///
/// Storage is zero-filled and always holds a terminating zero after the last
/// code unit. Width directives cost no cells, so storage grows on demand;
/// the cell bound is enforced by the editor, not by the storage size.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditBuffer {
    storage: Vec<u16>,
    len: usize,
    max_cells: usize,
}

impl EditBuffer {
    /// Allocates a zero-filled buffer for `max_cells` cells
    ///
    /// Bounds below [`MIN_MAX_CELLS`] are raised to it.
    pub fn allocate(max_cells: usize) -> Result<Self, ReadLineError> {
        let max_cells = max_cells.max(MIN_MAX_CELLS);
        let mut storage = Vec::new();
        storage
            .try_reserve_exact(max_cells + 1)
            .map_err(|_| ReadLineError::OutOfResources)?;
        storage.resize(max_cells + 1, 0);
        Ok(Self {
            storage,
            len: 0,
            max_cells,
        })
    }

    /// Returns the code units entered so far
    pub fn units(&self) -> &[u16] {
        &self.storage[..self.len]
    }

    /// Returns the code units followed by the terminator
    pub fn units_with_terminator(&self) -> &[u16] {
        &self.storage[..=self.len]
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn max_cells(&self) -> usize {
        self.max_cells
    }

    /// Current display width, terminator included
    pub fn width(&self) -> usize {
        display_width(self.units())
    }

    /// Returns true if appending `unit` keeps the width within the bound
    pub fn fits(&self, unit: u16) -> bool {
        let mut cells = self.width();
        let mut cost = 1;
        // Re-derive the mode in effect at the end of the buffer
        for &existing in self.units() {
            match existing {
                input_types::NARROW_CHAR => cost = 1,
                input_types::WIDE_CHAR => cost = 2,
                _ => {}
            }
        }
        match unit {
            input_types::NARROW_CHAR | input_types::WIDE_CHAR => {}
            _ => cells += cost,
        }
        cells <= self.max_cells
    }

    /// Appends a code unit, growing storage if needed
    pub fn push(&mut self, unit: u16) -> Result<(), ReadLineError> {
        if self.len + 1 >= self.storage.len() {
            self.storage
                .try_reserve(1)
                .map_err(|_| ReadLineError::OutOfResources)?;
            self.storage.push(0);
        }
        self.storage[self.len] = unit;
        self.len += 1;
        Ok(())
    }

    /// Removes the last code unit
    pub fn pop(&mut self) -> Option<u16> {
        if self.len == 0 {
            return None;
        }
        self.len -= 1;
        let unit = self.storage[self.len];
        self.storage[self.len] = 0;
        Some(unit)
    }

    /// Zero-fills the whole storage and empties the buffer
    pub fn wipe(&mut self) {
        self.storage.iter_mut().for_each(|unit| *unit = 0);
        self.len = 0;
    }

    /// Decodes the contents, replacing unpaired surrogates
    pub fn to_string_lossy(&self) -> String {
        String::from_utf16_lossy(self.units())
    }

    #[cfg(test)]
    pub(crate) fn storage(&self) -> &[u16] {
        &self.storage
    }
}
