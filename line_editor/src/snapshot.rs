//! Line editor snapshot for deterministic testing

use alloc::string::String;
use alloc::vec::Vec;

#[cfg(feature = "serde_support")]
use serde::{Deserialize, Serialize};

/// Editor state at one point in a key trace
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde_support", derive(Serialize, Deserialize))]
pub struct LineSnapshot {
    pub units: Vec<u16>,
    /// Display width, terminator included
    pub width: usize,
    pub max_cells: usize,
}

impl LineSnapshot {
    /// Cells still available before the bound is reached
    pub fn remaining_cells(&self) -> usize {
        self.max_cells.saturating_sub(self.width)
    }

    pub fn text(&self) -> String {
        String::from_utf16_lossy(&self.units)
    }
}
