//! Simulated physical memory

use hal::{MemoryError, PhysicalMemory};
use std::collections::BTreeMap;

/// Sparse physical memory made of independently mapped regions
///
/// A read must fall entirely inside one region.
#[derive(Debug, Clone, Default)]
pub struct SimulatedMemory {
    regions: BTreeMap<u64, Vec<u8>>,
}

impl SimulatedMemory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Maps `bytes` at `base`, replacing any region starting there
    pub fn map(&mut self, base: u64, bytes: Vec<u8>) {
        self.regions.insert(base, bytes);
    }

    /// Removes the region starting at `base`
    pub fn unmap(&mut self, base: u64) -> Option<Vec<u8>> {
        self.regions.remove(&base)
    }

    /// Returns a mutable view of the region starting at `base`
    pub fn region_mut(&mut self, base: u64) -> Option<&mut Vec<u8>> {
        self.regions.get_mut(&base)
    }

    /// Number of bytes readable from `address` to the end of its region
    pub fn mapped_len_from(&self, address: u64) -> u64 {
        self.regions
            .range(..=address)
            .next_back()
            .and_then(|(base, bytes)| {
                let offset = address - base;
                (offset < bytes.len() as u64).then(|| bytes.len() as u64 - offset)
            })
            .unwrap_or(0)
    }

    /// Returns true if `[address, address + len)` lies inside one region
    pub fn is_mapped(&self, address: u64, len: u64) -> bool {
        self.mapped_len_from(address) >= len
    }
}

impl PhysicalMemory for SimulatedMemory {
    fn read(&self, address: u64, buf: &mut [u8]) -> Result<(), MemoryError> {
        let len = buf.len();
        address
            .checked_add(len as u64)
            .ok_or(MemoryError::AddressOverflow(address))?;

        let (base, bytes) = self
            .regions
            .range(..=address)
            .next_back()
            .ok_or(MemoryError::InvalidAddress { address, len })?;
        let start = usize::try_from(address - base)
            .map_err(|_| MemoryError::InvalidAddress { address, len })?;
        let source = start
            .checked_add(len)
            .and_then(|end| bytes.get(start..end))
            .ok_or(MemoryError::InvalidAddress { address, len })?;

        buf.copy_from_slice(source);
        Ok(())
    }
}
