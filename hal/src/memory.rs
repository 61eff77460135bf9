//! Physical memory access abstraction

use thiserror::Error;

/// Errors that can occur during memory operations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MemoryError {
    /// Address range not backed by memory
    #[error("Invalid address: {address:#x} (+{len:#x})")]
    InvalidAddress { address: u64, len: usize },

    /// Address arithmetic wrapped around
    #[error("Address overflow at {0:#x}")]
    AddressOverflow(u64),
}

/// Read-only physical memory access
///
/// Firmware structures handed off from earlier boot phases live at physical
/// addresses. This trait is the only way the harness dereferences them, so a
/// missing or short mapping becomes an error instead of a fault.
pub trait PhysicalMemory {
    /// Copies `buf.len()` bytes starting at `address` into `buf`
    fn read(&self, address: u64, buf: &mut [u8]) -> Result<(), MemoryError>;

    /// Reads a little-endian `u16`
    fn read_u16(&self, address: u64) -> Result<u16, MemoryError> {
        let mut bytes = [0u8; 2];
        self.read(address, &mut bytes)?;
        Ok(u16::from_le_bytes(bytes))
    }

    /// Reads a little-endian `u32`
    fn read_u32(&self, address: u64) -> Result<u32, MemoryError> {
        let mut bytes = [0u8; 4];
        self.read(address, &mut bytes)?;
        Ok(u32::from_le_bytes(bytes))
    }

    /// Reads a little-endian `u64`
    fn read_u64(&self, address: u64) -> Result<u64, MemoryError> {
        let mut bytes = [0u8; 8];
        self.read(address, &mut bytes)?;
        Ok(u64::from_le_bytes(bytes))
    }
}

impl<M: PhysicalMemory + ?Sized> PhysicalMemory for &M {
    fn read(&self, address: u64, buf: &mut [u8]) -> Result<(), MemoryError> {
        (**self).read(address, buf)
    }
}
