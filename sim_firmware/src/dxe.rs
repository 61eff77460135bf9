//! Simulated firmware-volume processing service
//!
//! Checks, in order:
//!
//! | Check | Status on failure |
//! |---|---|
//! | fault plan | the planned status |
//! | fixed header readable | `Invalid Parameter` |
//! | `"_FVH"` signature, header length, block map | `Volume Corrupt` |
//! | header checksum | `Volume Corrupt` |
//! | declared length fits the bound | `Bad Buffer Size` |
//! | bound lies inside mapped memory | `Invalid Parameter` |

use crate::fault_injection::{FaultInjector, FaultPlan};
use firmware_types::volume::{BLOCK_MAP_OFFSET, MIN_HEADER_LENGTH};
use firmware_types::volume::header_checksum_valid;
use firmware_types::{FirmwareVolumeHeader, FirmwareVolumeService, FvHandle, Status};
use hal::PhysicalMemory;

/// A volume the service accepted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessedVolume {
    pub handle: FvHandle,
    pub base_address: u64,
    pub length: u64,
    pub header: FirmwareVolumeHeader,
}

/// Processing service backed by simulated memory
pub struct SimulatedDxe<M> {
    memory: M,
    faults: FaultInjector,
    next_handle: u64,
    processed: Vec<ProcessedVolume>,
    calls: usize,
}

impl<M: PhysicalMemory> SimulatedDxe<M> {
    pub fn new(memory: M) -> Self {
        Self::with_faults(memory, FaultPlan::new())
    }

    pub fn with_faults(memory: M, plan: FaultPlan) -> Self {
        Self {
            memory,
            faults: FaultInjector::new(plan),
            next_handle: 1,
            processed: Vec::new(),
            calls: 0,
        }
    }

    /// Volumes accepted so far
    pub fn processed(&self) -> &[ProcessedVolume] {
        &self.processed
    }

    /// Number of processing calls received
    pub fn calls(&self) -> usize {
        self.calls
    }

    fn validate(&self, base_address: u64, length: u64) -> Result<FirmwareVolumeHeader, Status> {
        let mut fixed = vec![0u8; BLOCK_MAP_OFFSET];
        self.memory
            .read(base_address, &mut fixed)
            .map_err(|_| Status::InvalidParameter)?;

        let header_length = usize::from(u16::from_le_bytes([fixed[48], fixed[49]]));
        let mut header_bytes = vec![0u8; header_length.max(MIN_HEADER_LENGTH)];
        self.memory
            .read(base_address, &mut header_bytes)
            .map_err(|_| Status::VolumeCorrupted)?;

        let header =
            FirmwareVolumeHeader::parse(&header_bytes).map_err(|_| Status::VolumeCorrupted)?;
        if !header_checksum_valid(&header_bytes[..usize::from(header.header_length)]) {
            return Err(Status::VolumeCorrupted);
        }
        if header.fv_length > length {
            return Err(Status::BadBufferSize);
        }
        if !self.bound_is_mapped(base_address, length) {
            return Err(Status::InvalidParameter);
        }

        Ok(header)
    }

    fn bound_is_mapped(&self, base_address: u64, length: u64) -> bool {
        if length == 0 {
            return true;
        }
        let Some(last) = base_address.checked_add(length - 1) else {
            return false;
        };
        let mut byte = [0u8; 1];
        self.memory.read(last, &mut byte).is_ok()
    }
}

impl<M: PhysicalMemory> FirmwareVolumeService for SimulatedDxe<M> {
    fn process_firmware_volume(
        &mut self,
        base_address: u64,
        length: u64,
    ) -> Result<FvHandle, Status> {
        self.calls += 1;
        if let Some(status) = self.faults.check_call(length) {
            return Err(status);
        }

        let header = self.validate(base_address, length)?;
        let handle = FvHandle(self.next_handle);
        self.next_handle += 1;
        self.processed.push(ProcessedVolume {
            handle,
            base_address,
            length,
            header,
        });
        Ok(handle)
    }
}
