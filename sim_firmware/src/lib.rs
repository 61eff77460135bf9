//! # Simulated Firmware
//!
//! This crate provides an in-process stand-in for the firmware environment
//! the harness runs in.
//!
//! ## Purpose
//!
//! The simulated firmware allows testing harness behavior without a platform:
//! - Runs under `cargo test`
//! - Deterministic (scripted keys, no real devices)
//! - Inspectable (every processing call and produced handle is visible)
//!
//! ## Philosophy
//!
//! **Testability is a first-class design constraint.**
//!
//! The processing service here is not a mock that returns canned values. It
//! decodes the volume header from simulated memory and checks it the way a
//! firmware core would, so the fuzz length actually trips a bounds check.

pub mod dxe;
pub mod fault_injection;
pub mod hob;
pub mod memory;
pub mod test_utils;
pub mod volume;

pub use dxe::{ProcessedVolume, SimulatedDxe};
pub use fault_injection::{FaultInjector, FaultPlan, ServiceFault};
pub use hob::{EmptyHandoff, HandoffList, HobListBuilder};
pub use memory::SimulatedMemory;
pub use test_utils::{FlakyKeyboard, ScriptedKeySource};
pub use volume::FirmwareVolumeBuilder;

use firmware_types::HobError;

/// Physical address of the volume in [`SimulatedPlatform::standard`]
pub const STANDARD_FV_BASE: u64 = 0x8000_0000;

/// Size of the volume in [`SimulatedPlatform::standard`]
pub const STANDARD_FV_LENGTH: u64 = 0x4000;

/// Physical address of the hand-off list in [`SimulatedPlatform::standard`]
pub const STANDARD_HOB_BASE: u64 = 0x0010_0000;

/// Memory plus the hand-off list describing it
pub struct SimulatedPlatform {
    pub memory: SimulatedMemory,
    pub handoff: HandoffList,
}

impl SimulatedPlatform {
    /// One valid firmware volume, described by one FV record
    pub fn standard() -> Result<Self, HobError> {
        let image = FirmwareVolumeBuilder::new(STANDARD_FV_LENGTH).build();
        let hobs = HobListBuilder::new()
            .firmware_volume(STANDARD_FV_BASE, STANDARD_FV_LENGTH)
            .build();

        let mut memory = SimulatedMemory::new();
        memory.map(STANDARD_FV_BASE, image);
        memory.map(STANDARD_HOB_BASE, hobs.clone());

        Ok(Self {
            memory,
            handoff: HandoffList::new(hobs)?,
        })
    }

    /// Creates a processing service over this platform's memory
    pub fn dxe(&self) -> SimulatedDxe<&SimulatedMemory> {
        SimulatedDxe::new(&self.memory)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use firmware_types::{FirmwareVolumeService, HandoffRecords, Status};

    #[test]
    fn test_standard_platform() {
        let platform = SimulatedPlatform::standard().unwrap();
        let volume = platform.handoff.find_firmware_volume().unwrap();
        assert_eq!(volume.base_address, STANDARD_FV_BASE);
        assert_eq!(volume.length, STANDARD_FV_LENGTH);

        let mut dxe = platform.dxe();
        assert!(dxe
            .process_firmware_volume(STANDARD_FV_BASE, STANDARD_FV_LENGTH)
            .is_ok());
        assert_eq!(
            dxe.process_firmware_volume(STANDARD_FV_BASE, u64::from(u32::MAX)),
            Err(Status::InvalidParameter)
        );
    }
}
