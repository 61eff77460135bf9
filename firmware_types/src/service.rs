//! Firmware-volume processing capability
//!
//! The harness consumes exactly one firmware service: "process the volume at
//! address A, bounded by length L". What happens on the far side of this call
//! is not owned by the harness.

use crate::status::Status;
use core::fmt;

/// Opaque handle produced by a successful processing call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FvHandle(pub u64);

impl fmt::Display for FvHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Handle({:#x})", self.0)
    }
}

/// Firmware-volume processing service
///
/// Implementations must accept any `length`, including one far larger than
/// the volume, and report the outcome as a [`Status`].
pub trait FirmwareVolumeService {
    /// Processes the volume at `base_address`, bounded by `length` bytes
    fn process_firmware_volume(&mut self, base_address: u64, length: u64)
        -> Result<FvHandle, Status>;
}

impl<S: FirmwareVolumeService + ?Sized> FirmwareVolumeService for &mut S {
    fn process_firmware_volume(
        &mut self,
        base_address: u64,
        length: u64,
    ) -> Result<FvHandle, Status> {
        (**self).process_firmware_volume(base_address, length)
    }
}

impl<S: FirmwareVolumeService + ?Sized> FirmwareVolumeService for Box<S> {
    fn process_firmware_volume(
        &mut self,
        base_address: u64,
        length: u64,
    ) -> Result<FvHandle, Status> {
        (**self).process_firmware_volume(base_address, length)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Rejecting;

    impl FirmwareVolumeService for Rejecting {
        fn process_firmware_volume(&mut self, _: u64, length: u64) -> Result<FvHandle, Status> {
            if length > u64::from(u32::MAX) - 1 {
                Err(Status::InvalidParameter)
            } else {
                Ok(FvHandle(length))
            }
        }
    }

    #[test]
    fn test_handle_display() {
        assert_eq!(FvHandle(0xBEEF).to_string(), "Handle(0xbeef)");
    }

    #[test]
    fn test_service_through_box_and_reference() {
        let mut boxed: Box<dyn FirmwareVolumeService> = Box::new(Rejecting);
        assert_eq!(boxed.process_firmware_volume(0, 0x10), Ok(FvHandle(0x10)));

        let by_ref = &mut boxed;
        assert_eq!(
            by_ref.process_firmware_volume(0, u64::from(u32::MAX)),
            Err(Status::InvalidParameter)
        );
    }
}
