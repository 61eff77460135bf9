//! Dispatch of one firmware volume

use core::fmt;
use firmware_types::{
    FirmwareVolumeHob, FirmwareVolumeService, FvHandle, HandoffRecords, Status, FV_LENGTH_OFFSET,
};
use hal::{MemoryError, PhysicalMemory};
use thiserror::Error;

/// Length passed in fuzz mode
pub const FUZZ_LENGTH: u64 = u32::MAX as u64;

/// Length policy for one dispatch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DispatchMode {
    /// Oversized bound, independent of the volume
    Fuzz,
    /// The volume's declared length
    Normal,
}

impl DispatchMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            DispatchMode::Fuzz => "fuzz",
            DispatchMode::Normal => "normal",
        }
    }
}

impl fmt::Display for DispatchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of a dispatch that reached the service
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DispatchResult {
    pub mode: DispatchMode,
    pub base_address: u64,
    /// Length actually passed to the service
    pub length: u64,
    pub status: Status,
    /// Present only when the service succeeded
    pub handle: Option<FvHandle>,
}

impl DispatchResult {
    /// Returns true if the service reported success
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }
}

/// Reasons a dispatch never reached the service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DispatchError {
    #[error("No firmware volume found in hand-off list")]
    NoFirmwareVolumeFound,

    #[error("Firmware volume header unreadable: {0}")]
    HeaderUnreadable(#[from] MemoryError),
}

/// Computes the length argument for `mode`
///
/// Normal mode reads only the declared `fv_length` field. The header is not
/// validated; whatever the volume declares is forwarded.
pub fn dispatch_length<M>(
    mode: DispatchMode,
    volume: &FirmwareVolumeHob,
    memory: &M,
) -> Result<u64, MemoryError>
where
    M: PhysicalMemory + ?Sized,
{
    match mode {
        DispatchMode::Fuzz => Ok(FUZZ_LENGTH),
        DispatchMode::Normal => {
            let field = volume
                .base_address
                .checked_add(FV_LENGTH_OFFSET)
                .ok_or(MemoryError::AddressOverflow(volume.base_address))?;
            memory.read_u64(field)
        }
    }
}

/// Dispatches the first handed-off firmware volume to `service`
///
/// Calls the service exactly once, or not at all when the record is missing
/// or its header cannot be read. A failing status is returned as a normal
/// [`DispatchResult`]; it is never retried.
pub fn dispatch_firmware_volume<H, M, S>(
    mode: DispatchMode,
    handoff: &H,
    memory: &M,
    service: &mut S,
) -> Result<DispatchResult, DispatchError>
where
    H: HandoffRecords + ?Sized,
    M: PhysicalMemory + ?Sized,
    S: FirmwareVolumeService + ?Sized,
{
    let volume = handoff
        .find_firmware_volume()
        .ok_or(DispatchError::NoFirmwareVolumeFound)?;
    let length = dispatch_length(mode, &volume, memory)?;

    let (status, handle) = match service.process_firmware_volume(volume.base_address, length) {
        Ok(handle) => (Status::Success, Some(handle)),
        Err(status) => (status, None),
    };

    Ok(DispatchResult {
        mode,
        base_address: volume.base_address,
        length,
        status,
        handle,
    })
}
