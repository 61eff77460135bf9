//! Firmware status codes

use core::fmt;

/// High bit marking an error status in its raw encoding
pub const ERROR_BIT: u64 = 1 << 63;

/// Status returned by a firmware service
///
/// Mirrors the firmware status space. Codes without a dedicated variant are
/// kept verbatim in [`Status::Other`] so nothing reported by the service is lost.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Status {
    Success,
    LoadError,
    InvalidParameter,
    Unsupported,
    BadBufferSize,
    BufferTooSmall,
    NotReady,
    DeviceError,
    WriteProtected,
    OutOfResources,
    VolumeCorrupted,
    VolumeFull,
    NoMedia,
    MediaChanged,
    NotFound,
    AccessDenied,
    Timeout,
    Aborted,
    SecurityViolation,
    CompromisedData,
    /// Any other raw status value
    Other(u64),
}

impl Status {
    /// Decodes a raw status value
    pub fn from_raw(raw: u64) -> Self {
        if raw == 0 {
            return Self::Success;
        }
        if raw & ERROR_BIT == 0 {
            return Self::Other(raw);
        }
        match raw & !ERROR_BIT {
            1 => Self::LoadError,
            2 => Self::InvalidParameter,
            3 => Self::Unsupported,
            4 => Self::BadBufferSize,
            5 => Self::BufferTooSmall,
            6 => Self::NotReady,
            7 => Self::DeviceError,
            8 => Self::WriteProtected,
            9 => Self::OutOfResources,
            10 => Self::VolumeCorrupted,
            11 => Self::VolumeFull,
            12 => Self::NoMedia,
            13 => Self::MediaChanged,
            14 => Self::NotFound,
            15 => Self::AccessDenied,
            18 => Self::Timeout,
            21 => Self::Aborted,
            26 => Self::SecurityViolation,
            33 => Self::CompromisedData,
            _ => Self::Other(raw),
        }
    }

    /// Returns the raw status value
    pub fn to_raw(&self) -> u64 {
        let code = match self {
            Self::Success => return 0,
            Self::Other(raw) => return *raw,
            Self::LoadError => 1,
            Self::InvalidParameter => 2,
            Self::Unsupported => 3,
            Self::BadBufferSize => 4,
            Self::BufferTooSmall => 5,
            Self::NotReady => 6,
            Self::DeviceError => 7,
            Self::WriteProtected => 8,
            Self::OutOfResources => 9,
            Self::VolumeCorrupted => 10,
            Self::VolumeFull => 11,
            Self::NoMedia => 12,
            Self::MediaChanged => 13,
            Self::NotFound => 14,
            Self::AccessDenied => 15,
            Self::Timeout => 18,
            Self::Aborted => 21,
            Self::SecurityViolation => 26,
            Self::CompromisedData => 33,
        };
        ERROR_BIT | code
    }

    /// Returns true for [`Status::Success`]
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success)
    }

    /// Returns true if the raw encoding carries the error bit
    pub fn is_error(&self) -> bool {
        self.to_raw() & ERROR_BIT != 0
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::Success => "Success",
            Self::LoadError => "Load Error",
            Self::InvalidParameter => "Invalid Parameter",
            Self::Unsupported => "Unsupported",
            Self::BadBufferSize => "Bad Buffer Size",
            Self::BufferTooSmall => "Buffer Too Small",
            Self::NotReady => "Not Ready",
            Self::DeviceError => "Device Error",
            Self::WriteProtected => "Write Protected",
            Self::OutOfResources => "Out of Resources",
            Self::VolumeCorrupted => "Volume Corrupt",
            Self::VolumeFull => "Volume Full",
            Self::NoMedia => "No Media",
            Self::MediaChanged => "Media changed",
            Self::NotFound => "Not Found",
            Self::AccessDenied => "Access Denied",
            Self::Timeout => "Time out",
            Self::Aborted => "Aborted",
            Self::SecurityViolation => "Security Violation",
            Self::CompromisedData => "Compromised Data",
            Self::Other(raw) if raw & ERROR_BIT != 0 => {
                return write!(f, "Error Status {:#x}", raw & !ERROR_BIT);
            }
            Self::Other(raw) => return write!(f, "Warning Status {:#x}", raw),
        };
        f.write_str(text)
    }
}
