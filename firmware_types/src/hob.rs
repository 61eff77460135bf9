//! Hand-off block (HOB) list
//!
//! An earlier boot phase leaves a list of typed records in memory describing
//! the resources it discovered. The harness only cares about firmware-volume
//! records, but the list is walked generically: every record starts with the
//! same 8-byte header and the list ends with an end-of-list record.
//!
//! ```text
//! +----------+------------+----------+---------------------+
//! | type u16 | length u16 | rsvd u32 | body (length - 8)   |
//! +----------+------------+----------+---------------------+
//! ```

use core::fmt;
use thiserror::Error;

/// Size of the generic record header
pub const HOB_HEADER_SIZE: usize = 8;

/// Size of a firmware-volume record (header + base + length)
pub const FV_HOB_SIZE: usize = HOB_HEADER_SIZE + 16;

/// Record kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct HobType(pub u16);

impl HobType {
    pub const HANDOFF: Self = Self(0x0001);
    pub const MEMORY_ALLOCATION: Self = Self(0x0002);
    pub const RESOURCE_DESCRIPTOR: Self = Self(0x0003);
    pub const GUID_EXTENSION: Self = Self(0x0004);
    pub const FV: Self = Self(0x0005);
    pub const CPU: Self = Self(0x0006);
    pub const MEMORY_POOL: Self = Self(0x0007);
    pub const FV2: Self = Self(0x0009);
    pub const UEFI_CAPSULE: Self = Self(0x000B);
    pub const FV3: Self = Self(0x000C);
    pub const UNUSED: Self = Self(0xFFFE);
    pub const END_OF_HOB_LIST: Self = Self(0xFFFF);
}

impl fmt::Display for HobType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match *self {
            Self::HANDOFF => "Handoff",
            Self::MEMORY_ALLOCATION => "MemoryAllocation",
            Self::RESOURCE_DESCRIPTOR => "ResourceDescriptor",
            Self::GUID_EXTENSION => "GuidExtension",
            Self::FV => "FirmwareVolume",
            Self::CPU => "Cpu",
            Self::MEMORY_POOL => "MemoryPool",
            Self::FV2 => "FirmwareVolume2",
            Self::UEFI_CAPSULE => "UefiCapsule",
            Self::FV3 => "FirmwareVolume3",
            Self::UNUSED => "Unused",
            Self::END_OF_HOB_LIST => "EndOfHobList",
            Self(raw) => return write!(f, "Hob({:#06x})", raw),
        };
        f.write_str(name)
    }
}

/// Errors found while walking a HOB list
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HobError {
    #[error("Truncated record header at offset {offset:#x}")]
    TruncatedHeader { offset: usize },

    #[error("Invalid record length {length} at offset {offset:#x}")]
    InvalidLength { offset: usize, length: u16 },

    #[error("{kind} record at offset {offset:#x} is too short for its body")]
    ShortBody { offset: usize, kind: HobType },

    #[error("HOB list has no end-of-list record")]
    MissingEndOfList,
}

/// Firmware-volume record
///
/// Describes where a firmware volume lives in memory. Borrowed by a dispatch
/// for the duration of one call; never owned by the harness.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FirmwareVolumeHob {
    /// Physical base address of the volume header
    pub base_address: u64,
    /// Length recorded by the producing phase
    pub length: u64,
}

/// A decoded record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HobRecord {
    /// Firmware-volume descriptor
    FirmwareVolume(FirmwareVolumeHob),
    /// Any record kind the harness does not decode
    Other { kind: HobType, length: u16 },
}

impl HobRecord {
    /// Returns the record kind
    pub fn kind(&self) -> HobType {
        match self {
            Self::FirmwareVolume(_) => HobType::FV,
            Self::Other { kind, .. } => *kind,
        }
    }

    /// Returns the firmware-volume descriptor, if this is one
    pub fn as_firmware_volume(&self) -> Option<&FirmwareVolumeHob> {
        match self {
            Self::FirmwareVolume(fv) => Some(fv),
            Self::Other { .. } => None,
        }
    }
}

/// Lookup of hand-off records by kind
///
/// The seam between the harness and whatever produced the hand-off list.
/// Test doubles implement it directly to force the missing-record path.
pub trait HandoffRecords {
    /// Returns the first record of the given kind
    fn find(&self, kind: HobType) -> Option<HobRecord>;

    /// Returns the first firmware-volume descriptor
    fn find_firmware_volume(&self) -> Option<FirmwareVolumeHob> {
        self.find(HobType::FV)
            .and_then(|record| record.as_firmware_volume().copied())
    }
}

impl<H: HandoffRecords + ?Sized> HandoffRecords for &H {
    fn find(&self, kind: HobType) -> Option<HobRecord> {
        (**self).find(kind)
    }
}

/// A validated HOB list
///
/// Construction walks the whole list once, so iteration and lookups never
/// run past the buffer.
#[derive(Debug, Clone, Copy)]
pub struct HobList<'a> {
    bytes: &'a [u8],
}

impl<'a> HobList<'a> {
    /// Validates and wraps a HOB list
    ///
    /// Bytes after the end-of-list record are ignored.
    pub fn parse(bytes: &'a [u8]) -> Result<Self, HobError> {
        let mut offset = 0;
        loop {
            let (kind, length) = read_header(bytes, offset)?;
            if kind == HobType::END_OF_HOB_LIST {
                let end = offset + HOB_HEADER_SIZE;
                return Ok(Self {
                    bytes: &bytes[..end],
                });
            }
            let length_usize = usize::from(length);
            if length_usize < HOB_HEADER_SIZE || offset + length_usize > bytes.len() {
                return Err(HobError::InvalidLength { offset, length });
            }
            if kind == HobType::FV && length_usize < FV_HOB_SIZE {
                return Err(HobError::ShortBody { offset, kind });
            }
            offset += length_usize;
        }
    }

    /// Returns the list bytes up to and including the end-of-list record
    pub fn as_bytes(&self) -> &'a [u8] {
        self.bytes
    }

    /// Iterates over all records before the end-of-list record
    pub fn records(&self) -> HobIter<'a> {
        HobIter {
            bytes: self.bytes,
            offset: 0,
        }
    }
}

impl HandoffRecords for HobList<'_> {
    fn find(&self, kind: HobType) -> Option<HobRecord> {
        self.records().find(|record| record.kind() == kind)
    }
}

/// Iterator over the records of a validated [`HobList`]
pub struct HobIter<'a> {
    bytes: &'a [u8],
    offset: usize,
}

impl Iterator for HobIter<'_> {
    type Item = HobRecord;

    fn next(&mut self) -> Option<Self::Item> {
        let (kind, length) = read_header(self.bytes, self.offset).ok()?;
        if kind == HobType::END_OF_HOB_LIST {
            return None;
        }
        let start = self.offset;
        self.offset += usize::from(length);

        if kind == HobType::FV {
            let body = &self.bytes[start + HOB_HEADER_SIZE..start + FV_HOB_SIZE];
            let base_address = le_u64(&body[0..8]);
            let length = le_u64(&body[8..16]);
            Some(HobRecord::FirmwareVolume(FirmwareVolumeHob {
                base_address,
                length,
            }))
        } else {
            Some(HobRecord::Other { kind, length })
        }
    }
}

fn read_header(bytes: &[u8], offset: usize) -> Result<(HobType, u16), HobError> {
    let header = bytes
        .get(offset..offset + HOB_HEADER_SIZE)
        .ok_or(if offset == bytes.len() {
            HobError::MissingEndOfList
        } else {
            HobError::TruncatedHeader { offset }
        })?;
    let kind = u16::from_le_bytes([header[0], header[1]]);
    let length = u16::from_le_bytes([header[2], header[3]]);
    Ok((HobType(kind), length))
}

fn le_u64(bytes: &[u8]) -> u64 {
    let mut raw = [0u8; 8];
    raw.copy_from_slice(bytes);
    u64::from_le_bytes(raw)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header(kind: HobType, length: u16) -> Vec<u8> {
        let mut bytes = Vec::new();
        bytes.extend_from_slice(&kind.0.to_le_bytes());
        bytes.extend_from_slice(&length.to_le_bytes());
        bytes.extend_from_slice(&[0; 4]);
        bytes
    }

    fn fv_record(base: u64, length: u64) -> Vec<u8> {
        let mut bytes = header(HobType::FV, FV_HOB_SIZE as u16);
        bytes.extend_from_slice(&base.to_le_bytes());
        bytes.extend_from_slice(&length.to_le_bytes());
        bytes
    }

    fn end() -> Vec<u8> {
        header(HobType::END_OF_HOB_LIST, HOB_HEADER_SIZE as u16)
    }

    #[test]
    fn test_find_first_firmware_volume() {
        let mut bytes = header(HobType::CPU, 16);
        bytes.extend_from_slice(&[0xAA; 8]);
        bytes.extend(fv_record(0x8000_0000, 0x2000));
        bytes.extend(fv_record(0x9000_0000, 0x4000));
        bytes.extend(end());

        let list = HobList::parse(&bytes).unwrap();
        assert_eq!(list.records().count(), 3);
        assert_eq!(
            list.find_firmware_volume(),
            Some(FirmwareVolumeHob {
                base_address: 0x8000_0000,
                length: 0x2000
            })
        );
        assert_eq!(
            list.find(HobType::CPU),
            Some(HobRecord::Other {
                kind: HobType::CPU,
                length: 16
            })
        );
    }

    #[test]
    fn test_list_without_firmware_volume() {
        let mut bytes = header(HobType::MEMORY_POOL, 8);
        bytes.extend(end());

        let list = HobList::parse(&bytes).unwrap();
        assert_eq!(list.find_firmware_volume(), None);
    }

    #[test]
    fn test_trailing_bytes_after_end_are_ignored() {
        let mut bytes = end();
        bytes.extend(fv_record(0x1000, 0x1000));

        let list = HobList::parse(&bytes).unwrap();
        assert_eq!(list.as_bytes().len(), HOB_HEADER_SIZE);
        assert_eq!(list.find_firmware_volume(), None);
    }

    #[test]
    fn test_missing_end_of_list() {
        let bytes = fv_record(0x1000, 0x1000);
        assert_eq!(HobList::parse(&bytes).unwrap_err(), HobError::MissingEndOfList);
    }

    #[test]
    fn test_truncated_header() {
        let mut bytes = fv_record(0x1000, 0x1000);
        bytes.extend_from_slice(&[0xFF, 0xFF]);
        assert_eq!(
            HobList::parse(&bytes).unwrap_err(),
            HobError::TruncatedHeader { offset: FV_HOB_SIZE }
        );
    }

    #[test]
    fn test_zero_length_record_is_rejected() {
        let mut bytes = header(HobType::CPU, 0);
        bytes.extend(end());
        assert_eq!(
            HobList::parse(&bytes).unwrap_err(),
            HobError::InvalidLength {
                offset: 0,
                length: 0
            }
        );
    }

    #[test]
    fn test_record_running_past_buffer_is_rejected() {
        let mut bytes = header(HobType::CPU, 64);
        bytes.extend(end());
        assert!(matches!(
            HobList::parse(&bytes),
            Err(HobError::InvalidLength { offset: 0, length: 64 })
        ));
    }

    #[test]
    fn test_short_firmware_volume_record_is_rejected() {
        let mut bytes = header(HobType::FV, 16);
        bytes.extend_from_slice(&[0; 8]);
        bytes.extend(end());
        assert_eq!(
            HobList::parse(&bytes).unwrap_err(),
            HobError::ShortBody {
                offset: 0,
                kind: HobType::FV
            }
        );
    }

    #[test]
    fn test_hob_type_display() {
        assert_eq!(HobType::FV.to_string(), "FirmwareVolume");
        assert_eq!(HobType(0x0042).to_string(), "Hob(0x0042)");
    }
}
