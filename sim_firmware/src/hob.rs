//! Hand-off list construction

use firmware_types::hob::{FV_HOB_SIZE, HOB_HEADER_SIZE};
use firmware_types::{HandoffRecords, HobError, HobList, HobRecord, HobType};

/// Builds a serialized HOB list
///
/// The end-of-list record is appended by [`HobListBuilder::build`].
#[derive(Debug, Clone, Default)]
pub struct HobListBuilder {
    bytes: Vec<u8>,
}

impl HobListBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a firmware-volume record
    pub fn firmware_volume(mut self, base_address: u64, length: u64) -> Self {
        self.push_header(HobType::FV, FV_HOB_SIZE as u16);
        self.bytes.extend_from_slice(&base_address.to_le_bytes());
        self.bytes.extend_from_slice(&length.to_le_bytes());
        self
    }

    /// Appends a record of any kind with an opaque body
    ///
    /// The body is padded to a multiple of 8 bytes.
    pub fn record(mut self, kind: HobType, body: &[u8]) -> Self {
        let padded = body.len().div_ceil(8) * 8;
        self.push_header(kind, (HOB_HEADER_SIZE + padded) as u16);
        self.bytes.extend_from_slice(body);
        self.bytes.resize(self.bytes.len() + padded - body.len(), 0);
        self
    }

    /// Serializes the list with its end-of-list record
    pub fn build(mut self) -> Vec<u8> {
        self.push_header(HobType::END_OF_HOB_LIST, HOB_HEADER_SIZE as u16);
        self.bytes
    }

    /// Serializes the list without an end-of-list record
    pub fn build_unterminated(self) -> Vec<u8> {
        self.bytes
    }

    fn push_header(&mut self, kind: HobType, length: u16) {
        self.bytes.extend_from_slice(&kind.0.to_le_bytes());
        self.bytes.extend_from_slice(&length.to_le_bytes());
        self.bytes.extend_from_slice(&[0; 4]);
    }
}

/// Owned, validated hand-off list
#[derive(Debug, Clone)]
pub struct HandoffList {
    bytes: Vec<u8>,
}

impl HandoffList {
    /// Validates `bytes` as a HOB list and takes ownership of them
    pub fn new(bytes: Vec<u8>) -> Result<Self, HobError> {
        HobList::parse(&bytes)?;
        Ok(Self { bytes })
    }

    /// Borrows the list for iteration
    pub fn list(&self) -> Option<HobList<'_>> {
        HobList::parse(&self.bytes).ok()
    }
}

impl HandoffRecords for HandoffList {
    fn find(&self, kind: HobType) -> Option<HobRecord> {
        self.list().and_then(|list| list.find(kind))
    }
}

/// Hand-off source with no records at all
#[derive(Debug, Clone, Copy, Default)]
pub struct EmptyHandoff;

impl HandoffRecords for EmptyHandoff {
    fn find(&self, _kind: HobType) -> Option<HobRecord> {
        None
    }
}
