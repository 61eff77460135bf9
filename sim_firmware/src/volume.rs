//! Firmware volume image construction

use firmware_types::volume::{checksum16, BLOCK_MAP_OFFSET, MIN_HEADER_LENGTH};
use firmware_types::FVH_SIGNATURE;

const DEFAULT_BLOCK_SIZE: u32 = 0x1000;
const ERASE_POLARITY_ATTRIBUTES: u32 = 0x0004_FEFF;

/// Builds a firmware volume image with a single-entry block map
///
/// The image is `fv_length` bytes of erased (0xFF) flash behind a header
/// with a correct checksum, unless one of the corrupting options is used.
#[derive(Debug, Clone)]
pub struct FirmwareVolumeBuilder {
    image_length: u64,
    declared_length: u64,
    block_size: u32,
    signature: u32,
    corrupt_checksum: bool,
}

impl FirmwareVolumeBuilder {
    pub fn new(fv_length: u64) -> Self {
        Self {
            image_length: fv_length,
            declared_length: fv_length,
            block_size: DEFAULT_BLOCK_SIZE,
            signature: FVH_SIGNATURE,
            corrupt_checksum: false,
        }
    }

    /// Declares a length different from the image size
    pub fn declared_length(mut self, length: u64) -> Self {
        self.declared_length = length;
        self
    }

    pub fn block_size(mut self, block_size: u32) -> Self {
        self.block_size = block_size.max(1);
        self
    }

    /// Replaces the `"_FVH"` signature
    pub fn signature(mut self, signature: u32) -> Self {
        self.signature = signature;
        self
    }

    /// Leaves the header checksum off by one
    pub fn corrupt_checksum(mut self) -> Self {
        self.corrupt_checksum = true;
        self
    }

    pub fn build(self) -> Vec<u8> {
        let size = usize::try_from(self.image_length)
            .unwrap_or(usize::MAX)
            .max(MIN_HEADER_LENGTH);
        let mut image = vec![0xFFu8; size];
        let header = &mut image[..MIN_HEADER_LENGTH];
        header.fill(0);

        let num_blocks = u32::try_from(self.image_length / u64::from(self.block_size))
            .unwrap_or(u32::MAX);

        header[32..40].copy_from_slice(&self.declared_length.to_le_bytes());
        header[40..44].copy_from_slice(&self.signature.to_le_bytes());
        header[44..48].copy_from_slice(&ERASE_POLARITY_ATTRIBUTES.to_le_bytes());
        header[48..50].copy_from_slice(&(MIN_HEADER_LENGTH as u16).to_le_bytes());
        header[55] = 2;
        header[BLOCK_MAP_OFFSET..BLOCK_MAP_OFFSET + 4].copy_from_slice(&num_blocks.to_le_bytes());
        header[BLOCK_MAP_OFFSET + 4..BLOCK_MAP_OFFSET + 8]
            .copy_from_slice(&self.block_size.to_le_bytes());

        let mut checksum = 0u16.wrapping_sub(checksum16(header));
        if self.corrupt_checksum {
            checksum = checksum.wrapping_add(1);
        }
        header[50..52].copy_from_slice(&checksum.to_le_bytes());

        image
    }
}
