//! Firmware volume header
//!
//! Only the fixed part of the header is decoded, plus the block map. The
//! harness never walks the files inside a volume.

use thiserror::Error;

/// `"_FVH"` read as a little-endian `u32`
pub const FVH_SIGNATURE: u32 = u32::from_le_bytes(*b"_FVH");

/// Offset of the declared volume length
pub const FV_LENGTH_OFFSET: u64 = 32;

/// Offset of the first block-map entry
pub const BLOCK_MAP_OFFSET: usize = 56;

/// Smallest valid header: fixed part, one block-map entry and the terminator
pub const MIN_HEADER_LENGTH: usize = BLOCK_MAP_OFFSET + 2 * BLOCK_MAP_ENTRY_SIZE;

const BLOCK_MAP_ENTRY_SIZE: usize = 8;

/// Errors found while decoding a volume header
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VolumeError {
    #[error("Header truncated: need {needed} bytes, have {available}")]
    Truncated { needed: usize, available: usize },

    #[error("Bad signature {0:#010x}")]
    BadSignature(u32),

    #[error("Bad header length {0}")]
    BadHeaderLength(u16),

    #[error("Block map is not terminated")]
    UnterminatedBlockMap,
}

/// One run of equally sized blocks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockMapEntry {
    pub num_blocks: u32,
    pub length: u32,
}

/// Decoded firmware volume header
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FirmwareVolumeHeader {
    pub file_system_guid: [u8; 16],
    /// Length of the whole volume as declared by the volume itself
    pub fv_length: u64,
    pub signature: u32,
    pub attributes: u32,
    pub header_length: u16,
    pub checksum: u16,
    pub ext_header_offset: u16,
    pub revision: u8,
    pub block_map: Vec<BlockMapEntry>,
}

impl FirmwareVolumeHeader {
    /// Decodes a header from the start of `bytes`
    ///
    /// The checksum is not verified here; see [`header_checksum_valid`].
    pub fn parse(bytes: &[u8]) -> Result<Self, VolumeError> {
        if bytes.len() < BLOCK_MAP_OFFSET {
            return Err(VolumeError::Truncated {
                needed: BLOCK_MAP_OFFSET,
                available: bytes.len(),
            });
        }

        let signature = le_u32(bytes, 40);
        if signature != FVH_SIGNATURE {
            return Err(VolumeError::BadSignature(signature));
        }

        let header_length = le_u16(bytes, 48);
        let header_len = usize::from(header_length);
        if header_len < MIN_HEADER_LENGTH || header_len % 2 != 0 {
            return Err(VolumeError::BadHeaderLength(header_length));
        }
        if bytes.len() < header_len {
            return Err(VolumeError::Truncated {
                needed: header_len,
                available: bytes.len(),
            });
        }

        let mut block_map = Vec::new();
        let mut offset = BLOCK_MAP_OFFSET;
        loop {
            if offset + BLOCK_MAP_ENTRY_SIZE > header_len {
                return Err(VolumeError::UnterminatedBlockMap);
            }
            let entry = BlockMapEntry {
                num_blocks: le_u32(bytes, offset),
                length: le_u32(bytes, offset + 4),
            };
            if entry.num_blocks == 0 && entry.length == 0 {
                break;
            }
            block_map.push(entry);
            offset += BLOCK_MAP_ENTRY_SIZE;
        }

        let mut file_system_guid = [0u8; 16];
        file_system_guid.copy_from_slice(&bytes[16..32]);

        Ok(Self {
            file_system_guid,
            fv_length: le_u64(bytes, FV_LENGTH_OFFSET as usize),
            signature,
            attributes: le_u32(bytes, 44),
            header_length,
            checksum: le_u16(bytes, 50),
            ext_header_offset: le_u16(bytes, 52),
            revision: bytes[55],
            block_map,
        })
    }

    /// Total size covered by the block map
    pub fn block_map_size(&self) -> u64 {
        self.block_map
            .iter()
            .map(|entry| u64::from(entry.num_blocks) * u64::from(entry.length))
            .sum()
    }
}

/// Returns true if the 16-bit sum over the header bytes is zero
///
/// `header` must be exactly the header as declared by its `header_length`.
pub fn header_checksum_valid(header: &[u8]) -> bool {
    checksum16(header) == 0
}

/// 16-bit wrapping sum of little-endian words
///
/// A trailing odd byte is ignored.
pub fn checksum16(bytes: &[u8]) -> u16 {
    bytes
        .chunks_exact(2)
        .fold(0u16, |sum, word| sum.wrapping_add(u16::from_le_bytes([word[0], word[1]])))
}

fn le_u16(bytes: &[u8], offset: usize) -> u16 {
    u16::from_le_bytes([bytes[offset], bytes[offset + 1]])
}

fn le_u32(bytes: &[u8], offset: usize) -> u32 {
    let mut raw = [0u8; 4];
    raw.copy_from_slice(&bytes[offset..offset + 4]);
    u32::from_le_bytes(raw)
}

fn le_u64(bytes: &[u8], offset: usize) -> u64 {
    let mut raw = [0u8; 8];
    raw.copy_from_slice(&bytes[offset..offset + 8]);
    u64::from_le_bytes(raw)
}
