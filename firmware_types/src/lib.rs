//! # Firmware Types
//!
//! Types and capability traits for the firmware structures the harness touches.
//!
//! ## Philosophy
//!
//! - **Borrow, don't own**: Hand-off records and volumes belong to the platform
//! - **Parse, don't trust**: Every in-memory structure is bounds-checked on decode
//! - **Capabilities at the seams**: Record lookup and volume processing are traits,
//!   so tests can stub them deterministically
//!
//! ## Non-Goals
//!
//! This is NOT a firmware-volume parser. Only the volume header is decoded.

pub mod hob;
pub mod service;
pub mod status;
pub mod volume;

pub use hob::{FirmwareVolumeHob, HandoffRecords, HobError, HobList, HobRecord, HobType};
pub use service::{FirmwareVolumeService, FvHandle};
pub use status::Status;
pub use volume::{FirmwareVolumeHeader, VolumeError, FVH_SIGNATURE, FV_LENGTH_OFFSET};
