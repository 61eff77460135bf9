//! # Firmware Volume Dispatch
//!
//! Locates the firmware volume handed off by the previous boot phase and
//! passes it to the processing service under one of two length policies.
//!
//! ## Philosophy
//!
//! - **Pass parameters, report status**: The far side of the call is not ours
//! - **Never fatal**: Missing records and failed statuses are reported, never escalated
//! - **Observable**: A [`ServiceWrapper`] records exactly what crossed the boundary
//!
//! ## Length policies
//!
//! | Mode | Length passed to the service |
//! |---|---|
//! | [`DispatchMode::Fuzz`] | `u32::MAX`, whatever the volume's real size |
//! | [`DispatchMode::Normal`] | the `fv_length` field of the volume's own header |

pub mod dispatch;
pub mod report;
pub mod wrapper;

pub use dispatch::{
    dispatch_firmware_volume, dispatch_length, DispatchError, DispatchMode, DispatchResult,
    FUZZ_LENGTH,
};
pub use report::{dispatch_log_entry, report_dispatch, LOG_SOURCE};
pub use wrapper::{DispatchCall, ServiceWrapper};
