//! # Breaking Boot
//!
//! An interactive harness that drives the firmware-volume processing service
//! with either the volume's own length or a deliberately oversized one.
//!
//! ## Philosophy
//!
//! - **Operator in the loop**: Every action is one key; nothing runs unattended
//! - **Survive the target**: Whatever the service returns is reported, never fatal
//! - **Explicit state**: One [`MenuState`] instead of overlapping mode flags
//!
//! ## Usage
//!
//! ```ignore
//! let platform = Platform { handoff: &hobs, memory: &memory, service: &mut dxe };
//! let outcome = run_harness(&config, &mut keys, &mut console, platform, &mut log);
//! ```

pub mod app;
pub mod help;
pub mod menu;

pub use app::{prompt_line, run_harness, HarnessOutcome};
pub use help::{HelpTopic, SUPPORT_DRIVERS};
pub use menu::{MenuDispatchLoop, MenuIntent, MenuState, MenuStats, Platform};
