//! # Hardware Abstraction Layer (HAL)
//!
//! This crate defines the platform traits the harness runs against.
//!
//! ## Philosophy
//!
//! **Firmware services must be fully abstracted and swappable.**
//!
//! The harness never touches a device or a physical address directly.
//! The HAL provides traits that firmware-backed or simulated platforms implement.
//!
//! ## Design Principles
//!
//! 1. **Trait-based**: Key input and memory reads go through traits
//! 2. **Single suspension point**: Only [`KeySource::wait_for_key`] blocks
//! 3. **Testable**: HAL can be mocked for testing

pub mod keyboard;
pub mod memory;

pub use keyboard::{BlockingKeySource, KeyReadError, KeySource, KeyboardDevice};
pub use memory::{MemoryError, PhysicalMemory};
