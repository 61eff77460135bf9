//! Keyboard device abstraction
//!
//! This module provides a hardware abstraction for firmware text-input devices.
//! It defines the interface that platform-specific implementations must provide.
//!
//! ## Philosophy
//!
//! - **Hardware is just a source**: The device hands out one key at a time, no queue
//! - **One blocking call**: Consumers see `wait_for_key()`, never the wait/poll pair
//! - **Testable**: Can mock hardware via fake implementations
//!
//! ## Design
//!
//! The raw device is a pair of operations, mirroring firmware text input:
//! - `read_key_stroke()` returns a key or a "not ready" condition
//! - `wait_for_key_event()` suspends until the device signals a pending key
//!
//! [`BlockingKeySource`] folds that pair into the single blocking
//! [`KeySource::wait_for_key`] call used by the harness.

use input_types::KeyEvent;
use thiserror::Error;

/// Errors reported by a raw keyboard read
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum KeyReadError {
    /// No key is pending yet
    #[error("no key pending")]
    NotReady,

    /// The device reported a hardware fault
    #[error("keyboard device error")]
    DeviceError,
}

/// Keyboard device trait
///
/// Platform-specific implementations provide keyboard input via this trait.
///
/// ## Implementation Notes
///
/// - **Non-blocking read**: `read_key_stroke()` returns immediately
/// - **Blocking wait**: `wait_for_key_event()` returns once a key may be read
/// - **Stateless**: Device does not track modifier state or key repeat
pub trait KeyboardDevice {
    /// Reads one pending key stroke
    fn read_key_stroke(&mut self) -> Result<KeyEvent, KeyReadError>;

    /// Suspends the caller until the device signals a pending key
    fn wait_for_key_event(&mut self);
}

/// Blocking key source
///
/// The only suspension point in the harness. Implementations block until
/// exactly one key is available and return it; there is no timeout and no
/// cancellation other than a delivered key.
pub trait KeySource {
    /// Waits for and returns the next key
    fn wait_for_key(&mut self) -> KeyEvent;
}

impl<K: KeySource + ?Sized> KeySource for &mut K {
    fn wait_for_key(&mut self) -> KeyEvent {
        (**self).wait_for_key()
    }
}

/// Adapter that turns a raw [`KeyboardDevice`] into a [`KeySource`]
///
/// "Not ready" waits on the device event and retries. Any other read error
/// retries immediately; errors are never surfaced to the caller.
pub struct BlockingKeySource<D> {
    device: D,
    retries: u64,
}

impl<D: KeyboardDevice> BlockingKeySource<D> {
    /// Wraps a keyboard device
    pub fn new(device: D) -> Self {
        Self { device, retries: 0 }
    }

    /// Returns the number of failed reads retried so far
    pub fn retries(&self) -> u64 {
        self.retries
    }

    /// Returns the wrapped device
    pub fn device(&self) -> &D {
        &self.device
    }

    /// Unwraps the adapter, returning the device
    pub fn into_inner(self) -> D {
        self.device
    }
}

impl<D: KeyboardDevice> KeySource for BlockingKeySource<D> {
    fn wait_for_key(&mut self) -> KeyEvent {
        loop {
            match self.device.read_key_stroke() {
                Ok(key) => return key,
                Err(KeyReadError::NotReady) => {
                    self.retries += 1;
                    self.device.wait_for_key_event();
                }
                Err(KeyReadError::DeviceError) => {
                    self.retries += 1;
                }
            }
        }
    }
}
