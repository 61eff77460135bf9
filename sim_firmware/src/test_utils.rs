//! Key input doubles
//!
//! These let tests and the host runtime inject key sequences without a real
//! text-input device.

use hal::{KeyReadError, KeySource, KeyboardDevice};
use input_types::KeyEvent;
use std::collections::VecDeque;

/// Key source that replays a fixed script
///
/// Once the script is exhausted every further wait returns the fallback key
/// (Escape unless changed), so a harness driven by a short script still
/// terminates.
#[derive(Debug, Clone)]
pub struct ScriptedKeySource {
    keys: VecDeque<KeyEvent>,
    fallback: KeyEvent,
    delivered: usize,
}

impl ScriptedKeySource {
    /// Creates a source from a key sequence
    pub fn new(keys: impl IntoIterator<Item = KeyEvent>) -> Self {
        Self {
            keys: keys.into_iter().collect(),
            fallback: KeyEvent::escape(),
            delivered: 0,
        }
    }

    /// Creates a source typing each character of `text`
    pub fn from_text(text: &str) -> Self {
        Self::new(text.chars().map(KeyEvent::char))
    }

    /// Sets the key returned after the script runs out
    pub fn with_fallback(mut self, key: KeyEvent) -> Self {
        self.fallback = key;
        self
    }

    /// Appends a key to the script
    pub fn push(&mut self, key: KeyEvent) {
        self.keys.push_back(key);
    }

    /// Returns the number of scripted keys not yet delivered
    pub fn pending_count(&self) -> usize {
        self.keys.len()
    }

    /// Returns the number of keys delivered, fallback keys included
    pub fn delivered(&self) -> usize {
        self.delivered
    }
}

impl KeySource for ScriptedKeySource {
    fn wait_for_key(&mut self) -> KeyEvent {
        self.delivered += 1;
        self.keys.pop_front().unwrap_or(self.fallback)
    }
}

/// One scripted device response
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Pending {
    Key(KeyEvent),
    Error(KeyReadError),
}

/// Keyboard device that interleaves failures with keys
///
/// Wrap it in a [`hal::BlockingKeySource`] to exercise the retry rules.
#[derive(Debug, Clone, Default)]
pub struct FlakyKeyboard {
    script: VecDeque<Pending>,
    waits: usize,
    reads: usize,
}

impl FlakyKeyboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues `not_ready` "not ready" reads followed by `key`
    pub fn key_after(mut self, not_ready: usize, key: KeyEvent) -> Self {
        for _ in 0..not_ready {
            self.script.push_back(Pending::Error(KeyReadError::NotReady));
        }
        self.script.push_back(Pending::Key(key));
        self
    }

    /// Queues one device error
    pub fn device_error(mut self) -> Self {
        self.script
            .push_back(Pending::Error(KeyReadError::DeviceError));
        self
    }

    /// Number of times the caller waited on the key event
    pub fn waits(&self) -> usize {
        self.waits
    }

    /// Number of read attempts
    pub fn reads(&self) -> usize {
        self.reads
    }
}

impl KeyboardDevice for FlakyKeyboard {
    fn read_key_stroke(&mut self) -> Result<KeyEvent, KeyReadError> {
        self.reads += 1;
        match self.script.pop_front() {
            Some(Pending::Key(key)) => Ok(key),
            Some(Pending::Error(err)) => Err(err),
            // An exhausted script behaves like an operator pressing Escape
            None => Ok(KeyEvent::escape()),
        }
    }

    fn wait_for_key_event(&mut self) {
        self.waits += 1;
    }
}
