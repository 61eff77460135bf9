//! # Breaking Boot Host
//!
//! Runs the harness as an ordinary process against a simulated platform.
//!
//! ## Philosophy
//!
//! - **Same harness, different seams**: The menu loop is the one firmware runs;
//!   only the key source, console and platform are swapped
//! - **Deterministic when scripted**: A key script replays the same session every time
//! - **Interactive when not**: Stdin bytes become keys, and end of input exits the menu

pub mod input_script;
pub mod runtime;
pub mod stdio;

pub use input_script::{InputScript, InputScriptError};
pub use runtime::{HostConfig, HostError, HostMode, HostRuntime, RunReport};
pub use stdio::{ByteKeySource, IoConsole};
