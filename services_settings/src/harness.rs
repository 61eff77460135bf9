//! Typed harness configuration

use crate::{keys, SettingKey, SettingValue, SettingsRegistry};
use alloc::string::{String, ToString};

/// Banner printed before the menu starts
pub const DEFAULT_BANNER: &str = "Breaking Boot fuzzer\n";

pub use line_editor::DEFAULT_MAX_CELLS;

/// Settings the harness entry point consumes
///
/// Built from a [`SettingsRegistry`]. A missing key, or a value of the wrong
/// type, falls back to the default for that field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HarnessConfig {
    /// Feature gate; when false the harness prints a notice and returns
    pub enabled: bool,
    /// Text printed before the menu
    pub banner: String,
    /// Bound handed to the line editor
    pub max_cells: usize,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            banner: DEFAULT_BANNER.to_string(),
            max_cells: DEFAULT_MAX_CELLS,
        }
    }
}

impl HarnessConfig {
    /// Reads the effective configuration from `registry`
    pub fn from_registry(registry: &SettingsRegistry) -> Self {
        let defaults = Self::default();
        let lookup = |key: &str| registry.get(&SettingKey::from(key));

        let enabled = lookup(keys::BREAKING_BOOT_ENABLED)
            .and_then(SettingValue::as_boolean)
            .unwrap_or(defaults.enabled);
        let banner = lookup(keys::BREAKING_BOOT_BANNER)
            .and_then(SettingValue::as_string)
            .map(ToString::to_string)
            .unwrap_or(defaults.banner);
        let max_cells = lookup(keys::LINE_EDITOR_MAX_CELLS)
            .and_then(SettingValue::as_integer)
            .and_then(|cells| usize::try_from(cells).ok())
            .unwrap_or(defaults.max_cells);

        Self {
            enabled,
            banner,
            max_cells,
        }
    }
}
