#![no_std]

//! # Settings Registry
//!
//! A typed settings system for the Breaking Boot harness.
//!
//! ## Philosophy
//!
//! - **Typed settings**: All settings have explicit types, not stringly-typed
//! - **Layered**: Read-only defaults + operator overrides
//! - **Deterministic**: Settings are serializable and reproducible
//! - **Testable**: All settings logic can be tested independently
//!
//! ## Features
//!
//! - Read-only defaults baked in
//! - Overrides loaded from JSON (see [`persistence`])
//! - A typed [`HarnessConfig`] view consumed by the harness entry point
//! - No environment variables
//!
//! ## Example
//!
//! ```ignore
//! use services_settings::{create_default_registry, keys, HarnessConfig, SettingValue};
//!
//! let mut registry = create_default_registry();
//! registry.set_override(keys::LINE_EDITOR_MAX_CELLS, SettingValue::Integer(20));
//!
//! let config = HarnessConfig::from_registry(&registry);
//! assert_eq!(config.max_cells, 20);
//! ```

pub mod harness;
pub mod persistence;

extern crate alloc;

use alloc::collections::BTreeMap;
use alloc::string::String;
use core::fmt;
use serde::{Deserialize, Serialize};

pub use harness::HarnessConfig;

/// Setting key (path-like identifier)
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SettingKey(String);

impl SettingKey {
    /// Creates a new setting key
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// Returns the key as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SettingKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for SettingKey {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// Setting value (strongly typed)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SettingValue {
    /// Boolean value
    Boolean(bool),
    /// Integer value
    Integer(i64),
    /// String value
    String(String),
}

impl SettingValue {
    /// Tries to get as boolean
    pub fn as_boolean(&self) -> Option<bool> {
        match self {
            SettingValue::Boolean(v) => Some(*v),
            _ => None,
        }
    }

    /// Tries to get as integer
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            SettingValue::Integer(v) => Some(*v),
            _ => None,
        }
    }

    /// Tries to get as string
    pub fn as_string(&self) -> Option<&str> {
        match self {
            SettingValue::String(v) => Some(v.as_str()),
            _ => None,
        }
    }
}

impl fmt::Display for SettingValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingValue::Boolean(v) => write!(f, "{}", v),
            SettingValue::Integer(v) => write!(f, "{}", v),
            SettingValue::String(v) => write!(f, "{:?}", v),
        }
    }
}

/// Settings registry
pub struct SettingsRegistry {
    /// Default settings (read-only)
    defaults: BTreeMap<SettingKey, SettingValue>,
    /// Operator overrides
    overrides: BTreeMap<SettingKey, SettingValue>,
}

impl SettingsRegistry {
    /// Creates a new settings registry
    pub fn new() -> Self {
        Self {
            defaults: BTreeMap::new(),
            overrides: BTreeMap::new(),
        }
    }

    /// Registers a default setting
    pub fn register_default(&mut self, key: impl Into<SettingKey>, value: SettingValue) {
        self.defaults.insert(key.into(), value);
    }

    /// Sets an override
    pub fn set_override(&mut self, key: impl Into<SettingKey>, value: SettingValue) {
        self.overrides.insert(key.into(), value);
    }

    /// Gets the effective setting value (override or default)
    pub fn get(&self, key: &SettingKey) -> Option<&SettingValue> {
        self.overrides.get(key).or_else(|| self.defaults.get(key))
    }

    /// Exports all overrides, for persistence or reporting
    pub fn export_overrides(&self) -> BTreeMap<SettingKey, SettingValue> {
        self.overrides.clone()
    }

    /// Merges overrides into the registry
    pub fn apply_overrides(&mut self, overrides: BTreeMap<SettingKey, SettingValue>) {
        self.overrides.extend(overrides);
    }
}

impl Default for SettingsRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Common setting keys
pub mod keys {
    pub const BREAKING_BOOT_ENABLED: &str = "breaking_boot.enabled";
    pub const BREAKING_BOOT_BANNER: &str = "breaking_boot.banner";
    pub const LINE_EDITOR_MAX_CELLS: &str = "line_editor.max_cells";
}

/// Creates a settings registry with default settings
pub fn create_default_registry() -> SettingsRegistry {
    let defaults = HarnessConfig::default();
    let mut registry = SettingsRegistry::new();

    registry.register_default(
        keys::BREAKING_BOOT_ENABLED,
        SettingValue::Boolean(defaults.enabled),
    );
    registry.register_default(
        keys::BREAKING_BOOT_BANNER,
        SettingValue::String(defaults.banner),
    );
    registry.register_default(
        keys::LINE_EDITOR_MAX_CELLS,
        SettingValue::Integer(defaults.max_cells as i64),
    );

    registry
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn test_setting_key_display() {
        let key = SettingKey::new("breaking_boot.enabled");
        assert_eq!(key.as_str(), "breaking_boot.enabled");
        assert_eq!(key.to_string(), "breaking_boot.enabled");
    }

    #[test]
    fn test_setting_value_accessors() {
        let val = SettingValue::Integer(12);
        assert_eq!(val.as_integer(), Some(12));
        assert_eq!(val.as_boolean(), None);
        assert_eq!(val.as_string(), None);
        assert_eq!(SettingValue::String("x".into()).as_string(), Some("x"));
    }

    #[test]
    fn test_setting_value_display() {
        assert_eq!(SettingValue::Boolean(true).to_string(), "true");
        assert_eq!(SettingValue::Integer(-3).to_string(), "-3");
        assert_eq!(SettingValue::String("hi".into()).to_string(), "\"hi\"");
    }

    #[test]
    fn test_override_shadows_default() {
        let mut registry = create_default_registry();
        let key = SettingKey::from(keys::BREAKING_BOOT_ENABLED);

        assert_eq!(registry.get(&key), Some(&SettingValue::Boolean(true)));

        registry.set_override(keys::BREAKING_BOOT_ENABLED, SettingValue::Boolean(false));
        assert_eq!(registry.get(&key), Some(&SettingValue::Boolean(false)));
    }

    #[test]
    fn test_unknown_key_is_absent() {
        let registry = create_default_registry();
        assert_eq!(registry.get(&SettingKey::from("nope")), None);
    }

    #[test]
    fn test_export_and_apply_overrides() {
        let mut source = create_default_registry();
        source.set_override(keys::LINE_EDITOR_MAX_CELLS, SettingValue::Integer(40));

        let mut target = create_default_registry();
        target.apply_overrides(source.export_overrides());

        assert_eq!(target.export_overrides().len(), 1);
        assert_eq!(
            target.get(&SettingKey::from(keys::LINE_EDITOR_MAX_CELLS)),
            Some(&SettingValue::Integer(40))
        );
    }
}
