//! # Host Runtime
//!
//! Wires the harness to a simulated platform and the process stdio.

use crate::input_script::{InputScript, InputScriptError};
use crate::stdio::{ByteKeySource, IoConsole};
use breaking_boot::{prompt_line, run_harness, HarnessOutcome, Platform};
use firmware_types::HobError;
use fv_dispatch::{DispatchCall, ServiceWrapper};
use hal::KeySource;
use line_editor::ReadLineError;
use services_logger::{LogEntry, LogLevel, LogSink, WriterLog};
use services_settings::persistence::{deserialize_overrides, PersistenceError};
use services_settings::{create_default_registry, keys, HarnessConfig, SettingKey, SettingValue};
use sim_firmware::{ScriptedKeySource, SimulatedPlatform};
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

const LOG_SOURCE: &str = "breaking_boot_host";

/// Host runtime error types
#[derive(Debug, Error)]
pub enum HostError {
    #[error("Script error: {0}")]
    Script(#[from] InputScriptError),

    #[error("Settings error: {0}")]
    Settings(PersistenceError),

    #[error("Platform error: {0}")]
    Platform(#[from] HobError),

    #[error("Line read failed: {0}")]
    Line(ReadLineError),

    #[error("Failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

/// What the host runs once wired up
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostMode {
    /// The interactive fuzz menu
    Menu,
    /// A single bounded line read, for exercising the line editor
    ReadLine,
}

/// Host runtime configuration
#[derive(Debug, Clone)]
pub struct HostConfig {
    pub mode: HostMode,
    /// Key script text; stdin is used when absent
    pub script: Option<String>,
    /// Settings overrides as JSON
    pub settings: Option<Vec<u8>>,
    /// Applied on top of the settings file
    pub max_cells: Option<usize>,
    /// Forces the feature gate off
    pub disabled: bool,
    pub log_level: LogLevel,
    pub prompt: String,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            mode: HostMode::Menu,
            script: None,
            settings: None,
            max_cells: None,
            disabled: false,
            log_level: LogLevel::Warn,
            prompt: "Input: ".to_string(),
        }
    }
}

impl HostConfig {
    /// Loads the key script from a file
    pub fn load_script(&mut self, path: impl AsRef<Path>) -> Result<(), HostError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| HostError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        self.script = Some(text);
        Ok(())
    }

    /// Loads settings overrides from a JSON file
    pub fn load_settings(&mut self, path: impl AsRef<Path>) -> Result<(), HostError> {
        let path = path.as_ref();
        let bytes = fs::read(path).map_err(|source| HostError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        self.settings = Some(bytes);
        Ok(())
    }
}

/// Result of one host run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunReport {
    Harness {
        outcome: HarnessOutcome,
        calls: Vec<DispatchCall>,
    },
    /// `None` when the operator cancelled the read
    Line(Option<String>),
}

/// Host runtime
pub struct HostRuntime {
    mode: HostMode,
    prompt: String,
    log_level: LogLevel,
    harness: HarnessConfig,
    overrides: Vec<(SettingKey, SettingValue)>,
    script: Option<InputScript>,
}

impl HostRuntime {
    /// Creates a new host runtime
    ///
    /// Settings layer in order: built-in defaults, the settings file, then
    /// the command-line overrides.
    pub fn new(config: HostConfig) -> Result<Self, HostError> {
        let mut registry = create_default_registry();
        if let Some(bytes) = &config.settings {
            deserialize_overrides(bytes)
                .map_err(HostError::Settings)?
                .apply_to(&mut registry);
        }
        if config.disabled {
            registry.set_override(keys::BREAKING_BOOT_ENABLED, SettingValue::Boolean(false));
        }
        if let Some(cells) = config.max_cells {
            let cells = i64::try_from(cells)
                .map_err(|_| HostError::InvalidArgument(format!("max cells {}", cells)))?;
            registry.set_override(keys::LINE_EDITOR_MAX_CELLS, SettingValue::Integer(cells));
        }

        let script = config
            .script
            .as_deref()
            .map(InputScript::from_text)
            .transpose()?;

        Ok(Self {
            mode: config.mode,
            prompt: config.prompt,
            log_level: config.log_level,
            harness: HarnessConfig::from_registry(&registry),
            overrides: registry.export_overrides().into_iter().collect(),
            script,
        })
    }

    /// Effective harness settings
    pub fn harness_config(&self) -> &HarnessConfig {
        &self.harness
    }

    pub fn mode(&self) -> HostMode {
        self.mode
    }

    /// Runs against process stdio
    ///
    /// Keys come from the script when one was given, otherwise from stdin.
    /// The console is stdout and log entries go to stderr.
    pub fn run(&self) -> Result<RunReport, HostError> {
        let mut console = IoConsole::new(io::stdout());
        let mut log = WriterLog::new(IoConsole::new(io::stderr()), self.log_level);

        match &self.script {
            Some(script) => {
                let mut keys = ScriptedKeySource::new(script.keys().iter().copied());
                self.run_with(&mut keys, &mut console, &mut log)
            }
            None => {
                let mut keys = ByteKeySource::new(io::stdin().lock());
                self.run_with(&mut keys, &mut console, &mut log)
            }
        }
    }

    /// Runs with caller-supplied keys, console and log sink
    pub fn run_with<K, W, L>(
        &self,
        keys: &mut K,
        console: &mut W,
        log: &mut L,
    ) -> Result<RunReport, HostError>
    where
        K: KeySource + ?Sized,
        W: fmt::Write + ?Sized,
        L: LogSink + ?Sized,
    {
        log.record(
            LogEntry::new(LogLevel::Debug, "host starting")
                .with_source(LOG_SOURCE)
                .with_field("enabled", self.harness.enabled)
                .with_field("max_cells", self.harness.max_cells),
        );
        for (key, value) in &self.overrides {
            log.record(
                LogEntry::new(LogLevel::Debug, "setting override")
                    .with_source(LOG_SOURCE)
                    .with_field("key", key)
                    .with_field("value", value),
            );
        }

        match self.mode {
            HostMode::Menu => {
                let platform = SimulatedPlatform::standard()?;
                let mut service = ServiceWrapper::new(platform.dxe());
                let outcome = run_harness(
                    &self.harness,
                    keys,
                    console,
                    Platform {
                        handoff: &platform.handoff,
                        memory: &platform.memory,
                        service: &mut service,
                    },
                    log,
                );
                Ok(RunReport::Harness {
                    outcome,
                    calls: service.calls().to_vec(),
                })
            }
            HostMode::ReadLine => match prompt_line(&self.harness, &self.prompt, keys, console) {
                Ok(line) => {
                    let _ = writeln!(console, "Read: {}", line);
                    Ok(RunReport::Line(Some(line)))
                }
                Err(ReadLineError::Cancelled) => {
                    let _ = writeln!(console);
                    log.record(LogEntry::new(LogLevel::Info, "read cancelled").with_source(LOG_SOURCE));
                    Ok(RunReport::Line(None))
                }
                Err(e) => Err(HostError::Line(e)),
            },
        }
    }
}
