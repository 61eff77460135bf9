//! Harness entry point

use crate::help::HelpTopic;
use crate::menu::{MenuDispatchLoop, MenuStats, Platform};
use core::fmt;
use firmware_types::FirmwareVolumeService;
use hal::KeySource;
use line_editor::{read_bounded_line, ReadLineError};
use services_logger::{LogEntry, LogLevel, LogSink};
use services_settings::HarnessConfig;

const LOG_SOURCE: &str = "breaking_boot";

/// How a harness run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HarnessOutcome {
    /// The feature gate was off; nothing else happened
    Disabled,
    /// The operator left the menu with Escape
    Completed(MenuStats),
}

/// Runs the harness once
///
/// With the gate off this prints a single notice and returns. Otherwise it
/// prints the banner and the usage help, then hands the key source to the
/// menu loop until the operator exits.
pub fn run_harness<K, W, S, L>(
    config: &HarnessConfig,
    keys: &mut K,
    console: &mut W,
    platform: Platform<'_, S>,
    log: &mut L,
) -> HarnessOutcome
where
    K: KeySource + ?Sized,
    W: fmt::Write + ?Sized,
    S: FirmwareVolumeService + ?Sized,
    L: LogSink + ?Sized,
{
    if !config.enabled {
        let _ = writeln!(console, "Breaking Boot is currently Disabled");
        log.record(LogEntry::new(LogLevel::Info, "harness disabled").with_source(LOG_SOURCE));
        return HarnessOutcome::Disabled;
    }

    let _ = console.write_str(&config.banner);
    HelpTopic::Usage.render(console);
    log.record(LogEntry::new(LogLevel::Info, "harness started").with_source(LOG_SOURCE));

    let stats = MenuDispatchLoop::new(keys, console, platform, log).run();

    log.record(
        LogEntry::new(LogLevel::Info, "harness finished")
            .with_source(LOG_SOURCE)
            .with_field("fuzz_runs", stats.fuzz_runs)
            .with_field("normal_runs", stats.normal_runs)
            .with_field("dispatch_failures", stats.dispatch_failures),
    );
    HarnessOutcome::Completed(stats)
}

/// Prompts for one bounded line of operator input
///
/// Uses the configured cell bound. The submitted line is followed by a
/// newline on the console; a cancelled read prints nothing more.
pub fn prompt_line<K, W>(
    config: &HarnessConfig,
    prompt: &str,
    keys: &mut K,
    console: &mut W,
) -> Result<String, ReadLineError>
where
    K: KeySource + ?Sized,
    W: fmt::Write + ?Sized,
{
    let _ = console.write_str(prompt);
    let line = read_bounded_line(keys, console, config.max_cells)?;
    let _ = writeln!(console);
    Ok(line)
}
