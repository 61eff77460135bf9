//! Operator-facing report and structured log entry for one dispatch

use crate::dispatch::{DispatchError, DispatchResult};
use core::fmt;
use services_logger::{LogEntry, LogLevel};

/// Source tag on dispatch log entries
pub const LOG_SOURCE: &str = "fv_dispatch";

/// Writes the outcome of one dispatch to the console
pub fn report_dispatch<W>(outcome: &Result<DispatchResult, DispatchError>, console: &mut W)
where
    W: fmt::Write + ?Sized,
{
    match outcome {
        Ok(result) => {
            let _ = writeln!(console, "ProcessFirmwareVolume Status - {}", result.status);
            if let Some(handle) = result.handle {
                let _ = writeln!(console, "Firmware volume handle - {}", handle);
            }
        }
        Err(err) => {
            let _ = writeln!(console, "ProcessFirmwareVolume skipped - {}", err);
        }
    }
}

/// Builds the log entry for one dispatch
///
/// Completed calls log at `Info` whatever the status; a dispatch that never
/// reached the service logs at `Warn`.
pub fn dispatch_log_entry(outcome: &Result<DispatchResult, DispatchError>) -> LogEntry {
    match outcome {
        Ok(result) => LogEntry::new(LogLevel::Info, "ProcessFirmwareVolume")
            .with_source(LOG_SOURCE)
            .with_field("mode", result.mode)
            .with_field("base", format!("{:#x}", result.base_address))
            .with_field("length", format!("{:#x}", result.length))
            .with_field("status", result.status),
        Err(err) => LogEntry::new(LogLevel::Warn, err.to_string()).with_source(LOG_SOURCE),
    }
}
