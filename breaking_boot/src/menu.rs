//! Menu dispatch loop
//!
//! One key per iteration, one branch per key. The key's character picks the
//! branch; the Escape scan code is checked after it and ends the loop.
//! Dispatch failures are reported and the loop carries on.
//!
//! ```text
//! AwaitingCommand --f/F--> RunningFuzzMode   --dispatch done--> AwaitingCommand
//! AwaitingCommand --n/N--> RunningNormalMode --dispatch done--> AwaitingCommand
//! AwaitingCommand --s/S--> ShowingSupport    --help shown-----> AwaitingCommand
//! AwaitingCommand --Esc--> Exiting
//! ```

use crate::help::HelpTopic;
use core::fmt;
use firmware_types::{FirmwareVolumeService, HandoffRecords};
use fv_dispatch::{dispatch_firmware_volume, dispatch_log_entry, report_dispatch, DispatchMode};
use hal::{KeySource, PhysicalMemory};
use input_types::KeyEvent;
use services_logger::{LogEntry, LogLevel, LogSink};

const LOG_SOURCE: &str = "menu";

/// Menu state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MenuState {
    AwaitingCommand,
    RunningFuzzMode,
    RunningNormalMode,
    ShowingSupport,
    Exiting,
}

impl MenuState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, MenuState::Exiting)
    }
}

impl fmt::Display for MenuState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MenuState::AwaitingCommand => "AwaitingCommand",
            MenuState::RunningFuzzMode => "RunningFuzzMode",
            MenuState::RunningNormalMode => "RunningNormalMode",
            MenuState::ShowingSupport => "ShowingSupport",
            MenuState::Exiting => "Exiting",
        };
        f.write_str(name)
    }
}

/// What the operator asked for with one key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuIntent {
    Fuzz,
    Normal,
    Support,
    Exit,
    Ignore,
}

impl MenuIntent {
    /// Decodes one key
    ///
    /// Commands come from the key's character, in either case. A key with no
    /// command character and the Escape scan code decodes to `Exit`.
    pub fn decode(key: &KeyEvent) -> Self {
        match key.as_char() {
            Some('f' | 'F') => MenuIntent::Fuzz,
            Some('n' | 'N') => MenuIntent::Normal,
            Some('s' | 'S') => MenuIntent::Support,
            _ if key.is_escape() => MenuIntent::Exit,
            _ => MenuIntent::Ignore,
        }
    }

    /// State the loop passes through while handling this intent
    pub fn target_state(&self) -> MenuState {
        match self {
            MenuIntent::Fuzz => MenuState::RunningFuzzMode,
            MenuIntent::Normal => MenuState::RunningNormalMode,
            MenuIntent::Support => MenuState::ShowingSupport,
            MenuIntent::Exit => MenuState::Exiting,
            MenuIntent::Ignore => MenuState::AwaitingCommand,
        }
    }
}

/// Tally of what one loop did
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MenuStats {
    pub fuzz_runs: usize,
    pub normal_runs: usize,
    pub support_views: usize,
    pub ignored_keys: usize,
    /// Dispatches that never reached the service
    pub dispatch_failures: usize,
}

impl MenuStats {
    pub fn dispatches(&self) -> usize {
        self.fuzz_runs + self.normal_runs
    }
}

/// Firmware capabilities borrowed by the loop
pub struct Platform<'a, S: ?Sized> {
    pub handoff: &'a dyn HandoffRecords,
    pub memory: &'a dyn PhysicalMemory,
    pub service: &'a mut S,
}

/// The top-level operator loop
pub struct MenuDispatchLoop<'a, K: ?Sized, W: ?Sized, S: ?Sized, L: ?Sized> {
    keys: &'a mut K,
    console: &'a mut W,
    platform: Platform<'a, S>,
    log: &'a mut L,
    state: MenuState,
    stats: MenuStats,
}

impl<'a, K, W, S, L> MenuDispatchLoop<'a, K, W, S, L>
where
    K: KeySource + ?Sized,
    W: fmt::Write + ?Sized,
    S: FirmwareVolumeService + ?Sized,
    L: LogSink + ?Sized,
{
    pub fn new(
        keys: &'a mut K,
        console: &'a mut W,
        platform: Platform<'a, S>,
        log: &'a mut L,
    ) -> Self {
        Self {
            keys,
            console,
            platform,
            log,
            state: MenuState::AwaitingCommand,
            stats: MenuStats::default(),
        }
    }

    pub fn state(&self) -> MenuState {
        self.state
    }

    pub fn stats(&self) -> MenuStats {
        self.stats
    }

    /// Runs until the operator presses Escape
    pub fn run(&mut self) -> MenuStats {
        while !self.state.is_terminal() {
            let key = self.keys.wait_for_key();
            self.step(key);
        }
        self.stats
    }

    /// Handles one key and returns the state the loop is left in
    ///
    /// The result is always `AwaitingCommand` or `Exiting`. A key carrying
    /// both a command character and the Escape scan code runs the command,
    /// then exits. Once exiting, further keys are ignored.
    pub fn step(&mut self, key: KeyEvent) -> MenuState {
        if self.state.is_terminal() {
            return self.state;
        }

        if let Some(ch) = key.as_char() {
            let _ = writeln!(self.console, "{}", ch);
        }

        let intent = MenuIntent::decode(&key);
        match intent {
            MenuIntent::Exit => {
                self.transition(MenuState::Exiting);
                return self.state;
            }
            MenuIntent::Ignore => {
                self.stats.ignored_keys += 1;
                return self.state;
            }
            MenuIntent::Fuzz => {
                self.transition(MenuState::RunningFuzzMode);
                let _ = writeln!(self.console, "Entered Fuzz");
                self.dispatch(DispatchMode::Fuzz);
                self.stats.fuzz_runs += 1;
            }
            MenuIntent::Normal => {
                self.transition(MenuState::RunningNormalMode);
                let _ = writeln!(self.console, "Entered Normal");
                self.dispatch(DispatchMode::Normal);
                self.stats.normal_runs += 1;
            }
            MenuIntent::Support => {
                self.transition(MenuState::ShowingSupport);
                let _ = writeln!(self.console, "Entered Support");
                HelpTopic::SupportDrivers.render(self.console);
                HelpTopic::Usage.render(self.console);
                self.stats.support_views += 1;
            }
        }

        if key.is_escape() {
            self.transition(MenuState::Exiting);
        } else {
            self.transition(MenuState::AwaitingCommand);
        }
        self.state
    }

    fn dispatch(&mut self, mode: DispatchMode) {
        let outcome = dispatch_firmware_volume(
            mode,
            self.platform.handoff,
            self.platform.memory,
            &mut *self.platform.service,
        );
        if outcome.is_err() {
            self.stats.dispatch_failures += 1;
        }
        report_dispatch(&outcome, self.console);
        self.log.record(dispatch_log_entry(&outcome));
    }

    fn transition(&mut self, next: MenuState) {
        self.log.record(
            LogEntry::new(LogLevel::Debug, "menu transition")
                .with_source(LOG_SOURCE)
                .with_field("from", self.state)
                .with_field("to", next),
        );
        self.state = next;
    }
}
