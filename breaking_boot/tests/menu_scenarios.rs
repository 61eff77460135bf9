//! End-to-end menu scenarios against the simulated firmware

use breaking_boot::{run_harness, HarnessOutcome, MenuDispatchLoop, MenuStats, Platform};
use firmware_types::Status;
use fv_dispatch::{ServiceWrapper, FUZZ_LENGTH};
use input_types::{KeyEvent, ScanCode};
use services_logger::{LogLevel, MemoryLog};
use services_settings::HarnessConfig;
use sim_firmware::{
    EmptyHandoff, FaultPlan, ScriptedKeySource, ServiceFault, SimulatedDxe, SimulatedPlatform,
    STANDARD_FV_BASE, STANDARD_FV_LENGTH,
};

struct Run {
    stats: MenuStats,
    console: String,
    log: MemoryLog,
    calls: Vec<fv_dispatch::DispatchCall>,
}

fn run_menu(keys: Vec<KeyEvent>) -> Run {
    let platform = SimulatedPlatform::standard().unwrap();
    let mut service = ServiceWrapper::new(platform.dxe());
    let mut keys = ScriptedKeySource::new(keys);
    let mut console = String::new();
    let mut log = MemoryLog::new();

    let stats = MenuDispatchLoop::new(
        &mut keys,
        &mut console,
        Platform {
            handoff: &platform.handoff,
            memory: &platform.memory,
            service: &mut service,
        },
        &mut log,
    )
    .run();

    Run {
        stats,
        console,
        log,
        calls: service.calls().to_vec(),
    }
}

#[test]
fn fuzz_then_escape_dispatches_exactly_once() {
    let run = run_menu(vec![KeyEvent::char('f'), KeyEvent::escape()]);

    assert_eq!(run.stats.fuzz_runs, 1);
    assert_eq!(run.stats.dispatches(), 1);
    assert_eq!(run.calls.len(), 1);
    assert_eq!(run.calls[0].base_address, STANDARD_FV_BASE);
    assert_eq!(run.calls[0].length, FUZZ_LENGTH);
    assert_eq!(run.calls[0].status, Status::InvalidParameter);

    assert_eq!(
        run.console,
        "f\nEntered Fuzz\nProcessFirmwareVolume Status - Invalid Parameter\n"
    );
}

#[test]
fn fuzz_key_with_escape_scan_dispatches_then_exits() {
    let run = run_menu(vec![
        KeyEvent::new(u16::from(b'f'), ScanCode::ESC),
        KeyEvent::char('n'),
    ]);

    assert_eq!(run.stats.fuzz_runs, 1);
    assert_eq!(run.stats.normal_runs, 0);
    assert_eq!(run.calls.len(), 1);
    assert_eq!(run.calls[0].length, FUZZ_LENGTH);
    assert_eq!(
        run.console,
        "f\nEntered Fuzz\nProcessFirmwareVolume Status - Invalid Parameter\n"
    );
}

#[test]
fn support_then_normal_shows_help_once_and_dispatches_once() {
    let run = run_menu(vec![
        KeyEvent::char('s'),
        KeyEvent::char('n'),
        KeyEvent::escape(),
    ]);

    assert_eq!(run.stats.support_views, 1);
    assert_eq!(run.stats.normal_runs, 1);
    assert_eq!(run.stats.fuzz_runs, 0);
    assert_eq!(run.console.matches("Entered Support").count(), 1);
    assert_eq!(run.console.matches("Support Drivers:").count(), 1);

    assert_eq!(run.calls.len(), 1);
    assert_eq!(run.calls[0].length, STANDARD_FV_LENGTH);
    assert_eq!(run.calls[0].status, Status::Success);
    assert!(run
        .console
        .ends_with("ProcessFirmwareVolume Status - Success\nFirmware volume handle - Handle(0x1)\n"));
}

#[test]
fn uppercase_keys_and_noise_are_handled() {
    let run = run_menu(vec![
        KeyEvent::char('x'),
        KeyEvent::char('N'),
        KeyEvent::enter(),
        KeyEvent::char('F'),
        KeyEvent::escape(),
        KeyEvent::char('f'),
    ]);

    assert_eq!(run.stats.ignored_keys, 2);
    assert_eq!(run.stats.normal_runs, 1);
    assert_eq!(run.stats.fuzz_runs, 1);
    assert_eq!(run.calls.len(), 2);
}

#[test]
fn dispatches_are_logged_with_fields() {
    let run = run_menu(vec![KeyEvent::char('n'), KeyEvent::char('f')]);

    let dispatches: Vec<_> = run.log.with_message("ProcessFirmwareVolume").collect();
    assert_eq!(dispatches.len(), 2);
    assert_eq!(dispatches[0].field("mode"), Some("normal"));
    assert_eq!(dispatches[0].field("status"), Some("Success"));
    assert_eq!(dispatches[1].field("mode"), Some("fuzz"));
    assert_eq!(dispatches[1].field("length"), Some("0xffffffff"));

    assert!(run.log.with_message("menu transition").all(|e| e.level == LogLevel::Debug));
}

#[test]
fn missing_volume_keeps_the_loop_running() {
    let platform = SimulatedPlatform::standard().unwrap();
    let mut service = ServiceWrapper::new(platform.dxe());
    let mut keys = ScriptedKeySource::new([
        KeyEvent::char('f'),
        KeyEvent::char('n'),
        KeyEvent::char('s'),
        KeyEvent::escape(),
    ]);
    let mut console = String::new();
    let mut log = MemoryLog::new();

    let stats = MenuDispatchLoop::new(
        &mut keys,
        &mut console,
        Platform {
            handoff: &EmptyHandoff,
            memory: &platform.memory,
            service: &mut service,
        },
        &mut log,
    )
    .run();

    assert_eq!(stats.dispatch_failures, 2);
    assert_eq!(stats.support_views, 1);
    assert!(service.calls().is_empty());
    assert_eq!(
        console
            .matches("ProcessFirmwareVolume skipped - No firmware volume found")
            .count(),
        2
    );
    assert_eq!(log.at_least(LogLevel::Warn).count(), 2);
}

#[test]
fn failing_service_status_is_reported_verbatim() {
    let platform = SimulatedPlatform::standard().unwrap();
    let plan = FaultPlan::new().with_service_fault(ServiceFault::FailNext {
        count: 1,
        status: Status::VolumeCorrupted,
    });
    let mut service = ServiceWrapper::new(SimulatedDxe::with_faults(&platform.memory, plan));
    let mut keys = ScriptedKeySource::new([KeyEvent::char('n'), KeyEvent::char('n')]);
    let mut console = String::new();
    let mut log = MemoryLog::new();

    let stats = MenuDispatchLoop::new(
        &mut keys,
        &mut console,
        Platform {
            handoff: &platform.handoff,
            memory: &platform.memory,
            service: &mut service,
        },
        &mut log,
    )
    .run();

    assert_eq!(stats.normal_runs, 2);
    assert_eq!(stats.dispatch_failures, 0);
    assert!(console.contains("ProcessFirmwareVolume Status - Volume Corrupt\n"));
    assert!(console.contains("ProcessFirmwareVolume Status - Success\n"));
}

#[test]
fn harness_prints_banner_then_runs_menu() {
    let platform = SimulatedPlatform::standard().unwrap();
    let mut service = ServiceWrapper::new(platform.dxe());
    let mut keys = ScriptedKeySource::from_text("f");
    let mut console = String::new();
    let mut log = MemoryLog::new();

    let outcome = run_harness(
        &HarnessConfig::default(),
        &mut keys,
        &mut console,
        Platform {
            handoff: &platform.handoff,
            memory: &platform.memory,
            service: &mut service,
        },
        &mut log,
    );

    match outcome {
        HarnessOutcome::Completed(stats) => assert_eq!(stats.fuzz_runs, 1),
        HarnessOutcome::Disabled => panic!("harness should be enabled by default"),
    }
    assert!(console.starts_with("Breaking Boot fuzzer\nThis shell application"));
    assert_eq!(service.calls().len(), 1);
    assert_eq!(log.with_message("harness finished").count(), 1);
}
