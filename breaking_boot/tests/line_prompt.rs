//! Bounded line prompt driven through the simulated key sources

use breaking_boot::prompt_line;
use hal::BlockingKeySource;
use input_types::{KeyEvent, WIDE_CHAR};
use line_editor::{display_width, ReadLineError, DEFAULT_MAX_CELLS, DEFAULT_MAX_CHARS};
use services_settings::HarnessConfig;
use sim_firmware::{FlakyKeyboard, ScriptedKeySource};

#[test]
fn type_erase_submit() {
    let mut keys = ScriptedKeySource::new([
        KeyEvent::char('a'),
        KeyEvent::char('b'),
        KeyEvent::backspace(),
        KeyEvent::enter(),
    ]);
    let mut console = String::new();

    let line = prompt_line(&HarnessConfig::default(), "> ", &mut keys, &mut console).unwrap();

    assert_eq!(line, "a");
    assert_eq!(console, "> ab\u{8}\n");
}

#[test]
fn wide_run_fills_bound_early() {
    let mut script = vec![KeyEvent::unit(WIDE_CHAR)];
    script.extend((0..11).map(|_| KeyEvent::char('W')));
    script.push(KeyEvent::enter());
    let mut keys = ScriptedKeySource::new(script);
    let mut console = String::new();

    let line = prompt_line(&HarnessConfig::default(), "", &mut keys, &mut console).unwrap();

    // One wide directive, then 'W' at 2 cells each plus the terminator: 5 fit in 12
    assert_eq!(line.chars().filter(|c| *c == 'W').count(), 5);
    let units: Vec<u16> = line.encode_utf16().collect();
    assert!(display_width(&units) <= DEFAULT_MAX_CELLS);
}

#[test]
fn escape_cancels_through_flaky_device() {
    let device = FlakyKeyboard::new()
        .key_after(2, KeyEvent::char('x'))
        .device_error()
        .key_after(1, KeyEvent::escape());
    let mut keys = BlockingKeySource::new(device);
    let mut console = String::new();

    let result = prompt_line(&HarnessConfig::default(), "> ", &mut keys, &mut console);

    assert_eq!(result, Err(ReadLineError::Cancelled));
    assert_eq!(console, "> x");
    assert_eq!(keys.retries(), 4);
}

#[test]
fn configured_bound_is_used() {
    let config = HarnessConfig {
        max_cells: 4,
        ..HarnessConfig::default()
    };
    let mut keys = ScriptedKeySource::from_text("abcdef");
    keys.push(KeyEvent::enter());
    let mut console = String::new();

    let line = prompt_line(&config, "", &mut keys, &mut console).unwrap();
    assert_eq!(line, "abc");
}

#[test]
fn default_bound_admits_eleven_narrow_characters() {
    let mut keys = ScriptedKeySource::from_text("ABCDEFGHIJKL");
    keys.push(KeyEvent::enter());
    let mut console = String::new();

    let line = prompt_line(&HarnessConfig::default(), "", &mut keys, &mut console).unwrap();

    assert_eq!(line, "ABCDEFGHIJK");
    assert_eq!(line.len(), DEFAULT_MAX_CHARS);
    assert_eq!(console, "ABCDEFGHIJK\n");
}
