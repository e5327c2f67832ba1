//! Headless end-to-end runs: scripted key events pushed through the runner
//! into a live drill, no terminal involved.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use kombo::{
    drill::Drill,
    generator::Alphabet,
    runtime::{DrillEvent, Runner, TestEventSource},
    selection::Mode,
    session::KeyOutcome,
};
use std::time::Duration;

fn key(c: char) -> DrillEvent {
    DrillEvent::Key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE))
}

/// Pumps the runner until the scripted events are consumed, feeding every
/// character key into the drill.
fn pump(runner: &Runner<TestEventSource>, drill: &mut Drill, events: usize) {
    let mut seen = 0;
    while seen < events {
        match runner.step() {
            DrillEvent::Key(k) => {
                seen += 1;
                if let KeyCode::Char(c) = k.code {
                    drill.on_key(c);
                }
            }
            DrillEvent::Resize => seen += 1,
            DrillEvent::Tick => {}
        }
    }
}

#[test]
fn test_scripted_keys_complete_words() {
    let (tx, source) = TestEventSource::channel();
    let runner = Runner::new(source, Duration::from_millis(5));
    let mut drill = Drill::new(1, Alphabet::parse("ab").unwrap());

    // With one-letter words over {a, b} the first word and its follow-up
    // are forced: completing one always serves the other.
    let first = drill.session().word().slug.chars().next().unwrap();
    let second = if first == 'a' { 'b' } else { 'a' };

    tx.send(key(first)).unwrap();
    tx.send(key(second)).unwrap();
    pump(&runner, &mut drill, 2);

    assert_eq!(drill.words_completed(), 2);
    assert_eq!(drill.mode(), Mode::Drill);
    assert!(drill.scores().all_tested());
}

#[test]
fn test_wrong_key_resets_the_meter_mid_run() {
    let (tx, source) = TestEventSource::channel();
    let runner = Runner::new(source, Duration::from_millis(5));
    let mut drill = Drill::new(1, Alphabet::parse("ab").unwrap());

    let first = drill.session().word().slug.chars().next().unwrap();
    tx.send(key(first)).unwrap();
    // The served word flipped, so the same letter is now a miss.
    tx.send(key(first)).unwrap();
    pump(&runner, &mut drill, 2);

    assert_eq!(drill.words_completed(), 1);
    assert_eq!(drill.meter.target(), 0);
}

#[test]
fn test_resize_and_tick_leave_the_drill_untouched() {
    let (tx, source) = TestEventSource::channel();
    let runner = Runner::new(source, Duration::from_millis(1));
    let mut drill = Drill::new(2, Alphabet::parse("ab").unwrap());

    tx.send(DrillEvent::Resize).unwrap();
    pump(&runner, &mut drill, 1);
    // Channel now idle, so the next step is a tick.
    assert!(matches!(runner.step(), DrillEvent::Tick));

    assert_eq!(drill.words_completed(), 0);
    assert_eq!(drill.session().entry(), "");
}

#[test]
fn test_non_letter_keys_count_as_misses() {
    let mut drill = Drill::new(2, Alphabet::parse("nt").unwrap());
    let expected = drill.session().expected_char().unwrap();
    drill.on_key(expected);
    assert_eq!(drill.session().typed(), 1);

    assert!(matches!(drill.on_key('q'), KeyOutcome::Miss));
    assert_eq!(drill.session().typed(), 0, "entry cleared after the miss");
}
