use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::thread;
use std::time::Duration;

use crossterm::event::{self, Event as CtEvent, KeyEvent};

/// Unified event type consumed by the drill loop. Keystrokes and resizes
/// arrive from the terminal; Tick fires on the redraw cadence so the meter
/// tween keeps moving between keypresses.
#[derive(Clone, Debug)]
pub enum DrillEvent {
    Key(KeyEvent),
    Resize,
    Tick,
}

/// Where drill events come from. The production implementation reads the
/// terminal; headless tests feed a channel instead.
pub trait DrillEventSource: Send + 'static {
    /// Blocks for up to `timeout` waiting for an event.
    fn recv_timeout(&self, timeout: Duration) -> Result<DrillEvent, RecvTimeoutError>;
}

/// Terminal-backed event source. A background thread blocks on crossterm
/// reads and forwards keys and resizes; it winds down once the receiving
/// side is dropped.
pub struct CrosstermEventSource {
    rx: Receiver<DrillEvent>,
}

impl CrosstermEventSource {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel();
        thread::spawn(move || forward_terminal_events(tx));
        Self { rx }
    }
}

fn forward_terminal_events(tx: Sender<DrillEvent>) {
    loop {
        let forwarded = match event::read() {
            Ok(CtEvent::Key(key)) => tx.send(DrillEvent::Key(key)),
            Ok(CtEvent::Resize(_, _)) => tx.send(DrillEvent::Resize),
            Ok(_) => Ok(()),
            Err(_) => break,
        };
        if forwarded.is_err() {
            break;
        }
    }
}

impl Default for CrosstermEventSource {
    fn default() -> Self {
        Self::new()
    }
}

impl DrillEventSource for CrosstermEventSource {
    fn recv_timeout(&self, timeout: Duration) -> Result<DrillEvent, RecvTimeoutError> {
        self.rx.recv_timeout(timeout)
    }
}

/// Channel-backed source for headless tests. Scripted events go in through
/// the sender; once it is dropped the runner degrades to pure ticks.
pub struct TestEventSource {
    rx: Receiver<DrillEvent>,
}

impl TestEventSource {
    /// A source plus the sender that scripts it.
    pub fn channel() -> (Sender<DrillEvent>, Self) {
        let (tx, rx) = mpsc::channel();
        (tx, Self { rx })
    }
}

impl DrillEventSource for TestEventSource {
    fn recv_timeout(&self, timeout: Duration) -> Result<DrillEvent, RecvTimeoutError> {
        self.rx.recv_timeout(timeout)
    }
}

/// Pulls the next event for the drill loop, synthesizing a Tick whenever the
/// source stays quiet for one tick interval.
pub struct Runner<E: DrillEventSource> {
    source: E,
    tick_rate: Duration,
}

impl<E: DrillEventSource> Runner<E> {
    pub fn new(source: E, tick_rate: Duration) -> Self {
        Self { source, tick_rate }
    }

    pub fn step(&self) -> DrillEvent {
        match self.source.recv_timeout(self.tick_rate) {
            Ok(event) => event,
            Err(_) => DrillEvent::Tick,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use crossterm::event::{KeyCode, KeyModifiers};

    fn runner() -> (Sender<DrillEvent>, Runner<TestEventSource>) {
        let (tx, source) = TestEventSource::channel();
        (tx, Runner::new(source, Duration::from_millis(1)))
    }

    #[test]
    fn test_step_passes_queued_events_through_in_order() {
        let (tx, runner) = runner();
        tx.send(DrillEvent::Key(KeyEvent::new(
            KeyCode::Char('n'),
            KeyModifiers::NONE,
        )))
        .unwrap();
        tx.send(DrillEvent::Resize).unwrap();

        assert_matches!(runner.step(), DrillEvent::Key(k) if k.code == KeyCode::Char('n'));
        assert_matches!(runner.step(), DrillEvent::Resize);
    }

    #[test]
    fn test_step_ticks_when_the_source_is_quiet() {
        let (_tx, runner) = runner();
        assert_matches!(runner.step(), DrillEvent::Tick);
    }

    #[test]
    fn test_step_keeps_ticking_after_the_sender_is_gone() {
        let (tx, runner) = runner();
        drop(tx);
        assert_matches!(runner.step(), DrillEvent::Tick);
        assert_matches!(runner.step(), DrillEvent::Tick);
    }
}
