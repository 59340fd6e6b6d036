//! Mock hardware adapters for integration tests.
//!
//! Records every pin call so tests can assert on the full command history
//! without touching real GPIO.

use std::cell::{Cell, RefCell};
use std::collections::{HashMap, HashSet};
use std::rc::Rc;
use std::time::Duration;

use lablights::app::events::EngineEvent;
use lablights::app::ports::{ClockPort, EventSink, Level, PinId, PinPort};
use lablights::error::{PinError, PinErrorKind};

// ── Pin call record ───────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub enum PinCall {
    ConfigureInput(PinId),
    ConfigureOutput(PinId),
    Read(PinId),
    Write(PinId, Level),
}

// ── MockPins ──────────────────────────────────────────────────

/// Pins float high (released, for active-low switches) unless set.
#[derive(Default)]
pub struct MockPins {
    pub calls: Vec<PinCall>,
    levels: HashMap<PinId, Level>,
    pub failing_reads: HashSet<PinId>,
    pub failing_writes: HashSet<PinId>,
}

#[allow(dead_code)]
impl MockPins {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_level(&mut self, pin: PinId, level: Level) {
        self.levels.insert(pin, level);
    }

    pub fn writes(&self) -> Vec<(PinId, Level)> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                PinCall::Write(pin, level) => Some((*pin, *level)),
                _ => None,
            })
            .collect()
    }

    pub fn writes_to(&self, pin: PinId) -> Vec<Level> {
        self.writes()
            .into_iter()
            .filter(|(p, _)| *p == pin)
            .map(|(_, level)| level)
            .collect()
    }

    pub fn clear_calls(&mut self) {
        self.calls.clear();
    }
}

impl PinPort for MockPins {
    fn read(&mut self, pin: PinId) -> Result<Level, PinError> {
        self.calls.push(PinCall::Read(pin));
        if self.failing_reads.contains(&pin) {
            return Err(PinError::new(
                pin,
                PinErrorKind::Io(std::io::ErrorKind::PermissionDenied, "permission denied".into()),
            ));
        }
        Ok(self.levels.get(&pin).copied().unwrap_or(Level::High))
    }

    fn write(&mut self, pin: PinId, level: Level) -> Result<(), PinError> {
        if self.failing_writes.contains(&pin) {
            return Err(PinError::new(
                pin,
                PinErrorKind::Io(std::io::ErrorKind::PermissionDenied, "permission denied".into()),
            ));
        }
        self.calls.push(PinCall::Write(pin, level));
        Ok(())
    }

    fn configure_input(&mut self, pin: PinId) -> Result<(), PinError> {
        self.calls.push(PinCall::ConfigureInput(pin));
        Ok(())
    }

    fn configure_output(&mut self, pin: PinId) -> Result<(), PinError> {
        self.calls.push(PinCall::ConfigureOutput(pin));
        Ok(())
    }
}

// ── RecordingSink ─────────────────────────────────────────────

/// Owned copy of an [`EngineEvent`].
#[derive(Debug, Clone, PartialEq)]
pub enum Recorded {
    Started,
    Activated(String),
    Released(String, Duration),
    Light(String, bool),
    Fired(usize),
    Aborted(usize),
}

#[derive(Default)]
pub struct RecordingSink {
    pub events: Vec<Recorded>,
}

#[allow(dead_code)]
impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fired(&self) -> Vec<usize> {
        self.events
            .iter()
            .filter_map(|e| match e {
                Recorded::Fired(i) => Some(*i),
                _ => None,
            })
            .collect()
    }
}

impl EventSink for RecordingSink {
    fn emit(&mut self, event: &EngineEvent<'_>) {
        let rec = match event {
            EngineEvent::Started { .. } => Recorded::Started,
            EngineEvent::SwitchActivated { name, .. } => Recorded::Activated((*name).to_owned()),
            EngineEvent::SwitchReleased { name, held, .. } => {
                Recorded::Released((*name).to_owned(), *held)
            }
            EngineEvent::LightCommanded { name, on, .. } => Recorded::Light((*name).to_owned(), *on),
            EngineEvent::ActionFired { index } => Recorded::Fired(*index),
            EngineEvent::ActionAborted { index, .. } => Recorded::Aborted(*index),
        };
        self.events.push(rec);
    }
}

// ── FakeClock ─────────────────────────────────────────────────

/// Clock that only moves when slept on or advanced by the test.
#[derive(Clone, Default)]
pub struct FakeClock {
    now: Rc<Cell<Duration>>,
    pub sleeps: Rc<RefCell<Vec<Duration>>>,
}

#[allow(dead_code)]
impl FakeClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get() + by);
    }
}

impl ClockPort for FakeClock {
    fn now(&self) -> Duration {
        self.now.get()
    }

    fn sleep(&mut self, duration: Duration) {
        self.sleeps.borrow_mut().push(duration);
        self.advance(duration);
    }
}
