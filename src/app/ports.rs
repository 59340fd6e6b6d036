//! Port traits — the hexagonal boundary between the rule engine and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ Controller (domain)
//! ```
//!
//! Driven adapters (GPIO backends, event sinks, clocks) implement these
//! traits.  The [`Controller`](super::service::Controller) owns its
//! [`PinPort`] and receives the others at call sites, so the engine never
//! touches hardware or wall-clock time directly.

use core::time::Duration;

use crate::error::PinError;

/// Physical header pin number.
pub type PinId = u8;

/// Electrical level of a digital pin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Level {
    Low,
    High,
}

impl Level {
    pub fn is_high(self) -> bool {
        self == Self::High
    }
}

impl From<bool> for Level {
    fn from(high: bool) -> Self {
        if high { Self::High } else { Self::Low }
    }
}

// ───────────────────────────────────────────────────────────────
// Pin port (driven adapter: domain ↔ GPIO)
// ───────────────────────────────────────────────────────────────

/// Read/write access to single digital pins.
///
/// Every call is synchronous and may fail.  The controller never retries:
/// a failed read or write is reported as-is.
pub trait PinPort {
    /// Sample the level currently present on `pin`.
    fn read(&mut self, pin: PinId) -> Result<Level, PinError>;

    /// Drive `pin` to `level`.
    fn write(&mut self, pin: PinId, level: Level) -> Result<(), PinError>;

    /// Prepare `pin` for reading.  Called once per switch at startup.
    fn configure_input(&mut self, _pin: PinId) -> Result<(), PinError> {
        Ok(())
    }

    /// Prepare `pin` for driving.  Called once per light at startup.
    fn configure_output(&mut self, _pin: PinId) -> Result<(), PinError> {
        Ok(())
    }
}

impl<P: PinPort + ?Sized> PinPort for &mut P {
    fn read(&mut self, pin: PinId) -> Result<Level, PinError> {
        (**self).read(pin)
    }

    fn write(&mut self, pin: PinId, level: Level) -> Result<(), PinError> {
        (**self).write(pin, level)
    }

    fn configure_input(&mut self, pin: PinId) -> Result<(), PinError> {
        (**self).configure_input(pin)
    }

    fn configure_output(&mut self, pin: PinId) -> Result<(), PinError> {
        (**self).configure_output(pin)
    }
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → logging / telemetry)
// ───────────────────────────────────────────────────────────────

/// The engine emits structured [`EngineEvent`](super::events::EngineEvent)s
/// through this port.  Nothing in the engine depends on what the sink does
/// with them.
pub trait EventSink {
    fn emit(&mut self, event: &super::events::EngineEvent<'_>);
}

/// Sink that drops everything.
pub struct NullSink;

impl EventSink for NullSink {
    fn emit(&mut self, _event: &super::events::EngineEvent<'_>) {}
}

// ───────────────────────────────────────────────────────────────
// Clock port (driven adapter: domain ↔ monotonic time)
// ───────────────────────────────────────────────────────────────

/// Monotonic time source used by the poll loop.
pub trait ClockPort {
    /// Time elapsed since the clock was created.
    fn now(&self) -> Duration;

    /// Block the calling thread for `duration`.
    fn sleep(&mut self, duration: Duration);
}
