//! Fixed-interval poll loop.
//!
//! ```text
//!   ClockPort ──▶ Ticker ──▶ Controller::tick ──▶ EventSink
//!        ▲                         │
//!        └──────── sleep ──────────┘
//! ```
//!
//! Ticks are scheduled on a fixed grid (`start + k * interval`).  A tick
//! that overruns its slot delays the next one: the next tick runs as soon
//! as the late one finishes and the grid is re-anchored there.  Ticks never
//! overlap and missed slots are never made up in a burst.

use core::convert::Infallible;
use core::time::Duration;

use log::info;

use crate::app::ports::{ClockPort, EventSink, PinPort};
use crate::app::service::{Controller, TickReport};
use crate::error::EngineError;

/// Deadline bookkeeping for a fixed-interval tick.
#[derive(Debug, Clone)]
pub struct Ticker {
    interval: Duration,
    next: Duration,
}

impl Ticker {
    /// First tick is due one interval after `now`.
    pub fn new(interval: Duration, now: Duration) -> Self {
        Self {
            interval,
            next: now + interval,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// When the next tick is due.
    pub fn deadline(&self) -> Duration {
        self.next
    }

    /// How long to wait from `now` until the next tick (zero if late).
    pub fn wait_from(&self, now: Duration) -> Duration {
        self.next.saturating_sub(now)
    }

    /// Record that a tick started at `now` and schedule the following one.
    pub fn fired(&mut self, now: Duration) {
        self.next = if now > self.next {
            now + self.interval
        } else {
            self.next + self.interval
        };
    }
}

/// Drives a [`Controller`] from a [`ClockPort`].
pub struct PollLoop<C> {
    clock: C,
    ticker: Ticker,
}

impl<C: ClockPort> PollLoop<C> {
    pub fn new(clock: C, interval: Duration) -> Self {
        let ticker = Ticker::new(interval, clock.now());
        Self { clock, ticker }
    }

    /// Start the controller at the current uptime.
    pub fn start<P: PinPort>(
        &mut self,
        controller: &mut Controller<P>,
        sink: &mut impl EventSink,
    ) -> Result<(), EngineError> {
        let now = self.clock.now();
        controller.start(now, sink)?;
        self.ticker = Ticker::new(self.ticker.interval(), now);
        info!("Polling every {:?}", self.ticker.interval());
        Ok(())
    }

    /// Sleep until the next tick is due, then run it.
    pub fn step<P: PinPort>(
        &mut self,
        controller: &mut Controller<P>,
        sink: &mut impl EventSink,
    ) -> Result<TickReport, EngineError> {
        let wait = self.ticker.wait_from(self.clock.now());
        if !wait.is_zero() {
            self.clock.sleep(wait);
        }
        let now = self.clock.now();
        self.ticker.fired(now);
        controller.tick(now, sink)
    }

    /// Tick forever.  Only returns when a tick reports a fault.
    pub fn run<P: PinPort>(
        &mut self,
        controller: &mut Controller<P>,
        sink: &mut impl EventSink,
    ) -> Result<Infallible, EngineError> {
        loop {
            self.step(controller, sink)?;
        }
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }
}
