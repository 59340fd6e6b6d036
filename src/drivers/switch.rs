//! Debounced switch input with release-pulse detection.
//!
//! ## Polarity
//!
//! Switches are active-low by default (momentary switch to ground with a
//! pull-up): the switch is pressed while its pin reads `LOW`.  Setting
//! `invert` makes it active-high.
//!
//! ## Debounce
//!
//! | Raw vs. accepted | Elapsed since last accepted change | Result                  |
//! |------------------|------------------------------------|-------------------------|
//! | same             | any                                | nothing                 |
//! | different        | `< threshold`                      | ignored as noise        |
//! | different        | `>= threshold`                     | accepted, timestamp set |
//!
//! An accepted pressed → released change carries the elapsed time as the
//! held duration.  Before the first accepted change the timestamp is the
//! controller's start time, so a switch that is already held at startup
//! still has to survive one debounce interval.

use core::time::Duration;

use serde::{Deserialize, Serialize};

use crate::app::ports::{Level, PinId};

/// A named switch bound to one input pin.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SwitchSpec {
    pub name: String,
    pub pin: PinId,
    #[serde(default)]
    pub invert: bool,
}

impl SwitchSpec {
    /// Logical pressed state for a raw pin level.
    pub fn is_pressed(&self, raw: Level) -> bool {
        (raw == Level::Low) != self.invert
    }
}

/// An accepted change of a switch's debounced state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Pressed,
    Released { held: Duration },
}

/// Per-switch debounce bookkeeping.
#[derive(Debug, Clone)]
pub struct Debouncer {
    threshold: Duration,
    pressed: bool,
    last_change: Duration,
}

impl Debouncer {
    /// `started_at` is the uptime the controller started at.
    pub fn new(threshold: Duration, started_at: Duration) -> Self {
        Self {
            threshold,
            pressed: false,
            last_change: started_at,
        }
    }

    /// Feed one polarity-corrected sample taken at `now`.
    pub fn update(&mut self, raw_pressed: bool, now: Duration) -> Option<Transition> {
        if raw_pressed == self.pressed {
            return None;
        }

        let elapsed = now.saturating_sub(self.last_change);
        if elapsed < self.threshold {
            return None;
        }

        self.pressed = raw_pressed;
        self.last_change = now;

        if raw_pressed {
            Some(Transition::Pressed)
        } else {
            Some(Transition::Released { held: elapsed })
        }
    }

    /// Last accepted (debounced) state.
    pub fn is_pressed(&self) -> bool {
        self.pressed
    }

    /// Uptime of the last accepted change.
    pub fn last_change(&self) -> Duration {
        self.last_change
    }
}

/// Catalog entry plus its debounce state.
#[derive(Debug, Clone)]
pub struct Switch {
    pub spec: SwitchSpec,
    debouncer: Debouncer,
}

impl Switch {
    pub fn new(spec: SwitchSpec, threshold: Duration, started_at: Duration) -> Self {
        Self {
            spec,
            debouncer: Debouncer::new(threshold, started_at),
        }
    }

    /// Run the debounce state machine on a raw pin level.
    pub fn sample(&mut self, raw: Level, now: Duration) -> Option<Transition> {
        let pressed = self.spec.is_pressed(raw);
        self.debouncer.update(pressed, now)
    }

    pub fn is_pressed(&self) -> bool {
        self.debouncer.is_pressed()
    }

    /// Restart debounce timing from `started_at`, forgetting any history.
    pub fn reset(&mut self, threshold: Duration, started_at: Duration) {
        self.debouncer = Debouncer::new(threshold, started_at);
    }
}
