//! Action matchers — flat conjunctions over switch, light and pulse state.
//!
//! Conditions are checked in a fixed order and evaluation stops at the
//! first one that fails:
//!
//! 1. every `lights_off` light is off
//! 2. every `lights_on` light is on
//! 3. every `switches_off` switch is released
//! 4. every `switches_on` switch is pressed
//! 5. every `switches_pressed` switch released on this tick after being held
//!    for at least `min_duration_ms` and, when `max_duration_ms` is nonzero,
//!    at most `max_duration_ms`
//!
//! A matcher with no conditions always matches.

use core::time::Duration;

use serde::{Deserialize, Serialize};

use crate::state::RuntimeState;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ActionMatcher {
    pub switches_on: Vec<String>,
    pub switches_off: Vec<String>,
    pub switches_pressed: Vec<String>,
    pub lights_on: Vec<String>,
    pub lights_off: Vec<String>,
    pub min_duration_ms: u64,
    /// Zero means no upper bound.
    pub max_duration_ms: u64,
}

impl ActionMatcher {
    pub fn min_duration(&self) -> Duration {
        Duration::from_millis(self.min_duration_ms)
    }

    /// `None` when the press length is unbounded.
    pub fn max_duration(&self) -> Option<Duration> {
        (self.max_duration_ms > 0).then(|| Duration::from_millis(self.max_duration_ms))
    }

    /// Pure predicate over one state snapshot.
    pub fn matches(&self, state: &RuntimeState) -> bool {
        if self.lights_off.iter().any(|id| state.light_on(id)) {
            return false;
        }
        if !self.lights_on.iter().all(|id| state.light_on(id)) {
            return false;
        }
        if self.switches_off.iter().any(|id| state.switch_on(id)) {
            return false;
        }
        if !self.switches_on.iter().all(|id| state.switch_on(id)) {
            return false;
        }

        let min = self.min_duration();
        let max = self.max_duration();
        self.switches_pressed.iter().all(|id| {
            let held = state.pressed_for(id);
            !held.is_zero() && held >= min && max.is_none_or(|max| held <= max)
        })
    }
}
