//! Runtime state — the only mutable part of the controller.
//!
//! One value lives for the whole process.  Each poll tick bumps
//! [`RuntimeState::tick`], clears the release pulses, folds in the
//! debounced switch levels, and then lets fired actions mutate the light
//! map.  Lookups of names that are not present read as `false` / zero.

use core::time::Duration;
use std::collections::HashMap;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuntimeState {
    tick: u64,
    switches: HashMap<String, bool>,
    lights: HashMap<String, bool>,
    switches_pressed: HashMap<String, Duration>,
}

impl RuntimeState {
    /// State with every listed switch released, every light off and no pulses.
    pub fn new<'a, S, L>(switches: S, lights: L) -> Self
    where
        S: IntoIterator<Item = &'a str>,
        L: IntoIterator<Item = &'a str>,
    {
        let mut state = Self::default();
        for name in switches {
            state.switches.insert(name.to_owned(), false);
            state.switches_pressed.insert(name.to_owned(), Duration::ZERO);
        }
        for name in lights {
            state.lights.insert(name.to_owned(), false);
        }
        state
    }

    /// Number of ticks started so far.
    pub fn tick(&self) -> u64 {
        self.tick
    }

    /// Start a new tick: bump the version and drop last tick's pulses.
    pub fn begin_tick(&mut self) {
        self.tick += 1;
        for held in self.switches_pressed.values_mut() {
            *held = Duration::ZERO;
        }
    }

    pub fn switch_on(&self, name: &str) -> bool {
        self.switches.get(name).copied().unwrap_or(false)
    }

    pub fn light_on(&self, name: &str) -> bool {
        self.lights.get(name).copied().unwrap_or(false)
    }

    /// Release pulse for `name` on this tick, zero when there is none.
    pub fn pressed_for(&self, name: &str) -> Duration {
        self.switches_pressed
            .get(name)
            .copied()
            .unwrap_or(Duration::ZERO)
    }

    pub fn set_switch(&mut self, name: &str, pressed: bool) {
        Self::put(&mut self.switches, name, pressed);
    }

    pub fn set_light(&mut self, name: &str, on: bool) {
        Self::put(&mut self.lights, name, on);
    }

    pub fn set_pressed(&mut self, name: &str, held: Duration) {
        Self::put(&mut self.switches_pressed, name, held);
    }

    pub fn switches(&self) -> &HashMap<String, bool> {
        &self.switches
    }

    pub fn lights(&self) -> &HashMap<String, bool> {
        &self.lights
    }

    pub fn switches_pressed(&self) -> &HashMap<String, Duration> {
        &self.switches_pressed
    }

    fn put<V>(map: &mut HashMap<String, V>, name: &str, value: V) {
        match map.get_mut(name) {
            Some(slot) => *slot = value,
            None => {
                map.insert(name.to_owned(), value);
            }
        }
    }
}
