//! Controller — the hexagonal core.
//!
//! [`Controller`] owns the pin adapter, the catalog, the rule set and the
//! runtime state.  One call to [`Controller::tick`] is one full poll cycle:
//!
//! ```text
//!  PinPort ──read──▶ ┌──────────────────────────────┐ ──▶ EventSink
//!                    │ Controller                   │
//!                    │  1. debounce every switch    │
//!                    │  2. match every action       │
//!                    │  3. apply fired actions      │
//!  PinPort ◀─write── └──────────────────────────────┘
//! ```
//!
//! Matching sees the state as it stands after step 1.  Application runs
//! against the live state, so an action applied later in the same tick
//! observes the light changes of actions applied before it, but those
//! changes never decide whether it fires.

use core::time::Duration;

use log::{debug, info, warn};

use crate::config::{Config, WriteFaultPolicy};
use crate::drivers::light::LightSpec;
use crate::drivers::switch::{Switch, Transition};
use crate::error::{EngineError, Fault, Result};
use crate::rules::action::{self, Action};
use crate::state::RuntimeState;

use super::events::EngineEvent;
use super::ports::{EventSink, PinPort};

/// Summary of one poll tick.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickReport {
    /// Indices of the actions that fired, in declaration order.
    pub fired: Vec<usize>,
    /// Fired actions that stopped part-way under [`WriteFaultPolicy::Skip`].
    pub aborted: Vec<usize>,
}

pub struct Controller<P> {
    pins: P,
    switches: Vec<Switch>,
    lights: Vec<LightSpec>,
    actions: Vec<Action>,
    state: RuntimeState,
    debounce: Duration,
    on_write_fault: WriteFaultPolicy,
    started: bool,
}

impl<P: PinPort> Controller<P> {
    /// Build a controller from a validated configuration.
    ///
    /// Does **not** touch any pin; call [`start`](Self::start) next.
    pub fn new(config: &Config, pins: P) -> Self {
        let debounce = config.debounce();
        let switches = config
            .switches
            .iter()
            .map(|spec| Switch::new(spec.clone(), debounce, Duration::ZERO))
            .collect();
        let state = RuntimeState::new(
            config.switches.iter().map(|s| s.name.as_str()),
            config.lights.iter().map(|l| l.name.as_str()),
        );

        Self {
            pins,
            switches,
            lights: config.lights.clone(),
            actions: config.actions.clone(),
            state,
            debounce,
            on_write_fault: config.on_write_fault,
            started: false,
        }
    }

    // ── Lifecycle ─────────────────────────────────────────────

    /// Configure every pin and drive every light off.
    ///
    /// `now` becomes the debounce reference for every switch, and every
    /// switch reads as released until it is debounced again.  Calling it a
    /// second time restarts the controller from scratch.
    pub fn start(&mut self, now: Duration, sink: &mut impl EventSink) -> Result<()> {
        self.started = false;
        for sw in &mut self.switches {
            self.pins
                .configure_input(sw.spec.pin)
                .map_err(|source| EngineError::SwitchRead {
                    switch: sw.spec.name.clone(),
                    pin: sw.spec.pin,
                    source,
                })?;
            sw.reset(self.debounce, now);
            self.state.set_switch(&sw.spec.name, false);
            self.state.set_pressed(&sw.spec.name, Duration::ZERO);
        }

        for light in &self.lights {
            self.pins
                .configure_output(light.pin)
                .map_err(|source| EngineError::LightWrite {
                    light: light.name.clone(),
                    pin: light.pin,
                    source,
                })?;
        }

        // Unconditional writes: the physical state is unknown until now.
        for light in &self.lights {
            action::command(
                &self.lights,
                &light.name,
                false,
                &mut self.state,
                &mut self.pins,
                sink,
            )?;
        }

        sink.emit(&EngineEvent::Started {
            switches: self.switches.len(),
            lights: self.lights.len(),
        });
        self.started = true;
        info!(
            "Controller started: {} switches, {} lights, {} actions",
            self.switches.len(),
            self.lights.len(),
            self.actions.len()
        );
        Ok(())
    }

    // ── Per-tick orchestration ────────────────────────────────

    /// Run one full poll cycle at uptime `now`.
    ///
    /// A switch read failure always aborts the tick.  A light write failure
    /// aborts the tick under [`WriteFaultPolicy::Halt`]; under
    /// [`WriteFaultPolicy::Skip`] only the failing action stops.  Fails with
    /// [`EngineError::NotStarted`] until [`start`](Self::start) succeeded.
    pub fn tick(&mut self, now: Duration, sink: &mut impl EventSink) -> Result<TickReport> {
        if !self.started {
            return Err(EngineError::NotStarted);
        }

        // 1. Debounce every switch, in catalog order.
        self.state.begin_tick();
        for sw in &mut self.switches {
            let raw = self
                .pins
                .read(sw.spec.pin)
                .map_err(|source| EngineError::SwitchRead {
                    switch: sw.spec.name.clone(),
                    pin: sw.spec.pin,
                    source,
                })?;

            match sw.sample(raw, now) {
                Some(Transition::Pressed) => {
                    self.state.set_switch(&sw.spec.name, true);
                    sink.emit(&EngineEvent::SwitchActivated {
                        name: &sw.spec.name,
                        pin: sw.spec.pin,
                    });
                }
                Some(Transition::Released { held }) => {
                    self.state.set_switch(&sw.spec.name, false);
                    self.state.set_pressed(&sw.spec.name, held);
                    sink.emit(&EngineEvent::SwitchReleased {
                        name: &sw.spec.name,
                        pin: sw.spec.pin,
                        held,
                    });
                }
                None => {}
            }
        }

        // 2. Decide everything against the same snapshot before applying anything.
        let fired: Vec<usize> = self
            .actions
            .iter()
            .enumerate()
            .filter(|(_, a)| a.fires(&self.state))
            .map(|(i, _)| i)
            .collect();

        // 3. Apply in declaration order against the live state.
        let mut report = TickReport {
            fired,
            aborted: Vec::new(),
        };
        for &index in &report.fired {
            debug!("tick {}: action #{} fired", self.state.tick(), index);
            sink.emit(&EngineEvent::ActionFired { index });

            let outcome = self.actions[index].apply(
                &self.lights,
                &mut self.state,
                &mut self.pins,
                sink,
            );
            if let Err(error) = outcome {
                if error.fault() == Fault::Write && self.on_write_fault == WriteFaultPolicy::Skip {
                    warn!("action #{} aborted: {}", index, error);
                    sink.emit(&EngineEvent::ActionAborted {
                        index,
                        error: &error,
                    });
                    report.aborted.push(index);
                    continue;
                }
                return Err(error);
            }
        }

        Ok(report)
    }

    // ── Queries ───────────────────────────────────────────────

    pub fn is_started(&self) -> bool {
        self.started
    }

    pub fn state(&self) -> &RuntimeState {
        &self.state
    }

    pub fn pins(&self) -> &P {
        &self.pins
    }

    pub fn pins_mut(&mut self) -> &mut P {
        &mut self.pins
    }

    pub fn into_pins(self) -> P {
        self.pins
    }
}
