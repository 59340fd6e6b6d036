//! Controller configuration.
//!
//! Loaded once at startup from a JSON file, validated, and never changed
//! afterwards.  Validation promotes every dangling switch or light name to
//! a load-time error, so the engine never has to deal with them at runtime.

use core::time::Duration;
use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::drivers::light::LightSpec;
use crate::drivers::switch::SwitchSpec;
use crate::error::{ConfigError, ValidationError};
use crate::rules::{Action, ActionMatcher};

pub const DEFAULT_DEBOUNCE_MS: u64 = 25;
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 10;

/// What the controller does when a light cannot be written.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WriteFaultPolicy {
    /// Stop the tick and hand the fault to the caller.
    #[default]
    Halt,
    /// Abandon the failing action, report it, and carry on with the tick.
    Skip,
}

/// Full controller configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Minimum time a switch level must hold before it is accepted.
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
    /// Poll tick interval.
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,
    #[serde(default)]
    pub on_write_fault: WriteFaultPolicy,
    #[serde(default)]
    pub switches: Vec<SwitchSpec>,
    #[serde(default)]
    pub lights: Vec<LightSpec>,
    #[serde(default)]
    pub actions: Vec<Action>,
}

fn default_debounce_ms() -> u64 {
    DEFAULT_DEBOUNCE_MS
}

fn default_poll_interval_ms() -> u64 {
    DEFAULT_POLL_INTERVAL_MS
}

/// Non-fatal findings from [`Config::validate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationWarning {
    /// The action at this index has no matchers and will never run.
    NoMatchers(usize),
}

impl core::fmt::Display for ValidationWarning {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::NoMatchers(i) => write!(f, "no matchers for action #{i}, it will never run"),
        }
    }
}

impl Config {
    /// Read, parse and validate a configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<(Self, Vec<ValidationWarning>), ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    /// Parse and validate a JSON document.
    pub fn from_json(text: &str) -> Result<(Self, Vec<ValidationWarning>), ConfigError> {
        let mut config: Self = serde_json::from_str(text)?;
        config.apply_defaults();
        let warnings = config.validate()?;
        Ok((config, warnings))
    }

    /// Pretty-printed JSON, as written by the installer.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    /// Replace zero timings with their defaults.
    pub fn apply_defaults(&mut self) {
        if self.debounce_ms == 0 {
            self.debounce_ms = DEFAULT_DEBOUNCE_MS;
        }
        if self.poll_interval_ms == 0 {
            self.poll_interval_ms = DEFAULT_POLL_INTERVAL_MS;
        }
    }

    /// Check structure and referential integrity.
    ///
    /// Returns the non-fatal warnings on success.
    pub fn validate(&self) -> Result<Vec<ValidationWarning>, ValidationError> {
        if self.actions.is_empty() {
            return Err(ValidationError::NoActions);
        }
        if self.lights.is_empty() {
            return Err(ValidationError::NoLights);
        }
        if self.switches.is_empty() {
            return Err(ValidationError::NoSwitches);
        }

        let lights = unique_names("light", self.lights.iter().map(|l| l.name.as_str()))?;
        let switches = unique_names("switch", self.switches.iter().map(|s| s.name.as_str()))?;

        let mut warnings = Vec::new();
        for (i, action) in self.actions.iter().enumerate() {
            if action.matchers.is_empty() {
                warnings.push(ValidationWarning::NoMatchers(i));
                continue;
            }

            check_lights(&lights, &action.lights_off, || format!("action #{i}.lights_off"))?;
            check_lights(&lights, &action.lights_on, || format!("action #{i}.lights_on"))?;
            check_lights(&lights, &action.lights_toggle, || format!("action #{i}.lights_toggle"))?;

            for (mi, m) in action.matchers.iter().enumerate() {
                check_matcher(&lights, &switches, i, mi, m)?;
            }
        }

        Ok(warnings)
    }
}

fn unique_names<'a>(
    kind: &'static str,
    names: impl Iterator<Item = &'a str>,
) -> Result<HashSet<&'a str>, ValidationError> {
    let mut seen = HashSet::new();
    for name in names {
        if !seen.insert(name) {
            return Err(ValidationError::DuplicateName {
                kind,
                name: name.to_owned(),
            });
        }
    }
    Ok(seen)
}

fn missing<'a>(known: &HashSet<&str>, ids: &'a [String]) -> Option<&'a String> {
    ids.iter().find(|id| !known.contains(id.as_str()))
}

fn check_lights(
    known: &HashSet<&str>,
    ids: &[String],
    location: impl FnOnce() -> String,
) -> Result<(), ValidationError> {
    match missing(known, ids) {
        Some(id) => Err(ValidationError::UnknownLight {
            id: id.clone(),
            location: location(),
        }),
        None => Ok(()),
    }
}

fn check_switches(
    known: &HashSet<&str>,
    ids: &[String],
    location: impl FnOnce() -> String,
) -> Result<(), ValidationError> {
    match missing(known, ids) {
        Some(id) => Err(ValidationError::UnknownSwitch {
            id: id.clone(),
            location: location(),
        }),
        None => Ok(()),
    }
}

fn check_matcher(
    lights: &HashSet<&str>,
    switches: &HashSet<&str>,
    action: usize,
    index: usize,
    m: &ActionMatcher,
) -> Result<(), ValidationError> {
    let at = |field: &str| format!("action #{action} matcher #{index}.{field}");

    check_lights(lights, &m.lights_off, || at("lights_off"))?;
    check_lights(lights, &m.lights_on, || at("lights_on"))?;
    check_switches(switches, &m.switches_off, || at("switches_off"))?;
    check_switches(switches, &m.switches_on, || at("switches_on"))?;
    check_switches(switches, &m.switches_pressed, || at("switches_pressed"))?;

    if m.max_duration_ms > 0 && m.min_duration_ms > m.max_duration_ms {
        return Err(ValidationError::InvalidDurations {
            location: at("min_duration_ms"),
        });
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Default configuration
// ---------------------------------------------------------------------------

fn names(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| (*s).to_owned()).collect()
}

fn short_press(switch: &str, lights_on: &[&str], lights_off: &[&str]) -> ActionMatcher {
    ActionMatcher {
        switches_pressed: names(&[switch]),
        lights_on: names(lights_on),
        lights_off: names(lights_off),
        max_duration_ms: 1000,
        ..Default::default()
    }
}

impl Default for Config {
    /// Demo wiring: three switches on physical pins 3/5/7, three lights on
    /// 8/10/12.
    ///
    /// - SW1 / SW2 held for a second or more toggle LED1 / LED2.
    /// - A short press of SW1 or SW2 turns LED1 and LED2 off if either is
    ///   on, or both on if both are off.
    /// - LED3 follows SW3.
    fn default() -> Self {
        let long_press = |switch: &str| ActionMatcher {
            switches_pressed: names(&[switch]),
            min_duration_ms: 1000,
            ..Default::default()
        };

        Self {
            debounce_ms: DEFAULT_DEBOUNCE_MS,
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
            on_write_fault: WriteFaultPolicy::Halt,
            switches: vec![
                SwitchSpec { name: "SW1".into(), pin: 3, invert: false },
                SwitchSpec { name: "SW2".into(), pin: 5, invert: false },
                SwitchSpec { name: "SW3".into(), pin: 7, invert: false },
            ],
            lights: vec![
                LightSpec { name: "LED1".into(), pin: 8, invert: false },
                LightSpec { name: "LED2".into(), pin: 10, invert: false },
                LightSpec { name: "LED3".into(), pin: 12, invert: false },
            ],
            actions: vec![
                Action {
                    lights_toggle: names(&["LED1"]),
                    matchers: vec![long_press("SW1")],
                    ..Default::default()
                },
                Action {
                    lights_toggle: names(&["LED2"]),
                    matchers: vec![long_press("SW2")],
                    ..Default::default()
                },
                Action {
                    lights_off: names(&["LED1", "LED2"]),
                    matchers: vec![
                        short_press("SW1", &["LED1"], &[]),
                        short_press("SW1", &["LED2"], &[]),
                        short_press("SW2", &["LED1"], &[]),
                        short_press("SW2", &["LED2"], &[]),
                    ],
                    ..Default::default()
                },
                Action {
                    lights_on: names(&["LED1", "LED2"]),
                    matchers: vec![
                        short_press("SW1", &[], &["LED1", "LED2"]),
                        short_press("SW2", &[], &["LED1", "LED2"]),
                    ],
                    ..Default::default()
                },
                Action {
                    lights_on: names(&["LED3"]),
                    matchers: vec![ActionMatcher {
                        switches_on: names(&["SW3"]),
                        ..Default::default()
                    }],
                    ..Default::default()
                },
                Action {
                    lights_off: names(&["LED3"]),
                    matchers: vec![ActionMatcher {
                        switches_off: names(&["SW3"]),
                        ..Default::default()
                    }],
                    ..Default::default()
                },
            ],
        }
    }
}
