//! Actions — what to do with the lights once any matcher holds.

use serde::{Deserialize, Serialize};

use super::matcher::ActionMatcher;
use crate::app::events::EngineEvent;
use crate::app::ports::{EventSink, PinPort};
use crate::drivers::light::LightSpec;
use crate::error::EngineError;
use crate::state::RuntimeState;

/// Light effects plus the matchers that trigger them.
///
/// Effects are applied toggle → on → off, each list in declared order, so a
/// later effect overrides an earlier one on the same light.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Action {
    pub lights_on: Vec<String>,
    pub lights_off: Vec<String>,
    pub lights_toggle: Vec<String>,
    pub matchers: Vec<ActionMatcher>,
}

impl Action {
    /// OR over the matchers.  An action without matchers never fires.
    pub fn fires(&self, state: &RuntimeState) -> bool {
        self.matchers.iter().any(|m| m.matches(state))
    }

    /// Apply the effects against the live state.
    ///
    /// The light map is only updated after its pin write succeeded.  The
    /// first failure stops the remaining effects and is returned.
    pub fn apply(
        &self,
        catalog: &[LightSpec],
        state: &mut RuntimeState,
        pins: &mut impl PinPort,
        sink: &mut impl EventSink,
    ) -> Result<(), EngineError> {
        for name in &self.lights_toggle {
            let target = !state.light_on(name);
            command(catalog, name, target, state, pins, sink)?;
        }

        for name in &self.lights_on {
            if !state.light_on(name) {
                command(catalog, name, true, state, pins, sink)?;
            }
        }

        for name in &self.lights_off {
            if state.light_on(name) {
                command(catalog, name, false, state, pins, sink)?;
            }
        }

        Ok(())
    }
}

/// Write one light and record the result.
pub(crate) fn command(
    catalog: &[LightSpec],
    name: &str,
    on: bool,
    state: &mut RuntimeState,
    pins: &mut impl PinPort,
    sink: &mut impl EventSink,
) -> Result<(), EngineError> {
    let light = catalog
        .iter()
        .find(|l| l.name == name)
        .ok_or_else(|| EngineError::UnknownLight(name.to_owned()))?;

    light
        .command(pins, on)
        .map_err(|source| EngineError::LightWrite {
            light: light.name.clone(),
            pin: light.pin,
            source,
        })?;

    state.set_light(&light.name, on);
    sink.emit(&EngineEvent::LightCommanded {
        name: &light.name,
        pin: light.pin,
        on,
    });
    Ok(())
}
