//! Light output driver.
//!
//! Lights are active-high by default: the pin is driven `HIGH` to turn the
//! light on.  Setting `invert` drives `LOW` for on instead (sinking LED,
//! active-low relay board).

use serde::{Deserialize, Serialize};

use crate::app::ports::{Level, PinId, PinPort};
use crate::error::PinError;

/// A named light bound to one output pin.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LightSpec {
    pub name: String,
    pub pin: PinId,
    #[serde(default)]
    pub invert: bool,
}

impl LightSpec {
    /// Physical level that represents logical state `on`.
    pub fn level_for(&self, on: bool) -> Level {
        Level::from(self.invert != on)
    }

    /// Drive the pin to represent `on`.
    pub fn command(&self, pins: &mut impl PinPort, on: bool) -> Result<(), PinError> {
        pins.write(self.pin, self.level_for(on))
    }
}
