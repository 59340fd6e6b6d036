//! `embedded-hal` adapter.
//!
//! Wraps any HAL's digital pin types behind [`PinPort`], so the controller
//! can run on a board support crate instead of sysfs.  Inputs and outputs
//! are registered against the header pin ids used in the configuration.

use embedded_hal::digital::{Error as _, InputPin, OutputPin, PinState};

use crate::app::ports::{Level, PinId, PinPort};
use crate::error::{PinError, PinErrorKind};

pub struct HalPins<I, O> {
    inputs: Vec<(PinId, I)>,
    outputs: Vec<(PinId, O)>,
}

impl<I, O> Default for HalPins<I, O> {
    fn default() -> Self {
        Self::new()
    }
}

impl<I, O> HalPins<I, O> {
    pub fn new() -> Self {
        Self {
            inputs: Vec::new(),
            outputs: Vec::new(),
        }
    }

    /// Register a switch input.
    #[must_use]
    pub fn with_input(mut self, id: PinId, pin: I) -> Self {
        self.inputs.push((id, pin));
        self
    }

    /// Register a light output.
    #[must_use]
    pub fn with_output(mut self, id: PinId, pin: O) -> Self {
        self.outputs.push((id, pin));
        self
    }
}

fn find<T>(pins: &mut [(PinId, T)], id: PinId) -> Result<&mut T, PinError> {
    pins.iter_mut()
        .find(|(p, _)| *p == id)
        .map(|(_, pin)| pin)
        .ok_or_else(|| PinError::new(id, PinErrorKind::NotConfigured))
}

impl<I: InputPin, O: OutputPin> PinPort for HalPins<I, O> {
    fn read(&mut self, pin: PinId) -> Result<Level, PinError> {
        let input = find(&mut self.inputs, pin)?;
        input
            .is_high()
            .map(Level::from)
            .map_err(|e| PinError::new(pin, PinErrorKind::Hal(e.kind())))
    }

    fn write(&mut self, pin: PinId, level: Level) -> Result<(), PinError> {
        let output = find(&mut self.outputs, pin)?;
        output
            .set_state(PinState::from(level.is_high()))
            .map_err(|e| PinError::new(pin, PinErrorKind::Hal(e.kind())))
    }

    fn configure_input(&mut self, pin: PinId) -> Result<(), PinError> {
        find(&mut self.inputs, pin).map(|_| ())
    }

    fn configure_output(&mut self, pin: PinId) -> Result<(), PinError> {
        find(&mut self.outputs, pin).map(|_| ())
    }
}
