//! Outbound engine events.
//!
//! The [`Controller`](super::service::Controller) emits these through the
//! [`EventSink`](super::ports::EventSink) port.  They borrow names from the
//! catalog, so emitting one never allocates.

use core::time::Duration;

use super::ports::PinId;
use crate::error::EngineError;

/// Structured events emitted by the rule engine.
#[derive(Debug, Clone)]
pub enum EngineEvent<'a> {
    /// All lights were driven off and the poll loop may begin.
    Started { switches: usize, lights: usize },

    /// A switch's debounced state went from released to pressed.
    SwitchActivated { name: &'a str, pin: PinId },

    /// A switch's debounced state went from pressed to released.
    SwitchReleased {
        name: &'a str,
        pin: PinId,
        held: Duration,
    },

    /// A light pin was written.
    LightCommanded { name: &'a str, pin: PinId, on: bool },

    /// An action's matchers held on this tick; its effects are about to run.
    ActionFired { index: usize },

    /// An action stopped part-way through its effects and the configured
    /// policy chose to carry on with the tick.
    ActionAborted {
        index: usize,
        error: &'a EngineError,
    },
}
