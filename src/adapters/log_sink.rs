//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing engine events to the `log` facade
//! (rendered by whatever logger the binary installed).  Every debounced
//! switch transition and every light command gets one line.

use log::{debug, info, warn};

use crate::app::events::EngineEvent;
use crate::app::ports::EventSink;

/// Adapter that logs every [`EngineEvent`].
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl Default for LogEventSink {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &EngineEvent<'_>) {
        match event {
            EngineEvent::Started { switches, lights } => {
                info!("START | switches={} lights={}", switches, lights);
            }
            EngineEvent::SwitchActivated { name, pin } => {
                info!("SWITCH | id={} pin={} state=true | switch activated", name, pin);
            }
            EngineEvent::SwitchReleased { name, pin, held } => {
                info!(
                    "SWITCH | id={} pin={} state=false duration={:?} | switch released",
                    name, pin, held
                );
            }
            EngineEvent::LightCommanded { name, pin, on } => {
                info!(
                    "LIGHT | id={} pin={} state={} | light {}",
                    name,
                    pin,
                    on,
                    if *on { "on" } else { "off" }
                );
            }
            EngineEvent::ActionFired { index } => {
                debug!("ACTION | #{} fired", index);
            }
            EngineEvent::ActionAborted { index, error } => {
                warn!("ACTION | #{} aborted: {}", index, error);
            }
        }
    }
}
