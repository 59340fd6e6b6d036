//! Unified error types for the controller.
//!
//! Pin adapters report [`PinError`]; the engine wraps those into
//! [`EngineError`] together with the switch or light that was being
//! serviced, and classifies each as a read or write [`Fault`] so the
//! poll-loop owner can decide whether to keep running.

use core::fmt;
use std::io;

use crate::app::ports::PinId;

// ---------------------------------------------------------------------------
// Pin errors
// ---------------------------------------------------------------------------

/// A single pin read or write failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PinError {
    pub pin: PinId,
    pub kind: PinErrorKind,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PinErrorKind {
    /// The header pin has no GPIO behind it (power or ground).
    Unmapped,
    /// The adapter has no handle for this pin.
    NotConfigured,
    /// The underlying file or device returned an I/O error.
    Io(io::ErrorKind, String),
    /// An `embedded-hal` pin implementation returned an error.
    Hal(embedded_hal::digital::ErrorKind),
    /// The pin reported something that is neither high nor low.
    InvalidValue(String),
}

impl PinError {
    pub fn new(pin: PinId, kind: PinErrorKind) -> Self {
        Self { pin, kind }
    }

    pub fn io(pin: PinId, err: &io::Error) -> Self {
        Self::new(pin, PinErrorKind::Io(err.kind(), err.to_string()))
    }
}

impl fmt::Display for PinError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            PinErrorKind::Unmapped => write!(f, "pin {} is not a GPIO", self.pin),
            PinErrorKind::NotConfigured => write!(f, "pin {} is not configured", self.pin),
            PinErrorKind::Io(_, msg) => write!(f, "pin {}: {msg}", self.pin),
            PinErrorKind::Hal(kind) => write!(f, "pin {}: HAL error {kind:?}", self.pin),
            PinErrorKind::InvalidValue(raw) => {
                write!(f, "pin {}: unexpected value {raw:?}", self.pin)
            }
        }
    }
}

impl std::error::Error for PinError {}

// ---------------------------------------------------------------------------
// Engine errors
// ---------------------------------------------------------------------------

/// Fault classification handed to whoever owns the poll loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fault {
    /// A switch could not be read. The controller cannot continue with a
    /// switch of unknown state.
    Read,
    /// A light could not be driven. Whether this stops the loop is a
    /// policy decision, see [`WriteFaultPolicy`](crate::config::WriteFaultPolicy).
    Write,
    /// The controller was ticked before it was started.
    Lifecycle,
}

/// Every fallible engine operation funnels into this type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    SwitchRead {
        switch: String,
        pin: PinId,
        source: PinError,
    },
    LightWrite {
        light: String,
        pin: PinId,
        source: PinError,
    },
    /// An action referenced a light that is not in the catalog.
    UnknownLight(String),
    /// A tick was requested before the lights were driven to a known state.
    NotStarted,
}

impl EngineError {
    pub fn fault(&self) -> Fault {
        match self {
            Self::SwitchRead { .. } => Fault::Read,
            Self::LightWrite { .. } | Self::UnknownLight(_) => Fault::Write,
            Self::NotStarted => Fault::Lifecycle,
        }
    }
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SwitchRead { switch, pin, source } => {
                write!(f, "read switch '{switch}' (pin {pin}): {source}")
            }
            Self::LightWrite { light, pin, source } => {
                write!(f, "write light '{light}' (pin {pin}): {source}")
            }
            Self::UnknownLight(name) => write!(f, "unknown light '{name}'"),
            Self::NotStarted => write!(f, "controller ticked before start"),
        }
    }
}

impl std::error::Error for EngineError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::SwitchRead { source, .. } | Self::LightWrite { source, .. } => Some(source),
            Self::UnknownLight(_) | Self::NotStarted => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Configuration errors
// ---------------------------------------------------------------------------

/// Referential and structural problems found by
/// [`Config::validate`](crate::config::Config::validate).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    NoSwitches,
    NoLights,
    NoActions,
    DuplicateName { kind: &'static str, name: String },
    UnknownLight { id: String, location: String },
    UnknownSwitch { id: String, location: String },
    /// `min_duration_ms` exceeds a nonzero `max_duration_ms`.
    InvalidDurations { location: String },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoSwitches => write!(f, "no switches configured"),
            Self::NoLights => write!(f, "no lights configured"),
            Self::NoActions => write!(f, "no actions configured"),
            Self::DuplicateName { kind, name } => write!(f, "duplicate {kind} name '{name}'"),
            Self::UnknownLight { id, location } => {
                write!(f, "unknown light identifier '{id}' in {location}")
            }
            Self::UnknownSwitch { id, location } => {
                write!(f, "unknown switch identifier '{id}' in {location}")
            }
            Self::InvalidDurations { location } => {
                write!(f, "min_duration_ms exceeds max_duration_ms in {location}")
            }
        }
    }
}

impl std::error::Error for ValidationError {}

/// Loading a configuration file failed.
#[derive(Debug)]
pub enum ConfigError {
    Io(io::Error),
    Parse(serde_json::Error),
    Invalid(ValidationError),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "read config: {e}"),
            Self::Parse(e) => write!(f, "parse config: {e}"),
            Self::Invalid(e) => write!(f, "invalid config: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Parse(e) => Some(e),
            Self::Invalid(e) => Some(e),
        }
    }
}

impl From<io::Error> for ConfigError {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        Self::Parse(e)
    }
}

impl From<ValidationError> for ConfigError {
    fn from(e: ValidationError) -> Self {
        Self::Invalid(e)
    }
}

// ---------------------------------------------------------------------------
// Convenience Result alias
// ---------------------------------------------------------------------------

/// Engine-wide `Result` alias.
pub type Result<T> = core::result::Result<T, EngineError>;
