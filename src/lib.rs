//! LabLights controller library.
//!
//! Reads debounced switches, evaluates a flat rule set, and drives lights
//! through GPIO.  The engine in [`app`] only talks to hardware through the
//! port traits in [`app::ports`]; concrete backends live in [`adapters`].

#![deny(unused_must_use)]

pub mod adapters;
pub mod app;
pub mod config;
pub mod drivers;
pub mod error;
pub mod install;
pub mod pins;
pub mod rules;
pub mod scheduler;
pub mod state;
