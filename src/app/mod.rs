//! Application core — pure rule-engine logic, zero I/O.
//!
//! The poll cycle (read → debounce → match → apply) lives in [`service`].
//! All interaction with pins, logging and time happens through **port
//! traits** defined in [`ports`], keeping this layer fully testable without
//! real peripherals.

pub mod events;
pub mod ports;
pub mod service;
