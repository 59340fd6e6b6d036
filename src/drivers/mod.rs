//! Switch inputs and light outputs.

pub mod light;
pub mod switch;
