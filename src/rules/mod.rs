//! Declarative rule set: matchers decide, actions drive lights.

pub mod action;
pub mod matcher;

pub use action::Action;
pub use matcher::ActionMatcher;
