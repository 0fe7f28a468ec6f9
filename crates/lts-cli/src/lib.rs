//! CLI library components for the legal template engine.

pub mod input;
pub mod logging;
