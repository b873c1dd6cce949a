//! Compute module - Objective functions and the evolutionary engine.

pub mod evolution;
mod functions;

pub use functions::*;
