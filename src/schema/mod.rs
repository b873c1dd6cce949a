//! Schema module - Configuration, genotype and result types for evolutionary runs.

mod config;
mod evolution;
mod functions;
mod genotype;

pub use config::*;
pub use evolution::*;
pub use functions::*;
pub use genotype::*;
