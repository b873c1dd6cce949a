//! Evo Optim - Genetic optimization over named, bounded scalar variables.
//!
//! A population of candidate solutions is evolved by Gaussian mutation,
//! optional single-point crossover and elitist selection to minimize (or,
//! through a fitness transform, maximize) an objective function.
//!
//! # Architecture
//!
//! The crate is split into two main modules:
//!
//! - `schema`: Configuration, genotype declarations and result types
//! - `compute`: Objective functions and the evolutionary engine
//!
//! # Example
//!
//! ```rust,no_run
//! use evo_optim::{
//!     compute::evolution::{EvaluationError, EvolutionEngine},
//!     schema::{EvolutionConfig, FitnessSpec, GeneSpec, GenotypeSchema},
//! };
//!
//! let config = EvolutionConfig {
//!     genotype: GenotypeSchema::new(vec![
//!         GeneSpec::real("x", -5.0, 5.0),
//!         GeneSpec::integer("n", 0, 10),
//!     ]),
//!     random_seed: Some(42),
//!     ..Default::default()
//! };
//!
//! // Find the peak of a custom surface.
//! let surface = |v: &[f64]| -> Result<f64, EvaluationError> { Ok(v[1] - v[0] * v[0]) };
//! let mut engine = EvolutionEngine::with_functions(config, surface, FitnessSpec::Maximize)?;
//! let result = engine.run()?;
//!
//! println!("Best after {} generations:\n{}", result.stats.generations, result.best);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod compute;
pub mod schema;

// Re-export commonly used types
pub use compute::evolution::{ConsoleReporter, EvolutionEngine, EvolutionError, TraceExport};
pub use schema::{EvolutionConfig, EvolutionResult, GeneSpec, GenotypeSchema};
