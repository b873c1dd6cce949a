//! Genetic optimization of bounded scalar genotypes.
//!
//! # Overview
//!
//! - **Genes** (`genome`): bounded integer or real values with Gaussian
//!   mutation, plus the single seeded random source of a run
//! - **Individuals** (`individual`): named genotypes evaluated positionally
//! - **Fitness** (`fitness`): injectable objective and fitness functions
//! - **Population** (`population`): ranking, elitist selection, crossover
//! - **Search** (`search`): the generation loop and its trace
//! - **Reporting** (`report`) and **Export** (`archive`)
//!
//! # Example
//!
//! ```rust,no_run
//! use evo_optim::schema::EvolutionConfig;
//! use evo_optim::compute::evolution::{ConsoleReporter, EvolutionEngine};
//!
//! let config = EvolutionConfig {
//!     random_seed: Some(7),
//!     ..Default::default()
//! };
//!
//! let mut engine = EvolutionEngine::new(config)?;
//! let result = engine.run_with_reporter(&mut ConsoleReporter)?;
//!
//! println!("Best score: {:.6}", result.best.score);
//! engine.export().save_json("trace.json")?;
//! # Ok::<(), evo_optim::compute::evolution::EvolutionError>(())
//! ```
//!
//! Lower scores are always better; maximization is expressed through the
//! fitness transform.

mod archive;
mod fitness;
mod genome;
mod individual;
mod population;
mod report;
mod search;

pub use archive::TraceExport;
pub use fitness::{EvaluationError, Evaluator, Fitness, Objective};
pub use genome::{Gene, GenomeRng};
pub use individual::{GenotypeLayout, Individual};
pub use population::{CrossoverReport, PairOutcome, Population};
pub use report::{ConsoleReporter, ProgressReporter};
pub use search::{EvolutionEngine, EvolutionError};
