//! Run configuration for the evolutionary optimizer.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::{ConstraintMode, Declared, FitnessSpec, GeneType, GenotypeSchema, TestFunction};

/// Top-level configuration of an evolutionary run.
///
/// Consumed once when the engine is built and never mutated afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvolutionConfig {
    /// Population size and elitism.
    #[serde(default)]
    pub population: PopulationConfig,
    /// Ordered gene declarations.
    #[serde(default)]
    pub genotype: GenotypeSchema,
    /// Number of generations to run.
    #[serde(default = "default_generations")]
    pub generations: usize,
    /// Crossover settings.
    #[serde(default)]
    pub crossover: CrossoverConfig,
    /// Boundary handling for gene mutation.
    #[serde(default = "default_constraint")]
    pub constraint: Declared<ConstraintMode>,
    /// Objective function to optimize.
    #[serde(default)]
    pub objective: TestFunction,
    /// Transform from raw objective output to score.
    #[serde(default)]
    pub fitness: FitnessSpec,
    /// Progress reporting.
    #[serde(default)]
    pub reporting: ReportingConfig,
    /// Random seed for reproducibility.
    #[serde(default)]
    pub random_seed: Option<u64>,
}

impl Default for EvolutionConfig {
    fn default() -> Self {
        Self {
            population: PopulationConfig::default(),
            genotype: GenotypeSchema::default(),
            generations: default_generations(),
            crossover: CrossoverConfig {
                enabled: true,
                rate: Some(0.3),
            },
            constraint: Declared::Known(ConstraintMode::Hard),
            objective: TestFunction::Booth,
            fitness: FitnessSpec::Minimize,
            reporting: ReportingConfig::default(),
            random_seed: None,
        }
    }
}

fn default_generations() -> usize {
    100
}
fn default_constraint() -> Declared<ConstraintMode> {
    Declared::Known(ConstraintMode::Soft)
}

/// Population settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PopulationConfig {
    /// Number of individuals, constant across generations.
    #[serde(default = "default_population_size")]
    pub size: usize,
    /// Fraction of the population carried over unchanged each generation.
    #[serde(default)]
    pub elitism: Option<f64>,
}

impl Default for PopulationConfig {
    fn default() -> Self {
        Self {
            size: default_population_size(),
            elitism: Some(0.3),
        }
    }
}

fn default_population_size() -> usize {
    100
}

impl PopulationConfig {
    /// Number of elites kept per generation: `floor(elitism * size)`.
    pub fn elite_count(&self) -> usize {
        self.elitism
            .map(|fraction| (fraction * self.size as f64).floor() as usize)
            .unwrap_or(0)
    }
}

/// Crossover settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CrossoverConfig {
    /// Whether crossover runs each generation.
    #[serde(default)]
    pub enabled: bool,
    /// Fraction of the population taking part in crossover.
    #[serde(default)]
    pub rate: Option<f64>,
}

impl CrossoverConfig {
    /// Number of parents removed per crossover: `floor(rate * size)` rounded up to even.
    pub fn parent_count(&self, population_size: usize) -> usize {
        parent_count(self.rate.unwrap_or(0.0), population_size)
    }
}

/// Parent count for a crossover `rate` over `population_size` individuals.
pub fn parent_count(rate: f64, population_size: usize) -> usize {
    let count = (rate * population_size as f64).floor().max(0.0) as usize;
    count + count % 2
}

/// Progress reporting settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportingConfig {
    /// Report best/worst scores while evolving.
    #[serde(default = "default_verbose")]
    pub verbose: bool,
    /// Report every N generations.
    #[serde(default = "default_print_interval")]
    pub print_interval: usize,
}

impl Default for ReportingConfig {
    fn default() -> Self {
        Self {
            verbose: default_verbose(),
            print_interval: default_print_interval(),
        }
    }
}

fn default_verbose() -> bool {
    true
}
fn default_print_interval() -> usize {
    10
}

// ============================================================================
// Validation
// ============================================================================

/// Fatal configuration errors, reported before any generation runs.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Population size must be at least 2, got {0}")]
    PopulationTooSmall(usize),
    #[error("Elitism fraction must be within [0, 1], got {0}")]
    InvalidElitism(f64),
    #[error("Generation count must be positive")]
    NoGenerations,
    #[error("Genotype must declare at least one gene")]
    EmptyGenotype,
    #[error("Gene name '{0}' is declared more than once")]
    DuplicateGene(String),
    #[error("Gene '{name}' has invalid bounds [{minimum}, {maximum}]")]
    InvalidBounds {
        name: String,
        minimum: f64,
        maximum: f64,
    },
    #[error("Integer gene '{0}' has no admissible integer value within its bounds")]
    EmptyIntegerRange(String),
    #[error("Crossover needs at least 2 genes, genotype has {0}")]
    CrossoverNeedsTwoGenes(usize),
    #[error("Crossover is enabled but no crossover rate is set")]
    MissingCrossoverRate,
    #[error("Crossover rate must be a non-negative finite number, got {0}")]
    InvalidCrossoverRate(f64),
    #[error("Crossover rate {rate} selects {parents} parents from a population of {size}")]
    TooManyParents {
        rate: f64,
        parents: usize,
        size: usize,
    },
    #[error("Print interval must be positive")]
    InvalidPrintInterval,
    #[error("Objective {objective} takes {expected} arguments, genotype has {actual} genes")]
    ObjectiveArity {
        objective: String,
        expected: String,
        actual: usize,
    },
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Recoverable configuration problems. A default is substituted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigWarning {
    /// A gene declared an unknown type; it is treated as [`GeneType::Real`].
    UnknownGeneType { gene: String, declared: String },
    /// The constraint mode is unknown; [`ConstraintMode::Soft`] is used.
    UnknownConstraint { declared: String },
}

impl std::fmt::Display for ConfigWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownGeneType { gene, declared } => write!(
                f,
                "Gene '{gene}': type '{declared}' not recognized, defaulting to {:?}",
                GeneType::Real
            ),
            Self::UnknownConstraint { declared } => write!(
                f,
                "Constraint '{declared}' should be Hard or Soft, defaulting to {:?}",
                ConstraintMode::Soft
            ),
        }
    }
}

impl EvolutionConfig {
    /// Load a configuration from a JSON file. The result is not validated.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&contents)?)
    }

    /// Resolved constraint mode. Unknown modes fall back to [`ConstraintMode::Soft`].
    pub fn constraint_mode(&self) -> ConstraintMode {
        self.constraint.resolve_or(ConstraintMode::Soft)
    }

    /// Parents taken per crossover, or 0 when crossover is disabled.
    pub fn crossover_parents(&self) -> usize {
        if self.crossover.enabled {
            self.crossover.parent_count(self.population.size)
        } else {
            0
        }
    }

    /// Validate the configuration, including the genotype length against the
    /// configured objective's arity.
    ///
    /// Shape errors are fatal. Unknown gene types and constraint modes are
    /// returned as warnings; the substituted defaults apply.
    pub fn validate(&self) -> Result<Vec<ConfigWarning>, ConfigError> {
        let warnings = self.validate_structure()?;

        let arity = self.objective.arity();
        if !arity.accepts(self.genotype.len()) {
            return Err(ConfigError::ObjectiveArity {
                objective: self.objective.name().to_string(),
                expected: arity.to_string(),
                actual: self.genotype.len(),
            });
        }

        Ok(warnings)
    }

    /// Validate everything except the `objective` field, for runs that inject
    /// their own objective function.
    pub fn validate_structure(&self) -> Result<Vec<ConfigWarning>, ConfigError> {
        let size = self.population.size;
        if size < 2 {
            return Err(ConfigError::PopulationTooSmall(size));
        }

        if let Some(elitism) = self.population.elitism
            && !(0.0..=1.0).contains(&elitism)
        {
            return Err(ConfigError::InvalidElitism(elitism));
        }

        if self.generations == 0 {
            return Err(ConfigError::NoGenerations);
        }

        if self.reporting.print_interval == 0 {
            return Err(ConfigError::InvalidPrintInterval);
        }

        let mut warnings = Vec::new();

        if let Declared::Unrecognized(declared) = &self.constraint {
            warnings.push(ConfigWarning::UnknownConstraint {
                declared: declared.clone(),
            });
        }
        let constraint = self.constraint_mode();

        if self.genotype.is_empty() {
            return Err(ConfigError::EmptyGenotype);
        }

        let mut seen = HashSet::new();
        for gene in &self.genotype {
            if !seen.insert(gene.name.as_str()) {
                return Err(ConfigError::DuplicateGene(gene.name.clone()));
            }

            let (minimum, maximum) = gene.bounds;
            let hard_real = constraint == ConstraintMode::Hard && gene.gene_type() == GeneType::Real;
            if !minimum.is_finite()
                || !maximum.is_finite()
                || minimum >= maximum
                || !(maximum - minimum).is_finite()
                || (hard_real && !gene.has_interior())
            {
                return Err(ConfigError::InvalidBounds {
                    name: gene.name.clone(),
                    minimum,
                    maximum,
                });
            }

            if let Declared::Unrecognized(declared) = &gene.kind {
                warnings.push(ConfigWarning::UnknownGeneType {
                    gene: gene.name.clone(),
                    declared: declared.clone(),
                });
            }

            if gene.gene_type() == GeneType::Integer && gene.integer_range(constraint).is_empty() {
                return Err(ConfigError::EmptyIntegerRange(gene.name.clone()));
            }
        }

        if self.crossover.enabled {
            let genes = self.genotype.len();
            if genes < 2 {
                return Err(ConfigError::CrossoverNeedsTwoGenes(genes));
            }

            let rate = self.crossover.rate.ok_or(ConfigError::MissingCrossoverRate)?;
            if !rate.is_finite() || rate < 0.0 {
                return Err(ConfigError::InvalidCrossoverRate(rate));
            }

            let parents = self.crossover_parents();
            if parents > size {
                return Err(ConfigError::TooManyParents {
                    rate,
                    parents,
                    size,
                });
            }
        }

        for warning in &warnings {
            log::warn!("{warning}");
        }

        Ok(warnings)
    }
}
