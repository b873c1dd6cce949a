//! Evolutionary driver.

use std::time::Instant;

use crate::schema::{
    ConfigError, ConfigWarning, EvolutionConfig, EvolutionProgress, EvolutionResult,
    EvolutionStats, EvolutionTrace, PhenotypeSnapshot, TraceEntry,
};

use super::archive::TraceExport;
use super::fitness::{EvaluationError, Evaluator, Fitness, Objective};
use super::genome::GenomeRng;
use super::individual::Individual;
use super::population::Population;
use super::report::ProgressReporter;

/// Failure of an evolutionary run.
#[derive(Debug, thiserror::Error)]
pub enum EvolutionError {
    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Evaluation(#[from] EvaluationError),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("Population is empty")]
    EmptyPopulation,
}

/// Evolution engine that runs the search.
///
/// Each generation runs crossover (if enabled), ranks the population,
/// records the best and worst individuals in the trace, then selects the
/// next generation.
pub struct EvolutionEngine {
    config: EvolutionConfig,
    rng: GenomeRng,
    population: Population,
    warnings: Vec<ConfigWarning>,
    trace: EvolutionTrace,
    generation: usize,
}

impl EvolutionEngine {
    /// Engine using the configured built-in objective and fitness transform.
    pub fn new(config: EvolutionConfig) -> Result<Self, ConfigError> {
        let warnings = config.validate()?;
        let evaluator = Evaluator::new(config.objective, config.fitness);
        Ok(Self::build(config, evaluator, warnings))
    }

    /// Engine using injected objective and fitness functions. The `objective`
    /// and `fitness` fields of `config` are ignored.
    pub fn with_functions(
        config: EvolutionConfig,
        objective: impl Objective + 'static,
        fitness: impl Fitness + 'static,
    ) -> Result<Self, ConfigError> {
        let warnings = config.validate_structure()?;
        Ok(Self::build(config, Evaluator::new(objective, fitness), warnings))
    }

    fn build(config: EvolutionConfig, evaluator: Evaluator, warnings: Vec<ConfigWarning>) -> Self {
        let mut rng = GenomeRng::from_seed(config.random_seed);
        let population = Population::from_config(&config, evaluator, &mut rng);

        log::info!(
            "Initialized {} individuals over {} genes ({:?} constraint)",
            population.len(),
            population.layout().len(),
            population.layout().constraint()
        );

        Self {
            config,
            rng,
            population,
            warnings,
            trace: EvolutionTrace::default(),
            generation: 0,
        }
    }

    pub fn config(&self) -> &EvolutionConfig {
        &self.config
    }

    /// Configuration warnings raised at construction.
    pub fn warnings(&self) -> &[ConfigWarning] {
        &self.warnings
    }

    pub fn population(&self) -> &Population {
        &self.population
    }

    pub fn trace(&self) -> &EvolutionTrace {
        &self.trace
    }

    /// Generations completed so far.
    pub fn generation(&self) -> usize {
        self.generation
    }

    /// Whether every configured generation has run.
    pub fn is_done(&self) -> bool {
        self.generation >= self.config.generations
    }

    /// Run a single generation.
    pub fn step(&mut self) -> Result<EvolutionProgress, EvolutionError> {
        if self.config.crossover.enabled
            && let Some(rate) = self.config.crossover.rate
        {
            self.population.crossover(rate, &mut self.rng)?;
        }

        self.population.evaluate()?;
        let entry = self.trace_entry()?;
        let progress = EvolutionProgress {
            generation: self.generation,
            total_generations: self.config.generations,
            best_score: entry.best.score,
            worst_score: entry.worst.score,
        };
        self.trace.push(entry);

        self.population.select(&mut self.rng);
        self.generation += 1;

        log::debug!(
            "Generation {}: best {:.6}, worst {:.6}",
            progress.generation,
            progress.best_score,
            progress.worst_score
        );
        Ok(progress)
    }

    /// Run evolution (blocking), without progress output.
    pub fn run(&mut self) -> Result<EvolutionResult, EvolutionError> {
        self.run_with_reporter(&mut ())
    }

    /// Run all remaining generations, reporting to `reporter`.
    pub fn run_with_reporter<R>(&mut self, reporter: &mut R) -> Result<EvolutionResult, EvolutionError>
    where
        R: ProgressReporter + ?Sized,
    {
        let start_time = Instant::now();
        let verbose = self.config.reporting.verbose;
        let interval = self.config.reporting.print_interval.max(1);

        for warning in &self.warnings {
            reporter.on_warning(warning);
        }

        log::info!(
            "Starting evolution: {} generations, objective {}",
            self.config.generations,
            self.population.evaluator().objective_name()
        );
        reporter.on_start(self.config.generations);

        while !self.is_done() {
            let progress = self.step()?;
            if verbose && progress.generation % interval == 0 {
                reporter.on_generation(&progress);
            }
        }

        // Rank the last selected generation so best and worst are exact.
        self.population.evaluate()?;
        let (best, best_score) = self.population.best().ok_or(EvolutionError::EmptyPopulation)?;
        let (worst, worst_score) = self.population.worst().ok_or(EvolutionError::EmptyPopulation)?;
        let (best, worst) = (best.snapshot(best_score), worst.snapshot(worst_score));

        if verbose {
            reporter.on_summary(&self.population.show()?);
        }

        let elapsed = start_time.elapsed().as_secs_f64();
        let evaluations = self.population.evaluator().evaluations();
        log::info!(
            "Evolution finished after {} generations: best {:.6} ({} evaluations, {:.3}s)",
            self.generation,
            best_score,
            evaluations,
            elapsed
        );

        let result = EvolutionResult {
            best,
            worst,
            trace: self.trace.clone(),
            stats: EvolutionStats {
                generations: self.generation,
                evaluations,
                best_score,
                elapsed_seconds: elapsed,
            },
        };
        reporter.on_complete(&result);
        Ok(result)
    }

    /// Trace bundled with the genotype and objective name.
    pub fn export(&self) -> TraceExport {
        TraceExport::new(
            self.config.genotype.clone(),
            self.population.evaluator().objective_name(),
            self.trace.clone(),
        )
    }

    /// Best and worst of the ranked population.
    fn trace_entry(&self) -> Result<TraceEntry, EvolutionError> {
        let evaluator = self.population.evaluator();
        let (best, _) = self.population.best().ok_or(EvolutionError::EmptyPopulation)?;
        let (worst, _) = self.population.worst().ok_or(EvolutionError::EmptyPopulation)?;

        Ok(TraceEntry {
            generation: self.generation,
            best: phenotype_snapshot(evaluator, best)?,
            worst: phenotype_snapshot(evaluator, worst)?,
        })
    }
}

fn phenotype_snapshot(
    evaluator: &Evaluator,
    individual: &Individual,
) -> Result<PhenotypeSnapshot, EvaluationError> {
    let (objective, score) = evaluator.assess(individual)?;
    Ok(PhenotypeSnapshot {
        phenotype: individual.phenotype(),
        score,
        objective,
    })
}
