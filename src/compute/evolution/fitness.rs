//! Objective and fitness seams.
//!
//! An [`Objective`] maps a phenotype to a raw score; a [`Fitness`] transform
//! maps the raw score to an ascending-sortable score where lower is better.
//! Both are injected, and both may fail: failures propagate and abort the run.

use std::cell::Cell;

use crate::schema::{FitnessSpec, TestFunction};

use super::Individual;

/// Failure raised while evaluating an individual.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EvaluationError {
    #[error("Objective {objective} takes {expected} arguments, got {actual}")]
    Arity {
        objective: String,
        expected: String,
        actual: usize,
    },
    #[error("Objective function failed: {0}")]
    Objective(String),
    #[error("Fitness function failed: {0}")]
    Fitness(String),
}

/// Function under optimization. Called with gene values in genotype order.
pub trait Objective {
    fn evaluate(&self, phenotype: &[f64]) -> Result<f64, EvaluationError>;

    /// Display name used in logs and exports.
    fn name(&self) -> &str {
        "custom"
    }
}

impl<F> Objective for F
where
    F: Fn(&[f64]) -> Result<f64, EvaluationError>,
{
    fn evaluate(&self, phenotype: &[f64]) -> Result<f64, EvaluationError> {
        self(phenotype)
    }
}

impl Objective for TestFunction {
    fn evaluate(&self, phenotype: &[f64]) -> Result<f64, EvaluationError> {
        self.compute(phenotype).ok_or_else(|| EvaluationError::Arity {
            objective: TestFunction::name(self).to_string(),
            expected: self.arity().to_string(),
            actual: phenotype.len(),
        })
    }

    fn name(&self) -> &str {
        TestFunction::name(self)
    }
}

/// Monotonic transform from raw objective output to score.
pub trait Fitness {
    fn apply(&self, raw: f64) -> Result<f64, EvaluationError>;
}

impl<F> Fitness for F
where
    F: Fn(f64) -> Result<f64, EvaluationError>,
{
    fn apply(&self, raw: f64) -> Result<f64, EvaluationError> {
        self(raw)
    }
}

impl Fitness for FitnessSpec {
    fn apply(&self, raw: f64) -> Result<f64, EvaluationError> {
        Ok(match *self {
            Self::Minimize => raw,
            Self::Maximize => -raw,
            Self::SquaredError { target } => (raw - target).powi(2),
            Self::AbsoluteError { target } => (raw - target).abs(),
        })
    }
}

/// Objective and fitness pair shared by every evaluation in a run.
pub struct Evaluator {
    objective: Box<dyn Objective>,
    fitness: Box<dyn Fitness>,
    calls: Cell<u64>,
}

impl Evaluator {
    pub fn new(objective: impl Objective + 'static, fitness: impl Fitness + 'static) -> Self {
        Self {
            objective: Box::new(objective),
            fitness: Box::new(fitness),
            calls: Cell::new(0),
        }
    }

    /// Name of the wrapped objective.
    pub fn objective_name(&self) -> &str {
        self.objective.name()
    }

    /// Raw objective value of an individual.
    pub fn objective(&self, individual: &Individual) -> Result<f64, EvaluationError> {
        self.count_call();
        self.objective.evaluate(&individual.phenotype())
    }

    /// Fitness-transformed score of an individual, via [`Individual::evaluate`].
    pub fn score(&self, individual: &Individual) -> Result<f64, EvaluationError> {
        self.count_call();
        individual.evaluate(&*self.objective, &*self.fitness)
    }

    /// Raw objective value and score of an individual, from a single objective call.
    pub fn assess(&self, individual: &Individual) -> Result<(f64, f64), EvaluationError> {
        let raw = self.objective(individual)?;
        Ok((raw, self.transform(raw)?))
    }

    /// Apply the fitness transform to a raw objective value.
    pub fn transform(&self, raw: f64) -> Result<f64, EvaluationError> {
        self.fitness.apply(raw)
    }

    /// Total objective calls so far.
    pub fn evaluations(&self) -> u64 {
        self.calls.get()
    }

    fn count_call(&self) {
        self.calls.set(self.calls.get() + 1);
    }
}

impl std::fmt::Debug for Evaluator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Evaluator")
            .field("objective", &self.objective.name())
            .field("evaluations", &self.calls.get())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fitness_directions() {
        assert_eq!(FitnessSpec::Minimize.apply(2.5).unwrap(), 2.5);
        assert_eq!(FitnessSpec::Maximize.apply(2.5).unwrap(), -2.5);
        assert_eq!(
            FitnessSpec::SquaredError { target: 3.0 }.apply(1.0).unwrap(),
            4.0
        );
        assert_eq!(
            FitnessSpec::AbsoluteError { target: 3.0 }.apply(1.0).unwrap(),
            2.0
        );
    }

    #[test]
    fn test_maximize_reverses_ranking() {
        let mut raw = [1.0, 5.0, 3.0];
        raw.sort_by(|a, b| {
            let a = FitnessSpec::Maximize.apply(*a).unwrap();
            let b = FitnessSpec::Maximize.apply(*b).unwrap();
            a.total_cmp(&b)
        });
        assert_eq!(raw, [5.0, 3.0, 1.0]);
    }

    #[test]
    fn test_test_function_arity_error() {
        let err = Objective::evaluate(&TestFunction::Booth, &[1.0, 2.0, 3.0]).unwrap_err();
        assert_eq!(
            err,
            EvaluationError::Arity {
                objective: "Booth".to_string(),
                expected: "exactly 2".to_string(),
                actual: 3,
            }
        );
    }

    #[test]
    fn test_evaluator_score_matches_individual_evaluate() {
        use super::super::{GenomeRng, GenotypeLayout};
        use crate::schema::{ConstraintMode, GenotypeSchema};

        let layout = GenotypeLayout::new(&GenotypeSchema::default(), ConstraintMode::Soft);
        let mut rng = GenomeRng::new(21);
        let individual = Individual::random(&layout, &mut rng);

        let evaluator = Evaluator::new(TestFunction::Booth, FitnessSpec::SquaredError { target: 1.0 });
        let expected = individual
            .evaluate(&TestFunction::Booth, &FitnessSpec::SquaredError { target: 1.0 })
            .unwrap();
        assert_eq!(evaluator.score(&individual).unwrap(), expected);

        let (raw, score) = evaluator.assess(&individual).unwrap();
        assert_eq!(score, expected);
        assert_eq!(evaluator.transform(raw).unwrap(), expected);
        assert_eq!(evaluator.evaluations(), 2);
    }

    #[test]
    fn test_closures_as_objective_and_fitness() {
        let sum = |values: &[f64]| -> Result<f64, EvaluationError> { Ok(values.iter().sum()) };
        let double = |raw: f64| -> Result<f64, EvaluationError> { Ok(raw * 2.0) };
        assert_eq!(sum.evaluate(&[1.0, 2.0]).unwrap(), 3.0);
        assert_eq!(Objective::name(&sum), "custom");
        assert_eq!(double.apply(1.5).unwrap(), 3.0);
    }
}
