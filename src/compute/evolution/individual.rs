//! Individuals: an ordered, named genotype plus evaluation.

use std::sync::Arc;

use crate::schema::{ConstraintMode, GeneSpec, GenotypeSchema, IndividualSnapshot};

use super::fitness::{EvaluationError, Fitness, Objective};
use super::genome::{Gene, GenomeRng};

/// Genotype layout resolved once per run and shared by every individual.
///
/// Gene names and order are fixed here, so every individual of a run has the
/// same genotype shape.
#[derive(Debug, Clone)]
pub struct GenotypeLayout {
    names: Arc<[String]>,
    genes: Arc<[GeneSpec]>,
    constraint: ConstraintMode,
}

impl GenotypeLayout {
    pub fn new(schema: &GenotypeSchema, constraint: ConstraintMode) -> Self {
        Self {
            names: schema.names().map(str::to_string).collect(),
            genes: schema.iter().cloned().collect(),
            constraint,
        }
    }

    pub fn len(&self) -> usize {
        self.genes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.genes.is_empty()
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn constraint(&self) -> ConstraintMode {
        self.constraint
    }
}

/// A candidate solution.
#[derive(Debug, Clone, PartialEq)]
pub struct Individual {
    names: Arc<[String]>,
    genes: Vec<Gene>,
}

impl Individual {
    /// Random individual, one gene per layout entry in layout order.
    pub fn random(layout: &GenotypeLayout, rng: &mut GenomeRng) -> Self {
        let genes = layout
            .genes
            .iter()
            .map(|spec| Gene::random(spec, layout.constraint, rng))
            .collect();

        Self {
            names: Arc::clone(&layout.names),
            genes,
        }
    }

    /// Build from explicit genes. `genes` must follow the layout order.
    pub fn from_genes(layout: &GenotypeLayout, genes: Vec<Gene>) -> Self {
        debug_assert_eq!(genes.len(), layout.len());
        Self {
            names: Arc::clone(&layout.names),
            genes,
        }
    }

    /// Mutate every gene in order.
    pub fn mutate(&mut self, rng: &mut GenomeRng) {
        for gene in &mut self.genes {
            gene.mutate(rng);
        }
    }

    /// Gene values in genotype order.
    pub fn phenotype(&self) -> Vec<f64> {
        self.genes.iter().map(Gene::value).collect()
    }

    /// Score: `fitness(objective(phenotype...))`.
    pub fn evaluate(
        &self,
        objective: &dyn Objective,
        fitness: &dyn Fitness,
    ) -> Result<f64, EvaluationError> {
        fitness.apply(objective.evaluate(&self.phenotype())?)
    }

    /// Single-point crossover with `other` at `position`.
    ///
    /// The first child takes genes `..position` from `self` and the rest from
    /// `other`; the second child is the mirror image.
    pub fn splice(&self, other: &Individual, position: usize) -> (Individual, Individual) {
        let (mut first, mut second) = (self.genes.clone(), other.genes.clone());
        for i in position..first.len() {
            std::mem::swap(&mut first[i], &mut second[i]);
        }

        (
            Self {
                names: Arc::clone(&self.names),
                genes: first,
            },
            Self {
                names: Arc::clone(&self.names),
                genes: second,
            },
        )
    }

    /// `(name, gene)` pairs in genotype order.
    pub fn genotype(&self) -> impl Iterator<Item = (&str, &Gene)> {
        self.names.iter().map(String::as_str).zip(self.genes.iter())
    }

    /// Gene by name.
    pub fn gene(&self, name: &str) -> Option<&Gene> {
        self.names
            .iter()
            .position(|n| n == name)
            .map(|i| &self.genes[i])
    }

    pub fn genes(&self) -> &[Gene] {
        &self.genes
    }

    pub fn len(&self) -> usize {
        self.genes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.genes.is_empty()
    }

    /// Snapshot with the given score.
    pub fn snapshot(&self, score: f64) -> IndividualSnapshot {
        IndividualSnapshot {
            genotype: self
                .genotype()
                .map(|(name, gene)| (name.to_string(), gene.allele()))
                .collect(),
            score,
        }
    }
}

/// `name : value` listing, one gene per line.
impl std::fmt::Display for Individual {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (name, gene) in self.genotype() {
            writeln!(f, "     {name} : {}", gene.allele())?;
        }
        Ok(())
    }
}
