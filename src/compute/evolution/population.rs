//! Fixed-size population with ranking, elitist selection, mutation and crossover.
//!
//! # Ordering
//!
//! The population is only ordered right after [`Population::evaluate`]:
//! ascending by score, best first. [`Population::select`] reads its elites
//! from that order, so it must follow an `evaluate` call. Every operator
//! that changes the population clears the ranking.
//!
//! # Size
//!
//! `select` and `crossover` are each size-conserving: the population holds
//! exactly `size` individuals before and after either call.

use crate::schema::{EvolutionConfig, PopulationConfig, parent_count};

use super::fitness::{EvaluationError, Evaluator};
use super::genome::GenomeRng;
use super::individual::{GenotypeLayout, Individual};

/// Number of individuals listed at each end by [`Population::show`].
const SHOW_COUNT: usize = 5;

/// Scores involved in one crossover pair.
#[derive(Debug, Clone, PartialEq)]
pub struct PairOutcome {
    /// Score of the parent returned to the population.
    pub kept_parent: f64,
    /// Score of the parent dropped from the population.
    pub discarded_parent: f64,
    /// Score of the child added to the population.
    pub kept_child: f64,
    /// Score of the child that was dropped.
    pub discarded_child: f64,
    /// Crossover cut position.
    pub position: usize,
}

/// Summary of one [`Population::crossover`] call.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CrossoverReport {
    /// Parents removed from the population.
    pub parents: usize,
    /// One outcome per parent pair.
    pub pairs: Vec<PairOutcome>,
}

/// A population of candidate solutions.
#[derive(Debug)]
pub struct Population {
    individuals: Vec<Individual>,
    settings: PopulationConfig,
    layout: GenotypeLayout,
    evaluator: Evaluator,
    /// Scores in population order, present only while the population is ranked.
    ranking: Option<Vec<f64>>,
}

impl Population {
    /// Random population of `settings.size` individuals.
    pub fn new(
        layout: GenotypeLayout,
        settings: PopulationConfig,
        evaluator: Evaluator,
        rng: &mut GenomeRng,
    ) -> Self {
        let individuals = (0..settings.size)
            .map(|_| Individual::random(&layout, rng))
            .collect();

        Self {
            individuals,
            settings,
            layout,
            evaluator,
            ranking: None,
        }
    }

    /// Random population from a validated configuration.
    pub fn from_config(config: &EvolutionConfig, evaluator: Evaluator, rng: &mut GenomeRng) -> Self {
        let layout = GenotypeLayout::new(&config.genotype, config.constraint_mode());
        Self::new(layout, config.population.clone(), evaluator, rng)
    }

    pub fn len(&self) -> usize {
        self.individuals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.individuals.is_empty()
    }

    /// Target size, conserved across generations.
    pub fn size(&self) -> usize {
        self.settings.size
    }

    pub fn individuals(&self) -> &[Individual] {
        &self.individuals
    }

    pub fn layout(&self) -> &GenotypeLayout {
        &self.layout
    }

    pub fn evaluator(&self) -> &Evaluator {
        &self.evaluator
    }

    /// Elites carried over per selection: `floor(elitism * size)`.
    pub fn elite_count(&self) -> usize {
        self.settings.elite_count().min(self.individuals.len())
    }

    /// Score every individual and sort ascending by score, best first.
    ///
    /// Ties keep their relative order. NaN scores sort after every number.
    pub fn evaluate(&mut self) -> Result<(), EvaluationError> {
        let scores = self.scores()?;

        let mut scored: Vec<(f64, Individual)> = scores
            .into_iter()
            .zip(std::mem::take(&mut self.individuals))
            .collect();
        scored.sort_by(|a, b| a.0.total_cmp(&b.0));

        let (scores, individuals): (Vec<f64>, Vec<Individual>) = scored.into_iter().unzip();
        self.individuals = individuals;
        self.ranking = Some(scores);
        Ok(())
    }

    /// Scores in current population order. Does not reorder.
    pub fn scores(&self) -> Result<Vec<f64>, EvaluationError> {
        self.individuals
            .iter()
            .map(|individual| self.evaluator.score(individual))
            .collect()
    }

    /// Scores from the last [`evaluate`](Self::evaluate), if nothing changed since.
    pub fn ranked_scores(&self) -> Option<&[f64]> {
        self.ranking.as_deref()
    }

    /// Best individual and its score, if ranked.
    pub fn best(&self) -> Option<(&Individual, f64)> {
        let scores = self.ranking.as_ref()?;
        Some((self.individuals.first()?, *scores.first()?))
    }

    /// Worst individual and its score, if ranked.
    pub fn worst(&self) -> Option<(&Individual, f64)> {
        let scores = self.ranking.as_ref()?;
        Some((self.individuals.last()?, *scores.last()?))
    }

    /// Mutate every individual.
    pub fn mutate(&mut self, rng: &mut GenomeRng) {
        Self::mutate_subset(&mut self.individuals, rng);
        self.ranking = None;
    }

    /// Mutate every individual of `subset`.
    pub fn mutate_subset(subset: &mut [Individual], rng: &mut GenomeRng) {
        for individual in subset {
            individual.mutate(rng);
        }
    }

    /// Build the next generation.
    ///
    /// The first `elite_count()` individuals of the current ranking are copied
    /// unchanged. The remaining slots are filled with mutated copies of
    /// individuals drawn uniformly with replacement, so one parent may appear
    /// several times while others are lost.
    pub fn select(&mut self, rng: &mut GenomeRng) {
        let elite_count = self.elite_count();
        debug_assert!(
            elite_count == 0 || self.ranking.is_some(),
            "elitist selection requires a ranked population"
        );

        let mut next = Vec::with_capacity(self.settings.size);
        next.extend(self.individuals.iter().take(elite_count).cloned());

        let picks =
            rng.sample_with_replacement(self.individuals.len(), self.settings.size - next.len());
        let mut mutants: Vec<Individual> = picks
            .into_iter()
            .map(|i| self.individuals[i].clone())
            .collect();
        Self::mutate_subset(&mut mutants, rng);
        next.extend(mutants);

        log::debug!(
            "Selection: {} elites, {} mutants",
            elite_count,
            next.len() - elite_count
        );

        self.individuals = next;
        self.ranking = None;
    }

    /// Crossover a `rate` fraction of the population.
    ///
    /// `floor(rate * len)` rounded up to even distinct parents are removed and
    /// split by position into two halves paired up in order. For each pair the
    /// better-scoring parent goes back into the population, and the better of
    /// its two single-point children is added. Ties keep the second parent and
    /// the second child. Population size is unchanged.
    pub fn crossover(
        &mut self,
        rate: f64,
        rng: &mut GenomeRng,
    ) -> Result<CrossoverReport, EvaluationError> {
        let len = self.individuals.len();
        let requested = parent_count(rate, len);
        debug_assert!(requested <= len, "crossover rate selects more parents than exist");
        let parents = requested.min(len - len % 2);
        if parents == 0 {
            return Ok(CrossoverReport::default());
        }

        let mut picked = rng.sample_distinct(len, parents);
        picked.sort_unstable_by(|a, b| b.cmp(a));
        let (first, second) = picked.split_at(parents / 2);

        let mut survivors = Vec::with_capacity(first.len());
        let mut pairs = Vec::with_capacity(first.len());
        for (&i, &j) in first.iter().zip(second) {
            let (a, b) = (&self.individuals[i], &self.individuals[j]);
            let (score_a, score_b) = (self.evaluator.score(a)?, self.evaluator.score(b)?);
            let (kept, kept_score, dropped_score) = if score_a < score_b {
                (a, score_a, score_b)
            } else {
                (b, score_b, score_a)
            };
            survivors.push(kept.clone());
            pairs.push(PairOutcome {
                kept_parent: kept_score,
                discarded_parent: dropped_score,
                kept_child: 0.0,
                discarded_child: 0.0,
                position: 0,
            });
        }

        let mut children = Vec::with_capacity(first.len());
        for ((&i, &j), outcome) in first.iter().zip(second).zip(pairs.iter_mut()) {
            let position = rng.crossover_point(self.layout.len());
            let (one, two) = self.individuals[i].splice(&self.individuals[j], position);
            let (score_one, score_two) = (self.evaluator.score(&one)?, self.evaluator.score(&two)?);
            let (child, kept_score, dropped_score) = if score_one < score_two {
                (one, score_one, score_two)
            } else {
                (two, score_two, score_one)
            };
            outcome.kept_child = kept_score;
            outcome.discarded_child = dropped_score;
            outcome.position = position;
            children.push(child);
        }

        for &index in &picked {
            self.individuals.remove(index);
        }
        self.individuals.extend(survivors);
        self.individuals.extend(children);
        self.ranking = None;

        for (n, pair) in pairs.iter().enumerate() {
            log::debug!(
                "Crossover pair {}: parents {:.4}/{:.4}, children {:.4}/{:.4} at {}",
                n,
                pair.kept_parent,
                pair.discarded_parent,
                pair.kept_child,
                pair.discarded_child,
                pair.position
            );
        }

        Ok(CrossoverReport { parents, pairs })
    }

    /// The 5 best and 5 worst individuals with their scores.
    pub fn show(&self) -> Result<String, EvaluationError> {
        let scores = match &self.ranking {
            Some(scores) => scores.clone(),
            None => self.scores()?,
        };

        let mut order: Vec<usize> = (0..self.individuals.len()).collect();
        order.sort_by(|&a, &b| scores[a].total_cmp(&scores[b]));

        let shown = SHOW_COUNT.min(order.len());
        let entry = |index: usize| {
            format!("fit: {}\nindiv:\n{}", scores[index], self.individuals[index])
        };

        let mut out: String = order[..shown].iter().map(|&i| entry(i)).collect();
        out.push_str("...\n");
        out.extend(order[order.len() - shown..].iter().map(|&i| entry(i)));
        Ok(out)
    }
}
