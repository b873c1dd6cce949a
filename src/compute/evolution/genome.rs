//! Genes and the random source behind every evolutionary operator.
//!
//! All randomness in a run (gene initialization, mutation, selection
//! sampling, crossover pairing and cut points) is drawn from one
//! [`GenomeRng`], so a fixed seed reproduces a run exactly.

use std::ops::Range;

use rand::distributions::Open01;
use rand::prelude::*;
use rand::seq::index;

use crate::schema::{Allele, ConstraintMode, GeneSpec, GeneType};

/// Random number generator wrapper for genome operations.
pub struct GenomeRng {
    rng: StdRng,
}

impl GenomeRng {
    /// Create from seed.
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Create with random seed.
    pub fn random() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Seeded when `seed` is set, otherwise from entropy.
    pub fn from_seed(seed: Option<u64>) -> Self {
        seed.map_or_else(Self::random, Self::new)
    }

    /// Uniform random in `[minimum, maximum)`.
    pub fn uniform(&mut self, minimum: f64, maximum: f64) -> f64 {
        self.rng.gen_range(minimum..maximum)
    }

    /// Uniform random strictly inside `(minimum, maximum)`.
    pub fn open_uniform(&mut self, minimum: f64, maximum: f64) -> f64 {
        let t: f64 = self.rng.sample(Open01);
        let value = minimum + (maximum - minimum) * t;
        if minimum < value && value < maximum {
            value
        } else {
            // Rounding pushed the draw onto a bound.
            minimum / 2.0 + maximum / 2.0
        }
    }

    /// Uniform integer in a half-open range. An empty range yields its start.
    pub fn integer(&mut self, range: Range<i64>) -> i64 {
        if range.is_empty() {
            return range.start;
        }
        self.rng.gen_range(range)
    }

    /// Draw from the standard normal distribution.
    pub fn standard_normal(&mut self) -> f64 {
        self.rng.sample(rand_distr::StandardNormal)
    }

    /// Single-point crossover cut in `1..gene_count`, so each child keeps at
    /// least one gene from each parent.
    pub fn crossover_point(&mut self, gene_count: usize) -> usize {
        debug_assert!(gene_count >= 2, "crossover needs at least two genes");
        self.rng.gen_range(1..gene_count.max(2))
    }

    /// `amount` distinct indices from `0..length`, in random order.
    pub fn sample_distinct(&mut self, length: usize, amount: usize) -> Vec<usize> {
        index::sample(&mut self.rng, length, amount.min(length)).into_vec()
    }

    /// `amount` indices drawn uniformly from `0..length` with replacement.
    pub fn sample_with_replacement(&mut self, length: usize, amount: usize) -> Vec<usize> {
        if length == 0 {
            return Vec::new();
        }
        (0..amount).map(|_| self.rng.gen_range(0..length)).collect()
    }
}

/// A single bounded scalar gene.
///
/// Under [`ConstraintMode::Hard`] the value stays strictly inside
/// `(minimum, maximum)` from construction on. Under [`ConstraintMode::Soft`]
/// only the initial draw is bounded.
#[derive(Debug, Clone, PartialEq)]
pub struct Gene {
    allele: Allele,
    minimum: f64,
    maximum: f64,
    constraint: ConstraintMode,
}

impl Gene {
    /// Draw a gene uniformly within the declared bounds.
    pub fn random(spec: &GeneSpec, constraint: ConstraintMode, rng: &mut GenomeRng) -> Self {
        let (minimum, maximum) = spec.bounds;
        let allele = match spec.gene_type() {
            GeneType::Integer => Allele::Integer(rng.integer(spec.integer_range(constraint))),
            GeneType::Real => Allele::Real(match constraint {
                ConstraintMode::Hard => rng.open_uniform(minimum, maximum),
                ConstraintMode::Soft => rng.uniform(minimum, maximum),
            }),
        };

        Self {
            allele,
            minimum,
            maximum,
            constraint,
        }
    }

    /// Build a gene with a given value.
    pub fn with_allele(
        allele: Allele,
        minimum: f64,
        maximum: f64,
        constraint: ConstraintMode,
    ) -> Self {
        Self {
            allele,
            minimum,
            maximum,
            constraint,
        }
    }

    /// Add a standard normal perturbation, rounded for integer genes.
    ///
    /// Under [`ConstraintMode::Hard`] a perturbation that would leave
    /// `(minimum, maximum)` is dropped and the gene keeps its value. Returns
    /// whether the perturbation was applied.
    pub fn mutate(&mut self, rng: &mut GenomeRng) -> bool {
        let noise = rng.standard_normal();
        let candidate = match self.allele {
            Allele::Integer(v) => Allele::Integer(v.saturating_add(noise.round() as i64)),
            Allele::Real(v) => Allele::Real(v + noise),
        };

        if self.constraint == ConstraintMode::Hard && !self.admits(candidate.as_f64()) {
            return false;
        }
        self.allele = candidate;
        true
    }

    /// Whether `value` lies strictly inside the gene's bounds.
    #[inline]
    pub fn admits(&self, value: f64) -> bool {
        self.minimum < value && value < self.maximum
    }

    /// Current value as passed to the objective.
    #[inline]
    pub fn value(&self) -> f64 {
        self.allele.as_f64()
    }

    #[inline]
    pub fn allele(&self) -> Allele {
        self.allele
    }

    #[inline]
    pub fn gene_type(&self) -> GeneType {
        self.allele.gene_type()
    }

    #[inline]
    pub fn bounds(&self) -> (f64, f64) {
        (self.minimum, self.maximum)
    }

    #[inline]
    pub fn constraint(&self) -> ConstraintMode {
        self.constraint
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::Declared;
    use proptest::prelude::*;

    #[test]
    fn test_seeded_rng_is_deterministic() {
        let mut a = GenomeRng::new(7);
        let mut b = GenomeRng::new(7);
        for _ in 0..16 {
            assert_eq!(a.standard_normal(), b.standard_normal());
        }
        assert_eq!(a.sample_distinct(20, 6), b.sample_distinct(20, 6));
    }

    #[test]
    fn test_sample_distinct_has_no_repeats() {
        let mut rng = GenomeRng::new(42);
        let mut picked = rng.sample_distinct(20, 8);
        assert_eq!(picked.len(), 8);
        picked.sort_unstable();
        picked.dedup();
        assert_eq!(picked.len(), 8);
        assert!(picked.iter().all(|&i| i < 20));
    }

    #[test]
    fn test_crossover_point_never_zero() {
        let mut rng = GenomeRng::new(3);
        for _ in 0..200 {
            let point = rng.crossover_point(2);
            assert_eq!(point, 1);
        }
        for _ in 0..200 {
            let point = rng.crossover_point(5);
            assert!((1..5).contains(&point));
        }
    }

    #[test]
    fn test_random_integer_gene() {
        let mut rng = GenomeRng::new(42);
        let spec = GeneSpec::integer("n", 0, 3);
        for _ in 0..100 {
            let gene = Gene::random(&spec, ConstraintMode::Soft, &mut rng);
            assert!(matches!(gene.allele(), Allele::Integer(0..=2)));

            let gene = Gene::random(&spec, ConstraintMode::Hard, &mut rng);
            assert!(matches!(gene.allele(), Allele::Integer(1..=2)));
        }
    }

    #[test]
    fn test_unrecognized_type_builds_real_gene() {
        let mut rng = GenomeRng::new(42);
        let spec = GeneSpec {
            name: "z".to_string(),
            kind: Declared::Unrecognized("complex".to_string()),
            bounds: (0.0, 1.0),
        };
        let gene = Gene::random(&spec, ConstraintMode::Soft, &mut rng);
        assert_eq!(gene.gene_type(), GeneType::Real);
    }

    #[test]
    fn test_integer_mutation_stays_integer() {
        let mut rng = GenomeRng::new(5);
        let mut gene = Gene::with_allele(Allele::Integer(0), -100.0, 100.0, ConstraintMode::Soft);
        for _ in 0..50 {
            gene.mutate(&mut rng);
            assert_eq!(gene.gene_type(), GeneType::Integer);
        }
    }

    #[test]
    fn test_soft_mutation_always_applies() {
        let mut rng = GenomeRng::new(11);
        let mut gene = Gene::with_allele(Allele::Real(0.999), 0.0, 1.0, ConstraintMode::Soft);
        let mut escaped = false;
        for _ in 0..100 {
            assert!(gene.mutate(&mut rng));
            escaped |= !gene.admits(gene.value());
        }
        assert!(escaped);
    }

    #[test]
    fn test_hard_mutation_rejected_at_tight_bounds() {
        let mut rng = GenomeRng::new(11);
        // Any non-zero integer step leaves (-1, 1).
        let mut gene = Gene::with_allele(Allele::Integer(0), -1.0, 1.0, ConstraintMode::Hard);
        for _ in 0..100 {
            gene.mutate(&mut rng);
            assert_eq!(gene.allele(), Allele::Integer(0));
        }
    }

    #[test]
    fn test_open_uniform_in_narrow_and_wide_ranges() {
        let mut rng = GenomeRng::new(13);
        let (low, high) = (1.0, 1.0 + 2.0 * f64::EPSILON);
        for _ in 0..200 {
            let v = rng.open_uniform(low, high);
            assert!(low < v && v < high);
        }

        let spec = GeneSpec::real("x", -1e307, 1e307);
        for _ in 0..200 {
            let gene = Gene::random(&spec, ConstraintMode::Hard, &mut rng);
            assert!(gene.admits(gene.value()));
            assert!(gene.value().is_finite());
        }
    }

    #[test]
    fn test_copy_is_independent() {
        let mut rng = GenomeRng::new(9);
        let original = Gene::with_allele(Allele::Real(0.5), -10.0, 10.0, ConstraintMode::Soft);
        let mut copy = original.clone();
        copy.mutate(&mut rng);
        assert_eq!(original.allele(), Allele::Real(0.5));
        assert_ne!(copy.allele(), original.allele());
    }

    proptest! {
        #[test]
        fn prop_hard_real_gene_stays_inside(
            seed in any::<u64>(),
            minimum in -100.0f64..100.0,
            width in 0.01f64..50.0,
            steps in 1usize..200,
        ) {
            let mut rng = GenomeRng::new(seed);
            let spec = GeneSpec::real("x", minimum, minimum + width);
            let mut gene = Gene::random(&spec, ConstraintMode::Hard, &mut rng);
            prop_assert!(gene.admits(gene.value()));
            for _ in 0..steps {
                gene.mutate(&mut rng);
                prop_assert!(gene.admits(gene.value()));
            }
        }

        #[test]
        fn prop_hard_integer_gene_stays_inside(
            seed in any::<u64>(),
            minimum in -50i64..50,
            width in 2i64..20,
            steps in 1usize..200,
        ) {
            let mut rng = GenomeRng::new(seed);
            let spec = GeneSpec::integer("n", minimum, minimum + width);
            let mut gene = Gene::random(&spec, ConstraintMode::Hard, &mut rng);
            prop_assert!(gene.admits(gene.value()));
            for _ in 0..steps {
                gene.mutate(&mut rng);
                prop_assert!(gene.admits(gene.value()));
            }
        }
    }
}
