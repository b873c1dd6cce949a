//! Progress, trace and result types produced by an evolutionary run.
//!
//! The trace is the only state handed to external renderers.

use serde::{Deserialize, Serialize};

use super::Allele;

/// Best or worst individual of one generation, as recorded in the trace.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhenotypeSnapshot {
    /// Gene values in genotype order.
    pub phenotype: Vec<f64>,
    /// Fitness-transformed score (lower is better).
    pub score: f64,
    /// Raw objective value before the fitness transform.
    pub objective: f64,
}

/// One trace entry per generation, recorded right after ranking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraceEntry {
    pub generation: usize,
    pub best: PhenotypeSnapshot,
    pub worst: PhenotypeSnapshot,
}

/// Ordered per-generation record of an evolutionary run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct EvolutionTrace(Vec<TraceEntry>);

impl EvolutionTrace {
    pub fn push(&mut self, entry: TraceEntry) {
        self.0.push(entry);
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn entries(&self) -> &[TraceEntry] {
        &self.0
    }

    pub fn first(&self) -> Option<&TraceEntry> {
        self.0.first()
    }

    pub fn last(&self) -> Option<&TraceEntry> {
        self.0.last()
    }

    /// Best score of each generation, in order.
    pub fn best_scores(&self) -> Vec<f64> {
        self.0.iter().map(|e| e.best.score).collect()
    }

    /// Worst score of each generation, in order.
    pub fn worst_scores(&self) -> Vec<f64> {
        self.0.iter().map(|e| e.worst.score).collect()
    }
}

impl<'a> IntoIterator for &'a EvolutionTrace {
    type Item = &'a TraceEntry;
    type IntoIter = std::slice::Iter<'a, TraceEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Per-generation progress update for the reporting sink.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvolutionProgress {
    /// Zero-based generation number.
    pub generation: usize,
    /// Total generations planned.
    pub total_generations: usize,
    /// Best score in the ranked population.
    pub best_score: f64,
    /// Worst score in the ranked population.
    pub worst_score: f64,
}

/// Named gene values and score of one individual.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndividualSnapshot {
    /// `(name, value)` pairs in genotype order.
    pub genotype: Vec<(String, Allele)>,
    /// Fitness-transformed score.
    pub score: f64,
}

impl IndividualSnapshot {
    /// Gene values in genotype order.
    pub fn phenotype(&self) -> Vec<f64> {
        self.genotype.iter().map(|(_, v)| v.as_f64()).collect()
    }

    /// Value of the named gene.
    pub fn value(&self, name: &str) -> Option<Allele> {
        self.genotype
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| *v)
    }
}

impl std::fmt::Display for IndividualSnapshot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "     fitness : {}", self.score)?;
        for (name, value) in &self.genotype {
            writeln!(f, "     {name} : {value}")?;
        }
        Ok(())
    }
}

/// Statistics from an evolutionary run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvolutionStats {
    /// Generations run.
    pub generations: usize,
    /// Objective function calls.
    pub evaluations: u64,
    /// Best score of the final population.
    pub best_score: f64,
    /// Wall-clock time in seconds.
    pub elapsed_seconds: f64,
}

/// Final result of an evolutionary run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvolutionResult {
    /// Best individual of the final population.
    pub best: IndividualSnapshot,
    /// Worst individual of the final population.
    pub worst: IndividualSnapshot,
    /// Per-generation trace.
    pub trace: EvolutionTrace,
    /// Run statistics.
    pub stats: EvolutionStats,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(score: f64) -> PhenotypeSnapshot {
        PhenotypeSnapshot {
            phenotype: vec![1.0, 2.0],
            score,
            objective: score,
        }
    }

    #[test]
    fn test_trace_scores() {
        let mut trace = EvolutionTrace::default();
        for (generation, (best, worst)) in [(3.0, 9.0), (2.0, 7.5)].into_iter().enumerate() {
            trace.push(TraceEntry {
                generation,
                best: snapshot(best),
                worst: snapshot(worst),
            });
        }
        assert_eq!(trace.len(), 2);
        assert_eq!(trace.best_scores(), vec![3.0, 2.0]);
        assert_eq!(trace.worst_scores(), vec![9.0, 7.5]);
        assert_eq!(trace.last().map(|e| e.generation), Some(1));
    }

    #[test]
    fn test_snapshot_display_and_lookup() {
        let snapshot = IndividualSnapshot {
            genotype: vec![
                ("x".to_string(), Allele::Real(1.5)),
                ("n".to_string(), Allele::Integer(4)),
            ],
            score: 0.25,
        };
        let text = snapshot.to_string();
        assert!(text.contains("fitness : 0.25"));
        assert!(text.contains("x : 1.5"));
        assert!(text.contains("n : 4"));
        assert_eq!(snapshot.phenotype(), vec![1.5, 4.0]);
        assert_eq!(snapshot.value("n"), Some(Allele::Integer(4)));
        assert_eq!(snapshot.value("missing"), None);
    }

    #[test]
    fn test_trace_serialization() {
        let mut trace = EvolutionTrace::default();
        trace.push(TraceEntry {
            generation: 0,
            best: snapshot(1.0),
            worst: snapshot(4.0),
        });
        let json = serde_json::to_string(&trace).unwrap();
        let parsed: EvolutionTrace = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, trace);
    }
}
