//! Trace export for external renderers.

use std::fs;
use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::schema::{EvolutionTrace, GenotypeSchema};

/// A finished run's trace, bundled with what a renderer needs to draw the
/// search surface: the declared genes with their bounds and the objective.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraceExport {
    /// Declared genes, in phenotype order.
    pub genotype: GenotypeSchema,
    /// Name of the objective function.
    pub objective: String,
    /// Per-generation best and worst snapshots.
    pub trace: EvolutionTrace,
}

impl TraceExport {
    pub fn new(genotype: GenotypeSchema, objective: impl Into<String>, trace: EvolutionTrace) -> Self {
        Self {
            genotype,
            objective: objective.into(),
            trace,
        }
    }

    /// `(minimum, maximum)` of every gene, in phenotype order.
    pub fn bounds(&self) -> Vec<(f64, f64)> {
        self.genotype.iter().map(|gene| gene.bounds).collect()
    }

    /// Write as pretty-printed JSON.
    pub fn save_json<P: AsRef<Path>>(&self, path: P) -> io::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)
    }

    /// Read an export written by [`save_json`](Self::save_json).
    pub fn load_json<P: AsRef<Path>>(path: P) -> io::Result<Self> {
        let content = fs::read_to_string(path)?;
        serde_json::from_str(&content).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{GeneSpec, PhenotypeSnapshot, TraceEntry};

    fn sample_trace() -> EvolutionTrace {
        let mut trace = EvolutionTrace::default();
        for generation in 0..3 {
            let score = 10.0 / (generation + 1) as f64;
            trace.push(TraceEntry {
                generation,
                best: PhenotypeSnapshot {
                    phenotype: vec![1.0, 3.0 - generation as f64],
                    score,
                    objective: score,
                },
                worst: PhenotypeSnapshot {
                    phenotype: vec![-9.5, 9.5],
                    score: 500.0,
                    objective: 500.0,
                },
            });
        }
        trace
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("trace.json");

        let export = TraceExport::new(GenotypeSchema::default(), "Booth", sample_trace());
        export.save_json(&path).unwrap();

        let loaded = TraceExport::load_json(&path).unwrap();
        assert_eq!(loaded, export);
        assert_eq!(loaded.trace.best_scores(), vec![10.0, 5.0, 10.0 / 3.0]);
    }

    #[test]
    fn test_export_layout() {
        let schema = GenotypeSchema::new(vec![
            GeneSpec::real("x", -5.0, 5.0),
            GeneSpec::integer("n", 0, 10),
        ]);
        let export = TraceExport::new(schema, "custom", EvolutionTrace::default());
        assert_eq!(export.bounds(), vec![(-5.0, 5.0), (0.0, 10.0)]);

        let value = serde_json::to_value(&export).unwrap();
        assert_eq!(value["objective"], "custom");
        assert_eq!(value["genotype"][1]["name"], "n");
        assert!(value["trace"].as_array().unwrap().is_empty());
    }

    #[test]
    fn test_load_rejects_garbage() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        fs::write(&path, "{ not json").unwrap();

        let err = TraceExport::load_json(&path).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);
        assert!(TraceExport::load_json(dir.path().join("missing.json")).is_err());
    }
}
