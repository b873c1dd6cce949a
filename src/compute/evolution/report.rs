//! Reporting sink for human-facing progress.
//!
//! Separate from logging: reporters receive structured events and decide how
//! to render them. `()` discards everything.

use crate::schema::{ConfigWarning, EvolutionProgress, EvolutionResult};

/// Receives progress events from an evolutionary run.
pub trait ProgressReporter {
    /// Non-fatal configuration problem, raised before the first generation.
    fn on_warning(&mut self, _warning: &ConfigWarning) {}

    /// The run is starting.
    fn on_start(&mut self, _total_generations: usize) {}

    /// A generation was ranked. Only called every `print_interval`
    /// generations of a verbose run.
    fn on_generation(&mut self, _progress: &EvolutionProgress) {}

    /// Best and worst individuals of the final population, as text.
    fn on_summary(&mut self, _summary: &str) {}

    /// The run finished.
    fn on_complete(&mut self, _result: &EvolutionResult) {}
}

impl ProgressReporter for () {}

/// Prints progress to stdout.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleReporter;

impl ProgressReporter for ConsoleReporter {
    fn on_warning(&mut self, warning: &ConfigWarning) {
        println!("Warning: {warning}");
    }

    fn on_start(&mut self, _total_generations: usize) {
        println!("----- Begin Evolution -----");
    }

    fn on_generation(&mut self, progress: &EvolutionProgress) {
        println!(
            "[{}/{}] {} < pop < {}",
            progress.generation, progress.total_generations, progress.worst_score, progress.best_score
        );
    }

    fn on_summary(&mut self, summary: &str) {
        print!("{summary}");
    }

    fn on_complete(&mut self, result: &EvolutionResult) {
        println!("----- Evolution Over -----");
        print!("Best individual:\n{}", result.best);
        print!("Worst individual:\n{}", result.worst);
        println!(
            "{} generations, {} evaluations in {:.3}s",
            result.stats.generations, result.stats.evaluations, result.stats.elapsed_seconds
        );
    }
}

/// Records every event. Used by tests to observe the engine.
#[cfg(test)]
#[derive(Debug, Default)]
pub(crate) struct RecordingReporter {
    pub warnings: Vec<ConfigWarning>,
    pub started: usize,
    pub generations: Vec<EvolutionProgress>,
    pub summaries: Vec<String>,
    pub completed: usize,
}

#[cfg(test)]
impl ProgressReporter for RecordingReporter {
    fn on_warning(&mut self, warning: &ConfigWarning) {
        self.warnings.push(warning.clone());
    }

    fn on_start(&mut self, _total_generations: usize) {
        self.started += 1;
    }

    fn on_generation(&mut self, progress: &EvolutionProgress) {
        self.generations.push(progress.clone());
    }

    fn on_summary(&mut self, summary: &str) {
        self.summaries.push(summary.to_string());
    }

    fn on_complete(&mut self, _result: &EvolutionResult) {
        self.completed += 1;
    }
}
