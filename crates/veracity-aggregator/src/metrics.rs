//! Metrics collection across aggregation runs

use std::collections::BTreeMap;
use veracity_domain::Subsystem;

/// Cumulative counters over every run an Aggregator has performed
#[derive(Debug, Clone, Default)]
pub struct AggregationMetrics {
    /// Usable signals produced per subsystem
    pub signals: BTreeMap<Subsystem, usize>,

    /// Malformed payloads skipped per subsystem
    pub skipped: BTreeMap<Subsystem, usize>,

    /// Completed runs
    pub run_count: usize,

    /// Total runtime in milliseconds
    pub total_runtime_ms: u64,

    /// Overall score of the most recent run
    pub last_overall_score: Option<u8>,
}

impl AggregationMetrics {
    /// Create new empty metrics
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one subsystem's read outcome
    pub fn record_reading(&mut self, subsystem: Subsystem, signals: usize, skipped: usize) {
        *self.signals.entry(subsystem).or_insert(0) += signals;
        if skipped > 0 {
            *self.skipped.entry(subsystem).or_insert(0) += skipped;
        }
    }

    /// Record a completed run
    pub fn record_run(&mut self, overall_score: u8, duration_ms: u64) {
        self.run_count += 1;
        self.total_runtime_ms += duration_ms;
        self.last_overall_score = Some(overall_score);
    }

    /// Total signals across all subsystems
    pub fn total_signals(&self) -> usize {
        self.signals.values().sum()
    }

    /// Total skipped entities across all subsystems
    pub fn total_skipped(&self) -> usize {
        self.skipped.values().sum()
    }

    /// Reset all metrics
    pub fn reset(&mut self) {
        self.signals.clear();
        self.skipped.clear();
        self.run_count = 0;
        self.total_runtime_ms = 0;
        self.last_overall_score = None;
    }

    /// Generate a summary report of metrics
    pub fn summary(&self) -> String {
        let mut lines = vec![
            "Aggregation Metrics Summary".to_string(),
            "===========================".to_string(),
            format!("Runs: {}", self.run_count),
            format!("Total runtime: {}ms", self.total_runtime_ms),
        ];

        if let Some(score) = self.last_overall_score {
            lines.push(format!("Last overall score: {}", score));
        }
        lines.push(String::new());

        if !self.signals.is_empty() {
            lines.push("Signals by subsystem:".to_string());
            for (subsystem, count) in &self.signals {
                lines.push(format!("  {}: {}", subsystem, count));
            }
            lines.push(format!("  Total: {}", self.total_signals()));
            lines.push(String::new());
        }

        if !self.skipped.is_empty() {
            lines.push("Skipped (malformed) by subsystem:".to_string());
            for (subsystem, count) in &self.skipped {
                lines.push(format!("  {}: {}", subsystem, count));
            }
            lines.push(format!("  Total: {}", self.total_skipped()));
        }

        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_creation() {
        let metrics = AggregationMetrics::new();
        assert_eq!(metrics.total_signals(), 0);
        assert_eq!(metrics.total_skipped(), 0);
        assert_eq!(metrics.run_count, 0);
        assert!(metrics.last_overall_score.is_none());
    }

    #[test]
    fn test_record_reading() {
        let mut metrics = AggregationMetrics::new();
        metrics.record_reading(Subsystem::Mom, 5, 0);
        metrics.record_reading(Subsystem::Eve, 3, 1);
        metrics.record_reading(Subsystem::Mom, 2, 2);

        assert_eq!(metrics.signals[&Subsystem::Mom], 7);
        assert_eq!(metrics.signals[&Subsystem::Eve], 3);
        assert_eq!(metrics.total_signals(), 10);
        assert_eq!(metrics.total_skipped(), 3);
        assert!(!metrics.skipped.contains_key(&Subsystem::Pop));
    }

    #[test]
    fn test_record_run() {
        let mut metrics = AggregationMetrics::new();
        metrics.record_run(47, 12);
        metrics.record_run(53, 8);

        assert_eq!(metrics.run_count, 2);
        assert_eq!(metrics.total_runtime_ms, 20);
        assert_eq!(metrics.last_overall_score, Some(53));
    }

    #[test]
    fn test_reset() {
        let mut metrics = AggregationMetrics::new();
        metrics.record_reading(Subsystem::Claim, 4, 1);
        metrics.record_run(10, 1);

        metrics.reset();

        assert_eq!(metrics.total_signals(), 0);
        assert_eq!(metrics.total_skipped(), 0);
        assert_eq!(metrics.run_count, 0);
        assert!(metrics.last_overall_score.is_none());
    }

    #[test]
    fn test_summary() {
        let mut metrics = AggregationMetrics::new();
        metrics.record_reading(Subsystem::Mom, 5, 0);
        metrics.record_reading(Subsystem::Framework, 1, 2);
        metrics.record_run(47, 120);

        let summary = metrics.summary();
        assert!(summary.contains("Runs: 1"));
        assert!(summary.contains("Total runtime: 120ms"));
        assert!(summary.contains("Last overall score: 47"));
        assert!(summary.contains("MOM: 5"));
        assert!(summary.contains("FRAMEWORK: 2"));
    }
}
