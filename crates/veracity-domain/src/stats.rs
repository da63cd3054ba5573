//! Per-subsystem summary statistics

use crate::{RiskSignal, Severity};

/// Aggregate over one subsystem's signals for one run
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SubsystemStats {
    /// Signals classified CRITICAL
    pub critical: usize,
    /// Signals classified HIGH
    pub high: usize,
    /// Signals classified MEDIUM
    pub medium: usize,
    /// Signals classified LOW
    pub low: usize,
    /// Mean normalized score (0 when there are no signals)
    pub average_score: f64,
    /// Entities with a usable assessment
    pub total: usize,
    /// Entities whose payload was malformed and skipped
    pub skipped: usize,
}

impl SubsystemStats {
    /// Compute statistics over a subsystem's signals
    pub fn from_signals(signals: &[RiskSignal], skipped: usize) -> Self {
        let mut stats = Self {
            total: signals.len(),
            skipped,
            ..Default::default()
        };

        for signal in signals {
            match signal.severity {
                Severity::Critical => stats.critical += 1,
                Severity::High => stats.high += 1,
                Severity::Medium => stats.medium += 1,
                Severity::Low => stats.low += 1,
            }
        }

        if !signals.is_empty() {
            let sum: f64 = signals.iter().map(|s| s.normalized_score).sum();
            stats.average_score = sum / signals.len() as f64;
        }

        stats
    }

    /// Number of alert-eligible (CRITICAL or HIGH) signals
    pub fn alert_count(&self) -> usize {
        self.critical + self.high
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Subsystem;

    #[test]
    fn test_empty_stats() {
        let stats = SubsystemStats::from_signals(&[], 2);
        assert_eq!(stats.total, 0);
        assert_eq!(stats.skipped, 2);
        assert_eq!(stats.average_score, 0.0);
        assert_eq!(stats.alert_count(), 0);
    }

    #[test]
    fn test_bucket_counts_and_average() {
        let signals = vec![
            RiskSignal::new(Subsystem::Claim, "c1", "a", 82.0, ""),
            RiskSignal::new(Subsystem::Claim, "c2", "b", 70.0, ""),
            RiskSignal::new(Subsystem::Claim, "c3", "c", 45.0, ""),
            RiskSignal::new(Subsystem::Claim, "c4", "d", 3.0, ""),
        ];
        let stats = SubsystemStats::from_signals(&signals, 0);
        assert_eq!(stats.critical, 1);
        assert_eq!(stats.high, 1);
        assert_eq!(stats.medium, 1);
        assert_eq!(stats.low, 1);
        assert_eq!(stats.total, 4);
        assert_eq!(stats.alert_count(), 2);
        assert!((stats.average_score - 50.0).abs() < 1e-9);
    }
}
