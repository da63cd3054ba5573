//! Report assembly - the last, purely structural step of a run

use crate::reader::SubsystemReading;
use std::collections::BTreeMap;
use std::time::{SystemTime, UNIX_EPOCH};
use veracity_domain::{
    AggregationResult, RecommendedAction, RiskLevel, RiskSignal, RunId, RunMetadata, ScopeId,
    Subsystem, SubsystemStats, WeightProfile,
};

fn current_timestamp() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

/// Per-subsystem statistics with every subsystem present
///
/// Subsystems without a reading get empty statistics.
pub fn breakdown(readings: &[SubsystemReading]) -> BTreeMap<Subsystem, SubsystemStats> {
    let mut breakdown: BTreeMap<Subsystem, SubsystemStats> = Subsystem::ALL
        .iter()
        .map(|s| (*s, SubsystemStats::default()))
        .collect();

    for reading in readings {
        breakdown.insert(
            reading.subsystem,
            SubsystemStats::from_signals(&reading.signals, reading.skipped),
        );
    }

    breakdown
}

/// Computed pieces of one run, ready to be stamped into a result
#[derive(Debug)]
pub struct ReportParts {
    /// Scope the run was computed within
    pub scope_id: ScopeId,
    /// Run identifier
    pub run_id: RunId,
    /// Weighted overall score
    pub overall_score: u8,
    /// Weight table the overall score was computed with
    pub weight_profile: WeightProfile,
    /// Per-subsystem statistics
    pub breakdown: BTreeMap<Subsystem, SubsystemStats>,
    /// Ranked alerts, already bounded
    pub alerts: Vec<RiskSignal>,
    /// Priority-ordered actions
    pub recommended_actions: Vec<RecommendedAction>,
    /// Wall-clock duration of the run
    pub duration_ms: u64,
}

/// Stamp the run's outputs into an [`AggregationResult`]
pub fn build_report(parts: ReportParts) -> AggregationResult {
    let entities_evaluated = parts.breakdown.values().map(|s| s.total).sum();
    let entities_skipped = parts.breakdown.values().map(|s| s.skipped).sum();

    AggregationResult {
        overall_score: parts.overall_score,
        risk_level: RiskLevel::from_overall_score(parts.overall_score),
        alerts: parts.alerts,
        breakdown: parts.breakdown,
        recommended_actions: parts.recommended_actions,
        generated_at: current_timestamp(),
        scope_id: parts.scope_id,
        metadata: RunMetadata {
            run_id: parts.run_id,
            weight_profile: parts.weight_profile,
            entities_evaluated,
            entities_skipped,
            duration_ms: parts.duration_ms,
        },
    }
}
