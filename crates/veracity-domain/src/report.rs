//! Aggregation report module - the single output of an aggregation run

use crate::{RiskLevel, RiskSignal, ScopeId, Subsystem, SubsystemStats, WeightProfile};
use std::collections::BTreeMap;
use std::fmt;

/// Unique identifier for one aggregation run, based on UUIDv7
///
/// UUIDv7 keeps run identifiers chronologically sortable so stored reports
/// can be ordered without a separate timestamp column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RunId(u128);

impl RunId {
    /// Generate a new UUIDv7-based RunId
    ///
    /// # Examples
    ///
    /// ```
    /// use veracity_domain::RunId;
    ///
    /// let id = RunId::new();
    /// assert!(id.value() > 0);
    /// ```
    pub fn new() -> Self {
        Self(uuid::Uuid::now_v7().as_u128())
    }

    /// Create a RunId from a raw u128 value
    pub fn from_value(value: u128) -> Self {
        Self(value)
    }

    /// Parse a RunId from a UUID string
    pub fn from_string(s: &str) -> Result<Self, String> {
        uuid::Uuid::parse_str(s)
            .map(|u| Self(u.as_u128()))
            .map_err(|e| format!("Invalid run id: {}", e))
    }

    /// Get the raw u128 value
    pub fn value(&self) -> u128 {
        self.0
    }
}

impl Default for RunId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RunId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", uuid::Uuid::from_u128(self.0))
    }
}

/// A prioritized follow-up derived from a subsystem's top alert
#[derive(Debug, Clone, PartialEq)]
pub struct RecommendedAction {
    /// 1-based priority; strictly increasing through the list
    pub priority: usize,
    /// Subsystem whose top alert prompted the action
    pub subsystem: Subsystem,
    /// Entity the action targets
    pub entity_id: String,
    /// Display label of the targeted entity
    pub entity_name: String,
    /// Human-readable action
    pub action: String,
    /// Normalized score of the alert behind the action
    pub score: f64,
    /// Navigable pointer to the entity, if known
    pub reference: Option<String>,
}

/// Provenance of an aggregation run
#[derive(Debug, Clone, PartialEq)]
pub struct RunMetadata {
    /// Run identifier
    pub run_id: RunId,
    /// Weight table the overall score was computed with
    pub weight_profile: WeightProfile,
    /// Entities that produced a usable signal
    pub entities_evaluated: usize,
    /// Entities skipped for malformed payloads
    pub entities_skipped: usize,
    /// Wall-clock duration of the run in milliseconds
    pub duration_ms: u64,
}

/// Top-level output of one aggregation run
///
/// Constructed once per invocation and handed to the caller unchanged.
#[derive(Debug, Clone, PartialEq)]
pub struct AggregationResult {
    /// Weighted overall score, 0-100
    pub overall_score: u8,
    /// Band of `overall_score`
    pub risk_level: RiskLevel,
    /// Ranked CRITICAL/HIGH signals, bounded
    pub alerts: Vec<RiskSignal>,
    /// Per-subsystem statistics (every subsystem present, possibly empty)
    pub breakdown: BTreeMap<Subsystem, SubsystemStats>,
    /// Priority-ordered follow-ups, at most one per subsystem
    pub recommended_actions: Vec<RecommendedAction>,
    /// Unix timestamp (seconds) the result was generated at
    pub generated_at: u64,
    /// Scope the run was computed within
    pub scope_id: ScopeId,
    /// Run provenance
    pub metadata: RunMetadata,
}

impl AggregationResult {
    /// Statistics for one subsystem
    pub fn stats(&self, subsystem: Subsystem) -> Option<&SubsystemStats> {
        self.breakdown.get(&subsystem)
    }

    /// Alerts raised by one subsystem, in ranked order
    pub fn alerts_for(&self, subsystem: Subsystem) -> impl Iterator<Item = &RiskSignal> {
        self.alerts.iter().filter(move |a| a.subsystem == subsystem)
    }

    /// Whether no entity in scope has a usable assessment
    pub fn is_empty(&self) -> bool {
        self.breakdown.values().all(|s| s.total == 0)
    }
}
