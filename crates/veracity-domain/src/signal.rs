//! Risk signal module - one evaluated entity in one subsystem

use crate::scoring::normalize;
use crate::{EntityType, Severity, Subsystem};
use std::fmt;

/// Tenant/workspace boundary an aggregation run is computed within
///
/// Passed explicitly to every storage read; there is no ambient scope.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ScopeId(String);

impl ScopeId {
    /// Create a scope identifier
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the identifier as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ScopeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ScopeId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for ScopeId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// One entity's deception risk as seen by one subsystem
///
/// Signals are ephemeral: built fresh on every aggregation run and never
/// persisted. `normalized_score` always lies in [0, 100] and `severity` is a
/// pure function of the subsystem and `raw_score`.
#[derive(Debug, Clone, PartialEq)]
pub struct RiskSignal {
    /// Scoring method that produced the signal
    pub subsystem: Subsystem,

    /// Kind of entity assessed
    pub entity_type: EntityType,

    /// Identity of the assessed entity
    pub entity_id: String,

    /// Display label of the assessed entity
    pub entity_name: String,

    /// Subsystem-native score
    pub raw_score: f64,

    /// Score on the shared 0-100 scale
    pub normalized_score: f64,

    /// Band decided on the native scale
    pub severity: Severity,

    /// Explanation assembled from the contributing sub-scores
    pub details: String,

    /// Opaque pointer back to the source entity
    pub reference: Option<String>,
}

impl RiskSignal {
    /// Create a signal, normalizing and classifying the native score
    pub fn new(
        subsystem: Subsystem,
        entity_id: impl Into<String>,
        entity_name: impl Into<String>,
        raw_score: f64,
        details: impl Into<String>,
    ) -> Self {
        Self {
            subsystem,
            entity_type: subsystem.entity_type(),
            entity_id: entity_id.into(),
            entity_name: entity_name.into(),
            raw_score,
            normalized_score: normalize(subsystem, raw_score),
            severity: Severity::classify(subsystem, raw_score),
            details: details.into(),
            reference: None,
        }
    }

    /// Attach a navigable reference to the source entity
    pub fn with_reference(mut self, reference: Option<String>) -> Self {
        self.reference = reference;
        self
    }

    /// Whether the subsystem's own alert rule flags this signal
    pub fn is_alert(&self) -> bool {
        self.severity.is_alert()
    }
}
