//! Severity bands and their per-subsystem thresholds

use crate::Subsystem;

/// Tolerance for inclusive threshold comparisons on averaged sub-scores
///
/// Means of 0-5 sub-scores can land a hair below a boundary (e.g. 3.9999999)
/// when the inputs carry fractional parts. Applies to every inclusive band
/// (MOM, POP, EVE, MOSES): a score within 1e-9 of a threshold counts as
/// reaching it, so EVE 3.4999999995 is HIGH while 3.49 stays MEDIUM.
const THRESHOLD_EPSILON: f64 = 1e-9;

/// Discretization of a risk score
///
/// Ordered from least to most severe, so `Severity::High < Severity::Critical`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    /// No action needed
    Low,
    /// Needs review
    Medium,
    /// Alert
    High,
    /// Alert, top of the list
    Critical,
}

/// Overall risk level of an aggregation run (same bands as [`Severity`])
pub type RiskLevel = Severity;

impl Severity {
    /// Get the severity as an uppercase string
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Low => "LOW",
            Severity::Medium => "MEDIUM",
            Severity::High => "HIGH",
            Severity::Critical => "CRITICAL",
        }
    }

    /// Parse a severity from a string (case-insensitive)
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_uppercase().as_str() {
            "LOW" => Some(Severity::Low),
            "MEDIUM" => Some(Severity::Medium),
            "HIGH" => Some(Severity::High),
            "CRITICAL" => Some(Severity::Critical),
            _ => None,
        }
    }

    /// Whether this severity puts a signal on the alert list
    pub fn is_alert(&self) -> bool {
        matches!(self, Severity::High | Severity::Critical)
    }

    /// Classify a native-scale score using the subsystem's own thresholds
    ///
    /// | Subsystem | CRITICAL | HIGH | MEDIUM | LOW |
    /// |-----------|----------|------|--------|-----|
    /// | MOM, POP | >= 4.5 | >= 4.0 | >= 3.0 | below |
    /// | EVE | >= 4.0 | >= 3.5 | >= 2.0 | below |
    /// | MOSES | never | >= 4.0 | >= 3.0 | below |
    /// | CLAIM, FRAMEWORK | > 75 | > 60 | >= 30 | below |
    pub fn classify(subsystem: Subsystem, raw_score: f64) -> Self {
        match subsystem {
            Subsystem::Mom | Subsystem::Pop => {
                band_inclusive(raw_score, Some(4.5), 4.0, 3.0)
            }
            Subsystem::Eve => band_inclusive(raw_score, Some(4.0), 3.5, 2.0),
            Subsystem::Moses => band_inclusive(raw_score, None, 4.0, 3.0),
            Subsystem::Claim | Subsystem::Framework => {
                if raw_score > 75.0 {
                    Severity::Critical
                } else if raw_score > 60.0 {
                    Severity::High
                } else if raw_score >= 30.0 {
                    Severity::Medium
                } else {
                    Severity::Low
                }
            }
        }
    }

    /// Risk level for an overall 0-100 score
    ///
    /// `>= 75` CRITICAL, `>= 60` HIGH, `>= 40` MEDIUM, otherwise LOW.
    pub fn from_overall_score(score: u8) -> RiskLevel {
        match score {
            75.. => Severity::Critical,
            60..=74 => Severity::High,
            40..=59 => Severity::Medium,
            _ => Severity::Low,
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Severity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Invalid severity: {}", s))
    }
}

fn band_inclusive(value: f64, critical: Option<f64>, high: f64, medium: f64) -> Severity {
    let at_least = |threshold: f64| value + THRESHOLD_EPSILON >= threshold;

    match critical {
        Some(c) if at_least(c) => Severity::Critical,
        _ if at_least(high) => Severity::High,
        _ if at_least(medium) => Severity::Medium,
        _ => Severity::Low,
    }
}
