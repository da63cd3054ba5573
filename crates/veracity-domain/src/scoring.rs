//! Native scoring and normalization
//!
//! Implements each subsystem's native raw-score formula and the mapping of
//! every native scale onto the shared 0-100 risk scale. These functions are
//! pure: payload parsing and range validation happen upstream.

use crate::Subsystem;

/// Multiplier taking a 0-5 native score onto the 0-100 scale
pub const FIVE_POINT_SCALE_FACTOR: f64 = 20.0;

/// FRAMEWORK blend weight for the MOM component
pub const FRAMEWORK_MOM_WEIGHT: f64 = 0.30;

/// FRAMEWORK blend weight for the POP component
pub const FRAMEWORK_POP_WEIGHT: f64 = 0.25;

/// FRAMEWORK blend weight for the MOSES component
pub const FRAMEWORK_MOSES_WEIGHT: f64 = 0.25;

/// FRAMEWORK blend weight for the EVE component
pub const FRAMEWORK_EVE_WEIGHT: f64 = 0.20;

/// Categorical pattern-of-life risk level
///
/// Mapped onto a numeric surrogate by [`pop_score`]. The surrogate is an
/// approximation of a qualitative judgment, not a measurement; existing alert
/// thresholds are calibrated against these exact values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PopLevel {
    /// Behavioral history strongly suggests deception
    High,
    /// Mixed behavioral history
    Medium,
    /// Behavioral history gives little cause for concern
    Low,
}

impl PopLevel {
    /// Get the level as a lowercase string
    pub fn as_str(&self) -> &'static str {
        match self {
            PopLevel::High => "high",
            PopLevel::Medium => "medium",
            PopLevel::Low => "low",
        }
    }

    /// Parse a level from a string (case-insensitive)
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "high" => Some(PopLevel::High),
            "medium" => Some(PopLevel::Medium),
            "low" => Some(PopLevel::Low),
            _ => None,
        }
    }
}

impl std::str::FromStr for PopLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Invalid pattern-of-life level: {}", s))
    }
}

/// MOM raw score: mean of motive, opportunity and means (each 0-5)
pub fn mom_score(motive: f64, opportunity: f64, means: f64) -> f64 {
    (motive + opportunity + means) / 3.0
}

/// POP raw score: high -> 4.0, medium -> 3.0, low -> 2.0
pub fn pop_score(level: PopLevel) -> f64 {
    match level {
        PopLevel::High => 4.0,
        PopLevel::Medium => 3.0,
        PopLevel::Low => 2.0,
    }
}

/// EVE raw score: mean of the three risk-oriented evidence sub-scores
///
/// Consistency and corroboration are "higher is better" and contribute
/// `5 - value`; anomaly detection is already risk-oriented.
pub fn eve_score(
    internal_consistency: f64,
    external_corroboration: f64,
    anomaly_detection: f64,
) -> f64 {
    let consistency_risk = 5.0 - internal_consistency;
    let corroboration_risk = 5.0 - external_corroboration;
    (consistency_risk + corroboration_risk + anomaly_detection) / 3.0
}

/// MOSES raw score: mean of vulnerability and manipulation evidence (each 0-5)
pub fn moses_score(vulnerability: f64, manipulation_evidence: f64) -> f64 {
    (vulnerability + manipulation_evidence) / 2.0
}

/// Native component scores recombined from a saved worksheet
///
/// Each component is on the 0-5 native scale of its subsystem. A component
/// the worksheet never filled in is `None` and contributes nothing.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FrameworkComponents {
    /// MOM raw score
    pub mom: Option<f64>,
    /// POP raw score
    pub pop: Option<f64>,
    /// MOSES raw score
    pub moses: Option<f64>,
    /// EVE raw score
    pub eve: Option<f64>,
}

impl FrameworkComponents {
    /// Whether no component is present at all
    pub fn is_empty(&self) -> bool {
        self.mom.is_none() && self.pop.is_none() && self.moses.is_none() && self.eve.is_none()
    }
}

/// FRAMEWORK raw score on 0-100
///
/// Each component is turned into a 0-100 likelihood and blended 30/25/25/20
/// (MOM/POP/MOSES/EVE).
pub fn framework_score(components: &FrameworkComponents) -> f64 {
    let likelihood = |native: Option<f64>| native.map_or(0.0, |v| v * FIVE_POINT_SCALE_FACTOR);

    FRAMEWORK_MOM_WEIGHT * likelihood(components.mom)
        + FRAMEWORK_POP_WEIGHT * likelihood(components.pop)
        + FRAMEWORK_MOSES_WEIGHT * likelihood(components.moses)
        + FRAMEWORK_EVE_WEIGHT * likelihood(components.eve)
}

/// Map a native raw score onto the shared 0-100 scale
///
/// 0-5 subsystems are multiplied by 20; CLAIM and FRAMEWORK already live on
/// 0-100 and pass through. The result is clamped to [0, 100]; a non-finite
/// input maps to 0.
pub fn normalize(subsystem: Subsystem, raw_score: f64) -> f64 {
    if !raw_score.is_finite() {
        return 0.0;
    }

    let scaled = match subsystem {
        Subsystem::Claim | Subsystem::Framework => raw_score,
        _ => raw_score * FIVE_POINT_SCALE_FACTOR,
    };

    scaled.clamp(0.0, 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mom_scenario() {
        let raw = mom_score(5.0, 5.0, 4.0);
        assert!((raw - 4.667).abs() < 0.01);
        assert!((normalize(Subsystem::Mom, raw) - 93.33).abs() < 0.01);
    }

    #[test]
    fn test_pop_surrogates() {
        assert_eq!(pop_score(PopLevel::High), 4.0);
        assert_eq!(pop_score(PopLevel::Medium), 3.0);
        assert_eq!(pop_score(PopLevel::Low), 2.0);
        assert_eq!(PopLevel::parse("HIGH"), Some(PopLevel::High));
        assert_eq!(PopLevel::parse("severe"), None);
    }

    #[test]
    fn test_eve_inverts_quality_scores() {
        let raw = eve_score(1.0, 1.0, 5.0);
        // mean(4, 4, 5)
        assert!((raw - 4.333).abs() < 0.01);
        assert!((normalize(Subsystem::Eve, raw) - 86.67).abs() < 0.01);

        // Fully consistent, corroborated, no anomalies
        assert_eq!(eve_score(5.0, 5.0, 0.0), 0.0);
    }

    #[test]
    fn test_moses_mean() {
        assert_eq!(moses_score(4.0, 5.0), 4.5);
        assert_eq!(moses_score(0.0, 0.0), 0.0);
    }

    #[test]
    fn test_framework_blend() {
        let components = FrameworkComponents {
            mom: Some(5.0),
            pop: Some(4.0),
            moses: Some(4.5),
            eve: Some(4.0),
        };
        // 0.30*100 + 0.25*80 + 0.25*90 + 0.20*80 = 30 + 20 + 22.5 + 16
        assert!((framework_score(&components) - 88.5).abs() < 1e-9);
    }

    #[test]
    fn test_framework_missing_components_contribute_zero() {
        let components = FrameworkComponents {
            mom: Some(5.0),
            ..Default::default()
        };
        assert!((framework_score(&components) - 30.0).abs() < 1e-9);
        assert!(FrameworkComponents::default().is_empty());
        assert!(!components.is_empty());
    }

    #[test]
    fn test_blend_weights_sum_to_one() {
        let sum = FRAMEWORK_MOM_WEIGHT
            + FRAMEWORK_POP_WEIGHT
            + FRAMEWORK_MOSES_WEIGHT
            + FRAMEWORK_EVE_WEIGHT;
        assert!((sum - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_normalize_passes_through_percent_scales() {
        assert_eq!(normalize(Subsystem::Claim, 82.0), 82.0);
        assert_eq!(normalize(Subsystem::Framework, 53.5), 53.5);
    }

    #[test]
    fn test_normalize_clamps() {
        assert_eq!(normalize(Subsystem::Mom, 6.0), 100.0);
        assert_eq!(normalize(Subsystem::Claim, -3.0), 0.0);
        assert_eq!(normalize(Subsystem::Eve, f64::NAN), 0.0);
        assert_eq!(normalize(Subsystem::Claim, f64::INFINITY), 0.0);
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Property: normalized scores always land in [0, 100]
        #[test]
        fn test_normalized_range(raw in -1000.0f64..1000.0f64, idx in 0usize..6) {
            let subsystem = Subsystem::ALL[idx];
            let normalized = normalize(subsystem, raw);
            prop_assert!((0.0..=100.0).contains(&normalized));
        }

        /// Property: in-range MOM sub-scores stay on the native 0-5 scale
        #[test]
        fn test_mom_native_range(m in 0.0f64..=5.0, o in 0.0f64..=5.0, n in 0.0f64..=5.0) {
            let raw = mom_score(m, o, n);
            prop_assert!((0.0..=5.0).contains(&raw));
        }

        /// Property: in-range EVE sub-scores stay on the native 0-5 scale
        #[test]
        fn test_eve_native_range(ic in 0.0f64..=5.0, ec in 0.0f64..=5.0, ad in 0.0f64..=5.0) {
            let raw = eve_score(ic, ec, ad);
            prop_assert!((-1e-9..=5.0 + 1e-9).contains(&raw));
        }

        /// Property: worsening anomaly detection never lowers EVE risk
        #[test]
        fn test_eve_monotonic_in_anomalies(ic in 0.0f64..=5.0, ec in 0.0f64..=5.0, a in 0.0f64..=4.0, delta in 0.0f64..=1.0) {
            prop_assert!(eve_score(ic, ec, a + delta) >= eve_score(ic, ec, a));
        }

        /// Property: FRAMEWORK blend of in-range components stays in [0, 100]
        #[test]
        fn test_framework_range(
            mom in proptest::option::of(0.0f64..=5.0),
            pop in proptest::option::of(0.0f64..=5.0),
            moses in proptest::option::of(0.0f64..=5.0),
            eve in proptest::option::of(0.0f64..=5.0),
        ) {
            let score = framework_score(&FrameworkComponents { mom, pop, moses, eve });
            prop_assert!((0.0..=100.0 + 1e-9).contains(&score));
        }
    }
}
