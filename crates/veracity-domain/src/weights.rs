//! Adaptive subsystem weights for the overall score

use crate::{Subsystem, SubsystemStats};
use std::collections::BTreeMap;

/// Which of the two fixed weight tables a run used
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WeightProfile {
    /// No FRAMEWORK signals in scope
    Nominal,
    /// At least one FRAMEWORK signal; weight shifted onto saved worksheets
    FrameworkAdjusted,
}

impl WeightProfile {
    /// Get the profile name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            WeightProfile::Nominal => "nominal",
            WeightProfile::FrameworkAdjusted => "framework_adjusted",
        }
    }
}

/// Per-subsystem weights; every table sums to 1.0
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeightTable {
    /// Table identity
    pub profile: WeightProfile,
    /// MOM weight
    pub mom: f64,
    /// POP weight
    pub pop: f64,
    /// EVE weight
    pub eve: f64,
    /// MOSES weight
    pub moses: f64,
    /// CLAIM weight
    pub claim: f64,
    /// FRAMEWORK weight
    pub framework: f64,
}

impl WeightTable {
    /// Weights used when no FRAMEWORK signal exists for the scope
    pub const NOMINAL: WeightTable = WeightTable {
        profile: WeightProfile::Nominal,
        mom: 0.25,
        pop: 0.20,
        eve: 0.25,
        moses: 0.15,
        claim: 0.15,
        framework: 0.0,
    };

    /// Weights used once at least one FRAMEWORK signal exists
    pub const FRAMEWORK_ADJUSTED: WeightTable = WeightTable {
        profile: WeightProfile::FrameworkAdjusted,
        mom: 0.20,
        pop: 0.18,
        eve: 0.22,
        moses: 0.13,
        claim: 0.12,
        framework: 0.15,
    };

    /// Weight for one subsystem
    pub fn weight(&self, subsystem: Subsystem) -> f64 {
        match subsystem {
            Subsystem::Mom => self.mom,
            Subsystem::Pop => self.pop,
            Subsystem::Eve => self.eve,
            Subsystem::Moses => self.moses,
            Subsystem::Claim => self.claim,
            Subsystem::Framework => self.framework,
        }
    }

    /// Sum of all weights
    pub fn total(&self) -> f64 {
        Subsystem::ALL.iter().map(|s| self.weight(*s)).sum()
    }

    /// Weighted overall score on 0-100, rounded half away from zero
    ///
    /// A subsystem missing from `breakdown`, or present with no signals,
    /// contributes exactly 0. The remaining weights are not rescaled.
    pub fn overall_score(&self, breakdown: &BTreeMap<Subsystem, SubsystemStats>) -> u8 {
        let weighted: f64 = Subsystem::ALL
            .iter()
            .map(|subsystem| {
                let average = breakdown
                    .get(subsystem)
                    .filter(|stats| stats.total > 0)
                    .map_or(0.0, |stats| stats.average_score);
                self.weight(*subsystem) * average
            })
            .sum();

        // Snap to 6 decimals first so 46.4999999999 from float weights rounds like 46.5
        let snapped = (weighted * 1e6).round() / 1e6;
        snapped.round().clamp(0.0, 100.0) as u8
    }
}

/// Pick the weight table for a run
///
/// Returns [`WeightTable::FRAMEWORK_ADJUSTED`] as soon as one FRAMEWORK signal
/// exists, otherwise [`WeightTable::NOMINAL`].
pub fn select_weights(framework_signal_count: usize) -> WeightTable {
    if framework_signal_count > 0 {
        WeightTable::FRAMEWORK_ADJUSTED
    } else {
        WeightTable::NOMINAL
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stats_with_average(average_score: f64) -> SubsystemStats {
        SubsystemStats {
            average_score,
            total: 1,
            ..Default::default()
        }
    }

    fn scenario_b() -> BTreeMap<Subsystem, SubsystemStats> {
        BTreeMap::from([
            (Subsystem::Mom, stats_with_average(80.0)),
            (Subsystem::Pop, stats_with_average(60.0)),
            (Subsystem::Eve, stats_with_average(40.0)),
            (Subsystem::Moses, stats_with_average(20.0)),
            (Subsystem::Claim, stats_with_average(10.0)),
        ])
    }

    #[test]
    fn test_tables_sum_to_one() {
        assert!((WeightTable::NOMINAL.total() - 1.0).abs() < 1e-9);
        assert!((WeightTable::FRAMEWORK_ADJUSTED.total() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_select_weights() {
        assert_eq!(select_weights(0), WeightTable::NOMINAL);
        assert_eq!(select_weights(1), WeightTable::FRAMEWORK_ADJUSTED);
        assert_eq!(select_weights(42).profile, WeightProfile::FrameworkAdjusted);
    }

    #[test]
    fn test_nominal_scenario() {
        // 20 + 12 + 10 + 3 + 1.5 = 46.5
        let score = WeightTable::NOMINAL.overall_score(&scenario_b());
        assert_eq!(score, 47);
    }

    #[test]
    fn test_framework_adjusted_scenario() {
        let mut breakdown = scenario_b();
        breakdown.insert(Subsystem::Framework, stats_with_average(90.0));
        // 16 + 10.8 + 8.8 + 2.6 + 1.2 + 13.5 = 52.9
        let score = select_weights(1).overall_score(&breakdown);
        assert_eq!(score, 53);
    }

    #[test]
    fn test_absent_subsystem_contributes_zero() {
        let mut breakdown = scenario_b();
        let with_empty = {
            let mut b = breakdown.clone();
            b.insert(Subsystem::Framework, SubsystemStats::default());
            WeightTable::NOMINAL.overall_score(&b)
        };
        breakdown.remove(&Subsystem::Framework);
        assert_eq!(with_empty, WeightTable::NOMINAL.overall_score(&breakdown));

        breakdown.remove(&Subsystem::Claim);
        // 46.5 - 1.5
        assert_eq!(WeightTable::NOMINAL.overall_score(&breakdown), 45);
    }

    #[test]
    fn test_empty_breakdown_is_zero() {
        assert_eq!(WeightTable::NOMINAL.overall_score(&BTreeMap::new()), 0);
    }
}
