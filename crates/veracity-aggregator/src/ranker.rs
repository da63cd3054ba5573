//! Alert ranking across subsystems

use crate::reader::SubsystemReading;
use veracity_domain::RiskSignal;

/// Collect every alert-eligible signal, highest normalized score first
///
/// `readings` are expected in subsystem declaration order. The sort is stable,
/// so equal scores keep subsystem order and then storage order. The list is
/// not truncated.
pub fn rank_alerts(readings: &[SubsystemReading]) -> Vec<RiskSignal> {
    let mut alerts: Vec<RiskSignal> = readings
        .iter()
        .flat_map(|r| r.signals.iter())
        .filter(|s| s.is_alert())
        .cloned()
        .collect();

    alerts.sort_by(|a, b| b.normalized_score.total_cmp(&a.normalized_score));
    alerts
}

/// Ranked alerts bounded to `limit`
pub fn top_alerts(readings: &[SubsystemReading], limit: usize) -> Vec<RiskSignal> {
    let mut alerts = rank_alerts(readings);
    alerts.truncate(limit);
    alerts
}

#[cfg(test)]
mod tests {
    use super::*;
    use veracity_domain::Subsystem;

    fn reading(subsystem: Subsystem, raws: &[(&str, f64)]) -> SubsystemReading {
        SubsystemReading {
            subsystem,
            signals: raws
                .iter()
                .map(|(id, raw)| RiskSignal::new(subsystem, *id, *id, *raw, ""))
                .collect(),
            skipped: 0,
        }
    }

    #[test]
    fn test_only_alerts_are_ranked() {
        let readings = vec![
            reading(Subsystem::Mom, &[("low", 1.0), ("high", 4.0)]),
            reading(Subsystem::Claim, &[("medium", 50.0), ("critical", 90.0)]),
        ];

        let ids: Vec<String> = rank_alerts(&readings).into_iter().map(|a| a.entity_id).collect();
        assert_eq!(ids, vec!["critical", "high"]);
    }

    #[test]
    fn test_ties_follow_subsystem_then_storage_order() {
        // MOM 4.0 -> 80, EVE 4.0 -> 80, CLAIM 80
        let readings = vec![
            reading(Subsystem::Mom, &[("mom-a", 4.0), ("mom-b", 4.0)]),
            reading(Subsystem::Eve, &[("eve-a", 4.0)]),
            reading(Subsystem::Claim, &[("claim-a", 80.0)]),
        ];

        let ids: Vec<String> = rank_alerts(&readings).into_iter().map(|a| a.entity_id).collect();
        assert_eq!(ids, vec!["mom-a", "mom-b", "eve-a", "claim-a"]);
    }

    #[test]
    fn test_top_alerts_truncates() {
        let raws: Vec<(String, f64)> = (0..20).map(|i| (format!("c-{}", i), 61.0 + i as f64)).collect();
        let borrowed: Vec<(&str, f64)> = raws.iter().map(|(id, r)| (id.as_str(), *r)).collect();
        let readings = vec![reading(Subsystem::Claim, &borrowed)];

        let alerts = top_alerts(&readings, 15);
        assert_eq!(alerts.len(), 15);
        assert_eq!(alerts[0].entity_id, "c-19");
        assert!(alerts
            .windows(2)
            .all(|w| w[0].normalized_score >= w[1].normalized_score));
    }

    #[test]
    fn test_no_signals_no_alerts() {
        assert!(rank_alerts(&[]).is_empty());
        assert!(top_alerts(&[SubsystemReading::empty(Subsystem::Pop)], 15).is_empty());
    }
}
