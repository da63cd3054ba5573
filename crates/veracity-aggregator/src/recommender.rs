//! Action recommendations derived from each subsystem's top alert

use veracity_domain::{RecommendedAction, RiskSignal, Subsystem};

/// Follow-up wording for an alert raised by `signal.subsystem`
fn action_text(signal: &RiskSignal) -> String {
    let name = &signal.entity_name;
    match signal.subsystem {
        Subsystem::Framework => format!("Review saved deception analysis '{}'", name),
        Subsystem::Mom => format!(
            "Investigate actor '{}': motive, opportunity and means all point to deception capability",
            name
        ),
        Subsystem::Eve => format!("Verify evidence '{}' against independent sources", name),
        Subsystem::Moses => format!("Re-validate source '{}' before relying on its reporting", name),
        Subsystem::Claim => format!("Fact-check claim '{}'", name),
        Subsystem::Pop => format!("Review pattern-of-life history for actor '{}'", name),
    }
}

/// Build the priority-ordered action list
///
/// `ranked_alerts` is the bounded list from [`crate::ranker::top_alerts`], sorted
/// highest first, so every action targets an entity present in the result's alerts.
/// Subsystems are visited in [`Subsystem::ACTION_PRIORITY`] order; each with at
/// least one alert yields exactly one action.
pub fn recommend_actions(ranked_alerts: &[RiskSignal]) -> Vec<RecommendedAction> {
    Subsystem::ACTION_PRIORITY
        .iter()
        .filter_map(|subsystem| ranked_alerts.iter().find(|a| a.subsystem == *subsystem))
        .enumerate()
        .map(|(index, alert)| RecommendedAction {
            priority: index + 1,
            subsystem: alert.subsystem,
            entity_id: alert.entity_id.clone(),
            entity_name: alert.entity_name.clone(),
            action: action_text(alert),
            score: alert.normalized_score,
            reference: alert.reference.clone(),
        })
        .collect()
}
