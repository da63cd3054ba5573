//! Output formatting for the CLI.

use crate::config::OutputFormat;
use crate::error::Result;
use colored::*;
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};
use veracity_domain::{AggregationResult, RecommendedAction, RiskSignal, Severity, SubsystemStats};

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// Selected output format.
    pub fn format(&self) -> OutputFormat {
        self.format
    }

    /// Format an aggregation result.
    pub fn format_result(&self, result: &AggregationResult) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(&result_json(result))?),
            OutputFormat::Table => Ok(self.format_result_table(result)),
            OutputFormat::Quiet => Ok(format!("{} {}", result.overall_score, result.risk_level)),
        }
    }

    fn format_result_table(&self, result: &AggregationResult) -> String {
        let mut sections = vec![format!(
            "Scope {}: overall score {} ({})",
            result.scope_id,
            result.overall_score,
            self.severity_label(result.risk_level)
        )];

        let mut breakdown = Builder::default();
        breakdown.push_record(["Subsystem", "Critical", "High", "Medium", "Low", "Average", "Total", "Skipped"]);
        for (subsystem, stats) in &result.breakdown {
            breakdown.push_record(stats_row(subsystem.as_str(), stats));
        }
        sections.push(styled(breakdown));

        if result.alerts.is_empty() {
            sections.push(self.colorize("No alerts.", "green"));
        } else {
            let mut alerts = Builder::default();
            alerts.push_record(["#", "Subsystem", "Entity", "Score", "Severity", "Details"]);
            for (index, alert) in result.alerts.iter().enumerate() {
                alerts.push_record(alert_row(index + 1, alert, &self.severity_label(alert.severity)));
            }
            sections.push(styled(alerts));
        }

        if !result.recommended_actions.is_empty() {
            let mut actions = Builder::default();
            actions.push_record(["Priority", "Subsystem", "Action", "Score"]);
            for action in &result.recommended_actions {
                actions.push_record(action_row(action));
            }
            sections.push(styled(actions));
        }

        sections.push(self.info(&format!(
            "Run {} ({} weights): {} evaluated, {} skipped in {}ms",
            result.metadata.run_id,
            result.metadata.weight_profile.as_str(),
            result.metadata.entities_evaluated,
            result.metadata.entities_skipped,
            result.metadata.duration_ms
        )));

        sections.join("\n\n")
    }

    fn severity_label(&self, severity: Severity) -> String {
        let color = match severity {
            Severity::Critical => "red",
            Severity::High => "magenta",
            Severity::Medium => "yellow",
            Severity::Low => "green",
        };
        self.colorize(severity.as_str(), color)
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format an info message.
    pub fn info(&self, message: &str) -> String {
        self.colorize(&format!("ℹ {}", message), "blue")
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), "yellow")
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "red" => text.red().to_string(),
            "green" => text.green().to_string(),
            "blue" => text.blue().to_string(),
            "yellow" => text.yellow().to_string(),
            "magenta" => text.magenta().to_string(),
            _ => text.to_string(),
        }
    }
}

fn styled(builder: Builder) -> String {
    let mut table = builder.build();
    table
        .with(Style::rounded())
        .with(Modify::new(Rows::first()).with(Alignment::center()));
    table.to_string()
}

fn stats_row(name: &str, stats: &SubsystemStats) -> Vec<String> {
    vec![
        name.to_string(),
        stats.critical.to_string(),
        stats.high.to_string(),
        stats.medium.to_string(),
        stats.low.to_string(),
        format!("{:.1}", stats.average_score),
        stats.total.to_string(),
        stats.skipped.to_string(),
    ]
}

fn alert_row(rank: usize, alert: &RiskSignal, severity: &str) -> Vec<String> {
    vec![
        rank.to_string(),
        alert.subsystem.to_string(),
        alert.entity_name.clone(),
        format!("{:.1}", alert.normalized_score),
        severity.to_string(),
        alert.details.clone(),
    ]
}

fn action_row(action: &RecommendedAction) -> Vec<String> {
    vec![
        action.priority.to_string(),
        action.subsystem.to_string(),
        action.action.clone(),
        format!("{:.1}", action.score),
    ]
}

fn signal_json(signal: &RiskSignal) -> serde_json::Value {
    serde_json::json!({
        "subsystem": signal.subsystem.as_str(),
        "entity_type": signal.entity_type.as_str(),
        "entity_id": signal.entity_id,
        "entity_name": signal.entity_name,
        "raw_score": signal.raw_score,
        "normalized_score": signal.normalized_score,
        "severity": signal.severity.as_str(),
        "details": signal.details,
        "reference": signal.reference,
    })
}

fn stats_json(stats: &SubsystemStats) -> serde_json::Value {
    serde_json::json!({
        "critical": stats.critical,
        "high": stats.high,
        "medium": stats.medium,
        "low": stats.low,
        "average_score": stats.average_score,
        "total": stats.total,
        "skipped": stats.skipped,
    })
}

fn action_json(action: &RecommendedAction) -> serde_json::Value {
    serde_json::json!({
        "priority": action.priority,
        "subsystem": action.subsystem.as_str(),
        "entity_id": action.entity_id,
        "entity_name": action.entity_name,
        "action": action.action,
        "score": action.score,
        "reference": action.reference,
    })
}

/// Transport representation of a result, using the documented field names.
pub fn result_json(result: &AggregationResult) -> serde_json::Value {
    let breakdown: serde_json::Map<String, serde_json::Value> = result
        .breakdown
        .iter()
        .map(|(subsystem, stats)| (subsystem.as_str().to_string(), stats_json(stats)))
        .collect();

    serde_json::json!({
        "overall_score": result.overall_score,
        "risk_level": result.risk_level.as_str(),
        "alerts": result.alerts.iter().map(signal_json).collect::<Vec<_>>(),
        "breakdown": breakdown,
        "recommended_actions": result.recommended_actions.iter().map(action_json).collect::<Vec<_>>(),
        "generated_at": result.generated_at,
        "scope_id": result.scope_id.as_str(),
        "metadata": {
            "run_id": result.metadata.run_id.to_string(),
            "weight_profile": result.metadata.weight_profile.as_str(),
            "entities_evaluated": result.metadata.entities_evaluated,
            "entities_skipped": result.metadata.entities_skipped,
            "duration_ms": result.metadata.duration_ms,
        },
    })
}
