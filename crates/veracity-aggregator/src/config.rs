//! Configuration for aggregation runs
//!
//! Defines the alert list bound, reader concurrency and which subsystems are read.

use serde::{Deserialize, Serialize};
use veracity_domain::Subsystem;

/// Default bound on the ranked alert list
pub const DEFAULT_ALERT_LIMIT: usize = 15;

/// Configuration for the Aggregator
///
/// # Examples
///
/// ```
/// use veracity_aggregator::AggregatorConfig;
///
/// let config = AggregatorConfig::default();
/// assert_eq!(config.alert_limit, 15);
/// assert!(config.concurrent_readers);
///
/// let config = AggregatorConfig::sequential();
/// assert!(!config.concurrent_readers);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AggregatorConfig {
    /// Maximum number of ranked alerts in a result
    /// Default: 15
    #[serde(default = "default_alert_limit")]
    pub alert_limit: usize,

    /// Run the six signal readers as concurrent blocking tasks
    /// Default: true
    #[serde(default = "default_concurrent_readers")]
    pub concurrent_readers: bool,

    /// Subsystems to read, by name (MOM, POP, EVE, MOSES, CLAIM, FRAMEWORK)
    /// A subsystem left out is not queried and contributes zero.
    /// Default: all six
    #[serde(default = "default_enabled_subsystems")]
    pub enabled_subsystems: Vec<String>,
}

fn default_alert_limit() -> usize {
    DEFAULT_ALERT_LIMIT
}

fn default_concurrent_readers() -> bool {
    true
}

fn default_enabled_subsystems() -> Vec<String> {
    Subsystem::ALL.iter().map(|s| s.as_str().to_string()).collect()
}

impl Default for AggregatorConfig {
    fn default() -> Self {
        Self {
            alert_limit: DEFAULT_ALERT_LIMIT,
            concurrent_readers: true,
            enabled_subsystems: default_enabled_subsystems(),
        }
    }
}

impl AggregatorConfig {
    /// Read subsystems one after another on the calling task
    ///
    /// Suitable for stores that cannot serve concurrent readers.
    pub fn sequential() -> Self {
        Self {
            concurrent_readers: false,
            ..Self::default()
        }
    }

    /// Enabled subsystems, deduplicated, in declaration order
    pub fn subsystems(&self) -> Result<Vec<Subsystem>, String> {
        let mut subsystems = self
            .enabled_subsystems
            .iter()
            .map(|name| name.parse::<Subsystem>())
            .collect::<Result<Vec<_>, _>>()?;
        subsystems.sort();
        subsystems.dedup();
        Ok(subsystems)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.alert_limit == 0 {
            return Err("alert_limit must be greater than 0".to_string());
        }
        if self.subsystems()?.is_empty() {
            return Err("enabled_subsystems must name at least one subsystem".to_string());
        }
        Ok(())
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, String> {
        toml::from_str(toml_str).map_err(|e| format!("Failed to parse TOML: {}", e))
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String, String> {
        toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize to TOML: {}", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = AggregatorConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.subsystems().unwrap(), Subsystem::ALL.to_vec());
    }

    #[test]
    fn test_sequential_config_is_valid() {
        let config = AggregatorConfig::sequential();
        assert!(config.validate().is_ok());
        assert_eq!(config.alert_limit, DEFAULT_ALERT_LIMIT);
    }

    #[test]
    fn test_zero_alert_limit_rejected() {
        let config = AggregatorConfig {
            alert_limit: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_unknown_subsystem_rejected() {
        let config = AggregatorConfig {
            enabled_subsystems: vec!["MOM".to_string(), "ACH".to_string()],
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_empty_subsystems_rejected() {
        let config = AggregatorConfig {
            enabled_subsystems: Vec::new(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_subsystems_sorted_and_deduplicated() {
        let config = AggregatorConfig {
            enabled_subsystems: vec!["claim".into(), "MOM".into(), "Claim".into()],
            ..Default::default()
        };
        assert_eq!(config.subsystems().unwrap(), vec![Subsystem::Mom, Subsystem::Claim]);
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config = AggregatorConfig::from_toml("alert_limit = 5").unwrap();
        assert_eq!(config.alert_limit, 5);
        assert!(config.concurrent_readers);
        assert_eq!(config.enabled_subsystems.len(), 6);
    }

    #[test]
    fn test_toml_round_trip() {
        let config = AggregatorConfig::sequential();
        let toml_str = config.to_toml().unwrap();
        let parsed = AggregatorConfig::from_toml(&toml_str).unwrap();

        assert_eq!(config.alert_limit, parsed.alert_limit);
        assert_eq!(config.concurrent_readers, parsed.concurrent_readers);
        assert_eq!(config.enabled_subsystems, parsed.enabled_subsystems);
    }
}
