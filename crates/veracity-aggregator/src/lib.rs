//! Veracity Aggregator
//!
//! Turns independently produced deception-risk assessments into one overall
//! risk score, a ranked alert list and prioritized follow-up actions.
//!
//! # Overview
//!
//! One run flows strictly in one direction:
//! - **Signal readers**: one storage query per subsystem; malformed payloads are skipped and logged
//! - **Normalizer**: native scores mapped onto the shared 0-100 scale
//! - **Weighted aggregator**: per-subsystem averages blended with adaptive weights
//! - **Alert ranker**: CRITICAL/HIGH signals sorted by normalized score and bounded
//! - **Action recommender**: one action per subsystem from its top alert
//! - **Report builder**: stamps everything into an `AggregationResult`
//!
//! ## Subsystems
//!
//! | Subsystem | Entity | Native scale | Alert when |
//! |-----------|--------|--------------|------------|
//! | **MOM** | actor | 0-5 | >= 4.0 |
//! | **POP** | actor | 0-5 (level surrogate) | >= 4.0 |
//! | **EVE** | evidence | 0-5 | >= 3.5 |
//! | **MOSES** | source | 0-5 | >= 4.0 (never CRITICAL) |
//! | **CLAIM** | claim | 0-100 | > 60 |
//! | **FRAMEWORK** | saved worksheet | 0-100 | > 60 |
//!
//! # Usage
//!
//! ```no_run
//! use std::sync::Arc;
//! use veracity_aggregator::{Aggregator, AggregatorConfig};
//! use veracity_domain::ScopeId;
//! use veracity_store::SqliteStore;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let store = Arc::new(SqliteStore::new("veracity.db")?);
//!     let mut aggregator = Aggregator::new(store, AggregatorConfig::default())?;
//!
//!     let result = aggregator.aggregate(&ScopeId::from("workspace-1")).await?;
//!     for alert in &result.alerts {
//!         println!("{} {} {:.1}", alert.subsystem, alert.entity_name, alert.normalized_score);
//!     }
//!     println!("\n{}", aggregator.metrics().summary());
//!     Ok(())
//! }
//! ```
//!
//! # Configuration
//!
//! The Aggregator can be configured via TOML:
//!
//! ```toml
//! [aggregator]
//! alert_limit = 15
//! concurrent_readers = true
//! enabled_subsystems = ["MOM", "POP", "EVE", "MOSES", "CLAIM", "FRAMEWORK"]
//! ```

#![warn(missing_docs)]

mod aggregator;
mod config;
mod error;
mod metrics;
pub mod payload;
pub mod ranker;
pub mod reader;
pub mod recommender;
pub mod report;

pub use aggregator::Aggregator;
pub use config::{AggregatorConfig, DEFAULT_ALERT_LIMIT};
pub use error::{AggregatorError, EntityAssessmentError};
pub use metrics::AggregationMetrics;
pub use payload::Assessment;
pub use reader::SubsystemReading;
