//! Veracity Domain Layer
//!
//! This crate contains the core scoring logic and domain model for Veracity.
//! It carries no I/O and almost no external dependencies, and defines the
//! value objects and trait interfaces every other layer depends upon.
//!
//! ## Key Concepts
//!
//! - **Subsystem**: An independent scoring method (MOM, POP, EVE, MOSES, CLAIM, FRAMEWORK)
//! - **Risk Signal**: One entity's assessment, normalized onto a shared 0-100 scale
//! - **Severity**: LOW / MEDIUM / HIGH / CRITICAL band, decided on the native scale
//! - **Weight Table**: Adaptive subsystem weights for the overall score
//! - **Aggregation Result**: Overall score, ranked alerts, breakdown and actions
//!
//! ## Architecture
//!
//! This crate follows Clean Architecture:
//! - Pure scoring logic only
//! - Payload parsing and storage live in other crates
//! - Trait definitions for all external interactions

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod report;
pub mod scoring;
pub mod severity;
pub mod signal;
pub mod stats;
pub mod subsystem;
pub mod traits;
pub mod weights;

// Re-exports for convenience
pub use report::{AggregationResult, RecommendedAction, RunId, RunMetadata};
pub use scoring::PopLevel;
pub use severity::{RiskLevel, Severity};
pub use signal::{RiskSignal, ScopeId};
pub use stats::SubsystemStats;
pub use subsystem::{EntityType, Subsystem};
pub use weights::{select_weights, WeightProfile, WeightTable};
