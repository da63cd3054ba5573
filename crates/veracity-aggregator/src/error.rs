//! Error types for aggregation runs

use thiserror::Error;

/// Errors that abort an aggregation run
///
/// Per-entity payload problems never surface here; they are
/// [`EntityAssessmentError`]s, logged and skipped by the readers.
#[derive(Error, Debug)]
pub enum AggregatorError {
    /// Storage interface unavailable or unreachable, or invalid configuration
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Reader task failed to complete (tokio runtime issues)
    #[error("Worker error: {0}")]
    Worker(String),
}

/// Why a single entity's assessment payload could not be used
#[derive(Error, Debug)]
pub enum EntityAssessmentError {
    /// Payload is not valid JSON for the subsystem's shape
    #[error("Malformed payload: {0}")]
    Json(#[from] serde_json::Error),

    /// A sub-score lies outside its documented range or is not finite
    #[error("{field} = {value} is outside [{min}, {max}]")]
    OutOfRange {
        /// Offending field
        field: &'static str,
        /// Value found in the payload
        value: f64,
        /// Lower bound of the documented range
        min: f64,
        /// Upper bound of the documented range
        max: f64,
    },

    /// Categorical level not recognized
    #[error("Unknown risk level: {0}")]
    UnknownLevel(String),

    /// Saved worksheet carries none of the four component assessments
    #[error("Worksheet has no MOM, POP, EVE or MOSES scores")]
    MissingComponents,
}
