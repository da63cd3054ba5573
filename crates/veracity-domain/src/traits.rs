//! Trait definitions for external interactions
//!
//! These traits define the boundaries between domain logic and infrastructure.
//! Infrastructure implementations live in other crates.

use crate::{ScopeId, Subsystem};

/// One stored entity together with its assessment payload
///
/// The payload is an opaque structured document (JSON text) owned by the
/// collaborator that produced the assessment; readers parse it per subsystem.
#[derive(Debug, Clone, PartialEq)]
pub struct AssessmentRecord {
    /// Identity of the assessed entity
    pub entity_id: String,

    /// Display label of the assessed entity
    pub entity_name: String,

    /// Subsystem-specific assessment document
    pub payload: String,

    /// Navigable pointer back to the entity, if the collaborator has one
    pub reference: Option<String>,
}

impl AssessmentRecord {
    /// Create a record without a reference
    pub fn new(
        entity_id: impl Into<String>,
        entity_name: impl Into<String>,
        payload: impl Into<String>,
    ) -> Self {
        Self {
            entity_id: entity_id.into(),
            entity_name: entity_name.into(),
            payload: payload.into(),
            reference: None,
        }
    }

    /// Attach a reference
    pub fn with_reference(mut self, reference: impl Into<String>) -> Self {
        self.reference = Some(reference.into());
        self
    }
}

/// Trait for reading already-computed assessments
///
/// Implemented by the infrastructure layer (veracity-store)
pub trait AssessmentReader {
    /// Error type for read operations
    type Error;

    /// List every entity in `scope` whose `subsystem` assessment is present
    ///
    /// Entities that have not been assessed yet are not returned.
    fn list_assessed_entities(
        &self,
        scope: &ScopeId,
        subsystem: Subsystem,
    ) -> Result<Vec<AssessmentRecord>, Self::Error>;
}
