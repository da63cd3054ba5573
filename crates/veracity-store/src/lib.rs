//! Veracity Storage Layer
//!
//! Implements the AssessmentReader trait on top of SQLite.
//!
//! # Architecture
//!
//! - One `assessments` table keyed by (scope, subsystem, entity)
//! - Payloads are stored verbatim as JSON text; parsing belongs to the aggregator
//! - A NULL or blank payload marks an entity that is not yet assessed
//!
//! # Examples
//!
//! ```no_run
//! use veracity_store::SqliteStore;
//!
//! let store = SqliteStore::new(":memory:").unwrap();
//! // Store is now ready for assessment reads
//! ```

#![warn(missing_docs)]

use rusqlite::{params, Connection};
use std::path::Path;
use std::sync::{Mutex, MutexGuard};
use std::time::{SystemTime, UNIX_EPOCH};
use thiserror::Error;
use veracity_domain::traits::{AssessmentReader, AssessmentRecord};
use veracity_domain::{ScopeId, Subsystem};

/// Errors that can occur during storage operations
#[derive(Error, Debug)]
pub enum StoreError {
    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// Invalid data format
    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// Store cannot be used (e.g. a previous holder of the connection panicked)
    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

/// SQLite-based implementation of AssessmentReader
///
/// # Thread Safety
///
/// The connection sits behind a mutex so one store can be shared across the
/// aggregator's concurrent readers. SQLite serializes the reads anyway; the
/// mutex only makes the sharing sound.
pub struct SqliteStore {
    conn: Mutex<Connection>,
}

fn current_timestamp() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or(0)
}

impl SqliteStore {
    /// Create a new SqliteStore with the given database path
    ///
    /// Use `:memory:` for an in-memory database (useful for testing).
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use veracity_store::SqliteStore;
    ///
    /// let store = SqliteStore::new("veracity.db").unwrap();
    /// ```
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let conn = Connection::open(path)?;
        let store = Self {
            conn: Mutex::new(conn),
        };
        store.initialize_schema()?;
        Ok(store)
    }

    /// Initialize the database schema
    fn initialize_schema(&self) -> Result<(), StoreError> {
        let schema = include_str!("schema.sql");
        self.connection()?.execute_batch(schema)?;
        Ok(())
    }

    fn connection(&self) -> Result<MutexGuard<'_, Connection>, StoreError> {
        self.conn
            .lock()
            .map_err(|_| StoreError::Unavailable("connection lock poisoned".to_string()))
    }

    /// Register an entity that has no assessment yet
    ///
    /// Existing entities keep their payload; only the display name is refreshed.
    pub fn register_entity(
        &self,
        scope: &ScopeId,
        subsystem: Subsystem,
        entity_id: &str,
        entity_name: &str,
    ) -> Result<(), StoreError> {
        self.connection()?.execute(
            "INSERT INTO assessments (scope_id, subsystem, entity_id, entity_name, payload, reference, updated_at)
             VALUES (?1, ?2, ?3, ?4, NULL, NULL, ?5)
             ON CONFLICT (scope_id, subsystem, entity_id)
             DO UPDATE SET entity_name = excluded.entity_name, updated_at = excluded.updated_at",
            params![
                scope.as_str(),
                subsystem.as_str(),
                entity_id,
                entity_name,
                current_timestamp(),
            ],
        )?;
        Ok(())
    }

    /// Insert or replace an entity's assessment
    pub fn upsert_assessment(
        &self,
        scope: &ScopeId,
        subsystem: Subsystem,
        record: &AssessmentRecord,
    ) -> Result<(), StoreError> {
        if record.entity_id.trim().is_empty() {
            return Err(StoreError::InvalidData("entity_id is empty".to_string()));
        }

        self.connection()?.execute(
            "INSERT INTO assessments (scope_id, subsystem, entity_id, entity_name, payload, reference, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
             ON CONFLICT (scope_id, subsystem, entity_id)
             DO UPDATE SET entity_name = excluded.entity_name,
                           payload = excluded.payload,
                           reference = excluded.reference,
                           updated_at = excluded.updated_at",
            params![
                scope.as_str(),
                subsystem.as_str(),
                &record.entity_id,
                &record.entity_name,
                &record.payload,
                &record.reference,
                current_timestamp(),
            ],
        )?;
        Ok(())
    }

    /// Drop an entity's assessment, keeping the entity itself
    ///
    /// Returns `false` if the entity was not found.
    pub fn clear_assessment(
        &self,
        scope: &ScopeId,
        subsystem: Subsystem,
        entity_id: &str,
    ) -> Result<bool, StoreError> {
        let changed = self.connection()?.execute(
            "UPDATE assessments SET payload = NULL, updated_at = ?4
             WHERE scope_id = ?1 AND subsystem = ?2 AND entity_id = ?3",
            params![scope.as_str(), subsystem.as_str(), entity_id, current_timestamp()],
        )?;
        Ok(changed > 0)
    }

    /// Count assessed entities for a scope and subsystem
    pub fn count_assessments(
        &self,
        scope: &ScopeId,
        subsystem: Subsystem,
    ) -> Result<usize, StoreError> {
        let count: i64 = self.connection()?.query_row(
            "SELECT COUNT(*) FROM assessments
             WHERE scope_id = ?1 AND subsystem = ?2
               AND payload IS NOT NULL AND TRIM(payload) <> ''",
            params![scope.as_str(), subsystem.as_str()],
            |row| row.get(0),
        )?;
        Ok(count as usize)
    }
}

impl AssessmentReader for SqliteStore {
    type Error = StoreError;

    fn list_assessed_entities(
        &self,
        scope: &ScopeId,
        subsystem: Subsystem,
    ) -> Result<Vec<AssessmentRecord>, Self::Error> {
        let conn = self.connection()?;
        let mut stmt = conn.prepare(
            "SELECT entity_id, entity_name, payload, reference
             FROM assessments
             WHERE scope_id = ?1 AND subsystem = ?2
               AND payload IS NOT NULL AND TRIM(payload) <> ''
             ORDER BY rowid",
        )?;

        let records = stmt
            .query_map(params![scope.as_str(), subsystem.as_str()], |row| {
                Ok(AssessmentRecord {
                    entity_id: row.get(0)?,
                    entity_name: row.get(1)?,
                    payload: row.get(2)?,
                    reference: row.get(3)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(records)
    }
}
