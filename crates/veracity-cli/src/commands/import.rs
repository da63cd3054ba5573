//! Import command implementation.

use crate::cli::ImportArgs;
use crate::config::Config;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use serde::Deserialize;
use std::fs;
use veracity_domain::traits::AssessmentRecord;
use veracity_domain::{ScopeId, Subsystem};
use veracity_store::SqliteStore;

/// One entry of an import file.
///
/// `payload` may be a JSON object, a JSON string holding the document, or
/// `null` for an entity that has not been assessed yet.
#[derive(Debug, Clone, Deserialize)]
pub struct ImportRecord {
    /// Subsystem name (MOM, POP, EVE, MOSES, CLAIM, FRAMEWORK)
    pub subsystem: String,
    /// Entity identity
    pub entity_id: String,
    /// Entity display label
    #[serde(default)]
    pub entity_name: String,
    /// Assessment document
    #[serde(default)]
    pub payload: serde_json::Value,
    /// Navigable pointer to the entity
    #[serde(default)]
    pub reference: Option<String>,
}

/// Counts from one import.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ImportSummary {
    /// Entities stored with an assessment
    pub assessed: usize,
    /// Entities registered without an assessment
    pub registered: usize,
}

/// Parse the contents of an import file.
pub fn parse_import(contents: &str) -> Result<Vec<ImportRecord>> {
    Ok(serde_json::from_str(contents)?)
}

/// Write records into the store, validating every record up front.
///
/// An unknown subsystem or a blank `entity_id` rejects the whole file before
/// anything is written.
///
/// Payload contents are stored verbatim; malformed documents are the
/// aggregator's concern and are skipped there.
pub fn import_records(
    store: &SqliteStore,
    scope: &ScopeId,
    records: &[ImportRecord],
) -> Result<ImportSummary> {
    let subsystems = records
        .iter()
        .enumerate()
        .map(|(index, record)| {
            if record.entity_id.trim().is_empty() {
                return Err(CliError::InvalidInput(format!(
                    "record {}: entity_id is empty",
                    index + 1
                )));
            }
            record.subsystem.parse::<Subsystem>().map_err(|e| {
                CliError::InvalidInput(format!("record {}: {}", index + 1, e))
            })
        })
        .collect::<Result<Vec<_>>>()?;

    let mut summary = ImportSummary::default();
    for (record, subsystem) in records.iter().zip(subsystems) {
        let name = if record.entity_name.is_empty() {
            &record.entity_id
        } else {
            &record.entity_name
        };

        let payload = match &record.payload {
            serde_json::Value::Null => None,
            serde_json::Value::String(text) => Some(text.clone()),
            other => Some(other.to_string()),
        };

        match payload {
            Some(payload) => {
                let mut entry = AssessmentRecord::new(record.entity_id.clone(), name.clone(), payload);
                entry.reference = record.reference.clone();
                store.upsert_assessment(scope, subsystem, &entry)?;
                summary.assessed += 1;
            }
            None => {
                store.register_entity(scope, subsystem, &record.entity_id, name)?;
                summary.registered += 1;
            }
        }
    }

    tracing::debug!(
        scope = %scope,
        assessed = summary.assessed,
        registered = summary.registered,
        "Import complete"
    );

    Ok(summary)
}

/// Execute the import command.
pub fn execute_import(args: ImportArgs, config: &Config, formatter: &Formatter) -> Result<()> {
    let contents = fs::read_to_string(&args.file)?;
    let records = parse_import(&contents)?;

    let store = SqliteStore::new(&config.database)?;
    let scope = ScopeId::new(args.scope.trim());
    let summary = import_records(&store, &scope, &records)?;

    println!(
        "{}",
        formatter.success(&format!(
            "Imported {} assessment(s) into scope '{}'",
            summary.assessed, scope
        ))
    );
    if summary.registered > 0 {
        println!(
            "{}",
            formatter.info(&format!("Registered {} unassessed entit(ies)", summary.registered))
        );
    }

    Ok(())
}
