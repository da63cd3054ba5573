//! Signal readers - one storage query per subsystem, parse-or-skip per entity

use crate::payload::Assessment;
use crate::{AggregatorError, EntityAssessmentError};
use veracity_domain::traits::{AssessmentReader, AssessmentRecord};
use veracity_domain::{RiskSignal, ScopeId, Subsystem};

/// Everything one reader produced for one subsystem
#[derive(Debug, Clone, PartialEq)]
pub struct SubsystemReading {
    /// Subsystem that was read
    pub subsystem: Subsystem,
    /// Usable signals, in storage order
    pub signals: Vec<RiskSignal>,
    /// Entities skipped for malformed payloads
    pub skipped: usize,
}

impl SubsystemReading {
    /// A reading with no signals, used for subsystems that were not read
    pub fn empty(subsystem: Subsystem) -> Self {
        Self {
            subsystem,
            signals: Vec::new(),
            skipped: 0,
        }
    }
}

/// Turn one stored record into a signal
pub fn signal_from_record(
    subsystem: Subsystem,
    record: &AssessmentRecord,
) -> Result<RiskSignal, EntityAssessmentError> {
    let assessment = Assessment::parse(subsystem, &record.payload)?;

    Ok(RiskSignal::new(
        subsystem,
        record.entity_id.clone(),
        record.entity_name.clone(),
        assessment.raw_score(),
        assessment.details(),
    )
    .with_reference(record.reference.clone()))
}

/// Read every assessed entity of `subsystem` in `scope` and convert it to a signal
///
/// A storage failure aborts with [`AggregatorError::Configuration`]. A malformed
/// payload is logged with the entity's identity and skipped.
pub fn read_signals<S>(
    store: &S,
    scope: &ScopeId,
    subsystem: Subsystem,
) -> Result<SubsystemReading, AggregatorError>
where
    S: AssessmentReader + ?Sized,
    S::Error: std::fmt::Display,
{
    let records = store.list_assessed_entities(scope, subsystem).map_err(|e| {
        AggregatorError::Configuration(format!(
            "failed to read {} assessments for scope '{}': {}",
            subsystem, scope, e
        ))
    })?;

    let mut reading = SubsystemReading::empty(subsystem);
    for record in &records {
        match signal_from_record(subsystem, record) {
            Ok(signal) => reading.signals.push(signal),
            Err(e) => {
                tracing::warn!(
                    subsystem = %subsystem,
                    entity_id = %record.entity_id,
                    error = %e,
                    "Skipping malformed assessment"
                );
                reading.skipped += 1;
            }
        }
    }

    tracing::debug!(
        subsystem = %subsystem,
        signals = reading.signals.len(),
        skipped = reading.skipped,
        "Subsystem read complete"
    );

    Ok(reading)
}

#[cfg(test)]
mod tests {
    use super::*;
    use veracity_domain::Severity;

    struct FixedStore {
        records: Vec<AssessmentRecord>,
        fail: bool,
    }

    impl AssessmentReader for FixedStore {
        type Error = String;

        fn list_assessed_entities(
            &self,
            _scope: &ScopeId,
            _subsystem: Subsystem,
        ) -> Result<Vec<AssessmentRecord>, Self::Error> {
            if self.fail {
                return Err("database is locked".to_string());
            }
            Ok(self.records.clone())
        }
    }

    #[test]
    fn test_signal_from_record() {
        let record = AssessmentRecord::new(
            "actor-1",
            "Ivan",
            r#"{"motive": 5, "opportunity": 5, "means": 4}"#,
        )
        .with_reference("/actors/actor-1");

        let signal = signal_from_record(Subsystem::Mom, &record).unwrap();
        assert_eq!(signal.entity_id, "actor-1");
        assert_eq!(signal.severity, Severity::Critical);
        assert_eq!(signal.reference.as_deref(), Some("/actors/actor-1"));
        assert!(signal.details.contains("motive 5.0"));
    }

    #[test]
    fn test_malformed_records_are_skipped() {
        let store = FixedStore {
            records: vec![
                AssessmentRecord::new("c-1", "Good", r#"{"risk_score": 82}"#),
                AssessmentRecord::new("c-2", "Broken", "{not json"),
                AssessmentRecord::new("c-3", "Out of range", r#"{"risk_score": 140}"#),
                AssessmentRecord::new("c-4", "Also good", r#"{"risk_score": 12}"#),
            ],
            fail: false,
        };

        let reading = read_signals(&store, &ScopeId::from("s"), Subsystem::Claim).unwrap();
        assert_eq!(reading.skipped, 2);
        let ids: Vec<&str> = reading.signals.iter().map(|s| s.entity_id.as_str()).collect();
        assert_eq!(ids, vec!["c-1", "c-4"]);
    }

    #[test]
    fn test_store_failure_is_configuration_error() {
        let store = FixedStore {
            records: Vec::new(),
            fail: true,
        };

        let result = read_signals(&store, &ScopeId::from("s"), Subsystem::Eve);
        match result {
            Err(AggregatorError::Configuration(msg)) => {
                assert!(msg.contains("EVE"));
                assert!(msg.contains("database is locked"));
            }
            other => panic!("expected configuration error, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_subsystem_reads_cleanly() {
        let store = FixedStore {
            records: Vec::new(),
            fail: false,
        };

        let reading = read_signals(&store, &ScopeId::from("s"), Subsystem::Pop).unwrap();
        assert_eq!(reading, SubsystemReading::empty(Subsystem::Pop));
    }
}
