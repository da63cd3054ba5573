//! Import a file into a file-backed store, then aggregate it through the CLI layer.

use veracity_cli::commands::aggregate::run_aggregation;
use veracity_cli::commands::import::{import_records, parse_import};
use veracity_cli::config::{Config, OutputFormat};
use veracity_cli::Formatter;
use veracity_aggregator::AggregatorConfig;
use veracity_domain::{ScopeId, Severity, Subsystem};
use veracity_store::SqliteStore;

const CASE_FILE: &str = r#"[
    {"subsystem": "MOM", "entity_id": "actor-1", "entity_name": "Ivan",
     "payload": {"motive": 5, "opportunity": 5, "means": 4}},
    {"subsystem": "EVE", "entity_id": "ev-1", "entity_name": "Intercepted memo",
     "payload": {"internal_consistency": 1, "external_corroboration": 1, "anomaly_detection": 5}},
    {"subsystem": "CLAIM", "entity_id": "claim-1", "entity_name": "Port closure",
     "payload": {"risk_score": 82}, "reference": "/claims/claim-1"},
    {"subsystem": "MOSES", "entity_id": "src-1", "entity_name": "Anonymous blog",
     "payload": {"vulnerability": "unknown"}}
]"#;

#[tokio::test]
async fn test_import_then_aggregate() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("case.db");
    let scope = ScopeId::from("case-42");

    {
        let store = SqliteStore::new(&db_path).unwrap();
        let records = parse_import(CASE_FILE).unwrap();
        let summary = import_records(&store, &scope, &records).unwrap();
        assert_eq!(summary.assessed, 4);
    }

    let store = SqliteStore::new(&db_path).unwrap();
    let result = run_aggregation(store, &scope, AggregatorConfig::default())
        .await
        .unwrap();

    assert_eq!(result.alerts.len(), 3);
    assert!(result.alerts.iter().all(|a| a.severity == Severity::Critical));
    assert_eq!(result.stats(Subsystem::Moses).unwrap().skipped, 1);

    let actions: Vec<Subsystem> = result.recommended_actions.iter().map(|a| a.subsystem).collect();
    assert_eq!(actions, vec![Subsystem::Mom, Subsystem::Eve, Subsystem::Claim]);

    let formatter = Formatter::new(OutputFormat::Json, false);
    let json: serde_json::Value =
        serde_json::from_str(&formatter.format_result(&result).unwrap()).unwrap();
    assert_eq!(json["scope_id"], "case-42");
    assert_eq!(json["recommended_actions"][2]["reference"], "/claims/claim-1");
}

#[test]
fn test_config_file_drives_aggregator_settings() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(
        &path,
        r#"
database = "case.db"

[settings]
format = "quiet"

[aggregator]
alert_limit = 3
concurrent_readers = false
"#,
    )
    .unwrap();

    let config = Config::load_from(&path).unwrap();
    assert_eq!(config.database, "case.db");
    assert_eq!(config.settings.format, OutputFormat::Quiet);
    assert_eq!(config.aggregator.alert_limit, 3);
    assert!(!config.aggregator.concurrent_readers);
}
