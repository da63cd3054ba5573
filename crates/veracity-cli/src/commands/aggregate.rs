//! Aggregate command implementation.

use crate::cli::AggregateArgs;
use crate::config::Config;
use crate::error::Result;
use crate::output::Formatter;
use std::sync::Arc;
use veracity_aggregator::{Aggregator, AggregatorConfig};
use veracity_domain::{AggregationResult, ScopeId};
use veracity_store::SqliteStore;

/// Apply command-line overrides to the configured aggregator settings.
pub fn effective_config(args: &AggregateArgs, config: &Config) -> AggregatorConfig {
    let mut aggregator = config.aggregator.clone();
    if let Some(limit) = args.alert_limit {
        aggregator.alert_limit = limit;
    }
    if args.sequential {
        aggregator.concurrent_readers = false;
    }
    aggregator
}

/// Run one aggregation against an open store.
pub async fn run_aggregation(
    store: SqliteStore,
    scope: &ScopeId,
    config: AggregatorConfig,
) -> Result<AggregationResult> {
    let mut aggregator = Aggregator::new(Arc::new(store), config)?;
    Ok(aggregator.aggregate(scope).await?)
}

/// Execute the aggregate command.
pub async fn execute_aggregate(
    args: AggregateArgs,
    config: &Config,
    formatter: &Formatter,
) -> Result<()> {
    let store = SqliteStore::new(&config.database)?;
    let scope = ScopeId::new(args.scope.trim());
    let aggregator_config = effective_config(&args, config);

    let result = run_aggregation(store, &scope, aggregator_config).await?;

    println!("{}", formatter.format_result(&result)?);

    Ok(())
}
