//! Core Aggregator implementation: read, normalize, weight, rank, recommend

use crate::ranker::top_alerts;
use crate::reader::{read_signals, SubsystemReading};
use crate::recommender::recommend_actions;
use crate::report::{breakdown, build_report, ReportParts};
use crate::{AggregationMetrics, AggregatorConfig, AggregatorError};
use std::sync::Arc;
use std::time::Instant;
use tokio::task::JoinSet;
use veracity_domain::traits::AssessmentReader;
use veracity_domain::{select_weights, AggregationResult, RunId, ScopeId, Subsystem};

/// Aggregation service turning stored assessments into one risk picture
///
/// Responsible for:
/// - Reading every enabled subsystem for a scope (concurrently if configured)
/// - Building per-subsystem statistics and the weighted overall score
/// - Ranking alerts and deriving recommended actions
/// - Collecting metrics across runs
///
/// # Examples
///
/// ```no_run
/// use std::sync::Arc;
/// use veracity_aggregator::{Aggregator, AggregatorConfig};
/// use veracity_domain::ScopeId;
/// use veracity_store::SqliteStore;
///
/// # async fn run() -> Result<(), Box<dyn std::error::Error>> {
/// let store = Arc::new(SqliteStore::new("veracity.db")?);
/// let mut aggregator = Aggregator::new(store, AggregatorConfig::default())?;
///
/// let result = aggregator.aggregate(&ScopeId::from("workspace-1")).await?;
/// println!("{} ({})", result.overall_score, result.risk_level);
/// # Ok(())
/// # }
/// ```
pub struct Aggregator<S> {
    store: Arc<S>,
    config: AggregatorConfig,
    subsystems: Vec<Subsystem>,
    metrics: AggregationMetrics,
}

impl<S> Aggregator<S>
where
    S: AssessmentReader + Send + Sync + 'static,
    S::Error: std::fmt::Display,
{
    /// Create a new Aggregator over `store`
    ///
    /// Fails with [`AggregatorError::Configuration`] if `config` is invalid.
    pub fn new(store: Arc<S>, config: AggregatorConfig) -> Result<Self, AggregatorError> {
        config.validate().map_err(AggregatorError::Configuration)?;
        let subsystems = config.subsystems().map_err(AggregatorError::Configuration)?;

        Ok(Self {
            store,
            config,
            subsystems,
            metrics: AggregationMetrics::new(),
        })
    }

    /// Create an Aggregator with default configuration
    pub fn with_defaults(store: Arc<S>) -> Result<Self, AggregatorError> {
        Self::new(store, AggregatorConfig::default())
    }

    /// Get the active configuration
    pub fn config(&self) -> &AggregatorConfig {
        &self.config
    }

    /// Get a reference to the current metrics
    pub fn metrics(&self) -> &AggregationMetrics {
        &self.metrics
    }

    /// Reset metrics counters
    pub fn reset_metrics(&mut self) {
        self.metrics.reset();
    }

    /// Run one aggregation for `scope`
    ///
    /// This is the main entry point. It:
    /// 1. Reads every enabled subsystem (malformed entities are skipped)
    /// 2. Builds the breakdown and picks the weight table
    /// 3. Ranks and bounds the alert list
    /// 4. Derives recommended actions from the bounded alerts and assembles the result
    ///
    /// A storage failure in any reader aborts the whole run.
    pub async fn aggregate(&mut self, scope: &ScopeId) -> Result<AggregationResult, AggregatorError> {
        let start = Instant::now();
        let run_id = RunId::new();

        tracing::debug!(scope = %scope, run_id = %run_id, "Starting aggregation");

        let readings = if self.config.concurrent_readers {
            self.read_concurrently(scope).await?
        } else {
            self.read_sequentially(scope)?
        };

        for reading in &readings {
            self.metrics
                .record_reading(reading.subsystem, reading.signals.len(), reading.skipped);
        }

        let breakdown = breakdown(&readings);
        let framework_count = breakdown
            .get(&Subsystem::Framework)
            .map_or(0, |stats| stats.total);
        let weights = select_weights(framework_count);
        let overall_score = weights.overall_score(&breakdown);

        let alerts = top_alerts(&readings, self.config.alert_limit);
        let recommended_actions = recommend_actions(&alerts);

        let duration_ms = start.elapsed().as_millis() as u64;
        let result = build_report(ReportParts {
            scope_id: scope.clone(),
            run_id,
            overall_score,
            weight_profile: weights.profile,
            breakdown,
            alerts,
            recommended_actions,
            duration_ms,
        });

        self.metrics.record_run(result.overall_score, duration_ms);

        tracing::info!(
            scope = %scope,
            run_id = %run_id,
            overall_score = result.overall_score,
            risk_level = %result.risk_level,
            alerts = result.alerts.len(),
            skipped = result.metadata.entities_skipped,
            weight_profile = weights.profile.as_str(),
            "Aggregation complete"
        );

        Ok(result)
    }

    fn read_sequentially(&self, scope: &ScopeId) -> Result<Vec<SubsystemReading>, AggregatorError> {
        self.subsystems
            .iter()
            .map(|subsystem| read_signals(self.store.as_ref(), scope, *subsystem))
            .collect()
    }

    /// One blocking task per subsystem; all are joined before returning
    async fn read_concurrently(
        &self,
        scope: &ScopeId,
    ) -> Result<Vec<SubsystemReading>, AggregatorError> {
        let mut tasks = JoinSet::new();
        for subsystem in &self.subsystems {
            let store = Arc::clone(&self.store);
            let scope = scope.clone();
            let subsystem = *subsystem;
            tasks.spawn_blocking(move || read_signals(store.as_ref(), &scope, subsystem));
        }

        let mut readings = Vec::with_capacity(self.subsystems.len());
        while let Some(joined) = tasks.join_next().await {
            let reading = joined
                .map_err(|e| AggregatorError::Worker(format!("reader task failed: {}", e)))??;
            readings.push(reading);
        }

        // Join order is arbitrary; downstream ranking relies on declaration order
        readings.sort_by_key(|r| r.subsystem);
        Ok(readings)
    }
}
