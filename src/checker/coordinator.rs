//! Run orchestration
//!
//! Partition once, spawn one task per worker, wait for all of them, then fold
//! the tracker into a summary. The coordinator never cancels a worker early;
//! the run is over exactly when every range is exhausted.

use crate::checker::partition::partition;
use crate::checker::probe::{Probe, Prober};
use crate::checker::sink::ResultSink;
use crate::checker::tracker::ProgressTracker;
use crate::checker::{worker, CheckerConfig};
use crate::proxy::models::Candidate;
use crate::Result;
use anyhow::{ensure, Context};
use futures::future::try_join_all;
use serde::Serialize;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::info;

/// Final figures for one completed run
#[derive(Debug, Clone, Serialize)]
pub struct CheckSummary {
    /// Candidates processed
    pub total: usize,
    /// Candidates classified as working
    pub good: usize,
    /// Wall-clock duration of the whole run
    pub elapsed: Duration,
}

/// Orchestrates one verification run
pub struct Checker {
    config: CheckerConfig,
}

impl Checker {
    /// Create a checker with default configuration
    pub fn new() -> Self {
        Self {
            config: CheckerConfig::default(),
        }
    }

    /// Create a checker with custom configuration
    pub fn with_config(config: CheckerConfig) -> Self {
        Self { config }
    }

    /// Check every candidate with the reqwest-backed prober
    pub async fn run(
        &self,
        candidates: Vec<Candidate>,
        sink: Arc<ResultSink>,
        tracker: Arc<ProgressTracker>,
    ) -> Result<CheckSummary> {
        let prober = Arc::new(Prober::new(self.config.clone()));
        self.run_with_probe(prober, candidates, sink, tracker).await
    }

    /// Check every candidate with a caller-supplied probe
    ///
    /// `tracker` must have been created for `candidates.len()`. The call
    /// returns only once every worker has exhausted its range.
    pub async fn run_with_probe<P>(
        &self,
        probe: Arc<P>,
        candidates: Vec<Candidate>,
        sink: Arc<ResultSink>,
        tracker: Arc<ProgressTracker>,
    ) -> Result<CheckSummary>
    where
        P: Probe + ?Sized + 'static,
    {
        ensure!(self.config.workers >= 1, "worker count must be at least 1");

        let total = candidates.len();
        let assignments = partition(total, self.config.workers);
        let candidates = Arc::new(candidates);
        let started = Instant::now();

        info!(total, workers = self.config.workers, "starting proxy check");

        let handles: Vec<_> = assignments
            .into_iter()
            .map(|assignment| {
                tokio::spawn(worker::run(
                    assignment,
                    Arc::clone(&candidates),
                    Arc::clone(&probe),
                    Arc::clone(&sink),
                    Arc::clone(&tracker),
                ))
            })
            .collect();

        // Join barrier: all ranges exhausted before the summary is read
        let results = try_join_all(handles)
            .await
            .context("worker task panicked")?;
        for result in results {
            result?;
        }

        let snapshot = tracker.snapshot();
        let summary = CheckSummary {
            total,
            good: snapshot.success,
            elapsed: started.elapsed(),
        };

        info!(
            checked = summary.total,
            good = summary.good,
            elapsed_ms = summary.elapsed.as_millis() as u64,
            "proxy check finished"
        );

        Ok(summary)
    }
}

impl Default for Checker {
    fn default() -> Self {
        Self::new()
    }
}
