//! Concurrent proxy verification engine
//!
//! The engine splits the candidate list into one contiguous range per worker
//! before anything runs, probes each range strictly in order while ranges run
//! in parallel, and folds every outcome into the shared result sink and
//! progress counters. Partitioning is static: there is no work stealing, so a
//! run finishes when the slowest range does.

pub mod coordinator;
pub mod partition;
pub mod probe;
pub mod sink;
pub mod tracker;
pub(crate) mod worker;

pub use coordinator::{CheckSummary, Checker};
pub use partition::{partition, RangeAssignment};
pub use probe::{Probe, Prober};
pub use sink::ResultSink;
pub use tracker::{ProgressSnapshot, ProgressTracker};

use crate::proxy::models::ProxyScheme;
use std::time::Duration;

/// Default timeout for each probe in seconds
const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Default number of workers
const DEFAULT_WORKERS: usize = 10;

/// Default URL to test candidates against
const DEFAULT_TARGET_URL: &str = "http://httpbin.org/ip";

/// Configuration for a verification run
///
/// Built once before any worker starts and shared read-only from then on.
#[derive(Debug, Clone)]
pub struct CheckerConfig {
    /// Proxy scheme applied uniformly to every candidate
    pub scheme: ProxyScheme,
    /// URL the probes are directed at
    pub target_url: String,
    /// Hard deadline for a single probe
    pub timeout: Duration,
    /// Number of workers the candidate list is partitioned across
    pub workers: usize,
}

impl Default for CheckerConfig {
    fn default() -> Self {
        Self {
            scheme: ProxyScheme::Http,
            target_url: DEFAULT_TARGET_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            workers: DEFAULT_WORKERS,
        }
    }
}

impl CheckerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_scheme(mut self, scheme: ProxyScheme) -> Self {
        self.scheme = scheme;
        self
    }

    pub fn with_target_url(mut self, url: String) -> Self {
        self.target_url = url;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers;
        self
    }
}
