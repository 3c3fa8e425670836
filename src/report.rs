//! Progress display and run summary
//!
//! The reporter is a pure consumer of the tracker: once per second it reads a
//! snapshot and repaints an indicatif progress bar on stderr. It never mutates
//! engine state, so dropping or aborting it cannot affect a run's results.

use crate::checker::{CheckSummary, CheckerConfig, ProgressSnapshot, ProgressTracker};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;

/// Live progress bar fed by tracker snapshots
pub struct ProgressReporter {
    bar: ProgressBar,
    handle: JoinHandle<()>,
}

impl ProgressReporter {
    /// Spawn the reporter task
    pub fn spawn(tracker: Arc<ProgressTracker>) -> Self {
        let bar = build_bar(tracker.total() as u64);

        let handle = tokio::spawn({
            let bar = bar.clone();
            async move {
                let mut interval = tokio::time::interval(Duration::from_secs(1));
                loop {
                    interval.tick().await;
                    let snapshot = tracker.snapshot();
                    bar.set_position(snapshot.checked() as u64);
                    bar.set_message(status_message(&snapshot));
                }
            }
        });

        Self { bar, handle }
    }

    /// Stop the reporter and clear the bar
    pub fn finish(self) {
        self.handle.abort();
        self.bar.finish_and_clear();
    }
}

fn build_bar(total: u64) -> ProgressBar {
    let bar = ProgressBar::new(total);
    bar.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .expect("Invalid progress template")
            .progress_chars("#>-"),
    );
    bar.enable_steady_tick(Duration::from_millis(100));
    bar
}

fn status_message(snapshot: &ProgressSnapshot) -> String {
    format!(
        "good: {} remaining: {}",
        snapshot.success, snapshot.remaining
    )
}

/// Print the pre-run banner
pub fn print_header(total: usize, input: &Path, config: &CheckerConfig) {
    println!("Loaded {} proxies from {}", total, input.display());
    println!(
        "Checking with {} workers, timeout: {}s, scheme: {}",
        config.workers,
        config.timeout.as_secs(),
        config.scheme
    );
    println!("Test URL: {}", config.target_url);
    println!();
}

/// Print the post-join summary
pub fn print_summary(summary: &CheckSummary) {
    println!(
        "{} proxies checked in {}",
        summary.total,
        format_elapsed(summary.elapsed.as_secs())
    );
    println!("{} proxies are working", summary.good);
}

fn format_elapsed(secs: u64) -> String {
    if secs >= 60 {
        format!("{}m {}s", secs / 60, secs % 60)
    } else {
        format!("{}s", secs)
    }
}
