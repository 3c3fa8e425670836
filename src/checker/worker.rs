//! Per-range worker loop

use crate::checker::partition::RangeAssignment;
use crate::checker::probe::Probe;
use crate::checker::sink::ResultSink;
use crate::checker::tracker::ProgressTracker;
use crate::proxy::models::Candidate;
use crate::Result;
use std::sync::Arc;
use tracing::{debug, trace};

/// Probe every candidate in one assignment, strictly in order
///
/// A worker has at most one probe in flight. Each outcome is persisted before
/// the candidate is counted as completed, and the success bump lands before
/// the remaining drop, so a reader that observes zero remaining also observes
/// the final success count.
pub(crate) async fn run<P: Probe + ?Sized>(
    assignment: RangeAssignment,
    candidates: Arc<Vec<Candidate>>,
    probe: Arc<P>,
    sink: Arc<ResultSink>,
    tracker: Arc<ProgressTracker>,
) -> Result<()> {
    debug!(
        worker = assignment.worker_id,
        start = assignment.start,
        end = assignment.end,
        "worker starting"
    );

    for index in assignment.start..assignment.end {
        let candidate = &candidates[index];
        let outcome = probe.probe(candidate).await;
        trace!(
            worker = assignment.worker_id,
            address = %candidate.address,
            ?outcome,
            "candidate classified"
        );

        sink.append(candidate, &outcome)?;
        if outcome.is_success() {
            tracker.record_success();
        }
        tracker.record_completed();
    }

    debug!(worker = assignment.worker_id, "worker finished");
    Ok(())
}
