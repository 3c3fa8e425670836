//! Shared progress counters
//!
//! Every worker updates the same tracker while the progress display reads it.
//! Counter traffic is relaxed: final exactness is settled by the coordinator's
//! join barrier, and mid-run readers only feed a status line.

use std::sync::atomic::{AtomicUsize, Ordering};

/// Run-wide counters updated by every worker
///
/// `remaining` starts at the candidate total and drops by exactly one per
/// completed candidate; `success` rises by exactly one per working proxy.
/// After all workers have joined, `remaining` is zero and `success` equals
/// the number of working proxies found.
#[derive(Debug)]
pub struct ProgressTracker {
    total: usize,
    remaining: AtomicUsize,
    success: AtomicUsize,
}

impl ProgressTracker {
    /// Create a tracker for a run over `total` candidates
    pub fn new(total: usize) -> Self {
        Self {
            total,
            remaining: AtomicUsize::new(total),
            success: AtomicUsize::new(0),
        }
    }

    /// Total number of candidates in the run
    pub fn total(&self) -> usize {
        self.total
    }

    /// Record a working proxy
    pub fn record_success(&self) {
        self.success.fetch_add(1, Ordering::Relaxed);
    }

    /// Record one candidate as completed, whatever its outcome
    pub fn record_completed(&self) {
        self.remaining.fetch_sub(1, Ordering::Relaxed);
    }

    /// Read both counters
    ///
    /// The two loads are not paired atomically, so a snapshot taken mid-run
    /// may lag in-flight updates. Its one consumer is the progress display,
    /// which repaints a second later anyway.
    pub fn snapshot(&self) -> ProgressSnapshot {
        ProgressSnapshot {
            total: self.total,
            remaining: self.remaining.load(Ordering::Relaxed),
            success: self.success.load(Ordering::Relaxed),
        }
    }
}

/// A point-in-time view of the tracker
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgressSnapshot {
    pub total: usize,
    pub remaining: usize,
    pub success: usize,
}

impl ProgressSnapshot {
    /// Candidates processed so far
    pub fn checked(&self) -> usize {
        self.total - self.remaining
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn test_tracker_starts_full() {
        let tracker = ProgressTracker::new(25);
        assert_eq!(tracker.total(), 25);
        let snapshot = tracker.snapshot();
        assert_eq!(snapshot.total, 25);
        assert_eq!(snapshot.remaining, 25);
        assert_eq!(snapshot.success, 0);
        assert_eq!(snapshot.checked(), 0);
    }

    #[test]
    fn test_tracker_records() {
        let tracker = ProgressTracker::new(3);
        tracker.record_success();
        tracker.record_completed();
        tracker.record_completed();

        let snapshot = tracker.snapshot();
        assert_eq!(snapshot.remaining, 1);
        assert_eq!(snapshot.success, 1);
        assert_eq!(snapshot.checked(), 2);
    }

    #[test]
    fn test_tracker_converges_under_contention() {
        let threads = 8;
        let per_thread = 500;
        let tracker = Arc::new(ProgressTracker::new(threads * per_thread));

        let handles: Vec<_> = (0..threads)
            .map(|_| {
                let tracker = Arc::clone(&tracker);
                thread::spawn(move || {
                    for i in 0..per_thread {
                        if i % 2 == 0 {
                            tracker.record_success();
                        }
                        tracker.record_completed();
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let snapshot = tracker.snapshot();
        assert_eq!(snapshot.remaining, 0);
        assert_eq!(snapshot.success, threads * per_thread / 2);
    }
}
