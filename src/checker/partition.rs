//! Static partitioning of the candidate list across workers

/// A contiguous slice of the candidate list owned by exactly one worker
///
/// `start` is inclusive and `end` exclusive. The assignments of one run are
/// pairwise disjoint and cover `[0, total)` exactly, so every candidate is
/// probed once.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RangeAssignment {
    pub worker_id: usize,
    pub start: usize,
    pub end: usize,
}

impl RangeAssignment {
    /// Number of candidates in this range
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// True when the range holds no candidates
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// Split `total` candidates into exactly `workers` contiguous ranges
///
/// The first `total % workers` ranges carry one extra candidate, so sizes
/// differ by at most one. When there are more workers than candidates the
/// surplus workers receive empty ranges and complete immediately.
///
/// # Panics
///
/// Panics if `workers` is zero; callers validate the worker count before
/// partitioning.
pub fn partition(total: usize, workers: usize) -> Vec<RangeAssignment> {
    assert!(workers >= 1, "at least one worker is required");

    let base = total / workers;
    let remainder = total % workers;

    let mut assignments = Vec::with_capacity(workers);
    let mut start = 0;
    for worker_id in 0..workers {
        let size = if worker_id < remainder { base + 1 } else { base };
        assignments.push(RangeAssignment {
            worker_id,
            start,
            end: start + size,
        });
        start += size;
    }
    assignments
}
