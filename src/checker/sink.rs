//! Durable, append-only result streams
//!
//! A run produces two artifacts: a detail stream holding one record per
//! candidate and a good stream listing only the working addresses, ready to
//! feed back in as a fresh candidate list. Files are opened in append mode so
//! successive runs accumulate rather than overwrite.

use crate::proxy::models::{Candidate, Outcome};
use crate::Result;
use anyhow::{anyhow, Context};
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::Path;
use std::sync::Mutex;

/// Append-only store for per-candidate outcomes
///
/// Workers append concurrently; a mutex per stream serializes the writes so
/// records never interleave or tear. The lock is only ever held across a
/// synchronous write, never across an await point.
pub struct ResultSink {
    detail: Mutex<File>,
    good: Mutex<File>,
}

impl ResultSink {
    /// Open (creating if needed) the two output streams in append mode
    pub fn create<P: AsRef<Path>, Q: AsRef<Path>>(detail_path: P, good_path: Q) -> Result<Self> {
        Ok(Self {
            detail: Mutex::new(open_append(detail_path.as_ref())?),
            good: Mutex::new(open_append(good_path.as_ref())?),
        })
    }

    /// Record one candidate's outcome
    ///
    /// Every candidate lands in the detail stream; a working proxy is also
    /// appended to the good stream as a bare address.
    pub fn append(&self, candidate: &Candidate, outcome: &Outcome) -> Result<()> {
        let record = detail_record(candidate, outcome);
        {
            let mut detail = self
                .detail
                .lock()
                .map_err(|_| anyhow!("detail stream lock poisoned"))?;
            writeln!(detail, "{}", record)?;
        }

        if outcome.is_success() {
            let mut good = self
                .good
                .lock()
                .map_err(|_| anyhow!("good stream lock poisoned"))?;
            writeln!(good, "{}", candidate.address)?;
        }

        Ok(())
    }
}

fn open_append(path: &Path) -> Result<File> {
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("failed to open output stream {}", path.display()))
}

/// Render one detail-stream record
fn detail_record(candidate: &Candidate, outcome: &Outcome) -> String {
    match outcome {
        Outcome::Success => format!("good{}", candidate.address),
        Outcome::NonSuccessResponse(_) => format!("Bad : {}", candidate.address),
        Outcome::TimedOut => format!("Timedout : {}", candidate.address),
        Outcome::TransportError(message) => format!("Error : {}: {}", candidate.address, message),
    }
}
