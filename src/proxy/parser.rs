//! Candidate list parsing
//!
//! The input is a plain text file with one proxy address per line. Parsing is
//! deliberately shallow: lines are trimmed, blanks and `#` comments are
//! skipped, and everything else becomes a candidate as-is. A malformed address
//! is not filtered here but classified by the probe, so the detail stream ends
//! up with exactly one record per candidate kept from the list.

use crate::proxy::models::Candidate;
use crate::Result;
use anyhow::Context;
use std::fs;
use std::path::Path;

/// Parser for candidate list files
pub struct CandidateParser;

impl CandidateParser {
    /// Parse a single line into a candidate
    pub fn parse_line(line: &str) -> Option<Candidate> {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return None;
        }
        Some(Candidate::new(line))
    }

    /// Parse candidates from a string (multiple lines)
    pub fn parse_string(content: &str) -> Vec<Candidate> {
        content.lines().filter_map(Self::parse_line).collect()
    }

    /// Load candidates from a file
    pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<Vec<Candidate>> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read candidate list {}", path.display()))?;
        Ok(Self::parse_string(&content))
    }
}
