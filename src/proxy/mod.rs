//! Proxy domain types and candidate list handling
//!
//! This module provides:
//! - The candidate, scheme and outcome models shared across the crate
//! - Parsing of candidate lists (one address per line, `#` comments)

pub mod models;
pub mod parser;

pub use models::{Candidate, Outcome, ProxyScheme};
pub use parser::CandidateParser;
