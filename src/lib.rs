//! Proxy Triage - Parallel Proxy List Checker
//!
//! Takes a list of proxy addresses and verifies, in parallel, whether each
//! one can route an HTTP request to a fixed target before a deadline.
//! Every candidate ends up classified as working, timed out or failed, and
//! every classification is appended to durable output streams.
//!
//! Certificate verification is disabled while probing; see [`checker::probe`]
//! for the trade-off.

pub mod checker;
pub mod proxy;
pub mod report;

pub use checker::*;
pub use proxy::*;

/// Application result type
pub type Result<T> = anyhow::Result<T>;
