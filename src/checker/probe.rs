//! Timeout-bounded probing of a single candidate
//!
//! A probe drives one HTTP round trip through the candidate proxy toward the
//! configured target and folds every possible failure into an [`Outcome`].
//! Probing never returns an error: a candidate that cannot even be turned
//! into a client is simply a transport failure.
//!
//! Certificate verification is disabled while probing. Candidates are
//! arbitrary third-party proxies and a probe must not fail on the TLS posture
//! of the proxy or the target. A "working" proxy is one that relays bytes,
//! not one that is trustworthy.

use crate::checker::CheckerConfig;
use crate::proxy::models::{Candidate, Outcome};
use async_trait::async_trait;
use reqwest::{redirect, Client, Proxy, StatusCode};

/// A single timeout-bounded check of one candidate
///
/// The engine depends only on this trait, so tests can drive it with
/// deterministic stand-ins.
#[async_trait]
pub trait Probe: Send + Sync {
    /// Classify one candidate
    async fn probe(&self, candidate: &Candidate) -> Outcome;
}

/// The reqwest-backed probe used for real runs
pub struct Prober {
    config: CheckerConfig,
}

impl Prober {
    pub fn new(config: CheckerConfig) -> Self {
        Self { config }
    }

    /// Build a client that routes every request through the candidate
    ///
    /// `Proxy::all` keeps an https target flowing through an http forward
    /// proxy as well. Redirects are not followed; a redirect status already
    /// proves the round trip.
    fn build_client(&self, candidate: &Candidate) -> reqwest::Result<Client> {
        let proxy = Proxy::all(candidate.proxy_url(self.config.scheme))?;

        Client::builder()
            .proxy(proxy)
            .danger_accept_invalid_certs(true)
            .redirect(redirect::Policy::none())
            .timeout(self.config.timeout)
            .build()
    }
}

#[async_trait]
impl Probe for Prober {
    async fn probe(&self, candidate: &Candidate) -> Outcome {
        let client = match self.build_client(candidate) {
            Ok(client) => client,
            Err(e) => return Outcome::TransportError(e.to_string()),
        };

        match tokio::time::timeout(
            self.config.timeout,
            client.get(&self.config.target_url).send(),
        )
        .await
        {
            Ok(Ok(response)) => classify_status(response.status()),
            // The client carries the same deadline as the outer timeout and
            // may fire first; classify both the same way.
            Ok(Err(e)) if e.is_timeout() => Outcome::TimedOut,
            Ok(Err(e)) => Outcome::TransportError(e.to_string()),
            Err(_) => Outcome::TimedOut,
        }
    }
}

/// Map a received HTTP status onto an outcome
fn classify_status(status: StatusCode) -> Outcome {
    if status.is_success() || status.is_redirection() {
        Outcome::Success
    } else {
        Outcome::NonSuccessResponse(status.as_u16())
    }
}
