//! Engine-level tests for the concurrent checker
//!
//! Note: Probing is driven through a deterministic mock so these tests need
//! no external network. The only test that opens a socket talks to a local
//! listener that never responds. The load tests run on a multi-thread
//! runtime so workers race across OS threads, not just interleave.

use async_trait::async_trait;
use proxy_triage::checker::{
    CheckSummary, Checker, CheckerConfig, Probe, ProgressTracker, ResultSink,
};
use proxy_triage::proxy::{Candidate, Outcome, ProxyScheme};
use std::fs;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tempfile::tempdir;

/// Classifies candidates from their port number alone: 0 mod 4 is working,
/// 1 mod 4 times out, 2 mod 4 fails transport, 3 mod 4 gets a bad status.
struct MockProbe;

#[async_trait]
impl Probe for MockProbe {
    async fn probe(&self, candidate: &Candidate) -> Outcome {
        // Yield so workers genuinely interleave
        tokio::task::yield_now().await;
        match port_of(candidate) % 4 {
            0 => Outcome::Success,
            1 => Outcome::TimedOut,
            2 => Outcome::TransportError("connection refused".to_string()),
            _ => Outcome::NonSuccessResponse(502),
        }
    }
}

fn port_of(candidate: &Candidate) -> u32 {
    candidate
        .address
        .rsplit(':')
        .next()
        .and_then(|p| p.parse().ok())
        .unwrap_or(0)
}

fn synthetic_candidates(total: usize) -> Vec<Candidate> {
    (0..total)
        .map(|i| Candidate::new(format!("10.0.{}.{}:{}", i / 250, i % 250 + 1, 10_000 + i)))
        .collect()
}

fn read_lines(path: &Path) -> Vec<String> {
    fs::read_to_string(path)
        .unwrap()
        .lines()
        .map(str::to_string)
        .collect()
}

/// Run the engine over `candidates` with the mock probe and hand back the
/// summary plus both output streams.
async fn run_mock(
    candidates: Vec<Candidate>,
    workers: usize,
    dir: &Path,
) -> (CheckSummary, Vec<String>, Vec<String>) {
    let detail_path = dir.join("details.txt");
    let good_path = dir.join("goods.txt");

    let sink = Arc::new(ResultSink::create(&detail_path, &good_path).unwrap());
    let tracker = Arc::new(ProgressTracker::new(candidates.len()));
    let checker = Checker::with_config(CheckerConfig::new().with_workers(workers));

    let summary = checker
        .run_with_probe(Arc::new(MockProbe), candidates, sink, Arc::clone(&tracker))
        .await
        .unwrap();

    // Counters must have converged once the run returns
    let snapshot = tracker.snapshot();
    assert_eq!(snapshot.remaining, 0);
    assert_eq!(snapshot.success, summary.good);

    (summary, read_lines(&detail_path), read_lines(&good_path))
}

#[tokio::test(flavor = "multi_thread", worker_threads = 8)]
async fn test_every_candidate_gets_exactly_one_record() {
    let dir = tempdir().unwrap();
    let candidates = synthetic_candidates(200);
    let addresses: Vec<String> = candidates.iter().map(|c| c.address.clone()).collect();

    let (summary, detail, good) = run_mock(candidates, 7, dir.path()).await;

    assert_eq!(summary.total, 200);
    assert_eq!(detail.len(), 200);
    assert_eq!(good.len(), summary.good);

    // Each detail record embeds its candidate address exactly once
    for address in &addresses {
        let count = detail.iter().filter(|line| line.contains(address)).count();
        assert_eq!(count, 1, "expected one record for {address}");
    }

    // The good stream holds bare addresses of working candidates only
    for line in &good {
        assert!(addresses.contains(line));
        assert_eq!(port_of(&Candidate::new(line.clone())) % 4, 0);
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 8)]
async fn test_many_workers_match_single_worker_results() {
    let concurrent_dir = tempdir().unwrap();
    let sequential_dir = tempdir().unwrap();
    let candidates = synthetic_candidates(1000);

    let (concurrent, mut concurrent_detail, mut concurrent_good) =
        run_mock(candidates.clone(), 50, concurrent_dir.path()).await;
    let (sequential, mut sequential_detail, mut sequential_good) =
        run_mock(candidates, 1, sequential_dir.path()).await;

    assert_eq!(concurrent.total, 1000);
    assert_eq!(concurrent.good, 250);
    assert_eq!(concurrent.good, sequential.good);

    // Record order differs across workers but the record sets must not
    concurrent_detail.sort();
    sequential_detail.sort();
    assert_eq!(concurrent_detail, sequential_detail);

    concurrent_good.sort();
    sequential_good.sort();
    assert_eq!(concurrent_good, sequential_good);
}

#[tokio::test]
async fn test_empty_candidate_list() {
    let dir = tempdir().unwrap();
    let (summary, detail, good) = run_mock(Vec::new(), 5, dir.path()).await;

    assert_eq!(summary.total, 0);
    assert_eq!(summary.good, 0);
    assert!(detail.is_empty());
    assert!(good.is_empty());
}

#[tokio::test]
async fn test_more_workers_than_candidates() {
    let dir = tempdir().unwrap();
    let (summary, detail, _) = run_mock(synthetic_candidates(3), 8, dir.path()).await;

    assert_eq!(summary.total, 3);
    assert_eq!(detail.len(), 3);
}

#[tokio::test]
async fn test_unresponsive_proxy_is_recorded_as_timed_out() {
    // A listener that accepts and then stays silent, so the probe can only
    // end by deadline
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        loop {
            let Ok((socket, _)) = listener.accept().await else {
                break;
            };
            tokio::spawn(async move {
                let _socket = socket;
                tokio::time::sleep(Duration::from_secs(600)).await;
            });
        }
    });

    let dir = tempdir().unwrap();
    let detail_path = dir.path().join("details.txt");
    let good_path = dir.path().join("goods.txt");

    let sink = Arc::new(ResultSink::create(&detail_path, &good_path).unwrap());
    let tracker = Arc::new(ProgressTracker::new(1));
    let config = CheckerConfig::new()
        .with_scheme(ProxyScheme::Http)
        .with_timeout(Duration::from_secs(1))
        .with_workers(1);

    let summary = Checker::with_config(config)
        .run(
            vec![Candidate::new(addr.to_string())],
            sink,
            Arc::clone(&tracker),
        )
        .await
        .unwrap();

    assert_eq!(summary.total, 1);
    assert_eq!(summary.good, 0);
    assert_eq!(tracker.snapshot().remaining, 0);
    assert_eq!(read_lines(&detail_path), vec![format!("Timedout : {addr}")]);
    assert!(read_lines(&good_path).is_empty());
}
