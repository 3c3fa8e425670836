use clap::Parser;
use proxy_triage::checker::{Checker, CheckerConfig, ProgressTracker, ResultSink};
use proxy_triage::proxy::{CandidateParser, ProxyScheme};
use proxy_triage::report::{self, ProgressReporter};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

/// A multi-threaded proxy checker that sorts a proxy list into working and dead
#[derive(Parser)]
#[command(name = "proxy-triage")]
#[command(about = "Checks every proxy in a list against a target URL, in parallel")]
struct Cli {
    /// Input file containing proxies, one address per line
    #[arg(default_value = "proxies.txt")]
    input: PathBuf,

    /// Proxy scheme (http, https, socks4, socks5)
    #[arg(short = 't', long, default_value = "http")]
    proxy_type: String,

    /// URL to test proxies against
    #[arg(long, default_value = "http://httpbin.org/ip")]
    test_url: String,

    /// Number of concurrent workers
    #[arg(short = 'n', long, default_value_t = 10)]
    workers: usize,

    /// Timeout in seconds for each probe
    #[arg(long, default_value_t = 10)]
    timeout: u64,

    /// Output file receiving one record per candidate
    #[arg(long, default_value = "details.txt")]
    details: PathBuf,

    /// Output file receiving working proxies only
    #[arg(long, default_value = "goods.txt")]
    good: PathBuf,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run() -> proxy_triage::Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.verbose);

    let scheme: ProxyScheme = cli.proxy_type.parse()?;
    let config = CheckerConfig::new()
        .with_scheme(scheme)
        .with_target_url(cli.test_url)
        .with_timeout(Duration::from_secs(cli.timeout))
        .with_workers(cli.workers);

    let candidates = CandidateParser::parse_file(&cli.input)?;
    report::print_header(candidates.len(), &cli.input, &config);

    let sink = Arc::new(ResultSink::create(&cli.details, &cli.good)?);
    let tracker = Arc::new(ProgressTracker::new(candidates.len()));
    let reporter = ProgressReporter::spawn(Arc::clone(&tracker));

    let checker = Checker::with_config(config);
    let outcome = checker.run(candidates, sink, Arc::clone(&tracker)).await;

    // Clear the progress bar before printing anything else, even on failure
    reporter.finish();
    let summary = outcome?;
    report::print_summary(&summary);

    Ok(())
}

fn setup_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("proxy_triage=debug,warn")
    } else {
        EnvFilter::new("proxy_triage=info,warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}
