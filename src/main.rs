use anyhow::Context;
use clap::Parser;
use docverify::{run_bound, verify_bounded};
use docverify_core::{EmbedderBuilder, WindowConfig, DEFAULT_EMBEDDING_DIM, DEFAULT_TOP_K};
use docverify_engine::{
    VerificationReport, Verifier, VerifierOptions, DEFAULT_ACCEPTANCE_THRESHOLD,
    DEFAULT_MIN_SCORE,
};
use docverify_similarity::GroundTruthRecord;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Verify a ground-truth record against extracted document text
#[derive(Parser, Debug)]
#[command(name = "docverify")]
#[command(about = "Audit extracted document text against a ground-truth record", long_about = None)]
struct Args {
    /// Path to the record JSON file
    #[arg(short, long)]
    record: PathBuf,

    /// Path to the extracted document text
    #[arg(short, long)]
    text: PathBuf,

    /// Window config as SIZE:OVERLAP, repeatable (default 5:0, 25:10, 100:50)
    #[arg(short, long = "window", value_name = "SIZE:OVERLAP")]
    windows: Vec<WindowConfig>,

    /// Windows retrieved per query
    #[arg(long, default_value_t = DEFAULT_TOP_K)]
    top_k: usize,

    /// Minimum confidence for a field to count as matched
    #[arg(long, default_value_t = DEFAULT_ACCEPTANCE_THRESHOLD)]
    threshold: f32,

    /// Alignments below this score count as no match at all
    #[arg(long, default_value_t = DEFAULT_MIN_SCORE)]
    min_score: f32,

    /// Compare letter case when scoring
    #[arg(long)]
    case_sensitive: bool,

    /// Embedding dimension
    #[arg(long, default_value_t = DEFAULT_EMBEDDING_DIM)]
    dim: usize,

    /// Per-config time limit in seconds; also bounds the whole run
    #[arg(long)]
    timeout_secs: Option<u64>,

    /// Log level, overridden by RUST_LOG
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Pretty-print the report
    #[arg(long)]
    pretty: bool,
}

fn log_directive(log_level: &str) -> &'static str {
    match log_level {
        "trace" => "trace",
        "debug" => "debug",
        "info" => "info",
        "warn" => "warn",
        "error" => "error",
        _ => "info",
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(log_directive(&args.log_level)));

    // stdout carries the report
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("Starting docverify v{}", env!("CARGO_PKG_VERSION"));

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;
    let result = runtime.block_on(run(args));
    // A timed-out verification is still running on the blocking pool
    runtime.shutdown_background();
    result
}

async fn run(args: Args) -> anyhow::Result<()> {
    let record_json = tokio::fs::read_to_string(&args.record)
        .await
        .with_context(|| format!("failed to read record {:?}", args.record))?;
    let record = GroundTruthRecord::from_json(&record_json)
        .with_context(|| format!("failed to parse record {:?}", args.record))?;
    let text = tokio::fs::read_to_string(&args.text)
        .await
        .with_context(|| format!("failed to read text {:?}", args.text))?;
    info!("Record: {:?}, text: {} bytes", args.record, text.len());

    let configs = if args.windows.is_empty() {
        WindowConfig::defaults()
    } else {
        args.windows.clone()
    };
    let mut options = VerifierOptions::new()
        .configs(configs)
        .top_k(args.top_k)
        .acceptance_threshold(args.threshold)
        .min_score(args.min_score)
        .case_sensitive(args.case_sensitive);
    let deadline = args.timeout_secs.map(Duration::from_secs);
    if let Some(deadline) = deadline {
        options = options.deadline(deadline);
    }
    info!(
        "Window configs: {}",
        options
            .configs
            .iter()
            .map(|c| c.to_string())
            .collect::<Vec<_>>()
            .join(", ")
    );

    let embedder = EmbedderBuilder::new().dim(args.dim).build();
    let verifier = Verifier::with_options(Arc::new(embedder), options);
    let report = verify_bounded(verifier, record, text, deadline.map(run_bound)).await?;

    print_report(&report, args.pretty)?;
    info!(
        "Verified {} configs ({} failed), all matched: {}",
        report.configs_evaluated.len(),
        report.configs_failed.len(),
        report.all_matched()
    );
    Ok(())
}

fn print_report(report: &VerificationReport, pretty: bool) -> anyhow::Result<()> {
    let json = if pretty {
        report.to_json_pretty()?
    } else {
        report.to_json()?
    };
    println!("{}", json);
    Ok(())
}
