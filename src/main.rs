mod aggregation;
mod engine;
mod models;
mod publish;
mod storage;
mod transform;
mod types;
mod validation;

use std::io::{stderr, stdout, BufWriter, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;

use anyhow::Result;
use chrono::{Local, NaiveDate};
use clap::Parser;
use tracing::info;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, Layer};

use crate::engine::{Pipeline, PipelineConfig, PublishConfig, RunReport, DEFAULT_OUTPUT_ROOT, DEFAULT_PREFIX};
use crate::publish::StoreTarget;

const EXIT_PUBLISH_FAILED: u8 = 3;

/// Validate, normalize, partition and aggregate a batch of raw transactions.
#[derive(Debug, Parser)]
#[command(version)]
struct Args {
    /// Raw transactions CSV with a header row
    #[arg(default_value = "data/raw/transactions.csv")]
    source: PathBuf,

    /// Directory that receives `date=<YYYY-MM-DD>` partitions
    #[arg(long, default_value = DEFAULT_OUTPUT_ROOT)]
    output_root: PathBuf,

    /// Partition date (YYYY-MM-DD); defaults to today
    #[arg(long)]
    processing_date: Option<NaiveDate>,

    /// Number of shards validated and transformed concurrently
    #[arg(long, default_value_t = 1)]
    workers: usize,

    /// error, warn, info, debug or trace
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Upload the written partition to the object store
    #[arg(long, env = "PUBLISH_ENABLED")]
    publish: bool,

    /// Destination bucket
    #[arg(long, env = "PUBLISH_BUCKET")]
    bucket: Option<String>,

    /// Destination key prefix
    #[arg(long, env = "PUBLISH_PREFIX", default_value = DEFAULT_PREFIX)]
    prefix: String,

    /// http(s) URL of the object store, or a local directory to mirror into
    #[arg(long, env = "PUBLISH_ENDPOINT")]
    endpoint: Option<String>,

    /// Bearer token sent with each upload
    #[arg(long, env = "PUBLISH_TOKEN", hide_env_values = true)]
    token: Option<String>,
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let _ = dotenv::dotenv();
    let args = Args::parse();

    setup_logging(parse_log_level(&args.log_level));

    let processing_date = args.processing_date.unwrap_or_else(|| Local::now().date_naive());
    let config = PipelineConfig::new(&args.output_root)
        .with_workers(args.workers)
        .with_publish(PublishConfig {
            enabled: args.publish,
            bucket: args.bucket.clone(),
            prefix: args.prefix.clone()
        });

    let store = StoreTarget::from_endpoint(args.endpoint.as_deref(), args.token.clone());
    let pipeline = Pipeline::new(config, store);

    let timer = Instant::now();
    let report = pipeline.run(&args.source, processing_date).await?;
    let duration = timer.elapsed();

    info!("Processed partition [{processing_date}] in: {duration:?}");

    write_report_to_stdout(&report)?;

    if report.publish.is_failure() {
        return Ok(ExitCode::from(EXIT_PUBLISH_FAILED));
    }

    Ok(ExitCode::SUCCESS)
}

fn parse_log_level(level: &str) -> LevelFilter {
    match level.to_lowercase().as_str() {
        "trace" => LevelFilter::TRACE,
        "debug" => LevelFilter::DEBUG,
        "info" => LevelFilter::INFO,
        "warn" => LevelFilter::WARN,
        "error" => LevelFilter::ERROR,
        _ => {
            eprintln!("Invalid log level '{}', defaulting to 'info'", level);
            LevelFilter::INFO
        }
    }
}

fn setup_logging(level: LevelFilter) {
    //NOTE: stdout carries the run report, so logs go to stderr
    let terminal_log = fmt::layer()
        .with_target(false)
        .with_writer(stderr)
        .with_filter(level);

    tracing_subscriber::registry()
        .with(terminal_log)
        .init();
}

fn write_report_to_stdout(report: &RunReport) -> Result<()> {
    let mut output = BufWriter::new(stdout().lock());

    writeln!(output, "{report}")?;

    output.flush()?;

    Ok(())
}
