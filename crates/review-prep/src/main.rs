//! CLI entry point for the review dataset loader.

use anyhow::Result;
use clap::Parser;
use review_prep::{DataError, DatasetStats, LoaderConfig, ReviewLoader, StatsReport};
use tracing::info;

#[derive(Parser, Debug)]
#[command(
    version,
    about = "Load, clean, and summarize a product-review CSV dataset",
    long_about = "Loads a review CSV, drops rows missing essential fields, coerces\n\
                  ratings to numeric, converts review times when possible, and\n\
                  zero-fills vote columns.\n\n\
                  EXAMPLES:\n  \
                  # Clean and preview a dataset\n  \
                  review-prep -i data/raw/amazon_reviews.csv\n\n  \
                  # Reproducible 1000-row sample plus statistics\n  \
                  review-prep -i reviews.csv --sample-size 1000 --stats\n\n  \
                  # Machine-readable statistics\n  \
                  review-prep -i reviews.csv --json | jq .avg_rating"
)]
struct Args {
    /// Path to the CSV file to load
    #[arg(short, long)]
    input: String,

    /// Return a fixed-seed random sample of this many rows
    #[arg(long)]
    sample_size: Option<usize>,

    /// Seed for reproducible sampling
    #[arg(long, default_value = "42")]
    seed: u64,

    /// Number of cleaned rows to preview
    #[arg(long, default_value = "5")]
    preview: usize,

    /// Compute and print full-dataset statistics
    #[arg(short, long)]
    stats: bool,

    /// Output statistics as JSON to stdout instead of the report
    ///
    /// Disables all logging; only the JSON document is written to stdout.
    #[arg(long)]
    json: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: String,

    /// Suppress progress output (only show warnings and errors)
    #[arg(short, long)]
    quiet: bool,
}

/// Initialize the tracing subscriber for logging.
///
/// When `json_output` is true, logging is completely disabled so that stdout
/// carries nothing but the JSON document.
fn init_logging(level: &str, quiet: bool, json_output: bool) {
    if json_output {
        return;
    }

    use tracing_subscriber::EnvFilter;

    let effective_level = if quiet { "warn" } else { level };

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(effective_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(&args.log_level, args.quiet, args.json);

    let mut builder = LoaderConfig::builder(args.input.as_str()).sample_seed(args.seed);
    if let Some(n) = args.sample_size {
        builder = builder.sample_size(n);
    }
    let config = builder.build().map_err(DataError::from)?;

    // JSON mode: statistics only, nothing else on stdout
    if args.json {
        let stats = DatasetStats::collect(&config)?;
        println!("{}", StatsReport::to_json(&stats)?);
        return Ok(());
    }

    let loader = ReviewLoader::new(config.clone());
    let reviews = loader.load()?;
    info!(
        rows = reviews.height(),
        columns = reviews.width(),
        "dataset ready"
    );

    // User-facing preview; intentionally println! rather than logging
    if args.preview > 0 {
        println!("{}", reviews.head(Some(args.preview)));
    }

    if args.stats {
        let stats = DatasetStats::collect(&config)?;
        println!("{}", StatsReport::render(&stats));
    }

    Ok(())
}
