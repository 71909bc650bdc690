//! Sumi-Sift main entry point
//!
//! This is the command-line interface for the Sumi-Sift page fetcher.

use anyhow::{bail, Context};
use clap::Parser;
use std::path::{Path, PathBuf};
use sumi_sift::config::{load_config, Config};
use sumi_sift::crawler::{Crawler, Mode};
use sumi_sift::output::{write_export, write_statistics, BatchStatistics, ExportFormat};
use tracing_subscriber::EnvFilter;

/// Sumi-Sift: fetch pages and sift out their content and links
///
/// URLs are crawled one at a time with a politeness delay between
/// requests. URLs without a scheme get `https://`. Results are exported as
/// JSON or Markdown to a file or stdout.
#[derive(Parser, Debug)]
#[command(name = "sumi-sift")]
#[command(version = "1.0.0")]
#[command(about = "Fetch pages and sift out their content and links", long_about = None)]
struct Cli {
    /// URLs to crawl
    #[arg(value_name = "URL")]
    urls: Vec<String>,

    /// File with additional URLs, one per line
    #[arg(short, long, value_name = "FILE")]
    input: Option<PathBuf>,

    /// Path to TOML configuration file
    #[arg(short, long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Content extraction mode (overrides config)
    #[arg(short, long, value_enum)]
    mode: Option<Mode>,

    /// Export format (overrides config)
    #[arg(short, long, value_enum)]
    format: Option<ExportFormat>,

    /// Export destination (overrides config); stdout when absent
    #[arg(short, long, value_name = "PATH")]
    output: Option<PathBuf>,

    /// Print batch statistics after crawling
    #[arg(long)]
    stats: bool,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    let config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            load_config(path)
                .with_context(|| format!("failed to load configuration {}", path.display()))?
        }
        None => Config::default(),
    };

    let urls = collect_urls(&cli.urls, cli.input.as_deref())?;
    if urls.iter().all(|url| url.trim().is_empty()) {
        bail!("no URLs given; pass them as arguments or with --input");
    }

    let mode = cli.mode.unwrap_or(config.crawler.mode);
    let format = cli.format.unwrap_or(config.output.format);
    let output_path = cli
        .output
        .clone()
        .or_else(|| config.output.path.as_ref().map(PathBuf::from));

    let crawler = Crawler::from_config(&config).context("failed to build HTTP client")?;
    tracing::debug!("Politeness delay: {:?}", crawler.delay());
    let results = crawler.crawl_many(&urls, mode).await;

    write_export(&results, format, output_path.as_deref()).context("failed to export results")?;

    if cli.stats {
        let stats = BatchStatistics::from_results(&results);
        let written = match StatsTarget::for_export(output_path.as_deref()) {
            StatsTarget::Stdout => write_statistics(&mut std::io::stdout().lock(), &stats, &results),
            StatsTarget::Stderr => write_statistics(&mut std::io::stderr().lock(), &stats, &results),
        };
        written.context("failed to write statistics")?;
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
///
/// Logs go to stderr so exports written to stdout stay clean.
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("sumi_sift=info,warn"),
            1 => EnvFilter::new("sumi_sift=debug,info"),
            2 => EnvFilter::new("sumi_sift=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Where the `--stats` report goes
#[derive(Debug, PartialEq, Eq)]
enum StatsTarget {
    Stdout,
    Stderr,
}

impl StatsTarget {
    /// Keeps stdout clean when the export itself is written there
    fn for_export(output_path: Option<&Path>) -> Self {
        match output_path {
            Some(_) => Self::Stdout,
            None => Self::Stderr,
        }
    }
}

/// Gathers URLs from arguments followed by the lines of the input file
fn collect_urls(args: &[String], input: Option<&Path>) -> anyhow::Result<Vec<String>> {
    let mut urls = args.to_vec();

    if let Some(path) = input {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read URL file {}", path.display()))?;
        urls.extend(content.lines().map(str::to_string));
    }

    Ok(urls)
}
