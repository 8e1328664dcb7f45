use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use rureport::{Report, ResultAggregator};
use rureport::config::{ConfigLoader, ReporterConfig};
use rureport::runner::{SummaryPrinter, replay_events};
use std::fs::File;
use std::io::{self, BufReader};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Replay newline-delimited host events and emit one report per run
    Ingest(IngestArgs),
}

#[derive(clap::Args, Debug, Default)]
pub struct IngestArgs {
    /// Event file; reads stdin when omitted
    pub events: Option<PathBuf>,

    /// Write the report to this file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Finish the file write before reading further events
    #[arg(long)]
    pub sync: bool,

    /// Reporter config file (default: search for rureport.toml)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Print a summary table to stderr after each run
    #[arg(long)]
    pub summary: bool,

    /// Include failing tests and browser errors in the summary
    #[arg(short, long)]
    pub verbose: bool,
}

/// Config file, then environment, then command line flags
pub fn resolve_config(args: &IngestArgs) -> Result<ReporterConfig> {
    let base = match &args.config {
        Some(path) => ConfigLoader::load_from_path(path)?,
        None => ConfigLoader::find_and_load().unwrap_or_default(),
    };

    let mut config = ConfigLoader::with_env_overrides(base);
    if let Some(output) = &args.output {
        config.output_file = Some(output.clone());
    }
    if args.sync {
        config.is_synchronous = true;
    }
    Ok(config)
}

pub async fn ingest(args: IngestArgs) -> Result<()> {
    let config = resolve_config(&args)?;
    tracing::debug!("Reporter config: {:?}", config);

    let mut aggregator = ResultAggregator::new(config);
    let events = args.events.clone();
    let (mut aggregator, reports) = tokio::task::spawn_blocking(move || {
        let reports = read_events(events.as_deref(), &mut aggregator);
        (aggregator, reports)
    })
    .await?;

    // Writes started before a failure still land
    aggregator.flush().await;
    let reports = reports?;

    if args.summary {
        let printer = SummaryPrinter::new(args.verbose);
        for report in &reports {
            printer.print(report);
        }
    }

    Ok(())
}

fn read_events(events: Option<&Path>, aggregator: &mut ResultAggregator) -> Result<Vec<Report>> {
    let reports = match events {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("Cannot open event file {}", path.display()))?;
            replay_events(BufReader::new(file), aggregator)?
        }
        None => replay_events(io::stdin().lock(), aggregator)?,
    };
    Ok(reports)
}
