mod cli;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    rureport::logger::init_logger();

    let cli = Cli::parse();
    match cli.command {
        Commands::Ingest(args) => cli::ingest(args).await?,
    }
    Ok(())
}
