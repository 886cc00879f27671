mod cli;
mod error;
mod event;
mod models;
mod record;

use anyhow::Result;
use clap::Parser;
use cli::Cli;
use log::info;

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    info!("Starting CIRecord - Build Record Enrichment Tool");
    cli.execute()?;

    Ok(())
}
