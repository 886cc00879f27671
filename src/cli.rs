use std::io::Read;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use log::info;

use crate::error::{CIRecordError, Result};
use crate::event::EventSnapshot;
use crate::record::{BuildRecordBuilder, NamingConvention, RecordConfig};

#[derive(Parser)]
#[command(name = "cirecord")]
#[command(author, version, about = "CI Build Record Enrichment Tool", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output file path (defaults to stdout)
    #[arg(short, long, global = true)]
    output: Option<PathBuf>,

    /// Pretty print JSON output
    #[arg(short, long, global = true, default_value_t = false)]
    pretty: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Enrich a build-completion event into a JSON log record
    Enrich {
        /// Event snapshot JSON file (defaults to stdin)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Reference instant for duration computation, RFC 3339 (defaults to now)
        #[arg(short, long)]
        reference_time: Option<String>,

        /// Naming convention overrides (JSON file)
        #[arg(short, long)]
        convention: Option<PathBuf>,

        /// Include the list of redacted variable keys in the record
        #[arg(long, default_value_t = false)]
        include_redacted_keys: bool,
    },
}

impl Cli {
    pub fn execute(&self) -> Result<()> {
        match &self.command {
            Commands::Enrich {
                input,
                reference_time,
                convention,
                include_redacted_keys,
            } => {
                let event = read_event(input.as_deref())?;
                info!(
                    "Enriching build-completion event for project: {}",
                    event.project_name
                );

                // The builder never reads a clock; resolve the instant here
                let reference = match reference_time {
                    Some(raw) => DateTime::parse_from_rfc3339(raw)?.with_timezone(&Utc),
                    None => Utc::now(),
                };

                let config = RecordConfig {
                    convention: load_convention(convention.as_deref())?,
                    include_redacted_keys: *include_redacted_keys,
                    ..RecordConfig::default()
                };
                let record = BuildRecordBuilder::new(config).build(&event, reference);

                // Serialize to JSON
                let json_output = if self.pretty {
                    serde_json::to_string_pretty(&record)?
                } else {
                    serde_json::to_string(&record)?
                };

                // Write to output
                if let Some(output_path) = &self.output {
                    std::fs::write(output_path, json_output)?;
                    info!("Record written to: {}", output_path.display());
                } else {
                    println!("{}", json_output);
                }

                Ok(())
            }
        }
    }
}

fn read_event(input: Option<&Path>) -> Result<EventSnapshot> {
    let text = match input {
        Some(path) => std::fs::read_to_string(path)?,
        None => {
            let mut buffer = String::new();
            std::io::stdin().read_to_string(&mut buffer)?;
            buffer
        }
    };

    serde_json::from_str(&text).map_err(|e| CIRecordError::EventError(e.to_string()))
}

fn load_convention(path: Option<&Path>) -> Result<NamingConvention> {
    match path {
        Some(path) => {
            let text = std::fs::read_to_string(path)?;
            serde_json::from_str(&text).map_err(|e| CIRecordError::ConventionError(e.to_string()))
        }
        None => Ok(NamingConvention::default()),
    }
}
