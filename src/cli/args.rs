//! Command-line argument definitions for the results parser
//!
//! This module defines the CLI interface using the clap derive API.

use crate::Result;
use crate::app::models::Listing;
use crate::app::services::race_table::TableFormat;
use crate::Error;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// CLI arguments for the motocross results parser
///
/// Turns text extracted from AMA motocross result PDFs into structured race
/// events and a flat results table.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "mx-results",
    version,
    about = "Parse AMA motocross result sheets into structured results",
    long_about = "Parses text extracted from AMA motocross result PDFs (one text file per \
                  sheet), recovers the event header and the finishing order, and exports \
                  the results as a CSV or Parquet table that can be filtered and listed."
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Path to configuration file
    ///
    /// JSON configuration file. If not specified, looks for
    /// <config dir>/mx-results/config.json
    #[arg(
        short = 'c',
        long = "config",
        value_name = "FILE",
        global = true,
        help = "Path to configuration file (JSON format)"
    )]
    pub config_file: Option<PathBuf>,

    /// Logging verbosity level
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        global = true,
        help = "Increase logging verbosity (-v: info, -vv: debug, -vvv: trace)"
    )]
    pub verbose: u8,

    /// Suppress output except errors
    #[arg(
        short = 'q',
        long = "quiet",
        global = true,
        conflicts_with = "verbose",
        help = "Suppress output except errors"
    )]
    pub quiet: bool,
}

/// Available subcommands
#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Parse result sheets and print the events
    Parse(ParseArgs),
    /// Parse a directory of result sheets and write the results table
    Export(ExportArgs),
    /// Filter an exported results table and print listings
    Show(ShowArgs),
}

/// Arguments for the parse command
#[derive(Debug, Clone, Parser)]
pub struct ParseArgs {
    /// Text files extracted from result PDFs
    #[arg(value_name = "FILES", required = true, num_args = 1..)]
    pub files: Vec<PathBuf>,

    /// Track name to use instead of the one found on the sheet
    #[arg(short = 't', long = "track", value_name = "NAME")]
    pub track: Option<String>,

    /// How many rows to print per event
    #[arg(
        short = 'l',
        long = "listing",
        value_name = "LISTING",
        default_value = "all",
        help = "Rows to print per event: top3, top10 or all"
    )]
    pub listing: Listing,

    /// Print line accounting and unresolved fields for each sheet
    #[arg(long = "stats")]
    pub stats: bool,
}

/// Arguments for the export command
#[derive(Debug, Clone, Parser)]
pub struct ExportArgs {
    /// Directory holding extracted result sheets
    #[arg(
        short = 'i',
        long = "input",
        value_name = "PATH",
        default_value = ".",
        help = "Directory (or single file) with extracted result sheets"
    )]
    pub input_path: PathBuf,

    /// Output file for the results table
    #[arg(short = 'o', long = "output", value_name = "FILE")]
    pub output_path: Option<PathBuf>,

    /// Table format; defaults to the output extension, then the configuration
    #[arg(short = 'f', long = "format", value_name = "FORMAT")]
    pub format: Option<TableFormat>,

    /// Drop the round, result kind and hometown columns
    #[arg(long = "compact")]
    pub compact: bool,

    /// Number of sheets parsed concurrently
    #[arg(short = 'j', long = "workers", value_name = "COUNT")]
    pub workers: Option<usize>,

    /// Glob pattern for sheet file names
    #[arg(short = 'p', long = "pattern", value_name = "GLOB")]
    pub pattern: Option<String>,

    /// Track name to use for every sheet
    #[arg(short = 't', long = "track", value_name = "NAME")]
    pub track: Option<String>,
}

/// Arguments for the show command
#[derive(Debug, Clone, Parser)]
pub struct ShowArgs {
    /// Results table written by `export`
    #[arg(long = "table", value_name = "FILE")]
    pub table: PathBuf,

    /// Only events (or rows) of this driver
    #[arg(short = 'd', long = "driver", value_name = "NAME")]
    pub driver: Option<String>,

    /// Only events at this track
    #[arg(short = 't', long = "track", value_name = "NAME")]
    pub track: Option<String>,

    /// Only events in this year
    #[arg(short = 'y', long = "year", value_name = "YEAR")]
    pub year: Option<u16>,

    /// Only events of this class
    #[arg(long = "class", value_name = "CLASS")]
    pub class_name: Option<String>,

    /// How many rows to print per event
    #[arg(
        short = 'l',
        long = "listing",
        value_name = "LISTING",
        default_value = "all",
        help = "Rows to print per event: top3, top10 or all"
    )]
    pub listing: Listing,
}

impl Args {
    /// Log level from the flags, falling back to the configured level
    pub fn get_log_level(&self, configured: &str) -> String {
        if self.quiet {
            return "error".to_string();
        }
        match self.verbose {
            0 => configured.to_string(),
            1 => "info".to_string(),
            2 => "debug".to_string(),
            _ => "trace".to_string(),
        }
    }

    /// Progress bars are hidden in quiet mode
    pub fn show_progress(&self) -> bool {
        !self.quiet
    }
}

impl ExportArgs {
    /// Validate the export arguments for consistency
    pub fn validate(&self) -> Result<()> {
        if !self.input_path.exists() {
            return Err(Error::configuration(format!(
                "Input path does not exist: {}",
                self.input_path.display()
            )));
        }

        if self.workers == Some(0) {
            return Err(Error::configuration(
                "Number of workers must be greater than 0",
            ));
        }

        if let Some(output) = &self.output_path {
            if output.is_dir() {
                return Err(Error::configuration(format!(
                    "Output path is a directory: {}",
                    output.display()
                )));
            }
        }

        Ok(())
    }
}
