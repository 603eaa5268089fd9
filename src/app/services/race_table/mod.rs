//! Flat results table for parsed race events
//!
//! Parsed events are flattened into one record per result row and written as
//! a CSV or Parquet table through polars. The table can be loaded back and
//! regrouped into events, and filtered for display.
//!
//! ## Architecture
//!
//! - [`writer`] - `RaceTableWriter`, the event to `DataFrame` conversion and file output
//! - [`reader`] - Loading a table back into records and events
//! - [`query`] - Driver/track/year/class filters and result ordering
//! - [`source_rewrite`] - Mapping local text paths to published document URLs
//!
//! ## Usage
//!
//! ```rust,no_run
//! use mx_results::app::services::race_table::{RaceTableWriter, TableFormat, load_events};
//! # fn example(events: Vec<mx_results::RaceEvent>) -> mx_results::Result<()> {
//! let writer = RaceTableWriter::new(TableFormat::Csv).with_compact(true);
//! let summary = writer.write(&events, std::path::Path::new("race_results.csv"))?;
//! println!("Wrote {} rows", summary.rows);
//!
//! let reloaded = load_events(std::path::Path::new("race_results.csv"))?;
//! # Ok(())
//! # }
//! ```

pub mod query;
pub mod reader;
pub mod source_rewrite;
pub mod writer;

#[cfg(test)]
mod tests;

pub use query::ResultQuery;
pub use reader::{load_events, load_records};
pub use source_rewrite::SourceRewrite;
pub use writer::{RaceTableWriter, WriteSummary};

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// File format of the results table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TableFormat {
    #[default]
    Csv,
    Parquet,
}

impl TableFormat {
    /// Guess the format from a file extension, defaulting to CSV
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("parquet") || ext.eq_ignore_ascii_case("pq") => {
                TableFormat::Parquet
            }
            _ => TableFormat::Csv,
        }
    }

    /// Conventional file extension
    pub fn extension(&self) -> &'static str {
        match self {
            TableFormat::Csv => "csv",
            TableFormat::Parquet => "parquet",
        }
    }
}

impl FromStr for TableFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "csv" => Ok(TableFormat::Csv),
            "parquet" | "pq" => Ok(TableFormat::Parquet),
            _ => Err(format!(
                "Invalid table format: {}. Valid options: csv, parquet",
                s
            )),
        }
    }
}

impl fmt::Display for TableFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}
