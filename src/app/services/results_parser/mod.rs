//! Result sheet parser for AMA motocross results
//!
//! This module turns text extracted from a result PDF into a [`RaceEvent`].
//! The text is noisy: columns vary between sheets, rows wrap, fields go
//! missing and page headers bleed into the body. Parsing is a single pass
//! over the lines with explicit per-document state.
//!
//! ## Architecture
//!
//! - [`line_repair`] - Joins rows that text extraction split over two lines
//! - [`header`] - Track, location, round, date, class and result kind
//! - [`column_chain`] - Extractor chain chosen from the table header
//! - [`field_extractors`] - One extraction rule per field kind
//! - [`session`] - Per-document state and event assembly
//! - [`parser`] - File reading and orchestration
//! - [`stats`] - Line accounting and the parse outcome
//!
//! ## Usage
//!
//! ```rust
//! use mx_results::app::services::results_parser::ResultsParser;
//!
//! let text = "Hangtown - Sacramento, CA\nPOS # NAME BIKE\n1 22 John Smith Honda 450";
//! let outcome = ResultsParser::new().parse_text(text, "hangtown.txt");
//! let event = outcome.event.expect("one row was parsed");
//! assert_eq!(event.rows[0].driver_name, "John Smith");
//! ```

pub mod column_chain;
pub mod field_extractors;
pub mod header;
pub mod line_repair;
pub mod parser;
pub mod session;
pub mod stats;
pub mod text;

#[cfg(test)]
pub mod tests;

// Re-export main types for easy access
pub use column_chain::{ColumnChain, FieldKind};
pub use header::HeaderLocator;
pub use parser::ResultsParser;
pub use session::ParseSession;
pub use stats::{ParseOutcome, ParseStats};

use crate::Result;
use crate::app::models::RaceEvent;
use std::path::Path;

/// Parse extracted text into a race event, if it holds any result rows
pub fn parse_text(content: &str, source: &str) -> Option<RaceEvent> {
    ResultsParser::new().parse_text(content, source).event
}

/// Parse a text file into a race event, optionally with a known track name
pub fn parse_file(path: &Path, track_name: Option<&str>) -> Result<Option<RaceEvent>> {
    let parser = match track_name {
        Some(track) => ResultsParser::new().with_track_name(track),
        None => ResultsParser::new(),
    };
    Ok(parser.parse_file(path)?.event)
}
