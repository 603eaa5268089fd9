//! Result sheet parser entry points
//!
//! This module handles reading a sheet, repairing split lines and driving a
//! fresh `ParseSession` over every line.

use std::path::Path;
use tracing::{debug, info, warn};

use super::line_repair::repair_split_lines;
use super::session::ParseSession;
use super::stats::ParseOutcome;
use crate::{Error, Result};

/// Parser for text extracted from motocross result sheets
///
/// The parser itself holds only configuration; all scan state lives in a
/// session created per call, so one parser can be shared across threads.
#[derive(Debug, Clone, Default)]
pub struct ResultsParser {
    track_name: Option<String>,
}

impl ResultsParser {
    /// Create a parser that discovers the track name from the text
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a known track name instead of the one found on the sheet
    pub fn with_track_name(mut self, track_name: impl Into<String>) -> Self {
        self.track_name = Some(track_name.into());
        self
    }

    /// Parse already-extracted text
    pub fn parse_text(&self, content: &str, source: &str) -> ParseOutcome {
        let repaired = repair_split_lines(content);
        let mut session = ParseSession::new(self.track_name.clone());

        for line in repaired.lines() {
            session.feed_line(line);
        }

        let outcome = session.finish(source);
        match &outcome.event {
            Some(event) => debug!("Parsed {} rows from {}", event.rows.len(), source),
            None => debug!("No result rows found in {}", source),
        }
        outcome
    }

    /// Read and parse a text file
    pub fn parse_file(&self, path: &Path) -> Result<ParseOutcome> {
        if !path.exists() {
            warn!("File {} does not exist.", path.display());
            return Err(Error::source_not_found(path.display().to_string()));
        }

        info!("Parsing result sheet: {}", path.display());
        let bytes = std::fs::read(path)
            .map_err(|e| Error::io(format!("Failed to read file {}", path.display()), e))?;
        let content = String::from_utf8_lossy(&bytes);

        Ok(self.parse_text(&content, &path.display().to_string()))
    }
}
