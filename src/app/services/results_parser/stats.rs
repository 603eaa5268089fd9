//! Parsing statistics and result structures for result sheet processing
//!
//! This module provides types for tracking how the lines of one result sheet
//! were used and for returning the parsed event together with them.

use crate::app::models::RaceEvent;

/// Parsing outcome: the event (if any rows were found) plus statistics
#[derive(Debug, Clone)]
pub struct ParseOutcome {
    /// The parsed event, `None` when no result row was extracted
    pub event: Option<RaceEvent>,

    /// Line accounting for the parse
    pub stats: ParseStats,
}

/// Line accounting for one parse
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ParseStats {
    /// Number of lines scanned after line repair
    pub lines_scanned: usize,

    /// Lines consumed as header facts
    pub header_lines: usize,

    /// Results table header lines seen (repeats on later pages count too)
    pub table_headers: usize,

    /// Result rows emitted
    pub rows_emitted: usize,

    /// Lines offered to the extractor chain that produced no row
    pub lines_skipped: usize,

    /// Human-readable notes about fields that could not be resolved
    pub diagnostics: Vec<String>,
}

impl ParseStats {
    /// Create new empty statistics
    pub fn new() -> Self {
        Self::default()
    }

    /// Share of chain-scanned lines that became rows, as a percentage
    pub fn row_yield(&self) -> f64 {
        let offered = self.rows_emitted + self.lines_skipped;
        if offered == 0 {
            0.0
        } else {
            (self.rows_emitted as f64 / offered as f64) * 100.0
        }
    }
}
