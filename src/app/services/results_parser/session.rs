//! Per-document parse state
//!
//! A `ParseSession` owns everything that changes while one result sheet is
//! scanned: the header facts, the active extractor chain, the expected next
//! position and the rows collected so far. Sessions share nothing, so any
//! number of documents can be parsed at the same time.

use tracing::{debug, warn};

use super::column_chain::{ColumnChain, FieldKind, is_table_header};
use super::field_extractors::{Extracted, FieldValue, extract};
use super::header::HeaderLocator;
use super::stats::{ParseOutcome, ParseStats};
use crate::app::models::{RaceEvent, ResultRow};

/// Mutable state for scanning one result sheet
#[derive(Debug)]
pub struct ParseSession {
    header: HeaderLocator,
    chain: Option<ColumnChain>,
    expected_position: u32,
    rows: Vec<ResultRow>,
    stats: ParseStats,
}

/// Fields gathered from one line before it becomes a row
#[derive(Debug, Default)]
struct RowDraft {
    position: Option<u32>,
    number: Option<u16>,
    driver_name: Option<String>,
    hometown: Option<String>,
    bike: Option<String>,
}

impl RowDraft {
    fn set(&mut self, value: FieldValue) {
        match value {
            FieldValue::Position(position) => self.position = Some(position),
            FieldValue::Number(number) => self.number = Some(number),
            FieldValue::DriverName(name) => self.driver_name = Some(name),
            FieldValue::Hometown(hometown) => self.hometown = Some(hometown),
            FieldValue::Bike(bike) => self.bike = Some(bike),
        }
    }

    fn into_row(self) -> Option<ResultRow> {
        let position = self.position?;
        let number = self.number?;
        let driver_name = self.driver_name?;
        ResultRow::new(position, number, driver_name, self.hometown, self.bike).ok()
    }
}

impl ParseSession {
    /// Start a fresh session, optionally with an externally known track name
    pub fn new(track_name: Option<String>) -> Self {
        Self {
            header: HeaderLocator::new(track_name),
            chain: None,
            expected_position: 1,
            rows: Vec::new(),
            stats: ParseStats::new(),
        }
    }

    /// Position the next emitted row must carry
    pub fn expected_position(&self) -> u32 {
        self.expected_position
    }

    /// The extractor chain, once the table header has been seen
    pub fn chain(&self) -> Option<&ColumnChain> {
        self.chain.as_ref()
    }

    /// Rows emitted so far
    pub fn rows(&self) -> &[ResultRow] {
        &self.rows
    }

    /// Scan one line of the (repaired) document
    pub fn feed_line(&mut self, raw_line: &str) {
        let line = raw_line.trim();
        self.stats.lines_scanned += 1;
        debug!("parse line: {}", line);

        // Header facts are only looked for above the results table
        if self.chain.is_none() && self.header.parse_line(line) {
            self.stats.header_lines += 1;
            return;
        }

        if is_table_header(line) {
            self.stats.table_headers += 1;
            if self.chain.is_none() {
                let chain = ColumnChain::from_header(line);
                debug!("Extractor chain from table header: {:?}", chain.fields());
                self.chain = Some(chain);
            }
            return;
        }

        let Some(chain) = &self.chain else {
            return;
        };

        match tokenize_line(chain, line, self.expected_position, &mut self.stats.diagnostics) {
            Some(row) => {
                debug!("New race result: {:?}", row);
                self.expected_position += 1;
                self.stats.rows_emitted += 1;
                self.rows.push(row);
            }
            None => self.stats.lines_skipped += 1,
        }
    }

    /// Assemble the event; no rows means no event
    pub fn finish(self, source: impl Into<String>) -> ParseOutcome {
        let event = if self.rows.is_empty() {
            None
        } else {
            let header = self.header;
            Some(RaceEvent {
                track_name: header.track_name,
                location: header.location,
                round: header.round,
                date: header.date,
                class_name: header.class_name,
                result_kind: header.result_kind,
                rows: self.rows,
                source: source.into(),
            })
        };

        ParseOutcome {
            event,
            stats: self.stats,
        }
    }
}

/// Run the extractor chain over one line
///
/// A position miss drops the line at once. Any other miss leaves its field
/// empty and the next rule sees the same remainder.
fn tokenize_line(
    chain: &ColumnChain,
    line: &str,
    expected_position: u32,
    diagnostics: &mut Vec<String>,
) -> Option<ResultRow> {
    let mut draft = RowDraft::default();
    let mut remainder = line;

    for &kind in chain.fields() {
        match extract(kind, remainder, expected_position) {
            Extracted::Matched { value, remainder: rest } => {
                draft.set(value);
                remainder = rest;
            }
            Extracted::Absent if kind == FieldKind::Position => return None,
            Extracted::Absent => {}
            Extracted::Unresolved => {
                warn!("cannot find {} in {}", kind, remainder);
                diagnostics.push(format!("cannot find {} in '{}'", kind, remainder.trim()));
            }
        }
    }

    draft.into_row()
}
