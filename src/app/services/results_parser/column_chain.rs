//! Extractor chain selection from the results table header
//!
//! The header line of the results table (the one starting with `POS`) names
//! the columns that follow. This module turns it into a fixed, ordered list
//! of field kinds that every subsequent line is tokenized with.

use crate::constants::{TABLE_HEADER_PREFIX, column_markers};
use std::fmt;

use super::text::{find_marker, starts_with_ignore_ascii_case};

/// The closed set of fields a result line can provide
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    Position,
    Number,
    DriverName,
    Hometown,
    Bike,
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FieldKind::Position => "position",
            FieldKind::Number => "number",
            FieldKind::DriverName => "driver name",
            FieldKind::Hometown => "hometown",
            FieldKind::Bike => "bike",
        };
        f.write_str(name)
    }
}

/// Ordered field kinds applied to every result line of one event
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnChain {
    fields: Vec<FieldKind>,
}

impl ColumnChain {
    /// Build the chain from a table header line
    ///
    /// Position always comes first. The remaining markers are searched left
    /// to right, each one only in the text after the previous match.
    pub fn from_header(line: &str) -> Self {
        let mut fields = vec![FieldKind::Position];
        let mut rest = line;

        if let Some(end) = find_marker(rest, column_markers::NUMBER, true) {
            fields.push(FieldKind::Number);
            rest = &rest[end..];
        }

        if let Some(end) = find_marker(rest, column_markers::NAME, false)
            .or_else(|| find_marker(rest, column_markers::RIDER, false))
        {
            fields.push(FieldKind::DriverName);
            rest = &rest[end..];
        }

        if let Some(end) = find_marker(rest, column_markers::HOMETOWN, false) {
            fields.push(FieldKind::Hometown);
            rest = &rest[end..];
        }

        if find_marker(rest, column_markers::BIKE, false).is_some() {
            fields.push(FieldKind::Bike);
        }

        Self { fields }
    }

    /// Field kinds in application order
    pub fn fields(&self) -> &[FieldKind] {
        &self.fields
    }

    /// Check whether the chain includes a field kind
    pub fn contains(&self, kind: FieldKind) -> bool {
        self.fields.contains(&kind)
    }
}

/// Check whether a trimmed line is a results table header
pub fn is_table_header(line: &str) -> bool {
    starts_with_ignore_ascii_case(line, TABLE_HEADER_PREFIX)
}
