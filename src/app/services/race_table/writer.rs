//! Results table writer
//!
//! Flattens events into export records, builds a polars `DataFrame` with
//! one column per record field and writes it as CSV or Parquet.

use polars::prelude::*;
use std::fs::File;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use super::TableFormat;
use super::source_rewrite::SourceRewrite;
use crate::app::models::{ExportRecord, RaceEvent};
use crate::constants::columns;
use crate::{Error, Result};

/// What a write produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriteSummary {
    pub path: PathBuf,
    pub format: TableFormat,
    pub events: usize,
    pub rows: usize,
    pub bytes_written: u64,
}

/// Writer for the flat results table
#[derive(Debug, Clone, Default)]
pub struct RaceTableWriter {
    format: TableFormat,
    compact: bool,
    source_rewrite: Option<SourceRewrite>,
}

impl RaceTableWriter {
    pub fn new(format: TableFormat) -> Self {
        Self {
            format,
            ..Default::default()
        }
    }

    /// Drop the round, result kind and hometown columns
    pub fn with_compact(mut self, compact: bool) -> Self {
        self.compact = compact;
        self
    }

    /// Rewrite every record's source reference before writing
    pub fn with_source_rewrite(mut self, rewrite: Option<SourceRewrite>) -> Self {
        self.source_rewrite = rewrite;
        self
    }

    pub fn format(&self) -> TableFormat {
        self.format
    }

    pub fn is_compact(&self) -> bool {
        self.compact
    }

    /// Flatten events in order, applying the source rewrite
    pub fn records(&self, events: &[RaceEvent]) -> Vec<ExportRecord> {
        let mut records: Vec<ExportRecord> =
            events.iter().flat_map(RaceEvent::export_records).collect();

        if let Some(rewrite) = &self.source_rewrite {
            for record in &mut records {
                record.source = rewrite.apply(&record.source);
            }
        }
        records
    }

    /// Build the table for a set of records
    pub fn to_dataframe(&self, records: &[ExportRecord]) -> Result<DataFrame> {
        let mut frame_columns: Vec<Column> = Vec::with_capacity(13);

        frame_columns.push(string_column(columns::TRACK_NAME, records, |r| r.track_name.clone()));
        frame_columns.push(string_column(columns::LOCATION, records, |r| r.location.clone()));
        if !self.compact {
            let rounds: Vec<Option<u32>> = records.iter().map(|r| r.round).collect();
            frame_columns.push(Column::new(columns::ROUND.into(), rounds));
        }
        let years: Vec<Option<u32>> = records.iter().map(|r| r.year.map(u32::from)).collect();
        frame_columns.push(Column::new(columns::YEAR.into(), years));
        frame_columns.push(string_column(columns::DATE, records, |r| r.date.clone()));
        frame_columns.push(string_column(columns::CLASS_NAME, records, |r| r.class_name.clone()));
        if !self.compact {
            frame_columns.push(string_column(columns::RESULT_KIND, records, |r| {
                r.result_kind.clone()
            }));
        }

        let positions: Vec<u32> = records.iter().map(|r| r.position).collect();
        frame_columns.push(Column::new(columns::POSITION.into(), positions));
        let numbers: Vec<u32> = records.iter().map(|r| u32::from(r.number)).collect();
        frame_columns.push(Column::new(columns::NUMBER.into(), numbers));
        let names: Vec<String> = records.iter().map(|r| r.driver_name.clone()).collect();
        frame_columns.push(Column::new(columns::DRIVER_NAME.into(), names));

        if !self.compact {
            frame_columns.push(string_column(columns::HOMETOWN, records, |r| r.hometown.clone()));
        }
        frame_columns.push(string_column(columns::BIKE, records, |r| r.bike.clone()));
        let sources: Vec<String> = records.iter().map(|r| r.source.clone()).collect();
        frame_columns.push(Column::new(columns::SOURCE.into(), sources));

        DataFrame::new(frame_columns)
            .map_err(|e| Error::table_export("Failed to build results table", e))
    }

    /// Write all events to `path`
    pub fn write(&self, events: &[RaceEvent], path: &Path) -> Result<WriteSummary> {
        info!(
            "Writing {} events to {} ({}{})",
            events.len(),
            path.display(),
            self.format,
            if self.compact { ", compact" } else { "" }
        );

        let records = self.records(events);
        let mut df = self.to_dataframe(&records)?;
        debug!("Results table shape: {:?}", df.shape());

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| {
                Error::io(format!("Failed to create directory {}", parent.display()), e)
            })?;
        }

        let mut file = File::create(path)
            .map_err(|e| Error::io(format!("Failed to create {}", path.display()), e))?;

        match self.format {
            TableFormat::Csv => {
                CsvWriter::new(&mut file)
                    .include_header(true)
                    .finish(&mut df)
                    .map_err(|e| {
                        Error::table_export(format!("Failed to write CSV {}", path.display()), e)
                    })?;
            }
            TableFormat::Parquet => {
                ParquetWriter::new(&mut file)
                    .with_compression(ParquetCompression::Snappy)
                    .finish(&mut df)
                    .map_err(|e| {
                        Error::table_export(
                            format!("Failed to write Parquet {}", path.display()),
                            e,
                        )
                    })?;
            }
        }

        let bytes_written = std::fs::metadata(path).map(|m| m.len()).unwrap_or(0);

        Ok(WriteSummary {
            path: path.to_path_buf(),
            format: self.format,
            events: events.len(),
            rows: records.len(),
            bytes_written,
        })
    }
}

fn string_column(
    name: &'static str,
    records: &[ExportRecord],
    value: impl Fn(&ExportRecord) -> Option<String>,
) -> Column {
    let values: Vec<Option<String>> = records.iter().map(value).collect();
    Column::new(name.into(), values)
}
