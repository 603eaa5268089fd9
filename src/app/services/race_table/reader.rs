//! Loading an exported results table
//!
//! Every column is read back as text so CSV and Parquet tables share one
//! conversion path. Empty cells are treated as missing values. Tables
//! written in the compact layout load with the dropped fields left empty.

use polars::prelude::*;
use std::collections::BTreeMap;
use std::fs::File;
use std::path::Path;
use tracing::{debug, info};

use super::TableFormat;
use crate::app::models::{ExportRecord, RaceEvent, ResultRow};
use crate::constants::columns;
use crate::{Error, Result};

/// Read all records of a results table
pub fn load_records(path: &Path) -> Result<Vec<ExportRecord>> {
    if !path.exists() {
        return Err(Error::source_not_found(path.display().to_string()));
    }

    let df = read_frame(path)?;
    let file = path.display().to_string();
    debug!("Loaded results table {} with shape {:?}", file, df.shape());

    let track_names = optional_text(&df, columns::TRACK_NAME, &file)?;
    let locations = optional_text(&df, columns::LOCATION, &file)?;
    let rounds = compact_text(&df, columns::ROUND, &file)?;
    let years = optional_text(&df, columns::YEAR, &file)?;
    let dates = optional_text(&df, columns::DATE, &file)?;
    let class_names = optional_text(&df, columns::CLASS_NAME, &file)?;
    let result_kinds = compact_text(&df, columns::RESULT_KIND, &file)?;
    let positions = optional_text(&df, columns::POSITION, &file)?;
    let numbers = optional_text(&df, columns::NUMBER, &file)?;
    let driver_names = optional_text(&df, columns::DRIVER_NAME, &file)?;
    let hometowns = compact_text(&df, columns::HOMETOWN, &file)?;
    let bikes = optional_text(&df, columns::BIKE, &file)?;
    let sources = optional_text(&df, columns::SOURCE, &file)?;

    let mut records = Vec::with_capacity(df.height());
    for i in 0..df.height() {
        let line = i + 2;
        let record = ExportRecord {
            track_name: track_names[i].clone(),
            location: locations[i].clone(),
            round: parse_optional(&rounds[i], columns::ROUND, line, &file)?,
            year: parse_optional(&years[i], columns::YEAR, line, &file)?,
            date: dates[i].clone(),
            class_name: class_names[i].clone(),
            result_kind: result_kinds[i].clone(),
            position: parse_required(&positions[i], columns::POSITION, line, &file)?,
            number: parse_required(&numbers[i], columns::NUMBER, line, &file)?,
            driver_name: required(&driver_names[i], columns::DRIVER_NAME, line, &file)?,
            hometown: hometowns[i].clone(),
            bike: bikes[i].clone(),
            source: required(&sources[i], columns::SOURCE, line, &file)?,
        };
        check_row(&record, line, &file)?;
        records.push(record);
    }

    info!("Loaded {} result records from {}", records.len(), file);
    Ok(records)
}

/// Read a results table and regroup its rows into events
///
/// Rows sharing a source form one event. Events are ordered by source and
/// their rows by position.
pub fn load_events(path: &Path) -> Result<Vec<RaceEvent>> {
    let records = load_records(path)?;
    group_records(records)
}

/// Regroup flat records into events, one per source
pub fn group_records(records: Vec<ExportRecord>) -> Result<Vec<RaceEvent>> {
    let mut by_source: BTreeMap<String, Vec<ExportRecord>> = BTreeMap::new();
    for record in records {
        by_source.entry(record.source.clone()).or_default().push(record);
    }

    let mut events = Vec::with_capacity(by_source.len());
    for (source, mut group) in by_source {
        group.sort_by_key(|record| record.position);

        let first = &group[0];
        let mut event = RaceEvent {
            track_name: first.track_name.clone(),
            location: first.location.clone(),
            round: first.round,
            date: first.date.clone(),
            class_name: first.class_name.clone(),
            result_kind: first.result_kind.clone(),
            rows: Vec::with_capacity(group.len()),
            source,
        };

        for record in group {
            event.rows.push(ResultRow::new(
                record.position,
                record.number,
                record.driver_name,
                record.hometown,
                record.bike,
            )?);
        }
        events.push(event);
    }

    Ok(events)
}

fn read_frame(path: &Path) -> Result<DataFrame> {
    let context = |e: PolarsError| {
        Error::table_export(format!("Failed to read results table {}", path.display()), e)
    };

    match TableFormat::from_path(path) {
        TableFormat::Csv => CsvReadOptions::default()
            .with_has_header(true)
            .with_infer_schema_length(Some(0))
            .try_into_reader_with_file_path(Some(path.to_path_buf()))
            .and_then(|reader| reader.finish())
            .map_err(context),
        TableFormat::Parquet => {
            let file = File::open(path)
                .map_err(|e| Error::io(format!("Failed to open {}", path.display()), e))?;
            ParquetReader::new(file).finish().map_err(context)
        }
    }
}

/// Column values as trimmed text, empty cells as `None`
fn optional_text(df: &DataFrame, name: &str, file: &str) -> Result<Vec<Option<String>>> {
    let column = df
        .column(name)
        .map_err(|_| Error::table_format(file, format!("missing column '{}'", name)))?;
    text_values(column)
}

/// Like `optional_text`, but columns dropped by the compact layout may be missing
fn compact_text(df: &DataFrame, name: &str, file: &str) -> Result<Vec<Option<String>>> {
    if columns::COMPACT_DROPPED.contains(&name) && df.column(name).is_err() {
        return Ok(vec![None; df.height()]);
    }
    optional_text(df, name, file)
}

fn text_values(column: &Column) -> Result<Vec<Option<String>>> {
    let text = column.cast(&DataType::String)?;
    let values = text
        .as_materialized_series()
        .str()?
        .into_iter()
        .map(|value| {
            value
                .map(str::trim)
                .filter(|value| !value.is_empty())
                .map(str::to_string)
        })
        .collect();
    Ok(values)
}

/// Row invariants, reported against the table line
fn check_row(record: &ExportRecord, line: usize, file: &str) -> Result<()> {
    let row = ResultRow {
        position: record.position,
        number: record.number,
        driver_name: record.driver_name.clone(),
        hometown: None,
        bike: None,
    };
    row.validate().map_err(|e| {
        let message = match e {
            Error::DataValidation { message } => message,
            other => other.to_string(),
        };
        Error::table_format(file, format!("row {}: {}", line, message))
    })
}

fn required(value: &Option<String>, column: &str, line: usize, file: &str) -> Result<String> {
    value.clone().ok_or_else(|| {
        Error::table_format(file, format!("row {}: column '{}' is empty", line, column))
    })
}

fn parse_required<T: std::str::FromStr>(
    value: &Option<String>,
    column: &str,
    line: usize,
    file: &str,
) -> Result<T> {
    let text = required(value, column, line, file)?;
    text.parse::<T>().map_err(|_| {
        Error::table_format(
            file,
            format!("row {}: column '{}' has invalid value '{}'", line, column, text),
        )
    })
}

fn parse_optional<T: std::str::FromStr>(
    value: &Option<String>,
    column: &str,
    line: usize,
    file: &str,
) -> Result<Option<T>> {
    match value {
        Some(_) => parse_required(value, column, line, file).map(Some),
        None => Ok(None),
    }
}
