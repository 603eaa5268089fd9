//! Tests for the results table writer

use super::*;
use crate::app::services::race_table::{RaceTableWriter, SourceRewrite, TableFormat};
use crate::constants::columns;
use std::path::Path;
use tempfile::TempDir;

#[test]
fn test_full_layout_columns() {
    let writer = RaceTableWriter::new(TableFormat::Csv);
    let records = writer.records(&create_events());
    let df = writer.to_dataframe(&records).unwrap();

    let names: Vec<String> = df
        .get_column_names()
        .iter()
        .map(|name| name.to_string())
        .collect();
    assert_eq!(
        names,
        vec![
            columns::TRACK_NAME,
            columns::LOCATION,
            columns::ROUND,
            columns::YEAR,
            columns::DATE,
            columns::CLASS_NAME,
            columns::RESULT_KIND,
            columns::POSITION,
            columns::NUMBER,
            columns::DRIVER_NAME,
            columns::HOMETOWN,
            columns::BIKE,
            columns::SOURCE,
        ]
    );
    assert_eq!(df.height(), 5);
}

#[test]
fn test_compact_layout_drops_columns() {
    let writer = RaceTableWriter::new(TableFormat::Csv).with_compact(true);
    let records = writer.records(&create_events());
    let df = writer.to_dataframe(&records).unwrap();

    for dropped in columns::COMPACT_DROPPED {
        assert!(df.column(dropped).is_err(), "{} should be dropped", dropped);
    }
    assert_eq!(df.width(), 10);
}

#[test]
fn test_records_keep_event_order_and_rewrite_sources() {
    let writer = RaceTableWriter::new(TableFormat::Csv)
        .with_source_rewrite(Some(SourceRewrite::new("/data/mx/", "https://results.example/")));
    let records = writer.records(&create_events());

    assert_eq!(records.len(), 5);
    assert_eq!(records[0].driver_name, "Jett Lawrence");
    assert_eq!(records[3].driver_name, "Jo Shimoda");
    assert_eq!(
        records[0].source,
        "https://results.example/2024/hangtown/450_overall.pdf"
    );
    assert_eq!(records[4].year, Some(2024));
}

#[test]
fn test_write_csv() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("out").join("race_results.csv");

    let summary = RaceTableWriter::new(TableFormat::Csv)
        .write(&create_events(), &path)
        .unwrap();

    assert_eq!(summary.events, 2);
    assert_eq!(summary.rows, 5);
    assert!(summary.bytes_written > 0);

    let content = std::fs::read_to_string(&path).unwrap();
    let mut lines = content.lines();
    assert_eq!(
        lines.next().unwrap(),
        "track_name,location,round,year,date,class_name,result_kind,position,number,driver_name,hometown,bike,source"
    );
    assert!(content.contains("\"Cordova, CA\""));
    assert_eq!(content.lines().count(), 6);
}

#[test]
fn test_write_parquet() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("race_results.parquet");

    let summary = RaceTableWriter::new(TableFormat::Parquet)
        .write(&create_events(), &path)
        .unwrap();

    assert_eq!(summary.format, TableFormat::Parquet);
    assert!(path.exists());
    assert!(summary.bytes_written > 0);
}

#[test]
fn test_write_empty_table() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("empty.csv");

    let summary = RaceTableWriter::new(TableFormat::Csv).write(&[], &path).unwrap();
    assert_eq!(summary.rows, 0);
    assert!(Path::new(&path).exists());
}

#[test]
fn test_format_from_path_and_str() {
    assert_eq!(TableFormat::from_path(Path::new("a.parquet")), TableFormat::Parquet);
    assert_eq!(TableFormat::from_path(Path::new("a.CSV")), TableFormat::Csv);
    assert_eq!(TableFormat::from_path(Path::new("a")), TableFormat::Csv);
    assert_eq!("Parquet".parse::<TableFormat>().unwrap(), TableFormat::Parquet);
    assert!("xlsx".parse::<TableFormat>().is_err());
}
