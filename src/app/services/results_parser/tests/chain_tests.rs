//! Tests for extractor chain selection

use super::super::column_chain::{ColumnChain, FieldKind, is_table_header};

#[test]
fn test_full_header() {
    let chain = ColumnChain::from_header("POS # NAME HOMETOWN BIKE");
    assert_eq!(
        chain.fields(),
        &[
            FieldKind::Position,
            FieldKind::Number,
            FieldKind::DriverName,
            FieldKind::Hometown,
            FieldKind::Bike,
        ]
    );
}

#[test]
fn test_rider_column_and_trailing_columns() {
    let chain = ColumnChain::from_header("Pos # Rider Hometown Bike Laps Gap");
    assert_eq!(
        chain.fields(),
        &[
            FieldKind::Position,
            FieldKind::Number,
            FieldKind::DriverName,
            FieldKind::Hometown,
            FieldKind::Bike,
        ]
    );
}

#[test]
fn test_header_without_hometown() {
    let chain = ColumnChain::from_header("POS # RIDER BIKE TOTAL");
    assert_eq!(
        chain.fields(),
        &[
            FieldKind::Position,
            FieldKind::Number,
            FieldKind::DriverName,
            FieldKind::Bike,
        ]
    );
    assert!(!chain.contains(FieldKind::Hometown));
}

#[test]
fn test_markers_must_appear_in_column_order() {
    // BIKE before NAME: once NAME is matched, nothing after it says BIKE
    let chain = ColumnChain::from_header("POS # BIKE NAME");
    assert_eq!(
        chain.fields(),
        &[FieldKind::Position, FieldKind::Number, FieldKind::DriverName]
    );
}

#[test]
fn test_position_only_header() {
    let chain = ColumnChain::from_header("POSITION POINTS");
    assert_eq!(chain.fields(), &[FieldKind::Position]);
}

#[test]
fn test_number_marker_needs_surrounding_spaces() {
    let chain = ColumnChain::from_header("POS #NAME");
    assert!(!chain.contains(FieldKind::Number));
    assert_eq!(chain.fields(), &[FieldKind::Position, FieldKind::DriverName]);
}

#[test]
fn test_table_header_detection() {
    assert!(is_table_header("POS # NAME"));
    assert!(is_table_header("pos # rider"));
    assert!(is_table_header("Position Points"));
    assert!(!is_table_header("1 22 John Smith"));
    assert!(!is_table_header("PO"));
}
