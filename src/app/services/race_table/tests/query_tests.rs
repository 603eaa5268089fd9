//! Tests for result filtering and ordering

use super::*;
use crate::app::models::ExportRecord;
use crate::app::services::race_table::ResultQuery;

fn records() -> Vec<ExportRecord> {
    create_events()
        .iter()
        .flat_map(|event| event.export_records())
        .collect()
}

#[test]
fn test_empty_query_keeps_everything() {
    let query = ResultQuery::new();
    assert!(query.is_empty());
    assert_eq!(query.apply(&records()).len(), 5);
}

#[test]
fn test_driver_filter_is_case_insensitive() {
    let selected = ResultQuery::new().driver("  ken ROCZEN ").apply(&records());
    assert_eq!(selected.len(), 1);
    assert_eq!(selected[0].position, 3);
}

#[test]
fn test_filters_are_conjunctive() {
    let records = records();
    let query = ResultQuery::new().track("fox raceway").year(2024);
    assert_eq!(query.apply(&records).len(), 2);

    let query = query.class_name("450 Class");
    assert!(query.apply(&records).is_empty());

    assert!(ResultQuery::new().year(2023).apply(&records).is_empty());
}

#[test]
fn test_ordering_by_date_then_class_then_position() {
    let mut records = records();
    records.reverse();

    let ordered = ResultQuery::new().apply(&records);
    let keys: Vec<(&str, u32)> = ordered
        .iter()
        .map(|r| (r.class_name.as_deref().unwrap(), r.position))
        .collect();
    assert_eq!(
        keys,
        vec![
            ("450 Class", 1),
            ("450 Class", 2),
            ("450 Class", 3),
            ("250 Class", 1),
            ("250 Class", 2),
        ]
    );
}

#[test]
fn test_event_selection() {
    let events = create_events();

    let selected = ResultQuery::new().driver("Tom Vialle").select_events(&events);
    assert_eq!(selected.len(), 1);
    assert_eq!(selected[0].track_name.as_deref(), Some("Fox Raceway"));

    let selected = ResultQuery::new().class_name("450 class").select_events(&events);
    assert_eq!(selected.len(), 1);

    assert_eq!(ResultQuery::new().select_events(&events).len(), 2);
}
