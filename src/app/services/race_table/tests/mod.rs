//! Test fixtures for the results table

use crate::app::models::{RaceEvent, ResultRow};

mod query_tests;
mod writer_tests;

pub fn row(position: u32, number: u16, name: &str, hometown: Option<&str>, bike: &str) -> ResultRow {
    ResultRow::new(
        position,
        number,
        name.to_string(),
        hometown.map(str::to_string),
        Some(bike.to_string()),
    )
    .unwrap()
}

/// Two events from different rounds and classes
pub fn create_events() -> Vec<RaceEvent> {
    vec![
        RaceEvent {
            track_name: Some("Hangtown Motocross Classic".to_string()),
            location: Some("Cordova, CA".to_string()),
            round: Some(1),
            date: Some("May 18, 2024".to_string()),
            class_name: Some("450 Class".to_string()),
            result_kind: Some("Overall Results".to_string()),
            rows: vec![
                row(1, 1, "Jett Lawrence", Some("Australia"), "Honda CRF450R"),
                row(2, 32, "Justin Cooper", Some("Cairo, NY"), "Yamaha YZ450F"),
                row(3, 94, "Ken Roczen", None, "Suzuki RM-Z450"),
            ],
            source: "/data/mx/2024/hangtown/450_overall.txt".to_string(),
        },
        RaceEvent {
            track_name: Some("Fox Raceway".to_string()),
            location: Some("Pala, California".to_string()),
            round: Some(2),
            date: Some("May 25, 2024".to_string()),
            class_name: Some("250 Class".to_string()),
            result_kind: Some("Overall Results".to_string()),
            rows: vec![
                row(1, 18, "Jo Shimoda", Some("Japan"), "Honda CRF250R"),
                row(2, 16, "Tom Vialle", Some("France"), "KTM 250 SX-F"),
            ],
            source: "/data/mx/2024/pala/250_overall.txt".to_string(),
        },
    ]
}
