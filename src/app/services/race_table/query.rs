//! Filtering and ordering of exported results
//!
//! All text filters compare case-insensitively after trimming; every filter
//! that is set must match.

use crate::app::models::{ExportRecord, RaceEvent, parse_race_day};
use std::cmp::Ordering;

/// Conjunctive filter over driver, track, year and class
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResultQuery {
    pub driver: Option<String>,
    pub track: Option<String>,
    pub year: Option<u16>,
    pub class_name: Option<String>,
}

impl ResultQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn driver(mut self, driver: impl Into<String>) -> Self {
        self.driver = Some(driver.into());
        self
    }

    pub fn track(mut self, track: impl Into<String>) -> Self {
        self.track = Some(track.into());
        self
    }

    pub fn year(mut self, year: u16) -> Self {
        self.year = Some(year);
        self
    }

    pub fn class_name(mut self, class_name: impl Into<String>) -> Self {
        self.class_name = Some(class_name.into());
        self
    }

    /// True when no filter is set
    pub fn is_empty(&self) -> bool {
        self.driver.is_none() && self.track.is_none() && self.year.is_none() && self.class_name.is_none()
    }

    pub fn matches(&self, record: &ExportRecord) -> bool {
        text_matches(&self.driver, Some(record.driver_name.as_str()))
            && self.matches_header(
                record.track_name.as_deref(),
                record.year,
                record.class_name.as_deref(),
            )
    }

    /// Event-level match: header filters on the event, driver on any row
    pub fn matches_event(&self, event: &RaceEvent) -> bool {
        self.matches_header(
            event.track_name.as_deref(),
            event.year(),
            event.class_name.as_deref(),
        ) && (self.driver.is_none()
            || event
                .rows
                .iter()
                .any(|row| text_matches(&self.driver, Some(row.driver_name.as_str()))))
    }

    /// Matching records, ordered by year, date, class and position
    pub fn apply(&self, records: &[ExportRecord]) -> Vec<ExportRecord> {
        let mut selected: Vec<ExportRecord> = records
            .iter()
            .filter(|record| self.matches(record))
            .cloned()
            .collect();
        selected.sort_by(compare_records);
        selected
    }

    /// Matching events in their original order
    pub fn select_events<'a>(&self, events: &'a [RaceEvent]) -> Vec<&'a RaceEvent> {
        events.iter().filter(|event| self.matches_event(event)).collect()
    }

    fn matches_header(&self, track: Option<&str>, year: Option<u16>, class_name: Option<&str>) -> bool {
        text_matches(&self.track, track)
            && self.year.is_none_or(|wanted| year == Some(wanted))
            && text_matches(&self.class_name, class_name)
    }
}

fn text_matches(wanted: &Option<String>, actual: Option<&str>) -> bool {
    match wanted {
        None => true,
        Some(wanted) => actual.is_some_and(|actual| actual.trim().eq_ignore_ascii_case(wanted.trim())),
    }
}

fn compare_records(a: &ExportRecord, b: &ExportRecord) -> Ordering {
    a.year
        .cmp(&b.year)
        .then_with(|| race_day(a).cmp(&race_day(b)))
        .then_with(|| a.date.cmp(&b.date))
        .then_with(|| a.class_name.cmp(&b.class_name))
        .then_with(|| a.position.cmp(&b.position))
}

fn race_day(record: &ExportRecord) -> Option<chrono::NaiveDate> {
    record.date.as_deref().and_then(parse_race_day)
}
