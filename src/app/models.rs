//! Data models for motocross result processing
//!
//! This module contains the core data structures for representing one parsed
//! result sheet (a race event with its header facts) and the per-rider rows,
//! plus the flat record used by the results table.

use crate::constants::{MAX_BIB_NUMBER, YEAR_PATTERN};
use crate::{Error, Result};
use chrono::NaiveDate;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

static YEAR_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(YEAR_PATTERN).expect("year pattern is a valid regex"));

/// Date layouts seen on result sheets, e.g. "May 12, 2024"
const DATE_FORMATS: &[&str] = &["%B %d, %Y", "%b %d, %Y", "%B %e, %Y"];

/// Parse a race date as printed on a sheet
pub fn parse_race_day(date: &str) -> Option<NaiveDate> {
    let date = date.trim();
    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(date, format).ok())
}

// =============================================================================
// Result Row
// =============================================================================

/// One rider's finishing record within an event
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ResultRow {
    /// Finishing position, starting at 1
    pub position: u32,

    /// Bib number in `1..=999`
    pub number: u16,

    /// Driver name as "Firstname Lastname"
    pub driver_name: String,

    /// Hometown (city and region, or country)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hometown: Option<String>,

    /// Bike description, usually brand plus displacement
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bike: Option<String>,
}

impl ResultRow {
    /// Create a new row with validation
    pub fn new(
        position: u32,
        number: u16,
        driver_name: String,
        hometown: Option<String>,
        bike: Option<String>,
    ) -> Result<Self> {
        let row = Self {
            position,
            number,
            driver_name,
            hometown,
            bike,
        };

        row.validate()?;
        Ok(row)
    }

    /// Validate row invariants
    pub fn validate(&self) -> Result<()> {
        if self.position == 0 {
            return Err(Error::data_validation("Position must start at 1"));
        }

        if self.number == 0 || self.number >= MAX_BIB_NUMBER {
            return Err(Error::data_validation(format!(
                "Invalid bib number {}: must be between 1 and {}",
                self.number,
                MAX_BIB_NUMBER - 1
            )));
        }

        if self.driver_name.trim().is_empty() {
            return Err(Error::data_validation("Driver name cannot be empty"));
        }

        Ok(())
    }

    /// One line of a prompt listing
    pub fn as_prompt(&self) -> String {
        let mut line = format!(
            "  {}      {}     {}    ",
            self.number, self.position, self.driver_name
        );
        if let Some(bike) = &self.bike {
            line.push_str(bike);
        }
        line
    }
}

impl fmt::Display for ResultRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}. {} (#{})", self.position, self.driver_name, self.number)?;
        if let Some(hometown) = &self.hometown {
            write!(f, " from {}", hometown)?;
        }
        if let Some(bike) = &self.bike {
            write!(f, " on {}", bike)?;
        }
        Ok(())
    }
}

// =============================================================================
// Race Event
// =============================================================================

/// How many rows a rendered listing includes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Listing {
    Top3,
    Top10,
    #[default]
    All,
}

impl Listing {
    /// Highest position included, `None` for all rows
    pub fn max_position(&self) -> Option<u32> {
        match self {
            Listing::Top3 => Some(3),
            Listing::Top10 => Some(10),
            Listing::All => None,
        }
    }
}

impl FromStr for Listing {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "top3" | "3" => Ok(Listing::Top3),
            "top10" | "10" => Ok(Listing::Top10),
            "all" => Ok(Listing::All),
            other => Err(format!(
                "Unknown listing '{}'. Expected one of: top3, top10, all",
                other
            )),
        }
    }
}

impl fmt::Display for Listing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Listing::Top3 => write!(f, "top3"),
            Listing::Top10 => write!(f, "top10"),
            Listing::All => write!(f, "all"),
        }
    }
}

/// One parsed result sheet: header facts plus ordered result rows
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct RaceEvent {
    pub track_name: Option<String>,
    pub location: Option<String>,
    pub round: Option<u32>,
    pub date: Option<String>,
    pub class_name: Option<String>,
    pub result_kind: Option<String>,

    /// Rows ordered by position
    pub rows: Vec<ResultRow>,

    /// Where the text came from, usually a file path
    pub source: String,
}

impl RaceEvent {
    /// Four-digit year found in the race date
    pub fn year(&self) -> Option<u16> {
        let date = self.date.as_deref()?;
        YEAR_REGEX
            .find(date)
            .and_then(|m| m.as_str().parse::<u16>().ok())
    }

    /// Race date as a calendar date when it follows a known layout
    pub fn race_day(&self) -> Option<NaiveDate> {
        parse_race_day(self.date.as_deref()?)
    }

    /// Check that positions run 1..=N without gaps
    pub fn validate(&self) -> Result<()> {
        for (index, row) in self.rows.iter().enumerate() {
            row.validate()?;
            let expected = index as u32 + 1;
            if row.position != expected {
                return Err(Error::data_validation(format!(
                    "Row {} of '{}' has position {}, expected {}",
                    index, self.source, row.position, expected
                )));
            }
        }
        Ok(())
    }

    /// Render a bounded listing for prompting or display
    pub fn render_listing(&self, listing: Listing) -> String {
        let mut header = match (
            &self.track_name,
            &self.date,
            &self.location,
            &self.class_name,
        ) {
            (Some(track), Some(date), Some(_), Some(class_name)) => format!(
                "### Race Results from track {} on {} of class {}\n\n",
                track, date, class_name
            ),
            _ => "### Race Results\n\n".to_string(),
        };
        header.push_str("number  position  name              bike");

        let rows: Vec<String> = self
            .rows
            .iter()
            .filter(|row| listing.max_position().is_none_or(|max| row.position <= max))
            .map(ResultRow::as_prompt)
            .collect();

        format!("{}\n{}\n", header, rows.join("\n"))
    }

    /// Flatten into one export record per row
    pub fn export_records(&self) -> Vec<ExportRecord> {
        let year = self.year();
        self.rows
            .iter()
            .map(|row| ExportRecord {
                track_name: self.track_name.clone(),
                location: self.location.clone(),
                round: self.round,
                year,
                date: self.date.clone(),
                class_name: self.class_name.clone(),
                result_kind: self.result_kind.clone(),
                position: row.position,
                number: row.number,
                driver_name: row.driver_name.clone(),
                hometown: row.hometown.clone(),
                bike: row.bike.clone(),
                source: self.source.clone(),
            })
            .collect()
    }
}

impl fmt::Display for RaceEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts: Vec<String> = Vec::new();
        if let Some(track) = &self.track_name {
            parts.push(track.clone());
        }
        if let Some(location) = &self.location {
            parts.push(location.clone());
        }
        if let Some(round) = self.round {
            parts.push(format!("Round {}", round));
        }
        if let Some(date) = &self.date {
            parts.push(date.clone());
        }
        if let Some(class_name) = &self.class_name {
            parts.push(class_name.clone());
        }
        if let Some(kind) = &self.result_kind {
            parts.push(kind.clone());
        }

        writeln!(f, "Results from file {}", self.source)?;
        writeln!(f, "{}", parts.join(" - "))?;
        writeln!(f)?;
        for (index, row) in self.rows.iter().enumerate() {
            if index > 0 {
                writeln!(f)?;
            }
            write!(f, "{}", row)?;
        }
        Ok(())
    }
}

// =============================================================================
// Export Record
// =============================================================================

/// One result row flattened together with its event's header facts
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ExportRecord {
    pub track_name: Option<String>,
    pub location: Option<String>,
    pub round: Option<u32>,
    pub year: Option<u16>,
    pub date: Option<String>,
    pub class_name: Option<String>,
    pub result_kind: Option<String>,
    pub position: u32,
    pub number: u16,
    pub driver_name: String,
    pub hometown: Option<String>,
    pub bike: Option<String>,
    pub source: String,
}
