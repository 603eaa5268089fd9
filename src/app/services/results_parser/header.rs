//! Header fact discovery for result sheets
//!
//! Result sheets open with a few lines of header text: the track and its
//! location, a round/date line, the class name and the kind of result. The
//! locator resolves these facts in strict order; each resolved fact unlocks
//! the search for the next one.

use crate::constants::{FIELD_SEPARATOR, REGION_CODES, ROUND_MARKER};
use regex::Regex;
use std::sync::LazyLock;
use tracing::debug;

/// One `"<letters>, <CODE>"` pattern per region code, in table order
static LOCATION_PATTERNS: LazyLock<Vec<(String, Regex)>> = LazyLock::new(|| {
    REGION_CODES
        .iter()
        .map(|code| {
            let needle = format!(", {}", code);
            let pattern = Regex::new(&format!("[A-Za-z]+{}", regex::escape(&needle)))
                .expect("location pattern is a valid regex");
            (needle, pattern)
        })
        .collect()
});

/// Which unconditional fact the next line provides
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum Pending {
    #[default]
    Nothing,
    ClassName,
    ResultKind,
}

/// Header facts collected while scanning a result sheet
#[derive(Debug, Clone, Default)]
pub struct HeaderLocator {
    pub track_name: Option<String>,
    pub location: Option<String>,
    pub round: Option<u32>,
    pub date: Option<String>,
    pub class_name: Option<String>,
    pub result_kind: Option<String>,
    pending: Pending,
}

impl HeaderLocator {
    /// Create a locator, optionally with a track name known from elsewhere
    pub fn new(track_name: Option<String>) -> Self {
        Self {
            track_name,
            ..Default::default()
        }
    }

    /// Offer a trimmed line to the locator
    ///
    /// Returns `true` when the line was consumed as a header fact and must not
    /// be scanned for result rows.
    pub fn parse_line(&mut self, line: &str) -> bool {
        if self.location.is_none() {
            if let Some(location) = locate_track(line) {
                if self.track_name.is_none() {
                    let track = line.split(FIELD_SEPARATOR).next().unwrap_or(line).trim();
                    self.track_name = Some(track.to_string());
                }
                debug!(
                    "Found track {:?} located in {}",
                    self.track_name, location
                );
                self.location = Some(location);
                return true;
            }
        }

        if self.round.is_none() {
            if let Some((round, date)) = parse_round_line(line) {
                debug!("Found round {} and date {:?}", round, date);
                self.round = Some(round);
                self.date = date;
                self.pending = Pending::ClassName;
                return true;
            }
        }

        match self.pending {
            Pending::ClassName => {
                debug!("Found class name: {}", line);
                self.class_name = Some(line.to_string());
                self.pending = Pending::ResultKind;
                true
            }
            Pending::ResultKind => {
                debug!("Found kind of result: {}", line);
                self.result_kind = Some(line.to_string());
                self.pending = Pending::Nothing;
                true
            }
            Pending::Nothing => false,
        }
    }
}

/// Find the track location on a line
///
/// Prefers a `"City, CODE"` span for a known region code and falls back to
/// whatever follows the first `" - "` separator.
pub fn locate_track(line: &str) -> Option<String> {
    for (needle, pattern) in LOCATION_PATTERNS.iter() {
        if line.contains(needle.as_str()) {
            if let Some(found) = pattern.find(line) {
                return Some(found.as_str().to_string());
            }
        }
    }

    match line.find(FIELD_SEPARATOR) {
        Some(idx) if idx > 0 => {
            let location = line[idx + FIELD_SEPARATOR.len()..].trim();
            (!location.is_empty()).then(|| location.to_string())
        }
        _ => None,
    }
}

/// Parse a `"ROUND <n> - <date>"` line into round number and optional date
pub fn parse_round_line(line: &str) -> Option<(u32, Option<String>)> {
    let idx = line.find(ROUND_MARKER)?;
    let after = &line[idx + ROUND_MARKER.len()..];
    let token = after.split(' ').next().unwrap_or_default();

    let round = token.parse::<u32>().ok().filter(|round| *round > 0)?;

    let rest = &after[token.len()..];
    let date = rest.find(FIELD_SEPARATOR).and_then(|sep| {
        let tail = &rest[sep + FIELD_SEPARATOR.len()..];
        let date = tail.split(FIELD_SEPARATOR).next().unwrap_or(tail).trim();
        (!date.is_empty()).then(|| date.to_string())
    });

    Some((round, date))
}
