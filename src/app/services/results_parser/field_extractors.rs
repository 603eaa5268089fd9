//! Field extraction rules for result lines
//!
//! Each rule looks at the unconsumed remainder of a line and either takes a
//! token off its front (returning the token and the new remainder) or leaves
//! the line untouched. Rules never fail with an error; a line that does not
//! fit simply yields no match.

use crate::constants::{
    BIKE_BRANDS, BIKE_TOKENS_ALWAYS_KEPT, CLASS_SIZES, COUNTRY_NAMES, JUNIOR_SUFFIX,
    MAX_BIB_NUMBER, MAX_BIKE_TOKENS, REGION_CODES,
};
use regex::Regex;
use std::sync::LazyLock;

use super::column_chain::FieldKind;
use super::text::{find_ignore_ascii_case, split_first_token};

/// "Firstname M. Lastname" followed by a space
static NAME_WITH_INITIAL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([A-Z][a-z]+)\s+[A-Z]\.?\s+([A-Z][A-Za-z]+) ")
        .expect("name with initial pattern is a valid regex")
});

/// "Firstname Lastname" followed by a space
static PLAIN_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([A-Z][a-z]+)\s+([A-Z][A-Za-z]+) ").expect("plain name pattern is a valid regex")
});

/// A value taken off the front of a result line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Position(u32),
    Number(u16),
    DriverName(String),
    Hometown(String),
    Bike(String),
}

/// Outcome of applying one extraction rule
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Extracted<'a> {
    /// The rule took a token; `remainder` is what later rules see
    Matched { value: FieldValue, remainder: &'a str },

    /// The field is not present on this line
    Absent,

    /// The field looked present but could not be resolved
    Unresolved,
}

impl<'a> Extracted<'a> {
    fn matched(value: FieldValue, remainder: &'a str) -> Self {
        Extracted::Matched { value, remainder }
    }
}

/// Apply the rule for `kind` to the unconsumed remainder of a line
pub fn extract<'a>(kind: FieldKind, line: &'a str, expected_position: u32) -> Extracted<'a> {
    match kind {
        FieldKind::Position => extract_position(line, expected_position),
        FieldKind::Number => extract_number(line),
        FieldKind::DriverName => extract_driver_name(line),
        FieldKind::Hometown => extract_hometown(line),
        FieldKind::Bike => extract_bike(line),
    }
}

/// First token must be exactly the expected finishing position
pub fn extract_position(line: &str, expected_position: u32) -> Extracted<'_> {
    let (first, rest) = split_first_token(line);
    match first.parse::<u32>() {
        Ok(position) if position == expected_position => {
            Extracted::matched(FieldValue::Position(position), rest)
        }
        _ => Extracted::Absent,
    }
}

/// First token must be a bib number between 1 and 999
pub fn extract_number(line: &str) -> Extracted<'_> {
    let (first, rest) = split_first_token(line);
    match first.parse::<i64>() {
        Ok(number) if number > 0 && number < i64::from(MAX_BIB_NUMBER) => {
            Extracted::matched(FieldValue::Number(number as u16), rest)
        }
        _ => Extracted::Absent,
    }
}

/// Driver name as "Firstname [M.] Lastname", dropping a trailing "JR."
pub fn extract_driver_name(line: &str) -> Extracted<'_> {
    let line = line.trim();

    for pattern in [&*NAME_WITH_INITIAL, &*PLAIN_NAME] {
        let Some(captures) = pattern.captures(line) else {
            continue;
        };
        let (Some(whole), Some(first), Some(last)) =
            (captures.get(0), captures.get(1), captures.get(2))
        else {
            continue;
        };

        let mut remainder = &line[whole.end()..];
        if let Some(idx) = find_ignore_ascii_case(remainder, JUNIOR_SUFFIX) {
            remainder = &remainder[idx + JUNIOR_SUFFIX.len()..];
        }

        let name = format!("{} {}", first.as_str(), last.as_str());
        return Extracted::matched(FieldValue::DriverName(name), remainder);
    }

    Extracted::Absent
}

/// Hometown as a country, a "City, REGION" pair, or text up to a region code
pub fn extract_hometown(line: &str) -> Extracted<'_> {
    let line = line.trim();
    if line.is_empty() {
        return Extracted::Absent;
    }

    // Nothing but numbers or the bike brand left: the rider has no hometown
    let first = line.split(' ').next().unwrap_or_default();
    if first.parse::<f64>().is_ok() || is_brand(first) {
        return Extracted::Absent;
    }

    if let Some(found) = match_country(line) {
        return found;
    }

    if let Some(found) = match_city_region(line) {
        return found;
    }

    for code in REGION_CODES {
        if let Some(idx) = line.find(code) {
            let end = idx + code.len();
            let hometown = line[..end].trim().to_string();
            return Extracted::matched(FieldValue::Hometown(hometown), &line[end..]);
        }
    }

    Extracted::Unresolved
}

fn match_country(line: &str) -> Option<Extracted<'_>> {
    COUNTRY_NAMES.iter().find_map(|country| {
        let idx = find_ignore_ascii_case(line, country)?;
        let end = idx + country.len();
        let hometown = line[idx..end].to_string();

        let mut remainder = &line[end..];
        if let Some(after_comma) = remainder.strip_prefix(", ") {
            if let Some(code) = REGION_CODES.iter().find(|code| after_comma.starts_with(*code)) {
                remainder = &after_comma[code.len()..];
            }
        }

        Some(Extracted::matched(FieldValue::Hometown(hometown), remainder))
    })
}

fn match_city_region(line: &str) -> Option<Extracted<'_>> {
    let (city, after) = line.split_once(',')?;
    let region = after
        .split(',')
        .next()
        .unwrap_or_default()
        .trim()
        .split(' ')
        .next()
        .unwrap_or_default();
    if region.is_empty() {
        return None;
    }

    let needle = format!(", {}", region);
    let idx = line.find(&needle)?;
    let remainder = line[idx + needle.len()..].trim();
    let hometown = format!("{}, {}", city.trim(), region);

    Some(Extracted::matched(FieldValue::Hometown(hometown), remainder))
}

fn is_brand(token: &str) -> bool {
    BIKE_BRANDS
        .iter()
        .any(|brand| brand.eq_ignore_ascii_case(token))
}

/// Bike description starting at the first known brand
///
/// Keeps the first two tokens, then a third or fourth token only when it is
/// a class-size numeral or a non-numeric token without `:` and `+` (those are
/// lap times and gaps).
pub fn extract_bike(line: &str) -> Extracted<'_> {
    let start = BIKE_BRANDS
        .iter()
        .find_map(|brand| find_ignore_ascii_case(line, brand))
        .unwrap_or(0);

    let mut rest = line[start..].trim_start();
    let mut kept: Vec<&str> = Vec::new();

    for index in 0..MAX_BIKE_TOKENS {
        if rest.is_empty() {
            break;
        }
        let (token, tail) = rest
            .split_once(char::is_whitespace)
            .unwrap_or((rest, ""));
        rest = tail.trim_start();

        if index < BIKE_TOKENS_ALWAYS_KEPT || keeps_trailing_bike_token(token) {
            kept.push(token);
        }
    }

    if kept.is_empty() {
        return Extracted::Absent;
    }

    Extracted::matched(FieldValue::Bike(kept.join(" ")), rest)
}

fn keeps_trailing_bike_token(token: &str) -> bool {
    if let Ok(size) = token.parse::<u32>() {
        return CLASS_SIZES.contains(&size);
    }
    if token.parse::<f64>().is_ok() {
        return false;
    }
    !token.contains(':') && !token.contains('+')
}
