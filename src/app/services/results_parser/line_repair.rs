//! Repair of line-wrapping artifacts left by page-text extraction
//!
//! Text extraction sometimes puts a row's position alone on one line and the
//! rest of the row (starting with the bib number) on the next. This pass
//! joins such pairs back into one line before scanning.

use regex::Regex;
use std::borrow::Cow;
use std::sync::LazyLock;

static SPLIT_POSITION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^([0-9]+)\n([0-9]+)").expect("split position pattern is a valid regex")
});

/// Merge a digits-only line with a following line that starts with digits
pub fn repair_split_lines(content: &str) -> Cow<'_, str> {
    let normalized: Cow<'_, str> = if content.contains("\r\n") {
        Cow::Owned(content.replace("\r\n", "\n"))
    } else {
        Cow::Borrowed(content)
    };

    let repaired = match SPLIT_POSITION.replace_all(&normalized, "${1} ${2}") {
        Cow::Owned(repaired) => Some(repaired),
        Cow::Borrowed(_) => None,
    };

    match repaired {
        Some(repaired) => Cow::Owned(repaired),
        None => normalized,
    }
}
