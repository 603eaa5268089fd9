//! Small string helpers shared by the header locator and the extractors
//!
//! All needles are ASCII, so a match index returned here is always a char
//! boundary of the haystack even when the haystack holds non-ASCII text.

/// Find `needle` in `haystack`, ignoring ASCII case
pub fn find_ignore_ascii_case(haystack: &str, needle: &str) -> Option<usize> {
    let (hay, pat) = (haystack.as_bytes(), needle.as_bytes());
    if pat.is_empty() {
        return Some(0);
    }
    if pat.len() > hay.len() {
        return None;
    }

    (0..=hay.len() - pat.len()).find(|&i| hay[i..i + pat.len()].eq_ignore_ascii_case(pat))
}

/// Check whether `line` starts with `prefix`, ignoring ASCII case
pub fn starts_with_ignore_ascii_case(line: &str, prefix: &str) -> bool {
    line.len() >= prefix.len()
        && line.as_bytes()[..prefix.len()].eq_ignore_ascii_case(prefix.as_bytes())
}

/// Find a column marker used as a word and return the offset just past it
///
/// The marker must be followed by a space or the end of `haystack`; with
/// `leading_space` it must also be preceded by a space.
pub fn find_marker(haystack: &str, marker: &str, leading_space: bool) -> Option<usize> {
    let bytes = haystack.as_bytes();
    let mut from = 0;

    while from <= haystack.len() {
        let start = from + find_ignore_ascii_case(&haystack[from..], marker)?;
        let end = start + marker.len();

        let trailing_ok = end == bytes.len() || bytes[end] == b' ';
        let leading_ok = !leading_space || (start > 0 && bytes[start - 1] == b' ');

        if trailing_ok && leading_ok {
            return Some(if end < bytes.len() { end + 1 } else { end });
        }
        from = start + 1;
    }

    None
}

/// Split off the first space-delimited token and return it with the trimmed rest
pub fn split_first_token(line: &str) -> (&str, &str) {
    match line.split_once(' ') {
        Some((first, rest)) => (first, rest.trim()),
        None => (line, ""),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_ignore_ascii_case() {
        assert_eq!(find_ignore_ascii_case("Team Honda 450", "HONDA"), Some(5));
        assert_eq!(find_ignore_ascii_case("Team Honda", "yamaha"), None);
        assert_eq!(find_ignore_ascii_case("ab", "abc"), None);
        assert_eq!(find_ignore_ascii_case("Zürich Honda", "honda"), Some(8));
    }

    #[test]
    fn test_find_marker_requires_word_end() {
        assert_eq!(find_marker("POS # NAME HOMETOWN BIKE", "BIKE", false), Some(24));
        assert_eq!(find_marker("POS # BIKES", "BIKE", false), None);
        assert_eq!(find_marker("Pos # Rider Bike Time", "rider", false), Some(12));
    }

    #[test]
    fn test_find_marker_leading_space() {
        assert_eq!(find_marker("POS # NAME", "#", true), Some(6));
        assert_eq!(find_marker("POS#NAME", "#", true), None);
    }

    #[test]
    fn test_split_first_token() {
        assert_eq!(split_first_token("12 John  Smith "), ("12", "John  Smith"));
        assert_eq!(split_first_token("12"), ("12", ""));
    }
}
