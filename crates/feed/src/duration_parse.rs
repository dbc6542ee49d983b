// ABOUTME: Duration string parsing for episode lengths and chapter start times.
// ABOUTME: Supports integer seconds, HH:MM:SS, MM:SS, fractions, and unit strings like "1h30m".

use std::time::Duration;

use once_cell::sync::Lazy;
use regex::Regex;

/// Unit strings handed to `parse_duration`. Exponents and long digit runs
/// never reach it: its big-number arithmetic is superlinear in their size.
static UNIT_DURATION_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^(\s*\d{1,6}(\.\d{1,3})?\s*(hours?|hrs?|h|minutes?|mins?|m|seconds?|secs?|s))+\s*$")
        .expect("valid unit duration regex")
});

/// Parses a duration string into seconds.
/// Supports:
/// - Plain integers (seconds)
/// - HH:MM:SS format
/// - MM:SS format
/// - Unit durations like "1h30m", "45m", "2h"
/// Returns None if parsing fails or value doesn't fit in u32.
pub fn parse_duration_seconds(s: &str) -> Option<u32> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }

    // Try plain integer first
    if let Ok(secs) = s.parse::<u64>() {
        return u32::try_from(secs).ok();
    }

    // Try HH:MM:SS or MM:SS
    if s.contains(':') {
        return parse_colon_format(s);
    }

    // Unit durations (1h30m, 45m, 2h, etc.)
    parse_unit_duration(s).and_then(|duration| u32::try_from(duration.as_secs()).ok())
}

/// Parses a duration into milliseconds, keeping a fractional seconds part
/// such as the `.500` in `00:01:02.500`.
pub fn parse_duration_millis(s: &str) -> Option<i64> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }

    if let Some((whole, fraction)) = s.rsplit_once('.') {
        let clock = |c: char| c.is_ascii_digit() || c == ':';
        if whole.chars().all(clock) && !fraction.is_empty() && fraction.chars().all(|c| c.is_ascii_digit()) {
            let secs = if whole.is_empty() {
                0
            } else {
                i64::from(parse_duration_seconds(whole)?)
            };
            let millis: String = fraction.chars().chain("00".chars()).take(3).collect();
            return Some(secs * 1000 + millis.parse::<i64>().ok()?);
        }
    }

    if !s.contains(':') && !s.chars().all(|c| c.is_ascii_digit()) {
        return parse_unit_duration(s).and_then(|duration| i64::try_from(duration.as_millis()).ok());
    }

    parse_duration_seconds(s).map(|secs| i64::from(secs) * 1000)
}

fn parse_unit_duration(s: &str) -> Option<Duration> {
    if !UNIT_DURATION_RE.is_match(s) {
        return None;
    }
    parse_duration::parse(s).ok()
}

fn parse_colon_format(s: &str) -> Option<u32> {
    let parts: Vec<&str> = s.split(':').collect();

    match parts.len() {
        2 => {
            // MM:SS
            let mins: u64 = parts[0].parse().ok()?;
            let secs: u64 = parts[1].parse().ok()?;
            let total = mins * 60 + secs;
            u32::try_from(total).ok()
        }
        3 => {
            // HH:MM:SS
            let hours: u64 = parts[0].parse().ok()?;
            let mins: u64 = parts[1].parse().ok()?;
            let secs: u64 = parts[2].parse().ok()?;
            let total = hours * 3600 + mins * 60 + secs;
            u32::try_from(total).ok()
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_integer() {
        assert_eq!(parse_duration_seconds("123"), Some(123));
        assert_eq!(parse_duration_seconds("0"), Some(0));
    }

    #[test]
    fn test_hhmmss() {
        assert_eq!(parse_duration_seconds("01:02:03"), Some(3723));
        assert_eq!(parse_duration_seconds("0:0:0"), Some(0));
    }

    #[test]
    fn test_mmss() {
        assert_eq!(parse_duration_seconds("05:30"), Some(330));
        assert_eq!(parse_duration_seconds("0:30"), Some(30));
    }

    #[test]
    fn test_go_duration() {
        assert_eq!(parse_duration_seconds("1h30m"), Some(5400));
        assert_eq!(parse_duration_seconds("45m"), Some(2700));
        assert_eq!(parse_duration_seconds("2h"), Some(7200));
    }

    #[test]
    fn test_millis_with_fraction() {
        assert_eq!(parse_duration_millis("00:01:02.500"), Some(62_500));
        assert_eq!(parse_duration_millis("1:02.5"), Some(62_500));
        assert_eq!(parse_duration_millis("12.25"), Some(12_250));
        assert_eq!(parse_duration_millis(".5"), Some(500));
    }

    #[test]
    fn test_millis_without_fraction() {
        assert_eq!(parse_duration_millis("01:02:03"), Some(3_723_000));
        assert_eq!(parse_duration_millis("90"), Some(90_000));
        assert_eq!(parse_duration_millis("1h30m"), Some(5_400_000));
        assert_eq!(parse_duration_millis(""), None);
        assert_eq!(parse_duration_millis("1:2:3:4"), None);
        assert_eq!(parse_duration_millis("soon"), None);
    }

    #[test]
    fn test_unit_strings_with_spaces_and_words() {
        assert_eq!(parse_duration_seconds("1h 30m"), Some(5400));
        assert_eq!(parse_duration_seconds("2 hours 5 minutes"), Some(7500));
        assert_eq!(parse_duration_millis("1.5s"), Some(1500));
    }

    #[test]
    fn test_huge_exponents_are_rejected_quickly() {
        let start = std::time::Instant::now();
        assert_eq!(parse_duration_millis("1e50000000s"), None);
        assert_eq!(parse_duration_seconds("1e5000000s"), None);
        assert_eq!(parse_duration_millis(&format!("{}s", "9".repeat(10_000))), None);
        assert!(start.elapsed() < std::time::Duration::from_secs(1));
    }

    #[test]
    fn test_empty_returns_none() {
        assert!(parse_duration_seconds("").is_none());
        assert!(parse_duration_seconds("   ").is_none());
    }

    #[test]
    fn test_invalid_returns_none() {
        assert!(parse_duration_seconds("not a duration").is_none());
    }
}
