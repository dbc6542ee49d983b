// ABOUTME: Date parsing for pubDate, Atom published/updated and dc:date values.
// ABOUTME: Accepts the sloppy RFC 822 and W3C forms found in podcast feeds; future dates are discarded.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveTime, TimeZone, Utc};

/// Parses a feed date. W3C/ISO forms (`2024-03-01T10:00Z`, `2024-03-01`)
/// and RFC 822 forms (`Fri, 1 Mar 24 10:00 EST`) are both accepted.
/// Values without a zone are taken as UTC.
pub fn parse_flexible_time(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    if looks_like_w3c(s) {
        parse_w3c(s)
    } else {
        parse_rfc822(s)
    }
}

/// Parses a publication date, discarding dates later than now.
/// Publishers that schedule episodes ahead would otherwise pin them to the top.
pub fn parse_or_none_if_future(s: &str) -> Option<DateTime<Utc>> {
    parse_or_none_if_after(s, Utc::now())
}

fn parse_or_none_if_after(s: &str, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
    let parsed = parse_flexible_time(s);
    if parsed.is_none() && !s.trim().is_empty() {
        tracing::debug!(value = s, "ignoring unparseable date");
    }
    parsed.filter(|date| *date <= now)
}

fn looks_like_w3c(s: &str) -> bool {
    let b = s.as_bytes();
    b.len() >= 10 && b[..4].iter().all(u8::is_ascii_digit) && b[4] == b'-' && b[7] == b'-'
}

/// `YYYY-MM-DD`, optionally followed by `T` or a space, a time with or
/// without seconds, and `Z`, `±HH:MM`, `±HHMM` or `±HH`.
fn parse_w3c(s: &str) -> Option<DateTime<Utc>> {
    let date = NaiveDate::parse_from_str(s.get(..10)?, "%Y-%m-%d").ok()?;
    let rest = s.get(10..)?.trim();
    if rest.is_empty() {
        return Some(Utc.from_utc_datetime(&date.and_hms_opt(0, 0, 0)?));
    }
    let rest = rest.strip_prefix(['T', 't']).unwrap_or(rest).trim_start();

    let (clock, offset) = if let Some(clock) = rest.strip_suffix(['Z', 'z']) {
        (clock, 0)
    } else if let Some(idx) = rest.rfind(['+', '-']) {
        (&rest[..idx], numeric_offset(&rest[idx..])?)
    } else {
        (rest, 0)
    };
    let time = parse_clock(clock.trim())?;
    let offset = FixedOffset::east_opt(offset)?;
    let local = offset.from_local_datetime(&date.and_time(time)).single()?;
    Some(local.with_timezone(&Utc))
}

/// `[Weekday,] D Mon YY[YY] [H:MM[:SS] [zone]]`. Weekday names are not
/// checked against the date; tokens after the zone (`(UTC)`) are ignored.
fn parse_rfc822(s: &str) -> Option<DateTime<Utc>> {
    let cleaned = s.replace(',', " ");
    let mut tokens = cleaned
        .split_whitespace()
        .skip_while(|t| !t.starts_with(|c: char| c.is_ascii_digit()));

    let day: u32 = tokens.next()?.parse().ok()?;
    let month = month_number(tokens.next()?)?;
    let year = expand_year(tokens.next()?)?;
    let date = NaiveDate::from_ymd_opt(year, month, day)?;

    let time = match tokens.next() {
        Some(clock) => parse_clock(clock)?,
        None => NaiveTime::from_hms_opt(0, 0, 0)?,
    };
    let offset = match tokens.next() {
        Some(zone) => zone_offset(zone)?,
        None => 0,
    };
    let offset = FixedOffset::east_opt(offset)?;
    let local = offset.from_local_datetime(&date.and_time(time)).single()?;
    Some(local.with_timezone(&Utc))
}

fn parse_clock(clock: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(clock, "%H:%M:%S%.f")
        .or_else(|_| NaiveTime::parse_from_str(clock, "%H:%M"))
        .ok()
}

fn month_number(token: &str) -> Option<u32> {
    let prefix = token.get(..3)?.to_ascii_lowercase();
    let month = match prefix.as_str() {
        "jan" => 1,
        "feb" => 2,
        "mar" => 3,
        "apr" => 4,
        "may" => 5,
        "jun" => 6,
        "jul" => 7,
        "aug" => 8,
        "sep" => 9,
        "oct" => 10,
        "nov" => 11,
        "dec" => 12,
        _ => return None,
    };
    Some(month)
}

/// Two-digit years follow the RFC 2822 rule: 00-49 is 20xx, 50-99 is 19xx.
fn expand_year(token: &str) -> Option<i32> {
    let year: i32 = token.parse().ok()?;
    match token.len() {
        2 if year < 50 => Some(2000 + year),
        2 => Some(1900 + year),
        4 => Some(year),
        _ => None,
    }
}

/// Offset in seconds east of UTC for a numeric or named zone.
/// Unknown zone names count as UTC.
fn zone_offset(zone: &str) -> Option<i32> {
    if zone.starts_with(['+', '-']) {
        return numeric_offset(zone);
    }
    let hours = match zone.to_ascii_uppercase().as_str() {
        "GMT" | "UT" | "UTC" | "Z" | "WET" => 0,
        "EST" => -5,
        "EDT" => -4,
        "CST" => -6,
        "CDT" => -5,
        "MST" => -7,
        "MDT" => -6,
        "PST" => -8,
        "PDT" => -7,
        "AKST" => -9,
        "AKDT" => -8,
        "HST" => -10,
        "BST" | "CET" | "WEST" => 1,
        "CEST" | "EET" => 2,
        "EEST" => 3,
        "JST" | "KST" => 9,
        "AEST" => 10,
        "AEDT" => 11,
        other => {
            tracing::debug!(zone = other, "unknown time zone, assuming UTC");
            0
        }
    };
    Some(hours * 3600)
}

/// `±HH:MM`, `±HHMM` or `±HH`.
fn numeric_offset(zone: &str) -> Option<i32> {
    let sign = match zone.as_bytes().first()? {
        b'+' => 1,
        b'-' => -1,
        _ => return None,
    };
    let digits: String = zone[1..].chars().filter(|c| *c != ':').collect();
    if !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let (hours, minutes) = match digits.len() {
        2 => (digits.parse::<i32>().ok()?, 0),
        4 => (digits[..2].parse::<i32>().ok()?, digits[2..].parse::<i32>().ok()?),
        _ => return None,
    };
    if hours > 23 || minutes > 59 {
        return None;
    }
    Some(sign * (hours * 3600 + minutes * 60))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn utc(s: &str) -> DateTime<Utc> {
        DateTime::parse_from_rfc3339(s).unwrap().with_timezone(&Utc)
    }

    #[test]
    fn rfc822_variants() {
        let expected = utc("2006-01-02T22:04:05Z");
        for input in [
            "Mon, 02 Jan 2006 15:04:05 -0700",
            "Mon, 2 Jan 2006 15:04:05 MST",
            "2 Jan 2006 15:04:05 -07:00",
            "Monday, 02 January 2006 15:04:05 MST",
            "mon, 02 jan 06 22:04:05 GMT",
            "Mon,02 Jan 2006 22:04:05 +0000 (UTC)",
        ] {
            assert_eq!(parse_flexible_time(input), Some(expected), "{input}");
        }
    }

    #[test]
    fn rfc822_missing_parts() {
        assert_eq!(parse_flexible_time("Tue, 05 Nov 2019 08:30 EST"), Some(utc("2019-11-05T13:30:00Z")));
        assert_eq!(parse_flexible_time("05 Nov 2019 08:30:00"), Some(utc("2019-11-05T08:30:00Z")));
        assert_eq!(parse_flexible_time("05 Nov 2019"), Some(utc("2019-11-05T00:00:00Z")));
        assert_eq!(parse_flexible_time("Fri, 1 Mar 99 10:00 +0100"), Some(utc("1999-03-01T09:00:00Z")));
    }

    #[test]
    fn w3c_variants() {
        assert_eq!(parse_flexible_time("2024-03-01T10:00Z"), Some(utc("2024-03-01T10:00:00Z")));
        assert_eq!(parse_flexible_time("2024-03-01T10:00:00.250+0200"), Some(utc("2024-03-01T08:00:00.250Z")));
        assert_eq!(parse_flexible_time("2024-03-01 10:00:00"), Some(utc("2024-03-01T10:00:00Z")));
        assert_eq!(parse_flexible_time("2024-03-01T10:00:00-05"), Some(utc("2024-03-01T15:00:00Z")));
        assert_eq!(parse_flexible_time("2024-03-01"), Some(utc("2024-03-01T00:00:00Z")));
    }

    #[test]
    fn rejects_garbage() {
        for input in ["", "   ", "soon", "2024-13-01", "31 Feb 2024", "Mon, 02 Foo 2006 15:04:05 GMT", "2024-03-01T10:00+99:00"] {
            assert_eq!(parse_flexible_time(input), None, "{input}");
        }
    }

    #[test]
    fn future_dates_are_discarded() {
        let now = utc("2024-03-01T12:00:00Z");
        assert!(parse_or_none_if_after("2024-03-01T11:59:59Z", now).is_some());
        assert!(parse_or_none_if_after("2024-03-01T12:00:00Z", now).is_some());
        assert!(parse_or_none_if_after("Sat, 02 Mar 2024 00:00:00 GMT", now).is_none());
        assert!(parse_or_none_if_after("garbage", now).is_none());
    }
}
