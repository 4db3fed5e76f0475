//! `born_at` parsing and canonicalization.
//!
//! Input arrives in many shapes: RFC 3339, RFC 2822, assorted naive layouts,
//! bare dates and epoch digits. Everything ends up as one UTC instant rendered
//! as RFC 3339 with an explicit `+00:00` offset.
//!
//! Values without an offset are taken to be UTC.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, SecondsFormat, Utc};

use animal_etl_client::BornAt;

use crate::error::{Result, TransformError};

const FIELD: &str = "born_at";

/// Layouts carrying an explicit offset. Tried after RFC 3339 and RFC 2822.
const ZONED_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f%:z",
    "%Y-%m-%d %H:%M:%S%.f%:z",
    "%Y-%m-%dT%H:%M:%S%.f%z",
    "%Y-%m-%d %H:%M:%S%.f%z",
    "%Y-%m-%d %H:%M:%S%.f %z",
    "%Y-%m-%dT%H:%M%:z",
    "%Y-%m-%d %H:%M%:z",
    "%Y%m%dT%H%M%S%.f%:z",
    "%Y%m%dT%H%M%S%.f%z",
    "%Y%m%dT%H%M%:z",
];

const NAIVE_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M:%S%.f",
    "%Y/%m/%d %H:%M",
    "%m/%d/%Y %H:%M:%S%.f",
    "%m/%d/%Y %H:%M",
    "%d.%m.%Y %H:%M:%S",
    "%d.%m.%Y %H:%M",
    "%B %d, %Y %H:%M:%S",
    "%B %d %Y %H:%M:%S",
    "%B %d, %Y %H:%M",
    "%B %d %Y %H:%M",
    "%d %B %Y %H:%M:%S",
    "%d %B %Y %H:%M",
    // 12-hour clock
    "%Y-%m-%d %I:%M:%S %p",
    "%Y-%m-%d %I:%M %p",
    "%m/%d/%Y %I:%M:%S %p",
    "%m/%d/%Y %I:%M %p",
    "%B %d, %Y %I:%M:%S %p",
    "%B %d, %Y %I:%M %p",
    "%B %d %Y %I:%M:%S %p",
    "%B %d %Y %I:%M %p",
    "%d %B %Y %I:%M:%S %p",
    "%d %B %Y %I:%M %p",
    // ISO 8601 basic
    "%Y%m%dT%H%M%S%.f",
    "%Y%m%dT%H%M",
];

const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%m/%d/%Y",
    "%d.%m.%Y",
    "%d %B %Y",
    "%B %d, %Y",
    "%B %d %Y",
    "%a, %d %b %Y",
    "%A, %B %d, %Y",
];

/// Render an instant in the canonical submission form.
pub fn canonical_utc(instant: DateTime<Utc>) -> String {
    instant.to_rfc3339_opts(SecondsFormat::AutoSi, false)
}

/// Read an all-digit value by its length.
///
/// Calendar shapes come first: `YYYY`, `YYYYMMDD` and `YYYYMMDDHHMMSS`.
/// Only 9-10 digits (epoch seconds) and 13 digits (epoch milliseconds) are
/// read as Unix time; every other length is rejected.
fn from_digits(digits: &str) -> Option<DateTime<Utc>> {
    let naive = match digits.len() {
        4 => NaiveDate::from_ymd_opt(digits.parse().ok()?, 1, 1)?.and_time(NaiveTime::MIN),
        8 => NaiveDate::parse_from_str(digits, "%Y%m%d")
            .ok()?
            .and_time(NaiveTime::MIN),
        14 => NaiveDateTime::parse_from_str(digits, "%Y%m%d%H%M%S").ok()?,
        9 | 10 => return DateTime::from_timestamp(digits.parse().ok()?, 0),
        13 => return DateTime::from_timestamp_millis(digits.parse().ok()?),
        _ => return None,
    };
    Some(naive.and_utc())
}

/// Replace a trailing `Z`, ` UTC` or ` GMT` designator with `+00:00`.
fn normalize_utc_suffix(text: &str) -> Option<String> {
    for suffix in [" UTC", " GMT", "Z", "z"] {
        if let Some(stem) = text.strip_suffix(suffix) {
            return Some(format!("{}+00:00", stem.trim_end()));
        }
    }
    None
}

fn parse_zoned(text: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(text) {
        return Some(dt.with_timezone(&Utc));
    }
    ZONED_FORMATS
        .iter()
        .find_map(|fmt| DateTime::parse_from_str(text, fmt).ok())
        .map(|dt| dt.with_timezone(&Utc))
}

fn parse_naive(text: &str) -> Option<DateTime<Utc>> {
    NAIVE_DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(text, fmt).ok())
        .or_else(|| {
            DATE_FORMATS
                .iter()
                .find_map(|fmt| NaiveDate::parse_from_str(text, fmt).ok())
                .map(|date| date.and_time(NaiveTime::MIN))
        })
        .map(|naive| naive.and_utc())
}

/// Permissively parse a timestamp string into a UTC instant.
///
/// All-digit input is read by length: a bare year, a compact date or
/// date-time, or a Unix epoch in seconds (9-10 digits) or milliseconds (13).
pub fn parse_timestamp(text: &str) -> Option<DateTime<Utc>> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    if text.bytes().all(|b| b.is_ascii_digit()) {
        return from_digits(text);
    }

    parse_zoned(text)
        .or_else(|| normalize_utc_suffix(text).and_then(|t| parse_zoned(&t)))
        .or_else(|| parse_naive(text))
}

/// Normalize a raw `born_at` value to canonical UTC text.
///
/// Absent and blank values yield `None`. Unparseable text is an error naming
/// the field and the offending value.
pub fn normalize_born_at(raw: Option<&BornAt>) -> Result<Option<String>> {
    match raw {
        None => Ok(None),
        Some(BornAt::Zoned(dt)) => Ok(Some(canonical_utc(dt.with_timezone(&Utc)))),
        Some(BornAt::Naive(naive)) => Ok(Some(canonical_utc(naive.and_utc()))),
        Some(BornAt::Text(text)) if text.trim().is_empty() => Ok(None),
        Some(BornAt::Text(text)) => parse_timestamp(text)
            .map(|instant| Some(canonical_utc(instant)))
            .ok_or_else(|| {
                TransformError::invalid_field(FIELD, text.as_str(), "unrecognized date format")
            }),
    }
}
