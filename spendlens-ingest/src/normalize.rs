//! Cell-level coercion. Nothing here fails: bad input becomes a default.

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};

pub const DEFAULT_CATEGORY: &str = "Other";
pub const DEFAULT_DESCRIPTION: &str = "Unknown";

// US forms go ahead of "%Y/%m/%d": "%Y" would read "24" as the year 24.
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%m/%d/%y", "%m/%d/%Y", "%Y/%m/%d", "%d-%b-%Y"];

/// Parses landing before this year are a misread, not a real date
const MIN_YEAR: i32 = 1000;

const DATETIME_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M"];

/// True for cells that count as missing
pub fn is_blank(raw: &str) -> bool {
    raw.trim().is_empty()
}

/// Parse a date cell. Time-of-day, if any, is dropped.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
        .or_else(|| {
            DATETIME_FORMATS
                .iter()
                .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
                .map(|dt| dt.date())
        })
        .or_else(|| DateTime::parse_from_rfc3339(s).ok().map(|dt| dt.date_naive()))
        .filter(|d| d.year() >= MIN_YEAR)
}

/// Parse an amount cell; `None` for blank, malformed or non-finite values
pub fn parse_amount(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Text cell with a default for blanks
pub fn text_or(raw: Option<&str>, default: &str) -> String {
    match raw {
        Some(s) if !is_blank(s) => s.to_string(),
        _ => default.to_string(),
    }
}

/// Replace every character outside printable ASCII (0x20..=0x7E) with '?'
pub fn sanitize_description(raw: &str) -> String {
    raw.chars()
        .map(|c| if matches!(c, ' '..='~') { c } else { '?' })
        .collect()
}
