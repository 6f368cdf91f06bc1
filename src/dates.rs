//! Chapter date normalization
//!
//! The site prints either a Spanish relative phrase ("hace 2 horas",
//! "hace 1 semana") or an absolute `dd/mm/yyyy` date. Both are turned into a
//! UTC timestamp; anything else is `None`.

use chrono::{DateTime, Duration, NaiveDate, NaiveTime, TimeZone, Utc};
use regex::Regex;
use std::sync::LazyLock;

static LEADING_NUMBER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d+").unwrap());
static ABSOLUTE_DATE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{1,2}/\d{1,2}/\d{4}$").unwrap());
static ARTICLE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(?:un|una|an|a)\b").unwrap());

/// Relative date marker as a whole word ("agosto" is not "ago")
static AGO_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(?:hace|ago)\b").unwrap());

/// Unit substrings in priority order; a month is 30 days
const UNITS: [(&[&str], i64); 4] = [
    (&["hora", "hour"], 60 * 60),
    (&["día", "dia", "day"], 24 * 60 * 60),
    (&["semana", "week"], 7 * 24 * 60 * 60),
    (&["mes", "month"], 30 * 24 * 60 * 60),
];

/// Normalize against the current instant
pub fn normalize_date(raw: &str) -> Option<DateTime<Utc>> {
    normalize_date_at(raw, Utc::now())
}

/// Normalize against a fixed reference instant
pub fn normalize_date_at(raw: &str, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    parse_relative(raw, now).or_else(|| parse_absolute(raw))
}

fn parse_relative(raw: &str, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
    let lower = raw.to_lowercase();
    if !AGO_MARKER.is_match(&lower) {
        return None;
    }

    let amount: i64 = match LEADING_NUMBER.find(&lower) {
        Some(m) => m.as_str().parse().ok()?,
        // "hace un día", "an hour ago"
        None if ARTICLE.is_match(&lower) => 1,
        None => return None,
    };

    let unit_secs = UNITS
        .iter()
        .find(|(names, _)| names.iter().any(|n| lower.contains(n)))
        .map(|(_, secs)| *secs)?;

    let delta = Duration::try_seconds(amount.checked_mul(unit_secs)?)?;
    now.checked_sub_signed(delta)
}

fn parse_absolute(raw: &str) -> Option<DateTime<Utc>> {
    if !ABSOLUTE_DATE.is_match(raw) {
        return None;
    }
    let date = NaiveDate::parse_from_str(raw, "%d/%m/%Y").ok()?;
    Some(Utc.from_utc_datetime(&date.and_time(NaiveTime::MIN)))
}
