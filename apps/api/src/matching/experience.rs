//! Experience evaluation: total years of work history against a required bucket.
//!
//! Entries are summed without overlap detection, so concurrent roles count twice.
//! An ongoing entry is measured up to the evaluation instant, which callers pass
//! in explicitly so scores stay reproducible.

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use thiserror::Error;

use crate::models::job_post::ExperienceBucket;
use crate::models::resume::ExperienceEntry;

pub const ONGOING_SENTINEL: &str = "Present";

const SECONDS_PER_YEAR: f64 = 365.0 * 24.0 * 60.0 * 60.0;

/// Flat score for candidates above the bucket's upper bound.
const OVERQUALIFIED_SCORE: f64 = 80.0;

#[derive(Debug, Error, PartialEq)]
pub enum ExperienceError {
    #[error("invalid {field} '{value}' (expected MM/YYYY)")]
    InvalidDate { field: &'static str, value: String },

    #[error("experience ends ({end}) before it starts ({start})")]
    EndBeforeStart { start: String, end: String },
}

/// Parses `MM/YYYY` (or `M/YYYY`) into the first instant of that month, UTC.
pub fn parse_month_year(value: &str) -> Option<DateTime<Utc>> {
    let (month, year) = value.trim().split_once('/')?;
    let month: u32 = month.trim().parse().ok()?;
    let year: i32 = year.trim().parse().ok()?;
    let start_of_month = NaiveDate::from_ymd_opt(year, month, 1)?.and_hms_opt(0, 0, 0)?;
    Some(Utc.from_utc_datetime(&start_of_month))
}

fn is_ongoing(end_date: Option<&str>) -> bool {
    match end_date.map(str::trim) {
        None | Some("") => true,
        Some(end) => end.eq_ignore_ascii_case(ONGOING_SENTINEL),
    }
}

/// Calendar time covered by one entry, in 365-day years.
pub fn entry_years(
    entry: &ExperienceEntry,
    evaluated_at: DateTime<Utc>,
) -> Result<f64, ExperienceError> {
    let start =
        parse_month_year(&entry.start_date).ok_or_else(|| ExperienceError::InvalidDate {
            field: "startDate",
            value: entry.start_date.clone(),
        })?;

    let end_label = entry.end_date.as_deref();
    let end = if is_ongoing(end_label) {
        evaluated_at
    } else {
        let raw = end_label.unwrap_or_default();
        parse_month_year(raw).ok_or_else(|| ExperienceError::InvalidDate {
            field: "endDate",
            value: raw.to_string(),
        })?
    };

    if end < start {
        return Err(ExperienceError::EndBeforeStart {
            start: entry.start_date.clone(),
            end: end_label.unwrap_or(ONGOING_SENTINEL).to_string(),
        });
    }

    Ok((end - start).num_seconds() as f64 / SECONDS_PER_YEAR)
}

pub fn total_years(
    entries: &[ExperienceEntry],
    evaluated_at: DateTime<Utc>,
) -> Result<f64, ExperienceError> {
    entries
        .iter()
        .map(|entry| entry_years(entry, evaluated_at))
        .sum()
}

/// Classifies total years against the bucket:
/// inside the range → 100, above → 80, below → linear partial credit.
pub fn classify_years(bucket: ExperienceBucket, years: f64) -> f64 {
    let (lower, upper) = bucket.range();
    if years >= lower && years <= upper {
        100.0
    } else if years > upper {
        OVERQUALIFIED_SCORE
    } else if lower > 0.0 {
        (years / lower * 100.0).clamp(0.0, 100.0)
    } else {
        0.0
    }
}

/// Experience score on a 0–100 scale. 0 when the bucket or the history is missing.
pub fn experience_match(
    required: Option<ExperienceBucket>,
    entries: &[ExperienceEntry],
    evaluated_at: DateTime<Utc>,
) -> Result<f64, ExperienceError> {
    let Some(bucket) = required else {
        return Ok(0.0);
    };
    if entries.is_empty() {
        return Ok(0.0);
    }

    let years = total_years(entries, evaluated_at)?;
    Ok(classify_years(bucket, years))
}
