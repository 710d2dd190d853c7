//! Calendar arithmetic shared by scale math, event parsing and gridlines.
//!
//! Day offsets are signed fractional days relative to the reference instant
//! captured at engine construction. Gridline placement uses real calendar
//! arithmetic (actual month lengths) even though the pixel scale treats every
//! year as exactly [`DAYS_PER_REFERENCE_YEAR`] days wide.

use chrono::{DateTime, Datelike, NaiveDate, NaiveTime, Utc};

/// Pixel-days per year at every tier, leap years included.
pub const DAYS_PER_REFERENCE_YEAR: f64 = 365.0;

const MILLIS_PER_DAY: f64 = 86_400_000.0;

/// Signed fractional days from `reference` to `instant`.
#[must_use]
pub fn day_offset_between(instant: DateTime<Utc>, reference: DateTime<Utc>) -> f64 {
    (instant - reference).num_milliseconds() as f64 / MILLIS_PER_DAY
}

/// Signed fractional days from `reference` to midnight UTC of `date`.
#[must_use]
pub fn date_day_offset(date: NaiveDate, reference: DateTime<Utc>) -> f64 {
    day_offset_between(date.and_time(NaiveTime::MIN).and_utc(), reference)
}

/// Calendar-day grouping key in UTC.
#[must_use]
pub fn day_key(instant: DateTime<Utc>) -> (i32, u32, u32) {
    let date = instant.date_naive();
    (date.year(), date.month(), date.day())
}

/// Parses an ISO-8601 date or datetime into a UTC instant.
///
/// Accepted shapes, tried in order: RFC 3339 with offset, naive datetime
/// (`2024-07-15T09:30:00`, assumed UTC), bare date (`2024-07-15`, midnight).
#[must_use]
pub fn parse_instant(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(instant) = DateTime::parse_from_rfc3339(raw) {
        return Some(instant.with_timezone(&Utc));
    }
    if let Ok(naive) = chrono::NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S") {
        return Some(naive.and_utc());
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date.and_time(NaiveTime::MIN).and_utc());
    }
    None
}

/// Midnight UTC on January 1 of `year`, if representable.
#[must_use]
pub fn year_start(year: i32) -> Option<DateTime<Utc>> {
    Some(
        NaiveDate::from_ymd_opt(year, 1, 1)?
            .and_time(NaiveTime::MIN)
            .and_utc(),
    )
}

/// First day of the given 1-based month, if representable.
#[must_use]
pub fn month_start(year: i32, month: u32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, 1)
}

/// Number of days in the given 1-based month.
#[must_use]
pub fn days_in_month(year: i32, month: u32) -> u32 {
    let Some(start) = month_start(year, month) else {
        return 0;
    };
    let next = if month == 12 {
        month_start(year + 1, 1)
    } else {
        month_start(year, month + 1)
    };
    next.map_or(0, |next| (next - start).num_days() as u32)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn utc(raw: &str) -> DateTime<Utc> {
        parse_instant(raw).expect("test instant")
    }

    #[test]
    fn day_offset_is_signed_and_fractional() {
        let reference = utc("2024-06-15");
        assert_eq!(day_offset_between(utc("2024-06-16"), reference), 1.0);
        assert_eq!(day_offset_between(utc("2024-06-14"), reference), -1.0);
        assert!((day_offset_between(utc("2024-06-15T12:00:00"), reference) - 0.5).abs() <= 1e-9);
    }

    #[test]
    fn parse_instant_accepts_date_datetime_and_rfc3339() {
        assert!(parse_instant("2024-07-15").is_some());
        assert!(parse_instant("2024-07-15T09:30:00").is_some());
        assert!(parse_instant("2024-07-15T09:30:00+03:00").is_some());
        assert!(parse_instant("not a date").is_none());
        assert!(parse_instant("2024-13-40").is_none());
    }

    #[test]
    fn days_in_month_uses_real_calendar_lengths() {
        assert_eq!(days_in_month(2024, 2), 29);
        assert_eq!(days_in_month(2023, 2), 28);
        assert_eq!(days_in_month(2024, 12), 31);
        assert_eq!(days_in_month(2024, 4), 30);
    }
}
