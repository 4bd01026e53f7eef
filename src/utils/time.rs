//! Time helpers
//!
//! Dates travel through the API as `YYYY-MM-DD` strings and times as `HH:MM`;
//! all timestamps stored in the database are `i64` Unix millis. Conversion
//! happens here so repositories never touch chrono types.

use chrono::{Duration, NaiveDate, NaiveTime, Utc};

use super::{AppError, AppResult};

/// Current wall-clock time as Unix millis
pub fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

/// Parse a date string (YYYY-MM-DD)
pub fn parse_date(date: &str) -> AppResult<NaiveDate> {
    NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .map_err(|_| AppError::validation(format!("Invalid date format: {}", date)))
}

/// Parse a time string (HH:MM, seconds tolerated)
pub fn parse_time(time: &str) -> AppResult<NaiveTime> {
    NaiveTime::parse_from_str(time, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(time, "%H:%M:%S"))
        .map_err(|_| AppError::validation(format!("Invalid time format: {}", time)))
}

/// Today's date (UTC) as YYYY-MM-DD
pub fn today_string() -> String {
    Utc::now().date_naive().format("%Y-%m-%d").to_string()
}

/// The date `days` days before today (UTC) as YYYY-MM-DD
pub fn days_ago_string(days: i64) -> String {
    (Utc::now().date_naive() - Duration::days(days))
        .format("%Y-%m-%d")
        .to_string()
}

/// Weekday name ("Sunday".."Saturday") for a YYYY-MM-DD date string
pub fn weekday_name(date: &str) -> Option<String> {
    NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .ok()
        .map(|d| d.format("%A").to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_iso_dates() {
        assert!(parse_date("2025-06-01").is_ok());
        assert!(parse_date("01/06/2025").is_err());
        assert!(parse_date("").is_err());
    }

    #[test]
    fn parses_times_with_and_without_seconds() {
        assert!(parse_time("18:30").is_ok());
        assert!(parse_time("18:30:00").is_ok());
        assert!(parse_time("6pm").is_err());
    }

    #[test]
    fn weekday_names_match_calendar() {
        // 2025-06-01 was a Sunday
        assert_eq!(weekday_name("2025-06-01").as_deref(), Some("Sunday"));
        assert_eq!(weekday_name("2025-06-02").as_deref(), Some("Monday"));
        assert_eq!(weekday_name("not-a-date"), None);
    }

    #[test]
    fn date_strings_order_lexicographically() {
        // Range filters compare date strings directly; ISO dates must sort
        assert!(days_ago_string(30) < today_string());
    }
}
