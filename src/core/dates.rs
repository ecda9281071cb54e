//! Date-key helpers for Tally.
//!
//! All persisted dates are calendar dates serialized as zero-padded
//! `YYYY-MM-DD` keys: local wall-clock date, day granularity, no timezone
//! component. Zero-padding makes ascending lexicographic order equal to
//! chronological order, which the persisted history shape relies on.

use chrono::{Local, NaiveDate};

use crate::error::{Result, TallyError};

/// Format of a persisted date key.
pub const DATE_KEY_FORMAT: &str = "%Y-%m-%d";

/// Serialize a date as a `YYYY-MM-DD` key.
pub fn date_key(date: NaiveDate) -> String {
    date.format(DATE_KEY_FORMAT).to_string()
}

/// Parse a `YYYY-MM-DD` key back into a date.
pub fn parse_date_key(key: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(key, DATE_KEY_FORMAT)
        .map_err(|_| TallyError::invalid_date(key))
}

/// Today's local calendar date.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Short display form, e.g. "Mon, Jan 5".
pub fn display_short(date: NaiveDate) -> String {
    date.format("%a, %b %-d").to_string()
}

/// Long display form, e.g. "Monday, Jan 5".
pub fn display_long(date: NaiveDate) -> String {
    date.format("%A, %b %-d").to_string()
}

/// Month title form, e.g. "January 2026".
pub fn month_title(year: i32, month: u32) -> Option<String> {
    NaiveDate::from_ymd_opt(year, month, 1).map(|d| d.format("%B %Y").to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_date_key_zero_padded() {
        assert_eq!(date_key(date(2026, 1, 5)), "2026-01-05");
        assert_eq!(date_key(date(2026, 12, 31)), "2026-12-31");
    }

    #[test]
    fn test_parse_date_key_round_trip() {
        let d = date(2026, 8, 28);
        assert_eq!(parse_date_key(&date_key(d)).unwrap(), d);
    }

    #[test]
    fn test_parse_date_key_rejects_garbage() {
        assert!(parse_date_key("not-a-date").is_err());
        assert!(parse_date_key("2026-13-01").is_err());
        assert!(parse_date_key("2026-02-30").is_err());
        assert!(parse_date_key("").is_err());
    }

    #[test]
    fn test_lexicographic_order_is_chronological() {
        let a = date_key(date(2026, 9, 2));
        let b = date_key(date(2026, 10, 1));
        assert!(a < b);
    }

    #[test]
    fn test_display_short() {
        // 2026-01-05 is a Monday
        assert_eq!(display_short(date(2026, 1, 5)), "Mon, Jan 5");
    }

    #[test]
    fn test_display_long() {
        assert_eq!(display_long(date(2026, 1, 5)), "Monday, Jan 5");
    }

    #[test]
    fn test_month_title() {
        assert_eq!(month_title(2026, 1).unwrap(), "January 2026");
        assert!(month_title(2026, 13).is_none());
    }
}
