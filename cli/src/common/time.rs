//! # fileutils Timestamp Formatting
//!
//! File: cli/src/common/time.rs
//!
//! Small helpers for turning a local timestamp into a string, used when scripts
//! name output directories or log files after the current time.
//!
//! The timestamp defaults to *now, evaluated on every call*. Formatting is
//! guarded: an invalid strftime pattern produces an empty string instead of an
//! error.
//!
use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, Local};
use std::fmt::Write;
use tracing::warn;

/// Format used when no explicit format is given.
pub const DEFAULT_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Formats `time` (or the current local time) with `fmt` (or `DEFAULT_TIME_FORMAT`).
///
/// Returns an empty string when the format string cannot be rendered.
pub fn time_string(time: Option<DateTime<Local>>, fmt: Option<&str>) -> String {
    let time = time.unwrap_or_else(Local::now);
    let fmt = fmt.unwrap_or(DEFAULT_TIME_FORMAT);
    let mut out = String::new();
    // DelayedFormat reports invalid items through fmt::Error instead of panicking here.
    if write!(out, "{}", time.format(fmt)).is_err() {
        warn!("Invalid time format {:?}", fmt);
        return String::new();
    }
    out
}

/// Returns true when `fmt` contains no invalid strftime specifiers.
pub fn is_valid_format(fmt: &str) -> bool {
    StrftimeItems::new(fmt).all(|item| !matches!(item, Item::Error))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn fixed_time() -> DateTime<Local> {
        Local.with_ymd_and_hms(2024, 3, 9, 7, 5, 1).unwrap()
    }

    #[test]
    fn test_default_format() {
        assert_eq!(time_string(Some(fixed_time()), None), "2024-03-09 07:05:01");
    }

    #[test]
    fn test_custom_format() {
        assert_eq!(
            time_string(Some(fixed_time()), Some("%Y%m%d_%H%M")),
            "20240309_0705"
        );
    }

    #[test]
    fn test_invalid_format_yields_empty_string() {
        assert_eq!(time_string(Some(fixed_time()), Some("%Y-%")), "");
        assert!(!is_valid_format("%Y-%"));
        assert!(is_valid_format(DEFAULT_TIME_FORMAT));
    }

    #[test]
    fn test_now_is_evaluated_per_call() {
        let before = Local::now();
        let rendered = time_string(None, Some("%s"));
        let seconds: i64 = rendered.parse().unwrap();
        assert!(seconds >= before.timestamp());
    }
}
