// ABOUTME: Human-readable duration formatting for practice statistics
// ABOUTME: Converts second counts to "Xh Y min" style display strings
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Ora Wellness

/// Seconds in one hour
const SECONDS_PER_HOUR: i64 = 3600;
/// Seconds in one minute
const SECONDS_PER_MINUTE: i64 = 60;

/// Convert a duration in seconds to a display string
///
/// Under a minute renders as seconds, under an hour as minutes, and anything
/// longer as hours plus remaining minutes ("1h 0 min", "2h 35 min").
#[must_use]
pub fn format_duration(total_seconds: i64) -> String {
    let total_seconds = total_seconds.max(0);

    if total_seconds < SECONDS_PER_MINUTE {
        return format!("{total_seconds} sec");
    }

    if total_seconds < SECONDS_PER_HOUR {
        let minutes = total_seconds / SECONDS_PER_MINUTE;
        return format!("{minutes} min");
    }

    let hours = total_seconds / SECONDS_PER_HOUR;
    let minutes = (total_seconds % SECONDS_PER_HOUR) / SECONDS_PER_MINUTE;
    format!("{hours}h {minutes} min")
}

/// Convert a minute count to the same display format
#[must_use]
pub fn format_minutes(total_minutes: i64) -> String {
    format_duration(total_minutes.saturating_mul(SECONDS_PER_MINUTE))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sub_minute_renders_seconds() {
        assert_eq!(format_duration(0), "0 sec");
        assert_eq!(format_duration(59), "59 sec");
    }

    #[test]
    fn test_minute_boundary() {
        assert_eq!(format_duration(60), "1 min");
        assert_eq!(format_duration(61), "1 min");
        assert_eq!(format_duration(3599), "59 min");
    }

    #[test]
    fn test_hour_boundary() {
        assert_eq!(format_duration(3600), "1h 0 min");
        assert_eq!(format_duration(3660), "1h 1 min");
        assert_eq!(format_duration(9300), "2h 35 min");
    }

    #[test]
    fn test_negative_clamped_to_zero() {
        assert_eq!(format_duration(-5), "0 sec");
    }

    #[test]
    fn test_format_minutes() {
        assert_eq!(format_minutes(59), "59 min");
        assert_eq!(format_minutes(60), "1h 0 min");
        assert_eq!(format_minutes(95), "1h 35 min");
    }
}
