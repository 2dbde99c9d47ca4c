//! Quarter-hour time grid for the library business window.
//!
//! Shift times travel over the wire as hour fractions (11:30 is 11.5) and
//! are edited as `HH:MM` text. Valid times sit on a quarter-hour grid
//! between [`MIN_START_HOUR`] and [`MAX_END_HOUR`] inclusive.

use once_cell::sync::Lazy;

/// Earliest selectable shift time, as an hour fraction (11:30).
pub const MIN_START_HOUR: f64 = 11.5;

/// Latest selectable shift time, as an hour fraction (16:15).
pub const MAX_END_HOUR: f64 = 16.25;

/// The only minute values that sit on the grid.
pub const QUARTER_MINUTES: [u32; 4] = [0, 15, 30, 45];

/// Minute tokens accepted for the tea slot field.
pub const TEA_MINUTE_OPTIONS: [&str; 4] = ["00", "15", "30", "45"];

/// Operator hint for the shift time fields.
pub const TIME_HELP: &str =
    "Select a time between 11:30 and 16:15 (quarter-hour steps only).";

/// Operator hint for the tea slot field.
pub const TEA_HELP: &str =
    "Select 00, 15, 30, or 45 to set tea at 13:00, 13:15, 13:30, or 13:45.";

// Padding on the upper bound so repeated 0.25 steps cannot drop the final
// grid entry to floating-point drift.
const GRID_EPSILON: f64 = 1e-4;

/// Every selectable time in the business window, in order.
pub static TIME_OPTIONS: Lazy<Vec<String>> =
    Lazy::new(|| time_grid(MIN_START_HOUR, MAX_END_HOUR, 15));

/// Parse `H:MM` or `HH:MM` text into an hour fraction.
///
/// Minutes must be exactly two digits and one of {00, 15, 30, 45};
/// everything else is `None`. The surrounding business-window check is the
/// validator's job, not this function's.
pub fn parse_time(text: &str) -> Option<f64> {
    let trimmed = text.trim();
    let (hour_part, minute_part) = trimmed.split_once(':')?;
    if hour_part.is_empty() || hour_part.len() > 2 || minute_part.len() != 2 {
        return None;
    }
    if !hour_part.bytes().all(|b| b.is_ascii_digit())
        || !minute_part.bytes().all(|b| b.is_ascii_digit())
    {
        return None;
    }
    let hours: u32 = hour_part.parse().ok()?;
    let minutes: u32 = minute_part.parse().ok()?;
    if !QUARTER_MINUTES.contains(&minutes) {
        return None;
    }
    Some(f64::from(hours) + f64::from(minutes) / 60.0)
}

/// Format an hour fraction as zero-padded `HH:MM` text.
pub fn format_time(value: f64) -> String {
    let hours = value.floor();
    let minutes = ((value - hours) * 60.0).round() as u32;
    format!("{:02}:{:02}", hours as u32, minutes)
}

/// Enumerate every grid time from `min` to `max` inclusive.
pub fn time_grid(min: f64, max: f64, step_minutes: u32) -> Vec<String> {
    let step = f64::from(step_minutes) / 60.0;
    let mut times = Vec::new();
    let mut current = min;
    while current <= max + GRID_EPSILON {
        times.push(format_time(current));
        current += step;
    }
    times
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn parses_grid_times() {
        assert_eq!(parse_time("11:30"), Some(11.5));
        assert_eq!(parse_time("16:15"), Some(16.25));
        assert_eq!(parse_time("13:00"), Some(13.0));
        assert_eq!(parse_time("9:45"), Some(9.75));
        assert_eq!(parse_time(" 12:15 "), Some(12.25));
    }

    #[test]
    fn rejects_off_grid_minutes() {
        assert_eq!(parse_time("13:07"), None);
        assert_eq!(parse_time("13:05"), None);
        assert_eq!(parse_time("13:59"), None);
    }

    #[test]
    fn rejects_malformed_text() {
        assert_eq!(parse_time(""), None);
        assert_eq!(parse_time("13"), None);
        assert_eq!(parse_time("1300"), None);
        assert_eq!(parse_time("13:0"), None);
        assert_eq!(parse_time("13:000"), None);
        assert_eq!(parse_time("123:00"), None);
        assert_eq!(parse_time(":30"), None);
        assert_eq!(parse_time("ab:cd"), None);
        assert_eq!(parse_time("-1:30"), None);
        assert_eq!(parse_time("12:3 0"), None);
    }

    #[test]
    fn formats_zero_padded() {
        assert_eq!(format_time(11.5), "11:30");
        assert_eq!(format_time(16.25), "16:15");
        assert_eq!(format_time(9.75), "09:45");
        assert_eq!(format_time(13.0), "13:00");
    }

    #[test]
    fn grid_covers_business_window_inclusive() {
        let grid = time_grid(MIN_START_HOUR, MAX_END_HOUR, 15);
        assert_eq!(grid.len(), 20);
        assert_eq!(grid.first().map(String::as_str), Some("11:30"));
        assert_eq!(grid.last().map(String::as_str), Some("16:15"));
    }

    #[test]
    fn static_options_match_generated_grid() {
        assert_eq!(*TIME_OPTIONS, time_grid(MIN_START_HOUR, MAX_END_HOUR, 15));
    }

    #[test]
    fn every_grid_value_round_trips() {
        for text in TIME_OPTIONS.iter() {
            let value = parse_time(text).expect("grid text parses");
            assert!((MIN_START_HOUR..=MAX_END_HOUR + GRID_EPSILON).contains(&value));
            assert_eq!(&format_time(value), text);
        }
    }

    #[test]
    fn half_hour_grid_keeps_endpoint() {
        // 0.5-hour steps from 11:30 land exactly on 16:00; the epsilon must
        // not invent a 16:30 entry either.
        let grid = time_grid(11.5, 16.0, 30);
        assert_eq!(grid.first().map(String::as_str), Some("11:30"));
        assert_eq!(grid.last().map(String::as_str), Some("16:00"));
        assert_eq!(grid.len(), 10);
    }

    proptest! {
        #[test]
        fn prop_quarter_times_round_trip(hours in 0u32..24, index in 0usize..4) {
            let minutes = QUARTER_MINUTES[index];
            let text = format!("{:02}:{:02}", hours, minutes);
            let value = parse_time(&text).expect("quarter time parses");
            prop_assert_eq!(format_time(value), text);
        }

        #[test]
        fn prop_non_quarter_minutes_rejected(hours in 0u32..24, minutes in 0u32..60) {
            prop_assume!(!QUARTER_MINUTES.contains(&minutes));
            let text = format!("{:02}:{:02}", hours, minutes);
            prop_assert_eq!(parse_time(&text), None);
        }
    }
}
