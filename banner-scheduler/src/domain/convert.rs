//! Conversions between minute offsets, clock strings and track positions.
//!
//! Minute offsets count from local midnight. The track is one day wide;
//! positions past its right edge map to minutes past 1440, which callers
//! clamp according to the gesture in progress.

use super::{MINUTES_PER_DAY, SNAP_MINUTES};

/// Width of one hour on the reference track.
pub const PIXELS_PER_HOUR: f64 = 300.0;

/// Width of one snap step (15 minutes) on the reference track.
pub const PIXELS_PER_SNAP: f64 = PIXELS_PER_HOUR * SNAP_MINUTES as f64 / 60.0;

/// Full width of the reference 24-hour track.
pub const TRACK_WIDTH_PX: f64 = PIXELS_PER_HOUR * 24.0;

/// Format a minute offset as a 12-hour clock string, e.g. `5:30 PM`.
///
/// Offsets past midnight wrap into the next day, so `1440` reads
/// `12:00 AM` again.
pub fn to_display_time(minutes: u32) -> String {
    let minutes = minutes % MINUTES_PER_DAY;
    let hours = minutes / 60;
    let mins = minutes % 60;

    let period = if hours < 12 { "AM" } else { "PM" };
    let display_hours = if hours % 12 == 0 { 12 } else { hours % 12 };

    format!("{}:{:02} {}", display_hours, mins, period)
}

/// Display range such as `5:00 PM – 6:00 PM`, marking next-day ends.
pub fn to_display_range(start: u32, end: u32) -> String {
    let suffix = if end > MINUTES_PER_DAY { " (+1 day)" } else { "" };
    format!(
        "{} – {}{}",
        to_display_time(start),
        to_display_time(end),
        suffix
    )
}

/// Header label for an hour column: `12 AM`, `1 AM` … `11 PM`.
pub fn hour_label(hour: u32) -> String {
    let hour = hour % 24;
    match hour {
        0 => "12 AM".to_string(),
        12 => "12 PM".to_string(),
        h if h < 12 => format!("{} AM", h),
        h => format!("{} PM", h - 12),
    }
}

/// Map a horizontal offset on a track of `total_width` to minutes, rounded
/// to the nearest snap step.
///
/// Offsets outside `[0, total_width]` produce minutes outside `[0, 1440]`.
pub fn pixel_to_minutes(pixel_offset: f64, total_width: f64) -> i32 {
    if total_width <= 0.0 {
        return 0;
    }
    let raw = pixel_offset / total_width * MINUTES_PER_DAY as f64;
    let step = SNAP_MINUTES as f64;
    ((raw / step).round() * step) as i32
}

/// Horizontal offset of a minute on a track of `total_width`.
pub fn minutes_to_pixels(minutes: u32, total_width: f64) -> f64 {
    minutes as f64 / MINUTES_PER_DAY as f64 * total_width
}

/// Position of a minute as a percentage of the day.
pub fn minutes_to_percent(minutes: u32) -> f64 {
    minutes as f64 / MINUTES_PER_DAY as f64 * 100.0
}

/// Format a minute offset for a text field: `HH:MM`, with `24:00` for the
/// end of the day.
pub fn to_input_time(minutes: u32) -> String {
    if minutes == MINUTES_PER_DAY {
        return "24:00".to_string();
    }
    let minutes = minutes % MINUTES_PER_DAY;
    format!("{:02}:{:02}", minutes / 60, minutes % 60)
}

/// Parse a time of day into a minute offset.
///
/// Accepts `HH:MM` / `H:MM` in 24-hour form, `24:00`, and 12-hour input
/// such as `5:30 PM`, `5:30pm` or `5 PM`.
pub fn parse_time_of_day(input: &str) -> Option<u32> {
    let upper = input.trim().to_ascii_uppercase();

    let (clock, meridiem) = if let Some(rest) = upper.strip_suffix("AM") {
        (rest.trim_end(), Some(false))
    } else if let Some(rest) = upper.strip_suffix("PM") {
        (rest.trim_end(), Some(true))
    } else {
        (upper.as_str(), None)
    };

    let (h, m) = match clock.split_once(':') {
        Some(parts) => parts,
        None if meridiem.is_some() => (clock, "00"),
        None => return None,
    };

    let is_digits = |s: &str| !s.is_empty() && s.chars().all(|c| c.is_ascii_digit());
    if !is_digits(h) || h.len() > 2 || !is_digits(m) || m.len() != 2 {
        return None;
    }

    let hours: u32 = h.parse().ok()?;
    let mins: u32 = m.parse().ok()?;
    if mins > 59 {
        return None;
    }

    match meridiem {
        Some(pm) => {
            if !(1..=12).contains(&hours) {
                return None;
            }
            let hours = hours % 12 + if pm { 12 } else { 0 };
            Some(hours * 60 + mins)
        }
        None if hours == 24 && mins == 0 => Some(MINUTES_PER_DAY),
        None if hours > 23 => None,
        None => Some(hours * 60 + mins),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_time_handles_midnight_and_noon() {
        assert_eq!(to_display_time(0), "12:00 AM");
        assert_eq!(to_display_time(720), "12:00 PM");
        assert_eq!(to_display_time(1440), "12:00 AM");
        assert_eq!(to_display_time(1425), "11:45 PM");
        assert_eq!(to_display_time(1050), "5:30 PM");
        assert_eq!(to_display_time(75), "1:15 AM");
    }

    #[test]
    fn display_range_marks_next_day() {
        assert_eq!(to_display_range(1020, 1080), "5:00 PM – 6:00 PM");
        assert_eq!(to_display_range(1380, 1500), "11:00 PM – 1:00 AM (+1 day)");
    }

    #[test]
    fn hour_labels() {
        assert_eq!(hour_label(0), "12 AM");
        assert_eq!(hour_label(1), "1 AM");
        assert_eq!(hour_label(12), "12 PM");
        assert_eq!(hour_label(23), "11 PM");
    }

    #[test]
    fn reference_track_constants() {
        assert_eq!(PIXELS_PER_SNAP, 75.0);
        assert_eq!(TRACK_WIDTH_PX, 7200.0);
    }

    #[test]
    fn pixel_round_trip_is_stable_on_the_grid() {
        for width in [TRACK_WIDTH_PX, 96.0, 1000.0, 333.0] {
            for m in (0..=MINUTES_PER_DAY).step_by(SNAP_MINUTES as usize) {
                assert_eq!(
                    pixel_to_minutes(minutes_to_pixels(m, width), width),
                    m as i32,
                    "width {width}, minute {m}"
                );
            }
        }
    }

    #[test]
    fn pixel_to_minutes_snaps_and_does_not_clamp() {
        assert_eq!(pixel_to_minutes(80.0, TRACK_WIDTH_PX), 15);
        assert_eq!(pixel_to_minutes(30.0, TRACK_WIDTH_PX), 0);
        assert_eq!(pixel_to_minutes(40.0, TRACK_WIDTH_PX), 15);
        assert_eq!(pixel_to_minutes(-300.0, TRACK_WIDTH_PX), -60);
        assert_eq!(pixel_to_minutes(7500.0, TRACK_WIDTH_PX), 1500);
        assert_eq!(pixel_to_minutes(10.0, 0.0), 0);
    }

    #[test]
    fn percentages() {
        assert_eq!(minutes_to_percent(720), 50.0);
        assert_eq!(minutes_to_percent(360), 25.0);
    }

    #[test]
    fn input_time_format() {
        assert_eq!(to_input_time(0), "00:00");
        assert_eq!(to_input_time(1050), "17:30");
        assert_eq!(to_input_time(1440), "24:00");
    }

    #[test]
    fn parses_24_hour_input() {
        assert_eq!(parse_time_of_day("17:30"), Some(1050));
        assert_eq!(parse_time_of_day("9:05"), Some(545));
        assert_eq!(parse_time_of_day(" 00:00 "), Some(0));
        assert_eq!(parse_time_of_day("24:00"), Some(1440));
        assert_eq!(parse_time_of_day("24:15"), None);
        assert_eq!(parse_time_of_day("12:60"), None);
        assert_eq!(parse_time_of_day("1730"), None);
        assert_eq!(parse_time_of_day("+1:30"), None);
        assert_eq!(parse_time_of_day(""), None);
    }

    #[test]
    fn parses_12_hour_input() {
        assert_eq!(parse_time_of_day("5:30 PM"), Some(1050));
        assert_eq!(parse_time_of_day("5:30pm"), Some(1050));
        assert_eq!(parse_time_of_day("12:00 AM"), Some(0));
        assert_eq!(parse_time_of_day("12:15 PM"), Some(735));
        assert_eq!(parse_time_of_day("7 am"), Some(420));
        assert_eq!(parse_time_of_day("13:00 PM"), None);
        assert_eq!(parse_time_of_day("0:30 AM"), None);
    }
}
