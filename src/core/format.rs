//! Pure formatting of clock output.
//!
//! All functions take local wall-clock time and never fail; the algorithm is
//! fixed and does not depend on the ambient locale.

use crate::models::ClockPreferences;
use crate::utils::time::local_datetime;
use chrono::{Datelike, NaiveDateTime, Timelike, Weekday};

const MONTHS: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// `HH:MM[:SS]` in 24-hour mode, `HH:MM[:SS] AM|PM` otherwise.
pub fn format_time(dt: &NaiveDateTime, prefs: &ClockPreferences) -> String {
    let hours = dt.hour();
    let minutes = dt.minute();
    let seconds = if prefs.show_seconds {
        format!(":{:02}", dt.second())
    } else {
        String::new()
    };

    if prefs.format24h {
        format!("{:02}:{:02}{}", hours, minutes, seconds)
    } else {
        let display_hours = match hours % 12 {
            0 => 12,
            h => h,
        };
        let period = if hours >= 12 { "PM" } else { "AM" };
        format!("{:02}:{:02}{} {}", display_hours, minutes, seconds, period)
    }
}

/// `Weekday, Month D, YYYY`, e.g. `Monday, January 15, 2024`.
pub fn format_date(dt: &NaiveDateTime) -> String {
    format!(
        "{}, {} {}, {}",
        weekday_name(dt.weekday()),
        MONTHS[dt.month0() as usize],
        dt.day(),
        dt.year()
    )
}

/// `M/D/YYYY, h:MM:SS AM|PM`, or `Never` for a zero timestamp.
pub fn format_last_viewed(ms: i64) -> String {
    if ms == 0 {
        return "Never".to_string();
    }

    let dt = local_datetime(ms);
    let (pm, hour12) = dt.hour12();
    format!(
        "{}/{}/{}, {}:{:02}:{:02} {}",
        dt.month(),
        dt.day(),
        dt.year(),
        hour12,
        dt.minute(),
        dt.second(),
        if pm { "PM" } else { "AM" }
    )
}

/// Convenience over [`format_time`] for an epoch timestamp.
pub fn format_time_at(ms: i64, prefs: &ClockPreferences) -> String {
    format_time(&local_datetime(ms), prefs)
}

/// Convenience over [`format_date`] for an epoch timestamp.
pub fn format_date_at(ms: i64) -> String {
    format_date(&local_datetime(ms))
}

fn weekday_name(w: Weekday) -> &'static str {
    match w {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}
