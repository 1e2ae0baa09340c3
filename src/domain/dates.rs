//! Local date/time string helpers
//!
//! Completion history and purchase ledgers key on the *local* calendar
//! date rendered as a `dd.mm.yyyy` string, matching the format the
//! family's devices already wrote. Calendar events use ISO dates.

use chrono::{Duration, Local};

/// Today's local calendar date as `dd.mm.yyyy`
pub fn today_local_string() -> String {
    Local::now().format("%d.%m.%Y").to_string()
}

/// Current local wall-clock time as `HH:MM`
pub fn now_time_string() -> String {
    Local::now().format("%H:%M").to_string()
}

/// Today's local date as ISO `yyyy-mm-dd` (calendar events)
pub fn today_iso_string() -> String {
    Local::now().format("%Y-%m-%d").to_string()
}

/// ISO date `days` days from today
pub fn iso_date_in_days(days: i64) -> String {
    (Local::now() + Duration::days(days))
        .format("%Y-%m-%d")
        .to_string()
}
