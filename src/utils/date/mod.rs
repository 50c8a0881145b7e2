// Date utility functions
// Conversions between timeline milliseconds and local time

use chrono::{DateTime, Duration, Local, NaiveTime, TimeZone};

use crate::models::viewport::TimeMs;

/// Current local UTC offset in minutes (east of UTC is positive)
pub fn local_utc_offset_minutes() -> i32 {
    Local::now().offset().local_minus_utc() / 60
}

/// Local date-time for a timeline time, if it is representable
pub fn to_local(time: TimeMs) -> Option<DateTime<Local>> {
    Local.timestamp_millis_opt(time).single()
}

pub fn from_local(date: DateTime<Local>) -> TimeMs {
    date.timestamp_millis()
}

/// Midnight of the local day containing `date`
pub fn start_of_day(date: DateTime<Local>) -> Option<DateTime<Local>> {
    date.date_naive()
        .and_time(NaiveTime::MIN)
        .and_local_timezone(date.timezone())
        .earliest()
}

/// Label for a time on an axis spanning `visible_span` milliseconds.
///
/// Short spans show clock time, longer spans show the date.
pub fn format_axis_label(time: TimeMs, visible_span: TimeMs) -> String {
    let Some(local) = to_local(time) else {
        return time.to_string();
    };

    if visible_span <= Duration::hours(2).num_milliseconds() {
        local.format("%H:%M:%S").to_string()
    } else if visible_span <= Duration::days(3).num_milliseconds() {
        local.format("%H:%M").to_string()
    } else {
        local.format("%b %d").to_string()
    }
}

/// Tick spacing for an axis showing `visible_span` milliseconds in
/// roughly `max_ticks` steps
pub fn axis_step(visible_span: TimeMs, max_ticks: u32) -> TimeMs {
    const STEPS: [i64; 12] = [
        1_000,
        5_000,
        15_000,
        60_000,
        5 * 60_000,
        15 * 60_000,
        60 * 60_000,
        3 * 60 * 60_000,
        6 * 60 * 60_000,
        12 * 60 * 60_000,
        24 * 60 * 60_000,
        7 * 24 * 60 * 60_000,
    ];
    let max_ticks = i64::from(max_ticks.max(1));
    STEPS
        .iter()
        .copied()
        .find(|step| visible_span / step <= max_ticks)
        .unwrap_or(STEPS[STEPS.len() - 1])
}
