use chrono::{Datelike, NaiveDate, NaiveDateTime, Timelike};

pub const MINUTES_PER_WEEK: u32 = 7 * 24 * 60;

/// minutes elapsed since 00:00 Monday of the timestamp's week.
pub fn week_minutes(t: &NaiveDateTime) -> u32 {
    t.weekday().num_days_from_monday() * 24 * 60 + t.hour() * 60 + t.minute()
}

/// the Monday date of the timestamp's week.
pub fn week_start(t: &NaiveDateTime) -> NaiveDate {
    t.date() - chrono::Duration::days(t.weekday().num_days_from_monday() as i64)
}

/// number of intervals of the given width covering one week. the final
/// interval is partial when the width does not divide the week evenly.
pub fn interval_count(width_minutes: u32) -> u32 {
    MINUTES_PER_WEEK.div_ceil(width_minutes)
}

/// index of the interval containing the given week-minute offset. intervals
/// partition [0, MINUTES_PER_WEEK) with no gaps or overlaps; offsets in the
/// final partial interval clamp to the last index.
pub fn interval_index(week_minutes: u32, width_minutes: u32) -> u32 {
    (week_minutes / width_minutes).min(interval_count(width_minutes) - 1)
}
