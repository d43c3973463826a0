//! Human-readable elapsed time labels.

use chrono::{DateTime, TimeZone, Utc};

use rustops_entity::presence::{BucketKind, Recency};

const SECONDS_PER_MINUTE: i64 = 60;
const SECONDS_PER_HOUR: i64 = 3_600;
const SECONDS_PER_DAY: i64 = 86_400;
const DAYS_PER_WEEK: i64 = 7;
const DAYS_PER_MONTH: i64 = 30;
const DAYS_PER_YEAR: i64 = 365;

/// Format the time elapsed from `past` to `now`.
///
/// The largest unit wins: years, then 30-day months, weeks, days, and
/// finally hours and minutes. A `past` later than `now` is treated as zero
/// elapsed time.
pub fn format_recency<Tz1, Tz2>(now: DateTime<Tz1>, past: DateTime<Tz2>) -> Recency
where
    Tz1: TimeZone,
    Tz2: TimeZone,
{
    let elapsed = elapsed_seconds(now, past);
    let days = elapsed / SECONDS_PER_DAY;

    let (label, bucket) = if days >= DAYS_PER_YEAR {
        (unit_label(days / DAYS_PER_YEAR, "year"), BucketKind::Years)
    } else if days >= DAYS_PER_MONTH {
        (unit_label(days / DAYS_PER_MONTH, "month"), BucketKind::Months)
    } else if days >= DAYS_PER_WEEK {
        (unit_label(days / DAYS_PER_WEEK, "week"), BucketKind::Weeks)
    } else if days >= 1 {
        (unit_label(days, "day"), BucketKind::Days)
    } else {
        (clock_label(elapsed), BucketKind::Hours)
    };

    Recency::new(label, bucket, elapsed)
}

/// Compact label for the time since a roster was last checked.
///
/// Whole days are never rolled up into larger units: `"364d ago"`,
/// `"3h 12m ago"`, `"40m ago"`.
pub fn format_since_checked<Tz1, Tz2>(now: DateTime<Tz1>, past: DateTime<Tz2>) -> Recency
where
    Tz1: TimeZone,
    Tz2: TimeZone,
{
    let elapsed = elapsed_seconds(now, past);
    let days = elapsed / SECONDS_PER_DAY;
    if days >= 1 {
        Recency::new(format!("{days}d ago"), BucketKind::Days, elapsed)
    } else {
        Recency::new(clock_label(elapsed), BucketKind::Hours, elapsed)
    }
}

fn elapsed_seconds<Tz1: TimeZone, Tz2: TimeZone>(now: DateTime<Tz1>, past: DateTime<Tz2>) -> i64 {
    (now.with_timezone(&Utc) - past.with_timezone(&Utc))
        .num_seconds()
        .max(0)
}

fn clock_label(elapsed: i64) -> String {
    let hours = elapsed / SECONDS_PER_HOUR;
    let minutes = (elapsed % SECONDS_PER_HOUR) / SECONDS_PER_MINUTE;
    if hours > 0 {
        format!("{hours}h {minutes}m ago")
    } else {
        format!("{minutes}m ago")
    }
}

fn unit_label(count: i64, unit: &str) -> String {
    if count > 1 {
        format!("{count} {unit}s ago")
    } else {
        format!("{count} {unit} ago")
    }
}
