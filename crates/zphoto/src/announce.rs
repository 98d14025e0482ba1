//! Day-counter announcements.

use chrono::NaiveDate;

/// Day 1 of the project.
pub const ANCHOR_DATE: (i32, u32, u32) = (2011, 2, 1);

/// [`ANCHOR_DATE`] as a date.
#[must_use]
pub fn anchor_date() -> NaiveDate {
    let (y, m, d) = ANCHOR_DATE;
    NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default()
}

/// Project day for `today`, counting the anchor date as day 1.
#[must_use]
pub fn day_number(today: NaiveDate, anchor: NaiveDate) -> i64 {
    today.signed_duration_since(anchor).num_days() + 1
}

/// Announcement text for `today`.
#[must_use]
pub fn announcement(today: NaiveDate) -> String {
    format!("Welcome to day {}!", day_number(today, anchor_date()))
}
