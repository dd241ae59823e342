//! Next concrete date for a weekly slot.

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime};

use crate::models::Weekday;

/// When a slot falling on today's weekday moves to next week.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RolloverRule {
    /// Once the wall clock reaches the slot's end time.
    AfterEnd(NaiveTime),
    /// Always: today is never offered.
    Always,
}

/// Date of the next occurrence of `day` as seen at `now`.
pub fn compute_next_occurrence(day: Weekday, rule: RolloverRule, now: NaiveDateTime) -> NaiveDate {
    let today = now.date();
    let current = Weekday::from(today.weekday());
    let mut days_ahead = (i64::from(day.ordinal()) - i64::from(current.ordinal())).rem_euclid(7);

    if days_ahead == 0 {
        let roll = match rule {
            RolloverRule::AfterEnd(end) => now.time() >= end,
            RolloverRule::Always => true,
        };
        if roll {
            days_ahead = 7;
        }
    }
    today + Duration::days(days_ahead)
}
