//! Slot validation: time ranges, quotas, days and overlap conflicts.

use chrono::NaiveTime;

use crate::error::{ClinicError, ClinicResult};
use crate::models::{format_clock_time, parse_clock_time, Schedule, Weekday, MAX_QUOTA};

/// Parse and order-check a `start`/`end` pair of `HH:MM` times.
pub fn validate_time_range(start: &str, end: &str) -> ClinicResult<(NaiveTime, NaiveTime)> {
    let start_time =
        parse_clock_time(start).ok_or_else(|| ClinicError::InvalidTimeFormat(start.to_string()))?;
    let end_time =
        parse_clock_time(end).ok_or_else(|| ClinicError::InvalidTimeFormat(end.to_string()))?;

    if start_time >= end_time {
        return Err(ClinicError::InvalidTimeOrder {
            start: format_clock_time(start_time),
            end: format_clock_time(end_time),
        });
    }
    Ok((start_time, end_time))
}

/// Quota must be in `1..=MAX_QUOTA`.
pub fn validate_quota(quota: u32) -> ClinicResult<u32> {
    if (1..=MAX_QUOTA).contains(&quota) {
        Ok(quota)
    } else {
        Err(ClinicError::InvalidQuota { quota })
    }
}

/// Parse a day name into a day a slot may be held on.
pub fn parse_practice_day(raw: &str) -> ClinicResult<Weekday> {
    Weekday::parse(raw)
        .filter(|day| day.is_schedulable())
        .ok_or_else(|| ClinicError::UnschedulableDay(raw.trim().to_string()))
}

/// First slot of `doctor_id` on `day` that `[start, end)` collides with.
///
/// `exclude_id` skips the slot being edited.
pub fn find_conflict<'s>(
    doctor_id: &str,
    day: Weekday,
    start: NaiveTime,
    end: NaiveTime,
    schedules: &'s [Schedule],
    exclude_id: Option<&str>,
) -> Option<&'s Schedule> {
    schedules
        .iter()
        .filter(|s| s.doctor_id == doctor_id && s.day == day)
        .filter(|s| exclude_id != Some(s.id.as_str()))
        .find(|s| s.overlaps(start, end))
}
