//! Queue-number allocation for one (schedule, date) occurrence.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{ClinicError, ClinicResult};
use crate::models::Registration;

/// Smallest queue number in `1..=quota` not present in `occupied`.
///
/// The result depends only on the two arguments.
pub fn allocate(quota: u32, occupied: &BTreeSet<u32>) -> ClinicResult<u32> {
    (1..=quota)
        .find(|n| !occupied.contains(n))
        .ok_or(ClinicError::QuotaExhausted { quota })
}

/// Queue numbers held by active registrations on `(schedule_id, date)`.
pub fn occupied_numbers(
    registrations: &[Registration],
    schedule_id: &str,
    date: NaiveDate,
) -> BTreeSet<u32> {
    registrations
        .iter()
        .filter(|r| r.occupies(schedule_id, date))
        .map(|r| r.queue_number)
        .collect()
}

/// Coarse availability of an occurrence, by remaining places.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Availability {
    Available,
    Limited,
    Full,
}

impl Availability {
    pub fn classify(remaining: i64) -> Self {
        match remaining {
            r if r <= 0 => Availability::Full,
            1 | 2 => Availability::Limited,
            _ => Availability::Available,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Availability::Available => "Available",
            Availability::Limited => "Limited",
            Availability::Full => "Full",
        }
    }
}
