//! Consultation registration models.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Wire format for occurrence dates.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Registration status.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum RegistrationStatus {
    /// Booked and holding a queue number
    Registered,
    /// Released by the patient or front desk
    Cancelled,
    /// Consultation took place (set outside the booking engine)
    Completed,
}

impl RegistrationStatus {
    /// Persisted token.
    pub fn as_str(self) -> &'static str {
        match self {
            RegistrationStatus::Registered => "Registered",
            RegistrationStatus::Cancelled => "Cancelled",
            RegistrationStatus::Completed => "Completed",
        }
    }

    /// Parse a persisted token. Tables written by the older front desk
    /// used `Terdaftar`/`Dibatalkan`/`Selesai`.
    pub fn parse(token: &str) -> Option<Self> {
        match token.trim() {
            "Registered" | "Terdaftar" => Some(RegistrationStatus::Registered),
            "Cancelled" | "Dibatalkan" => Some(RegistrationStatus::Cancelled),
            "Completed" | "Selesai" => Some(RegistrationStatus::Completed),
            _ => None,
        }
    }

    /// Anything but a cancellation still occupies its queue number.
    pub fn is_active(self) -> bool {
        self != RegistrationStatus::Cancelled
    }
}

/// A patient's booking against one concrete occurrence of a schedule.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Registration {
    /// `R###` identifier
    pub id: String,
    /// Patient (`P###`)
    pub patient_id: String,
    /// Booked schedule (`J###`)
    pub schedule_id: String,
    /// Occurrence date
    pub date: NaiveDate,
    pub status: RegistrationStatus,
    /// Position in the queue for `(schedule_id, date)`
    pub queue_number: u32,
}

impl Registration {
    /// Create a fresh booking.
    pub fn new(
        id: String,
        patient_id: String,
        schedule_id: String,
        date: NaiveDate,
        queue_number: u32,
    ) -> Self {
        Self {
            id,
            patient_id,
            schedule_id,
            date,
            status: RegistrationStatus::Registered,
            queue_number,
        }
    }

    /// Check if this registration still holds its queue number.
    pub fn is_active(&self) -> bool {
        self.status.is_active()
    }

    /// Check if this registration is an active booking on `(schedule_id, date)`.
    pub fn occupies(&self, schedule_id: &str, date: NaiveDate) -> bool {
        self.is_active() && self.schedule_id == schedule_id && self.date == date
    }
}

/// How far away a booked date is, relative to today.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DayDistance {
    Today,
    Tomorrow,
    InDays(i64),
    Past,
}

impl DayDistance {
    pub fn between(today: NaiveDate, date: NaiveDate) -> Self {
        match (date - today).num_days() {
            0 => DayDistance::Today,
            1 => DayDistance::Tomorrow,
            n if n > 1 => DayDistance::InDays(n),
            _ => DayDistance::Past,
        }
    }
}

impl fmt::Display for DayDistance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DayDistance::Today => f.write_str("today"),
            DayDistance::Tomorrow => f.write_str("tomorrow"),
            DayDistance::InDays(n) => write!(f, "in {} days", n),
            DayDistance::Past => f.write_str("past"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(raw: &str) -> NaiveDate {
        NaiveDate::parse_from_str(raw, DATE_FORMAT).unwrap()
    }

    #[test]
    fn test_status_tokens() {
        for status in [
            RegistrationStatus::Registered,
            RegistrationStatus::Cancelled,
            RegistrationStatus::Completed,
        ] {
            assert_eq!(RegistrationStatus::parse(status.as_str()), Some(status));
        }

        assert_eq!(
            RegistrationStatus::parse("Dibatalkan"),
            Some(RegistrationStatus::Cancelled)
        );
        assert_eq!(
            RegistrationStatus::parse("Terdaftar"),
            Some(RegistrationStatus::Registered)
        );
        assert_eq!(RegistrationStatus::parse("cancelled"), None);
    }

    #[test]
    fn test_active_statuses() {
        assert!(RegistrationStatus::Registered.is_active());
        assert!(RegistrationStatus::Completed.is_active());
        assert!(!RegistrationStatus::Cancelled.is_active());
    }

    #[test]
    fn test_occupies() {
        let mut reg = Registration::new(
            "R001".into(),
            "P001".into(),
            "J001".into(),
            date("2026-10-19"),
            1,
        );
        assert!(reg.occupies("J001", date("2026-10-19")));
        assert!(!reg.occupies("J001", date("2026-10-26")));
        assert!(!reg.occupies("J002", date("2026-10-19")));

        reg.status = RegistrationStatus::Cancelled;
        assert!(!reg.occupies("J001", date("2026-10-19")));
    }

    #[test]
    fn test_day_distance() {
        let today = date("2026-10-19");
        assert_eq!(DayDistance::between(today, today), DayDistance::Today);
        assert_eq!(DayDistance::between(today, date("2026-10-20")), DayDistance::Tomorrow);
        assert_eq!(DayDistance::between(today, date("2026-10-26")), DayDistance::InDays(7));
        assert_eq!(DayDistance::between(today, date("2026-10-18")), DayDistance::Past);
        assert_eq!(DayDistance::InDays(7).to_string(), "in 7 days");
    }
}
