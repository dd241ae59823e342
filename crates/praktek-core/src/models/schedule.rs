//! Doctor schedule models.

use std::fmt;

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

/// Wire format for schedule start/end times.
pub const CLOCK_FORMAT: &str = "%H:%M";

/// Largest quota a single slot may carry.
pub const MAX_QUOTA: u32 = 50;

/// Day of the week, named the way the clinic tables store it.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Weekday {
    Senin,
    Selasa,
    Rabu,
    Kamis,
    Jumat,
    Sabtu,
    /// Present in the day map but never offered as a practice day
    Minggu,
}

impl Weekday {
    /// Days a doctor can hold a practice slot on.
    pub const SCHEDULABLE: [Weekday; 6] = [
        Weekday::Senin,
        Weekday::Selasa,
        Weekday::Rabu,
        Weekday::Kamis,
        Weekday::Jumat,
        Weekday::Sabtu,
    ];

    /// Monday = 0 .. Sunday = 6.
    pub fn ordinal(self) -> u32 {
        match self {
            Weekday::Senin => 0,
            Weekday::Selasa => 1,
            Weekday::Rabu => 2,
            Weekday::Kamis => 3,
            Weekday::Jumat => 4,
            Weekday::Sabtu => 5,
            Weekday::Minggu => 6,
        }
    }

    /// Persisted name.
    pub fn name(self) -> &'static str {
        match self {
            Weekday::Senin => "Senin",
            Weekday::Selasa => "Selasa",
            Weekday::Rabu => "Rabu",
            Weekday::Kamis => "Kamis",
            Weekday::Jumat => "Jumat",
            Weekday::Sabtu => "Sabtu",
            Weekday::Minggu => "Minggu",
        }
    }

    /// Parse a day name. Accepts the stored Indonesian names and their
    /// English equivalents, case-insensitively.
    pub fn parse(name: &str) -> Option<Self> {
        let day = match name.trim().to_lowercase().as_str() {
            "senin" | "monday" => Weekday::Senin,
            "selasa" | "tuesday" => Weekday::Selasa,
            "rabu" | "wednesday" => Weekday::Rabu,
            "kamis" | "thursday" => Weekday::Kamis,
            "jumat" | "friday" => Weekday::Jumat,
            "sabtu" | "saturday" => Weekday::Sabtu,
            "minggu" | "sunday" => Weekday::Minggu,
            _ => return None,
        };
        Some(day)
    }

    /// Whether a practice slot may be placed on this day.
    pub fn is_schedulable(self) -> bool {
        Self::SCHEDULABLE.contains(&self)
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl From<chrono::Weekday> for Weekday {
    fn from(day: chrono::Weekday) -> Self {
        match day {
            chrono::Weekday::Mon => Weekday::Senin,
            chrono::Weekday::Tue => Weekday::Selasa,
            chrono::Weekday::Wed => Weekday::Rabu,
            chrono::Weekday::Thu => Weekday::Kamis,
            chrono::Weekday::Fri => Weekday::Jumat,
            chrono::Weekday::Sat => Weekday::Sabtu,
            chrono::Weekday::Sun => Weekday::Minggu,
        }
    }
}

/// Parse a wall-clock `HH:MM` value in `[00:00, 23:59]`.
///
/// A single-digit hour (`8:30`) is accepted; minutes must be two digits.
pub fn parse_clock_time(raw: &str) -> Option<NaiveTime> {
    let (hours, minutes) = raw.trim().split_once(':')?;
    let digits = |s: &str| !s.is_empty() && s.chars().all(|c| c.is_ascii_digit());
    if !digits(hours) || hours.len() > 2 || !digits(minutes) || minutes.len() != 2 {
        return None;
    }
    let hours: u32 = hours.parse().ok()?;
    let minutes: u32 = minutes.parse().ok()?;
    if hours > 23 || minutes > 59 {
        return None;
    }
    NaiveTime::from_hms_opt(hours, minutes, 0)
}

/// Format a time the way schedule rows store it.
pub fn format_clock_time(time: NaiveTime) -> String {
    time.format(CLOCK_FORMAT).to_string()
}

/// A doctor's recurring weekly practice slot.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Schedule {
    /// `J###` identifier
    pub id: String,
    /// Owning doctor (`D###`)
    pub doctor_id: String,
    /// Practice day
    pub day: Weekday,
    /// Slot start (inclusive)
    pub start: NaiveTime,
    /// Slot end (exclusive)
    pub end: NaiveTime,
    /// Patients accepted per occurrence of the day
    pub quota: u32,
}

impl Schedule {
    /// Whether `[start, end)` collides with this slot.
    ///
    /// A new range that only touches this slot at a boundary does not
    /// collide.
    pub fn overlaps(&self, start: NaiveTime, end: NaiveTime) -> bool {
        (start >= self.start && start < self.end)
            || (end > self.start && end <= self.end)
            || (start <= self.start && end >= self.end)
    }

    /// `Senin 08:00-12:00`
    pub fn describe(&self) -> String {
        format!(
            "{} {}-{}",
            self.day,
            format_clock_time(self.start),
            format_clock_time(self.end)
        )
    }
}
