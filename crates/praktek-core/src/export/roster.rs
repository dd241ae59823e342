//! Patient roster for one doctor's slots.

use std::borrow::Cow;

use serde::{Deserialize, Serialize};

use crate::models::{Patient, Registration, Schedule, DATE_FORMAT};

/// One booked patient.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RosterEntry {
    pub registration_id: String,
    pub patient_id: String,
    pub patient_name: String,
    pub contact: String,
    /// `Senin 08:00-12:00`
    pub slot: String,
    /// `YYYY-MM-DD`
    pub date: String,
    pub queue_number: u32,
    pub status: String,
}

/// How full one of the doctor's slots is.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleLoad {
    pub schedule_id: String,
    pub slot: String,
    /// Active registrations across all dates
    pub active: usize,
    pub quota: u32,
    /// `active / quota` as 0-100; can pass 100 after a quota is lowered
    pub utilisation: f64,
}

/// Registrations on a doctor's slots, joined with patient details.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DoctorRoster {
    pub doctor_id: String,
    pub entries: Vec<RosterEntry>,
    /// Entries that still hold a queue number
    pub active: usize,
    /// One line per slot the doctor owns, in table order
    pub per_schedule: Vec<ScheduleLoad>,
}

impl DoctorRoster {
    /// Build from the doctor's registrations and full patient/schedule tables.
    pub fn build(
        doctor_id: &str,
        registrations: &[Registration],
        patients: &[Patient],
        schedules: &[Schedule],
    ) -> Self {
        let entries = registrations
            .iter()
            .map(|r| {
                let patient = patients.iter().find(|p| p.id == r.patient_id);
                RosterEntry {
                    registration_id: r.id.clone(),
                    patient_id: r.patient_id.clone(),
                    patient_name: patient.map_or("Unknown Patient", |p| p.name.as_str()).to_string(),
                    contact: patient.map_or("", |p| p.contact.as_str()).to_string(),
                    slot: schedules
                        .iter()
                        .find(|s| s.id == r.schedule_id)
                        .map_or_else(|| "Unknown".to_string(), Schedule::describe),
                    date: r.date.format(DATE_FORMAT).to_string(),
                    queue_number: r.queue_number,
                    status: r.status.as_str().to_string(),
                }
            })
            .collect();

        let per_schedule = schedules
            .iter()
            .filter(|s| s.doctor_id == doctor_id)
            .map(|s| {
                let active = registrations
                    .iter()
                    .filter(|r| r.is_active() && r.schedule_id == s.id)
                    .count();
                ScheduleLoad {
                    schedule_id: s.id.clone(),
                    slot: s.describe(),
                    active,
                    quota: s.quota,
                    utilisation: if s.quota == 0 {
                        0.0
                    } else {
                        active as f64 * 100.0 / f64::from(s.quota)
                    },
                }
            })
            .collect();

        Self {
            doctor_id: doctor_id.to_string(),
            entries,
            active: registrations.iter().filter(|r| r.is_active()).count(),
            per_schedule,
        }
    }

    /// Export to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// One line per entry under a header; patient text is quoted when needed.
    pub fn to_csv(&self) -> String {
        let mut csv =
            String::from("registration_id,patient_id,patient_name,contact,slot,date,queue_number,status\n");

        for entry in &self.entries {
            let queue_number = entry.queue_number.to_string();
            let fields = [
                csv_field(&entry.registration_id),
                csv_field(&entry.patient_id),
                csv_field(&entry.patient_name),
                csv_field(&entry.contact),
                csv_field(&entry.slot),
                Cow::Borrowed(entry.date.as_str()),
                Cow::Borrowed(queue_number.as_str()),
                Cow::Borrowed(entry.status.as_str()),
            ];
            csv.push_str(&fields.join(","));
            csv.push('\n');
        }

        csv
    }
}

/// Quote a roster field that contains a separator, quote or line break.
fn csv_field(value: &str) -> Cow<'_, str> {
    if value.contains([',', '"', '\n', '\r']) {
        Cow::Owned(format!("\"{}\"", value.replace('"', "\"\"")))
    } else {
        Cow::Borrowed(value)
    }
}
