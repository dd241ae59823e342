//! Output formatting for command results.
//!
//! Every result prints either as human-readable text or as pretty JSON for
//! scripts.

use praktek_core::{
    ClinicStats, DayDistance, DoctorRoster, Patient, Registration, ScheduleListing,
    SlotAvailability,
};
use serde::Serialize;

/// A command result that can print in both formats.
pub trait Outputable: Serialize {
    fn to_human(&self) -> String;
}

/// Print a value in the selected format.
pub fn print_output<T: Outputable>(value: &T, json: bool) {
    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(value)
                .unwrap_or_else(|e| format!("{{\"error\": \"failed to serialize: {}\"}}", e))
        );
    } else {
        println!("{}", value.to_human());
    }
}

/// Slots with their doctors.
#[derive(Serialize)]
#[serde(transparent)]
pub struct ScheduleTable(pub Vec<ScheduleListing>);

impl Outputable for ScheduleTable {
    fn to_human(&self) -> String {
        if self.0.is_empty() {
            return "No schedules found.".to_string();
        }
        self.0
            .iter()
            .map(|l| {
                format!(
                    "{:<6} {:<22} {:<20} quota {}",
                    l.schedule.id,
                    format!("{} ({})", l.doctor_name, l.specialty),
                    l.schedule.describe(),
                    l.schedule.quota
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// A single registration and how far away it is.
#[derive(Serialize)]
pub struct RegistrationOutput {
    #[serde(flatten)]
    pub registration: Registration,
    pub when: DayDistance,
}

impl Outputable for RegistrationOutput {
    fn to_human(&self) -> String {
        let r = &self.registration;
        format!(
            "{:<6} patient {:<6} schedule {:<6} {} ({})  queue #{:<3} {}",
            r.id,
            r.patient_id,
            r.schedule_id,
            r.date,
            self.when,
            r.queue_number,
            r.status.as_str()
        )
    }
}

#[derive(Serialize)]
#[serde(transparent)]
pub struct RegistrationList(pub Vec<RegistrationOutput>);

impl RegistrationList {
    fn human_lines(registrations: &[RegistrationOutput]) -> String {
        registrations
            .iter()
            .map(Outputable::to_human)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl Outputable for RegistrationList {
    fn to_human(&self) -> String {
        if self.0.is_empty() {
            return "No registrations.".to_string();
        }
        Self::human_lines(&self.0)
    }
}

/// A patient with their booking history.
#[derive(Serialize)]
pub struct PatientOutput {
    pub patient: Patient,
    pub registrations: Vec<RegistrationOutput>,
}

impl Outputable for PatientOutput {
    fn to_human(&self) -> String {
        let p = &self.patient;
        let active = self
            .registrations
            .iter()
            .filter(|r| r.registration.is_active())
            .count();
        let mut out = format!(
            "Patient {}\n\
             =============\n\
             Name:       {}\n\
             Username:   {}\n\
             Contact:    {}\n\
             Active:     {} of {} registration(s)",
            p.id,
            p.name,
            p.username,
            p.contact,
            active,
            self.registrations.len()
        );
        for r in &self.registrations {
            out.push('\n');
            out.push_str(&r.to_human());
        }
        out
    }
}

/// A doctor's roster: per-slot load, then every registration.
#[derive(Serialize)]
pub struct RosterOutput {
    pub roster: DoctorRoster,
    pub registrations: Vec<RegistrationOutput>,
}

impl Outputable for RosterOutput {
    fn to_human(&self) -> String {
        let r = &self.roster;
        let mut out = format!(
            "Roster for {}\n\
             Registrations: {} ({} active)",
            r.doctor_id,
            r.entries.len(),
            r.active
        );
        if r.per_schedule.is_empty() {
            out.push_str("\nNo practice slots.");
            return out;
        }
        out.push_str("\n\nPer slot:");
        for load in &r.per_schedule {
            out.push_str(&format!(
                "\n  {:<6} {:<20} {:>2}/{:<2}  {:>5.1}%",
                load.schedule_id, load.slot, load.active, load.quota, load.utilisation
            ));
        }
        if !self.registrations.is_empty() {
            out.push_str("\n\n");
            out.push_str(&RegistrationList::human_lines(&self.registrations));
        }
        out
    }
}

#[derive(Serialize)]
#[serde(transparent)]
pub struct AvailabilityTable(pub Vec<SlotAvailability>);

impl Outputable for AvailabilityTable {
    fn to_human(&self) -> String {
        if self.0.is_empty() {
            return "No schedules found.".to_string();
        }
        self.0
            .iter()
            .map(|slot| {
                format!(
                    "{:<6} {:<20} {}  {:>2}/{:<2} booked  {}",
                    slot.schedule.id,
                    slot.schedule.describe(),
                    slot.date,
                    slot.booked,
                    slot.schedule.quota,
                    slot.availability.label()
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[derive(Serialize)]
#[serde(transparent)]
pub struct StatsOutput(pub ClinicStats);

impl Outputable for StatsOutput {
    fn to_human(&self) -> String {
        let s = &self.0;
        let mut out = format!(
            "Clinic Statistics\n\
             =================\n\
             Doctors:        {}\n\
             Patients:       {}\n\
             Schedules:      {}\n\
             Total quota:    {}\n\
             Active:         {}\n\
             Cancelled:      {}\n\
             Completed:      {}",
            s.doctors,
            s.patients,
            s.schedules,
            s.total_quota,
            s.active_registrations,
            s.cancelled_registrations,
            s.completed_registrations
        );
        for (title, entries) in [
            ("By day", &s.by_day),
            ("By doctor", &s.by_doctor),
            ("By specialty", &s.by_specialty),
        ] {
            if entries.is_empty() {
                continue;
            }
            out.push_str(&format!("\n\n{}:", title));
            for e in entries {
                out.push_str(&format!("\n  {:<16} {:>4}  {:>5.1}%", e.label, e.count, e.percentage));
            }
        }
        out
    }
}

/// Plain confirmation message.
#[derive(Serialize)]
pub struct Message {
    pub status: &'static str,
    pub message: String,
}

impl Message {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            status: "success",
            message: message.into(),
        }
    }
}

impl Outputable for Message {
    fn to_human(&self) -> String {
        self.message.clone()
    }
}
