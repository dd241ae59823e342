//! Clinic-wide booking statistics.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::models::{Doctor, Patient, Registration, RegistrationStatus, Schedule};

/// One row of a breakdown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CountEntry {
    pub label: String,
    pub count: usize,
    /// Share of all active registrations, 0-100
    pub percentage: f64,
}

/// Snapshot of doctors, slots and registrations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClinicStats {
    pub doctors: usize,
    pub patients: usize,
    pub schedules: usize,
    /// Sum of every slot's quota
    pub total_quota: u64,
    pub active_registrations: usize,
    pub cancelled_registrations: usize,
    pub completed_registrations: usize,
    /// Active registrations per practice day, busiest first
    pub by_day: Vec<CountEntry>,
    /// Active registrations per doctor name, busiest first
    pub by_doctor: Vec<CountEntry>,
    /// Active registrations per specialty, busiest first
    pub by_specialty: Vec<CountEntry>,
}

impl ClinicStats {
    /// Compute statistics over full table snapshots.
    ///
    /// Registrations whose slot or doctor no longer exists still count in
    /// the totals but are left out of the breakdowns.
    pub fn compute(
        doctors: &[Doctor],
        patients: &[Patient],
        schedules: &[Schedule],
        registrations: &[Registration],
    ) -> Self {
        let count_status = |status: RegistrationStatus| {
            registrations.iter().filter(|r| r.status == status).count()
        };

        let mut by_day: HashMap<String, usize> = HashMap::new();
        let mut by_doctor: HashMap<String, usize> = HashMap::new();
        let mut by_specialty: HashMap<String, usize> = HashMap::new();

        let active: Vec<&Registration> = registrations.iter().filter(|r| r.is_active()).collect();
        for registration in &active {
            let Some(schedule) = schedules.iter().find(|s| s.id == registration.schedule_id) else {
                continue;
            };
            *by_day.entry(schedule.day.name().to_string()).or_default() += 1;

            if let Some(doctor) = doctors.iter().find(|d| d.id == schedule.doctor_id) {
                *by_doctor.entry(doctor.name.clone()).or_default() += 1;
                *by_specialty.entry(doctor.specialty.clone()).or_default() += 1;
            }
        }

        Self {
            doctors: doctors.len(),
            patients: patients.len(),
            schedules: schedules.len(),
            total_quota: schedules.iter().map(|s| u64::from(s.quota)).sum(),
            active_registrations: active.len(),
            cancelled_registrations: count_status(RegistrationStatus::Cancelled),
            completed_registrations: count_status(RegistrationStatus::Completed),
            by_day: ranked(by_day, active.len()),
            by_doctor: ranked(by_doctor, active.len()),
            by_specialty: ranked(by_specialty, active.len()),
        }
    }

    /// Export to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

fn ranked(counts: HashMap<String, usize>, total: usize) -> Vec<CountEntry> {
    let mut entries: Vec<CountEntry> = counts
        .into_iter()
        .map(|(label, count)| CountEntry {
            label,
            count,
            percentage: if total == 0 {
                0.0
            } else {
                count as f64 * 100.0 / total as f64
            },
        })
        .collect();
    // Ties by label so output is stable
    entries.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.label.cmp(&b.label)));
    entries
}
