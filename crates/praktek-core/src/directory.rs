//! Patient sign-up, doctor/patient lookups and schedule search.

use serde::Serialize;
use strsim::jaro_winkler;
use tracing::{info, warn};

use crate::db::{load, save, RecordStore};
use crate::error::{ClinicError, ClinicResult};
use crate::models::{next_sequential_id, Doctor, Patient, Schedule, Weekday, PATIENT_PREFIX};

/// Shown where a schedule points at a doctor that no longer exists.
pub const UNKNOWN_DOCTOR: &str = "Unknown Doctor";

/// Minimum Jaro-Winkler similarity for a typo-tolerant name match.
const NAME_SIMILARITY_THRESHOLD: f64 = 0.85;

/// How to filter schedules.
#[derive(Debug, Clone)]
pub enum SearchQuery {
    /// Doctor name, or part of it
    DoctorName(String),
    /// Specialty, or part of it
    Specialty(String),
    Day(Weekday),
}

/// A schedule together with its doctor's display fields.
#[derive(Debug, Clone, Serialize)]
pub struct ScheduleListing {
    pub schedule: Schedule,
    pub doctor_name: String,
    pub specialty: String,
}

/// Read access to doctors and patients, plus patient sign-up.
pub struct Directory<'a> {
    store: &'a dyn RecordStore,
}

impl<'a> Directory<'a> {
    pub fn new(store: &'a dyn RecordStore) -> Self {
        Self { store }
    }

    /// Sign up a new patient.
    ///
    /// Fields are trimmed first. Every failed rule is reported at once.
    pub fn register_patient(
        &self,
        name: &str,
        username: &str,
        contact: &str,
    ) -> ClinicResult<Patient> {
        let (name, username, contact) = (name.trim(), username.trim(), contact.trim());

        let mut problems = Vec::new();
        if name.chars().count() < 2 {
            problems.push("name must be at least 2 characters".to_string());
        }
        if username.chars().count() < 3 {
            problems.push("username must be at least 3 characters".to_string());
        }
        if contact.chars().count() < 10 {
            problems.push("contact must be at least 10 characters".to_string());
        }
        if !problems.is_empty() {
            return Err(ClinicError::InvalidPatient(problems));
        }

        let mut patients: Vec<Patient> = load(self.store)?;
        let wanted = username.to_lowercase();
        if patients.iter().any(|p| p.username.to_lowercase() == wanted) {
            warn!(username, "rejected sign-up with taken username");
            return Err(ClinicError::UsernameTaken(username.to_string()));
        }

        let id = next_sequential_id(PATIENT_PREFIX, patients.iter().map(|p| &p.id));
        let patient = Patient::new(&id, name, username, contact);
        patients.push(patient.clone());
        save(self.store, &patients)?;

        info!(patient_id = %patient.id, username, "registered patient");
        Ok(patient)
    }

    pub fn doctors(&self) -> ClinicResult<Vec<Doctor>> {
        Ok(load(self.store)?)
    }

    pub fn patients(&self) -> ClinicResult<Vec<Patient>> {
        Ok(load(self.store)?)
    }

    pub fn doctor(&self, doctor_id: &str) -> ClinicResult<Option<Doctor>> {
        Ok(self.doctors()?.into_iter().find(|d| d.id == doctor_id))
    }

    pub fn patient(&self, patient_id: &str) -> ClinicResult<Option<Patient>> {
        Ok(self.patients()?.into_iter().find(|p| p.id == patient_id))
    }

    /// Doctor's display name, or [`UNKNOWN_DOCTOR`].
    pub fn doctor_name(&self, doctor_id: &str) -> ClinicResult<String> {
        Ok(self
            .doctor(doctor_id)?
            .map(|d| d.name)
            .unwrap_or_else(|| UNKNOWN_DOCTOR.to_string()))
    }

    /// Every schedule with its doctor, in stored order.
    pub fn listings(&self) -> ClinicResult<Vec<ScheduleListing>> {
        self.annotate(load(self.store)?)
    }

    /// Attach doctor name and specialty to each schedule.
    pub fn annotate(&self, schedules: Vec<Schedule>) -> ClinicResult<Vec<ScheduleListing>> {
        let doctors = self.doctors()?;

        Ok(schedules
            .into_iter()
            .map(|schedule| {
                let doctor = doctors.iter().find(|d| d.id == schedule.doctor_id);
                ScheduleListing {
                    doctor_name: doctor.map_or(UNKNOWN_DOCTOR, |d| d.name.as_str()).to_string(),
                    specialty: doctor.map_or("", |d| d.specialty.as_str()).to_string(),
                    schedule,
                }
            })
            .collect())
    }

    /// Schedules matching `query`.
    ///
    /// Name and specialty match as case-insensitive substrings. A name
    /// search that finds nothing retries with a similarity match, so
    /// `andy` still finds `Dr. Andi`.
    pub fn search_schedules(&self, query: &SearchQuery) -> ClinicResult<Vec<ScheduleListing>> {
        let listings = self.listings()?;

        let found = match query {
            SearchQuery::DoctorName(name) => {
                let needle = name.trim().to_lowercase();
                let exact: Vec<ScheduleListing> = listings
                    .iter()
                    .filter(|l| l.doctor_name.to_lowercase().contains(&needle))
                    .cloned()
                    .collect();
                if exact.is_empty() && !needle.is_empty() {
                    listings
                        .into_iter()
                        .filter(|l| name_similarity(&needle, &l.doctor_name) >= NAME_SIMILARITY_THRESHOLD)
                        .collect()
                } else {
                    exact
                }
            }
            SearchQuery::Specialty(specialty) => {
                let needle = specialty.trim().to_lowercase();
                listings
                    .into_iter()
                    .filter(|l| l.specialty.to_lowercase().contains(&needle))
                    .collect()
            }
            SearchQuery::Day(day) => listings
                .into_iter()
                .filter(|l| l.schedule.day == *day)
                .collect(),
        };
        Ok(found)
    }
}

/// Best similarity of `needle` against the whole name or any of its words.
fn name_similarity(needle: &str, name: &str) -> f64 {
    let name = name.to_lowercase();
    name.split(|c: char| c.is_whitespace() || c == '.')
        .filter(|word| !word.is_empty())
        .chain(std::iter::once(name.as_str()))
        .map(|candidate| jaro_winkler(needle, candidate))
        .fold(0.0, f64::max)
}
