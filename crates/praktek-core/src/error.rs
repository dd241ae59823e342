//! Front-desk error taxonomy.

use thiserror::Error;

use crate::db::StoreError;
use crate::models::{RegistrationStatus, Weekday, MAX_QUOTA};

/// Failures surfaced by schedule, booking and directory operations.
///
/// Every variant except [`ClinicError::Store`] is a validation failure that
/// leaves the record store untouched.
#[derive(Error, Debug)]
pub enum ClinicError {
    #[error("Invalid time format: '{0}' (expected HH:MM between 00:00 and 23:59)")]
    InvalidTimeFormat(String),

    #[error("Start time {start} must be earlier than end time {end}")]
    InvalidTimeOrder { start: String, end: String },

    #[error("Quota must be between 1 and {}, got {quota}", MAX_QUOTA)]
    InvalidQuota { quota: u32 },

    #[error("No practice slots can be scheduled on '{0}'")]
    UnschedulableDay(String),

    #[error("Schedule conflicts with existing slot {schedule_id}: {day} {start}-{end}")]
    ScheduleConflict {
        schedule_id: String,
        day: Weekday,
        start: String,
        end: String,
    },

    #[error("Schedule {schedule_id} still has {count} active registration(s)")]
    HasActiveRegistrations { schedule_id: String, count: usize },

    #[error("Schedule not found: {0}")]
    ScheduleNotFound(String),

    #[error("Doctor not found: {0}")]
    DoctorNotFound(String),

    #[error("Registration not found: {0}")]
    RegistrationNotFound(String),

    #[error("Registration {id} is {} and can no longer be changed", .status.as_str())]
    RegistrationClosed {
        id: String,
        status: RegistrationStatus,
    },

    #[error("Patient {patient_id} is already booked on {schedule_id} for {date}")]
    DuplicateBooking {
        patient_id: String,
        schedule_id: String,
        date: String,
    },

    #[error("Quota for {schedule_id} on {date} is full ({quota} patients)")]
    QuotaFull {
        schedule_id: String,
        date: String,
        quota: u32,
    },

    #[error("All {quota} queue numbers are taken")]
    QuotaExhausted { quota: u32 },

    #[error("Invalid patient data: {}", .0.join("; "))]
    InvalidPatient(Vec<String>),

    #[error("Username already in use: {0}")]
    UsernameTaken(String),

    #[error("Record store error: {0}")]
    Store(#[from] StoreError),
}

pub type ClinicResult<T> = Result<T, ClinicError>;
