//! Booking engine: registration, cancellation and rescheduling.
//!
//! Flow for a new booking:
//!
//! ```text
//! schedule ──► next occurrence date ──► duplicate check ──► quota check
//!                                                               │
//!                                         queue allocator ◄─────┘
//!                                               │
//!                                     append R### and write table
//! ```
//!
//! Nothing is written unless every check passes.

mod clock;
mod occurrence;

pub use clock::*;
pub use occurrence::*;

use std::collections::HashSet;

use chrono::NaiveDate;
use serde::Serialize;
use tracing::{info, warn};

use crate::db::{load, save, RecordStore};
use crate::error::{ClinicError, ClinicResult};
use crate::models::{
    next_sequential_id, DayDistance, Registration, RegistrationStatus, Schedule, DATE_FORMAT,
    REGISTRATION_PREFIX,
};
use crate::queue::{allocate, occupied_numbers, Availability};

/// Load state of one schedule's next occurrence.
#[derive(Debug, Clone, Serialize)]
pub struct SlotAvailability {
    pub schedule: Schedule,
    pub date: NaiveDate,
    /// Active registrations on `date`
    pub booked: usize,
    pub remaining: i64,
    pub availability: Availability,
}

/// Books patients onto schedule occurrences.
pub struct BookingEngine<'a> {
    store: &'a dyn RecordStore,
    clock: &'a dyn Clock,
}

impl<'a> BookingEngine<'a> {
    pub fn new(store: &'a dyn RecordStore, clock: &'a dyn Clock) -> Self {
        Self { store, clock }
    }

    /// Book `patient_id` onto the next occurrence of `schedule_id`.
    pub fn register(&self, patient_id: &str, schedule_id: &str) -> ClinicResult<Registration> {
        let schedules: Vec<Schedule> = load(self.store)?;
        let schedule = find_schedule(&schedules, schedule_id)?;

        let date = compute_next_occurrence(
            schedule.day,
            RolloverRule::AfterEnd(schedule.end),
            self.clock.now(),
        );

        let mut registrations: Vec<Registration> = load(self.store)?;
        if registrations
            .iter()
            .any(|r| r.patient_id == patient_id && r.occupies(schedule_id, date))
        {
            warn!(patient_id, schedule_id, %date, "rejected duplicate booking");
            return Err(ClinicError::DuplicateBooking {
                patient_id: patient_id.to_string(),
                schedule_id: schedule_id.to_string(),
                date: date.format(DATE_FORMAT).to_string(),
            });
        }

        let occupied = occupied_numbers(&registrations, schedule_id, date);
        let booked = registrations
            .iter()
            .filter(|r| r.occupies(schedule_id, date))
            .count();
        if booked >= schedule.quota as usize {
            warn!(schedule_id, %date, quota = schedule.quota, "rejected booking on full slot");
            return Err(ClinicError::QuotaFull {
                schedule_id: schedule_id.to_string(),
                date: date.format(DATE_FORMAT).to_string(),
                quota: schedule.quota,
            });
        }

        let queue_number = allocate(schedule.quota, &occupied)?;

        let registration = Registration::new(
            next_sequential_id(REGISTRATION_PREFIX, registrations.iter().map(|r| &r.id)),
            patient_id.to_string(),
            schedule_id.to_string(),
            date,
            queue_number,
        );
        registrations.push(registration.clone());
        save(self.store, &registrations)?;

        info!(
            registration_id = %registration.id,
            patient_id,
            schedule_id,
            %date,
            queue_number,
            "registered consultation"
        );
        Ok(registration)
    }

    /// Release a registration's queue number.
    ///
    /// Cancelling an already cancelled registration changes nothing.
    pub fn cancel(&self, registration_id: &str) -> ClinicResult<Registration> {
        let mut registrations: Vec<Registration> = load(self.store)?;
        let index = find_registration(&registrations, registration_id)?;

        match registrations[index].status {
            RegistrationStatus::Cancelled => return Ok(registrations[index].clone()),
            RegistrationStatus::Completed => {
                return Err(ClinicError::RegistrationClosed {
                    id: registration_id.to_string(),
                    status: RegistrationStatus::Completed,
                })
            }
            RegistrationStatus::Registered => {}
        }

        registrations[index].status = RegistrationStatus::Cancelled;
        let cancelled = registrations[index].clone();
        save(self.store, &registrations)?;

        info!(
            registration_id,
            schedule_id = %cancelled.schedule_id,
            date = %cancelled.date,
            queue_number = cancelled.queue_number,
            "cancelled registration"
        );
        Ok(cancelled)
    }

    /// Move a registration to the next occurrence of another slot.
    ///
    /// The registration keeps its id and patient. Today's occurrence is
    /// never offered. If every queue number on the new date is taken the
    /// registration is still moved, with queue number 1.
    pub fn reschedule(
        &self,
        registration_id: &str,
        new_schedule_id: &str,
    ) -> ClinicResult<Registration> {
        let mut registrations: Vec<Registration> = load(self.store)?;
        let index = find_registration(&registrations, registration_id)?;

        let status = registrations[index].status;
        if status != RegistrationStatus::Registered {
            return Err(ClinicError::RegistrationClosed {
                id: registration_id.to_string(),
                status,
            });
        }

        let schedules: Vec<Schedule> = load(self.store)?;
        let schedule = find_schedule(&schedules, new_schedule_id)?;

        let date = compute_next_occurrence(schedule.day, RolloverRule::Always, self.clock.now());
        let occupied = occupied_numbers(&registrations, new_schedule_id, date);
        let queue_number = match allocate(schedule.quota, &occupied) {
            Ok(n) => n,
            Err(err) => {
                warn!(
                    registration_id,
                    schedule_id = new_schedule_id,
                    %date,
                    error = %err,
                    "no free queue number, falling back to 1"
                );
                1
            }
        };

        let registration = &mut registrations[index];
        let previous = (registration.schedule_id.clone(), registration.date);
        registration.schedule_id = new_schedule_id.to_string();
        registration.date = date;
        registration.queue_number = queue_number;
        let moved = registration.clone();
        save(self.store, &registrations)?;

        info!(
            registration_id,
            from_schedule = %previous.0,
            from_date = %previous.1,
            to_schedule = new_schedule_id,
            to_date = %date,
            queue_number,
            "rescheduled registration"
        );
        Ok(moved)
    }

    /// Every registration of one patient, in stored order.
    pub fn registrations_for_patient(&self, patient_id: &str) -> ClinicResult<Vec<Registration>> {
        let mut registrations: Vec<Registration> = load(self.store)?;
        registrations.retain(|r| r.patient_id == patient_id);
        Ok(registrations)
    }

    /// Registrations on any of a doctor's slots, ordered by date then queue number.
    pub fn registrations_for_doctor(&self, doctor_id: &str) -> ClinicResult<Vec<Registration>> {
        let schedules: Vec<Schedule> = load(self.store)?;
        let owned: HashSet<&str> = schedules
            .iter()
            .filter(|s| s.doctor_id == doctor_id)
            .map(|s| s.id.as_str())
            .collect();

        let mut registrations: Vec<Registration> = load(self.store)?;
        registrations.retain(|r| owned.contains(r.schedule_id.as_str()));
        registrations.sort_by(|a, b| {
            a.date
                .cmp(&b.date)
                .then_with(|| a.queue_number.cmp(&b.queue_number))
        });
        Ok(registrations)
    }

    /// Remaining places on the occurrence each slot would be booked on now.
    pub fn availability(&self) -> ClinicResult<Vec<SlotAvailability>> {
        let schedules: Vec<Schedule> = load(self.store)?;
        let registrations: Vec<Registration> = load(self.store)?;
        let now = self.clock.now();

        Ok(schedules
            .into_iter()
            .map(|schedule| {
                let date =
                    compute_next_occurrence(schedule.day, RolloverRule::AfterEnd(schedule.end), now);
                let booked = registrations
                    .iter()
                    .filter(|r| r.occupies(&schedule.id, date))
                    .count();
                let remaining = schedule.quota as i64 - booked as i64;
                SlotAvailability {
                    schedule,
                    date,
                    booked,
                    remaining,
                    availability: Availability::classify(remaining),
                }
            })
            .collect())
    }

    /// How far a registration's date is from today.
    pub fn distance(&self, registration: &Registration) -> DayDistance {
        DayDistance::between(self.clock.now().date(), registration.date)
    }
}

fn find_schedule<'s>(schedules: &'s [Schedule], schedule_id: &str) -> ClinicResult<&'s Schedule> {
    schedules
        .iter()
        .find(|s| s.id == schedule_id)
        .ok_or_else(|| ClinicError::ScheduleNotFound(schedule_id.to_string()))
}

fn find_registration(registrations: &[Registration], registration_id: &str) -> ClinicResult<usize> {
    registrations
        .iter()
        .position(|r| r.id == registration_id)
        .ok_or_else(|| ClinicError::RegistrationNotFound(registration_id.to_string()))
}
