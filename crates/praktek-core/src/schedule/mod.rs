//! Schedule registry: doctors' weekly practice slots.
//!
//! Every operation loads the schedule table fresh, works on the typed copy
//! and writes the whole table back only once all checks have passed.

mod validation;

pub use validation::*;

use chrono::NaiveTime;
use tracing::{info, warn};

use crate::db::{load, save, RecordStore};
use crate::error::{ClinicError, ClinicResult};
use crate::models::{
    format_clock_time, next_sequential_id, Doctor, Registration, Schedule, Weekday,
    SCHEDULE_PREFIX,
};

/// Requested changes to an existing slot. `None` keeps the current value.
#[derive(Debug, Clone, Default)]
pub struct ScheduleUpdate {
    pub day: Option<Weekday>,
    pub start: Option<String>,
    pub end: Option<String>,
    pub quota: Option<u32>,
}

/// Creates, edits, deletes and lists practice slots.
pub struct ScheduleRegistry<'a> {
    store: &'a dyn RecordStore,
}

impl<'a> ScheduleRegistry<'a> {
    pub fn new(store: &'a dyn RecordStore) -> Self {
        Self { store }
    }

    /// All slots in stored order.
    pub fn list(&self) -> ClinicResult<Vec<Schedule>> {
        Ok(load(self.store)?)
    }

    /// Slots owned by one doctor.
    pub fn list_for_doctor(&self, doctor_id: &str) -> ClinicResult<Vec<Schedule>> {
        let mut schedules = self.list()?;
        schedules.retain(|s| s.doctor_id == doctor_id);
        Ok(schedules)
    }

    /// Look up a single slot.
    pub fn get(&self, schedule_id: &str) -> ClinicResult<Schedule> {
        self.list()?
            .into_iter()
            .find(|s| s.id == schedule_id)
            .ok_or_else(|| ClinicError::ScheduleNotFound(schedule_id.to_string()))
    }

    /// Add a new slot for `doctor_id`.
    pub fn create(
        &self,
        doctor_id: &str,
        day: Weekday,
        start: &str,
        end: &str,
        quota: u32,
    ) -> ClinicResult<Schedule> {
        let (start, end) = validate_time_range(start, end)?;
        validate_quota(quota)?;
        check_practice_day(day)?;

        let doctors: Vec<Doctor> = load(self.store)?;
        if !doctors.iter().any(|d| d.id == doctor_id) {
            return Err(ClinicError::DoctorNotFound(doctor_id.to_string()));
        }

        let mut schedules: Vec<Schedule> = load(self.store)?;
        reject_conflict(doctor_id, day, start, end, &schedules, None)?;

        let schedule = Schedule {
            id: next_sequential_id(SCHEDULE_PREFIX, schedules.iter().map(|s| &s.id)),
            doctor_id: doctor_id.to_string(),
            day,
            start,
            end,
            quota,
        };
        schedules.push(schedule.clone());
        save(self.store, &schedules)?;

        info!(
            schedule_id = %schedule.id,
            doctor_id = %schedule.doctor_id,
            slot = %schedule.describe(),
            quota = schedule.quota,
            "created schedule"
        );
        Ok(schedule)
    }

    /// Change day, times or quota of an existing slot.
    pub fn edit(&self, schedule_id: &str, update: ScheduleUpdate) -> ClinicResult<Schedule> {
        let mut schedules: Vec<Schedule> = load(self.store)?;
        let index = schedules
            .iter()
            .position(|s| s.id == schedule_id)
            .ok_or_else(|| ClinicError::ScheduleNotFound(schedule_id.to_string()))?;

        let current = &schedules[index];
        let start = update
            .start
            .unwrap_or_else(|| format_clock_time(current.start));
        let end = update.end.unwrap_or_else(|| format_clock_time(current.end));
        let (start, end) = validate_time_range(&start, &end)?;
        let quota = validate_quota(update.quota.unwrap_or(current.quota))?;
        let day = update.day.unwrap_or(current.day);
        check_practice_day(day)?;

        let doctor_id = current.doctor_id.clone();
        reject_conflict(&doctor_id, day, start, end, &schedules, Some(schedule_id))?;

        let schedule = &mut schedules[index];
        schedule.day = day;
        schedule.start = start;
        schedule.end = end;
        schedule.quota = quota;
        let edited = schedule.clone();
        save(self.store, &schedules)?;

        info!(
            schedule_id = %edited.id,
            slot = %edited.describe(),
            quota = edited.quota,
            "edited schedule"
        );
        Ok(edited)
    }

    /// Remove a slot that no active registration refers to.
    pub fn delete(&self, schedule_id: &str) -> ClinicResult<Schedule> {
        let mut schedules: Vec<Schedule> = load(self.store)?;
        let index = schedules
            .iter()
            .position(|s| s.id == schedule_id)
            .ok_or_else(|| ClinicError::ScheduleNotFound(schedule_id.to_string()))?;

        let registrations: Vec<Registration> = load(self.store)?;
        let count = registrations
            .iter()
            .filter(|r| r.schedule_id == schedule_id && r.is_active())
            .count();
        if count > 0 {
            warn!(schedule_id, count, "refusing to delete schedule with active registrations");
            return Err(ClinicError::HasActiveRegistrations {
                schedule_id: schedule_id.to_string(),
                count,
            });
        }

        let removed = schedules.remove(index);
        save(self.store, &schedules)?;

        info!(schedule_id = %removed.id, "deleted schedule");
        Ok(removed)
    }
}

fn check_practice_day(day: Weekday) -> ClinicResult<()> {
    if day.is_schedulable() {
        Ok(())
    } else {
        Err(ClinicError::UnschedulableDay(day.name().to_string()))
    }
}

fn reject_conflict(
    doctor_id: &str,
    day: Weekday,
    start: NaiveTime,
    end: NaiveTime,
    schedules: &[Schedule],
    exclude_id: Option<&str>,
) -> ClinicResult<()> {
    match find_conflict(doctor_id, day, start, end, schedules, exclude_id) {
        Some(existing) => {
            warn!(
                doctor_id,
                conflicting = %existing.id,
                "rejected overlapping schedule"
            );
            Err(ClinicError::ScheduleConflict {
                schedule_id: existing.id.clone(),
                day: existing.day,
                start: format_clock_time(existing.start),
                end: format_clock_time(existing.end),
            })
        }
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{seed_defaults, MemoryStore};
    use crate::models::{RegistrationStatus, REGISTRATION_PREFIX};
    use chrono::NaiveDate;

    fn seeded() -> MemoryStore {
        let store = MemoryStore::new();
        seed_defaults(&store).unwrap();
        store
    }

    fn book(store: &MemoryStore, schedule_id: &str, status: RegistrationStatus) {
        let mut registrations: Vec<Registration> = load(store).unwrap();
        let mut reg = Registration::new(
            next_sequential_id(REGISTRATION_PREFIX, registrations.iter().map(|r| &r.id)),
            "P001".into(),
            schedule_id.into(),
            NaiveDate::from_ymd_opt(2026, 10, 19).unwrap(),
            1,
        );
        reg.status = status;
        registrations.push(reg);
        save(store, &registrations).unwrap();
    }

    #[test]
    fn test_create_assigns_next_id() {
        let store = seeded();
        let registry = ScheduleRegistry::new(&store);

        let schedule = registry
            .create("D002", Weekday::Sabtu, "08:00", "11:30", 6)
            .unwrap();
        assert_eq!(schedule.id, "J006");
        assert_eq!(schedule.describe(), "Sabtu 08:00-11:30");
        assert_eq!(registry.list().unwrap().len(), 6);
    }

    #[test]
    fn test_create_rejects_overlap() {
        let store = seeded();
        let registry = ScheduleRegistry::new(&store);

        // J001 is D001 Senin 08:00-12:00
        let err = registry
            .create("D001", Weekday::Senin, "11:00", "13:00", 5)
            .unwrap_err();
        match err {
            ClinicError::ScheduleConflict { schedule_id, start, end, .. } => {
                assert_eq!(schedule_id, "J001");
                assert_eq!(start, "08:00");
                assert_eq!(end, "12:00");
            }
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(registry.list().unwrap().len(), 5);

        // Touching the end of J001 is fine
        assert!(registry.create("D001", Weekday::Senin, "12:00", "14:00", 5).is_ok());
    }

    #[test]
    fn test_create_validation() {
        let store = seeded();
        let registry = ScheduleRegistry::new(&store);

        assert!(matches!(
            registry.create("D001", Weekday::Sabtu, "14:00", "09:00", 5),
            Err(ClinicError::InvalidTimeOrder { .. })
        ));
        assert!(matches!(
            registry.create("D001", Weekday::Sabtu, "09:00", "14:00", 0),
            Err(ClinicError::InvalidQuota { .. })
        ));
        assert!(matches!(
            registry.create("D001", Weekday::Minggu, "09:00", "14:00", 5),
            Err(ClinicError::UnschedulableDay(_))
        ));
        assert!(matches!(
            registry.create("D999", Weekday::Sabtu, "09:00", "14:00", 5),
            Err(ClinicError::DoctorNotFound(_))
        ));
        assert_eq!(registry.list().unwrap().len(), 5);
    }

    #[test]
    fn test_edit_keeps_unset_fields() {
        let store = seeded();
        let registry = ScheduleRegistry::new(&store);

        let edited = registry
            .edit(
                "J001",
                ScheduleUpdate {
                    end: Some("13:00".into()),
                    ..Default::default()
                },
            )
            .unwrap();
        assert_eq!(edited.describe(), "Senin 08:00-13:00");
        assert_eq!(edited.quota, 10);
        assert_eq!(registry.get("J001").unwrap(), edited);
    }

    #[test]
    fn test_edit_conflicts_with_other_slot_only() {
        let store = seeded();
        let registry = ScheduleRegistry::new(&store);

        // Moving J002 (D001 Rabu) onto Senin morning hits J001
        let err = registry
            .edit(
                "J002",
                ScheduleUpdate {
                    day: Some(Weekday::Senin),
                    start: Some("10:00".into()),
                    end: Some("11:00".into()),
                    quota: None,
                },
            )
            .unwrap_err();
        assert!(matches!(err, ClinicError::ScheduleConflict { ref schedule_id, .. } if schedule_id == "J001"));
        assert_eq!(registry.get("J002").unwrap().day, Weekday::Rabu);

        assert!(matches!(
            registry.edit("J404", ScheduleUpdate::default()),
            Err(ClinicError::ScheduleNotFound(_))
        ));
    }

    #[test]
    fn test_delete_blocked_by_active_registration() {
        let store = seeded();
        let registry = ScheduleRegistry::new(&store);
        book(&store, "J003", RegistrationStatus::Registered);

        assert!(matches!(
            registry.delete("J003"),
            Err(ClinicError::HasActiveRegistrations { count: 1, .. })
        ));
        assert_eq!(registry.list().unwrap().len(), 5);
    }

    #[test]
    fn test_delete_after_cancellation() {
        let store = seeded();
        let registry = ScheduleRegistry::new(&store);
        book(&store, "J003", RegistrationStatus::Cancelled);

        let removed = registry.delete("J003").unwrap();
        assert_eq!(removed.id, "J003");
        assert!(matches!(registry.get("J003"), Err(ClinicError::ScheduleNotFound(_))));
        assert!(matches!(registry.delete("J003"), Err(ClinicError::ScheduleNotFound(_))));

        // Four slots remain but J005 is still taken
        let next = registry.create("D004", Weekday::Sabtu, "09:00", "10:00", 4).unwrap();
        assert_eq!(next.id, "J006");
    }

    #[test]
    fn test_list_for_doctor() {
        let store = seeded();
        let registry = ScheduleRegistry::new(&store);

        let ids: Vec<String> = registry
            .list_for_doctor("D001")
            .unwrap()
            .into_iter()
            .map(|s| s.id)
            .collect();
        assert_eq!(ids, vec!["J001", "J002"]);
    }
}
