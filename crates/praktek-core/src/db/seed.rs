//! Demonstration data for a fresh clinic.

use chrono::NaiveTime;
use tracing::info;

use super::{load, save, RecordStore, StoreResult};
use crate::models::{Doctor, Patient, Schedule, Weekday};

/// Tables that were empty and got seeded.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SeedReport {
    pub doctors: usize,
    pub patients: usize,
    pub schedules: usize,
}

impl SeedReport {
    pub fn is_empty(&self) -> bool {
        self.doctors == 0 && self.patients == 0 && self.schedules == 0
    }
}

fn default_doctors() -> Vec<Doctor> {
    vec![
        Doctor::new("D001", "Dr. Andi", "Umum", "drandi"),
        Doctor::new("D002", "Dr. Budi", "Gigi", "drbudi"),
        Doctor::new("D003", "Dr. Citra", "Anak", "drcitra"),
        Doctor::new("D004", "Dr. Dewi", "Kulit", "drdewi"),
    ]
}

fn default_patients() -> Vec<Patient> {
    vec![Patient::new("P001", "Pasien Test", "pasien", "08123456789")]
}

fn default_schedules() -> Vec<Schedule> {
    let slot = |id: &str, doctor_id: &str, day, start: u32, end: u32, quota| Schedule {
        id: id.to_string(),
        doctor_id: doctor_id.to_string(),
        day,
        start: NaiveTime::from_hms_opt(start, 0, 0).unwrap_or_default(),
        end: NaiveTime::from_hms_opt(end, 0, 0).unwrap_or_default(),
        quota,
    };
    vec![
        slot("J001", "D001", Weekday::Senin, 8, 12, 10),
        slot("J002", "D001", Weekday::Rabu, 13, 17, 10),
        slot("J003", "D002", Weekday::Selasa, 8, 14, 8),
        slot("J004", "D003", Weekday::Kamis, 9, 15, 12),
        slot("J005", "D004", Weekday::Jumat, 10, 16, 8),
    ]
}

/// Fill the doctor, patient and schedule tables with demo data.
///
/// Only empty tables are touched, so running this against a populated store
/// is harmless. Registrations are never seeded.
pub fn seed_defaults(store: &dyn RecordStore) -> StoreResult<SeedReport> {
    let mut report = SeedReport::default();

    if load::<Doctor>(store)?.is_empty() {
        let doctors = default_doctors();
        save(store, &doctors)?;
        report.doctors = doctors.len();
    }
    if load::<Patient>(store)?.is_empty() {
        let patients = default_patients();
        save(store, &patients)?;
        report.patients = patients.len();
    }
    if load::<Schedule>(store)?.is_empty() {
        let schedules = default_schedules();
        save(store, &schedules)?;
        report.schedules = schedules.len();
    }

    if !report.is_empty() {
        info!(
            doctors = report.doctors,
            patients = report.patients,
            schedules = report.schedules,
            "seeded default clinic data"
        );
    }
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::MemoryStore;

    #[test]
    fn test_seeds_empty_store() {
        let store = MemoryStore::new();
        let report = seed_defaults(&store).unwrap();

        assert_eq!(
            report,
            SeedReport {
                doctors: 4,
                patients: 1,
                schedules: 5
            }
        );

        let schedules = load::<Schedule>(&store).unwrap();
        assert_eq!(schedules[2].id, "J003");
        assert_eq!(schedules[2].doctor_id, "D002");
        assert_eq!(schedules[2].day, Weekday::Selasa);
        assert_eq!(schedules[2].describe(), "Selasa 08:00-14:00");
        assert_eq!(schedules[2].quota, 8);
    }

    #[test]
    fn test_second_seed_is_noop() {
        let store = MemoryStore::new();
        seed_defaults(&store).unwrap();
        assert!(seed_defaults(&store).unwrap().is_empty());
        assert_eq!(load::<Doctor>(&store).unwrap().len(), 4);
    }

    #[test]
    fn test_populated_tables_are_kept() {
        let store = MemoryStore::new();
        save(&store, &[Doctor::new("D001", "Dr. Eka", "Mata", "dreka")]).unwrap();

        let report = seed_defaults(&store).unwrap();
        assert_eq!(report.doctors, 0);
        assert_eq!(report.schedules, 5);

        let doctors = load::<Doctor>(&store).unwrap();
        assert_eq!(doctors.len(), 1);
        assert_eq!(doctors[0].name, "Dr. Eka");
    }
}
