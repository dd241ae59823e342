//! SQLite persistence across reopened databases.

use chrono::NaiveDateTime;
use praktek_core::db::{load, seed_defaults, Database, RecordStore, Table};
use praktek_core::models::{Patient, Registration, RegistrationStatus, Schedule};
use praktek_core::{BookingEngine, Directory, FixedClock, ScheduleRegistry, StoreError};
use tempfile::TempDir;

fn clock() -> FixedClock {
    FixedClock(NaiveDateTime::parse_from_str("2026-10-18 10:00", "%Y-%m-%d %H:%M").unwrap())
}

#[test]
fn test_bookings_survive_reopen() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("praktek.db");
    let clock = clock();

    let booked = {
        let db = Database::open(&path).unwrap();
        seed_defaults(&db).unwrap();
        let engine = BookingEngine::new(&db, &clock);
        let first = engine.register("P001", "J001").unwrap();
        engine.register("P001", "J003").unwrap();
        engine.cancel(&first.id).unwrap()
    };

    let db = Database::open(&path).unwrap();
    let registrations: Vec<Registration> = load(&db).unwrap();
    assert_eq!(registrations.len(), 2);
    assert_eq!(registrations[0], booked);
    assert_eq!(registrations[0].status, RegistrationStatus::Cancelled);

    // Seeding again leaves the reopened tables alone
    assert!(seed_defaults(&db).unwrap().is_empty());
    let schedules: Vec<Schedule> = load(&db).unwrap();
    assert_eq!(schedules.len(), 5);
}

#[test]
fn test_schedule_edits_persist() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("praktek.db");

    {
        let db = Database::open(&path).unwrap();
        seed_defaults(&db).unwrap();
        let registry = ScheduleRegistry::new(&db);
        registry.delete("J005").unwrap();
        registry
            .create("D004", praktek_core::Weekday::Sabtu, "9:30", "11:00", 3)
            .unwrap();
    }

    let db = Database::open(&path).unwrap();
    let registry = ScheduleRegistry::new(&db);
    let ids: Vec<String> = registry.list().unwrap().into_iter().map(|s| s.id).collect();
    assert_eq!(ids, vec!["J001", "J002", "J003", "J004", "J005"]);
    assert_eq!(registry.get("J005").unwrap().describe(), "Sabtu 09:30-11:00");
}

#[test]
fn test_patient_signup_persists() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("praktek.db");

    {
        let db = Database::open(&path).unwrap();
        seed_defaults(&db).unwrap();
        Directory::new(&db)
            .register_patient("Siti Aminah", "siti", "081234567890")
            .unwrap();
    }

    let db = Database::open(&path).unwrap();
    let patients: Vec<Patient> = load(&db).unwrap();
    assert_eq!(patients.len(), 2);
    assert_eq!(patients[1].id, "P002");
    assert_eq!(patients[1].contact, "081234567890");
}

#[test]
fn test_legacy_rows_are_read() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("praktek.db");

    {
        let db = Database::open(&path).unwrap();
        db.conn()
            .execute(
                "INSERT INTO registrations (position, id, patient_id, schedule_id, date, status, queue_number)
                 VALUES (0, 'R001', 'P001', 'J001', '2026-10-19', 'Terdaftar', '1')",
                [],
            )
            .unwrap();
    }

    let db = Database::open(&path).unwrap();
    let registrations: Vec<Registration> = load(&db).unwrap();
    assert_eq!(registrations[0].status, RegistrationStatus::Registered);
}

#[test]
fn test_malformed_rows_abort_the_operation() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("praktek.db");
    let db = Database::open(&path).unwrap();
    seed_defaults(&db).unwrap();
    db.conn()
        .execute(
            "INSERT INTO registrations (position, id, patient_id, schedule_id, date, status, queue_number)
             VALUES (0, 'R001', 'P001', 'J001', '2026-10-19', 'Registered', 'satu')",
            [],
        )
        .unwrap();

    let clock = clock();
    let engine = BookingEngine::new(&db, &clock);
    let err = engine.register("P002", "J001").unwrap_err();
    assert!(matches!(
        err,
        praktek_core::ClinicError::Store(StoreError::Malformed { .. })
    ));

    // Nothing was written
    assert_eq!(db.read_all(Table::Registrations).unwrap().len(), 1);
}

#[test]
fn test_oversized_stored_quota_is_malformed() {
    let dir = TempDir::new().unwrap();
    let db = Database::open(dir.path().join("praktek.db")).unwrap();
    seed_defaults(&db).unwrap();
    db.conn()
        .execute("UPDATE schedules SET quota = '4294967295' WHERE id = 'J001'", [])
        .unwrap();

    match ScheduleRegistry::new(&db).list() {
        Err(praktek_core::ClinicError::Store(StoreError::Malformed { table, field, .. })) => {
            assert_eq!(table, "schedules");
            assert_eq!(field, "quota");
        }
        other => panic!("unexpected result: {other:?}"),
    }
}
