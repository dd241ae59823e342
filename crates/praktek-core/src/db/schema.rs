//! SQLite schema definition.

/// Complete database schema for the clinic tables.
///
/// Columns are plain TEXT: values are parsed by the typed record layer, not
/// by SQLite. `position` keeps rows in the order they were written.
pub const SCHEMA: &str = r#"
-- ============================================================================
-- Doctors
-- ============================================================================

CREATE TABLE IF NOT EXISTS doctors (
    position INTEGER PRIMARY KEY,
    id TEXT NOT NULL,
    name TEXT NOT NULL,
    specialty TEXT NOT NULL,
    username TEXT NOT NULL
);

-- ============================================================================
-- Patients
-- ============================================================================

CREATE TABLE IF NOT EXISTS patients (
    position INTEGER PRIMARY KEY,
    id TEXT NOT NULL,
    name TEXT NOT NULL,
    username TEXT NOT NULL,
    contact TEXT NOT NULL
);

-- ============================================================================
-- Doctor Schedules
-- ============================================================================

CREATE TABLE IF NOT EXISTS schedules (
    position INTEGER PRIMARY KEY,
    id TEXT NOT NULL,
    doctor_id TEXT NOT NULL,
    day TEXT NOT NULL,                           -- Senin .. Sabtu
    start_time TEXT NOT NULL,                    -- HH:MM
    end_time TEXT NOT NULL,                      -- HH:MM
    quota TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_schedules_doctor ON schedules(doctor_id);

-- ============================================================================
-- Registrations
-- ============================================================================

CREATE TABLE IF NOT EXISTS registrations (
    position INTEGER PRIMARY KEY,
    id TEXT NOT NULL,
    patient_id TEXT NOT NULL,
    schedule_id TEXT NOT NULL,
    date TEXT NOT NULL,                          -- YYYY-MM-DD
    status TEXT NOT NULL,                        -- Registered, Cancelled, Completed
    queue_number TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_registrations_slot ON registrations(schedule_id, date);
"#;
