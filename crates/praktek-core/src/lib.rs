//! Praktek+ Core Library
//!
//! Clinic front-desk engine: doctor schedules, patient sign-up and
//! consultation bookings with per-occurrence queue numbers.
//!
//! # Architecture
//!
//! ```text
//!        Patient picks a slot (J###)
//!                  │
//!                  ▼
//!   ┌──────────────────────────────┐
//!   │        Booking Engine        │
//!   │  next occurrence date        │
//!   │  duplicate + quota checks    │
//!   └───────┬──────────────┬───────┘
//!           │              │
//!           ▼              ▼
//!   Schedule Registry   Queue Allocator
//!   (slots, overlaps)   (lowest free number)
//!           │              │
//!           └──────┬───────┘
//!                  ▼
//!   ┌──────────────────────────────┐
//!   │         Record Store         │
//!   │  read-all / write-all tables │
//!   │  SQLite or in-memory         │
//!   └──────────────────────────────┘
//! ```
//!
//! # Core Principle
//!
//! **Validate everything, then write once.** Each operation loads fresh
//! table snapshots, runs every check, and replaces the affected table only
//! when all of them pass.
//!
//! # Modules
//!
//! - [`db`]: Record store trait, SQLite and in-memory backends, typed rows
//! - [`models`]: Domain types (Schedule, Registration, Doctor, Patient)
//! - [`schedule`]: Schedule registry (validation, overlap conflicts)
//! - [`queue`]: Queue-number allocation
//! - [`booking`]: Booking engine (register, cancel, reschedule)
//! - [`directory`]: Patient sign-up, lookups and schedule search
//! - [`export`]: Clinic statistics and doctor rosters

pub mod booking;
pub mod db;
pub mod directory;
pub mod error;
pub mod export;
pub mod models;
pub mod queue;
pub mod schedule;

// Re-export commonly used types
pub use booking::{BookingEngine, Clock, FixedClock, RolloverRule, SlotAvailability, SystemClock};
pub use db::{seed_defaults, Database, MemoryStore, RecordStore, StoreError};
pub use directory::{Directory, ScheduleListing, SearchQuery};
pub use error::{ClinicError, ClinicResult};
pub use export::{ClinicStats, DoctorRoster};
pub use models::{
    DayDistance, Doctor, Patient, Registration, RegistrationStatus, Schedule, Weekday,
};
pub use queue::Availability;
pub use schedule::{ScheduleRegistry, ScheduleUpdate};
