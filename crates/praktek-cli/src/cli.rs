//! CLI argument parsing.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use praktek_core::schedule::parse_practice_day;
use praktek_core::Weekday;

/// Command-line front desk for the Praktek+ clinic.
#[derive(Parser)]
#[command(name = "praktek")]
#[command(version)]
#[command(about = "Clinic schedules, patient sign-up and consultation booking")]
#[command(arg_required_else_help = true)]
pub struct Cli {
    /// SQLite database file. Overrides PRAKTEK_DB_PATH.
    #[arg(long, global = true)]
    pub db: Option<PathBuf>,

    /// Output JSON instead of human-readable text.
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Doctor practice slots.
    #[command(subcommand)]
    Schedules(ScheduleCommand),

    /// Patient sign-up and lookup.
    #[command(subcommand)]
    Patients(PatientCommand),

    /// Book a patient onto the next occurrence of a slot.
    Book {
        patient_id: String,
        schedule_id: String,
    },

    /// Cancel a registration, releasing its queue number.
    Cancel { registration_id: String },

    /// Move a registration to another slot.
    Reschedule {
        registration_id: String,
        schedule_id: String,
    },

    /// List registrations.
    #[command(subcommand)]
    Registrations(RegistrationCommand),

    /// Clinic-wide booking statistics.
    Stats,
}

#[derive(Subcommand)]
pub enum ScheduleCommand {
    /// List slots, optionally for one doctor.
    List {
        #[arg(long)]
        doctor: Option<String>,
    },

    /// Show one slot.
    Show { schedule_id: String },

    /// Add a slot.
    Add(AddScheduleArgs),

    /// Change day, times or quota of a slot.
    Edit(EditScheduleArgs),

    /// Delete a slot with no active registrations.
    Delete { schedule_id: String },

    /// Find slots by doctor name, specialty or day.
    Search(SearchArgs),

    /// Remaining places on each slot's next occurrence.
    Availability,
}

#[derive(Args)]
pub struct AddScheduleArgs {
    /// Owning doctor (D###).
    pub doctor_id: String,

    /// Practice day, e.g. Senin or Monday.
    #[arg(value_parser = parse_day)]
    pub day: Weekday,

    /// Start time, HH:MM.
    pub start: String,

    /// End time, HH:MM.
    pub end: String,

    /// Patients per occurrence (1-50).
    pub quota: u32,
}

#[derive(Args)]
pub struct EditScheduleArgs {
    pub schedule_id: String,

    #[arg(long, value_parser = parse_day)]
    pub day: Option<Weekday>,

    #[arg(long)]
    pub start: Option<String>,

    #[arg(long)]
    pub end: Option<String>,

    #[arg(long)]
    pub quota: Option<u32>,
}

#[derive(Args)]
#[group(required = true, multiple = false)]
pub struct SearchArgs {
    /// Doctor name or part of it.
    #[arg(long)]
    pub doctor: Option<String>,

    /// Specialty or part of it.
    #[arg(long)]
    pub specialty: Option<String>,

    #[arg(long, value_parser = parse_day)]
    pub day: Option<Weekday>,
}

#[derive(Subcommand)]
pub enum PatientCommand {
    /// Sign up a new patient.
    Add {
        name: String,
        username: String,
        contact: String,
    },

    /// Show a patient and their registrations.
    Show { patient_id: String },
}

#[derive(Subcommand)]
pub enum RegistrationCommand {
    /// A patient's registrations.
    Patient { patient_id: String },

    /// Roster of patients booked on a doctor's slots.
    Doctor {
        doctor_id: String,

        /// Print the roster as CSV.
        #[arg(long)]
        csv: bool,
    },
}

fn parse_day(raw: &str) -> Result<Weekday, String> {
    parse_practice_day(raw).map_err(|e| e.to_string())
}
