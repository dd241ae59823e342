//! Praktek+ CLI - command-line front desk for the clinic booking engine.
//!
//! Non-interactive: each invocation opens the database, runs one
//! operation and prints the result.
//!
//! # Usage
//!
//! ```bash
//! # Slots and their remaining places
//! praktek schedules list
//! praktek schedules availability
//!
//! # Book, move and cancel
//! praktek book P001 J001
//! praktek reschedule R001 J002
//! praktek cancel R001
//!
//! # JSON output for scripting
//! praktek --json stats | jq '.by_doctor'
//! ```
//!
//! Configuration comes from the environment (or a `.env` file):
//! `PRAKTEK_DB_PATH`, `PRAKTEK_SEED_DEFAULTS`. Logs go to stderr and are
//! filtered with `RUST_LOG`.

mod cli;
mod commands;
mod config;
mod output;

use anyhow::{Context, Result};
use clap::Parser;
use dotenv::dotenv;
use praktek_core::{seed_defaults, Database, SystemClock};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use cli::Cli;
use commands::App;
use config::AppConfig;

/// Initialize tracing on stderr so stdout stays parseable.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}

fn main() -> Result<()> {
    dotenv().ok();
    init_tracing();

    let cli = Cli::parse();
    let config = AppConfig::from_env(cli.db.clone());
    let db_path = config.db_path;

    let db = Database::open(&db_path)
        .with_context(|| format!("failed to open database {}", db_path.display()))?;
    debug!(path = %db_path.display(), "opened database");

    if config.seed_defaults {
        seed_defaults(&db)?;
    }

    let clock = SystemClock;
    let app = App {
        store: &db,
        clock: &clock,
        json: cli.json,
    };
    app.run(cli.command)
}
