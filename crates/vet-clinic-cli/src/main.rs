//! Vet-Clinic terminal front end.
//!
//! Menu-driven record keeping for clients, pets, veterinarians and
//! appointments on top of `vet-clinic-core`.
//!
//! # Usage
//!
//! ```text
//! vet-clinic [OPTIONS]
//!
//! Options:
//!   --database <PATH>         SQLite database file [default: vet_clinic.db]
//!   --busy-timeout-ms <MS>    Lock wait per call in milliseconds [default: 5000]
//! ```
//!
//! Both options can also be set with `VET_CLINIC_DB` and
//! `VET_CLINIC_BUSY_TIMEOUT_MS`. Log verbosity follows `RUST_LOG`
//! (default `warn`).

mod console;
mod menu;

use std::io;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;
use vet_clinic_core::db::{BUSY_TIMEOUT_ENV, DB_PATH_ENV, DEFAULT_DB_PATH};
use vet_clinic_core::{Database, StoreConfig};

use console::{is_input_closed, Console};

/// Veterinary clinic records.
#[derive(Debug, Parser)]
#[command(name = "vet-clinic", about = "Veterinary clinic records", version)]
struct Cli {
    /// SQLite database file. Created on first use.
    #[arg(long, default_value = DEFAULT_DB_PATH, env = DB_PATH_ENV)]
    database: PathBuf,

    /// How long one call waits on a locked database, in milliseconds.
    #[arg(long, default_value_t = 5000, env = BUSY_TIMEOUT_ENV)]
    busy_timeout_ms: u64,
}

impl Cli {
    fn store_config(&self) -> StoreConfig {
        StoreConfig {
            path: self.database.clone(),
            busy_timeout: Duration::from_millis(self.busy_timeout_ms),
        }
    }
}

fn main() -> anyhow::Result<()> {
    // Logs go to stderr so they do not interleave with the menus.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let config = cli.store_config();

    println!("{}", "=".repeat(50));
    println!("VETERINARY CLINIC RECORDS");
    println!("{}", "=".repeat(50));
    println!("\nChecking the database connection...");

    let db = Database::open_with_config(config)
        .with_context(|| format!("could not open database {}", cli.database.display()))?;
    let today = db
        .ping()
        .with_context(|| format!("database {} is not responding", cli.database.display()))?;
    info!(database = %cli.database.display(), %today, "connected");

    let stdin = io::stdin();
    let mut console = Console::new(stdin.lock(), io::stdout());
    match menu::run(&db, &mut console) {
        Err(err) if is_input_closed(&err) => Ok(()),
        other => other,
    }
}
