//! Interactive menus, one module per entity.

mod appointments;
mod clients;
mod pets;
mod veterinarians;

use std::io::{BufRead, Write};

use anyhow::Result;
use vet_clinic_core::{Database, ValidationError, WriteOutcome};

use crate::console::{is_input_closed, Console};

const MAIN_MENU: &str = "
    ====================================
    |   VETERINARY CLINIC RECORDS      |
    |----------------------------------|
    | 1. Manage clients                |
    | 2. Manage pets                   |
    | 3. Manage veterinarians          |
    | 4. Manage appointments           |
    | 0. Exit                          |
    ====================================
";

/// Top-level loop. Returns when the user exits.
pub fn run<R: BufRead, W: Write>(db: &Database, console: &mut Console<R, W>) -> Result<()> {
    loop {
        console.clear()?;
        console.say(MAIN_MENU)?;

        match console.ask("Choose an option [1-4, 0]")?.trim() {
            "1" => clients::menu(db, console)?,
            "2" => pets::menu(db, console)?,
            "3" => veterinarians::menu(db, console)?,
            "4" => appointments::menu(db, console)?,
            "0" => {
                console.clear()?;
                console.say("\nThank you for using the clinic records system!\n")?;
                return Ok(());
            }
            _ => invalid_option(console)?,
        }
    }
}

pub(crate) fn invalid_option<R: BufRead, W: Write>(console: &mut Console<R, W>) -> Result<()> {
    console.say("✗ Invalid option.")?;
    console.pause()
}

/// Run one menu action under a heading, report its error, then pause.
///
/// Only a closed input stream escapes; every other failure is shown
/// and the menu continues.
pub(crate) fn run_action<R, W, F>(
    console: &mut Console<R, W>,
    heading: &str,
    action: F,
) -> Result<()>
where
    R: BufRead,
    W: Write,
    F: FnOnce(&mut Console<R, W>) -> Result<()>,
{
    console.clear()?;
    console.say(format_args!("=== {} ===\n", heading))?;

    if let Err(err) = action(console) {
        if is_input_closed(&err) {
            return Err(err);
        }
        if err.downcast_ref::<ValidationError>().is_some() {
            console.say(format_args!("✗ Validation error: {}", err))?;
        } else {
            tracing::error!(error = %err, "menu action failed");
            console.say(format_args!("✗ Error: {:#}", err))?;
        }
    }
    console.pause()
}

/// Print the result of a write.
pub(crate) fn report<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    outcome: WriteOutcome,
    done: &str,
    missing: &str,
) -> Result<()> {
    match outcome {
        WriteOutcome::Committed => console.say(format_args!("✓ {}", done)),
        WriteOutcome::NotFound => console.say(format_args!("✗ {}", missing)),
        WriteOutcome::IntegrityViolation(reason) => {
            console.say(format_args!("✗ Rejected by the database: {}", reason))
        }
    }
}
