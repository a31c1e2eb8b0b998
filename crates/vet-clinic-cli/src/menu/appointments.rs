use std::io::{BufRead, Write};

use anyhow::Result;
use chrono::Local;
use vet_clinic_core::models::{parse_date, DATE_FORMAT};
use vet_clinic_core::{
    Appointment, AppointmentFields, AppointmentRepository, AppointmentStatus, Database,
    DEFAULT_PAGE_SIZE,
};

use super::{invalid_option, report, run_action};
use crate::console::Console;

const MENU: &str = "
    ====================================
    |        APPOINTMENTS              |
    |----------------------------------|
    | 1. Create appointment            |
    | 2. List all appointments         |
    | 3. Find appointment by ID        |
    | 4. Appointments by pet           |
    | 5. Appointments by veterinarian  |
    | 6. Update appointment            |
    | 7. Delete appointment            |
    | 0. Back to main menu             |
    ====================================
";

/// Characters of the reason shown in listings.
const REASON_PREVIEW: usize = 50;

pub fn menu<R: BufRead, W: Write>(db: &Database, console: &mut Console<R, W>) -> Result<()> {
    loop {
        console.clear()?;
        console.say(MENU)?;

        match console.ask("Choose an option [1-7, 0]")?.trim() {
            "1" => run_action(console, "CREATE APPOINTMENT", |c| create(db, c))?,
            "2" => run_action(console, "ALL APPOINTMENTS", |c| list(db, c))?,
            "3" => run_action(console, "FIND APPOINTMENT", |c| show(db, c))?,
            "4" => run_action(console, "APPOINTMENTS BY PET", |c| by_pet(db, c))?,
            "5" => run_action(console, "APPOINTMENTS BY VETERINARIAN", |c| {
                by_veterinarian(db, c)
            })?,
            "6" => run_action(console, "UPDATE APPOINTMENT", |c| update(db, c))?,
            "7" => run_action(console, "DELETE APPOINTMENT", |c| delete(db, c))?,
            "0" => return Ok(()),
            _ => invalid_option(console)?,
        }
    }
}

fn preview(reason: &str) -> String {
    if reason.chars().count() > REASON_PREVIEW {
        let head: String = reason.chars().take(REASON_PREVIEW).collect();
        format!("{}...", head)
    } else {
        reason.to_string()
    }
}

fn create<R: BufRead, W: Write>(db: &Database, c: &mut Console<R, W>) -> Result<()> {
    let repo = AppointmentRepository::new(db);
    let pet_id: i64 = c.ask_number("Pet ID")?;
    let veterinarian_id: i64 = c.ask_number("Veterinarian ID")?;
    let today = Local::now().date_naive().format(DATE_FORMAT).to_string();
    let date = parse_date(&c.ask_or("Date (YYYY-MM-DD)", &today)?)?;
    let time = c.ask("Time (e.g. 10:00)")?;
    let reason = c.ask("Reason for the visit")?;
    c.say(format_args!("\nStatuses: {}", AppointmentStatus::choices()))?;
    let status = c.ask_or("Status", AppointmentStatus::default().as_str())?;

    let fields = AppointmentFields {
        pet_id,
        veterinarian_id,
        date,
        time,
        reason,
        status: Some(status),
        diagnosis: None,
    };
    let appt = Appointment::new(repo.next_id()?, fields)?;
    let done = format!("Appointment #{} created", appt.id());
    report(c, repo.create(&appt)?, &done, "Appointment not found")
}

fn list<R: BufRead, W: Write>(db: &Database, c: &mut Console<R, W>) -> Result<()> {
    let appts = AppointmentRepository::new(db).read_all(DEFAULT_PAGE_SIZE)?;
    if appts.is_empty() {
        return c.say("No appointments registered.");
    }
    for appt in &appts {
        c.say(format_args!("  {}", appt))?;
        if !appt.reason().is_empty() {
            c.say(format_args!("    Reason: {}", preview(appt.reason())))?;
        }
    }
    Ok(())
}

fn show<R: BufRead, W: Write>(db: &Database, c: &mut Console<R, W>) -> Result<()> {
    let id: i64 = c.ask_number("Appointment ID")?;
    let Some(appt) = AppointmentRepository::new(db).read_by_id(id)? else {
        return c.say(format_args!("✗ No appointment with ID {}", id));
    };

    c.say(format_args!("\n{}", appt))?;
    c.say(format_args!("Reason: {}", appt.reason()))?;
    if let Some(diagnosis) = appt.diagnosis() {
        c.say(format_args!("Diagnosis: {}", diagnosis))?;
    }
    Ok(())
}

fn print_history<R: BufRead, W: Write>(
    c: &mut Console<R, W>,
    appts: &[Appointment],
    heading: &str,
) -> Result<()> {
    c.say(format_args!("\n{}:", heading))?;
    for appt in appts {
        c.say(format_args!("  {}", appt))?;
    }
    c.say(format_args!("\nTotal appointments: {}", appts.len()))
}

fn by_pet<R: BufRead, W: Write>(db: &Database, c: &mut Console<R, W>) -> Result<()> {
    let pet_id: i64 = c.ask_number("Pet ID")?;
    let appts = AppointmentRepository::new(db).read_by_pet(pet_id)?;
    if appts.is_empty() {
        return c.say("The pet has no appointments registered.");
    }
    print_history(c, &appts, &format!("Appointments of pet {}", pet_id))
}

fn by_veterinarian<R: BufRead, W: Write>(db: &Database, c: &mut Console<R, W>) -> Result<()> {
    let vet_id: i64 = c.ask_number("Veterinarian ID")?;
    let appts = AppointmentRepository::new(db).read_by_veterinarian(vet_id)?;
    if appts.is_empty() {
        return c.say("The veterinarian has no appointments assigned.");
    }
    print_history(c, &appts, &format!("Appointments of veterinarian {}", vet_id))
}

fn update<R: BufRead, W: Write>(db: &Database, c: &mut Console<R, W>) -> Result<()> {
    let repo = AppointmentRepository::new(db);
    let id: i64 = c.ask_number("ID of the appointment to update")?;
    let Some(mut appt) = repo.read_by_id(id)? else {
        return c.say(format_args!("✗ No appointment with ID {}", id));
    };

    c.say(format_args!("\nCurrent data: {}\n", appt))?;
    c.say("Enter the new data (Enter keeps the current value):")?;

    let current_date = appt.date().format(DATE_FORMAT).to_string();
    let date = parse_date(&c.ask_or("Date (YYYY-MM-DD)", &current_date)?)?;
    appt.set_date(date)?;
    let time = c.ask_or("Time", appt.time())?;
    appt.set_time(&time);
    let status = c.ask_or("Status", appt.status().as_str())?;
    appt.set_status(&status)?;
    let diagnosis = c.ask_or("Diagnosis", appt.diagnosis().unwrap_or(""))?;
    appt.set_diagnosis(Some(&diagnosis));

    let missing = format!("Appointment #{} no longer exists", id);
    report(c, repo.update(&appt)?, "Appointment updated", &missing)
}

fn delete<R: BufRead, W: Write>(db: &Database, c: &mut Console<R, W>) -> Result<()> {
    let id: i64 = c.ask_number("ID of the appointment to delete")?;
    if !c.confirm("Are you sure?")? {
        return c.say("Cancelled.");
    }
    let missing = format!("No appointment with ID {}", id);
    report(
        c,
        AppointmentRepository::new(db).delete(id)?,
        "Appointment deleted",
        &missing,
    )
}
