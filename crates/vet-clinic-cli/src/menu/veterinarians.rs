use std::io::{BufRead, Write};

use anyhow::Result;
use vet_clinic_core::{
    Database, Veterinarian, VeterinarianFields, VeterinarianRepository, DEFAULT_PAGE_SIZE,
};

use super::{invalid_option, report, run_action};
use crate::console::Console;

const MENU: &str = "
    ====================================
    |        VETERINARIANS             |
    |----------------------------------|
    | 1. Create veterinarian           |
    | 2. List all veterinarians        |
    | 3. Find veterinarian by ID       |
    | 4. Update veterinarian           |
    | 5. Delete veterinarian           |
    | 0. Back to main menu             |
    ====================================
";

pub fn menu<R: BufRead, W: Write>(db: &Database, console: &mut Console<R, W>) -> Result<()> {
    loop {
        console.clear()?;
        console.say(MENU)?;

        match console.ask("Choose an option [1-5, 0]")?.trim() {
            "1" => run_action(console, "CREATE VETERINARIAN", |c| create(db, c))?,
            "2" => run_action(console, "ALL VETERINARIANS", |c| list(db, c))?,
            "3" => run_action(console, "FIND VETERINARIAN", |c| show(db, c))?,
            "4" => run_action(console, "UPDATE VETERINARIAN", |c| update(db, c))?,
            "5" => run_action(console, "DELETE VETERINARIAN", |c| delete(db, c))?,
            "0" => return Ok(()),
            _ => invalid_option(console)?,
        }
    }
}

fn create<R: BufRead, W: Write>(db: &Database, c: &mut Console<R, W>) -> Result<()> {
    let repo = VeterinarianRepository::new(db);
    let fields = VeterinarianFields {
        first_name: c.ask("First name")?,
        last_name: c.ask("Last name")?,
        specialty: c.ask("Specialty")?,
        phone: c.ask("Phone")?,
        email: c.ask("Email")?,
    };

    let vet = Veterinarian::new(repo.next_id()?, fields)?;
    let done = format!("Veterinarian #{} created", vet.id());
    report(c, repo.create(&vet)?, &done, "Veterinarian not found")
}

fn list<R: BufRead, W: Write>(db: &Database, c: &mut Console<R, W>) -> Result<()> {
    let vets = VeterinarianRepository::new(db).read_all(DEFAULT_PAGE_SIZE)?;
    if vets.is_empty() {
        return c.say("No veterinarians registered.");
    }
    for vet in &vets {
        c.say(format_args!("  {}", vet))?;
    }
    Ok(())
}

fn show<R: BufRead, W: Write>(db: &Database, c: &mut Console<R, W>) -> Result<()> {
    let id: i64 = c.ask_number("Veterinarian ID")?;
    match VeterinarianRepository::new(db).read_by_id(id)? {
        Some(vet) => {
            c.say(format_args!("\n{}", vet))?;
            c.say(format_args!("Phone: {}", vet.phone()))?;
            c.say(format_args!("Email: {}", vet.email()))
        }
        None => c.say(format_args!("✗ No veterinarian with ID {}", id)),
    }
}

fn update<R: BufRead, W: Write>(db: &Database, c: &mut Console<R, W>) -> Result<()> {
    let repo = VeterinarianRepository::new(db);
    let id: i64 = c.ask_number("ID of the veterinarian to update")?;
    let Some(mut vet) = repo.read_by_id(id)? else {
        return c.say(format_args!("✗ No veterinarian with ID {}", id));
    };

    c.say(format_args!("\nCurrent data: {}\n", vet))?;
    c.say("Enter the new data (Enter keeps the current value):")?;

    let first_name = c.ask_or("First name", vet.first_name())?;
    vet.set_first_name(&first_name)?;
    let last_name = c.ask_or("Last name", vet.last_name())?;
    vet.set_last_name(&last_name)?;
    let specialty = c.ask_or("Specialty", vet.specialty())?;
    vet.set_specialty(&specialty);
    let phone = c.ask_or("Phone", vet.phone())?;
    vet.set_phone(&phone);
    let email = c.ask_or("Email", vet.email())?;
    vet.set_email(&email)?;

    let missing = format!("Veterinarian #{} no longer exists", id);
    report(c, repo.update(&vet)?, "Veterinarian updated", &missing)
}

fn delete<R: BufRead, W: Write>(db: &Database, c: &mut Console<R, W>) -> Result<()> {
    let id: i64 = c.ask_number("ID of the veterinarian to delete")?;
    if !c.confirm("Are you sure?")? {
        return c.say("Cancelled.");
    }
    let missing = format!("No veterinarian with ID {}", id);
    report(
        c,
        VeterinarianRepository::new(db).delete(id)?,
        "Veterinarian deleted",
        &missing,
    )
}
