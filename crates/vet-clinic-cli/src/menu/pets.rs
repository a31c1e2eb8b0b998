use std::io::{BufRead, Write};

use anyhow::Result;
use vet_clinic_core::{Database, Pet, PetFields, PetRepository, Species, DEFAULT_PAGE_SIZE};

use super::{invalid_option, report, run_action};
use crate::console::Console;

const MENU: &str = "
    ====================================
    |        PETS                      |
    |----------------------------------|
    | 1. Create pet                    |
    | 2. List all pets                 |
    | 3. Find pet by ID                |
    | 4. Update pet                    |
    | 5. Delete pet                    |
    | 6. List pets by client           |
    | 0. Back to main menu             |
    ====================================
";

pub fn menu<R: BufRead, W: Write>(db: &Database, console: &mut Console<R, W>) -> Result<()> {
    loop {
        console.clear()?;
        console.say(MENU)?;

        match console.ask("Choose an option [1-6, 0]")?.trim() {
            "1" => run_action(console, "CREATE PET", |c| create(db, c))?,
            "2" => run_action(console, "ALL PETS", |c| list(db, c))?,
            "3" => run_action(console, "FIND PET", |c| show(db, c))?,
            "4" => run_action(console, "UPDATE PET", |c| update(db, c))?,
            "5" => run_action(console, "DELETE PET", |c| delete(db, c))?,
            "6" => run_action(console, "PETS BY CLIENT", |c| by_client(db, c))?,
            "0" => return Ok(()),
            _ => invalid_option(console)?,
        }
    }
}

fn yes_no(flag: bool) -> &'static str {
    if flag {
        "Yes"
    } else {
        "No"
    }
}

/// One listing line plus the puppy/senior markers.
fn print_pet<R: BufRead, W: Write>(c: &mut Console<R, W>, pet: &Pet) -> Result<()> {
    c.say(format_args!("  {}", pet))?;
    if pet.is_puppy() {
        c.say("    → Puppy")?;
    }
    if pet.is_senior() {
        c.say("    → Senior")?;
    }
    Ok(())
}

fn create<R: BufRead, W: Write>(db: &Database, c: &mut Console<R, W>) -> Result<()> {
    let repo = PetRepository::new(db);
    let name = c.ask("Name")?;
    c.say(format_args!("Species: {}", Species::choices()))?;
    let fields = PetFields {
        name,
        species: c.ask("Species")?,
        breed: c.ask("Breed")?,
        age: c.ask_number("Age (years)")?,
        color: c.ask("Color")?,
        weight_kg: c.ask_number("Weight (kg)")?,
        client_id: c.ask_number("Owner (client ID)")?,
    };

    let pet = Pet::new(repo.next_id()?, fields)?;
    let done = format!("Pet #{} created", pet.id());
    report(c, repo.create(&pet)?, &done, "Pet not found")
}

fn list<R: BufRead, W: Write>(db: &Database, c: &mut Console<R, W>) -> Result<()> {
    let pets = PetRepository::new(db).read_all(DEFAULT_PAGE_SIZE)?;
    if pets.is_empty() {
        return c.say("No pets registered.");
    }
    for pet in &pets {
        print_pet(c, pet)?;
    }
    Ok(())
}

fn show<R: BufRead, W: Write>(db: &Database, c: &mut Console<R, W>) -> Result<()> {
    let id: i64 = c.ask_number("Pet ID")?;
    match PetRepository::new(db).read_by_id(id)? {
        Some(pet) => {
            c.say(format_args!("\n{}", pet))?;
            c.say(format_args!("Puppy: {}", yes_no(pet.is_puppy())))?;
            c.say(format_args!("Senior: {}", yes_no(pet.is_senior())))
        }
        None => c.say(format_args!("✗ No pet with ID {}", id)),
    }
}

fn update<R: BufRead, W: Write>(db: &Database, c: &mut Console<R, W>) -> Result<()> {
    let repo = PetRepository::new(db);
    let id: i64 = c.ask_number("ID of the pet to update")?;
    let Some(mut pet) = repo.read_by_id(id)? else {
        return c.say(format_args!("✗ No pet with ID {}", id));
    };

    c.say(format_args!("\nCurrent data: {}\n", pet))?;
    c.say("Enter the new data (Enter keeps the current value):")?;

    let name = c.ask_or("Name", pet.name())?;
    pet.set_name(&name)?;
    let species = c.ask_or("Species", pet.species().as_str())?;
    pet.set_species(&species)?;
    let breed = c.ask_or("Breed", pet.breed())?;
    pet.set_breed(&breed);
    let age = c.ask_number_or("Age (years)", pet.age())?;
    pet.set_age(age)?;
    let color = c.ask_or("Color", pet.color())?;
    pet.set_color(&color);
    let weight = c.ask_number_or("Weight (kg)", pet.weight_kg())?;
    pet.set_weight_kg(weight)?;
    let owner = c.ask_number_or("Owner (client ID)", pet.client_id())?;
    pet.set_client_id(owner)?;

    let missing = format!("Pet #{} no longer exists", id);
    report(c, repo.update(&pet)?, "Pet updated", &missing)
}

fn delete<R: BufRead, W: Write>(db: &Database, c: &mut Console<R, W>) -> Result<()> {
    let id: i64 = c.ask_number("ID of the pet to delete")?;
    if !c.confirm("Are you sure?")? {
        return c.say("Cancelled.");
    }
    let missing = format!("No pet with ID {}", id);
    report(c, PetRepository::new(db).delete(id)?, "Pet deleted", &missing)
}

fn by_client<R: BufRead, W: Write>(db: &Database, c: &mut Console<R, W>) -> Result<()> {
    let client_id: i64 = c.ask_number("Client ID")?;
    let pets = PetRepository::new(db).read_by_client(client_id)?;
    if pets.is_empty() {
        return c.say("The client has no pets registered.");
    }

    c.say(format_args!("\nPets of client {}:", client_id))?;
    for pet in &pets {
        print_pet(c, pet)?;
    }
    c.say(format_args!("\nTotal pets: {}", pets.len()))
}
