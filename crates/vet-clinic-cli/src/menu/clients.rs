use std::io::{BufRead, Write};

use anyhow::Result;
use vet_clinic_core::{Client, ClientFields, ClientRepository, Database, DEFAULT_PAGE_SIZE};

use super::{invalid_option, report, run_action};
use crate::console::Console;

const MENU: &str = "
    ====================================
    |        CLIENTS                   |
    |----------------------------------|
    | 1. Create client                 |
    | 2. List all clients              |
    | 3. Find client by ID             |
    | 4. Update client                 |
    | 5. Delete client                 |
    | 0. Back to main menu             |
    ====================================
";

pub fn menu<R: BufRead, W: Write>(db: &Database, console: &mut Console<R, W>) -> Result<()> {
    loop {
        console.clear()?;
        console.say(MENU)?;

        match console.ask("Choose an option [1-5, 0]")?.trim() {
            "1" => run_action(console, "CREATE CLIENT", |c| create(db, c))?,
            "2" => run_action(console, "ALL CLIENTS", |c| list(db, c))?,
            "3" => run_action(console, "FIND CLIENT", |c| show(db, c))?,
            "4" => run_action(console, "UPDATE CLIENT", |c| update(db, c))?,
            "5" => run_action(console, "DELETE CLIENT", |c| delete(db, c))?,
            "0" => return Ok(()),
            _ => invalid_option(console)?,
        }
    }
}

fn create<R: BufRead, W: Write>(db: &Database, c: &mut Console<R, W>) -> Result<()> {
    let repo = ClientRepository::new(db);
    let fields = ClientFields {
        rut: c.ask("RUT (e.g. 12345678-9)")?,
        names: c.ask("Names")?,
        surnames: c.ask("Surnames")?,
        phone: c.ask("Phone")?,
        email: c.ask("Email")?,
        address: Some(c.ask("Address")?),
    };

    let client = Client::new(repo.next_id()?, fields)?;
    let done = format!("Client #{} created", client.id());
    report(c, repo.create(&client)?, &done, "Client not found")
}

fn list<R: BufRead, W: Write>(db: &Database, c: &mut Console<R, W>) -> Result<()> {
    let clients = ClientRepository::new(db).read_all(DEFAULT_PAGE_SIZE)?;
    if clients.is_empty() {
        return c.say("No clients registered.");
    }
    for client in &clients {
        c.say(format_args!("  {}", client))?;
    }
    Ok(())
}

fn show<R: BufRead, W: Write>(db: &Database, c: &mut Console<R, W>) -> Result<()> {
    let id: i64 = c.ask_number("Client ID")?;
    match ClientRepository::new(db).read_by_id(id)? {
        Some(client) => {
            c.say(format_args!("\n{}", client))?;
            c.say(format_args!("Phone: {}", client.phone()))?;
            c.say(format_args!("Address: {}", client.address().unwrap_or("-")))
        }
        None => c.say(format_args!("✗ No client with ID {}", id)),
    }
}

fn update<R: BufRead, W: Write>(db: &Database, c: &mut Console<R, W>) -> Result<()> {
    let repo = ClientRepository::new(db);
    let id: i64 = c.ask_number("ID of the client to update")?;
    let Some(mut client) = repo.read_by_id(id)? else {
        return c.say(format_args!("✗ No client with ID {}", id));
    };

    c.say(format_args!("\nCurrent data: {}\n", client))?;
    c.say("Enter the new data (Enter keeps the current value):")?;

    let rut = c.ask_or("RUT", client.rut())?;
    client.set_rut(&rut)?;
    let names = c.ask_or("Names", client.names())?;
    client.set_names(&names)?;
    let surnames = c.ask_or("Surnames", client.surnames())?;
    client.set_surnames(&surnames)?;
    let phone = c.ask_or("Phone", client.phone())?;
    client.set_phone(&phone);
    let email = c.ask_or("Email", client.email())?;
    client.set_email(&email)?;
    let address = c.ask_or("Address", client.address().unwrap_or(""))?;
    client.set_address(Some(&address));

    let missing = format!("Client #{} no longer exists", id);
    report(c, repo.update(&client)?, "Client updated", &missing)
}

fn delete<R: BufRead, W: Write>(db: &Database, c: &mut Console<R, W>) -> Result<()> {
    let id: i64 = c.ask_number("ID of the client to delete")?;
    if !c.confirm("Are you sure?")? {
        return c.say("Cancelled.");
    }
    let missing = format!("No client with ID {}", id);
    report(c, ClientRepository::new(db).delete(id)?, "Client deleted", &missing)
}
