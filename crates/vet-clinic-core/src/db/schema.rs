//! SQLite schema definition.

/// Complete database schema for vet-clinic.
pub const SCHEMA: &str = r#"
-- Enable foreign keys
PRAGMA foreign_keys = ON;

-- ============================================================================
-- Clients
-- ============================================================================

CREATE TABLE IF NOT EXISTS clients (
    id INTEGER PRIMARY KEY,
    rut TEXT NOT NULL,
    names TEXT NOT NULL,
    surnames TEXT NOT NULL,
    phone TEXT NOT NULL DEFAULT '',
    email TEXT NOT NULL DEFAULT '',
    address TEXT
);

-- ============================================================================
-- Pets
-- ============================================================================

CREATE TABLE IF NOT EXISTS pets (
    id INTEGER PRIMARY KEY,
    name TEXT NOT NULL,
    species TEXT NOT NULL CHECK (species IN ('DOG', 'CAT', 'BIRD', 'RABBIT', 'HAMSTER')),
    breed TEXT NOT NULL DEFAULT '',
    age INTEGER NOT NULL,
    color TEXT NOT NULL DEFAULT '',
    weight_kg REAL NOT NULL,
    client_id INTEGER NOT NULL REFERENCES clients(id)
);

CREATE INDEX IF NOT EXISTS idx_pets_client ON pets(client_id);

-- ============================================================================
-- Veterinarians
-- ============================================================================

CREATE TABLE IF NOT EXISTS veterinarians (
    id INTEGER PRIMARY KEY,
    first_name TEXT NOT NULL,
    last_name TEXT NOT NULL,
    specialty TEXT NOT NULL DEFAULT '',
    phone TEXT NOT NULL DEFAULT '',
    email TEXT NOT NULL DEFAULT ''
);

-- ============================================================================
-- Appointments
-- ============================================================================

CREATE TABLE IF NOT EXISTS appointments (
    id INTEGER PRIMARY KEY,
    pet_id INTEGER NOT NULL REFERENCES pets(id),
    veterinarian_id INTEGER NOT NULL REFERENCES veterinarians(id),
    date TEXT NOT NULL,                          -- YYYY-MM-DD, sorts chronologically
    time TEXT NOT NULL DEFAULT '',
    reason TEXT NOT NULL DEFAULT '',
    status TEXT NOT NULL DEFAULT 'PENDING'
        CHECK (status IN ('PENDING', 'CONFIRMED', 'COMPLETED', 'CANCELLED')),
    diagnosis TEXT
);

CREATE INDEX IF NOT EXISTS idx_appointments_pet ON appointments(pet_id, date);
CREATE INDEX IF NOT EXISTS idx_appointments_vet ON appointments(veterinarian_id, date);

-- ============================================================================
-- Sequences (one monotonic counter per entity type)
-- ============================================================================

CREATE TABLE IF NOT EXISTS sequences (
    name TEXT PRIMARY KEY,
    value INTEGER NOT NULL DEFAULT 0
);

INSERT OR IGNORE INTO sequences (name, value) VALUES ('clients', 0);
INSERT OR IGNORE INTO sequences (name, value) VALUES ('pets', 0);
INSERT OR IGNORE INTO sequences (name, value) VALUES ('veterinarians', 0);
INSERT OR IGNORE INTO sequences (name, value) VALUES ('appointments', 0);
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use rusqlite::Connection;

    fn setup() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(SCHEMA).unwrap();
        conn
    }

    #[test]
    fn test_schema_valid() {
        let conn = Connection::open_in_memory().unwrap();
        let result = conn.execute_batch(SCHEMA);
        assert!(result.is_ok(), "Schema should be valid SQL: {:?}", result);
    }

    #[test]
    fn test_schema_idempotent() {
        let conn = setup();
        conn.execute("UPDATE sequences SET value = 5 WHERE name = 'pets'", [])
            .unwrap();
        conn.execute_batch(SCHEMA).unwrap();

        let value: i64 = conn
            .query_row("SELECT value FROM sequences WHERE name = 'pets'", [], |row| {
                row.get(0)
            })
            .unwrap();
        assert_eq!(value, 5);
    }

    #[test]
    fn test_pet_requires_client() {
        let conn = setup();
        let result = conn.execute(
            "INSERT INTO pets (id, name, species, age, weight_kg, client_id)
             VALUES (1, 'Max', 'DOG', 3, 20.0, 99)",
            [],
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_species_check() {
        let conn = setup();
        conn.execute(
            "INSERT INTO clients (id, rut, names, surnames) VALUES (1, '1-9', 'Ana', 'Rojas')",
            [],
        )
        .unwrap();
        let result = conn.execute(
            "INSERT INTO pets (id, name, species, age, weight_kg, client_id)
             VALUES (1, 'Rex', 'LIZARD', 3, 2.0, 1)",
            [],
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_client_delete_blocked_by_pets() {
        let conn = setup();
        conn.execute(
            "INSERT INTO clients (id, rut, names, surnames) VALUES (1, '1-9', 'Ana', 'Rojas')",
            [],
        )
        .unwrap();
        conn.execute(
            "INSERT INTO pets (id, name, species, age, weight_kg, client_id)
             VALUES (1, 'Max', 'DOG', 3, 20.0, 1)",
            [],
        )
        .unwrap();

        let result = conn.execute("DELETE FROM clients WHERE id = 1", []);
        assert!(result.is_err());
    }
}
