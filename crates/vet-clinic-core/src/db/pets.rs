//! Pet table mapping and owner lookup.

use rusqlite::types::Value;
use rusqlite::Row;

use super::{select_sql, DbResult, Repository, Table};
use crate::models::{Pet, PetFields, PetRecord};

pub type PetRepository<'a> = Repository<'a, Pet>;

impl Table for Pet {
    const TABLE: &'static str = "pets";
    const COLUMNS: &'static [&'static str] = &[
        "name",
        "species",
        "breed",
        "age",
        "color",
        "weight_kg",
        "client_id",
    ];
    const SEQUENCE: &'static str = "pets";

    type Record = PetRecord;

    fn read_record(row: &Row<'_>) -> rusqlite::Result<PetRecord> {
        Ok(PetRecord {
            id: row.get(0)?,
            fields: PetFields {
                name: row.get(1)?,
                species: row.get(2)?,
                breed: row.get(3)?,
                age: row.get(4)?,
                color: row.get(5)?,
                weight_kg: row.get(6)?,
                client_id: row.get(7)?,
            },
        })
    }

    fn id(&self) -> i64 {
        Pet::id(self)
    }

    fn values(&self) -> Vec<Value> {
        vec![
            self.name().to_string().into(),
            self.species().as_str().to_string().into(),
            self.breed().to_string().into(),
            self.age().into(),
            self.color().to_string().into(),
            self.weight_kg().into(),
            self.client_id().into(),
        ]
    }
}

impl<'a> Repository<'a, Pet> {
    /// All pets owned by a client.
    pub fn read_by_client(&self, client_id: i64) -> DbResult<Vec<Pet>> {
        self.query(&select_sql::<Pet>("WHERE client_id = ?1 ORDER BY id"), [client_id])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{ClientRepository, Database, WriteOutcome};
    use crate::models::{Client, ClientFields};

    fn setup_db() -> Database {
        let db = Database::open_in_memory().unwrap();
        let clients = ClientRepository::new(&db);
        for (id, rut) in [(1, "1-9"), (2, "2-7")] {
            let client = Client::new(
                id,
                ClientFields {
                    rut: rut.into(),
                    names: "Ana".into(),
                    surnames: "Rojas".into(),
                    ..Default::default()
                },
            )
            .unwrap();
            clients.create(&client).unwrap();
        }
        db
    }

    fn make_pet(id: i64, name: &str, client_id: i64) -> Pet {
        Pet::new(
            id,
            PetFields {
                name: name.into(),
                species: "cat".into(),
                breed: "Siamese".into(),
                age: 4,
                color: "cream".into(),
                weight_kg: 4.2,
                client_id,
            },
        )
        .unwrap()
    }

    #[test]
    fn test_insert_and_get() {
        let db = setup_db();
        let repo = PetRepository::new(&db);

        let pet = make_pet(1, "Michi", 1);
        assert!(repo.create(&pet).unwrap().is_committed());

        let retrieved = repo.read_by_id(1).unwrap().unwrap();
        assert_eq!(retrieved, pet);
        assert_eq!(retrieved.species().as_str(), "CAT");
    }

    #[test]
    fn test_unknown_owner_rejected() {
        let db = setup_db();
        let repo = PetRepository::new(&db);

        let outcome = repo.create(&make_pet(1, "Stray", 42)).unwrap();
        assert!(matches!(outcome, WriteOutcome::IntegrityViolation(_)));
        assert!(repo.read_by_id(1).unwrap().is_none());
    }

    #[test]
    fn test_update_to_unknown_owner_rejected() {
        let db = setup_db();
        let repo = PetRepository::new(&db);

        let mut pet = make_pet(1, "Michi", 1);
        repo.create(&pet).unwrap();

        pet.set_client_id(42).unwrap();
        let outcome = repo.update(&pet).unwrap();
        assert!(matches!(outcome, WriteOutcome::IntegrityViolation(_)));
        assert_eq!(repo.read_by_id(1).unwrap().unwrap().client_id(), 1);
    }

    #[test]
    fn test_read_by_client() {
        let db = setup_db();
        let repo = PetRepository::new(&db);

        repo.create(&make_pet(1, "Michi", 1)).unwrap();
        repo.create(&make_pet(2, "Luna", 2)).unwrap();
        repo.create(&make_pet(3, "Tom", 1)).unwrap();

        let pets = repo.read_by_client(1).unwrap();
        let names: Vec<&str> = pets.iter().map(|p| p.name()).collect();
        assert_eq!(names, vec!["Michi", "Tom"]);
        assert!(repo.read_by_client(99).unwrap().is_empty());
    }

    #[test]
    fn test_client_with_pets_cannot_be_deleted() {
        let db = setup_db();
        PetRepository::new(&db)
            .create(&make_pet(1, "Michi", 1))
            .unwrap();

        let clients = ClientRepository::new(&db);
        let outcome = clients.delete(1).unwrap();
        assert!(matches!(outcome, WriteOutcome::IntegrityViolation(_)));
        assert!(clients.read_by_id(1).unwrap().is_some());

        // no pets, no problem
        assert!(clients.delete(2).unwrap().is_committed());
    }
}
