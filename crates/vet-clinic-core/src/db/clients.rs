//! Client table mapping.

use rusqlite::types::Value;
use rusqlite::Row;

use super::{Repository, Table};
use crate::models::{Client, ClientFields, ClientRecord};

pub type ClientRepository<'a> = Repository<'a, Client>;

impl Table for Client {
    const TABLE: &'static str = "clients";
    const COLUMNS: &'static [&'static str] =
        &["rut", "names", "surnames", "phone", "email", "address"];
    const SEQUENCE: &'static str = "clients";

    type Record = ClientRecord;

    fn read_record(row: &Row<'_>) -> rusqlite::Result<ClientRecord> {
        Ok(ClientRecord {
            id: row.get(0)?,
            fields: ClientFields {
                rut: row.get(1)?,
                names: row.get(2)?,
                surnames: row.get(3)?,
                phone: row.get(4)?,
                email: row.get(5)?,
                address: row.get(6)?,
            },
        })
    }

    fn id(&self) -> i64 {
        Client::id(self)
    }

    fn values(&self) -> Vec<Value> {
        vec![
            self.rut().to_string().into(),
            self.names().to_string().into(),
            self.surnames().to_string().into(),
            self.phone().to_string().into(),
            self.email().to_string().into(),
            self.address().map(str::to_string).into(),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{Database, WriteOutcome, DEFAULT_PAGE_SIZE};

    fn setup_db() -> Database {
        Database::open_in_memory().unwrap()
    }

    fn make_client(repo: &ClientRepository<'_>, rut: &str, names: &str) -> Client {
        let id = repo.next_id().unwrap();
        Client::new(
            id,
            ClientFields {
                rut: rut.into(),
                names: names.into(),
                surnames: "Rojas".into(),
                phone: "555-0101".into(),
                email: format!("{}@example.cl", names.to_lowercase()),
                address: Some("Calle 1".into()),
            },
        )
        .unwrap()
    }

    #[test]
    fn test_insert_and_get() {
        let db = setup_db();
        let repo = ClientRepository::new(&db);

        let client = make_client(&repo, "11111111-1", "Ana");
        assert_eq!(repo.create(&client).unwrap(), WriteOutcome::Committed);

        let retrieved = repo.read_by_id(client.id()).unwrap().unwrap();
        assert_eq!(retrieved, client);
    }

    #[test]
    fn test_get_missing_is_none() {
        let db = setup_db();
        let repo = ClientRepository::new(&db);
        assert!(repo.read_by_id(404).unwrap().is_none());
    }

    #[test]
    fn test_duplicate_id_is_integrity_violation() {
        let db = setup_db();
        let repo = ClientRepository::new(&db);

        let client = make_client(&repo, "11111111-1", "Ana");
        repo.create(&client).unwrap();

        let outcome = repo.create(&client).unwrap();
        assert!(matches!(outcome, WriteOutcome::IntegrityViolation(_)));
    }

    #[test]
    fn test_update_client() {
        let db = setup_db();
        let repo = ClientRepository::new(&db);

        let mut client = make_client(&repo, "11111111-1", "Ana");
        repo.create(&client).unwrap();

        client.set_phone("555-9999");
        client.set_address(None);
        assert_eq!(repo.update(&client).unwrap(), WriteOutcome::Committed);

        let retrieved = repo.read_by_id(client.id()).unwrap().unwrap();
        assert_eq!(retrieved.phone(), "555-9999");
        assert_eq!(retrieved.address(), None);
    }

    #[test]
    fn test_read_all_respects_limit() {
        let db = setup_db();
        let repo = ClientRepository::new(&db);

        for (rut, name) in [("1-9", "Ana"), ("2-7", "Luis"), ("3-5", "Sofia")] {
            let client = make_client(&repo, rut, name);
            repo.create(&client).unwrap();
        }

        assert_eq!(repo.read_all(DEFAULT_PAGE_SIZE).unwrap().len(), 3);
        let first_two = repo.read_all(2).unwrap();
        assert_eq!(first_two.len(), 2);
        assert_eq!(first_two[0].names(), "Ana");
        assert!(repo.read_all(0).unwrap().is_empty());
    }

    #[test]
    fn test_delete_client() {
        let db = setup_db();
        let repo = ClientRepository::new(&db);

        let client = make_client(&repo, "11111111-1", "Ana");
        repo.create(&client).unwrap();

        assert_eq!(repo.delete(client.id()).unwrap(), WriteOutcome::Committed);
        assert!(repo.read_by_id(client.id()).unwrap().is_none());
        assert_eq!(repo.delete(client.id()).unwrap(), WriteOutcome::NotFound);
    }
}
