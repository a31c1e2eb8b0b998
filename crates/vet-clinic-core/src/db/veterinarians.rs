//! Veterinarian table mapping.

use rusqlite::types::Value;
use rusqlite::Row;

use super::{Repository, Table};
use crate::models::{Veterinarian, VeterinarianFields, VeterinarianRecord};

pub type VeterinarianRepository<'a> = Repository<'a, Veterinarian>;

impl Table for Veterinarian {
    const TABLE: &'static str = "veterinarians";
    const COLUMNS: &'static [&'static str] =
        &["first_name", "last_name", "specialty", "phone", "email"];
    const SEQUENCE: &'static str = "veterinarians";

    type Record = VeterinarianRecord;

    fn read_record(row: &Row<'_>) -> rusqlite::Result<VeterinarianRecord> {
        Ok(VeterinarianRecord {
            id: row.get(0)?,
            fields: VeterinarianFields {
                first_name: row.get(1)?,
                last_name: row.get(2)?,
                specialty: row.get(3)?,
                phone: row.get(4)?,
                email: row.get(5)?,
            },
        })
    }

    fn id(&self) -> i64 {
        Veterinarian::id(self)
    }

    fn values(&self) -> Vec<Value> {
        vec![
            self.first_name().to_string().into(),
            self.last_name().to_string().into(),
            self.specialty().to_string().into(),
            self.phone().to_string().into(),
            self.email().to_string().into(),
        ]
    }
}
