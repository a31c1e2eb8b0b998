//! Appointment table mapping and per-pet / per-veterinarian history.

use rusqlite::types::Value;
use rusqlite::Row;

use super::{select_sql, DbResult, Repository, Table};
use crate::models::{Appointment, AppointmentFields, AppointmentRecord, DATE_FORMAT};

pub type AppointmentRepository<'a> = Repository<'a, Appointment>;

impl Table for Appointment {
    const TABLE: &'static str = "appointments";
    const COLUMNS: &'static [&'static str] = &[
        "pet_id",
        "veterinarian_id",
        "date",
        "time",
        "reason",
        "status",
        "diagnosis",
    ];
    const SEQUENCE: &'static str = "appointments";

    type Record = AppointmentRecord;

    fn read_record(row: &Row<'_>) -> rusqlite::Result<AppointmentRecord> {
        Ok(AppointmentRecord {
            id: row.get(0)?,
            fields: AppointmentFields {
                pet_id: row.get(1)?,
                veterinarian_id: row.get(2)?,
                date: row.get(3)?,
                time: row.get(4)?,
                reason: row.get(5)?,
                status: Some(row.get(6)?),
                diagnosis: row.get(7)?,
            },
        })
    }

    fn id(&self) -> i64 {
        Appointment::id(self)
    }

    fn values(&self) -> Vec<Value> {
        vec![
            self.pet_id().into(),
            self.veterinarian_id().into(),
            self.date().format(DATE_FORMAT).to_string().into(),
            self.time().to_string().into(),
            self.reason().to_string().into(),
            self.status().as_str().to_string().into(),
            self.diagnosis().map(str::to_string).into(),
        ]
    }
}

impl<'a> Repository<'a, Appointment> {
    /// A pet's appointments, most recent date first.
    pub fn read_by_pet(&self, pet_id: i64) -> DbResult<Vec<Appointment>> {
        self.query(
            &select_sql::<Appointment>("WHERE pet_id = ?1 ORDER BY date DESC, id DESC"),
            [pet_id],
        )
    }

    /// A veterinarian's appointments, most recent date first.
    pub fn read_by_veterinarian(&self, veterinarian_id: i64) -> DbResult<Vec<Appointment>> {
        self.query(
            &select_sql::<Appointment>("WHERE veterinarian_id = ?1 ORDER BY date DESC, id DESC"),
            [veterinarian_id],
        )
    }
}
