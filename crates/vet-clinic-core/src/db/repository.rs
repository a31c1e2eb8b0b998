//! Generic CRUD repository over one entity table.

use std::marker::PhantomData;

use rusqlite::types::Value;
use rusqlite::{params_from_iter, OptionalExtension, Params, Row};
use tracing::{debug, info, warn};

use super::{constraint_violation, Database, DbError, DbResult, WriteOutcome};
use crate::models::ValidationError;

/// Default `read_all` page size.
pub const DEFAULT_PAGE_SIZE: usize = 100;

/// Mapping between an entity and its table.
///
/// Every table has an integer `id` primary key followed by `COLUMNS`.
pub trait Table: Sized {
    const TABLE: &'static str;
    /// Non-key columns, in the order produced by [`Table::values`].
    const COLUMNS: &'static [&'static str];
    /// Row name in the `sequences` table.
    const SEQUENCE: &'static str;

    /// Unvalidated row contents.
    type Record: TryInto<Self, Error = ValidationError>;

    /// Decode a row selected as `id, COLUMNS...`.
    fn read_record(row: &Row<'_>) -> rusqlite::Result<Self::Record>;

    fn id(&self) -> i64;

    /// Values for `COLUMNS`, in order.
    fn values(&self) -> Vec<Value>;
}

/// `SELECT id, <columns> FROM <table> <tail>`
pub(crate) fn select_sql<T: Table>(tail: &str) -> String {
    format!(
        "SELECT id, {} FROM {} {}",
        T::COLUMNS.join(", "),
        T::TABLE,
        tail
    )
}

/// Repository for one entity type.
pub struct Repository<'a, T> {
    db: &'a Database,
    _entity: PhantomData<fn() -> T>,
}

impl<'a, T: Table> Repository<'a, T> {
    pub fn new(db: &'a Database) -> Self {
        Self {
            db,
            _entity: PhantomData,
        }
    }

    /// Insert a new row with the entity's id.
    pub fn create(&self, entity: &T) -> DbResult<WriteOutcome> {
        let conn = self.db.connect()?;
        let placeholders: Vec<String> = (1..=T::COLUMNS.len() + 1)
            .map(|i| format!("?{}", i))
            .collect();
        let sql = format!(
            "INSERT INTO {} (id, {}) VALUES ({})",
            T::TABLE,
            T::COLUMNS.join(", "),
            placeholders.join(", ")
        );

        let mut values = vec![Value::Integer(entity.id())];
        values.extend(entity.values());

        match conn.execute(&sql, params_from_iter(values)) {
            Ok(_) => {
                info!(table = T::TABLE, id = entity.id(), "created");
                Ok(WriteOutcome::Committed)
            }
            Err(err) => Self::rejected(err, "create", entity.id()),
        }
    }

    /// Get one entity by id.
    pub fn read_by_id(&self, id: i64) -> DbResult<Option<T>> {
        let conn = self.db.connect()?;
        let record = conn
            .query_row(&select_sql::<T>("WHERE id = ?1"), [id], T::read_record)
            .optional()
            .map_err(Self::unreadable)?;

        match record {
            Some(record) => Ok(Some(record.try_into()?)),
            None => {
                debug!(table = T::TABLE, id, "not found");
                Ok(None)
            }
        }
    }

    /// Up to `limit` entities, ordered by id.
    pub fn read_all(&self, limit: usize) -> DbResult<Vec<T>> {
        let limit = i64::try_from(limit).unwrap_or(i64::MAX);
        self.query(&select_sql::<T>("ORDER BY id LIMIT ?1"), [limit])
    }

    /// Overwrite every column of the row with the entity's id.
    pub fn update(&self, entity: &T) -> DbResult<WriteOutcome> {
        let conn = self.db.connect()?;
        let assignments: Vec<String> = T::COLUMNS
            .iter()
            .enumerate()
            .map(|(i, column)| format!("{} = ?{}", column, i + 2))
            .collect();
        let sql = format!(
            "UPDATE {} SET {} WHERE id = ?1",
            T::TABLE,
            assignments.join(", ")
        );

        let mut values = vec![Value::Integer(entity.id())];
        values.extend(entity.values());

        match conn.execute(&sql, params_from_iter(values)) {
            Ok(0) => {
                debug!(table = T::TABLE, id = entity.id(), "update found no row");
                Ok(WriteOutcome::NotFound)
            }
            Ok(_) => {
                info!(table = T::TABLE, id = entity.id(), "updated");
                Ok(WriteOutcome::Committed)
            }
            Err(err) => Self::rejected(err, "update", entity.id()),
        }
    }

    /// Remove the row with `id`. Rows that others still reference stay.
    pub fn delete(&self, id: i64) -> DbResult<WriteOutcome> {
        let conn = self.db.connect()?;
        let sql = format!("DELETE FROM {} WHERE id = ?1", T::TABLE);

        match conn.execute(&sql, [id]) {
            Ok(0) => {
                debug!(table = T::TABLE, id, "delete found no row");
                Ok(WriteOutcome::NotFound)
            }
            Ok(_) => {
                info!(table = T::TABLE, id, "deleted");
                Ok(WriteOutcome::Committed)
            }
            Err(err) => Self::rejected(err, "delete", id),
        }
    }

    /// Allocate the next identifier for this entity type.
    pub fn next_id(&self) -> DbResult<i64> {
        let conn = self.db.connect()?;
        let id: Option<i64> = conn
            .query_row(
                "UPDATE sequences SET value = value + 1 WHERE name = ?1 RETURNING value",
                [T::SEQUENCE],
                |row| row.get(0),
            )
            .optional()?;

        let id = id.ok_or_else(|| DbError::SequenceMissing(T::SEQUENCE.to_string()))?;
        debug!(sequence = T::SEQUENCE, id, "allocated id");
        Ok(id)
    }

    /// Run a select built with [`select_sql`] and validate every row.
    pub(crate) fn query<P: Params>(&self, sql: &str, params: P) -> DbResult<Vec<T>> {
        let conn = self.db.connect()?;
        let mut stmt = conn.prepare(sql)?;
        let rows = stmt.query_map(params, T::read_record)?;

        let mut entities: Vec<T> = Vec::new();
        for row in rows {
            entities.push(row.map_err(Self::unreadable)?.try_into()?);
        }
        debug!(table = T::TABLE, count = entities.len(), "listed");
        Ok(entities)
    }

    /// A stored value that cannot be decoded is a corrupt row.
    fn unreadable(err: rusqlite::Error) -> DbError {
        let column = match &err {
            rusqlite::Error::FromSqlConversionFailure(i, ..)
            | rusqlite::Error::IntegralValueOutOfRange(i, _)
            | rusqlite::Error::InvalidColumnType(i, ..) => *i,
            _ => return err.into(),
        };
        let field = match column {
            0 => "id",
            i => T::COLUMNS.get(i - 1).copied().unwrap_or("row"),
        };
        warn!(table = T::TABLE, field, error = %err, "unreadable stored row");
        DbError::InvalidRow(ValidationError::new(
            field,
            format!("unreadable stored value ({})", err),
        ))
    }

    /// Constraint failures become an outcome; anything else is fatal.
    fn rejected(err: rusqlite::Error, op: &str, id: i64) -> DbResult<WriteOutcome> {
        match constraint_violation(&err) {
            Some(reason) => {
                info!(table = T::TABLE, id, op, %reason, "integrity violation");
                Ok(WriteOutcome::IntegrityViolation(reason))
            }
            None => Err(err.into()),
        }
    }
}
