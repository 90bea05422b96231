use std::sync::{MutexGuard, PoisonError};

use log::debug;
use rusqlite::{params, params_from_iter, Connection, ErrorCode, OptionalExtension, Row};
use serde_json::Value;

use super::{Document, Filter, RecordId, SharedConnection, StoreError};

/// A stored document together with the id the store assigned to it.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredRecord {
    pub id: RecordId,
    pub document: Document,
}

impl StoredRecord {
    /// The document with its id folded in under `_id` as a string.
    pub fn into_display_document(self) -> Document {
        let mut document = self.document;
        document.insert("_id".to_string(), Value::String(self.id.to_string()));
        document
    }
}

/// Handle to one named collection of the [`super::RecordStore`].
#[derive(Clone)]
pub struct Collection {
    name: &'static str,
    connection: SharedConnection,
}

impl Collection {
    pub(super) fn new(name: &'static str, connection: SharedConnection) -> Self {
        Self { name, connection }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn insert(&self, document: &Document) -> Result<RecordId, StoreError> {
        let id = RecordId::new();
        let body = serde_json::to_string(document)?;

        let result = self.lock().execute(
            &format!("INSERT INTO {} (id, body) VALUES (?1, ?2)", self.name),
            params![id.to_string(), body],
        );

        match result {
            Ok(_) => {
                debug!("Inserted {} into {}", id, self.name);
                Ok(id)
            }
            Err(rusqlite::Error::SqliteFailure(error, _))
                if error.code == ErrorCode::ConstraintViolation =>
            {
                Err(StoreError::Duplicate(self.name))
            }
            Err(error) => Err(error.into()),
        }
    }

    /// `true` when a record was removed.
    pub fn delete(&self, id: &RecordId) -> Result<bool, StoreError> {
        let removed = self.lock().execute(
            &format!("DELETE FROM {} WHERE id = ?1", self.name),
            params![id.to_string()],
        )?;

        Ok(removed > 0)
    }

    /// All records in insertion order.
    pub fn find_all(&self) -> Result<Vec<StoredRecord>, StoreError> {
        let connection = self.lock();
        let mut statement =
            connection.prepare(&format!("SELECT id, body FROM {} ORDER BY seq", self.name))?;

        let rows = statement.query_map([], read_row)?;

        let mut records = Vec::new();
        for row in rows {
            let (id, body) = row?;
            records.push(decode_record(&id, &body)?);
        }

        Ok(records)
    }

    /// First record (in insertion order) matching every clause of `filter`.
    pub fn find_one(&self, filter: &Filter) -> Result<Option<StoredRecord>, StoreError> {
        let (clause, values) = filter.to_sql();

        let row = self
            .lock()
            .query_row(
                &format!(
                    "SELECT id, body FROM {} WHERE {} ORDER BY seq LIMIT 1",
                    self.name, clause
                ),
                params_from_iter(values),
                read_row,
            )
            .optional()?;

        match row {
            Some((id, body)) => Ok(Some(decode_record(&id, &body)?)),
            None => Ok(None),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Connection> {
        self.connection
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

fn read_row(row: &Row<'_>) -> rusqlite::Result<(String, String)> {
    Ok((row.get(0)?, row.get(1)?))
}

fn decode_record(id: &str, body: &str) -> Result<StoredRecord, StoreError> {
    Ok(StoredRecord {
        id: RecordId::parse(id)?,
        document: serde_json::from_str(body)?,
    })
}
