//! # Record store
//!
//! Document storage for items and users, backed by SQLite.
//!
//! ## Layout
//!
//! - One table per named collection
//! - Rows are `(seq, id, body)`: `seq` keeps insertion order, `id` is a UUIDv4 in
//!   hyphenated form, `body` is the JSON document
//! - Unique fields are enforced with an expression index over `json_extract`, so a
//!   duplicate insert fails inside SQLite instead of relying on a prior lookup
//!
//! The connection sits behind a single mutex. Every operation is one statement,
//! so there is nothing to coordinate beyond what SQLite already guarantees.
use std::{
    collections::HashMap,
    fmt,
    fs,
    path::Path,
    str::FromStr,
    sync::{Arc, Mutex},
};

use log::info;
use rusqlite::Connection;
use thiserror::Error;
use uuid::Uuid;

mod collection;
mod filter;

pub use collection::{Collection, StoredRecord};
pub use filter::Filter;

pub const ITEMS_COLLECTION: &str = "items_collection";
pub const USERS_COLLECTION: &str = "users_collection";
pub const IN_MEMORY: &str = ":memory:";

pub type Document = serde_json::Map<String, serde_json::Value>;

type SharedConnection = Arc<Mutex<Connection>>;

struct CollectionSpec {
    name: &'static str,
    unique_fields: &'static [&'static str],
}

static SCHEMA: [CollectionSpec; 2] = [
    CollectionSpec {
        name: ITEMS_COLLECTION,
        unique_fields: &[],
    },
    CollectionSpec {
        name: USERS_COLLECTION,
        unique_fields: &["username"],
    },
];

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("collection {0} not found")]
    MissingCollection(String),

    #[error("invalid record id {0:?}")]
    InvalidId(String),

    #[error("unique constraint violated in {0}")]
    Duplicate(&'static str),

    #[error("document encoding error: {0}")]
    Encoding(#[from] serde_json::Error),

    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("database file error: {0}")]
    Io(#[from] std::io::Error),
}

/// Identifier assigned by the store on insert.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct RecordId(Uuid);

impl RecordId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn parse(raw: &str) -> Result<Self, StoreError> {
        Uuid::parse_str(raw.trim())
            .map(Self)
            .map_err(|_| StoreError::InvalidId(raw.to_string()))
    }
}

impl Default for RecordId {
    fn default() -> Self {
        Self::new()
    }
}

impl FromStr for RecordId {
    type Err = StoreError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        Self::parse(raw)
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.hyphenated())
    }
}

pub struct RecordStore {
    connection: SharedConnection,
    collections: HashMap<&'static str, &'static CollectionSpec>,
}

impl RecordStore {
    /// Opens (or creates) the database at `path`. `:memory:` gives a private
    /// in-memory database.
    pub fn open(path: &str) -> Result<Self, StoreError> {
        if path == IN_MEMORY {
            return Self::open_in_memory();
        }

        if let Some(parent) = Path::new(path).parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        info!("Opening record store at {}", path);
        Self::init(Connection::open(path)?)
    }

    pub fn open_in_memory() -> Result<Self, StoreError> {
        info!("Opening in-memory record store");
        Self::init(Connection::open_in_memory()?)
    }

    fn init(connection: Connection) -> Result<Self, StoreError> {
        let mut collections = HashMap::new();

        for spec in SCHEMA.iter() {
            connection.execute(
                &format!(
                    "CREATE TABLE IF NOT EXISTS {} (
                        seq INTEGER PRIMARY KEY AUTOINCREMENT,
                        id TEXT NOT NULL UNIQUE,
                        body TEXT NOT NULL
                    )",
                    spec.name
                ),
                [],
            )?;

            for field in spec.unique_fields {
                connection.execute(
                    &format!(
                        "CREATE UNIQUE INDEX IF NOT EXISTS {name}_{field}_unique
                         ON {name} (json_extract(body, '$.{field}'))",
                        name = spec.name,
                        field = field
                    ),
                    [],
                )?;
            }

            collections.insert(spec.name, spec);
        }

        Ok(Self {
            connection: Arc::new(Mutex::new(connection)),
            collections,
        })
    }

    /// Handle to a named collection. Unknown names are a deployment problem and
    /// are reported as [`StoreError::MissingCollection`].
    pub fn collection(&self, name: &str) -> Result<Collection, StoreError> {
        match self.collections.get(name) {
            Some(spec) => Ok(Collection::new(spec.name, self.connection.clone())),
            None => Err(StoreError::MissingCollection(name.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_id_round_trips_through_display() {
        let id = RecordId::new();
        let parsed: RecordId = id.to_string().parse().unwrap();
        assert_eq!(parsed, id);
    }

    #[test]
    fn malformed_record_id_is_rejected() {
        assert!(matches!(
            RecordId::parse("not-an-id"),
            Err(StoreError::InvalidId(raw)) if raw == "not-an-id"
        ));
        assert!(RecordId::parse("").is_err());
    }

    #[test]
    fn unknown_collection_is_reported() {
        let store = RecordStore::open_in_memory().unwrap();
        assert!(store.collection(ITEMS_COLLECTION).is_ok());
        assert!(matches!(
            store.collection("orders_collection"),
            Err(StoreError::MissingCollection(name)) if name == "orders_collection"
        ));
    }
}
