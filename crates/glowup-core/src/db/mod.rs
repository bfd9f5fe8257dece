//! Database operations and SQLite management for the roadmap store.
//!
//! Plans, weeks and tasks are separate tables that reference their parent by
//! id. Loading is explicit: a plan query is followed by "weeks where
//! plan_id = X ordered by week_number" and "tasks where week_id = Y ordered
//! by priority". Reads take a `&Connection` so the same helpers serve plain
//! reads and the inside of a write transaction.

use std::{path::Path, time::Duration};

use jiff::Timestamp;
use rusqlite::{Connection, types::Type};

use crate::error::{DatabaseResultExt, Result};

pub mod advance;
pub mod migrations;
pub mod plan_queries;
pub mod task_queries;
pub mod week_queries;

/// How long a connection waits for another writer before giving up.
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Database connection and operations handler.
pub struct Database {
    connection: Connection,
}

impl Database {
    /// Creates a new database connection and initializes the schema.
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let connection = Connection::open(path).db_context("Failed to open database connection")?;
        connection
            .busy_timeout(BUSY_TIMEOUT)
            .db_context("Failed to set busy timeout")?;

        let db = Self { connection };
        db.initialize_schema()?;
        Ok(db)
    }
}

/// Reads an RFC 3339 timestamp column.
pub(crate) fn timestamp_column(row: &rusqlite::Row, idx: usize) -> rusqlite::Result<Timestamp> {
    row.get::<_, String>(idx)?
        .parse::<Timestamp>()
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

/// Reads a nullable RFC 3339 timestamp column.
pub(crate) fn optional_timestamp_column(
    row: &rusqlite::Row,
    idx: usize,
) -> rusqlite::Result<Option<Timestamp>> {
    row.get::<_, Option<String>>(idx)?
        .map(|s| {
            s.parse::<Timestamp>().map_err(|e| {
                rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e))
            })
        })
        .transpose()
}

/// Whether a write failed on a UNIQUE or CHECK constraint.
pub(crate) fn is_constraint_violation(error: &rusqlite::Error) -> bool {
    matches!(
        error,
        rusqlite::Error::SqliteFailure(e, _) if e.code == rusqlite::ErrorCode::ConstraintViolation
    )
}
