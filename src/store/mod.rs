//! SQLite persistence.
//!
//! [`Database`] owns the connection and applies the schema migrations when
//! opened. The repository modules expose free functions taking a
//! `&Connection`, so they run unchanged against the connection itself or
//! inside a [`rusqlite::Transaction`] (which derefs to one).

pub mod assignments;
pub mod contracts;
pub mod employees;
pub mod leaves;
pub mod references;
mod schema;

pub use contracts::ContractFilter;
pub use employees::EmployeeFilter;
pub use schema::SCHEMA_VERSION;

use std::path::Path;
use std::str::FromStr;

use rusqlite::types::Type;
use rusqlite::{Connection, Row, Transaction};
use rust_decimal::Decimal;
use tracing::debug;

use crate::error::AdminResult;

/// The HR database.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Opens (or creates) the database file and brings its schema up to date.
    pub fn open<P: AsRef<Path>>(path: P) -> AdminResult<Self> {
        let path = path.as_ref();
        debug!(path = %path.display(), "Opening database");
        let conn = Connection::open(path)?;
        conn.execute_batch("PRAGMA journal_mode=WAL;")?;
        Self::init(conn)
    }

    /// Opens a private in-memory database with the full schema.
    pub fn open_in_memory() -> AdminResult<Self> {
        Self::init(Connection::open_in_memory()?)
    }

    fn init(mut conn: Connection) -> AdminResult<Self> {
        conn.execute_batch("PRAGMA foreign_keys=ON;")?;
        schema::migrate(&mut conn)?;
        Ok(Self { conn })
    }

    /// The underlying connection, for reads.
    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    /// Starts a transaction. It rolls back unless committed.
    pub fn transaction(&mut self) -> AdminResult<Transaction<'_>> {
        Ok(self.conn.transaction()?)
    }

    /// The schema version currently applied.
    pub fn schema_version(&self) -> AdminResult<i64> {
        schema::current_version(&self.conn)
    }
}

/// Reads a decimal stored as text.
pub(crate) fn decimal_column(row: &Row<'_>, column: &str) -> rusqlite::Result<Decimal> {
    let text: String = row.get(column)?;
    Decimal::from_str(&text).map_err(|e| {
        let index = row.as_ref().column_index(column).unwrap_or(0);
        rusqlite::Error::FromSqlConversionFailure(index, Type::Text, Box::new(e))
    })
}

/// Converts "no rows" into `None`, keeping every other error.
pub(crate) fn optional<T>(result: rusqlite::Result<T>) -> rusqlite::Result<Option<T>> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e),
    }
}
