//! Reference table repository.
//!
//! Table and column names come from [`ReferenceKind`], never from input.

use rusqlite::{Connection, Row, params};

use crate::error::{AdminError, AdminResult};
use crate::models::{ReferenceEntry, ReferenceKind};

use super::optional;

fn from_row(row: &Row<'_>) -> rusqlite::Result<ReferenceEntry> {
    Ok(ReferenceEntry {
        id: row.get(0)?,
        label: row.get(1)?,
    })
}

/// Inserts a labelled row.
pub fn insert(conn: &Connection, kind: ReferenceKind, label: &str) -> AdminResult<ReferenceEntry> {
    conn.execute(
        &format!("INSERT INTO {} ({}) VALUES (?1)", kind.table(), kind.label_column()),
        params![label],
    )?;
    get(conn, kind, conn.last_insert_rowid())
}

/// Returns the entry, or `None` when the id is unknown.
pub fn find(conn: &Connection, kind: ReferenceKind, id: i64) -> AdminResult<Option<ReferenceEntry>> {
    let sql = format!(
        "SELECT id, {} FROM {} WHERE id = ?1",
        kind.label_column(),
        kind.table()
    );
    Ok(optional(conn.query_row(&sql, params![id], from_row))?)
}

/// Fetches a row by id.
pub fn get(conn: &Connection, kind: ReferenceKind, id: i64) -> AdminResult<ReferenceEntry> {
    find(conn, kind, id)?.ok_or_else(|| AdminError::not_found(kind.entity_name(), id))
}

/// Label of an optional reference, `None` when absent or dangling.
pub fn label_of(conn: &Connection, kind: ReferenceKind, id: Option<i64>) -> AdminResult<Option<String>> {
    match id {
        Some(id) => Ok(find(conn, kind, id)?.map(|e| e.label)),
        None => Ok(None),
    }
}

/// Lists entries alphabetically.
pub fn list(conn: &Connection, kind: ReferenceKind) -> AdminResult<Vec<ReferenceEntry>> {
    let sql = format!(
        "SELECT id, {label} FROM {table} ORDER BY {label}, id",
        label = kind.label_column(),
        table = kind.table()
    );
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map([], from_row)?;
    Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
}

/// Deletes an entry. Entries still referenced fail with a constraint error.
pub fn delete(conn: &Connection, kind: ReferenceKind, id: i64) -> AdminResult<()> {
    let changed = conn.execute(
        &format!("DELETE FROM {} WHERE id = ?1", kind.table()),
        params![id],
    )?;
    if changed == 0 {
        return Err(AdminError::not_found(kind.entity_name(), id));
    }
    Ok(())
}
