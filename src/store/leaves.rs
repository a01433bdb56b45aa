//! Employee leave repository.

use chrono::Utc;
use rusqlite::{Connection, Row, params};

use crate::error::{AdminError, AdminResult};
use crate::models::{EmployeeLeave, LeaveDraft};

use super::optional;

const COLUMNS: &str = "id, employee_number, start_date, end_date, visa_expiration,
    remaining_leave_days, remarks, created_at, updated_at";

fn from_row(row: &Row<'_>) -> rusqlite::Result<EmployeeLeave> {
    Ok(EmployeeLeave {
        id: row.get("id")?,
        employee_number: row.get("employee_number")?,
        start_date: row.get("start_date")?,
        end_date: row.get("end_date")?,
        visa_expiration: row.get("visa_expiration")?,
        remaining_leave_days: row.get("remaining_leave_days")?,
        remarks: row.get("remarks")?,
        created_at: row.get("created_at")?,
        updated_at: row.get("updated_at")?,
    })
}

/// Inserts a leave. Remaining days start at zero until the observer runs.
pub fn insert(conn: &Connection, draft: &LeaveDraft) -> AdminResult<EmployeeLeave> {
    conn.execute(
        "INSERT INTO employee_leaves (employee_number, start_date, end_date, visa_expiration,
            remarks, created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?6)",
        params![
            draft.employee_number,
            draft.start_date,
            draft.end_date,
            draft.visa_expiration,
            draft.remarks,
            Utc::now(),
        ],
    )?;
    get(conn, conn.last_insert_rowid())
}

/// Fetches a leave by id.
pub fn get(conn: &Connection, id: i64) -> AdminResult<EmployeeLeave> {
    let sql = format!("SELECT {} FROM employee_leaves WHERE id = ?1", COLUMNS);
    optional(conn.query_row(&sql, params![id], from_row))?
        .ok_or_else(|| AdminError::not_found("leave", id))
}

/// Overwrites the form fields. Remaining days are left to the observer.
pub fn update(conn: &Connection, id: i64, draft: &LeaveDraft) -> AdminResult<EmployeeLeave> {
    let changed = conn.execute(
        "UPDATE employee_leaves SET employee_number = ?1, start_date = ?2, end_date = ?3,
            visa_expiration = ?4, remarks = ?5, updated_at = ?6
         WHERE id = ?7",
        params![
            draft.employee_number,
            draft.start_date,
            draft.end_date,
            draft.visa_expiration,
            draft.remarks,
            Utc::now(),
            id,
        ],
    )?;
    if changed == 0 {
        return Err(AdminError::not_found("leave", id));
    }
    get(conn, id)
}

/// Stores the balance left after a leave.
pub fn set_remaining(conn: &Connection, id: i64, remaining: i64) -> AdminResult<()> {
    conn.execute(
        "UPDATE employee_leaves SET remaining_leave_days = ?1 WHERE id = ?2",
        params![remaining, id],
    )?;
    Ok(())
}

/// Deletes the row and returns what was removed.
pub fn delete(conn: &Connection, id: i64) -> AdminResult<EmployeeLeave> {
    let leave = get(conn, id)?;
    conn.execute("DELETE FROM employee_leaves WHERE id = ?1", params![id])?;
    Ok(leave)
}

/// Lists leaves, latest departure first.
pub fn list(conn: &Connection, employee_number: Option<i64>) -> AdminResult<Vec<EmployeeLeave>> {
    let mut sql = format!("SELECT {} FROM employee_leaves", COLUMNS);
    let mut params_vec: Vec<Box<dyn rusqlite::ToSql>> = Vec::new();
    if let Some(number) = employee_number {
        sql.push_str(" WHERE employee_number = ?");
        params_vec.push(Box::new(number));
    }
    sql.push_str(" ORDER BY start_date DESC, id DESC");

    let params_refs: Vec<&dyn rusqlite::ToSql> = params_vec.iter().map(|p| p.as_ref()).collect();
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(params_refs.as_slice(), from_row)?;
    Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
}
