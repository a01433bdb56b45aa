//! Project assignment (transfer) repository.

use chrono::Utc;
use rusqlite::{Connection, Row, params};

use crate::error::{AdminError, AdminResult};
use crate::models::{ProjectAssignment, ProjectAssignmentDraft};

use super::optional;

const COLUMNS: &str =
    "id, employee_number, from_project_id, project_id, transfer_date, remarks, created_at, updated_at";

fn from_row(row: &Row<'_>) -> rusqlite::Result<ProjectAssignment> {
    Ok(ProjectAssignment {
        id: row.get("id")?,
        employee_number: row.get("employee_number")?,
        from_project_id: row.get("from_project_id")?,
        project_id: row.get("project_id")?,
        transfer_date: row.get("transfer_date")?,
        remarks: row.get("remarks")?,
        created_at: row.get("created_at")?,
        updated_at: row.get("updated_at")?,
    })
}

/// Inserts a transfer.
pub fn insert(conn: &Connection, draft: &ProjectAssignmentDraft) -> AdminResult<ProjectAssignment> {
    conn.execute(
        "INSERT INTO project_assignments (employee_number, from_project_id, project_id,
            transfer_date, remarks, created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?6)",
        params![
            draft.employee_number,
            draft.from_project_id,
            draft.project_id,
            draft.transfer_date,
            draft.remarks,
            Utc::now(),
        ],
    )?;
    get(conn, conn.last_insert_rowid())
}

/// Fetches a transfer by id.
pub fn get(conn: &Connection, id: i64) -> AdminResult<ProjectAssignment> {
    let sql = format!("SELECT {} FROM project_assignments WHERE id = ?1", COLUMNS);
    optional(conn.query_row(&sql, params![id], from_row))?
        .ok_or_else(|| AdminError::not_found("project assignment", id))
}

/// Overwrites a transfer.
pub fn update(
    conn: &Connection,
    id: i64,
    draft: &ProjectAssignmentDraft,
) -> AdminResult<ProjectAssignment> {
    let changed = conn.execute(
        "UPDATE project_assignments SET employee_number = ?1, from_project_id = ?2,
            project_id = ?3, transfer_date = ?4, remarks = ?5, updated_at = ?6
         WHERE id = ?7",
        params![
            draft.employee_number,
            draft.from_project_id,
            draft.project_id,
            draft.transfer_date,
            draft.remarks,
            Utc::now(),
            id,
        ],
    )?;
    if changed == 0 {
        return Err(AdminError::not_found("project assignment", id));
    }
    get(conn, id)
}

/// Deletes the row and returns what was removed.
pub fn delete(conn: &Connection, id: i64) -> AdminResult<ProjectAssignment> {
    let assignment = get(conn, id)?;
    conn.execute("DELETE FROM project_assignments WHERE id = ?1", params![id])?;
    Ok(assignment)
}

/// Lists transfers, latest transfer date first.
pub fn list(conn: &Connection, employee_number: Option<i64>) -> AdminResult<Vec<ProjectAssignment>> {
    let mut sql = format!("SELECT {} FROM project_assignments", COLUMNS);
    let mut params_vec: Vec<Box<dyn rusqlite::ToSql>> = Vec::new();
    if let Some(number) = employee_number {
        sql.push_str(" WHERE employee_number = ?");
        params_vec.push(Box::new(number));
    }
    sql.push_str(" ORDER BY transfer_date DESC, id DESC");

    let params_refs: Vec<&dyn rusqlite::ToSql> = params_vec.iter().map(|p| p.as_ref()).collect();
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(params_refs.as_slice(), from_row)?;
    Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
}
