//! Contract repository with soft delete.

use chrono::{NaiveDate, Utc};
use rusqlite::{Connection, Row, params};

use crate::calculation::calendar_diff;
use crate::error::{AdminError, AdminResult};
use crate::models::{Contract, ContractDraft};

use super::{decimal_column, optional};

const COLUMNS: &str = "id, employee_number, employee_job_id, start_date, end_date,
    paper_contract_end_date, basic_salary, housing_allowance, transportation_allowance,
    food_allowance, remarks, file_link, deleted_at, created_at, updated_at";

/// Filter for the contract list.
///
/// Date bounds are inclusive. `min_years`/`max_years` bound the whole
/// calendar years between the start and end dates.
#[derive(Debug, Clone, Default)]
pub struct ContractFilter {
    /// Only this employee.
    pub employee_number: Option<i64>,
    /// Any of these job titles; empty means all.
    pub job_ids: Vec<i64>,
    /// Earliest start date.
    pub start_from: Option<NaiveDate>,
    /// Latest start date.
    pub start_to: Option<NaiveDate>,
    /// Earliest end date.
    pub end_from: Option<NaiveDate>,
    /// Latest end date.
    pub end_to: Option<NaiveDate>,
    /// Minimum length in whole years.
    pub min_years: Option<u32>,
    /// Maximum length in whole years.
    pub max_years: Option<u32>,
    /// Include soft-deleted rows.
    pub include_deleted: bool,
}

impl ContractFilter {
    fn matches_years(&self, contract: &Contract) -> bool {
        let years = calendar_diff(contract.start_date, contract.end_date).years;
        self.min_years.is_none_or(|min| years >= min) && self.max_years.is_none_or(|max| years <= max)
    }
}

fn from_row(row: &Row<'_>) -> rusqlite::Result<Contract> {
    Ok(Contract {
        id: row.get("id")?,
        employee_number: row.get("employee_number")?,
        employee_job_id: row.get("employee_job_id")?,
        start_date: row.get("start_date")?,
        end_date: row.get("end_date")?,
        paper_contract_end_date: row.get("paper_contract_end_date")?,
        basic_salary: decimal_column(row, "basic_salary")?,
        housing_allowance: decimal_column(row, "housing_allowance")?,
        transportation_allowance: decimal_column(row, "transportation_allowance")?,
        food_allowance: decimal_column(row, "food_allowance")?,
        remarks: row.get("remarks")?,
        file_link: row.get("file_link")?,
        deleted_at: row.get("deleted_at")?,
        created_at: row.get("created_at")?,
        updated_at: row.get("updated_at")?,
    })
}

/// Inserts a contract and returns the stored row.
pub fn insert(conn: &Connection, draft: &ContractDraft) -> AdminResult<Contract> {
    conn.execute(
        "INSERT INTO contracts (employee_number, employee_job_id, start_date, end_date,
            paper_contract_end_date, basic_salary, housing_allowance, transportation_allowance,
            food_allowance, remarks, file_link, created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?12)",
        params![
            draft.employee_number,
            draft.employee_job_id,
            draft.start_date,
            draft.end_date,
            draft.paper_contract_end_date,
            draft.basic_salary.to_string(),
            draft.housing_allowance.to_string(),
            draft.transportation_allowance.to_string(),
            draft.food_allowance.to_string(),
            draft.remarks,
            draft.file_link,
            Utc::now(),
        ],
    )?;
    get(conn, conn.last_insert_rowid())
}

/// Returns the contract, soft-deleted or not, or `None`.
pub fn find(conn: &Connection, id: i64) -> AdminResult<Option<Contract>> {
    let sql = format!("SELECT {} FROM contracts WHERE id = ?1", COLUMNS);
    Ok(optional(conn.query_row(&sql, params![id], from_row))?)
}

/// Returns the contract, soft-deleted or not, or a not-found error.
pub fn get(conn: &Connection, id: i64) -> AdminResult<Contract> {
    find(conn, id)?.ok_or_else(|| AdminError::not_found("contract", id))
}

/// Overwrites every editable field.
pub fn update(conn: &Connection, id: i64, draft: &ContractDraft) -> AdminResult<Contract> {
    let changed = conn.execute(
        "UPDATE contracts SET employee_number = ?1, employee_job_id = ?2, start_date = ?3,
            end_date = ?4, paper_contract_end_date = ?5, basic_salary = ?6,
            housing_allowance = ?7, transportation_allowance = ?8, food_allowance = ?9,
            remarks = ?10, file_link = ?11, updated_at = ?12
         WHERE id = ?13",
        params![
            draft.employee_number,
            draft.employee_job_id,
            draft.start_date,
            draft.end_date,
            draft.paper_contract_end_date,
            draft.basic_salary.to_string(),
            draft.housing_allowance.to_string(),
            draft.transportation_allowance.to_string(),
            draft.food_allowance.to_string(),
            draft.remarks,
            draft.file_link,
            Utc::now(),
            id,
        ],
    )?;
    if changed == 0 {
        return Err(AdminError::not_found("contract", id));
    }
    get(conn, id)
}

/// Marks the contract deleted. Already deleted contracts are not found.
pub fn soft_delete(conn: &Connection, id: i64) -> AdminResult<Contract> {
    let changed = conn.execute(
        "UPDATE contracts SET deleted_at = ?1 WHERE id = ?2 AND deleted_at IS NULL",
        params![Utc::now(), id],
    )?;
    if changed == 0 {
        return Err(AdminError::not_found("contract", id));
    }
    get(conn, id)
}

/// Clears the deleted mark. Only deleted contracts can be restored.
pub fn restore(conn: &Connection, id: i64) -> AdminResult<Contract> {
    let changed = conn.execute(
        "UPDATE contracts SET deleted_at = NULL WHERE id = ?1 AND deleted_at IS NOT NULL",
        params![id],
    )?;
    if changed == 0 {
        return Err(AdminError::not_found("deleted contract", id));
    }
    get(conn, id)
}

/// Removes the row permanently and returns what was removed.
pub fn force_delete(conn: &Connection, id: i64) -> AdminResult<Contract> {
    let contract = get(conn, id)?;
    conn.execute("DELETE FROM contracts WHERE id = ?1", params![id])?;
    Ok(contract)
}

/// Every non-deleted contract of one employee.
pub fn list_for_employee(conn: &Connection, employee_number: i64) -> AdminResult<Vec<Contract>> {
    list(
        conn,
        &ContractFilter {
            employee_number: Some(employee_number),
            ..Default::default()
        },
    )
}

/// Lists contracts matching the filter, newest start date first.
pub fn list(conn: &Connection, filter: &ContractFilter) -> AdminResult<Vec<Contract>> {
    let mut sql = format!("SELECT {} FROM contracts WHERE 1 = 1", COLUMNS);
    let mut params_vec: Vec<Box<dyn rusqlite::ToSql>> = Vec::new();

    if !filter.include_deleted {
        sql.push_str(" AND deleted_at IS NULL");
    }

    if let Some(employee_number) = filter.employee_number {
        sql.push_str(" AND employee_number = ?");
        params_vec.push(Box::new(employee_number));
    }

    if !filter.job_ids.is_empty() {
        let placeholders = vec!["?"; filter.job_ids.len()].join(", ");
        sql.push_str(&format!(" AND employee_job_id IN ({})", placeholders));
        for job_id in &filter.job_ids {
            params_vec.push(Box::new(*job_id));
        }
    }

    for (column, op, bound) in [
        ("start_date", ">=", filter.start_from),
        ("start_date", "<=", filter.start_to),
        ("end_date", ">=", filter.end_from),
        ("end_date", "<=", filter.end_to),
    ] {
        if let Some(date) = bound {
            sql.push_str(&format!(" AND {} {} ?", column, op));
            params_vec.push(Box::new(date));
        }
    }

    sql.push_str(" ORDER BY start_date DESC, id DESC");

    let params_refs: Vec<&dyn rusqlite::ToSql> = params_vec.iter().map(|p| p.as_ref()).collect();
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(params_refs.as_slice(), from_row)?;

    let mut contracts = Vec::new();
    for row in rows {
        let contract = row?;
        if filter.matches_years(&contract) {
            contracts.push(contract);
        }
    }
    Ok(contracts)
}
