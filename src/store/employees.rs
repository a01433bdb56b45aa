//! Employee repository.

use chrono::Utc;
use rusqlite::{Connection, Row, params};

use crate::calculation::CurrentContractFields;
use crate::error::{AdminError, AdminResult};
use crate::models::{Employee, EmployeeDraft};

use super::optional;

const COLUMNS: &str = "employee_number, full_name, country_id, photo_link, email, mobile_number,
    iqama_number, iqama_expiration_hijri, iqama_expiration_gregorian, passport_number,
    passport_expiration, company_start_date, birthdate, insurance_class_id, education_level_id,
    degree_id, iban_number, employee_job_id, electronic_contract_start_date,
    electronic_contract_end_date, paper_contract_end_date, project_id, leave_balance,
    created_at, updated_at";

/// Filter for the employee list.
#[derive(Debug, Clone, Default)]
pub struct EmployeeFilter {
    /// Matches the full name or the employee number.
    pub search: Option<String>,
    /// Only employees on this project.
    pub project_id: Option<i64>,
}

fn from_row(row: &Row<'_>) -> rusqlite::Result<Employee> {
    Ok(Employee {
        employee_number: row.get("employee_number")?,
        full_name: row.get("full_name")?,
        country_id: row.get("country_id")?,
        photo_link: row.get("photo_link")?,
        email: row.get("email")?,
        mobile_number: row.get("mobile_number")?,
        iqama_number: row.get("iqama_number")?,
        iqama_expiration_hijri: row.get("iqama_expiration_hijri")?,
        iqama_expiration_gregorian: row.get("iqama_expiration_gregorian")?,
        passport_number: row.get("passport_number")?,
        passport_expiration: row.get("passport_expiration")?,
        company_start_date: row.get("company_start_date")?,
        birthdate: row.get("birthdate")?,
        insurance_class_id: row.get("insurance_class_id")?,
        education_level_id: row.get("education_level_id")?,
        degree_id: row.get("degree_id")?,
        iban_number: row.get("iban_number")?,
        employee_job_id: row.get("employee_job_id")?,
        electronic_contract_start_date: row.get("electronic_contract_start_date")?,
        electronic_contract_end_date: row.get("electronic_contract_end_date")?,
        paper_contract_end_date: row.get("paper_contract_end_date")?,
        project_id: row.get("project_id")?,
        leave_balance: row.get("leave_balance")?,
        created_at: row.get("created_at")?,
        updated_at: row.get("updated_at")?,
    })
}

/// Inserts a new employee with empty current fields and a zero balance.
pub fn insert(conn: &Connection, draft: &EmployeeDraft) -> AdminResult<Employee> {
    let now = Utc::now();
    conn.execute(
        "INSERT INTO employees (employee_number, full_name, country_id, photo_link, email,
            mobile_number, iqama_number, iqama_expiration_hijri, iqama_expiration_gregorian,
            passport_number, passport_expiration, company_start_date, birthdate,
            insurance_class_id, education_level_id, degree_id, iban_number,
            created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16, ?17, ?18, ?18)",
        params![
            draft.employee_number,
            draft.full_name,
            draft.country_id,
            draft.photo_link,
            draft.email,
            draft.mobile_number,
            draft.iqama_number,
            draft.iqama_expiration_hijri,
            draft.iqama_expiration_gregorian,
            draft.passport_number,
            draft.passport_expiration,
            draft.company_start_date,
            draft.birthdate,
            draft.insurance_class_id,
            draft.education_level_id,
            draft.degree_id,
            draft.iban_number,
            now,
        ],
    )?;
    get(conn, draft.employee_number)
}

/// Returns the employee, or `None` when the number is unknown.
pub fn find(conn: &Connection, employee_number: i64) -> AdminResult<Option<Employee>> {
    let sql = format!("SELECT {} FROM employees WHERE employee_number = ?1", COLUMNS);
    Ok(optional(conn.query_row(&sql, params![employee_number], from_row))?)
}

/// Returns the employee or a not-found error.
pub fn get(conn: &Connection, employee_number: i64) -> AdminResult<Employee> {
    find(conn, employee_number)?.ok_or_else(|| AdminError::not_found("employee", employee_number))
}

/// Overwrites the profile fields. The number itself may change; owned rows
/// follow through `ON UPDATE CASCADE`.
pub fn update(conn: &Connection, employee_number: i64, draft: &EmployeeDraft) -> AdminResult<Employee> {
    let changed = conn.execute(
        "UPDATE employees SET employee_number = ?1, full_name = ?2, country_id = ?3,
            photo_link = ?4, email = ?5, mobile_number = ?6, iqama_number = ?7,
            iqama_expiration_hijri = ?8, iqama_expiration_gregorian = ?9,
            passport_number = ?10, passport_expiration = ?11, company_start_date = ?12,
            birthdate = ?13, insurance_class_id = ?14, education_level_id = ?15,
            degree_id = ?16, iban_number = ?17, updated_at = ?18
         WHERE employee_number = ?19",
        params![
            draft.employee_number,
            draft.full_name,
            draft.country_id,
            draft.photo_link,
            draft.email,
            draft.mobile_number,
            draft.iqama_number,
            draft.iqama_expiration_hijri,
            draft.iqama_expiration_gregorian,
            draft.passport_number,
            draft.passport_expiration,
            draft.company_start_date,
            draft.birthdate,
            draft.insurance_class_id,
            draft.education_level_id,
            draft.degree_id,
            draft.iban_number,
            Utc::now(),
            employee_number,
        ],
    )?;
    if changed == 0 {
        return Err(AdminError::not_found("employee", employee_number));
    }
    get(conn, draft.employee_number)
}

/// Deletes the employee together with its contracts, transfers and leaves.
pub fn delete(conn: &Connection, employee_number: i64) -> AdminResult<()> {
    let changed = conn.execute(
        "DELETE FROM employees WHERE employee_number = ?1",
        params![employee_number],
    )?;
    if changed == 0 {
        return Err(AdminError::not_found("employee", employee_number));
    }
    Ok(())
}

/// Escapes the `LIKE` wildcards so the search matches them literally.
fn escape_like(search: &str) -> String {
    let mut escaped = String::with_capacity(search.len());
    for c in search.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// Lists employees ordered by number.
pub fn list(conn: &Connection, filter: &EmployeeFilter) -> AdminResult<Vec<Employee>> {
    let mut sql = format!("SELECT {} FROM employees WHERE 1 = 1", COLUMNS);
    let mut params_vec: Vec<Box<dyn rusqlite::ToSql>> = Vec::new();

    if let Some(search) = filter.search.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
        sql.push_str(
            " AND (full_name LIKE ? ESCAPE '\\' OR CAST(employee_number AS TEXT) LIKE ? ESCAPE '\\')",
        );
        let pattern = format!("%{}%", escape_like(search));
        params_vec.push(Box::new(pattern.clone()));
        params_vec.push(Box::new(pattern));
    }

    if let Some(project_id) = filter.project_id {
        sql.push_str(" AND project_id = ?");
        params_vec.push(Box::new(project_id));
    }

    sql.push_str(" ORDER BY employee_number");

    let params_refs: Vec<&dyn rusqlite::ToSql> = params_vec.iter().map(|p| p.as_ref()).collect();
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(params_refs.as_slice(), from_row)?;
    Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
}

/// Writes the fields mirrored from the latest contract.
pub fn set_current_contract(
    conn: &Connection,
    employee_number: i64,
    fields: &CurrentContractFields,
) -> AdminResult<()> {
    conn.execute(
        "UPDATE employees SET employee_job_id = ?1, electronic_contract_start_date = ?2,
            electronic_contract_end_date = ?3, paper_contract_end_date = ?4, updated_at = ?5
         WHERE employee_number = ?6",
        params![
            fields.employee_job_id,
            fields.electronic_contract_start_date,
            fields.electronic_contract_end_date,
            fields.paper_contract_end_date,
            Utc::now(),
            employee_number,
        ],
    )?;
    Ok(())
}

/// Writes the current project.
pub fn set_project(conn: &Connection, employee_number: i64, project_id: Option<i64>) -> AdminResult<()> {
    conn.execute(
        "UPDATE employees SET project_id = ?1, updated_at = ?2 WHERE employee_number = ?3",
        params![project_id, Utc::now(), employee_number],
    )?;
    Ok(())
}

/// Writes the leave balance.
pub fn set_leave_balance(conn: &Connection, employee_number: i64, balance: i64) -> AdminResult<()> {
    conn.execute(
        "UPDATE employees SET leave_balance = ?1, updated_at = ?2 WHERE employee_number = ?3",
        params![balance, Utc::now(), employee_number],
    )?;
    Ok(())
}
