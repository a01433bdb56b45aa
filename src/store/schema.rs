//! Versioned schema migrations.

use rusqlite::{Connection, params};
use tracing::info;

use crate::error::AdminResult;

/// Latest schema version known to this build.
pub const SCHEMA_VERSION: i64 = 2;

/// Migrations in order; entry `n` brings the schema to version `n + 1`.
const MIGRATIONS: &[&str] = &[
    // 1: reference tables and employees
    r#"
    CREATE TABLE countries (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL
    );
    CREATE TABLE insurance_classes (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL
    );
    CREATE TABLE education_levels (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        level TEXT NOT NULL
    );
    CREATE TABLE degrees (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        degree TEXT NOT NULL
    );
    CREATE TABLE projects (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        project_name TEXT NOT NULL
    );
    CREATE TABLE employee_jobs (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        job_title TEXT NOT NULL
    );

    CREATE TABLE employees (
        employee_number INTEGER PRIMARY KEY,
        full_name TEXT NOT NULL,
        country_id INTEGER NOT NULL REFERENCES countries(id),
        photo_link TEXT,
        email TEXT,
        mobile_number TEXT,
        iqama_number TEXT NOT NULL,
        iqama_expiration_hijri TEXT NOT NULL,
        iqama_expiration_gregorian TEXT NOT NULL,
        passport_number TEXT NOT NULL,
        passport_expiration TEXT NOT NULL,
        company_start_date TEXT NOT NULL,
        birthdate TEXT NOT NULL,
        insurance_class_id INTEGER NOT NULL REFERENCES insurance_classes(id),
        education_level_id INTEGER NOT NULL REFERENCES education_levels(id),
        degree_id INTEGER REFERENCES degrees(id),
        iban_number TEXT NOT NULL,
        employee_job_id INTEGER REFERENCES employee_jobs(id),
        electronic_contract_start_date TEXT,
        electronic_contract_end_date TEXT,
        paper_contract_end_date TEXT,
        project_id INTEGER REFERENCES projects(id),
        leave_balance INTEGER NOT NULL DEFAULT 0,
        created_at TEXT NOT NULL,
        updated_at TEXT NOT NULL
    );
    CREATE INDEX idx_employees_full_name ON employees(full_name);
    "#,
    // 2: employee-owned history
    r#"
    CREATE TABLE contracts (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        employee_number INTEGER NOT NULL
            REFERENCES employees(employee_number) ON DELETE CASCADE ON UPDATE CASCADE,
        employee_job_id INTEGER NOT NULL REFERENCES employee_jobs(id),
        start_date TEXT NOT NULL,
        end_date TEXT NOT NULL,
        paper_contract_end_date TEXT,
        basic_salary TEXT NOT NULL,
        housing_allowance TEXT NOT NULL,
        transportation_allowance TEXT NOT NULL,
        food_allowance TEXT NOT NULL,
        remarks TEXT,
        file_link TEXT,
        deleted_at TEXT,
        created_at TEXT NOT NULL,
        updated_at TEXT NOT NULL
    );
    CREATE INDEX idx_contracts_employee ON contracts(employee_number);
    CREATE INDEX idx_contracts_end_date ON contracts(end_date);

    CREATE TABLE project_assignments (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        employee_number INTEGER NOT NULL
            REFERENCES employees(employee_number) ON DELETE CASCADE ON UPDATE CASCADE,
        from_project_id INTEGER REFERENCES projects(id),
        project_id INTEGER NOT NULL REFERENCES projects(id),
        transfer_date TEXT NOT NULL,
        remarks TEXT,
        created_at TEXT NOT NULL,
        updated_at TEXT NOT NULL
    );
    CREATE INDEX idx_assignments_employee ON project_assignments(employee_number);

    CREATE TABLE employee_leaves (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        employee_number INTEGER NOT NULL
            REFERENCES employees(employee_number) ON DELETE CASCADE ON UPDATE CASCADE,
        start_date TEXT NOT NULL,
        end_date TEXT NOT NULL,
        visa_expiration TEXT NOT NULL,
        remaining_leave_days INTEGER NOT NULL DEFAULT 0,
        remarks TEXT,
        created_at TEXT NOT NULL,
        updated_at TEXT NOT NULL
    );
    CREATE INDEX idx_leaves_employee ON employee_leaves(employee_number);
    "#,
];

/// Returns the applied schema version (0 for a fresh database).
pub(super) fn current_version(conn: &Connection) -> AdminResult<i64> {
    conn.execute_batch("CREATE TABLE IF NOT EXISTS schema_version (version INTEGER PRIMARY KEY);")?;
    let version: Option<i64> =
        conn.query_row("SELECT MAX(version) FROM schema_version", [], |row| row.get(0))?;
    Ok(version.unwrap_or(0))
}

/// Applies every migration newer than the current version, each in its
/// own transaction.
pub(super) fn migrate(conn: &mut Connection) -> AdminResult<()> {
    let current = current_version(conn)?;

    for (index, sql) in MIGRATIONS.iter().enumerate() {
        let version = index as i64 + 1;
        if version <= current {
            continue;
        }

        let tx = conn.transaction()?;
        tx.execute_batch(sql)?;
        tx.execute(
            "INSERT INTO schema_version (version) VALUES (?1)",
            params![version],
        )?;
        tx.commit()?;
        info!(version, "Applied schema migration");
    }

    Ok(())
}
