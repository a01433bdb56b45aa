//! The HR service: validated, observed writes and composed reads.
//!
//! Every write runs in one transaction. The form is validated first, the
//! repository write and the observer dispatch follow, and the transaction
//! commits only when both succeeded. Callers receive the stored record with
//! the observers' audit trace.

use std::collections::HashSet;
use std::time::Instant;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::calculation::{ContractDefaults, contract_defaults, select_latest_contract};
use crate::config::AdminConfig;
use crate::error::{AdminError, AdminResult};
use crate::models::{
    AuditTrace, Contract, ContractForm, DossierContract, DossierTransfer, Employee,
    EmployeeDossier, EmployeeForm, EmployeeLeave, LeaveForm, ProjectAssignment,
    ProjectAssignmentForm, ReferenceEntry, ReferenceForm, ReferenceKind, Saved,
};
use crate::observers::{
    ContractObserver, EmployeeLeaveObserver, ModelEvent, ObserverContext,
    ProjectAssignmentObserver, dispatch,
};
use crate::report::FileInformationSheet;
use crate::store::{
    ContractFilter, Database, EmployeeFilter, assignments, contracts, employees, leaves,
    references,
};

/// A contract as shown in the contract list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractRow {
    /// The stored contract.
    #[serde(flatten)]
    pub contract: Contract,
    /// "<number> - <full name>".
    pub employee_label: String,
    /// Job title label.
    pub job_title: Option<String>,
    /// Calendar duration, e.g. "1 year, 11 months, 30 days".
    pub duration: String,
}

/// HR operations over one database.
pub struct HrService {
    db: Database,
    config: AdminConfig,
}

impl HrService {
    /// Creates a service over an open database.
    pub fn new(db: Database, config: AdminConfig) -> Self {
        Self { db, config }
    }

    /// A service over a fresh in-memory database.
    pub fn in_memory(config: AdminConfig) -> AdminResult<Self> {
        Ok(Self::new(Database::open_in_memory()?, config))
    }

    /// Returns the loaded configuration.
    pub fn config(&self) -> &AdminConfig {
        &self.config
    }

    /// Returns the underlying database.
    pub fn database(&self) -> &Database {
        &self.db
    }

    /// Runs `operation` in a transaction and commits when it succeeds.
    fn write<T, F>(&mut self, operation: &'static str, f: F) -> AdminResult<Saved<T>>
    where
        F: FnOnce(&ObserverContext<'_>) -> AdminResult<(T, AuditTrace)>,
    {
        let start = Instant::now();
        let tx = self.db.transaction()?;
        let ctx = ObserverContext {
            conn: &tx,
            policy: self.config.policy(),
        };
        let (record, mut audit_trace) = f(&ctx)?;
        tx.commit()?;

        audit_trace.duration_us = start.elapsed().as_micros() as u64;
        info!(
            operation,
            steps = audit_trace.steps.len(),
            warnings = audit_trace.warnings.len(),
            duration_us = audit_trace.duration_us,
            "Write committed"
        );
        Ok(Saved {
            record,
            audit_trace,
        })
    }

    // Employees

    /// Creates an employee.
    pub fn create_employee(&mut self, form: &EmployeeForm) -> AdminResult<Saved<Employee>> {
        let draft = form.validate()?;
        self.write("employee.create", |ctx| {
            Ok((employees::insert(ctx.conn, &draft)?, AuditTrace::default()))
        })
    }

    /// Fetches an employee by number.
    pub fn get_employee(&self, employee_number: i64) -> AdminResult<Employee> {
        employees::get(self.db.connection(), employee_number)
    }

    /// Updates an employee. A changed number carries its owned rows along.
    pub fn update_employee(
        &mut self,
        employee_number: i64,
        form: &EmployeeForm,
    ) -> AdminResult<Saved<Employee>> {
        let draft = form.validate()?;
        self.write("employee.update", |ctx| {
            Ok((
                employees::update(ctx.conn, employee_number, &draft)?,
                AuditTrace::default(),
            ))
        })
    }

    /// Deletes the employee and everything it owns.
    pub fn delete_employee(&mut self, employee_number: i64) -> AdminResult<Saved<Employee>> {
        self.write("employee.delete", |ctx| {
            let employee = employees::get(ctx.conn, employee_number)?;
            employees::delete(ctx.conn, employee_number)?;
            Ok((employee, AuditTrace::default()))
        })
    }

    /// Lists employees matching the filter.
    pub fn list_employees(&self, filter: &EmployeeFilter) -> AdminResult<Vec<Employee>> {
        employees::list(self.db.connection(), filter)
    }

    // Contracts

    /// Creates a contract and accrues leave for it.
    pub fn create_contract(&mut self, form: &ContractForm) -> AdminResult<Saved<Contract>> {
        let draft = form.validate()?;
        self.write("contract.create", |ctx| {
            ensure_employee(ctx, draft.employee_number)?;
            let contract = contracts::insert(ctx.conn, &draft)?;
            let trace = dispatch(&ContractObserver, ctx, ModelEvent::Created(&contract))?;
            Ok((contract, trace))
        })
    }

    /// Returns the contract, including soft-deleted ones.
    pub fn get_contract(&self, id: i64) -> AdminResult<Contract> {
        contracts::get(self.db.connection(), id)
    }

    /// Updates a contract, resyncing every affected employee.
    pub fn update_contract(&mut self, id: i64, form: &ContractForm) -> AdminResult<Saved<Contract>> {
        let draft = form.validate()?;
        self.write("contract.update", |ctx| {
            let original = contracts::get(ctx.conn, id)?;
            ensure_employee(ctx, draft.employee_number)?;
            let current = contracts::update(ctx.conn, id, &draft)?;
            let trace = dispatch(
                &ContractObserver,
                ctx,
                ModelEvent::Updated {
                    original: &original,
                    current: &current,
                },
            )?;
            Ok((current, trace))
        })
    }

    /// Soft-deletes a contract.
    pub fn delete_contract(&mut self, id: i64) -> AdminResult<Saved<Contract>> {
        self.write("contract.delete", |ctx| {
            let contract = contracts::soft_delete(ctx.conn, id)?;
            let trace = dispatch(&ContractObserver, ctx, ModelEvent::Deleted(&contract))?;
            Ok((contract, trace))
        })
    }

    /// Soft-deletes several contracts at once. Any unknown id aborts the
    /// whole batch. Repeated ids are deleted once.
    pub fn delete_contracts(&mut self, ids: &[i64]) -> AdminResult<Saved<Vec<Contract>>> {
        let mut seen = HashSet::with_capacity(ids.len());
        let unique: Vec<i64> = ids.iter().copied().filter(|id| seen.insert(*id)).collect();

        self.write("contract.bulk_delete", |ctx| {
            let mut trace = AuditTrace::default();
            let mut deleted = Vec::with_capacity(unique.len());
            for &id in &unique {
                let contract = contracts::soft_delete(ctx.conn, id)?;
                trace.absorb(dispatch(&ContractObserver, ctx, ModelEvent::Deleted(&contract))?);
                deleted.push(contract);
            }
            Ok((deleted, trace))
        })
    }

    /// Restores a soft-deleted contract.
    pub fn restore_contract(&mut self, id: i64) -> AdminResult<Saved<Contract>> {
        self.write("contract.restore", |ctx| {
            let contract = contracts::restore(ctx.conn, id)?;
            let trace = dispatch(&ContractObserver, ctx, ModelEvent::Restored(&contract))?;
            Ok((contract, trace))
        })
    }

    /// Permanently deletes a contract.
    pub fn force_delete_contract(&mut self, id: i64) -> AdminResult<Saved<Contract>> {
        self.write("contract.force_delete", |ctx| {
            let contract = contracts::force_delete(ctx.conn, id)?;
            let trace = dispatch(&ContractObserver, ctx, ModelEvent::ForceDeleted(&contract))?;
            Ok((contract, trace))
        })
    }

    /// Lists contracts as display rows.
    pub fn list_contracts(&self, filter: &ContractFilter) -> AdminResult<Vec<ContractRow>> {
        let conn = self.db.connection();
        contracts::list(conn, filter)?
            .into_iter()
            .map(|contract| -> AdminResult<ContractRow> {
                let employee_label = match employees::find(conn, contract.employee_number)? {
                    Some(employee) => employee.label(),
                    None => contract.employee_number.to_string(),
                };
                let job_title =
                    references::label_of(conn, ReferenceKind::EmployeeJob, Some(contract.employee_job_id))?;
                let duration = contract.duration_string();
                Ok(ContractRow {
                    contract,
                    employee_label,
                    job_title,
                    duration,
                })
            })
            .collect()
    }

    /// Values a new contract form starts from once the employee is picked.
    pub fn contract_defaults(&self, employee_number: i64) -> AdminResult<ContractDefaults> {
        let conn = self.db.connection();
        employees::get(conn, employee_number)?;
        let existing = contracts::list_for_employee(conn, employee_number)?;
        Ok(contract_defaults(select_latest_contract(&existing)))
    }

    // Project assignments

    /// Records a transfer. Without an explicit origin, the employee's
    /// current project is used.
    pub fn create_assignment(
        &mut self,
        form: &ProjectAssignmentForm,
    ) -> AdminResult<Saved<ProjectAssignment>> {
        let mut draft = form.validate()?;
        self.write("project_assignment.create", |ctx| {
            let employee = ensure_employee(ctx, draft.employee_number)?;
            if draft.from_project_id.is_none() {
                draft.from_project_id = employee.project_id;
            }
            let assignment = assignments::insert(ctx.conn, &draft)?;
            let trace = dispatch(&ProjectAssignmentObserver, ctx, ModelEvent::Created(&assignment))?;
            Ok((assignment, trace))
        })
    }

    /// Fetches a transfer by id.
    pub fn get_assignment(&self, id: i64) -> AdminResult<ProjectAssignment> {
        assignments::get(self.db.connection(), id)
    }

    /// Updates a transfer.
    pub fn update_assignment(
        &mut self,
        id: i64,
        form: &ProjectAssignmentForm,
    ) -> AdminResult<Saved<ProjectAssignment>> {
        let draft = form.validate()?;
        self.write("project_assignment.update", |ctx| {
            let original = assignments::get(ctx.conn, id)?;
            ensure_employee(ctx, draft.employee_number)?;
            let current = assignments::update(ctx.conn, id, &draft)?;
            let trace = dispatch(
                &ProjectAssignmentObserver,
                ctx,
                ModelEvent::Updated {
                    original: &original,
                    current: &current,
                },
            )?;
            Ok((current, trace))
        })
    }

    /// Deletes a transfer.
    pub fn delete_assignment(&mut self, id: i64) -> AdminResult<Saved<ProjectAssignment>> {
        self.write("project_assignment.delete", |ctx| {
            let assignment = assignments::delete(ctx.conn, id)?;
            let trace = dispatch(&ProjectAssignmentObserver, ctx, ModelEvent::Deleted(&assignment))?;
            Ok((assignment, trace))
        })
    }

    /// Lists transfers, optionally for one employee.
    pub fn list_assignments(&self, employee_number: Option<i64>) -> AdminResult<Vec<ProjectAssignment>> {
        assignments::list(self.db.connection(), employee_number)
    }

    // Leaves

    /// Records a leave and deducts it from the balance.
    pub fn create_leave(&mut self, form: &LeaveForm) -> AdminResult<Saved<EmployeeLeave>> {
        let draft = form.validate()?;
        self.write("leave.create", |ctx| {
            ensure_employee(ctx, draft.employee_number)?;
            let leave = leaves::insert(ctx.conn, &draft)?;
            let trace = dispatch(&EmployeeLeaveObserver, ctx, ModelEvent::Created(&leave))?;
            Ok((leaves::get(ctx.conn, leave.id)?, trace))
        })
    }

    /// Fetches a leave by id.
    pub fn get_leave(&self, id: i64) -> AdminResult<EmployeeLeave> {
        leaves::get(self.db.connection(), id)
    }

    /// Updates a leave, adjusting the balance by the change in duration.
    pub fn update_leave(&mut self, id: i64, form: &LeaveForm) -> AdminResult<Saved<EmployeeLeave>> {
        let draft = form.validate()?;
        self.write("leave.update", |ctx| {
            let original = leaves::get(ctx.conn, id)?;
            ensure_employee(ctx, draft.employee_number)?;
            let current = leaves::update(ctx.conn, id, &draft)?;
            let trace = dispatch(
                &EmployeeLeaveObserver,
                ctx,
                ModelEvent::Updated {
                    original: &original,
                    current: &current,
                },
            )?;
            Ok((leaves::get(ctx.conn, id)?, trace))
        })
    }

    /// Deletes a leave and credits it back.
    pub fn delete_leave(&mut self, id: i64) -> AdminResult<Saved<EmployeeLeave>> {
        self.write("leave.delete", |ctx| {
            let leave = leaves::delete(ctx.conn, id)?;
            let trace = dispatch(&EmployeeLeaveObserver, ctx, ModelEvent::Deleted(&leave))?;
            Ok((leave, trace))
        })
    }

    /// Lists leaves, optionally for one employee.
    pub fn list_leaves(&self, employee_number: Option<i64>) -> AdminResult<Vec<EmployeeLeave>> {
        leaves::list(self.db.connection(), employee_number)
    }

    // Reference tables

    /// Adds a row to a reference table.
    pub fn create_reference(
        &mut self,
        kind: ReferenceKind,
        form: &ReferenceForm,
    ) -> AdminResult<Saved<ReferenceEntry>> {
        let label = form.validate()?;
        self.write("reference.create", |ctx| {
            Ok((references::insert(ctx.conn, kind, &label)?, AuditTrace::default()))
        })
    }

    /// Lists a reference table.
    pub fn list_references(&self, kind: ReferenceKind) -> AdminResult<Vec<ReferenceEntry>> {
        references::list(self.db.connection(), kind)
    }

    /// Deletes an unreferenced row from a reference table.
    pub fn delete_reference(&mut self, kind: ReferenceKind, id: i64) -> AdminResult<Saved<ReferenceEntry>> {
        self.write("reference.delete", |ctx| {
            let entry = references::get(ctx.conn, kind, id)?;
            references::delete(ctx.conn, kind, id)?;
            Ok((entry, AuditTrace::default()))
        })
    }

    // Reports

    /// Loads an employee with every relation the file information sheet
    /// shows.
    pub fn employee_dossier(&self, employee_number: i64) -> AdminResult<EmployeeDossier> {
        let conn = self.db.connection();
        let employee = employees::get(conn, employee_number)?;

        let contracts = contracts::list_for_employee(conn, employee_number)?
            .into_iter()
            .map(|contract| -> AdminResult<DossierContract> {
                let job_title = references::label_of(
                    conn,
                    ReferenceKind::EmployeeJob,
                    Some(contract.employee_job_id),
                )?;
                Ok(DossierContract { contract, job_title })
            })
            .collect::<AdminResult<Vec<_>>>()?;

        let transfers = assignments::list(conn, Some(employee_number))?
            .into_iter()
            .map(|assignment| -> AdminResult<DossierTransfer> {
                let from_project =
                    references::label_of(conn, ReferenceKind::Project, assignment.from_project_id)?;
                let to_project =
                    references::label_of(conn, ReferenceKind::Project, Some(assignment.project_id))?;
                Ok(DossierTransfer {
                    assignment,
                    from_project,
                    to_project,
                })
            })
            .collect::<AdminResult<Vec<_>>>()?;

        Ok(EmployeeDossier {
            country: references::label_of(conn, ReferenceKind::Country, Some(employee.country_id))?,
            insurance_class: references::label_of(
                conn,
                ReferenceKind::InsuranceClass,
                Some(employee.insurance_class_id),
            )?,
            education_level: references::label_of(
                conn,
                ReferenceKind::EducationLevel,
                Some(employee.education_level_id),
            )?,
            degree: references::label_of(conn, ReferenceKind::Degree, employee.degree_id)?,
            job_title: references::label_of(conn, ReferenceKind::EmployeeJob, employee.employee_job_id)?,
            project: references::label_of(conn, ReferenceKind::Project, employee.project_id)?,
            contracts,
            transfers,
            leaves: leaves::list(conn, Some(employee_number))?,
            employee,
        })
    }

    /// Builds the file information sheet of an employee as printed on
    /// `today`.
    pub fn file_information_sheet(
        &self,
        employee_number: i64,
        today: NaiveDate,
    ) -> AdminResult<FileInformationSheet> {
        let dossier = self.employee_dossier(employee_number)?;
        Ok(FileInformationSheet::build(
            &dossier,
            self.config.company(),
            self.config.policy(),
            today,
        ))
    }
}

/// Loads the employee a form points at, reporting an unknown number as a
/// field error.
fn ensure_employee(ctx: &ObserverContext<'_>, employee_number: i64) -> AdminResult<Employee> {
    employees::find(ctx.conn, employee_number)?
        .ok_or_else(|| AdminError::invalid("employee_number", "does not match any employee"))
}
