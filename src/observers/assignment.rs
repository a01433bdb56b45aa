//! Keeps the cached current project in step with transfers.

use crate::calculation::{current_project_audit_step, select_latest_assignment};
use crate::error::AdminResult;
use crate::models::{AuditTrace, ProjectAssignment};
use crate::store::{assignments, employees};

use super::{Observer, ObserverContext, affected_employees};

/// Keeps the employee's current project on its latest transfer.
#[derive(Debug, Default, Clone, Copy)]
pub struct ProjectAssignmentObserver;

impl ProjectAssignmentObserver {
    fn sync_employee(
        &self,
        ctx: &ObserverContext<'_>,
        employee_number: i64,
        trace: &mut AuditTrace,
    ) -> AdminResult<()> {
        let history = assignments::list(ctx.conn, Some(employee_number))?;
        let latest = select_latest_assignment(&history);
        employees::set_project(ctx.conn, employee_number, latest.map(|a| a.project_id))?;
        let step_number = trace.next_step();
        trace
            .steps
            .push(current_project_audit_step(employee_number, latest, step_number));
        Ok(())
    }
}

impl Observer<ProjectAssignment> for ProjectAssignmentObserver {
    fn created(
        &self,
        ctx: &ObserverContext<'_>,
        assignment: &ProjectAssignment,
    ) -> AdminResult<AuditTrace> {
        let mut trace = AuditTrace::default();
        self.sync_employee(ctx, assignment.employee_number, &mut trace)?;
        Ok(trace)
    }

    fn updated(
        &self,
        ctx: &ObserverContext<'_>,
        original: &ProjectAssignment,
        current: &ProjectAssignment,
    ) -> AdminResult<AuditTrace> {
        let mut trace = AuditTrace::default();
        for employee_number in affected_employees(original.employee_number, current.employee_number) {
            self.sync_employee(ctx, employee_number, &mut trace)?;
        }
        Ok(trace)
    }

    fn deleted(
        &self,
        ctx: &ObserverContext<'_>,
        assignment: &ProjectAssignment,
    ) -> AdminResult<AuditTrace> {
        let mut trace = AuditTrace::default();
        self.sync_employee(ctx, assignment.employee_number, &mut trace)?;
        Ok(trace)
    }
}
