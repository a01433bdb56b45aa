//! Moves the leave balance as leaves are recorded, changed and removed.

use tracing::warn;

use crate::calculation::{LeaveDeductionResult, deduct_leave};
use crate::error::AdminResult;
use crate::models::{AuditTrace, EmployeeLeave};
use crate::store::{employees, leaves};

use super::{Observer, ObserverContext};

/// Moves the employee's leave balance as leaves are recorded, edited and
/// removed.
#[derive(Debug, Default, Clone, Copy)]
pub struct EmployeeLeaveObserver;

impl EmployeeLeaveObserver {
    /// Applies `days` taken (negative to credit) to an employee's balance.
    fn apply(
        &self,
        ctx: &ObserverContext<'_>,
        employee_number: i64,
        days: i64,
        trace: &mut AuditTrace,
    ) -> AdminResult<LeaveDeductionResult> {
        let employee = employees::get(ctx.conn, employee_number)?;
        let result = deduct_leave(employee.leave_balance, days, trace.next_step());
        employees::set_leave_balance(ctx.conn, employee_number, result.remaining)?;

        if let Some(warning) = &result.warning {
            warn!(employee_number, remaining = result.remaining, "{}", warning.message);
            trace.warnings.push(warning.clone());
        }
        trace.steps.push(result.audit_step.clone());
        Ok(result)
    }
}

impl Observer<EmployeeLeave> for EmployeeLeaveObserver {
    fn created(&self, ctx: &ObserverContext<'_>, leave: &EmployeeLeave) -> AdminResult<AuditTrace> {
        let mut trace = AuditTrace::default();
        let result = self.apply(ctx, leave.employee_number, leave.duration_in_days(), &mut trace)?;
        leaves::set_remaining(ctx.conn, leave.id, result.remaining)?;
        Ok(trace)
    }

    fn updated(
        &self,
        ctx: &ObserverContext<'_>,
        original: &EmployeeLeave,
        current: &EmployeeLeave,
    ) -> AdminResult<AuditTrace> {
        let mut trace = AuditTrace::default();

        if original.employee_number == current.employee_number {
            let delta = current.duration_in_days() - original.duration_in_days();
            if delta != 0 {
                self.apply(ctx, current.employee_number, delta, &mut trace)?;
                leaves::set_remaining(ctx.conn, current.id, original.remaining_leave_days - delta)?;
            }
        } else {
            self.apply(ctx, original.employee_number, -original.duration_in_days(), &mut trace)?;
            let result =
                self.apply(ctx, current.employee_number, current.duration_in_days(), &mut trace)?;
            leaves::set_remaining(ctx.conn, current.id, result.remaining)?;
        }

        Ok(trace)
    }

    fn deleted(&self, ctx: &ObserverContext<'_>, leave: &EmployeeLeave) -> AdminResult<AuditTrace> {
        let mut trace = AuditTrace::default();
        self.apply(ctx, leave.employee_number, -leave.duration_in_days(), &mut trace)?;
        Ok(trace)
    }
}
