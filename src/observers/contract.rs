//! Keeps the cached current contract in step with contracts and accrues
//! leave for new ones.

use tracing::debug;

use crate::calculation::{
    current_contract_audit_step, current_contract_fields, leave_accrual, select_latest_contract,
};
use crate::error::AdminResult;
use crate::models::{AuditTrace, Contract};
use crate::store::{contracts, employees};

use super::{Observer, ObserverContext, affected_employees};

/// Keeps the employee's current job and contract dates on its latest
/// contract, and grants leave for new contracts.
#[derive(Debug, Default, Clone, Copy)]
pub struct ContractObserver;

impl ContractObserver {
    /// Recomputes the cached contract fields of one employee.
    fn sync_employee(
        &self,
        ctx: &ObserverContext<'_>,
        employee_number: i64,
        trace: &mut AuditTrace,
    ) -> AdminResult<()> {
        let remaining = contracts::list_for_employee(ctx.conn, employee_number)?;
        let latest = select_latest_contract(&remaining);
        let fields = current_contract_fields(latest);

        employees::set_current_contract(ctx.conn, employee_number, &fields)?;
        debug!(
            employee_number,
            latest_contract_id = latest.map(|c| c.id),
            "Synced current contract"
        );

        let step_number = trace.next_step();
        trace.steps.push(current_contract_audit_step(
            employee_number,
            latest,
            &fields,
            step_number,
        ));
        Ok(())
    }

    fn sync_only(&self, ctx: &ObserverContext<'_>, contract: &Contract) -> AdminResult<AuditTrace> {
        let mut trace = AuditTrace::default();
        self.sync_employee(ctx, contract.employee_number, &mut trace)?;
        Ok(trace)
    }
}

impl Observer<Contract> for ContractObserver {
    fn created(&self, ctx: &ObserverContext<'_>, contract: &Contract) -> AdminResult<AuditTrace> {
        let mut trace = AuditTrace::default();
        self.sync_employee(ctx, contract.employee_number, &mut trace)?;

        let accrual = leave_accrual(
            contract.start_date,
            contract.end_date,
            &ctx.policy.leave,
            trace.next_step(),
        );
        let employee = employees::get(ctx.conn, contract.employee_number)?;
        employees::set_leave_balance(
            ctx.conn,
            contract.employee_number,
            employee.leave_balance + accrual.accrued,
        )?;
        trace.steps.push(accrual.audit_step);

        Ok(trace)
    }

    fn updated(
        &self,
        ctx: &ObserverContext<'_>,
        original: &Contract,
        current: &Contract,
    ) -> AdminResult<AuditTrace> {
        let mut trace = AuditTrace::default();
        for employee_number in affected_employees(original.employee_number, current.employee_number) {
            self.sync_employee(ctx, employee_number, &mut trace)?;
        }
        Ok(trace)
    }

    fn deleted(&self, ctx: &ObserverContext<'_>, contract: &Contract) -> AdminResult<AuditTrace> {
        self.sync_only(ctx, contract)
    }

    fn restored(&self, ctx: &ObserverContext<'_>, contract: &Contract) -> AdminResult<AuditTrace> {
        self.sync_only(ctx, contract)
    }

    fn force_deleted(&self, ctx: &ObserverContext<'_>, contract: &Contract) -> AdminResult<AuditTrace> {
        self.sync_only(ctx, contract)
    }
}
