//! Calculation logic for the HR administration backend.
//!
//! This module contains the pure rules the observers and the report rely
//! on: calendar duration arithmetic and formatting, selection of the
//! current contract and project, contract form defaults, leave accrual on
//! new contracts and leave deduction.

mod contract_defaults;
mod current_contract;
mod current_project;
mod duration;
mod leave_accrual;
mod leave_deduction;

pub use contract_defaults::{ContractDefaults, contract_defaults};
pub use current_contract::{
    CurrentContractFields, current_contract_audit_step, current_contract_fields,
    select_latest_contract,
};
pub use current_project::{current_project_audit_step, select_latest_assignment};
pub use duration::{
    CalendarSpan, calendar_diff, format_days, format_duration, inclusive_days, pluralize,
};
pub use leave_accrual::{LeaveAccrualResult, contract_duration_in_years, leave_accrual};
pub use leave_deduction::{LeaveDeductionResult, deduct_leave};
