//! Selection of an employee's current contract and the fields cached from it.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::{AuditStep, Contract};

/// Employee columns mirrored from the latest contract.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentContractFields {
    /// Job title of the latest contract.
    pub employee_job_id: Option<i64>,
    /// Start date of the latest contract.
    pub electronic_contract_start_date: Option<NaiveDate>,
    /// End date of the latest contract.
    pub electronic_contract_end_date: Option<NaiveDate>,
    /// Paper contract end date of the latest contract.
    pub paper_contract_end_date: Option<NaiveDate>,
}

/// Returns the latest non-deleted contract by end date.
///
/// Contracts sharing the latest end date are resolved in favour of the most
/// recently inserted one (highest id).
pub fn select_latest_contract<'a, I>(contracts: I) -> Option<&'a Contract>
where
    I: IntoIterator<Item = &'a Contract>,
{
    contracts
        .into_iter()
        .filter(|c| !c.is_deleted())
        .max_by_key(|c| (c.end_date, c.id))
}

/// Builds the cached fields for the given latest contract (all `None`
/// when the employee has no contract left).
pub fn current_contract_fields(latest: Option<&Contract>) -> CurrentContractFields {
    match latest {
        Some(c) => CurrentContractFields {
            employee_job_id: Some(c.employee_job_id),
            electronic_contract_start_date: Some(c.start_date),
            electronic_contract_end_date: Some(c.end_date),
            paper_contract_end_date: c.paper_contract_end_date,
        },
        None => CurrentContractFields::default(),
    }
}

/// Audit step describing a recomputation of the cached contract fields.
pub fn current_contract_audit_step(
    employee_number: i64,
    latest: Option<&Contract>,
    fields: &CurrentContractFields,
    step_number: u32,
) -> AuditStep {
    let reasoning = match latest {
        Some(c) => format!(
            "Contract #{} ends latest ({}); employee {} now mirrors it",
            c.id, c.end_date, employee_number
        ),
        None => format!(
            "Employee {} has no remaining contract; current fields cleared",
            employee_number
        ),
    };

    AuditStep {
        step_number,
        rule_id: "current_contract_sync".to_string(),
        rule_name: "Current Contract Sync".to_string(),
        input: serde_json::json!({
            "employee_number": employee_number,
            "latest_contract_id": latest.map(|c| c.id),
        }),
        output: serde_json::to_value(fields).unwrap_or(serde_json::Value::Null),
        reasoning,
    }
}
