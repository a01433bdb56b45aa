//! Defaults offered when drafting a new contract.
//!
//! Picking the employee on the contract form pre-fills the job title and
//! compensation from the employee's latest contract.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::Contract;

/// Prefilled values for a new contract form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractDefaults {
    /// Job title of the latest contract.
    pub employee_job_id: Option<i64>,
    /// Monthly basic salary.
    pub basic_salary: Option<Decimal>,
    /// Monthly housing allowance.
    pub housing_allowance: Option<Decimal>,
    /// Monthly transportation allowance.
    pub transportation_allowance: Option<Decimal>,
    /// Monthly food allowance.
    pub food_allowance: Option<Decimal>,
}

/// Copies the job and compensation of the latest contract, if any.
pub fn contract_defaults(latest: Option<&Contract>) -> ContractDefaults {
    match latest {
        Some(c) => ContractDefaults {
            employee_job_id: Some(c.employee_job_id),
            basic_salary: Some(c.basic_salary),
            housing_allowance: Some(c.housing_allowance),
            transportation_allowance: Some(c.transportation_allowance),
            food_allowance: Some(c.food_allowance),
        },
        None => ContractDefaults::default(),
    }
}
