//! Contract model and its form.
//!
//! A contract is a fixed-term employment record for one employee: a job
//! title, electronic start/end dates, an optional paper contract end date
//! and four compensation fields in SAR.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculation::{CalendarSpan, calendar_diff, format_duration};
use crate::error::AdminResult;

use super::form::Validator;

/// Represents a stored contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contract {
    /// Row id.
    pub id: i64,
    /// Owning employee.
    pub employee_number: i64,
    /// Job title held under this contract.
    pub employee_job_id: i64,
    /// Electronic contract start date.
    pub start_date: NaiveDate,
    /// Electronic contract end date.
    pub end_date: NaiveDate,
    /// End date written on the paper contract.
    pub paper_contract_end_date: Option<NaiveDate>,
    /// Monthly basic salary.
    pub basic_salary: Decimal,
    /// Monthly housing allowance.
    pub housing_allowance: Decimal,
    /// Monthly transportation allowance.
    pub transportation_allowance: Decimal,
    /// Monthly food allowance.
    pub food_allowance: Decimal,
    /// Free-text notes.
    pub remarks: Option<String>,
    /// Link to the scanned contract.
    pub file_link: Option<String>,
    /// Set when the contract is soft-deleted.
    pub deleted_at: Option<DateTime<Utc>>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Contract {
    /// Returns true if the contract has been soft-deleted.
    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }

    /// Calendar span between the start and end dates.
    pub fn duration(&self) -> CalendarSpan {
        calendar_diff(self.start_date, self.end_date)
    }

    /// Duration rendered for display, e.g. "1 year, 11 months, 30 days".
    pub fn duration_string(&self) -> String {
        format_duration(self.duration())
    }
}

/// Submitted contract form.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContractForm {
    /// Owning employee.
    #[serde(default)]
    pub employee_number: Option<i64>,
    /// Job title held under this contract.
    #[serde(default)]
    pub employee_job_id: Option<i64>,
    /// Electronic contract start date.
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    /// Electronic contract end date.
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    /// End date written on the paper contract.
    #[serde(default)]
    pub paper_contract_end_date: Option<NaiveDate>,
    /// Monthly basic salary.
    #[serde(default)]
    pub basic_salary: Option<Decimal>,
    /// Monthly housing allowance.
    #[serde(default)]
    pub housing_allowance: Option<Decimal>,
    /// Monthly transportation allowance.
    #[serde(default)]
    pub transportation_allowance: Option<Decimal>,
    /// Monthly food allowance.
    #[serde(default)]
    pub food_allowance: Option<Decimal>,
    /// Free-text notes.
    #[serde(default)]
    pub remarks: Option<String>,
    /// Link to the scanned contract.
    #[serde(default)]
    pub file_link: Option<String>,
}

/// A validated contract, ready to be written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContractDraft {
    /// Owning employee.
    pub employee_number: i64,
    /// Job title held under this contract.
    pub employee_job_id: i64,
    /// Electronic contract start date.
    pub start_date: NaiveDate,
    /// Electronic contract end date.
    pub end_date: NaiveDate,
    /// End date written on the paper contract.
    pub paper_contract_end_date: Option<NaiveDate>,
    /// Monthly basic salary.
    pub basic_salary: Decimal,
    /// Monthly housing allowance.
    pub housing_allowance: Decimal,
    /// Monthly transportation allowance.
    pub transportation_allowance: Decimal,
    /// Monthly food allowance.
    pub food_allowance: Decimal,
    /// Free-text notes.
    pub remarks: Option<String>,
    /// Link to the scanned contract.
    pub file_link: Option<String>,
}

impl ContractForm {
    /// Validates the form, reporting every violation at once.
    pub fn validate(&self) -> AdminResult<ContractDraft> {
        let mut v = Validator::new();

        let employee_number = v.positive_key("employee_number", &self.employee_number);
        let employee_job_id = v.required("employee_job_id", &self.employee_job_id);
        let start_date = v.required("start_date", &self.start_date);
        let end_date = v.required("end_date", &self.end_date);
        v.date_order("end_date", self.start_date, self.end_date);
        let basic_salary = v.non_negative_amount("basic_salary", &self.basic_salary);
        let housing_allowance = v.non_negative_amount("housing_allowance", &self.housing_allowance);
        let transportation_allowance =
            v.non_negative_amount("transportation_allowance", &self.transportation_allowance);
        let food_allowance = v.non_negative_amount("food_allowance", &self.food_allowance);
        let remarks = v.optional_text("remarks", &self.remarks);
        let file_link = v.optional_text("file_link", &self.file_link);

        v.finish()?;

        Ok(ContractDraft {
            employee_number,
            employee_job_id,
            start_date,
            end_date,
            paper_contract_end_date: self.paper_contract_end_date,
            basic_salary,
            housing_allowance,
            transportation_allowance,
            food_allowance,
            remarks,
            file_link,
        })
    }
}
