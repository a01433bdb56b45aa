//! Query-string and body types for the HR API.
//!
//! Forms are deserialized straight into the model form types; this module
//! only holds the list filters and the bulk delete body.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{AdminError, AdminResult};
use crate::store::{ContractFilter, EmployeeFilter};

/// Query for `GET /employees`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EmployeeListQuery {
    /// Matches the full name or the employee number.
    #[serde(default)]
    pub search: Option<String>,
    /// Only employees currently on this project.
    #[serde(default)]
    pub project_id: Option<i64>,
}

impl From<EmployeeListQuery> for EmployeeFilter {
    fn from(query: EmployeeListQuery) -> Self {
        EmployeeFilter {
            search: query.search.filter(|s| !s.trim().is_empty()),
            project_id: query.project_id,
        }
    }
}

/// Query for `GET /contracts`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContractListQuery {
    /// Restricts the result to one employee.
    #[serde(default)]
    pub employee_number: Option<i64>,
    /// Comma-separated job title ids, e.g. `1,4`.
    #[serde(default)]
    pub job_ids: Option<String>,
    /// Earliest start date.
    #[serde(default)]
    pub start_from: Option<NaiveDate>,
    /// Latest start date.
    #[serde(default)]
    pub start_to: Option<NaiveDate>,
    /// Earliest end date.
    #[serde(default)]
    pub end_from: Option<NaiveDate>,
    /// Latest end date.
    #[serde(default)]
    pub end_to: Option<NaiveDate>,
    /// Minimum contract length in whole years.
    #[serde(default)]
    pub min_years: Option<u32>,
    /// Maximum contract length in whole years.
    #[serde(default)]
    pub max_years: Option<u32>,
    /// Also return soft-deleted contracts.
    #[serde(default)]
    pub include_deleted: Option<bool>,
}

impl ContractListQuery {
    /// Converts the query into a store filter, rejecting a malformed job id
    /// list.
    pub fn into_filter(self) -> AdminResult<ContractFilter> {
        let job_ids = match self.job_ids.as_deref() {
            Some(raw) => parse_id_list(raw).ok_or_else(|| {
                AdminError::invalid("job_ids", "must be a comma-separated list of ids")
            })?,
            None => Vec::new(),
        };

        Ok(ContractFilter {
            employee_number: self.employee_number,
            job_ids,
            start_from: self.start_from,
            start_to: self.start_to,
            end_from: self.end_from,
            end_to: self.end_to,
            min_years: self.min_years,
            max_years: self.max_years,
            include_deleted: self.include_deleted.unwrap_or(false),
        })
    }
}

fn parse_id_list(raw: &str) -> Option<Vec<i64>> {
    raw.split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(|part| part.parse::<i64>().ok())
        .collect()
}

/// Query selecting one employee's rows, used by the transfer and leave
/// lists and by the contract defaults lookup.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EmployeeQuery {
    /// Restricts the result to one employee.
    #[serde(default)]
    pub employee_number: Option<i64>,
}

/// Body of `DELETE /contracts`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BulkDeleteRequest {
    /// Contract ids to soft-delete.
    pub ids: Vec<i64>,
}

/// Query for the file information sheet.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SheetQuery {
    /// Print date; today when absent.
    #[serde(default)]
    pub date: Option<NaiveDate>,
}
