//! Project assignment (transfer) model and its form.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::AdminResult;

use super::form::Validator;

/// A transfer of an employee to a project site.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectAssignment {
    /// Row id.
    pub id: i64,
    /// Transferred employee.
    pub employee_number: i64,
    /// Project the employee left, if any.
    pub from_project_id: Option<i64>,
    /// Project the employee moved to.
    pub project_id: i64,
    /// Effective date of the transfer.
    pub transfer_date: NaiveDate,
    /// Free-text notes.
    pub remarks: Option<String>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Submitted project assignment form.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProjectAssignmentForm {
    /// Transferred employee.
    #[serde(default)]
    pub employee_number: Option<i64>,
    /// Project the employee left.
    #[serde(default)]
    pub from_project_id: Option<i64>,
    /// Project the employee joined.
    #[serde(default)]
    pub project_id: Option<i64>,
    /// Effective date of the transfer.
    #[serde(default)]
    pub transfer_date: Option<NaiveDate>,
    /// Free-text notes.
    #[serde(default)]
    pub remarks: Option<String>,
}

/// A validated project assignment, ready to be written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectAssignmentDraft {
    /// Transferred employee.
    pub employee_number: i64,
    /// Project the employee left.
    pub from_project_id: Option<i64>,
    /// Project the employee joined.
    pub project_id: i64,
    /// Effective date of the transfer.
    pub transfer_date: NaiveDate,
    /// Free-text notes.
    pub remarks: Option<String>,
}

impl ProjectAssignmentForm {
    /// Validates the form, reporting every violation at once.
    pub fn validate(&self) -> AdminResult<ProjectAssignmentDraft> {
        let mut v = Validator::new();

        let employee_number = v.positive_key("employee_number", &self.employee_number);
        let project_id = v.required("project_id", &self.project_id);
        let transfer_date = v.required("transfer_date", &self.transfer_date);
        let remarks = v.optional_text("remarks", &self.remarks);
        if self.from_project_id.is_some() && self.from_project_id == self.project_id {
            v.reject("project_id", "must differ from the project transferred from");
        }

        v.finish()?;

        Ok(ProjectAssignmentDraft {
            employee_number,
            from_project_id: self.from_project_id,
            project_id,
            transfer_date,
            remarks,
        })
    }
}
