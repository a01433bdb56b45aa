//! An employee together with its resolved relations.

use serde::{Deserialize, Serialize};

use super::{Contract, Employee, EmployeeLeave, ProjectAssignment};

/// A contract with its job title resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DossierContract {
    /// The stored contract.
    pub contract: Contract,
    /// Job title label.
    pub job_title: Option<String>,
}

/// A transfer with its project names resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DossierTransfer {
    /// The stored transfer.
    pub assignment: ProjectAssignment,
    /// Name of the project left.
    pub from_project: Option<String>,
    /// Name of the project joined.
    pub to_project: Option<String>,
}

/// Everything known about one employee, with reference labels resolved.
///
/// Labels are `None` when the reference is unset. Histories are ordered
/// newest first: contracts by start date, transfers by transfer date and
/// leaves by departure date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeDossier {
    /// The employee row.
    pub employee: Employee,
    /// Nationality label.
    pub country: Option<String>,
    /// Insurance class label.
    pub insurance_class: Option<String>,
    /// Education level label.
    pub education_level: Option<String>,
    /// Degree label.
    pub degree: Option<String>,
    /// Job title of the current contract.
    pub job_title: Option<String>,
    /// Current project site.
    pub project: Option<String>,
    /// Live contracts.
    pub contracts: Vec<DossierContract>,
    /// Project transfers.
    pub transfers: Vec<DossierTransfer>,
    /// Recorded leaves.
    pub leaves: Vec<EmployeeLeave>,
}
