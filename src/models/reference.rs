//! Reference tables: countries, insurance classes, education levels,
//! degrees, projects and job titles.
//!
//! Each table is a plain `(id, label)` pair with a table-specific label
//! column, so one set of types covers all six.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{AdminError, AdminResult};

use super::form::Validator;

/// The reference tables known to the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ReferenceKind {
    /// Nationalities.
    Country,
    /// Medical insurance classes.
    InsuranceClass,
    /// Education levels.
    EducationLevel,
    /// Academic degrees.
    Degree,
    /// Project sites.
    Project,
    /// Job titles.
    EmployeeJob,
}

impl ReferenceKind {
    /// Every reference kind, in migration order.
    pub const ALL: [ReferenceKind; 6] = [
        ReferenceKind::Country,
        ReferenceKind::InsuranceClass,
        ReferenceKind::EducationLevel,
        ReferenceKind::Degree,
        ReferenceKind::Project,
        ReferenceKind::EmployeeJob,
    ];

    /// URL slug used by the API.
    pub fn slug(self) -> &'static str {
        match self {
            ReferenceKind::Country => "countries",
            ReferenceKind::InsuranceClass => "insurance-classes",
            ReferenceKind::EducationLevel => "education-levels",
            ReferenceKind::Degree => "degrees",
            ReferenceKind::Project => "projects",
            ReferenceKind::EmployeeJob => "jobs",
        }
    }

    /// Backing table name.
    pub fn table(self) -> &'static str {
        match self {
            ReferenceKind::Country => "countries",
            ReferenceKind::InsuranceClass => "insurance_classes",
            ReferenceKind::EducationLevel => "education_levels",
            ReferenceKind::Degree => "degrees",
            ReferenceKind::Project => "projects",
            ReferenceKind::EmployeeJob => "employee_jobs",
        }
    }

    /// Column holding the display label.
    pub fn label_column(self) -> &'static str {
        match self {
            ReferenceKind::Country | ReferenceKind::InsuranceClass => "name",
            ReferenceKind::EducationLevel => "level",
            ReferenceKind::Degree => "degree",
            ReferenceKind::Project => "project_name",
            ReferenceKind::EmployeeJob => "job_title",
        }
    }

    /// Singular name used in error messages.
    pub fn entity_name(self) -> &'static str {
        match self {
            ReferenceKind::Country => "country",
            ReferenceKind::InsuranceClass => "insurance class",
            ReferenceKind::EducationLevel => "education level",
            ReferenceKind::Degree => "degree",
            ReferenceKind::Project => "project",
            ReferenceKind::EmployeeJob => "job title",
        }
    }
}

impl fmt::Display for ReferenceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

impl FromStr for ReferenceKind {
    type Err = AdminError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ReferenceKind::ALL
            .into_iter()
            .find(|kind| kind.slug() == s)
            .ok_or_else(|| AdminError::not_found("reference table", s))
    }
}

/// A row of a reference table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferenceEntry {
    /// Row id.
    pub id: i64,
    /// Display label.
    pub label: String,
}

/// Submitted reference form.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReferenceForm {
    /// Display label.
    #[serde(default)]
    pub label: Option<String>,
}

impl ReferenceForm {
    /// Validates the form and returns the trimmed label.
    pub fn validate(&self) -> AdminResult<String> {
        let mut v = Validator::new();
        let label = v.required_text("label", &self.label);
        v.finish()?;
        Ok(label)
    }
}
