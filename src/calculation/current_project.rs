//! Selection of an employee's current project from its transfer history.

use crate::models::{AuditStep, ProjectAssignment};

/// Returns the latest assignment by transfer date (highest id on ties).
pub fn select_latest_assignment<'a, I>(assignments: I) -> Option<&'a ProjectAssignment>
where
    I: IntoIterator<Item = &'a ProjectAssignment>,
{
    assignments
        .into_iter()
        .max_by_key(|a| (a.transfer_date, a.id))
}

/// Audit step describing a recomputation of the cached project.
pub fn current_project_audit_step(
    employee_number: i64,
    latest: Option<&ProjectAssignment>,
    step_number: u32,
) -> AuditStep {
    let project_id = latest.map(|a| a.project_id);
    let reasoning = match latest {
        Some(a) => format!(
            "Transfer #{} on {} is the latest; employee {} is on project {}",
            a.id, a.transfer_date, employee_number, a.project_id
        ),
        None => format!(
            "Employee {} has no transfers; current project cleared",
            employee_number
        ),
    };

    AuditStep {
        step_number,
        rule_id: "current_project_sync".to_string(),
        rule_name: "Current Project Sync".to_string(),
        input: serde_json::json!({
            "employee_number": employee_number,
            "latest_assignment_id": latest.map(|a| a.id),
        }),
        output: serde_json::json!({ "project_id": project_id }),
        reasoning,
    }
}
