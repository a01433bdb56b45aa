//! Audit trail models for observer-driven writes.
//!
//! Every service write returns the record it saved together with an
//! [`AuditTrace`] describing the derived updates the observers applied
//! (cached employee fields, leave accrual, leave deductions).

use serde::{Deserialize, Serialize};

/// Represents a single step in the audit trail.
///
/// # Example
///
/// ```
/// use hr_admin::models::AuditStep;
///
/// let step = AuditStep {
///     step_number: 1,
///     rule_id: "leave_accrual".to_string(),
///     rule_name: "Leave Accrual".to_string(),
///     input: serde_json::json!({"contract_days": 730}),
///     output: serde_json::json!({"accrued": 2}),
///     reasoning: "730 days / 365 = 2 years".to_string(),
/// };
/// assert_eq!(step.rule_id, "leave_accrual");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditStep {
    /// The sequential step number.
    pub step_number: u32,
    /// The unique identifier of the rule that was applied.
    pub rule_id: String,
    /// The human-readable name of the rule.
    pub rule_name: String,
    /// The input data for this step.
    pub input: serde_json::Value,
    /// The output data from this step.
    pub output: serde_json::Value,
    /// Human-readable explanation of the decision.
    pub reasoning: String,
}

/// A warning generated while applying a rule.
///
/// Warnings flag results that were saved but may need attention, such as a
/// leave that overdraws the employee's balance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditWarning {
    /// A code identifying the type of warning.
    pub code: String,
    /// A human-readable description of the warning.
    pub message: String,
    /// The severity level (e.g., "low", "medium", "high").
    pub severity: String,
}

/// The complete audit trace for one write.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditTrace {
    /// The sequence of rule applications.
    pub steps: Vec<AuditStep>,
    /// Any warnings generated along the way.
    pub warnings: Vec<AuditWarning>,
    /// The total duration of the write in microseconds.
    pub duration_us: u64,
}

impl AuditTrace {
    /// Returns the step number the next recorded step should use.
    pub fn next_step(&self) -> u32 {
        self.steps.len() as u32 + 1
    }

    /// Appends the steps and warnings of another trace, renumbering steps.
    pub fn absorb(&mut self, other: AuditTrace) {
        for mut step in other.steps {
            step.step_number = self.next_step();
            self.steps.push(step);
        }
        self.warnings.extend(other.warnings);
    }
}

/// A saved record together with the audit trace of its write.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Saved<T> {
    /// The record as stored after all observers ran.
    pub record: T,
    /// What the observers derived from the write.
    pub audit_trace: AuditTrace,
}
