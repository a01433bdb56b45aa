//! Leave balance deduction when leave is recorded.

use crate::models::{AuditStep, AuditWarning};

/// The result of deducting a leave from the balance.
#[derive(Debug, Clone)]
pub struct LeaveDeductionResult {
    /// Balance after the deduction.
    pub remaining: i64,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
    /// Present when the deduction overdraws the balance.
    pub warning: Option<AuditWarning>,
}

/// Moves the leave balance by `delta` days taken (negative credits days back).
///
/// # Examples
///
/// ```
/// use hr_admin::calculation::deduct_leave;
///
/// let result = deduct_leave(30, 21, 1);
/// assert_eq!(result.remaining, 9);
/// assert!(result.warning.is_none());
///
/// let result = deduct_leave(9, 10, 1);
/// assert_eq!(result.remaining, -1);
/// assert!(result.warning.is_some());
/// ```
pub fn deduct_leave(balance: i64, delta: i64, step_number: u32) -> LeaveDeductionResult {
    let remaining = balance - delta;

    let reasoning = if delta >= 0 {
        format!("{} - {} day(s) taken = {}", balance, delta, remaining)
    } else {
        format!("{} + {} day(s) credited back = {}", balance, -delta, remaining)
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "leave_deduction".to_string(),
        rule_name: "Leave Deduction".to_string(),
        input: serde_json::json!({
            "balance": balance,
            "days": delta,
        }),
        output: serde_json::json!({
            "remaining": remaining,
        }),
        reasoning,
    };

    let warning = (remaining < 0).then(|| AuditWarning {
        code: "NEGATIVE_LEAVE_BALANCE".to_string(),
        message: format!("Leave balance is overdrawn by {} day(s)", -remaining),
        severity: "medium".to_string(),
    });

    LeaveDeductionResult {
        remaining,
        audit_step,
        warning,
    }
}
