//! Leave accrual for newly created contracts.
//!
//! A new contract grants leave proportional to its length in whole years.
//! The length counts the end date as a worked day, so a contract running
//! 2024-01-01 to 2024-12-31 is exactly one year.

use chrono::NaiveDate;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

use crate::config::LeavePolicy;
use crate::models::AuditStep;

use super::duration::inclusive_days;

/// The result of a leave accrual, including the audit step.
#[derive(Debug, Clone)]
pub struct LeaveAccrualResult {
    /// Days covered by the contract, end date included.
    pub contract_days: i64,
    /// Contract length rounded to whole years.
    pub contract_years: i64,
    /// Units added to the employee's leave balance.
    pub accrued: i64,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Returns the contract length in years, rounded half away from zero.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use hr_admin::calculation::contract_duration_in_years;
///
/// let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
/// let end = NaiveDate::from_ymd_opt(2025, 12, 31).unwrap();
/// assert_eq!(contract_duration_in_years(start, end, 365), 2);
/// ```
pub fn contract_duration_in_years(start: NaiveDate, end: NaiveDate, days_per_year: u32) -> i64 {
    let days = Decimal::from(inclusive_days(start, end));
    let years = days / Decimal::from(days_per_year.max(1));
    years
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i64()
        .unwrap_or(0)
}

/// Computes the leave units a new contract adds to the balance.
pub fn leave_accrual(
    start: NaiveDate,
    end: NaiveDate,
    policy: &LeavePolicy,
    step_number: u32,
) -> LeaveAccrualResult {
    let contract_days = inclusive_days(start, end);
    let contract_years = contract_duration_in_years(start, end, policy.days_per_year);
    let accrued = contract_years * policy.units_per_contract_year;

    let audit_step = AuditStep {
        step_number,
        rule_id: "leave_accrual".to_string(),
        rule_name: "Leave Accrual".to_string(),
        input: serde_json::json!({
            "start_date": start.to_string(),
            "end_date": end.to_string(),
            "days_per_year": policy.days_per_year,
            "units_per_contract_year": policy.units_per_contract_year,
        }),
        output: serde_json::json!({
            "contract_days": contract_days,
            "contract_years": contract_years,
            "accrued": accrued,
        }),
        reasoning: format!(
            "{} days / {} = {} year(s) x {} = {} added to leave balance",
            contract_days, policy.days_per_year, contract_years, policy.units_per_contract_year, accrued
        ),
    };

    LeaveAccrualResult {
        contract_days,
        contract_years,
        accrued,
        audit_step,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_one_calendar_year_is_one_year() {
        assert_eq!(contract_duration_in_years(date(2023, 1, 1), date(2023, 12, 31), 365), 1);
    }

    #[test]
    fn test_half_year_rounds_up() {
        // 183 days / 365 = 0.501
        assert_eq!(contract_duration_in_years(date(2025, 1, 1), date(2025, 7, 2), 365), 1);
        // 182 days / 365 = 0.498
        assert_eq!(contract_duration_in_years(date(2025, 1, 1), date(2025, 7, 1), 365), 0);
    }

    #[test]
    fn test_exact_midpoint_rounds_away_from_zero() {
        // 5 days / 10 = 0.5
        assert_eq!(contract_duration_in_years(date(2025, 1, 1), date(2025, 1, 5), 10), 1);
    }

    #[test]
    fn test_two_years_accrue_two_units_by_default() {
        let result = leave_accrual(
            date(2024, 1, 1),
            date(2025, 12, 31),
            &LeavePolicy::default(),
            1,
        );
        assert_eq!(result.contract_days, 731);
        assert_eq!(result.contract_years, 2);
        assert_eq!(result.accrued, 2);
        assert_eq!(result.audit_step.rule_id, "leave_accrual");
        assert_eq!(result.audit_step.output["accrued"], 2);
    }

    #[test]
    fn test_units_per_year_scale_accrual() {
        let policy = LeavePolicy {
            days_per_year: 365,
            units_per_contract_year: 21,
        };
        let result = leave_accrual(date(2024, 1, 1), date(2025, 12, 31), &policy, 3);
        assert_eq!(result.accrued, 42);
        assert_eq!(result.audit_step.step_number, 3);
    }

    #[test]
    fn test_short_contract_accrues_nothing() {
        let result = leave_accrual(
            date(2025, 1, 1),
            date(2025, 2, 28),
            &LeavePolicy::default(),
            1,
        );
        assert_eq!(result.accrued, 0);
    }
}
