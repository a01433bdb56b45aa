//! Employee leave model and its form.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::calculation::inclusive_days;
use crate::error::AdminResult;

use super::form::Validator;

/// Represents a scheduled absence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeLeave {
    /// Row id.
    pub id: i64,
    /// Employee on leave.
    pub employee_number: i64,
    /// Departure date.
    pub start_date: NaiveDate,
    /// Return date.
    pub end_date: NaiveDate,
    /// Expiration of the exit/re-entry visa issued for this leave.
    pub visa_expiration: NaiveDate,
    /// Leave balance left after this leave was deducted.
    pub remaining_leave_days: i64,
    /// Free-text notes.
    pub remarks: Option<String>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl EmployeeLeave {
    /// Number of days away, counting both the departure and return day.
    ///
    /// # Examples
    ///
    /// ```
    /// use chrono::{NaiveDate, Utc};
    /// use hr_admin::models::EmployeeLeave;
    ///
    /// let leave = EmployeeLeave {
    ///     id: 1,
    ///     employee_number: 1042,
    ///     start_date: NaiveDate::from_ymd_opt(2025, 7, 1).unwrap(),
    ///     end_date: NaiveDate::from_ymd_opt(2025, 7, 30).unwrap(),
    ///     visa_expiration: NaiveDate::from_ymd_opt(2025, 9, 1).unwrap(),
    ///     remaining_leave_days: 0,
    ///     remarks: None,
    ///     created_at: Utc::now(),
    ///     updated_at: Utc::now(),
    /// };
    /// assert_eq!(leave.duration_in_days(), 30);
    /// ```
    pub fn duration_in_days(&self) -> i64 {
        inclusive_days(self.start_date, self.end_date)
    }
}

/// Submitted leave form.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LeaveForm {
    /// Employee on leave.
    #[serde(default)]
    pub employee_number: Option<i64>,
    /// Departure date.
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    /// Return date.
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    /// Exit/re-entry visa expiration.
    #[serde(default)]
    pub visa_expiration: Option<NaiveDate>,
    /// Free-text notes.
    #[serde(default)]
    pub remarks: Option<String>,
}

/// A validated leave, ready to be written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeaveDraft {
    /// Employee on leave.
    pub employee_number: i64,
    /// Departure date.
    pub start_date: NaiveDate,
    /// Return date.
    pub end_date: NaiveDate,
    /// Exit/re-entry visa expiration.
    pub visa_expiration: NaiveDate,
    /// Free-text notes.
    pub remarks: Option<String>,
}

impl LeaveForm {
    /// Validates the form, reporting every violation at once.
    pub fn validate(&self) -> AdminResult<LeaveDraft> {
        let mut v = Validator::new();

        let employee_number = v.positive_key("employee_number", &self.employee_number);
        let start_date = v.required("start_date", &self.start_date);
        let end_date = v.required("end_date", &self.end_date);
        v.date_order("end_date", self.start_date, self.end_date);
        let visa_expiration = v.required("visa_expiration", &self.visa_expiration);
        let remarks = v.optional_text("remarks", &self.remarks);

        v.finish()?;

        Ok(LeaveDraft {
            employee_number,
            start_date,
            end_date,
            visa_expiration,
            remarks,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_single_day_leave_is_valid() {
        let draft = LeaveForm {
            employee_number: Some(1),
            start_date: Some(date(2025, 3, 3)),
            end_date: Some(date(2025, 3, 3)),
            visa_expiration: Some(date(2025, 6, 1)),
            remarks: None,
        }
        .validate()
        .unwrap();
        assert_eq!(draft.start_date, draft.end_date);
        assert_eq!(inclusive_days(draft.start_date, draft.end_date), 1);
    }

    #[test]
    fn test_visa_expiration_is_required() {
        let form = LeaveForm {
            employee_number: Some(1),
            start_date: Some(date(2025, 3, 3)),
            end_date: Some(date(2025, 3, 10)),
            visa_expiration: None,
            remarks: None,
        };
        assert!(form.validate().is_err());
    }

    #[test]
    fn test_return_before_departure_is_rejected() {
        let form = LeaveForm {
            employee_number: Some(1),
            start_date: Some(date(2025, 3, 10)),
            end_date: Some(date(2025, 3, 3)),
            visa_expiration: Some(date(2025, 6, 1)),
            remarks: None,
        };
        assert!(form.validate().is_err());
    }
}
