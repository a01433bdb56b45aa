//! Employee model and its form.
//!
//! An employee is keyed by its employee number. Besides the profile fields
//! entered through the form, the row carries cached "current" fields that
//! only the observers write: the latest contract's job and dates, the latest
//! project assignment, and the leave balance.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::AdminResult;

use super::form::Validator;

/// Represents an employee record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    /// Unique employee number (primary key).
    pub employee_number: i64,
    /// Full legal name.
    pub full_name: String,
    /// Nationality.
    pub country_id: i64,
    /// Link to the employee photo.
    pub photo_link: Option<String>,
    /// Contact email.
    pub email: Option<String>,
    /// Contact mobile number.
    pub mobile_number: Option<String>,
    /// Residency permit number.
    pub iqama_number: String,
    /// Residency permit expiration as written in the Hijri calendar.
    pub iqama_expiration_hijri: String,
    /// Residency permit expiration in the Gregorian calendar.
    pub iqama_expiration_gregorian: NaiveDate,
    /// Passport number.
    pub passport_number: String,
    /// Passport expiration date.
    pub passport_expiration: NaiveDate,
    /// First day with the company.
    pub company_start_date: NaiveDate,
    /// Date of birth.
    pub birthdate: NaiveDate,
    /// Medical insurance class.
    pub insurance_class_id: i64,
    /// Highest education level.
    pub education_level_id: i64,
    /// Academic degree, if any.
    pub degree_id: Option<i64>,
    /// Salary bank account.
    pub iban_number: String,
    /// Job title of the latest contract.
    pub employee_job_id: Option<i64>,
    /// Start date of the latest contract.
    pub electronic_contract_start_date: Option<NaiveDate>,
    /// End date of the latest contract.
    pub electronic_contract_end_date: Option<NaiveDate>,
    /// Paper contract end date of the latest contract.
    pub paper_contract_end_date: Option<NaiveDate>,
    /// Project of the latest transfer.
    pub project_id: Option<i64>,
    /// Leave balance maintained by the contract and leave observers.
    pub leave_balance: i64,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Employee {
    /// Returns the employee's age in whole years on the given date.
    ///
    /// # Examples
    ///
    /// ```
    /// use chrono::NaiveDate;
    /// use hr_admin::models::Employee;
    ///
    /// let birthdate = NaiveDate::from_ymd_opt(1990, 6, 15).unwrap();
    /// let day_before = NaiveDate::from_ymd_opt(2025, 6, 14).unwrap();
    /// let birthday = NaiveDate::from_ymd_opt(2025, 6, 15).unwrap();
    /// assert_eq!(Employee::age_from(birthdate, day_before), 34);
    /// assert_eq!(Employee::age_from(birthdate, birthday), 35);
    /// ```
    pub fn age_from(birthdate: NaiveDate, on: NaiveDate) -> u32 {
        on.years_since(birthdate).unwrap_or(0)
    }

    /// Returns this employee's age on the given date.
    pub fn age_on(&self, on: NaiveDate) -> u32 {
        Self::age_from(self.birthdate, on)
    }

    /// Returns the "number - name" label used in lists and selects.
    pub fn label(&self) -> String {
        format!("{} - {}", self.employee_number, self.full_name)
    }
}

/// Submitted employee form.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EmployeeForm {
    /// Unique employee number.
    #[serde(default)]
    pub employee_number: Option<i64>,
    /// Full legal name.
    #[serde(default)]
    pub full_name: Option<String>,
    /// Nationality.
    #[serde(default)]
    pub country_id: Option<i64>,
    /// Link to the employee photo.
    #[serde(default)]
    pub photo_link: Option<String>,
    /// Contact email.
    #[serde(default)]
    pub email: Option<String>,
    /// Contact mobile number.
    #[serde(default)]
    pub mobile_number: Option<String>,
    /// Residency permit number.
    #[serde(default)]
    pub iqama_number: Option<String>,
    /// Residency permit expiration in the Hijri calendar.
    #[serde(default)]
    pub iqama_expiration_hijri: Option<String>,
    /// Residency permit expiration in the Gregorian calendar.
    #[serde(default)]
    pub iqama_expiration_gregorian: Option<NaiveDate>,
    /// Passport number.
    #[serde(default)]
    pub passport_number: Option<String>,
    /// Passport expiration date.
    #[serde(default)]
    pub passport_expiration: Option<NaiveDate>,
    /// First day with the company.
    #[serde(default)]
    pub company_start_date: Option<NaiveDate>,
    /// Date of birth.
    #[serde(default)]
    pub birthdate: Option<NaiveDate>,
    /// Medical insurance class.
    #[serde(default)]
    pub insurance_class_id: Option<i64>,
    /// Highest education level.
    #[serde(default)]
    pub education_level_id: Option<i64>,
    /// Academic degree, if any.
    #[serde(default)]
    pub degree_id: Option<i64>,
    /// Salary bank account.
    #[serde(default)]
    pub iban_number: Option<String>,
}

/// A validated employee profile, ready to be written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmployeeDraft {
    /// Unique employee number.
    pub employee_number: i64,
    /// Full legal name.
    pub full_name: String,
    /// Nationality.
    pub country_id: i64,
    /// Link to the employee photo.
    pub photo_link: Option<String>,
    /// Contact email.
    pub email: Option<String>,
    /// Contact mobile number.
    pub mobile_number: Option<String>,
    /// Residency permit number.
    pub iqama_number: String,
    /// Residency permit expiration in the Hijri calendar.
    pub iqama_expiration_hijri: String,
    /// Residency permit expiration in the Gregorian calendar.
    pub iqama_expiration_gregorian: NaiveDate,
    /// Passport number.
    pub passport_number: String,
    /// Passport expiration date.
    pub passport_expiration: NaiveDate,
    /// First day with the company.
    pub company_start_date: NaiveDate,
    /// Date of birth.
    pub birthdate: NaiveDate,
    /// Medical insurance class.
    pub insurance_class_id: i64,
    /// Highest education level.
    pub education_level_id: i64,
    /// Academic degree, if any.
    pub degree_id: Option<i64>,
    /// Salary bank account.
    pub iban_number: String,
}

impl EmployeeForm {
    /// Validates the form, reporting every violation at once.
    pub fn validate(&self) -> AdminResult<EmployeeDraft> {
        let mut v = Validator::new();

        let employee_number = v.positive_key("employee_number", &self.employee_number);
        let full_name = v.required_text("full_name", &self.full_name);
        let country_id = v.required("country_id", &self.country_id);
        let photo_link = v.optional_text("photo_link", &self.photo_link);
        let email = v.optional_text("email", &self.email);
        v.email("email", email.as_deref());
        let mobile_number = v.optional_text("mobile_number", &self.mobile_number);
        let iqama_number = v.required_text("iqama_number", &self.iqama_number);
        let iqama_expiration_hijri =
            v.required_text("iqama_expiration_hijri", &self.iqama_expiration_hijri);
        let iqama_expiration_gregorian =
            v.required("iqama_expiration_gregorian", &self.iqama_expiration_gregorian);
        let passport_number = v.required_text("passport_number", &self.passport_number);
        let passport_expiration = v.required("passport_expiration", &self.passport_expiration);
        let company_start_date = v.required("company_start_date", &self.company_start_date);
        let birthdate = v.required("birthdate", &self.birthdate);
        let insurance_class_id = v.required("insurance_class_id", &self.insurance_class_id);
        let education_level_id = v.required("education_level_id", &self.education_level_id);
        let iban_number = v.required_text("iban_number", &self.iban_number);

        v.finish()?;

        Ok(EmployeeDraft {
            employee_number,
            full_name,
            country_id,
            photo_link,
            email,
            mobile_number,
            iqama_number,
            iqama_expiration_hijri,
            iqama_expiration_gregorian,
            passport_number,
            passport_expiration,
            company_start_date,
            birthdate,
            insurance_class_id,
            education_level_id,
            degree_id: self.degree_id,
            iban_number,
        })
    }
}
