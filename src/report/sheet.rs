//! The file information sheet view model.
//!
//! Every value is pre-formatted text, with the placeholder applied where a
//! value is missing, so the template only lays things out.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::calculation::format_days;
use crate::config::{CompanyConfig, PolicyConfig};
use crate::models::EmployeeDossier;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Page header with the company identity and the print date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SheetHeader {
    /// Company name.
    pub company_name: String,
    /// Company address.
    pub company_address: String,
    /// Logo image path.
    pub logo_path: String,
    /// Print date, e.g. "Thursday, October 15, 2026".
    pub printed_on: String,
    /// Nationality.
    pub country: String,
}

/// The employee information page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SheetProfile {
    /// Full name.
    pub full_name: String,
    /// Employee number.
    pub employee_number: String,
    /// Current job title.
    pub job_title: String,
    /// Current project site.
    pub project: String,
    /// Email.
    pub email: String,
    /// Mobile number.
    pub mobile_number: String,
    /// Residency permit number.
    pub iqama_number: String,
    /// Residency permit expiration (Hijri).
    pub iqama_expiration_hijri: String,
    /// Residency permit expiration (Gregorian).
    pub iqama_expiration_gregorian: String,
    /// Passport number.
    pub passport_number: String,
    /// Passport expiration.
    pub passport_expiration: String,
    /// Employment start.
    pub company_start_date: String,
    /// Date of birth.
    pub birthdate: String,
    /// Age in whole years on the print date.
    pub age: u32,
    /// Insurance class.
    pub insurance_class: String,
    /// Education level.
    pub education_level: String,
    /// Degree.
    pub degree: String,
    /// IBAN.
    pub iban_number: String,
    /// Photo path, or the placeholder photo.
    pub photo: String,
}

/// One row of the contract history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SheetContract {
    /// Electronic start date.
    pub start_date: String,
    /// Electronic end date.
    pub end_date: String,
    /// Paper contract end date.
    pub paper_contract_end_date: String,
    /// Duration text.
    pub duration: String,
    /// Job title held under the contract.
    pub job_title: String,
    /// Basic salary.
    pub basic_salary: String,
    /// Housing allowance.
    pub housing_allowance: String,
    /// Transportation allowance.
    pub transportation_allowance: String,
    /// Food allowance.
    pub food_allowance: String,
    /// Remarks.
    pub remarks: String,
}

/// One row of the transfer history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SheetTransfer {
    /// Transfer date.
    pub transfer_date: String,
    /// Project left.
    pub from_project: String,
    /// Project joined.
    pub to_project: String,
}

/// One row of the leave history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SheetLeave {
    /// Departure date.
    pub departure: String,
    /// Return date.
    pub return_date: String,
    /// Visa expiration.
    pub visa_expiration: String,
    /// Duration text.
    pub duration: String,
    /// Leave days left after this leave.
    pub remaining: String,
}

/// Everything the file information sheet prints for one employee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileInformationSheet {
    /// Page header.
    pub header: SheetHeader,
    /// Employee information section.
    pub profile: SheetProfile,
    /// Currency shown next to amounts.
    pub currency: String,
    /// Contract history, newest first.
    pub contracts: Vec<SheetContract>,
    /// Transfer history, newest first.
    pub transfers: Vec<SheetTransfer>,
    /// Leave history, newest first.
    pub leaves: Vec<SheetLeave>,
}

impl FileInformationSheet {
    /// Builds the sheet as printed on `today`.
    pub fn build(
        dossier: &EmployeeDossier,
        company: &CompanyConfig,
        policy: &PolicyConfig,
        today: NaiveDate,
    ) -> Self {
        let placeholder = policy.placeholder.as_str();
        let or_placeholder =
            |value: Option<&str>| value.map_or_else(|| placeholder.to_string(), str::to_string);
        let employee = &dossier.employee;

        let header = SheetHeader {
            company_name: company.name.clone(),
            company_address: company.address.clone(),
            logo_path: company.logo_path.clone(),
            printed_on: today.format("%A, %B %-d, %Y").to_string(),
            country: or_placeholder(dossier.country.as_deref()),
        };

        let profile = SheetProfile {
            full_name: employee.full_name.clone(),
            employee_number: employee.employee_number.to_string(),
            job_title: or_placeholder(dossier.job_title.as_deref()),
            project: or_placeholder(dossier.project.as_deref()),
            email: or_placeholder(employee.email.as_deref()),
            mobile_number: or_placeholder(employee.mobile_number.as_deref()),
            iqama_number: employee.iqama_number.clone(),
            iqama_expiration_hijri: employee.iqama_expiration_hijri.clone(),
            iqama_expiration_gregorian: ymd(employee.iqama_expiration_gregorian),
            passport_number: employee.passport_number.clone(),
            passport_expiration: ymd(employee.passport_expiration),
            company_start_date: ymd(employee.company_start_date),
            birthdate: ymd(employee.birthdate),
            age: employee.age_on(today),
            insurance_class: or_placeholder(dossier.insurance_class.as_deref()),
            education_level: or_placeholder(dossier.education_level.as_deref()),
            degree: or_placeholder(dossier.degree.as_deref()),
            iban_number: employee.iban_number.clone(),
            photo: employee
                .photo_link
                .clone()
                .unwrap_or_else(|| company.placeholder_photo.clone()),
        };

        let mut contracts: Vec<_> = dossier.contracts.iter().collect();
        contracts.sort_by(|a, b| b.contract.start_date.cmp(&a.contract.start_date));
        let contracts = contracts
            .into_iter()
            .map(|entry| {
                let c = &entry.contract;
                SheetContract {
                    start_date: ymd(c.start_date),
                    end_date: ymd(c.end_date),
                    paper_contract_end_date: c
                        .paper_contract_end_date
                        .map_or_else(|| placeholder.to_string(), ymd),
                    duration: c.duration_string(),
                    job_title: or_placeholder(entry.job_title.as_deref()),
                    basic_salary: money(c.basic_salary),
                    housing_allowance: money(c.housing_allowance),
                    transportation_allowance: money(c.transportation_allowance),
                    food_allowance: money(c.food_allowance),
                    remarks: or_placeholder(c.remarks.as_deref()),
                }
            })
            .collect();

        let mut transfers: Vec<_> = dossier.transfers.iter().collect();
        transfers.sort_by(|a, b| b.assignment.transfer_date.cmp(&a.assignment.transfer_date));
        let transfers = transfers
            .into_iter()
            .map(|entry| SheetTransfer {
                transfer_date: ymd(entry.assignment.transfer_date),
                from_project: or_placeholder(entry.from_project.as_deref()),
                to_project: or_placeholder(entry.to_project.as_deref()),
            })
            .collect();

        let mut leaves: Vec<_> = dossier.leaves.iter().collect();
        leaves.sort_by(|a, b| b.start_date.cmp(&a.start_date));
        let leaves = leaves
            .into_iter()
            .map(|leave| SheetLeave {
                departure: ymd(leave.start_date),
                return_date: ymd(leave.end_date),
                visa_expiration: ymd(leave.visa_expiration),
                duration: format_days(leave.duration_in_days()),
                remaining: format_days(leave.remaining_leave_days),
            })
            .collect();

        Self {
            header,
            profile,
            currency: company.currency.clone(),
            contracts,
            transfers,
            leaves,
        }
    }
}

fn ymd(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

fn money(amount: Decimal) -> String {
    amount.normalize().to_string()
}
