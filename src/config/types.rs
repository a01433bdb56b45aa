//! Configuration types for the HR administration backend.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from the YAML files of a configuration directory.

use serde::Deserialize;

/// Company details printed in the report header.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CompanyConfig {
    /// Legal company name.
    pub name: String,
    /// Postal address shown under the name.
    pub address: String,
    /// Path or URL of the logo image.
    pub logo_path: String,
    /// Image used when an employee has no photo.
    pub placeholder_photo: String,
    /// Currency code printed next to amounts.
    pub currency: String,
}

impl Default for CompanyConfig {
    fn default() -> Self {
        Self {
            name: "OCC Weavers Ltd.".to_string(),
            address: "7081 Al-Madinah Al-Munawarah Rd, Ash Sharafiyah District, Jeddah 23216, Saudi Arabia".to_string(),
            logo_path: "/images/logo.png".to_string(),
            placeholder_photo: "https://placehold.co/40x60".to_string(),
            currency: "SAR".to_string(),
        }
    }
}

/// Leave accrual rules applied when a contract is created.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LeavePolicy {
    /// Days counted as one contract year.
    pub days_per_year: u32,
    /// Leave balance units granted per (rounded) contract year.
    pub units_per_contract_year: i64,
}

impl Default for LeavePolicy {
    fn default() -> Self {
        Self {
            days_per_year: 365,
            units_per_contract_year: 1,
        }
    }
}

/// Business rules loaded from policy.yaml.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PolicyConfig {
    /// Leave accrual settings.
    pub leave: LeavePolicy,
    /// Text displayed in place of missing values.
    pub placeholder: String,
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self {
            leave: LeavePolicy::default(),
            placeholder: "-".to_string(),
        }
    }
}

/// The complete configuration loaded from a configuration directory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AdminConfig {
    company: CompanyConfig,
    policy: PolicyConfig,
}

impl AdminConfig {
    /// Creates a new AdminConfig from its component parts.
    pub fn new(company: CompanyConfig, policy: PolicyConfig) -> Self {
        Self { company, policy }
    }

    /// Returns the company details.
    pub fn company(&self) -> &CompanyConfig {
        &self.company
    }

    /// Returns the business rules.
    pub fn policy(&self) -> &PolicyConfig {
        &self.policy
    }
}
