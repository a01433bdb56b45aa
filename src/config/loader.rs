//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading the company
//! and policy configuration from YAML files.

use std::fs;
use std::path::Path;

use crate::error::{AdminError, AdminResult};

use super::types::{AdminConfig, CompanyConfig, PolicyConfig};

/// Loads and provides access to the backend configuration.
///
/// # Directory Structure
///
/// ```text
/// config/default/
/// ├── company.yaml   # Report header: name, address, logo
/// └── policy.yaml    # Leave accrual and display rules
/// ```
///
/// # Example
///
/// ```no_run
/// use hr_admin::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/default").unwrap();
/// println!("Company: {}", loader.company().name);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ConfigLoader {
    config: AdminConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// Returns an error if either file is missing, contains invalid YAML, or
    /// declares a zero-length contract year.
    pub fn load<P: AsRef<Path>>(path: P) -> AdminResult<Self> {
        let path = path.as_ref();

        let company_path = path.join("company.yaml");
        let company = Self::load_yaml::<CompanyConfig>(&company_path)?;

        let policy_path = path.join("policy.yaml");
        let policy = Self::load_yaml::<PolicyConfig>(&policy_path)?;
        if policy.leave.days_per_year == 0 {
            return Err(AdminError::ConfigParseError {
                path: policy_path.display().to_string(),
                message: "leave.days_per_year must be greater than zero".to_string(),
            });
        }

        Ok(Self {
            config: AdminConfig::new(company, policy),
        })
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> AdminResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| AdminError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| AdminError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Returns the underlying configuration.
    pub fn config(&self) -> &AdminConfig {
        &self.config
    }

    /// Returns the company details.
    pub fn company(&self) -> &CompanyConfig {
        self.config.company()
    }

    /// Returns the business rules.
    pub fn policy(&self) -> &PolicyConfig {
        self.config.policy()
    }
}
