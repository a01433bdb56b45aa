//! Configuration loading and management for the HR administration backend.
//!
//! Two layers: YAML files in a configuration directory describe the company
//! and the business rules, and environment variables describe the process
//! (bind address, database file, log level).
//!
//! # Example
//!
//! ```no_run
//! use hr_admin::config::{ConfigLoader, Settings};
//!
//! let settings = Settings::from_env().unwrap();
//! let config = ConfigLoader::load(&settings.config_dir).unwrap();
//! println!("Leave year: {} days", config.policy().leave.days_per_year);
//! ```

mod loader;
mod settings;
mod types;

pub use loader::ConfigLoader;
pub use settings::{AppEnvironment, Settings};
pub use types::{AdminConfig, CompanyConfig, LeavePolicy, PolicyConfig};
