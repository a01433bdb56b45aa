//! Error types for the HR administration backend.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for every failure the service layer, storage, configuration and report
//! rendering can surface.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A single violated form rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    /// The form field that failed validation.
    pub field: String,
    /// A human-readable description of the violation.
    pub message: String,
}

impl FieldError {
    /// Creates a new field error.
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// The main error type for the HR administration backend.
///
/// # Example
///
/// ```
/// use hr_admin::error::AdminError;
///
/// let error = AdminError::RecordNotFound {
///     entity: "employee".to_string(),
///     key: "1042".to_string(),
/// };
/// assert_eq!(error.to_string(), "employee not found: 1042");
/// ```
#[derive(Debug, Error)]
pub enum AdminError {
    /// A lookup targeted a row that does not exist.
    #[error("{entity} not found: {key}")]
    RecordNotFound {
        /// The kind of record (e.g. "contract").
        entity: String,
        /// The key that was looked up.
        key: String,
    },

    /// A submitted form violated one or more field rules.
    #[error("Validation failed: {}", summarize(.errors))]
    Validation {
        /// Every violation found in the form.
        errors: Vec<FieldError>,
    },

    /// The database rejected a write because of a constraint.
    #[error("Constraint violation: {message}")]
    Constraint {
        /// The message reported by the database.
        message: String,
    },

    /// Any other storage failure.
    #[error("Database error: {0}")]
    Database(#[source] rusqlite::Error),

    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// A report template could not be loaded or rendered.
    #[error("Template error: {message}")]
    Template {
        /// A description of the template failure.
        message: String,
    },

    /// Environment settings were invalid.
    #[error("Invalid settings: {message}")]
    Settings {
        /// A description of the invalid setting.
        message: String,
    },

    /// A socket or file operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

fn summarize(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(|e| format!("{}: {}", e.field, e.message))
        .collect::<Vec<_>>()
        .join("; ")
}

impl AdminError {
    /// Shorthand for a [`AdminError::RecordNotFound`].
    pub fn not_found(entity: &str, key: impl ToString) -> Self {
        Self::RecordNotFound {
            entity: entity.to_string(),
            key: key.to_string(),
        }
    }

    /// Shorthand for a validation error on a single field.
    pub fn invalid(field: &str, message: impl Into<String>) -> Self {
        Self::Validation {
            errors: vec![FieldError::new(field, message)],
        }
    }
}

impl From<rusqlite::Error> for AdminError {
    fn from(error: rusqlite::Error) -> Self {
        if let rusqlite::Error::SqliteFailure(failure, message) = &error {
            if failure.code == rusqlite::ErrorCode::ConstraintViolation {
                return AdminError::Constraint {
                    message: message.clone().unwrap_or_else(|| failure.to_string()),
                };
            }
        }
        AdminError::Database(error)
    }
}

impl From<tera::Error> for AdminError {
    fn from(error: tera::Error) -> Self {
        // tera keeps the useful part of the message in the source chain
        let mut message = error.to_string();
        let mut source = std::error::Error::source(&error);
        while let Some(inner) = source {
            message.push_str(": ");
            message.push_str(&inner.to_string());
            source = inner.source();
        }
        AdminError::Template { message }
    }
}

/// A type alias for Results that return AdminError.
pub type AdminResult<T> = Result<T, AdminError>;
