//! Declarative form validation.
//!
//! Forms carry their required fields as `Option`s so a missing field can be
//! reported next to every other violation instead of failing on the first.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::error::{AdminError, AdminResult, FieldError};

/// Maximum length of free-text columns.
pub const MAX_TEXT_LENGTH: usize = 255;

/// Collects field errors while a form is converted into a draft.
#[derive(Debug, Default)]
pub(crate) struct Validator {
    errors: Vec<FieldError>,
}

impl Validator {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn reject(&mut self, field: &str, message: impl Into<String>) {
        self.errors.push(FieldError::new(field, message));
    }

    /// Records an error when the value is missing. The returned default is
    /// never observed because [`Validator::finish`] fails first.
    pub(crate) fn required<T: Clone + Default>(&mut self, field: &str, value: &Option<T>) -> T {
        match value {
            Some(v) => v.clone(),
            None => {
                self.reject(field, "is required");
                T::default()
            }
        }
    }

    /// Like [`Validator::required`] but also rejects blank strings and
    /// enforces the text length limit.
    pub(crate) fn required_text(&mut self, field: &str, value: &Option<String>) -> String {
        match value.as_deref().map(str::trim) {
            Some(v) if !v.is_empty() => {
                self.max_length(field, Some(v));
                v.to_string()
            }
            _ => {
                self.reject(field, "is required");
                String::new()
            }
        }
    }

    /// Trims optional text, maps blanks to `None` and enforces the length
    /// limit.
    pub(crate) fn optional_text(&mut self, field: &str, value: &Option<String>) -> Option<String> {
        let value = value.as_deref().map(str::trim).filter(|v| !v.is_empty())?;
        self.max_length(field, Some(value));
        Some(value.to_string())
    }

    fn max_length(&mut self, field: &str, value: Option<&str>) {
        if let Some(v) = value {
            if v.chars().count() > MAX_TEXT_LENGTH {
                self.reject(
                    field,
                    format!("must not exceed {} characters", MAX_TEXT_LENGTH),
                );
            }
        }
    }

    pub(crate) fn non_negative_amount(&mut self, field: &str, value: &Option<Decimal>) -> Decimal {
        let amount = self.required(field, value);
        if amount.is_sign_negative() && !amount.is_zero() {
            self.reject(field, "must be zero or greater");
        }
        amount
    }

    pub(crate) fn positive_key(&mut self, field: &str, value: &Option<i64>) -> i64 {
        let key = self.required(field, value);
        if value.is_some() && key <= 0 {
            self.reject(field, "must be a positive number");
        }
        key
    }

    /// Checks that `end` is not before `start` when both were supplied.
    pub(crate) fn date_order(
        &mut self,
        end_field: &str,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) {
        if let (Some(start), Some(end)) = (start, end) {
            if end < start {
                self.reject(end_field, "must not be before the start date");
            }
        }
    }

    pub(crate) fn email(&mut self, field: &str, value: Option<&str>) {
        if let Some(v) = value {
            if !v.contains('@') {
                self.reject(field, "must be a valid email address");
            }
        }
    }

    /// Returns `Ok` when no violation was recorded.
    pub(crate) fn finish(self) -> AdminResult<()> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(AdminError::Validation {
                errors: self.errors,
            })
        }
    }
}
