//! Request payload validation.
//!
//! Rules add messages per field; `finish` turns any collected message into
//! a 422 `AppError::Validation`.

use std::sync::OnceLock;

use regex::Regex;

use crate::error::{AppError, FieldErrors};

pub const MIN_PASSWORD_LEN: usize = 8;

#[derive(Default)]
pub struct Validator {
    errors: FieldErrors,
}

impl Validator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.errors
            .entry(field.to_string())
            .or_default()
            .push(message.into());
    }

    pub fn has(&self, field: &str) -> bool {
        self.errors.contains_key(field)
    }

    pub fn required(&mut self, field: &str, value: &str) -> &mut Self {
        if value.trim().is_empty() {
            self.add(field, format!("The {field} field is required."));
        }
        self
    }

    pub fn email(&mut self, field: &str, value: &str) -> &mut Self {
        if value.trim().is_empty() {
            self.add(field, format!("The {field} field is required."));
        } else if !is_valid_email(value) {
            self.add(field, format!("The {field} must be a valid email address."));
        }
        self
    }

    pub fn password(&mut self, field: &str, value: &str) -> &mut Self {
        if value.is_empty() {
            self.add(field, format!("The {field} field is required."));
        } else if value.chars().count() < MIN_PASSWORD_LEN {
            self.add(
                field,
                format!("The {field} must be at least {MIN_PASSWORD_LEN} characters."),
            );
        }
        self
    }

    pub fn confirmed(&mut self, field: &str, value: &str, confirmation: Option<&str>) -> &mut Self {
        if confirmation != Some(value) {
            self.add(field, format!("The {field} confirmation does not match."));
        }
        self
    }

    pub fn max_len(&mut self, field: &str, value: &str, max: usize) -> &mut Self {
        if value.chars().count() > max {
            self.add(field, format!("The {field} may not be greater than {max} characters."));
        }
        self
    }

    pub fn finish(&mut self) -> Result<(), AppError> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(AppError::Validation(std::mem::take(&mut self.errors)))
        }
    }
}

pub fn is_valid_email(email: &str) -> bool {
    static EMAIL_REGEX: OnceLock<Regex> = OnceLock::new();
    let regex = EMAIL_REGEX.get_or_init(|| {
        Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$")
            .expect("Failed to compile email regex")
    });
    email.len() <= 254 && regex.is_match(email)
}

/// Emails are stored and compared lowercase.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}
