//! Field validation for the user form.
//!
//! Runs before anything reaches the service: a form that fails here never
//! produces a store operation.

use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

use crate::constants::{
    EMAIL_MAX_CHARS, ERR_EMAIL_INVALID, ERR_EMAIL_REQUIRED, ERR_EMAIL_TOO_LONG,
    ERR_NAME_REQUIRED, ERR_NAME_TOO_LONG, ERR_NAME_TOO_SHORT, NAME_MAX_CHARS, NAME_MIN_CHARS,
};

/// Local part, then dot-separated labels of at most 63 characters
/// that neither start nor end with a hyphen.
static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+",
        r"@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?",
        r"(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)+$",
    ))
    .expect("compile email regex")
});

/// Form field a validation message belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Name,
    Email,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: Field,
    pub message: &'static str,
}

/// All field errors of one submission, at most one per field
#[derive(Error, Debug, Clone, Default, PartialEq, Eq)]
#[error("{} invalid field(s)", .errors.len())]
pub struct ValidationErrors {
    pub errors: Vec<FieldError>,
}

impl ValidationErrors {
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn message_for(&self, field: Field) -> Option<&'static str> {
        self.errors
            .iter()
            .find(|e| e.field == field)
            .map(|e| e.message)
    }

    fn push(&mut self, field: Field, message: Option<&'static str>) {
        if let Some(message) = message {
            self.errors.push(FieldError { field, message });
        }
    }
}

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_REGEX.is_match(email)
}

/// Check a name; lengths count characters of the trimmed value
pub fn check_name(name: &str) -> Option<&'static str> {
    let name = name.trim();
    let len = name.chars().count();

    if name.is_empty() {
        Some(ERR_NAME_REQUIRED)
    } else if len < NAME_MIN_CHARS {
        Some(ERR_NAME_TOO_SHORT)
    } else if len > NAME_MAX_CHARS {
        Some(ERR_NAME_TOO_LONG)
    } else {
        None
    }
}

pub fn check_email(email: &str) -> Option<&'static str> {
    let email = email.trim();

    if email.is_empty() {
        Some(ERR_EMAIL_REQUIRED)
    } else if email.chars().count() > EMAIL_MAX_CHARS {
        Some(ERR_EMAIL_TOO_LONG)
    } else if !is_valid_email(email) {
        Some(ERR_EMAIL_INVALID)
    } else {
        None
    }
}

/// Validate a name/email pair as submitted by the form
pub fn validate_user_form(name: &str, email: &str) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::default();
    errors.push(Field::Name, check_name(name));
    errors.push(Field::Email, check_email(email));

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
