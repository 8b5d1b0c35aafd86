//! User validation utilities
//!
//! Every field is checked against an ordered list of rules. The first rule
//! that fails decides the message reported for that field.

use std::collections::BTreeMap;

use serde::Serialize;
use thiserror::Error;
use validator::ValidateEmail;

/// Message reported under `email` when the address is already registered
pub const EMAIL_TAKEN_MESSAGE: &str = "The email has already been taken";

/// Message reported under both `email` and `password` when a login is rejected
pub const CREDENTIALS_MISMATCH_MESSAGE: &str = "These credentials do not match our records.";

/// Errors that can occur during user validation
#[derive(Debug, Error, Clone, PartialEq)]
pub enum UserValidationError {
    #[error("The {0} field is required.")]
    Required(&'static str),

    #[error("The {0} field must only contain letters.")]
    NotAlphabetic(&'static str),

    #[error("The {0} field must be a valid email address.")]
    InvalidEmail(&'static str),

    #[error("The {0} field must be at least {1} characters.")]
    TooShort(&'static str, usize),

    #[error("The {0} field must not be greater than {1} characters.")]
    TooLong(&'static str, usize),

    #[error(
        "The {0} field must be at least 8 characters and contain an uppercase letter, a lowercase letter, a number and a symbol."
    )]
    WeakPassword(&'static str),

    #[error("The {0} field must match {1}.")]
    Mismatch(&'static str, &'static str),
}

const MIN_STRONG_PASSWORD_LENGTH: usize = 8;

/// A single declarative check applied to a field value
#[derive(Debug, Clone, Copy)]
enum Rule {
    Required,
    Alpha,
    Email,
    Min(usize),
    Max(usize),
    StrongPassword,
}

impl Rule {
    fn check(self, field: &'static str, value: &str) -> Result<(), UserValidationError> {
        let passed = match self {
            Rule::Required => !value.trim().is_empty(),
            Rule::Alpha => value.chars().all(char::is_alphabetic),
            Rule::Email => value.to_owned().validate_email(),
            Rule::Min(min) => value.chars().count() >= min,
            Rule::Max(max) => value.chars().count() <= max,
            Rule::StrongPassword => is_strong_password(value),
        };

        if passed {
            return Ok(());
        }

        Err(match self {
            Rule::Required => UserValidationError::Required(field),
            Rule::Alpha => UserValidationError::NotAlphabetic(field),
            Rule::Email => UserValidationError::InvalidEmail(field),
            Rule::Min(min) => UserValidationError::TooShort(field, min),
            Rule::Max(max) => UserValidationError::TooLong(field, max),
            Rule::StrongPassword => UserValidationError::WeakPassword(field),
        })
    }
}

const NAME_RULES: &[Rule] = &[Rule::Required, Rule::Alpha, Rule::Min(3), Rule::Max(50)];
const EMAIL_RULES: &[Rule] = &[Rule::Required, Rule::Email, Rule::Min(5), Rule::Max(100)];
const PASSWORD_RULES: &[Rule] = &[Rule::Required, Rule::StrongPassword, Rule::Max(50)];

fn apply(field: &'static str, value: &str, rules: &[Rule]) -> Result<(), UserValidationError> {
    rules.iter().try_for_each(|rule| rule.check(field, value))
}

fn is_strong_password(value: &str) -> bool {
    value.chars().count() >= MIN_STRONG_PASSWORD_LENGTH
        && value.chars().any(char::is_uppercase)
        && value.chars().any(char::is_lowercase)
        && value.chars().any(|c| c.is_ascii_digit())
        && value
            .chars()
            .any(|c| !c.is_alphanumeric() && !c.is_whitespace())
}

/// Validate a display name
///
/// Rules:
/// - Required
/// - Letters only
/// - Between 3 and 50 characters
pub fn validate_name(name: &str) -> Result<(), UserValidationError> {
    apply("name", name, NAME_RULES)
}

/// Validate an email address
///
/// Rules:
/// - Required
/// - Well-formed address
/// - Between 5 and 100 characters
pub fn validate_email(email: &str) -> Result<(), UserValidationError> {
    apply("email", email, EMAIL_RULES)
}

/// Validate a password
///
/// Rules:
/// - Required
/// - Strong: upper and lower case letters, a digit and a symbol, 8 characters minimum
/// - At most 50 characters
pub fn validate_password(password: &str) -> Result<(), UserValidationError> {
    apply("password", password, PASSWORD_RULES)
}

/// Validate that the confirmation is present and equal to the password
pub fn validate_password_confirmation(
    password: &str,
    confirmation: &str,
) -> Result<(), UserValidationError> {
    Rule::Required.check("password confirmation", confirmation)?;

    if password != confirmation {
        return Err(UserValidationError::Mismatch(
            "password confirmation",
            "password",
        ));
    }

    Ok(())
}

/// Field-keyed validation messages
///
/// Serialized as a flat JSON object in key order. Each field keeps the first
/// message it was given.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrorSet(BTreeMap<String, String>);

impl ValidationErrorSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set with a single field message
    pub fn single(field: impl Into<String>, message: impl Into<String>) -> Self {
        let mut set = Self::new();
        set.add(field, message);
        set
    }

    /// Record a message for a field unless the field already has one
    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.entry(field.into()).or_insert_with(|| message.into());
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}
