//! Request and response bodies for the authentication endpoints

use std::borrow::Cow;

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::api::types::FieldRules;
use crate::domain::user::{
    validate_email, validate_name, validate_password, validate_password_confirmation,
    UserValidationError, ValidationErrorSet,
};
use crate::infrastructure::user::{AuthenticateUserQuery, CreateUserCommand};

fn into_validation_error(result: Result<(), UserValidationError>) -> Result<(), ValidationError> {
    result.map_err(|e| {
        let mut error = ValidationError::new("invalid");
        error.message = Some(Cow::Owned(e.to_string()));
        error
    })
}

fn name_rules(value: &str) -> Result<(), ValidationError> {
    into_validation_error(validate_name(value))
}

fn email_rules(value: &str) -> Result<(), ValidationError> {
    into_validation_error(validate_email(value))
}

fn password_rules(value: &str) -> Result<(), ValidationError> {
    into_validation_error(validate_password(value))
}

/// Registration body
///
/// Absent fields decode as empty strings and are reported by the `required` rule.
#[derive(Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserRequest {
    #[serde(default)]
    #[validate(custom(function = "name_rules"))]
    pub name: String,
    #[serde(default)]
    #[validate(custom(function = "email_rules"))]
    pub email: String,
    #[serde(default)]
    #[validate(custom(function = "password_rules"))]
    pub password: String,
    #[serde(default)]
    pub password_confirmation: String,
}

impl FieldRules for CreateUserRequest {
    fn cross_field_errors(&self, errors: &mut ValidationErrorSet) {
        if let Err(e) = validate_password_confirmation(&self.password, &self.password_confirmation)
        {
            errors.add("passwordConfirmation", e.to_string());
        }
    }
}

impl From<CreateUserRequest> for CreateUserCommand {
    fn from(request: CreateUserRequest) -> Self {
        Self {
            name: request.name,
            email: request.email,
            password: request.password,
        }
    }
}

/// Login body
#[derive(Deserialize, Validate)]
pub struct AuthenticateUserRequest {
    #[serde(default)]
    #[validate(custom(function = "email_rules"))]
    pub email: String,
    #[serde(default)]
    #[validate(custom(function = "password_rules"))]
    pub password: String,
}

impl FieldRules for AuthenticateUserRequest {}

impl From<AuthenticateUserRequest> for AuthenticateUserQuery {
    fn from(request: AuthenticateUserRequest) -> Self {
        Self {
            email: request.email,
            password: request.password,
        }
    }
}

/// Body returned when a token is issued
#[derive(Debug, Serialize, Deserialize)]
pub struct TokenResponse {
    pub token: String,
}
