//! JSON extractor that applies field rules before the handler runs

use axum::extract::{FromRequest, Request};
use serde::de::DeserializeOwned;
use validator::{Validate, ValidationErrors};

use crate::domain::user::ValidationErrorSet;

use super::error::ApiError;
use super::json::Json;

/// Request bodies with per-field rules
///
/// `Validate` covers single-field rules; `cross_field_errors` adds checks that
/// compare fields with each other.
pub trait FieldRules: Validate {
    fn cross_field_errors(&self, _errors: &mut ValidationErrorSet) {}

    /// First failing message per field
    fn field_errors(&self) -> ValidationErrorSet {
        let mut errors = match self.validate() {
            Ok(()) => ValidationErrorSet::new(),
            Err(e) => to_error_set(&e),
        };
        self.cross_field_errors(&mut errors);
        errors
    }
}

/// Flatten `validator` output into one message per field
pub fn to_error_set(errors: &ValidationErrors) -> ValidationErrorSet {
    let mut set = ValidationErrorSet::new();

    for (field, field_errors) in errors.field_errors() {
        if let Some(first) = field_errors.first() {
            let message = first
                .message
                .as_ref()
                .map(|m| m.to_string())
                .unwrap_or_else(|| first.code.to_string());
            set.add(field.to_string(), message);
        }
    }

    set
}

/// Decodes JSON and rejects with 422 when any field rule fails
#[derive(Debug, Clone)]
pub struct ValidatedJson<T>(pub T);

impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + FieldRules,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await?;

        let errors = value.field_errors();
        if !errors.is_empty() {
            return Err(ApiError::unprocessable(errors));
        }

        Ok(ValidatedJson(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::borrow::Cow;
    use validator::ValidationError;

    #[derive(Validate)]
    struct Sample {
        #[validate(length(min = 3, message = "too short"))]
        name: String,
        #[validate(custom(function = "always_fails"))]
        code: String,
    }

    fn always_fails(_value: &str) -> Result<(), ValidationError> {
        let mut error = ValidationError::new("invalid");
        error.message = Some(Cow::Borrowed("always fails"));
        Err(error)
    }

    impl FieldRules for Sample {}

    #[test]
    fn test_field_errors_use_messages() {
        let sample = Sample {
            name: "ab".to_string(),
            code: String::new(),
        };

        let errors = sample.field_errors();
        assert_eq!(errors.get("name"), Some("too short"));
        assert_eq!(errors.get("code"), Some("always fails"));
    }

    #[test]
    fn test_code_used_without_message() {
        let mut errors = ValidationErrors::new();
        errors.add("field", ValidationError::new("some_code"));

        assert_eq!(to_error_set(&errors).get("field"), Some("some_code"));
    }
}
