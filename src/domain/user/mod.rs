//! User domain
//!
//! This module provides the identity record, the repository contract the
//! credential pipeline depends on, and the field rules used to validate
//! registration and login input.

mod entity;
mod repository;
mod validation;

pub use entity::{NewUser, User, UserId};
pub use repository::UserRepository;
pub use validation::{
    validate_email, validate_name, validate_password, validate_password_confirmation,
    UserValidationError, ValidationErrorSet, CREDENTIALS_MISMATCH_MESSAGE, EMAIL_TAKEN_MESSAGE,
};

#[cfg(test)]
pub use repository::MockUserRepository;
