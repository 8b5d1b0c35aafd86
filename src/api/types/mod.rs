//! Shared request and response types

pub mod error;
pub mod json;
pub mod validated;

pub use error::{ApiError, ApiErrorBody, ApiErrorResponse, ApiErrorType};
pub use json::Json;
pub use validated::{FieldRules, ValidatedJson};
