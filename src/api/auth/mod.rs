//! Authentication API endpoints
//!
//! Registration and credential verification, both answering with a bearer
//! token on success.

mod requests;

use axum::{extract::State, http::StatusCode, routing::post, Router};

use crate::api::state::AppState;
use crate::api::types::{ApiError, Json, ValidatedJson};
use crate::infrastructure::observability::record_auth_outcome;
use crate::infrastructure::user::{AuthenticationOutcome, CreateUserOutcome};

pub use requests::{AuthenticateUserRequest, CreateUserRequest, TokenResponse};

/// Create the authentication router
pub fn create_auth_router() -> Router<AppState> {
    Router::new()
        .route("/create-user", post(create_user))
        .route("/authenticate-user", post(authenticate_user))
}

/// Register an account
///
/// POST /api/v1/auth/create-user
///
/// 201 with a token, or 422 with the failing fields (including a taken email).
pub async fn create_user(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<CreateUserRequest>,
) -> Result<(StatusCode, Json<TokenResponse>), ApiError> {
    let outcome = state.create_user.execute(request.into()).await.map_err(|e| {
        record_auth_outcome("create_user", "error");
        ApiError::from(e)
    })?;

    match outcome {
        CreateUserOutcome::Created(issued) => {
            record_auth_outcome("create_user", "created");
            Ok((
                StatusCode::CREATED,
                Json(TokenResponse {
                    token: issued.token,
                }),
            ))
        }
        CreateUserOutcome::Rejected(errors) => {
            record_auth_outcome("create_user", "rejected");
            Err(ApiError::unprocessable(errors))
        }
    }
}

/// Verify credentials
///
/// POST /api/v1/auth/authenticate-user
///
/// 200 with a token, or 401 naming both fields when the credentials do not match.
pub async fn authenticate_user(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<AuthenticateUserRequest>,
) -> Result<Json<TokenResponse>, ApiError> {
    let outcome = state
        .authenticate_user
        .execute(request.into())
        .await
        .map_err(|e| {
            record_auth_outcome("authenticate_user", "error");
            ApiError::from(e)
        })?;

    match outcome {
        AuthenticationOutcome::Authenticated(issued) => {
            record_auth_outcome("authenticate_user", "authenticated");
            Ok(Json(TokenResponse {
                token: issued.token,
            }))
        }
        AuthenticationOutcome::Rejected => {
            record_auth_outcome("authenticate_user", "rejected");
            Err(ApiError::credentials_mismatch())
        }
    }
}
