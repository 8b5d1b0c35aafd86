//! Custom JSON extractor that returns errors as JSON

use axum::{
    extract::{rejection::JsonRejection, FromRequest, Request},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json as AxumJson,
};
use serde::de::DeserializeOwned;

use super::error::{ApiError, ApiErrorType};

/// Wrapper around `axum::Json` whose rejections use the API error format
///
/// Bodies that are not valid JSON, or that do not fit the target type, are a
/// 400 rather than axum's default 422, which is reserved for field rules.
#[derive(Debug, Clone, Copy, Default)]
pub struct Json<T>(pub T);

impl<S, T> FromRequest<S> for Json<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match AxumJson::<T>::from_request(req, state).await {
            Ok(AxumJson(value)) => Ok(Json(value)),
            Err(rejection) => Err(rejection_to_error(&rejection)),
        }
    }
}

fn rejection_to_error(rejection: &JsonRejection) -> ApiError {
    let (status, message) = match rejection {
        JsonRejection::JsonDataError(err) => (
            StatusCode::BAD_REQUEST,
            format!("Invalid JSON data: {}", err.body_text()),
        ),
        JsonRejection::JsonSyntaxError(err) => (
            StatusCode::BAD_REQUEST,
            format!("Invalid JSON syntax: {}", err.body_text()),
        ),
        JsonRejection::MissingJsonContentType(_) => (
            StatusCode::UNSUPPORTED_MEDIA_TYPE,
            "Missing Content-Type header. Expected 'application/json'.".to_string(),
        ),
        JsonRejection::BytesRejection(err) => (
            rejection.status(),
            format!("Failed to read request body: {}", err.body_text()),
        ),
        _ => (StatusCode::BAD_REQUEST, "Invalid JSON request".to_string()),
    };

    ApiError::new(status, ApiErrorType::InvalidRequestError, message).with_code("json_parse_error")
}

impl<T> IntoResponse for Json<T>
where
    T: serde::Serialize,
{
    fn into_response(self) -> Response {
        AxumJson(self.0).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    struct Payload {
        name: String,
    }

    fn json_request(body: &'static str) -> Request {
        Request::builder()
            .method("POST")
            .uri("/")
            .header("content-type", "application/json")
            .body(Body::from(body))
            .unwrap()
    }

    #[tokio::test]
    async fn test_valid_body() {
        let Json(payload) = Json::<Payload>::from_request(json_request(r#"{"name":"Alice"}"#), &())
            .await
            .unwrap();
        assert_eq!(payload.name, "Alice");
    }

    #[tokio::test]
    async fn test_syntax_error_is_400() {
        let err = Json::<Payload>::from_request(json_request("{not json"), &())
            .await
            .unwrap_err();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_type_mismatch_is_400() {
        let err = Json::<Payload>::from_request(json_request(r#"{"name":5}"#), &())
            .await
            .unwrap_err();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_missing_content_type_is_415() {
        let request = Request::builder()
            .method("POST")
            .uri("/")
            .body(Body::from(r#"{"name":"Alice"}"#))
            .unwrap();

        let err = Json::<Payload>::from_request(request, &()).await.unwrap_err();
        assert_eq!(err.status, StatusCode::UNSUPPORTED_MEDIA_TYPE);
    }
}
