use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{FromRequest, FromRequestParts};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use utoipa::ToSchema;

use crate::application::error::{AppError, AuthError};

/// Body of every non-2xx response.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorBody {
    pub error: String,
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Auth(AuthError::MissingToken | AuthError::InvalidCredentials) => {
                StatusCode::UNAUTHORIZED
            }
            AppError::Auth(AuthError::InvalidToken) => StatusCode::FORBIDDEN,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if let AppError::Internal(ref e) = self {
            tracing::error!(error = ?e, "internal error");
        }
        let body = ErrorBody {
            error: self.to_string(),
        };
        (status, axum::Json(body)).into_response()
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::validation(rejection.body_text())
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::validation(rejection.body_text())
    }
}

/// `axum::Json` whose rejections render as `{ "error": ... }`.
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct ApiJson<T>(pub T);

/// `axum::extract::Query` with the same error body as [`ApiJson`].
#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(AppError))]
pub struct ApiQuery<T>(pub T);

pub async fn not_found() -> AppError {
    AppError::not_found("Endpoint not found")
}

#[cfg(test)]
mod tests {
    use axum::body::to_bytes;

    use super::*;

    async fn assert_error(error: AppError, expected_status: StatusCode, expected_message: &str) {
        let resp = error.into_response();
        assert_eq!(resp.status(), expected_status);
        let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(json["error"], expected_message);
    }

    #[tokio::test]
    async fn client_errors_keep_their_message() {
        assert_error(
            AppError::validation("Rating must be an integer between 1 and 5."),
            StatusCode::BAD_REQUEST,
            "Rating must be an integer between 1 and 5.",
        )
        .await;
        assert_error(
            AppError::not_found("Place not found."),
            StatusCode::NOT_FOUND,
            "Place not found.",
        )
        .await;
        assert_error(
            AppError::conflict("Phone number already registered."),
            StatusCode::CONFLICT,
            "Phone number already registered.",
        )
        .await;
    }

    #[tokio::test]
    async fn auth_errors_split_between_401_and_403() {
        assert_error(
            AuthError::MissingToken.into(),
            StatusCode::UNAUTHORIZED,
            "Access denied. No token provided.",
        )
        .await;
        assert_error(
            AuthError::InvalidCredentials.into(),
            StatusCode::UNAUTHORIZED,
            "Invalid credentials.",
        )
        .await;
        assert_error(
            AuthError::InvalidToken.into(),
            StatusCode::FORBIDDEN,
            "Invalid or expired token.",
        )
        .await;
    }

    #[tokio::test]
    async fn bad_query_string_is_a_json_400() {
        #[derive(Debug, serde::Deserialize)]
        struct Params {
            #[allow(dead_code)]
            page: i64,
        }
        let req = axum::http::Request::builder()
            .uri("/search?page=first")
            .body(axum::body::Body::empty())
            .unwrap();
        let (mut parts, _) = req.into_parts();
        let err = match ApiQuery::<Params>::from_request_parts(&mut parts, &()).await {
            Ok(_) => panic!("query should not deserialize"),
            Err(e) => e,
        };
        assert!(matches!(err, AppError::Validation(_)));
        let resp = err.into_response();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert!(json["error"].as_str().is_some_and(|m| !m.is_empty()));
    }

    #[tokio::test]
    async fn internal_error_hides_its_cause() {
        assert_error(
            AppError::Internal(anyhow::anyhow!("disk I/O error at /var/data/reviews.db")),
            StatusCode::INTERNAL_SERVER_ERROR,
            "Internal server error.",
        )
        .await;
    }
}
