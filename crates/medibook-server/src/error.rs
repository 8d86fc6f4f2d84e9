//! HTTP error mapping.
//!
//! Every failure leaves the API as JSON with a `message` field. Client and
//! server errors also carry an `error` detail string.

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{FromRequest, FromRequestParts};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use medibook_core::MedibookError;
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{message}: {error}")]
    BadRequest { message: String, error: String },

    #[error("{0}")]
    NotFound(String),

    #[error("{message}: {error}")]
    Internal { message: String, error: String },
}

impl ApiError {
    pub fn bad_request(error: impl Into<String>) -> Self {
        ApiError::BadRequest {
            message: "Invalid request".into(),
            error: error.into(),
        }
    }

    pub fn internal(error: impl Into<String>) -> Self {
        ApiError::Internal {
            message: "Internal server error".into(),
            error: error.into(),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match self {
            ApiError::BadRequest { message, error } | ApiError::Internal { message, error } => {
                if status.is_server_error() {
                    tracing::error!(%error, "request failed");
                }
                json!({ "message": message, "error": error })
            }
            ApiError::NotFound(message) => json!({ "message": message }),
        };
        (status, Json(body)).into_response()
    }
}

impl From<MedibookError> for ApiError {
    fn from(e: MedibookError) -> Self {
        match e {
            MedibookError::Validation(detail) => ApiError::bad_request(detail),
            MedibookError::NotFound(message) => ApiError::NotFound(message),
            MedibookError::Internal(detail) => ApiError::internal(detail),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::bad_request(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::bad_request(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError::bad_request(rejection.body_text())
    }
}

impl From<tokio::task::JoinError> for ApiError {
    fn from(e: tokio::task::JoinError) -> Self {
        ApiError::internal(format!("worker task failed: {}", e))
    }
}

/// JSON body extractor whose rejections use [`ApiError`].
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct ApiJson<T>(pub T);

/// Path parameter extractor whose rejections use [`ApiError`].
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(ApiError))]
pub struct ApiPath<T>(pub T);

/// Query string extractor whose rejections use [`ApiError`].
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(ApiError))]
pub struct ApiQuery<T>(pub T);
