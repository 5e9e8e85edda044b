//! Mapping of domain failures onto HTTP responses.
//!
//! Every error body has the shape `{"code": "...", "message": "..."}`.
//! Clients branch on `code`; `message` is display text.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::Json;
use axum::response::{IntoResponse, Response};
use notely_auth::AuthError;
use notely_core::error::{ErrorCode, NotelyError};
use serde::Serialize;
use tracing::{error, warn};

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: ErrorCode,
    pub message: String,
}

#[derive(Debug)]
pub enum ApiError {
    Domain(NotelyError),
    /// No usable `Authorization: Bearer` header.
    MissingToken,
    /// A bearer token was presented but failed verification.
    InvalidToken(AuthError),
    /// The request body was not acceptable JSON.
    BadRequest(String),
}

impl From<NotelyError> for ApiError {
    fn from(err: NotelyError) -> Self {
        ApiError::Domain(err)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl ApiError {
    fn code_and_message(self) -> (ErrorCode, String) {
        match self {
            ApiError::Domain(err) if err.is_internal() => {
                error!(error = %err, "request failed");
                (ErrorCode::InternalError, "Internal server error".into())
            }
            ApiError::Domain(err) => (err.code(), err.to_string()),
            ApiError::MissingToken => (ErrorCode::MissingToken, "Access token required".into()),
            ApiError::InvalidToken(err) => {
                warn!(error = %err, "rejected bearer token");
                (ErrorCode::InvalidToken, "Invalid or expired token".into())
            }
            ApiError::BadRequest(detail) => (ErrorCode::ValidationError, detail),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (code, message) = self.code_and_message();
        let status =
            StatusCode::from_u16(code.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(ErrorBody { code, message })).into_response()
    }
}
