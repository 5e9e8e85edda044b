//! Error types for the Notely system.

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum NotelyError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: String, id: String },

    #[error("Entity already exists: {entity}")]
    AlreadyExists { entity: String },

    #[error("Authentication failed: {reason}")]
    AuthenticationFailed { reason: String },

    #[error("Authorization denied: {reason}")]
    AuthorizationDenied { reason: String },

    #[error("Free plan note limit reached ({limit} notes). Please upgrade your subscription.")]
    QuotaExceeded { limit: u64 },

    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Database error: {0}")]
    Database(String),

    #[error("Cryptography error: {0}")]
    Crypto(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type NotelyResult<T> = Result<T, NotelyError>;

impl NotelyError {
    pub fn not_found(entity: &str, id: impl ToString) -> Self {
        Self::NotFound {
            entity: entity.into(),
            id: id.to_string(),
        }
    }

    pub fn denied(reason: impl Into<String>) -> Self {
        Self::AuthorizationDenied {
            reason: reason.into(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Machine-readable code reported to API clients.
    pub fn code(&self) -> ErrorCode {
        match self {
            NotelyError::NotFound { .. } => ErrorCode::NotFound,
            NotelyError::AlreadyExists { .. } => ErrorCode::Conflict,
            NotelyError::AuthenticationFailed { .. } => ErrorCode::InvalidCredentials,
            NotelyError::AuthorizationDenied { .. } => ErrorCode::AccessDenied,
            NotelyError::QuotaExceeded { .. } => ErrorCode::QuotaExceeded,
            NotelyError::Validation { .. } => ErrorCode::ValidationError,
            NotelyError::Database(_) | NotelyError::Crypto(_) | NotelyError::Internal(_) => {
                ErrorCode::InternalError
            }
        }
    }

    /// True for failures the caller cannot fix (storage, crypto, bugs).
    pub fn is_internal(&self) -> bool {
        self.code() == ErrorCode::InternalError
    }
}

/// Structured error code carried in every API error body.
///
/// Clients branch on this value; the accompanying message is for display
/// only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    ValidationError,
    InvalidCredentials,
    MissingToken,
    InvalidToken,
    AccessDenied,
    QuotaExceeded,
    NotFound,
    Conflict,
    InternalError,
}

impl ErrorCode {
    pub fn status_code(&self) -> u16 {
        match self {
            ErrorCode::ValidationError => 400,
            ErrorCode::InvalidCredentials | ErrorCode::MissingToken => 401,
            ErrorCode::InvalidToken | ErrorCode::AccessDenied | ErrorCode::QuotaExceeded => 403,
            ErrorCode::NotFound => 404,
            ErrorCode::Conflict => 409,
            ErrorCode::InternalError => 500,
        }
    }
}
