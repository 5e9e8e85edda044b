//! Client error types.

use notely_core::error::ErrorCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The server answered with a structured error body.
    #[error("{message}")]
    Api {
        status: u16,
        code: ErrorCode,
        message: String,
    },

    /// The server answered with an error that is not in the
    /// `{code, message}` shape.
    #[error("unexpected response {status}: {body}")]
    UnexpectedResponse { status: u16, body: String },

    #[error("malformed access token: {0}")]
    MalformedToken(String),
}

impl ClientError {
    pub fn code(&self) -> Option<ErrorCode> {
        match self {
            ClientError::Api { code, .. } => Some(*code),
            _ => None,
        }
    }

    /// The tenant is at its plan's note cap; the caller should offer an
    /// upgrade.
    pub fn is_quota_exceeded(&self) -> bool {
        self.code() == Some(ErrorCode::QuotaExceeded)
    }

    /// The session token is missing, expired or rejected; the caller
    /// should log in again.
    pub fn is_session_expired(&self) -> bool {
        matches!(
            self.code(),
            Some(ErrorCode::MissingToken | ErrorCode::InvalidToken)
        )
    }
}
