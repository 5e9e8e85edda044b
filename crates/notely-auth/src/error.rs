//! Authentication error types.

use notely_core::error::NotelyError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("token has expired")]
    TokenExpired,

    #[error("invalid token: {0}")]
    TokenInvalid(String),

    #[error("cryptography error: {0}")]
    Crypto(String),
}

impl AuthError {
    /// True for failures of a presented bearer token, as opposed to a
    /// failed login.
    pub fn is_token_error(&self) -> bool {
        matches!(self, AuthError::TokenExpired | AuthError::TokenInvalid(_))
    }
}

impl From<AuthError> for NotelyError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::InvalidCredentials
            | AuthError::TokenExpired
            | AuthError::TokenInvalid(_) => NotelyError::AuthenticationFailed {
                reason: err.to_string(),
            },
            AuthError::Crypto(msg) => NotelyError::Crypto(msg),
        }
    }
}
