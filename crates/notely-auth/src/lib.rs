//! Notely Auth: password verification plus JWT access token issuance
//! and validation.

pub mod config;
pub mod error;
pub mod password;
pub mod service;
pub mod token;

pub use config::{AuthConfig, JwtKeys};
pub use error::AuthError;
pub use service::{AuthService, LoginInput, LoginOutput};
pub use token::AccessTokenClaims;
