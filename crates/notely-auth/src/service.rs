//! Authentication service: login orchestration.

use notely_core::error::{NotelyError, NotelyResult};
use notely_core::models::identity::Claims;
use notely_core::repository::{TenantRepository, UserRepository};
use tracing::{debug, info};

use crate::config::AuthConfig;
use crate::error::AuthError;
use crate::password;
use crate::token;

/// Input for the login flow.
#[derive(Debug)]
pub struct LoginInput {
    pub email: String,
    pub password: String,
}

/// Successful login result.
#[derive(Debug)]
pub struct LoginOutput {
    /// Signed JWT access token.
    pub access_token: String,
    /// Access token lifetime in seconds.
    pub expires_in: u64,
    /// Identity embedded in the token.
    pub claims: Claims,
}

/// Authentication service.
///
/// Generic over repository implementations so that the auth layer
/// has no dependency on the database crate.
pub struct AuthService<U: UserRepository, T: TenantRepository> {
    user_repo: U,
    tenant_repo: T,
    config: AuthConfig,
}

impl<U: UserRepository, T: TenantRepository> AuthService<U, T> {
    pub fn new(user_repo: U, tenant_repo: T, config: AuthConfig) -> Self {
        Self {
            user_repo,
            tenant_repo,
            config,
        }
    }

    pub fn config(&self) -> &AuthConfig {
        &self.config
    }

    /// Authenticate by email + password and issue an access token.
    ///
    /// Unknown email and wrong password fail identically.
    pub async fn login(&self, input: LoginInput) -> NotelyResult<LoginOutput> {
        let user = match self.user_repo.get_by_email(&input.email).await {
            Ok(u) => u,
            Err(NotelyError::NotFound { .. }) => {
                debug!(email = %input.email, "login for unknown email");
                return Err(AuthError::InvalidCredentials.into());
            }
            Err(e) => return Err(e),
        };

        let valid = password::verify_password(
            &input.password,
            &user.password_hash,
            self.config.pepper.as_deref(),
        )?;
        if !valid {
            debug!(user_id = %user.id, "login with wrong password");
            return Err(AuthError::InvalidCredentials.into());
        }

        let tenant = self.tenant_repo.get_by_id(user.tenant_id).await?;

        let claims = Claims {
            user_id: user.id,
            tenant_id: tenant.id,
            role: user.role,
            tenant_slug: tenant.slug,
        };
        let access_token = token::issue_access_token(&claims, &self.config)?;

        info!(user_id = %user.id, tenant = %claims.tenant_slug, "user logged in");

        Ok(LoginOutput {
            access_token,
            expires_in: self.config.access_token_lifetime_secs,
            claims,
        })
    }

    /// Verify a bearer token and return the caller's identity.
    pub fn authenticate(&self, access_token: &str) -> Result<Claims, AuthError> {
        token::validate_access_token(access_token, &self.config)
    }
}
