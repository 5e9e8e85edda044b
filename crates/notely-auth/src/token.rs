//! JWT access token issuance and verification.

use chrono::Utc;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use notely_core::models::identity::Claims;
use notely_core::models::user::Role;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::{AuthConfig, JwtKeys};
use crate::error::AuthError;

/// JWT claims embedded in every access token.
///
/// Field names are camelCase on the wire so that browser clients can
/// read `userId`, `tenantId`, `role` and `tenantSlug` directly from the
/// payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessTokenClaims {
    pub user_id: Uuid,
    pub tenant_id: Uuid,
    /// Decoding fails for any role outside the closed [`Role`] set.
    pub role: Role,
    pub tenant_slug: String,
    /// Issuer.
    pub iss: String,
    /// Issued-at (Unix timestamp).
    pub iat: i64,
    /// Expiration (Unix timestamp).
    pub exp: i64,
    /// Unique token ID.
    pub jti: String,
}

impl AccessTokenClaims {
    pub fn identity(&self) -> Claims {
        Claims {
            user_id: self.user_id,
            tenant_id: self.tenant_id,
            role: self.role,
            tenant_slug: self.tenant_slug.clone(),
        }
    }
}

fn algorithm(keys: &JwtKeys) -> Algorithm {
    match keys {
        JwtKeys::Hmac { .. } => Algorithm::HS256,
        JwtKeys::Ed25519 { .. } => Algorithm::EdDSA,
    }
}

fn encoding_key(keys: &JwtKeys) -> Result<EncodingKey, AuthError> {
    match keys {
        JwtKeys::Hmac { secret } => Ok(EncodingKey::from_secret(secret.as_bytes())),
        JwtKeys::Ed25519 { private_pem, .. } => EncodingKey::from_ed_pem(private_pem.as_bytes())
            .map_err(|e| AuthError::Crypto(format!("bad private key: {e}"))),
    }
}

fn decoding_key(keys: &JwtKeys) -> Result<DecodingKey, AuthError> {
    match keys {
        JwtKeys::Hmac { secret } => Ok(DecodingKey::from_secret(secret.as_bytes())),
        JwtKeys::Ed25519 { public_pem, .. } => DecodingKey::from_ed_pem(public_pem.as_bytes())
            .map_err(|e| AuthError::Crypto(format!("bad public key: {e}"))),
    }
}

fn sign(claims: &AccessTokenClaims, config: &AuthConfig) -> Result<String, AuthError> {
    let key = encoding_key(&config.keys)?;
    let header = Header::new(algorithm(&config.keys));
    jsonwebtoken::encode(&header, claims, &key)
        .map_err(|e| AuthError::Crypto(format!("JWT encode: {e}")))
}

/// Issue a signed access token for the given identity.
pub fn issue_access_token(identity: &Claims, config: &AuthConfig) -> Result<String, AuthError> {
    let now = Utc::now().timestamp();
    let lifetime = i64::try_from(config.access_token_lifetime_secs).unwrap_or(i64::MAX);
    let claims = AccessTokenClaims {
        user_id: identity.user_id,
        tenant_id: identity.tenant_id,
        role: identity.role,
        tenant_slug: identity.tenant_slug.clone(),
        iss: config.jwt_issuer.clone(),
        iat: now,
        exp: now.saturating_add(lifetime),
        jti: Uuid::new_v4().to_string(),
    };
    sign(&claims, config)
}

/// Decode and verify an access token: signature, algorithm, expiry and
/// issuer.
pub fn decode_access_token(
    token: &str,
    config: &AuthConfig,
) -> Result<AccessTokenClaims, AuthError> {
    let key = decoding_key(&config.keys)?;

    let mut validation = Validation::new(algorithm(&config.keys));
    validation.set_issuer(&[&config.jwt_issuer]);
    validation.set_required_spec_claims(&["exp", "iat", "iss"]);

    jsonwebtoken::decode::<AccessTokenClaims>(token, &key, &validation)
        .map(|data| data.claims)
        .map_err(|e| match e.kind() {
            ErrorKind::ExpiredSignature => AuthError::TokenExpired,
            _ => AuthError::TokenInvalid(e.to_string()),
        })
}

/// Validate a bearer token and return the caller's identity.
///
/// Stateless: no database lookup is performed, so a token stays valid
/// until it expires even if the user's role changes.
pub fn validate_access_token(token: &str, config: &AuthConfig) -> Result<Claims, AuthError> {
    decode_access_token(token, config).map(|c| c.identity())
}
