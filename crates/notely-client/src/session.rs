//! An authenticated session: the bearer token plus what it says about
//! the caller.

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use notely_core::models::identity::Claims;
use notely_core::models::user::Role;
use serde::Deserialize;

use crate::error::ClientError;

#[derive(Deserialize)]
struct Payload {
    #[serde(flatten)]
    claims: Claims,
    exp: i64,
}

/// Returned by [`NotelyClient::login`](crate::NotelyClient::login) and
/// passed explicitly to every authenticated call.
///
/// The claims are read from the token payload without verifying the
/// signature. They are for display and routing decisions only; the
/// server re-verifies the token on every request.
#[derive(Debug, Clone)]
pub struct Session {
    token: String,
    claims: Claims,
    expires_at: i64,
}

impl Session {
    pub fn from_token(token: impl Into<String>) -> Result<Self, ClientError> {
        let token = token.into();
        let payload = token
            .split('.')
            .nth(1)
            .ok_or_else(|| ClientError::MalformedToken("expected three segments".into()))?;
        let bytes = URL_SAFE_NO_PAD
            .decode(payload.trim_end_matches('='))
            .map_err(|e| ClientError::MalformedToken(e.to_string()))?;
        let payload: Payload = serde_json::from_slice(&bytes)
            .map_err(|e| ClientError::MalformedToken(e.to_string()))?;

        Ok(Self {
            token,
            claims: payload.claims,
            expires_at: payload.exp,
        })
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn claims(&self) -> &Claims {
        &self.claims
    }

    pub fn tenant_slug(&self) -> &str {
        &self.claims.tenant_slug
    }

    pub fn is_admin(&self) -> bool {
        self.claims.role == Role::Admin
    }

    /// Expiry as a Unix timestamp.
    pub fn expires_at(&self) -> i64 {
        self.expires_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token_with(payload: &str) -> String {
        format!(
            "{}.{}.sig",
            URL_SAFE_NO_PAD.encode(r#"{"alg":"HS256","typ":"JWT"}"#),
            URL_SAFE_NO_PAD.encode(payload)
        )
    }

    #[test]
    fn reads_claims_from_payload() {
        let token = token_with(
            r#"{"userId":"6f1c8a5e-3d8b-4a55-9a9e-0c1d2e3f4a5b",
                "tenantId":"0b6f7c2e-1a2b-4c3d-8e9f-a0b1c2d3e4f5",
                "role":"ADMIN","tenantSlug":"acme","iss":"notely",
                "iat":1700000000,"exp":1700003600,"jti":"x"}"#,
        );
        let session = Session::from_token(token.clone()).unwrap();

        assert_eq!(session.token(), token);
        assert_eq!(session.tenant_slug(), "acme");
        assert!(session.is_admin());
        assert_eq!(session.expires_at(), 1_700_003_600);
    }

    #[test]
    fn rejects_non_jwt() {
        assert!(matches!(
            Session::from_token("opaque"),
            Err(ClientError::MalformedToken(_))
        ));
        assert!(Session::from_token(token_with(r#"{"role":"ADMIN"}"#)).is_err());
    }
}
