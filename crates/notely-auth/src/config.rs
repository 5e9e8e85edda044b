//! Authentication configuration.

/// Key material used to sign and verify access tokens.
#[derive(Clone)]
pub enum JwtKeys {
    /// Shared secret, tokens are signed with HS256.
    Hmac { secret: String },
    /// PEM-encoded Ed25519 key pair, tokens are signed with EdDSA.
    Ed25519 {
        private_pem: String,
        public_pem: String,
    },
}

impl std::fmt::Debug for JwtKeys {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            JwtKeys::Hmac { .. } => f.write_str("JwtKeys::Hmac(..)"),
            JwtKeys::Ed25519 { .. } => f.write_str("JwtKeys::Ed25519(..)"),
        }
    }
}

/// Configuration for the authentication service.
#[derive(Debug, Clone)]
pub struct AuthConfig {
    pub keys: JwtKeys,
    /// Access token lifetime in seconds (default: 3600 = 1 hour).
    pub access_token_lifetime_secs: u64,
    /// JWT issuer (`iss` claim).
    pub jwt_issuer: String,
    /// Optional pepper prepended to passwords before Argon2id verification.
    /// Must match the pepper the user repository hashes with.
    pub pepper: Option<String>,
}

impl AuthConfig {
    pub fn new(keys: JwtKeys) -> Self {
        Self {
            keys,
            access_token_lifetime_secs: 3600,
            jwt_issuer: "notely".into(),
            pepper: None,
        }
    }

    /// Convenience constructor for the HS256 setup.
    pub fn with_secret(secret: impl Into<String>) -> Self {
        Self::new(JwtKeys::Hmac {
            secret: secret.into(),
        })
    }
}
