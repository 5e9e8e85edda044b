//! Server configuration from command-line flags and `NOTELY_*`
//! environment variables.

use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use clap::Args;
use notely_auth::{AuthConfig, JwtKeys};
use notely_db::DbConfig;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error(
        "no token signing key configured: set NOTELY_JWT_SECRET or both \
         NOTELY_JWT_PRIVATE_KEY_FILE and NOTELY_JWT_PUBLIC_KEY_FILE"
    )]
    MissingKeys,

    #[error("Ed25519 signing needs both a private and a public key file")]
    IncompleteKeyPair,

    #[error("failed to read key file {path}: {source}")]
    ReadKey {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Upper bound for `--token-ttl-secs` (one year).
pub const MAX_TOKEN_TTL_SECS: u64 = 365 * 24 * 60 * 60;

/// Runtime settings shared by every subcommand.
#[derive(Args, Debug, Clone)]
pub struct ServerConfig {
    /// Address the HTTP listener binds to.
    #[arg(long, env = "NOTELY_BIND", default_value = "127.0.0.1:5000")]
    pub bind: SocketAddr,

    /// SurrealDB endpoint (`mem://` or `ws://host:port`).
    #[arg(long, env = "NOTELY_DB_URL", default_value = "mem://")]
    pub db_url: String,

    #[arg(long, env = "NOTELY_DB_NAMESPACE", default_value = "notely")]
    pub db_namespace: String,

    #[arg(long, env = "NOTELY_DB_DATABASE", default_value = "main")]
    pub db_database: String,

    #[arg(long, env = "NOTELY_DB_USER")]
    pub db_user: Option<String>,

    #[arg(long, env = "NOTELY_DB_PASS", hide_env_values = true)]
    pub db_pass: Option<String>,

    /// Shared secret for HS256 token signing.
    #[arg(long, env = "NOTELY_JWT_SECRET", hide_env_values = true)]
    pub jwt_secret: Option<String>,

    /// PEM Ed25519 private key. Takes precedence over the shared secret.
    #[arg(long, env = "NOTELY_JWT_PRIVATE_KEY_FILE")]
    pub jwt_private_key_file: Option<PathBuf>,

    #[arg(long, env = "NOTELY_JWT_PUBLIC_KEY_FILE")]
    pub jwt_public_key_file: Option<PathBuf>,

    /// Access token lifetime in seconds.
    #[arg(
        long,
        env = "NOTELY_TOKEN_TTL_SECS",
        default_value_t = 3600,
        value_parser = clap::value_parser!(u64).range(1..=MAX_TOKEN_TTL_SECS)
    )]
    pub token_ttl_secs: u64,

    #[arg(long, env = "NOTELY_PASSWORD_PEPPER", hide_env_values = true)]
    pub password_pepper: Option<String>,

    /// Emit logs as JSON lines.
    #[arg(long, env = "NOTELY_LOG_JSON")]
    pub log_json: bool,
}

impl ServerConfig {
    pub fn db_config(&self) -> DbConfig {
        DbConfig {
            url: self.db_url.clone(),
            namespace: self.db_namespace.clone(),
            database: self.db_database.clone(),
            username: self.db_user.clone(),
            password: self.db_pass.clone(),
        }
    }

    /// Resolve signing keys and token settings.
    pub fn auth_config(&self) -> Result<AuthConfig, ConfigError> {
        let keys = match (&self.jwt_private_key_file, &self.jwt_public_key_file) {
            (Some(private), Some(public)) => JwtKeys::Ed25519 {
                private_pem: read_key(private)?,
                public_pem: read_key(public)?,
            },
            (Some(_), None) | (None, Some(_)) => return Err(ConfigError::IncompleteKeyPair),
            (None, None) => match self.jwt_secret.as_deref() {
                Some(secret) if !secret.is_empty() => JwtKeys::Hmac {
                    secret: secret.to_owned(),
                },
                _ => return Err(ConfigError::MissingKeys),
            },
        };

        let mut config = AuthConfig::new(keys);
        config.access_token_lifetime_secs = self.token_ttl_secs;
        config.pepper = self.password_pepper.clone();
        Ok(config)
    }
}

fn read_key(path: &Path) -> Result<String, ConfigError> {
    std::fs::read_to_string(path).map_err(|source| ConfigError::ReadKey {
        path: path.to_path_buf(),
        source,
    })
}
