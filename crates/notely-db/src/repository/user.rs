//! SurrealDB implementation of [`UserRepository`].
//!
//! Password hashing uses Argon2id with OWASP-recommended parameters
//! (memory: 19 MiB, iterations: 2, parallelism: 1). Salt is randomly
//! generated per hash. An optional pepper (server-side secret) can be
//! provided at construction time. Emails are stored trimmed and
//! lowercased.

use argon2::password_hash::SaltString;
use argon2::{Argon2, PasswordHasher};
use chrono::{DateTime, Utc};
use notely_core::error::{NotelyError, NotelyResult};
use notely_core::models::user::{CreateUser, Role, User};
use notely_core::repository::UserRepository;
use surrealdb::{Connection, Surreal};
use surrealdb_types::SurrealValue;
use uuid::Uuid;

use crate::error::{DbError, parse_uuid};

/// DB-side row struct for queries where the UUID is already known.
#[derive(Debug, SurrealValue)]
struct UserRow {
    tenant_id: String,
    email: String,
    password_hash: String,
    role: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// DB-side row struct that includes the record ID via `meta::id(id)`.
#[derive(Debug, SurrealValue)]
struct UserRowWithId {
    record_id: String,
    tenant_id: String,
    email: String,
    password_hash: String,
    role: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

fn parse_role(s: &str) -> Result<Role, DbError> {
    match s {
        "ADMIN" => Ok(Role::Admin),
        "MEMBER" => Ok(Role::Member),
        other => Err(DbError::Decode(format!("unknown user role: {other}"))),
    }
}

impl UserRow {
    fn into_user(self, id: Uuid) -> Result<User, DbError> {
        Ok(User {
            id,
            tenant_id: parse_uuid("tenant", &self.tenant_id)?,
            email: self.email,
            password_hash: self.password_hash,
            role: parse_role(&self.role)?,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

impl UserRowWithId {
    fn try_into_user(self) -> Result<User, DbError> {
        let id = parse_uuid("user", &self.record_id)?;
        UserRow {
            tenant_id: self.tenant_id,
            email: self.email,
            password_hash: self.password_hash,
            role: self.role,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
        .into_user(id)
    }
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Hash a password with Argon2id using OWASP-recommended parameters.
///
/// If a pepper is provided, it is prepended to the password before
/// hashing. The salt is randomly generated for each call.
fn hash_password(password: &str, pepper: Option<&str>) -> Result<String, DbError> {
    // OWASP ASVS recommended: m=19456 (19 MiB), t=2, p=1
    let params = argon2::Params::new(19456, 2, 1, None)
        .map_err(|e| DbError::Hash(format!("argon2 params error: {e}")))?;
    let argon2 = Argon2::new(argon2::Algorithm::Argon2id, argon2::Version::V0x13, params);

    let peppered: String;
    let input = match pepper {
        Some(p) => {
            peppered = format!("{p}{password}");
            peppered.as_bytes()
        }
        None => password.as_bytes(),
    };

    let salt = SaltString::generate(&mut argon2::password_hash::rand_core::OsRng);
    let hash = argon2
        .hash_password(input, &salt)
        .map_err(|e| DbError::Hash(format!("password hash error: {e}")))?;

    Ok(hash.to_string())
}

/// SurrealDB implementation of the User repository.
#[derive(Clone)]
pub struct SurrealUserRepository<C: Connection> {
    db: Surreal<C>,
    /// Optional server-side pepper for password hashing.
    pepper: Option<String>,
}

impl<C: Connection> SurrealUserRepository<C> {
    pub fn new(db: Surreal<C>) -> Self {
        Self { db, pepper: None }
    }

    pub fn with_pepper(db: Surreal<C>, pepper: Option<String>) -> Self {
        Self { db, pepper }
    }
}

impl<C: Connection> UserRepository for SurrealUserRepository<C> {
    async fn create(&self, input: CreateUser) -> NotelyResult<User> {
        let email = normalize_email(&input.email);
        if email.is_empty() || !email.contains('@') {
            return Err(NotelyError::validation("a valid email address is required"));
        }
        if input.password.is_empty() {
            return Err(NotelyError::validation("password must not be empty"));
        }

        let id = Uuid::new_v4();
        let id_str = id.to_string();
        let password_hash = hash_password(&input.password, self.pepper.as_deref())?;

        let result = self
            .db
            .query(
                "CREATE type::record('user', $id) SET \
                 tenant_id = $tenant_id, \
                 email = $email, \
                 password_hash = $password_hash, \
                 role = $role",
            )
            .bind(("id", id_str.clone()))
            .bind(("tenant_id", input.tenant_id.to_string()))
            .bind(("email", email))
            .bind(("password_hash", password_hash))
            .bind(("role", input.role.as_str().to_string()))
            .await
            .map_err(DbError::from)?;

        let mut result = result
            .check()
            .map_err(|e| DbError::statement("user", e))?;

        let rows: Vec<UserRow> = result.take(0).map_err(DbError::from)?;
        let row = rows
            .into_iter()
            .next()
            .ok_or_else(|| DbError::not_found("user", &id_str))?;

        Ok(row.into_user(id)?)
    }

    async fn get_by_id(&self, tenant_id: Uuid, id: Uuid) -> NotelyResult<User> {
        let id_str = id.to_string();

        let mut result = self
            .db
            .query(
                "SELECT * FROM type::record('user', $id) \
                 WHERE tenant_id = $tenant_id",
            )
            .bind(("id", id_str.clone()))
            .bind(("tenant_id", tenant_id.to_string()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<UserRow> = result.take(0).map_err(DbError::from)?;
        let row = rows
            .into_iter()
            .next()
            .ok_or_else(|| DbError::not_found("user", id_str))?;

        Ok(row.into_user(id)?)
    }

    async fn get_by_email(&self, email: &str) -> NotelyResult<User> {
        let email = normalize_email(email);

        let mut result = self
            .db
            .query(
                "SELECT meta::id(id) AS record_id, * FROM user \
                 WHERE email = $email",
            )
            .bind(("email", email.clone()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<UserRowWithId> = result.take(0).map_err(DbError::from)?;
        let row = rows
            .into_iter()
            .next()
            .ok_or_else(|| DbError::not_found("user", format!("email={email}")))?;

        Ok(row.try_into_user()?)
    }

    async fn list(&self, tenant_id: Uuid) -> NotelyResult<Vec<User>> {
        let mut result = self
            .db
            .query(
                "SELECT meta::id(id) AS record_id, * FROM user \
                 WHERE tenant_id = $tenant_id \
                 ORDER BY created_at ASC",
            )
            .bind(("tenant_id", tenant_id.to_string()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<UserRowWithId> = result.take(0).map_err(DbError::from)?;

        let users = rows
            .into_iter()
            .map(|row| row.try_into_user())
            .collect::<Result<Vec<_>, DbError>>()?;

        Ok(users)
    }
}
