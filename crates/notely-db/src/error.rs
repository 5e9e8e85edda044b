//! Database-specific error types and conversions.

use notely_core::error::NotelyError;

/// Message fragments SurrealDB uses when a transaction lost a race with
/// another one. Statements after the failing one report
/// "not executed due to a failed transaction".
const TRANSACTION_CONFLICT_MARKERS: &[&str] = &[
    "failed transaction",
    "can be retried",
    "transaction conflict",
    "read or write conflict",
    "resource busy",
];

/// Database-layer error type.
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("SurrealDB error: {0}")]
    Surreal(#[from] surrealdb::Error),

    #[error("Query failed: {0}")]
    Query(String),

    #[error("Migration failed: {0}")]
    Migration(String),

    #[error("Corrupt row: {0}")]
    Decode(String),

    #[error("Record not found: {entity} with id {id}")]
    NotFound { entity: String, id: String },

    #[error("Record already exists: {entity}")]
    Conflict { entity: String },

    /// A concurrent transaction touched the same records first. The
    /// whole transaction was rolled back and may be run again.
    #[error("Transaction conflict: {0}")]
    TransactionConflict(String),

    #[error("Password hashing failed: {0}")]
    Hash(String),
}

impl DbError {
    /// Classify an error reported by a statement. Unique index
    /// violations become [`DbError::Conflict`], write-write conflicts
    /// between transactions become [`DbError::TransactionConflict`].
    pub(crate) fn statement(entity: &str, err: surrealdb::Error) -> Self {
        Self::classify(entity, err.to_string())
    }

    fn classify(entity: &str, msg: String) -> Self {
        if msg.contains("already contains") {
            return DbError::Conflict {
                entity: entity.into(),
            };
        }
        let lower = msg.to_ascii_lowercase();
        if TRANSACTION_CONFLICT_MARKERS
            .iter()
            .any(|marker| lower.contains(marker))
        {
            DbError::TransactionConflict(msg)
        } else {
            DbError::Query(msg)
        }
    }

    pub(crate) fn not_found(entity: &str, id: impl ToString) -> Self {
        DbError::NotFound {
            entity: entity.into(),
            id: id.to_string(),
        }
    }
}

impl From<DbError> for NotelyError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::NotFound { entity, id } => NotelyError::NotFound { entity, id },
            DbError::Conflict { entity } => NotelyError::AlreadyExists { entity },
            DbError::Hash(msg) => NotelyError::Crypto(msg),
            other => NotelyError::Database(other.to_string()),
        }
    }
}

/// Parse a UUID stored as a string column.
pub(crate) fn parse_uuid(field: &str, raw: &str) -> Result<uuid::Uuid, DbError> {
    uuid::Uuid::parse_str(raw).map_err(|e| DbError::Decode(format!("invalid {field} UUID: {e}")))
}
