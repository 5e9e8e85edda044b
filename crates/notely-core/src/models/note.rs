//! Note domain model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A note, always scoped to its owning tenant.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    /// Owning tenant. Immutable.
    pub tenant_id: Uuid,
    /// Author. Immutable.
    pub user_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields required to insert a note. `tenant_id` and `user_id` always
/// come from the caller's verified claims, never from request bodies.
#[derive(Debug, Clone)]
pub struct CreateNote {
    pub tenant_id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub content: String,
}

/// The only mutable fields of a note.
#[derive(Debug, Clone)]
pub struct UpdateNote {
    pub title: String,
    pub content: String,
}
