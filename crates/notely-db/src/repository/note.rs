//! SurrealDB implementation of [`NoteRepository`].
//!
//! Each tenant row carries a `note_count` that is changed in the same
//! transaction as every note insert and delete. Inserts claim a slot by
//! conditionally incrementing that counter, so two concurrent creators
//! at the cap boundary contend on the same tenant row and cannot both
//! succeed. The loser of such a race is rolled back and re-run against
//! the committed counter.

use chrono::{DateTime, Utc};
use notely_core::error::NotelyResult;
use notely_core::models::note::{CreateNote, Note, UpdateNote};
use notely_core::repository::NoteRepository;
use surrealdb::{Connection, Surreal};
use surrealdb_types::SurrealValue;
use tracing::debug;
use uuid::Uuid;

use super::CountRow;
use crate::error::{DbError, parse_uuid};
use crate::retry::retry_on_conflict;

const CREATE_WITHIN_QUOTA: &str = "\
BEGIN TRANSACTION;
LET $claimed = (
    UPDATE type::record('tenant', $tenant_id)
    SET note_count += 1
    WHERE $cap = NONE OR note_count < $cap
);
IF array::len($claimed) > 0 {
    CREATE type::record('note', $id) SET
        tenant_id = $tenant_id,
        user_id = $user_id,
        title = $title,
        content = $content;
};
COMMIT TRANSACTION;
";

const DELETE_AND_RELEASE: &str = "\
BEGIN TRANSACTION;
LET $removed = (
    DELETE type::record('note', $id)
    WHERE tenant_id = $tenant_id
    RETURN BEFORE
);
IF array::len($removed) > 0 {
    UPDATE type::record('tenant', $tenant_id) SET note_count -= 1;
};
COMMIT TRANSACTION;
";

/// DB-side row struct for queries where the UUID is already known.
#[derive(Debug, SurrealValue)]
struct NoteRow {
    tenant_id: String,
    user_id: String,
    title: String,
    content: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// DB-side row struct that includes the record ID via `meta::id(id)`.
#[derive(Debug, SurrealValue)]
struct NoteRowWithId {
    record_id: String,
    tenant_id: String,
    user_id: String,
    title: String,
    content: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl NoteRow {
    fn into_note(self, id: Uuid) -> Result<Note, DbError> {
        Ok(Note {
            id,
            title: self.title,
            content: self.content,
            tenant_id: parse_uuid("tenant", &self.tenant_id)?,
            user_id: parse_uuid("user", &self.user_id)?,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

impl NoteRowWithId {
    fn try_into_note(self) -> Result<Note, DbError> {
        let id = parse_uuid("note", &self.record_id)?;
        NoteRow {
            tenant_id: self.tenant_id,
            user_id: self.user_id,
            title: self.title,
            content: self.content,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
        .into_note(id)
    }
}

/// SurrealDB implementation of the Note repository.
#[derive(Clone)]
pub struct SurrealNoteRepository<C: Connection> {
    db: Surreal<C>,
}

impl<C: Connection> SurrealNoteRepository<C> {
    pub fn new(db: Surreal<C>) -> Self {
        Self { db }
    }

    async fn find(&self, tenant_id: Uuid, id: Uuid) -> Result<Option<Note>, DbError> {
        let mut result = self
            .db
            .query(
                "SELECT * FROM type::record('note', $id) \
                 WHERE tenant_id = $tenant_id",
            )
            .bind(("id", id.to_string()))
            .bind(("tenant_id", tenant_id.to_string()))
            .await?;

        let rows: Vec<NoteRow> = result.take(0)?;
        rows.into_iter().next().map(|row| row.into_note(id)).transpose()
    }
}

impl<C: Connection> NoteRepository for SurrealNoteRepository<C> {
    async fn create_within_quota(
        &self,
        input: CreateNote,
        cap: Option<u64>,
    ) -> NotelyResult<Option<Note>> {
        let id = Uuid::new_v4();
        let tenant_id = input.tenant_id;
        let user_id = input.user_id;
        let (title, content) = (&input.title, &input.content);

        retry_on_conflict("note.create", move || async move {
            self.db
                .query(CREATE_WITHIN_QUOTA)
                .bind(("id", id.to_string()))
                .bind(("tenant_id", tenant_id.to_string()))
                .bind(("user_id", user_id.to_string()))
                .bind(("title", title.clone()))
                .bind(("content", content.clone()))
                .bind(("cap", cap))
                .await
                .map_err(|e| DbError::statement("note", e))?
                .check()
                .map_err(|e| DbError::statement("note", e))?;
            Ok(())
        })
        .await?;

        let note = self.find(tenant_id, id).await?;
        if note.is_none() {
            debug!(tenant_id = %tenant_id, ?cap, "Note insert rejected by quota");
        }
        Ok(note)
    }

    async fn get(&self, tenant_id: Uuid, id: Uuid) -> NotelyResult<Note> {
        self.find(tenant_id, id)
            .await?
            .ok_or_else(|| DbError::not_found("note", id).into())
    }

    async fn list(&self, tenant_id: Uuid) -> NotelyResult<Vec<Note>> {
        let mut result = self
            .db
            .query(
                "SELECT meta::id(id) AS record_id, * FROM note \
                 WHERE tenant_id = $tenant_id \
                 ORDER BY created_at DESC",
            )
            .bind(("tenant_id", tenant_id.to_string()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<NoteRowWithId> = result.take(0).map_err(DbError::from)?;

        let notes = rows
            .into_iter()
            .map(|row| row.try_into_note())
            .collect::<Result<Vec<_>, DbError>>()?;

        Ok(notes)
    }

    async fn count(&self, tenant_id: Uuid) -> NotelyResult<u64> {
        let mut result = self
            .db
            .query(
                "SELECT count() AS total FROM note \
                 WHERE tenant_id = $tenant_id GROUP ALL",
            )
            .bind(("tenant_id", tenant_id.to_string()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<CountRow> = result.take(0).map_err(DbError::from)?;
        Ok(rows.first().map(|r| r.total).unwrap_or(0))
    }

    async fn update(&self, tenant_id: Uuid, id: Uuid, input: UpdateNote) -> NotelyResult<Note> {
        let id_str = id.to_string();

        let result = self
            .db
            .query(
                "UPDATE type::record('note', $id) SET \
                 title = $title, content = $content, \
                 updated_at = time::now() \
                 WHERE tenant_id = $tenant_id",
            )
            .bind(("id", id_str.clone()))
            .bind(("tenant_id", tenant_id.to_string()))
            .bind(("title", input.title))
            .bind(("content", input.content))
            .await
            .map_err(DbError::from)?;

        let mut result = result
            .check()
            .map_err(|e| DbError::statement("note", e))?;

        let rows: Vec<NoteRow> = result.take(0).map_err(DbError::from)?;
        let row = rows
            .into_iter()
            .next()
            .ok_or_else(|| DbError::not_found("note", id_str))?;

        Ok(row.into_note(id)?)
    }

    async fn delete(&self, tenant_id: Uuid, id: Uuid) -> NotelyResult<()> {
        if self.find(tenant_id, id).await?.is_none() {
            return Err(DbError::not_found("note", id).into());
        }

        retry_on_conflict("note.delete", move || async move {
            self.db
                .query(DELETE_AND_RELEASE)
                .bind(("id", id.to_string()))
                .bind(("tenant_id", tenant_id.to_string()))
                .await
                .map_err(|e| DbError::statement("note", e))?
                .check()
                .map_err(|e| DbError::statement("note", e))?;
            Ok(())
        })
        .await?;

        Ok(())
    }
}
