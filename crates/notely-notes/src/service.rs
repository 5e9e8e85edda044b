//! Note service: tenant scoping, role rules and plan quotas.

use notely_core::error::{NotelyError, NotelyResult};
use notely_core::models::identity::Claims;
use notely_core::models::note::{CreateNote, Note, UpdateNote};
use notely_core::models::tenant::{Plan, Tenant};
use notely_core::policy;
use notely_core::repository::{NoteRepository, TenantRepository};
use tracing::{info, warn};
use uuid::Uuid;

use crate::input::NoteInput;

/// Note operations on behalf of an authenticated caller.
///
/// Generic over repository implementations so that this crate has no
/// dependency on the database crate.
pub struct NoteService<N: NoteRepository, T: TenantRepository> {
    note_repo: N,
    tenant_repo: T,
}

impl<N: NoteRepository, T: TenantRepository> NoteService<N, T> {
    pub fn new(note_repo: N, tenant_repo: T) -> Self {
        Self {
            note_repo,
            tenant_repo,
        }
    }

    /// All notes of the caller's tenant, newest first.
    pub async fn list(&self, claims: &Claims) -> NotelyResult<Vec<Note>> {
        self.note_repo.list(claims.tenant_id).await
    }

    /// Create a note authored by the caller, subject to the tenant plan's
    /// note cap.
    pub async fn create(&self, claims: &Claims, input: NoteInput) -> NotelyResult<Note> {
        if !policy::can_create_note(claims.role) {
            return Err(NotelyError::denied("role may not create notes"));
        }
        let (title, content) = input.validate()?;

        let tenant = self.tenant_repo.get_by_id(claims.tenant_id).await?;
        let cap = tenant.plan.note_cap();

        let created = self
            .note_repo
            .create_within_quota(
                CreateNote {
                    tenant_id: claims.tenant_id,
                    user_id: claims.user_id,
                    title,
                    content,
                },
                cap,
            )
            .await?;

        match (created, cap) {
            (Some(note), _) => {
                info!(note_id = %note.id, tenant = %claims.tenant_slug, "note created");
                Ok(note)
            }
            (None, Some(limit)) => {
                warn!(tenant = %claims.tenant_slug, limit, "note quota exhausted");
                Err(NotelyError::QuotaExceeded { limit })
            }
            (None, None) => Err(NotelyError::Internal(
                "uncapped note insert was rejected".into(),
            )),
        }
    }

    /// A note of the caller's tenant. Notes of other tenants are reported
    /// as not found.
    pub async fn get(&self, claims: &Claims, id: Uuid) -> NotelyResult<Note> {
        self.note_repo.get(claims.tenant_id, id).await
    }

    /// Replace a note's title and content.
    pub async fn update(&self, claims: &Claims, id: Uuid, input: NoteInput) -> NotelyResult<Note> {
        let note = self.note_repo.get(claims.tenant_id, id).await?;
        self.ensure_can_modify(claims, &note)?;
        let (title, content) = input.validate()?;

        self.note_repo
            .update(claims.tenant_id, id, UpdateNote { title, content })
            .await
    }

    pub async fn delete(&self, claims: &Claims, id: Uuid) -> NotelyResult<()> {
        let note = self.note_repo.get(claims.tenant_id, id).await?;
        self.ensure_can_modify(claims, &note)?;

        self.note_repo.delete(claims.tenant_id, id).await?;
        info!(note_id = %id, tenant = %claims.tenant_slug, "note deleted");
        Ok(())
    }

    /// Move the caller's tenant to the Pro plan. Repeating the call on a
    /// tenant that is already Pro succeeds without change.
    pub async fn upgrade_plan(&self, claims: &Claims, slug: &str) -> NotelyResult<Tenant> {
        if !policy::can_upgrade_tenant(claims, slug) {
            warn!(
                user_id = %claims.user_id,
                caller_tenant = %claims.tenant_slug,
                target = slug,
                "tenant upgrade denied"
            );
            return Err(NotelyError::denied(
                "only an admin may upgrade their own tenant",
            ));
        }

        let tenant = self
            .tenant_repo
            .set_plan(claims.tenant_id, Plan::Pro)
            .await?;
        info!(tenant = %tenant.slug, "tenant upgraded to pro");
        Ok(tenant)
    }

    fn ensure_can_modify(&self, claims: &Claims, note: &Note) -> NotelyResult<()> {
        if policy::can_modify_note(claims, note) {
            return Ok(());
        }
        warn!(
            user_id = %claims.user_id,
            note_id = %note.id,
            "note modification denied"
        );
        Err(NotelyError::denied("not allowed to modify this note"))
    }
}
