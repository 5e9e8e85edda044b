//! Repository trait definitions for data access abstraction.
//!
//! All repository operations are async. Tenant-scoped repositories
//! require a `tenant_id` parameter to enforce data isolation: a record
//! belonging to another tenant is reported as `NotFound`.

use uuid::Uuid;

use crate::error::NotelyResult;
use crate::models::{
    note::{CreateNote, Note, UpdateNote},
    tenant::{CreateTenant, Plan, Tenant},
    user::{CreateUser, User},
};

// ---------------------------------------------------------------------------
// Tenants (global scope)
// ---------------------------------------------------------------------------

pub trait TenantRepository: Send + Sync {
    fn create(&self, input: CreateTenant) -> impl Future<Output = NotelyResult<Tenant>> + Send;
    fn get_by_id(&self, id: Uuid) -> impl Future<Output = NotelyResult<Tenant>> + Send;
    fn get_by_slug(&self, slug: &str) -> impl Future<Output = NotelyResult<Tenant>> + Send;
    /// Set the tenant's plan. Setting the current plan again is a no-op
    /// that still succeeds.
    fn set_plan(&self, id: Uuid, plan: Plan) -> impl Future<Output = NotelyResult<Tenant>> + Send;
}

// ---------------------------------------------------------------------------
// Users (email lookup is global, everything else tenant-scoped)
// ---------------------------------------------------------------------------

pub trait UserRepository: Send + Sync {
    fn create(&self, input: CreateUser) -> impl Future<Output = NotelyResult<User>> + Send;
    fn get_by_id(
        &self,
        tenant_id: Uuid,
        id: Uuid,
    ) -> impl Future<Output = NotelyResult<User>> + Send;
    /// Emails are unique across all tenants, so login resolves the tenant
    /// from the user rather than the other way round.
    fn get_by_email(&self, email: &str) -> impl Future<Output = NotelyResult<User>> + Send;
    fn list(&self, tenant_id: Uuid) -> impl Future<Output = NotelyResult<Vec<User>>> + Send;
}

// ---------------------------------------------------------------------------
// Notes (tenant scope)
// ---------------------------------------------------------------------------

pub trait NoteRepository: Send + Sync {
    /// Insert a note only if the tenant currently holds fewer than `cap`
    /// notes (`None` = unlimited). The count check and the insert happen
    /// atomically. Returns `Ok(None)` when the cap rejected the insert.
    fn create_within_quota(
        &self,
        input: CreateNote,
        cap: Option<u64>,
    ) -> impl Future<Output = NotelyResult<Option<Note>>> + Send;
    fn get(&self, tenant_id: Uuid, id: Uuid) -> impl Future<Output = NotelyResult<Note>> + Send;
    /// All notes of the tenant, newest first.
    fn list(&self, tenant_id: Uuid) -> impl Future<Output = NotelyResult<Vec<Note>>> + Send;
    fn count(&self, tenant_id: Uuid) -> impl Future<Output = NotelyResult<u64>> + Send;
    fn update(
        &self,
        tenant_id: Uuid,
        id: Uuid,
        input: UpdateNote,
    ) -> impl Future<Output = NotelyResult<Note>> + Send;
    fn delete(&self, tenant_id: Uuid, id: Uuid) -> impl Future<Output = NotelyResult<()>> + Send;
}
