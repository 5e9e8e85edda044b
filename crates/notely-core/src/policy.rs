//! Role and plan policy.
//!
//! | Role   | List | Create | Modify own | Modify others' | Upgrade plan     |
//! |--------|------|--------|------------|----------------|------------------|
//! | Admin  | yes  | yes    | yes        | yes            | own tenant only  |
//! | Member | yes  | yes    | yes        | no             | no               |
//!
//! Listing has no role restriction, so there is no predicate for it.

use crate::models::identity::Claims;
use crate::models::note::Note;
use crate::models::tenant::Plan;
use crate::models::user::Role;

/// Maximum number of notes a tenant on [`Plan::Free`] may hold.
pub const FREE_PLAN_NOTE_CAP: u64 = 3;

impl Plan {
    /// Note cap for this plan; `None` means unlimited.
    pub fn note_cap(&self) -> Option<u64> {
        match self {
            Plan::Free => Some(FREE_PLAN_NOTE_CAP),
            Plan::Pro => None,
        }
    }
}

pub fn can_create_note(role: Role) -> bool {
    match role {
        Role::Admin | Role::Member => true,
    }
}

/// Update and delete share this rule. The note must already have been
/// fetched within the caller's tenant.
pub fn can_modify_note(claims: &Claims, note: &Note) -> bool {
    if note.tenant_id != claims.tenant_id {
        return false;
    }
    match claims.role {
        Role::Admin => true,
        Role::Member => note.user_id == claims.user_id,
    }
}

/// Admins may upgrade their own tenant, identified by the slug in the
/// token, and no other.
pub fn can_upgrade_tenant(claims: &Claims, slug: &str) -> bool {
    match claims.role {
        Role::Admin => claims.tenant_slug == slug,
        Role::Member => false,
    }
}
