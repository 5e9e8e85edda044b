//! Identity claims recovered from a verified bearer token.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::user::Role;

/// Who is calling, and on behalf of which tenant.
///
/// Derived at login and carried inside the signed access token; never
/// persisted. Every tenant-scoped operation takes its tenant and author
/// ids from here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Claims {
    pub user_id: Uuid,
    pub tenant_id: Uuid,
    pub role: Role,
    pub tenant_slug: String,
}
