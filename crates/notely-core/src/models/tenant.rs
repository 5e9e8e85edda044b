//! Tenant domain model.
//!
//! Tenants provide full data isolation. Every user and every note
//! belongs to exactly one tenant.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Subscription plan of a tenant. Gates the note quota.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Plan {
    Free,
    Pro,
}

impl Plan {
    pub fn as_str(&self) -> &'static str {
        match self {
            Plan::Free => "FREE",
            Plan::Pro => "PRO",
        }
    }
}

/// An isolated organization scope.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tenant {
    pub id: Uuid,
    /// Human-readable name.
    pub name: String,
    /// URL-safe globally unique identifier (e.g., `acme`). Immutable.
    pub slug: String,
    pub plan: Plan,
    /// Number of notes currently owned by the tenant, maintained by the
    /// store alongside note inserts and deletes.
    pub note_count: u64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields required to create a new tenant. New tenants start on
/// [`Plan::Free`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTenant {
    pub name: String,
    pub slug: String,
}

/// Slugs are lowercase ASCII letters, digits and single inner dashes.
pub fn is_valid_slug(slug: &str) -> bool {
    !slug.is_empty()
        && slug.len() <= 63
        && !slug.starts_with('-')
        && !slug.ends_with('-')
        && !slug.contains("--")
        && slug
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slug_rules() {
        assert!(is_valid_slug("acme"));
        assert!(is_valid_slug("globex-2"));
        assert!(!is_valid_slug(""));
        assert!(!is_valid_slug("Acme"));
        assert!(!is_valid_slug("-acme"));
        assert!(!is_valid_slug("ac--me"));
        assert!(!is_valid_slug("acme/evil"));
    }

    #[test]
    fn plan_wire_format() {
        assert_eq!(serde_json::to_string(&Plan::Pro).unwrap(), "\"PRO\"");
        assert_eq!(Plan::Free.as_str(), "FREE");
    }
}
