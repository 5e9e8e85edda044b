//! SurrealDB implementation of [`TenantRepository`].

use chrono::{DateTime, Utc};
use notely_core::error::{NotelyError, NotelyResult};
use notely_core::models::tenant::{CreateTenant, Plan, Tenant, is_valid_slug};
use notely_core::repository::TenantRepository;
use surrealdb::{Connection, Surreal};
use surrealdb_types::SurrealValue;
use tracing::info;
use uuid::Uuid;

use crate::error::{DbError, parse_uuid};

/// DB-side row struct for queries where the UUID is already known.
#[derive(Debug, SurrealValue)]
struct TenantRow {
    name: String,
    slug: String,
    plan: String,
    note_count: u64,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// DB-side row struct that includes the record ID via `meta::id(id)`.
#[derive(Debug, SurrealValue)]
struct TenantRowWithId {
    record_id: String,
    name: String,
    slug: String,
    plan: String,
    note_count: u64,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

pub(crate) fn parse_plan(s: &str) -> Result<Plan, DbError> {
    match s {
        "FREE" => Ok(Plan::Free),
        "PRO" => Ok(Plan::Pro),
        other => Err(DbError::Decode(format!("unknown plan: {other}"))),
    }
}

impl TenantRow {
    fn into_tenant(self, id: Uuid) -> Result<Tenant, DbError> {
        Ok(Tenant {
            id,
            name: self.name,
            slug: self.slug,
            plan: parse_plan(&self.plan)?,
            note_count: self.note_count,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

impl TenantRowWithId {
    fn try_into_tenant(self) -> Result<Tenant, DbError> {
        let id = parse_uuid("tenant", &self.record_id)?;
        TenantRow {
            name: self.name,
            slug: self.slug,
            plan: self.plan,
            note_count: self.note_count,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
        .into_tenant(id)
    }
}

/// SurrealDB implementation of the Tenant repository.
#[derive(Clone)]
pub struct SurrealTenantRepository<C: Connection> {
    db: Surreal<C>,
}

impl<C: Connection> SurrealTenantRepository<C> {
    pub fn new(db: Surreal<C>) -> Self {
        Self { db }
    }
}

impl<C: Connection> TenantRepository for SurrealTenantRepository<C> {
    async fn create(&self, input: CreateTenant) -> NotelyResult<Tenant> {
        if !is_valid_slug(&input.slug) {
            return Err(NotelyError::validation(format!(
                "tenant slug '{}' is not URL-safe",
                input.slug
            )));
        }

        let id = Uuid::new_v4();
        let id_str = id.to_string();

        let result = self
            .db
            .query(
                "CREATE type::record('tenant', $id) SET \
                 name = $name, slug = $slug",
            )
            .bind(("id", id_str.clone()))
            .bind(("name", input.name))
            .bind(("slug", input.slug))
            .await
            .map_err(DbError::from)?;

        let mut result = result
            .check()
            .map_err(|e| DbError::statement("tenant", e))?;

        let rows: Vec<TenantRow> = result.take(0).map_err(DbError::from)?;
        let row = rows
            .into_iter()
            .next()
            .ok_or_else(|| DbError::not_found("tenant", &id_str))?;

        let tenant = row.into_tenant(id)?;
        info!(tenant_id = %tenant.id, slug = %tenant.slug, "Tenant created");
        Ok(tenant)
    }

    async fn get_by_id(&self, id: Uuid) -> NotelyResult<Tenant> {
        let id_str = id.to_string();

        let mut result = self
            .db
            .query("SELECT * FROM type::record('tenant', $id)")
            .bind(("id", id_str.clone()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<TenantRow> = result.take(0).map_err(DbError::from)?;
        let row = rows
            .into_iter()
            .next()
            .ok_or_else(|| DbError::not_found("tenant", id_str))?;

        Ok(row.into_tenant(id)?)
    }

    async fn get_by_slug(&self, slug: &str) -> NotelyResult<Tenant> {
        let mut result = self
            .db
            .query(
                "SELECT meta::id(id) AS record_id, * \
                 FROM tenant WHERE slug = $slug",
            )
            .bind(("slug", slug.to_string()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<TenantRowWithId> = result.take(0).map_err(DbError::from)?;
        let row = rows
            .into_iter()
            .next()
            .ok_or_else(|| DbError::not_found("tenant", format!("slug={slug}")))?;

        Ok(row.try_into_tenant()?)
    }

    async fn set_plan(&self, id: Uuid, plan: Plan) -> NotelyResult<Tenant> {
        let id_str = id.to_string();

        let result = self
            .db
            .query(
                "UPDATE type::record('tenant', $id) SET \
                 plan = $plan, updated_at = time::now()",
            )
            .bind(("id", id_str.clone()))
            .bind(("plan", plan.as_str().to_string()))
            .await
            .map_err(DbError::from)?;

        let mut result = result
            .check()
            .map_err(|e| DbError::statement("tenant", e))?;

        let rows: Vec<TenantRow> = result.take(0).map_err(DbError::from)?;
        let row = rows
            .into_iter()
            .next()
            .ok_or_else(|| DbError::not_found("tenant", id_str))?;

        Ok(row.into_tenant(id)?)
    }
}
