//! `POST /tenants/{slug}/upgrade`

use axum::extract::{Path, State};
use axum::{Extension, Json};
use notely_core::models::identity::Claims;
use notely_core::models::tenant::Plan;
use serde::Serialize;

use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct UpgradeResponse {
    message: &'static str,
    plan: Plan,
}

pub async fn upgrade(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(slug): Path<String>,
) -> Result<Json<UpgradeResponse>, ApiError> {
    let tenant = state.notes.upgrade_plan(&claims, &slug).await?;
    Ok(Json(UpgradeResponse {
        message: "Tenant upgraded to Pro plan successfully",
        plan: tenant.plan,
    }))
}
