//! `/notes` handlers. All of them run behind
//! [`require_auth`](crate::middleware::require_auth).

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::{Extension, Json};
use notely_core::error::NotelyError;
use notely_core::models::identity::Claims;
use notely_core::models::note::Note;
use notely_notes::NoteInput;
use serde_json::{Value, json};
use uuid::Uuid;

use super::json::ApiJson;
use crate::error::ApiError;
use crate::state::AppState;

/// A path segment that is not a UUID cannot name an existing note.
fn note_id(raw: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(raw).map_err(|_| NotelyError::not_found("note", raw).into())
}

pub async fn list(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> Result<Json<Vec<Note>>, ApiError> {
    Ok(Json(state.notes.list(&claims).await?))
}

pub async fn create(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    ApiJson(input): ApiJson<NoteInput>,
) -> Result<(StatusCode, Json<Note>), ApiError> {
    let note = state.notes.create(&claims, input).await?;
    Ok((StatusCode::CREATED, Json(note)))
}

pub async fn get(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<String>,
) -> Result<Json<Note>, ApiError> {
    let id = note_id(&id)?;
    Ok(Json(state.notes.get(&claims, id).await?))
}

pub async fn update(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<String>,
    ApiJson(input): ApiJson<NoteInput>,
) -> Result<Json<Note>, ApiError> {
    let id = note_id(&id)?;
    Ok(Json(state.notes.update(&claims, id, input).await?))
}

pub async fn delete(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let id = note_id(&id)?;
    state.notes.delete(&claims, id).await?;
    Ok(Json(json!({ "message": "Note deleted successfully" })))
}
