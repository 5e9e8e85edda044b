//! `POST /auth/login`

use axum::Json;
use axum::extract::State;
use notely_auth::LoginInput;
use notely_core::error::NotelyError;
use serde::{Deserialize, Serialize};

use super::json::ApiJson;
use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    password: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    token: String,
    expires_in: u64,
}

pub async fn login(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    let (Some(email), Some(password)) = (body.email, body.password) else {
        return Err(NotelyError::validation("email and password are required").into());
    };
    if email.trim().is_empty() || password.is_empty() {
        return Err(NotelyError::validation("email and password are required").into());
    }

    let out = state.auth.login(LoginInput { email, password }).await?;

    Ok(Json(LoginResponse {
        token: out.access_token,
        expires_in: out.expires_in,
    }))
}
