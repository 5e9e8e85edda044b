//! Router assembly.
//!
//! ```text
//! /                          - liveness banner
//! /health                    - health check
//! /auth/login                - public
//! /notes, /notes/{id}        - bearer token required
//! /tenants/{slug}/upgrade    - bearer token required
//! ```

mod auth;
mod health;
mod json;
mod notes;
mod tenants;

use axum::Router;
use axum::middleware::from_fn_with_state;
use axum::routing::{get, post};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::middleware::require_auth;
use crate::state::AppState;

pub fn router(state: AppState) -> Router {
    let protected = Router::new()
        .route("/notes", get(notes::list).post(notes::create))
        .route(
            "/notes/{id}",
            get(notes::get).put(notes::update).delete(notes::delete),
        )
        .route("/tenants/{slug}/upgrade", post(tenants::upgrade))
        .route_layer(from_fn_with_state(state.clone(), require_auth));

    Router::new()
        .route("/", get(health::banner))
        .route("/health", get(health::health))
        .route("/auth/login", post(auth::login))
        .merge(protected)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
