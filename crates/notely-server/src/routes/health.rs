use axum::Json;
use serde_json::{Value, json};

pub async fn banner() -> &'static str {
    "Backend server is running"
}

pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
