use axum::Json;
use serde_json::{json, Value};

/// Root greeting, used as a deployment smoke check
pub async fn root() -> Json<Value> {
    Json(json!({ "message": "Hello, Railway!" }))
}

/// Liveness probe
pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
