use axum::Json;
use serde_json::{json, Value};

/// GET /
/// Liveness probe; always 200.
pub async fn root_handler() -> Json<Value> {
    Json(json!({ "message": "Success get" }))
}
