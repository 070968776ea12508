use axum::{response::Result, Json};
use serde_json::{json, Value};
use std::time::{SystemTime, UNIX_EPOCH};

pub async fn health_check() -> Result<Json<Value>> {
    let timestamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default();

    Ok(Json(json!({
        "status": "healthy",
        "timestamp": timestamp,
        "version": env!("CARGO_PKG_VERSION"),
        "service": "todo-server"
    })))
}
