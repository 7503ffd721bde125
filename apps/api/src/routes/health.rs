use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::state::AppState;

/// GET /health
/// Returns a simple status object with service version and storage backend.
pub async fn health_handler(State(state): State<AppState>) -> Json<Value> {
    let storage = if state.config.database_url.is_some() {
        "postgres"
    } else {
        "memory"
    };
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "service": "marketplace-api",
        "storage": storage
    }))
}
