/// Liveness endpoint
use axum::extract::State;
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::Utc;
use serde_json::json;

use crate::webserver::state::AppState;

pub async fn health(State(state): State<AppState>) -> Response {
    let uptime = (Utc::now() - state.startup_time).num_seconds();
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": Utc::now().to_rfc3339(),
        "uptimeSeconds": uptime,
    }))
    .into_response()
}
