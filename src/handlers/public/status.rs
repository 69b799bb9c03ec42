use axum::{extract::State, response::Json};
use serde_json::{json, Value};

use crate::middleware::ApiResponse;
use crate::state::AppState;

/// GET / - service description
pub async fn root() -> Json<Value> {
    let version = env!("CARGO_PKG_VERSION");

    Json(json!({
        "success": true,
        "data": {
            "name": "LMS Admin API",
            "version": version,
            "description": "Admin session identity and center/system scope resolution",
            "endpoints": {
                "home": "/ (public)",
                "health": "/health (public)",
                "scope_resolve": "/api/scope/resolve (public)",
                "whoami": "/api/auth/whoami (protected)",
                "profile": "/api/auth/profile (protected)",
                "centers": "/api/scope/centers[?center_id=] (protected)",
            }
        }
    }))
}

/// GET /health - liveness plus whether profile lookups are wired up
pub async fn health(State(state): State<AppState>) -> ApiResponse<Value> {
    let upstream = if state.profiles.is_some() { "configured" } else { "not_configured" };

    ApiResponse::success(json!({
        "status": "ok",
        "timestamp": chrono::Utc::now(),
        "upstream": upstream,
    }))
}
