// handlers/root.rs - GET / and GET /health

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde_json::{json, Value};

use crate::error::ApiError;
use crate::state::AppState;

pub async fn index() -> Json<Value> {
    Json(json!({
        "name": "Village Infrastructure API",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "auth": "/api/auth/register, /api/auth/login (public), /api/auth/me (bearer)",
            "projects": "/api/projects[/:id] (writes require bearer)",
            "priority": "/api/projects/priority (bearer)",
            "schedule": "/api/schedule",
            "funds": "/api/funds, /api/funds/distribution, /api/projects/:id/{disbursements,expenses}",
            "progress": "/api/projects/:id/{progress,feedback} (bearer)",
            "documents": "/api/projects/:id/documents",
            "reports": "/api/projects/:id/reports/lpj",
            "metrics": "/api/metrics/projects-by-month",
            "health": "/health"
        }
    }))
}

pub async fn health(State(state): State<AppState>) -> Response {
    let now = chrono::Utc::now();

    match state.store.ping().await {
        Ok(()) => (
            StatusCode::OK,
            Json(json!({
                "status": "ok",
                "timestamp": now,
                "database": "ok"
            })),
        )
            .into_response(),
        Err(e) => {
            tracing::error!("Health check failed: {}", e);
            ApiError::service_unavailable(format!("database unavailable: {}", e)).into_response()
        }
    }
}
