use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde_json::json;

/// GET the service status banner served at the API root.
#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "API is up and responding to requests")
    )
)]
pub async fn root() -> impl IntoResponse {
    Json(json!({
        "status": "Online",
        "network": "IT FARM GLOBAL",
        "mode": "Async"
    }))
}

/// GET a bare liveness probe
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "API router is up and responding to requests", body = String)
    )
)]
pub async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, "healthy")
}
