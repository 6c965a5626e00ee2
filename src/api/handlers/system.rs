//! System greeting and readiness handlers.

use axum::{Json, extract::State, http::StatusCode};
use serde::Serialize;
use tracing::instrument;
use utoipa::ToSchema;

use crate::api::AppState;
use crate::db::{Database, HealthStatus};

/// Greeting response
#[derive(Serialize, ToSchema)]
pub struct HelloResponse {
    #[schema(example = "Hello World")]
    pub message: String,
}

/// Greeting endpoint
#[utoipa::path(
    get,
    path = "/hello",
    tag = "system",
    responses(
        (status = 200, description = "Greeting", body = HelloResponse)
    )
)]
#[instrument]
pub async fn hello() -> Json<HelloResponse> {
    Json(HelloResponse {
        message: crate::hello().to_string(),
    })
}

/// Readiness endpoint
///
/// Probes the database and reports pool statistics
#[utoipa::path(
    get,
    path = "/readiness",
    tag = "system",
    responses(
        (status = 200, description = "Database reachable", body = HealthStatus),
        (status = 503, description = "Database unreachable", body = HealthStatus)
    )
)]
#[instrument(skip(state))]
pub async fn readiness<D: Database>(
    State(state): State<AppState<D>>,
) -> (StatusCode, Json<HealthStatus>) {
    let health = state.db().health_check().await;
    let status = if health.is_up() {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };
    (status, Json(health))
}
