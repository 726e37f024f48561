use axum::{Json, extract::State};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{error::AppResult, state::AppState};

pub const LIVENESS_TEXT: &str = "Laptop city server running";

/// Plain-text liveness probe.
pub async fn liveness() -> &'static str {
    LIVENESS_TEXT
}

#[derive(Serialize, ToSchema)]
pub struct HealthData {
    pub status: String,
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Store reachable", body = HealthData),
        (status = 500, description = "Store unreachable")
    ),
    tag = "Health"
)]
pub async fn health_check(State(state): State<AppState>) -> AppResult<Json<HealthData>> {
    state.store.ping().await?;
    Ok(Json(HealthData {
        status: "ok".to_string(),
    }))
}
