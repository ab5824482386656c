//! Health check handler

use axum::{extract::State, Json};
use serde::Serialize;

use crate::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    status: &'static str,
    version: &'static str,
    engine_version: &'static str,
    qualification_policy: &'static str,
    timestamp_policy: &'static str,
    timestamp: i64,
}

pub async fn check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
        engine_version: boat_analyzer_core::constants::APP_VERSION,
        qualification_policy: state.config.envelope.qualification_policy.as_str(),
        timestamp_policy: state.config.envelope.timestamp_policy.as_str(),
        timestamp: chrono::Utc::now().timestamp(),
    })
}
