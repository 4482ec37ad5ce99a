use axum::{extract::State, Json};
use serde::Serialize;

use crate::server::AppState;

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    status: &'static str,
    version: &'static str,
    demo_mode: bool,
    deep_search: bool,
    voice: bool,
}

pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        demo_mode: state.demo_mode,
        deep_search: state.search.is_some(),
        voice: state.voice.is_some(),
    })
}
