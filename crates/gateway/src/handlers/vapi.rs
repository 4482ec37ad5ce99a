//! Voice-call endpoints.
//!
//! Call failures come back as `success: false` with a 200 status; only a
//! missing voice service is an HTTP error.

use axum::{extract::State, Json};
use voice::{OutboundCallRequest, OutboundCallResponse, SimpleCallRequest};

use crate::error::ApiError;
use crate::server::AppState;

pub async fn outbound_call(
    State(state): State<AppState>,
    Json(request): Json<OutboundCallRequest>,
) -> Result<Json<OutboundCallResponse>, ApiError> {
    let voice = state
        .voice
        .as_ref()
        .ok_or(ApiError::Unavailable("Voice service"))?;

    Ok(Json(voice.make_outbound_call(&request).await))
}

pub async fn simple_call(
    State(state): State<AppState>,
    Json(request): Json<SimpleCallRequest>,
) -> Result<Json<OutboundCallResponse>, ApiError> {
    let voice = state
        .voice
        .as_ref()
        .ok_or(ApiError::Unavailable("Voice service"))?;

    Ok(Json(voice.make_simple_call(&request.target_number).await))
}
