//! Agent endpoints: card generation and deep search.

use axum::{extract::State, Json};
use cards::{AgentRequest, AgentResponse, GenerationResult};
use serde::Deserialize;
use tracing::info;

use crate::error::ApiError;
use crate::server::AppState;

/// Body of `POST /agents/new-card`.
#[derive(Debug, Deserialize)]
pub struct NewCardRequest {
    pub prompt: String,
}

/// Generate a validated card batch for a prompt.
pub async fn new_card(
    State(state): State<AppState>,
    Json(request): Json<NewCardRequest>,
) -> Result<Json<GenerationResult>, ApiError> {
    let result = state.generator.generate_cards(&request.prompt).await?;

    info!(
        agent_id = %result.agent_id,
        card_count = result.metadata.card_count,
        execution_time = result.execution_time,
        "Card batch generated"
    );

    Ok(Json(result))
}

/// Run a deep-search prompt.
pub async fn deep_search(
    State(state): State<AppState>,
    Json(request): Json<AgentRequest>,
) -> Result<Json<AgentResponse>, ApiError> {
    let search = state
        .search
        .as_ref()
        .ok_or(ApiError::Unavailable("Deep search"))?;

    Ok(Json(search.run(&request).await?))
}
