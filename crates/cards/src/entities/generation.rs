//! Request/response payloads returned to the HTTP layer.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::TaskCard;

/// A free-form prompt sent to one of the agents.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentRequest {
    pub prompt: String,
}

#[cfg(test)]
impl AgentRequest {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
        }
    }
}

/// Usage and bookkeeping attached to a generated batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationMetadata {
    /// Model identifier reported by the provider (`demo-mock` in demo mode)
    pub model_used: String,
    pub input_tokens: u32,
    pub output_tokens: u32,
    pub card_count: usize,
    /// Upstream calls consumed, including the successful one
    pub attempts_made: u32,
}

/// Validated outcome of one card-generation request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationResult {
    pub card_data: Vec<TaskCard>,
    /// Identity of the generator that produced the batch
    pub agent_id: String,
    /// Wall-clock seconds spent on the request
    pub execution_time: f64,
    pub metadata: GenerationMetadata,
}

/// Free-text answer from the deep-search agent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentResponse {
    pub response: String,
    pub agent_id: String,
    pub execution_time: f64,
    pub metadata: Value,
}
