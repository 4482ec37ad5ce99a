//! AI Provider trait and common types.
//!
//! Defines the upstream generation call that the card generator and the
//! deep-search agent are built on.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::errors::CardsResult;

/// Role of a message in a conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AIRole {
    /// System message (sets context/behavior)
    System,
    /// User message (input)
    User,
    /// Assistant message (AI response)
    Assistant,
}

/// A message in a conversation with an AI model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AIMessage {
    pub role: AIRole,
    pub content: String,
}

impl AIMessage {
    /// Create a new system message.
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: AIRole::System,
            content: content.into(),
        }
    }

    /// Create a new user message.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: AIRole::User,
            content: content.into(),
        }
    }
}

/// Token usage information from an AI response.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenUsage {
    pub input_tokens: u32,
    pub output_tokens: u32,
}

/// Response from an AI model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AIResponse {
    /// Generated text content
    pub text: String,
    pub usage: TokenUsage,
    /// Model that generated the response
    pub model: String,
    /// Provider that generated the response
    pub provider: String,
}

/// Tool executed by the provider itself while the model answers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServerTool {
    /// Web search, capped at `max_uses` queries per request
    WebSearch { max_uses: u32 },
}

/// Options for text generation.
#[derive(Debug, Clone, Default)]
pub struct GenerateOptions {
    /// Temperature for sampling (0.0 to 1.0)
    pub temperature: Option<f32>,
    /// Maximum tokens to generate
    pub max_tokens: Option<u32>,
    /// Server-side tools the model may use; empty for a plain completion
    pub tools: Vec<ServerTool>,
}

/// Trait for AI providers.
///
/// Implementations must be safe to share across concurrent requests; the
/// generator holds one behind an `Arc` for the life of the process.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AIProvider: Send + Sync {
    /// Get the provider name (e.g., "anthropic").
    fn name(&self) -> &'static str;

    /// Check if the provider is configured (has API key).
    fn is_configured(&self) -> bool;

    /// Generate text from messages.
    ///
    /// A failed call returns [`CardsError::Upstream`](crate::CardsError::Upstream)
    /// so that callers can classify it as transient or fatal.
    async fn generate_text(
        &self,
        model: &str,
        messages: &[AIMessage],
        options: &GenerateOptions,
    ) -> CardsResult<AIResponse>;
}
