//! Anthropic Claude AI provider implementation.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::errors::{CardsError, CardsResult};

use super::provider::{
    AIMessage, AIProvider, AIResponse, AIRole, GenerateOptions, ServerTool, TokenUsage,
};

/// Anthropic API endpoint
const ANTHROPIC_API_URL: &str = "https://api.anthropic.com/v1/messages";

/// Anthropic API version
const ANTHROPIC_VERSION: &str = "2023-06-01";

/// Default model
const DEFAULT_MODEL: &str = "claude-sonnet-4-20250514";

/// Token ceiling used when the caller does not set one
const DEFAULT_MAX_TOKENS: u32 = 4096;

/// Versioned type of the server-side web search tool
const WEB_SEARCH_TOOL_TYPE: &str = "web_search_20250305";

/// Anthropic API request message
#[derive(Debug, Serialize)]
struct AnthropicMessage {
    role: &'static str,
    content: String,
}

/// Anthropic API request
#[derive(Debug, Serialize)]
struct AnthropicRequest {
    model: String,
    messages: Vec<AnthropicMessage>,
    max_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    system: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    tools: Vec<AnthropicTool>,
}

/// Server tool definition
#[derive(Debug, Serialize)]
struct AnthropicTool {
    #[serde(rename = "type")]
    tool_type: &'static str,
    name: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_uses: Option<u32>,
}

impl From<ServerTool> for AnthropicTool {
    fn from(tool: ServerTool) -> Self {
        match tool {
            ServerTool::WebSearch { max_uses } => Self {
                tool_type: WEB_SEARCH_TOOL_TYPE,
                name: "web_search",
                max_uses: Some(max_uses),
            },
        }
    }
}

/// Anthropic API response content block
#[derive(Debug, Deserialize)]
struct AnthropicContent {
    #[serde(rename = "type")]
    content_type: String,
    #[serde(default)]
    text: String,
}

/// Anthropic API usage
#[derive(Debug, Deserialize)]
struct AnthropicUsage {
    input_tokens: u32,
    output_tokens: u32,
}

/// Anthropic API response
#[derive(Debug, Deserialize)]
struct AnthropicResponse {
    content: Vec<AnthropicContent>,
    model: String,
    usage: AnthropicUsage,
}

/// Anthropic API error
#[derive(Debug, Deserialize)]
struct AnthropicError {
    #[serde(rename = "type")]
    error_type: String,
    message: String,
}

/// Anthropic API error response
#[derive(Debug, Deserialize)]
struct AnthropicErrorResponse {
    error: AnthropicError,
}

/// Anthropic Claude provider.
///
/// Cloning is cheap; the underlying `reqwest::Client` is shared.
#[derive(Clone)]
pub struct AnthropicProvider {
    client: Client,
    api_key: Option<String>,
    base_url: String,
}

impl AnthropicProvider {
    /// Create a new Anthropic provider with an API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: Some(api_key.into()),
            base_url: ANTHROPIC_API_URL.to_string(),
        }
    }

    /// Create from the `ANTHROPIC_API_KEY` environment variable.
    ///
    /// A missing key is not an error here; the provider reports itself as
    /// unconfigured and fails on first use.
    pub fn from_env() -> Self {
        Self {
            client: Client::new(),
            api_key: std::env::var("ANTHROPIC_API_KEY")
                .ok()
                .filter(|k| !k.is_empty()),
            base_url: ANTHROPIC_API_URL.to_string(),
        }
    }

    /// Set a custom base URL.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Convert messages to Anthropic format, extracting system message.
    fn convert_messages(messages: &[AIMessage]) -> (Option<String>, Vec<AnthropicMessage>) {
        let mut system = None;
        let mut converted = Vec::new();

        for msg in messages {
            match msg.role {
                // Anthropic uses a separate system field
                AIRole::System => system = Some(msg.content.clone()),
                AIRole::User => converted.push(AnthropicMessage {
                    role: "user",
                    content: msg.content.clone(),
                }),
                AIRole::Assistant => converted.push(AnthropicMessage {
                    role: "assistant",
                    content: msg.content.clone(),
                }),
            }
        }

        (system, converted)
    }

    fn build_request(
        model: &str,
        messages: &[AIMessage],
        options: &GenerateOptions,
    ) -> AnthropicRequest {
        let (system, converted_messages) = Self::convert_messages(messages);

        AnthropicRequest {
            model: model.to_string(),
            messages: converted_messages,
            max_tokens: options.max_tokens.unwrap_or(DEFAULT_MAX_TOKENS),
            system,
            temperature: options.temperature,
            tools: options.tools.iter().copied().map(AnthropicTool::from).collect(),
        }
    }

    /// Join every text block of a reply.
    ///
    /// Tool-using replies interleave text with `server_tool_use` and
    /// `web_search_tool_result` blocks; only the text is kept.
    fn collect_text(content: Vec<AnthropicContent>) -> String {
        content
            .into_iter()
            .filter(|c| c.content_type == "text")
            .map(|c| c.text)
            .collect()
    }

    /// Turn a non-2xx reply into an upstream error.
    ///
    /// The message keeps both the HTTP status and the API error type
    /// (`overloaded_error`, `rate_limit_error`, ...) so it can be classified.
    fn upstream_error(status: reqwest::StatusCode, body: &str) -> CardsError {
        let message = match serde_json::from_str::<AnthropicErrorResponse>(body) {
            Ok(parsed) => format!(
                "Anthropic API error ({}): {} - {}",
                status, parsed.error.error_type, parsed.error.message
            ),
            Err(_) => format!("Anthropic API error ({status}): {body}"),
        };

        CardsError::Upstream {
            status: Some(status.as_u16()),
            message,
        }
    }
}

#[async_trait]
impl AIProvider for AnthropicProvider {
    fn name(&self) -> &'static str {
        "anthropic"
    }

    fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    async fn generate_text(
        &self,
        model: &str,
        messages: &[AIMessage],
        options: &GenerateOptions,
    ) -> CardsResult<AIResponse> {
        let api_key = self
            .api_key
            .as_ref()
            .ok_or_else(|| CardsError::ProviderNotConfigured {
                provider: "anthropic (ANTHROPIC_API_KEY not set)".to_string(),
            })?;

        let request = Self::build_request(model, messages, options);

        tracing::debug!(
            model = %request.model,
            max_tokens = request.max_tokens,
            tools = request.tools.len(),
            "Calling Claude API"
        );

        let response = self
            .client
            .post(&self.base_url)
            .header("x-api-key", api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .header("content-type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| CardsError::Upstream {
                status: e.status().map(|s| s.as_u16()),
                message: format!("Anthropic API request failed: {e}"),
            })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| CardsError::Upstream {
            status: Some(status.as_u16()),
            message: format!("Failed to read response: {e}"),
        })?;

        if !status.is_success() {
            return Err(Self::upstream_error(status, &body));
        }

        let parsed: AnthropicResponse =
            serde_json::from_str(&body).map_err(|e| CardsError::Upstream {
                status: Some(status.as_u16()),
                message: format!("Unexpected Anthropic response body: {e}"),
            })?;

        let text = Self::collect_text(parsed.content);

        tracing::debug!(
            input_tokens = parsed.usage.input_tokens,
            output_tokens = parsed.usage.output_tokens,
            "Claude API call complete"
        );

        Ok(AIResponse {
            text,
            usage: TokenUsage {
                input_tokens: parsed.usage.input_tokens,
                output_tokens: parsed.usage.output_tokens,
            },
            model: parsed.model,
            provider: "anthropic".to_string(),
        })
    }
}

impl Default for AnthropicProvider {
    fn default() -> Self {
        Self::from_env()
    }
}

/// Get the default Anthropic model.
pub fn default_model() -> &'static str {
    DEFAULT_MODEL
}
