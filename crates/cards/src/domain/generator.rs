//! Card generation orchestrator.
//!
//! Drives one end-to-end generation attempt:
//! 1. Build the planning prompt
//! 2. Call the upstream model (or substitute the demo batch)
//! 3. Retry overload/rate-limit failures with exponential backoff
//! 4. Extract, schema-validate and graph-validate the reply
//! 5. Attach usage metadata

use std::sync::Arc;
use std::time::Duration;

use serde_json::json;
use tokio::time::Instant;

use crate::ai::anthropic::default_model;
use crate::ai::prompts::CARD_PLANNER_SYSTEM_PROMPT;
use crate::ai::{AIMessage, AIProvider, AIResponse, GenerateOptions, TokenUsage};
use crate::entities::{GenerationMetadata, GenerationResult, TaskCard};
use crate::errors::CardsResult;

use super::graph::dependency_order;
use super::retry::{Attempted, RetryPolicy};
use super::{agent_id, parse_plan, preview};

/// Model name reported for demo batches.
pub const DEMO_MODEL: &str = "demo-mock";

/// Token ceiling for a card-generation call.
pub const DEFAULT_MAX_TOKENS: u32 = 5000;

/// Simulated latency of a demo generation.
pub const DEFAULT_DEMO_DELAY: Duration = Duration::from_millis(1500);

/// Configuration for [`CardGenerator`].
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    /// Model requested from the provider.
    pub model: String,

    /// Maximum output tokens per call.
    pub max_tokens: u32,

    /// Backoff applied to transient upstream failures.
    pub retry: RetryPolicy,

    /// Skip the upstream call and return the canned batch.
    pub demo_mode: bool,

    /// Artificial delay before a demo batch is returned.
    pub demo_delay: Duration,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            model: default_model().to_string(),
            max_tokens: DEFAULT_MAX_TOKENS,
            retry: RetryPolicy::default(),
            demo_mode: false,
            demo_delay: DEFAULT_DEMO_DELAY,
        }
    }
}

/// Turns free-form prompts into validated task-card batches.
///
/// Holds no per-request state; one instance serves concurrent requests.
pub struct CardGenerator {
    provider: Arc<dyn AIProvider>,
    config: GeneratorConfig,
    agent_id: String,
}

impl CardGenerator {
    /// Create a generator around a shared provider.
    pub fn new(provider: Arc<dyn AIProvider>, config: GeneratorConfig) -> Self {
        Self {
            provider,
            config,
            agent_id: agent_id("new-card-func"),
        }
    }

    /// Identity reported in every result from this generator.
    pub fn agent_id(&self) -> &str {
        &self.agent_id
    }

    /// Generate a dependency-linked card batch from a prompt.
    ///
    /// Reply-shape failures (extraction, schema, dependency graph) are
    /// returned as-is and never retried. Upstream failures come back as
    /// [`CardsError::UpstreamUnavailable`](crate::CardsError::UpstreamUnavailable).
    pub async fn generate_cards(&self, prompt: &str) -> CardsResult<GenerationResult> {
        let started = Instant::now();
        tracing::info!(prompt = %preview(prompt), "Agent processing prompt");

        let Attempted {
            value: reply,
            attempts,
        } = if self.config.demo_mode {
            self.demo_reply().await?
        } else {
            self.call_upstream(prompt).await?
        };

        let cards = parse_plan(&reply.text).inspect_err(|e| {
            tracing::error!(error = %e, model = %reply.model, "AI response failed validation");
        })?;

        log_plan(&cards);

        let metadata = GenerationMetadata {
            model_used: reply.model,
            input_tokens: reply.usage.input_tokens,
            output_tokens: reply.usage.output_tokens,
            card_count: cards.len(),
            attempts_made: attempts,
        };

        tracing::info!(
            card_count = metadata.card_count,
            attempts = metadata.attempts_made,
            input_tokens = metadata.input_tokens,
            output_tokens = metadata.output_tokens,
            "Generated task cards"
        );

        Ok(GenerationResult {
            card_data: cards,
            agent_id: self.agent_id.clone(),
            execution_time: started.elapsed().as_secs_f64(),
            metadata,
        })
    }

    /// Issue the planning call under the retry policy.
    async fn call_upstream(&self, prompt: &str) -> CardsResult<Attempted<AIResponse>> {
        let messages = vec![
            AIMessage::system(CARD_PLANNER_SYSTEM_PROMPT),
            AIMessage::user(prompt),
        ];
        let options = GenerateOptions {
            max_tokens: Some(self.config.max_tokens),
            ..Default::default()
        };

        let provider = self.provider.as_ref();
        let model = self.config.model.as_str();
        let (messages, options) = (&messages, &options);

        self.config
            .retry
            .run(move |attempt| {
                tracing::debug!(
                    attempt = attempt + 1,
                    provider = provider.name(),
                    "Calling upstream model"
                );
                provider.generate_text(model, messages, options)
            })
            .await
    }

    /// Canned reply used in demo mode, shaped like a live one.
    async fn demo_reply(&self) -> CardsResult<Attempted<AIResponse>> {
        tracing::info!("DEMO_MODE is enabled. Returning mock response.");
        tokio::time::sleep(self.config.demo_delay).await;

        Ok(Attempted {
            value: AIResponse {
                text: serde_json::to_string(&demo_batch())?,
                usage: TokenUsage::default(),
                model: DEMO_MODEL.to_string(),
                provider: "demo".to_string(),
            },
            attempts: 1,
        })
    }
}

/// Log the validated plan in the order its cards can run.
fn log_plan(cards: &[TaskCard]) {
    let order = dependency_order(cards).unwrap_or_default();
    let roots = cards.iter().filter(|c| c.is_root()).count();
    tracing::debug!(order = ?order, roots, "Card execution order");

    for card in cards {
        tracing::debug!(
            card_id = %card.card_id,
            task_type = %card.task_type,
            dependencies = ?card.dependencies,
            "Planned card"
        );
    }
}

/// Fixed three-card plan returned in demo mode.
pub fn demo_batch() -> serde_json::Value {
    json!({
        "cards": [
            {
                "card_id": "task-1",
                "title": "Research Competitors",
                "description": "Analyze key competitors in the market.",
                "task_type": "research_task",
                "status": "todo",
                "parameters": { "topics": ["pricing", "features"], "scope": "Global" },
                "dependencies": []
            },
            {
                "card_id": "task-2",
                "title": "Draft Strategy Report",
                "description": "Compile research findings into a strategy report.",
                "task_type": "research_task",
                "status": "todo",
                "parameters": null,
                "dependencies": ["task-1"]
            },
            {
                "card_id": "task-3",
                "title": "Generate Cover Image",
                "description": "Create a cover image for the strategy report.",
                "task_type": "image_generation_task",
                "status": "todo",
                "parameters": null,
                "dependencies": ["task-2"]
            }
        ]
    })
}
