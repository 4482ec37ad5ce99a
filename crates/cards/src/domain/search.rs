//! Deep-search agent: a research prompt answered with live web search.

use std::sync::Arc;
use std::time::Duration;

use serde_json::json;
use tokio::time::Instant;

use crate::ai::anthropic::default_model;
use crate::ai::prompts::deep_search_prompt;
use crate::ai::{AIMessage, AIProvider, GenerateOptions, ServerTool};
use crate::entities::{AgentRequest, AgentResponse};
use crate::errors::{CardsError, CardsResult};

use super::{agent_id, preview};

/// Simulated latency of a demo search.
pub const DEFAULT_SEARCH_DEMO_DELAY: Duration = Duration::from_secs(2);

/// Web searches the model may run for one prompt.
pub const DEFAULT_MAX_SEARCHES: u32 = 2;

#[derive(Debug, Clone)]
pub struct DeepSearchConfig {
    pub model: String,
    pub max_tokens: u32,
    pub temperature: f32,
    /// Cap on web searches per prompt
    pub max_searches: u32,
    pub demo_mode: bool,
    pub demo_delay: Duration,
}

impl Default for DeepSearchConfig {
    fn default() -> Self {
        Self {
            model: default_model().to_string(),
            max_tokens: 4096,
            temperature: 0.1,
            max_searches: DEFAULT_MAX_SEARCHES,
            demo_mode: false,
            demo_delay: DEFAULT_SEARCH_DEMO_DELAY,
        }
    }
}

/// Research agent answering free-form prompts.
pub struct DeepSearch {
    provider: Arc<dyn AIProvider>,
    config: DeepSearchConfig,
    agent_id: String,
}

impl DeepSearch {
    /// Create the agent; outside demo mode the provider must be configured.
    pub fn new(provider: Arc<dyn AIProvider>, config: DeepSearchConfig) -> CardsResult<Self> {
        if config.demo_mode {
            tracing::info!("DEMO_MODE enabled: deep search will return canned answers");
        } else if !provider.is_configured() {
            return Err(CardsError::ProviderNotConfigured {
                provider: provider.name().to_string(),
            });
        }

        Ok(Self {
            provider,
            config,
            agent_id: agent_id("deep-search-func"),
        })
    }

    pub fn agent_id(&self) -> &str {
        &self.agent_id
    }

    /// Answer a research prompt.
    ///
    /// Every failure is reported as [`CardsError::AgentExecution`].
    pub async fn run(&self, request: &AgentRequest) -> CardsResult<AgentResponse> {
        let started = Instant::now();
        let prompt = deep_search_prompt(&request.prompt);
        tracing::info!(prompt = %preview(&prompt), "Agent running search");

        let answer = if self.config.demo_mode {
            tokio::time::sleep(self.config.demo_delay).await;
            demo_answer(&request.prompt)
        } else {
            self.search(&prompt)
                .await
                .map_err(|e| CardsError::AgentExecution(e.to_string()))?
        };

        Ok(AgentResponse {
            response: answer,
            agent_id: self.agent_id.clone(),
            execution_time: started.elapsed().as_secs_f64(),
            metadata: json!({ "prompt_length": prompt.chars().count() }),
        })
    }

    async fn search(&self, prompt: &str) -> CardsResult<String> {
        let options = GenerateOptions {
            temperature: Some(self.config.temperature),
            max_tokens: Some(self.config.max_tokens),
            tools: vec![ServerTool::WebSearch {
                max_uses: self.config.max_searches,
            }],
        };
        let response = self
            .provider
            .generate_text(&self.config.model, &[AIMessage::user(prompt)], &options)
            .await?;
        Ok(response.text)
    }
}

fn demo_answer(prompt: &str) -> String {
    format!(
        "**[DEMO MODE] Deep Search Result for: {prompt}**\n\n\
         Based on the analysis of the request, here are the key findings:\n\n\
         1. **Market Trends**: The AI agent market is rapidly evolving with a focus on autonomous task execution.\n\
         2. **Competitor Analysis**: Key players are integrating multi-modal capabilities (text, image, voice).\n\
         3. **Strategic Recommendations**: Focus on user experience and seamless integration with existing workflows.\n\n\
         This is a simulated response for demonstration purposes."
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::provider::MockAIProvider;
    use crate::ai::{AIResponse, TokenUsage};

    #[test]
    fn test_requires_configured_provider() {
        let mut mock = MockAIProvider::new();
        mock.expect_is_configured().return_const(false);
        mock.expect_name().return_const("anthropic");

        let result = DeepSearch::new(Arc::new(mock), DeepSearchConfig::default());
        assert!(matches!(result, Err(CardsError::ProviderNotConfigured { .. })));
    }

    #[tokio::test(start_paused = true)]
    async fn test_demo_answer() {
        let config = DeepSearchConfig {
            demo_mode: true,
            ..Default::default()
        };
        let search = DeepSearch::new(Arc::new(MockAIProvider::new()), config).unwrap();

        let started = Instant::now();
        let response = search.run(&AgentRequest::new("EV market")).await.unwrap();

        assert!(started.elapsed() >= Duration::from_secs(2));
        assert!(response.response.contains("[DEMO MODE]"));
        assert!(response.response.contains("EV market"));
        assert!(response.agent_id.starts_with("deep-search-func-"));
    }

    #[tokio::test]
    async fn test_search_appends_length_limit() {
        let mut mock = MockAIProvider::new();
        mock.expect_is_configured().return_const(true);
        mock.expect_generate_text()
            .withf(|_, messages, _| messages[0].content.ends_with("less then 50 sentences."))
            .times(1)
            .returning(|_, _, _| {
                Ok(AIResponse {
                    text: "EVs are growing.".to_string(),
                    usage: TokenUsage::default(),
                    model: "claude-sonnet-4-20250514".to_string(),
                    provider: "anthropic".to_string(),
                })
            });

        let search = DeepSearch::new(Arc::new(mock), DeepSearchConfig::default()).unwrap();
        let response = search.run(&AgentRequest::new("EV market")).await.unwrap();

        assert_eq!(response.response, "EVs are growing.");
        let expected_len = deep_search_prompt("EV market").chars().count();
        assert_eq!(response.metadata["prompt_length"], expected_len);
    }

    #[tokio::test]
    async fn test_search_enables_web_search_tool() {
        let mut mock = MockAIProvider::new();
        mock.expect_is_configured().return_const(true);
        mock.expect_generate_text()
            .withf(|_, _, options| {
                options.tools == [ServerTool::WebSearch { max_uses: 3 }]
                    && options.temperature == Some(0.1)
            })
            .times(1)
            .returning(|_, _, _| {
                Ok(AIResponse {
                    text: "Tesla leads with 45% share.".to_string(),
                    usage: TokenUsage::default(),
                    model: "claude-sonnet-4-20250514".to_string(),
                    provider: "anthropic".to_string(),
                })
            });

        let config = DeepSearchConfig {
            max_searches: 3,
            ..Default::default()
        };
        let search = DeepSearch::new(Arc::new(mock), config).unwrap();
        let response = search.run(&AgentRequest::new("EV market")).await.unwrap();

        assert_eq!(response.response, "Tesla leads with 45% share.");
    }

    #[tokio::test]
    async fn test_failures_become_agent_errors() {
        let mut mock = MockAIProvider::new();
        mock.expect_is_configured().return_const(true);
        mock.expect_generate_text().returning(|_, _, _| {
            Err(CardsError::Upstream {
                status: Some(500),
                message: "api_error - Internal server error".to_string(),
            })
        });

        let search = DeepSearch::new(Arc::new(mock), DeepSearchConfig::default()).unwrap();
        let err = search.run(&AgentRequest::new("anything")).await.unwrap_err();
        assert!(matches!(err, CardsError::AgentExecution(_)));
        assert!(err.to_string().starts_with("Agent execution failed"));
    }
}
