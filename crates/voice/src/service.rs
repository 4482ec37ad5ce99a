//! Voice-call service with a demo short-circuit.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

use serde_json::{json, Value};
use tokio::time::Instant;
use tracing::{error, info};

use crate::client::{AssistantOverrides, CallClient, CreateCall, Customer, VapiClient};
use crate::error::VoiceError;
use crate::types::{OutboundCallRequest, OutboundCallResponse};

/// Simulated latency of a demo call.
pub const DEFAULT_DEMO_DELAY: Duration = Duration::from_millis(1500);

/// Settings for [`VoiceService`].
#[derive(Debug, Clone)]
pub struct VoiceConfig {
    /// Vapi private API key; required unless `demo_mode` is set
    pub api_key: Option<String>,
    /// Vapi phone number calls are placed from
    pub phone_number_id: String,
    /// Vapi assistant that runs the conversation
    pub assistant_id: String,
    pub demo_mode: bool,
    pub demo_delay: Duration,
}

#[derive(Debug, Clone, Copy)]
enum CallKind {
    Outbound,
    Simple,
}

impl CallKind {
    fn demo_prefix(self) -> &'static str {
        match self {
            Self::Outbound => "demo-call",
            Self::Simple => "demo-simple-call",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::Outbound => "call",
            Self::Simple => "simple call",
        }
    }
}

/// Triggers outbound calls through Vapi.
pub struct VoiceService {
    client: Option<Arc<dyn CallClient>>,
    config: VoiceConfig,
}

impl VoiceService {
    /// Build the service, creating a Vapi client unless in demo mode.
    pub fn new(config: VoiceConfig) -> Result<Self, VoiceError> {
        if config.demo_mode {
            info!("DEMO_MODE enabled: outbound calls will be simulated");
            return Ok(Self {
                client: None,
                config,
            });
        }

        let api_key = config
            .api_key
            .clone()
            .filter(|k| !k.is_empty())
            .ok_or_else(|| {
                VoiceError::NotConfigured("VAPI_API_KEY environment variable is required".into())
            })?;

        Ok(Self::with_client(config, Arc::new(VapiClient::new(api_key))))
    }

    /// Build the service around an existing client.
    pub fn with_client(config: VoiceConfig, client: Arc<dyn CallClient>) -> Self {
        Self {
            client: Some(client),
            config,
        }
    }

    /// Call a listener and have the assistant recap the market overview.
    pub async fn make_outbound_call(&self, request: &OutboundCallRequest) -> OutboundCallResponse {
        let variables = BTreeMap::from([
            ("market_overview".to_string(), request.market_overview.clone()),
            ("name".to_string(), request.name.clone()),
            ("action_to_take".to_string(), request.action_to_take.clone()),
        ]);

        let metadata = json!({
            "target_number": request.target_number,
            "market_overview_length": request.market_overview.chars().count(),
            "name": request.name,
            "action_to_take": request.action_to_take,
            "phone_number_id": self.config.phone_number_id,
            "assistant_id": self.config.assistant_id,
        });

        self.trigger(
            CallKind::Outbound,
            &request.target_number,
            Some(AssistantOverrides {
                variable_values: variables,
            }),
            metadata,
        )
        .await
    }

    /// Call a number with the assistant's default behaviour.
    pub async fn make_simple_call(&self, target_number: &str) -> OutboundCallResponse {
        let metadata = json!({
            "target_number": target_number,
            "phone_number_id": self.config.phone_number_id,
            "assistant_id": self.config.assistant_id,
            "call_type": "simple",
        });

        self.trigger(CallKind::Simple, target_number, None, metadata)
            .await
    }

    async fn trigger(
        &self,
        kind: CallKind,
        target_number: &str,
        overrides: Option<AssistantOverrides>,
        metadata: Value,
    ) -> OutboundCallResponse {
        let started = Instant::now();
        info!(target_number, kind = kind.label(), "Starting outbound call");

        let result = if self.config.demo_mode {
            info!(target_number, "DEMO_MODE: simulating outbound call");
            tokio::time::sleep(self.config.demo_delay).await;
            Ok(format!(
                "{}-{}",
                kind.demo_prefix(),
                chrono::Utc::now().timestamp()
            ))
        } else {
            self.place(target_number, overrides).await
        };

        let execution_time = started.elapsed().as_secs_f64();

        match result {
            Ok(call_id) => {
                info!(call_id = %call_id, "Outbound call initiated successfully");
                OutboundCallResponse {
                    success: true,
                    call_id: Some(call_id),
                    message: format!("Outbound {} triggered successfully", kind.label()),
                    assistant_id: self.config.assistant_id.clone(),
                    execution_time,
                    metadata,
                }
            }
            Err(e) => {
                let message = format!("Error while triggering the {}: {e}", kind.label());
                error!(error = %e, "{message}");

                let mut metadata = json!({ "error": e.to_string() });
                if matches!(kind, CallKind::Simple) {
                    metadata["call_type"] = json!("simple");
                }

                OutboundCallResponse {
                    success: false,
                    call_id: None,
                    message,
                    assistant_id: self.config.assistant_id.clone(),
                    execution_time,
                    metadata,
                }
            }
        }
    }

    async fn place(
        &self,
        target_number: &str,
        overrides: Option<AssistantOverrides>,
    ) -> Result<String, VoiceError> {
        let client = self
            .client
            .as_ref()
            .ok_or_else(|| VoiceError::NotConfigured("no Vapi client".into()))?;

        let request = CreateCall {
            assistant_id: self.config.assistant_id.clone(),
            phone_number_id: self.config.phone_number_id.clone(),
            customer: Customer {
                number: target_number.to_string(),
            },
            assistant_overrides: overrides,
        };

        Ok(client.create_call(&request).await?.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::CallRecord;
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Records requests and answers with a fixed result.
    struct FakeClient {
        fail: bool,
        seen: Mutex<Vec<CreateCall>>,
    }

    impl FakeClient {
        fn new(fail: bool) -> Arc<Self> {
            Arc::new(Self {
                fail,
                seen: Mutex::new(Vec::new()),
            })
        }
    }

    #[async_trait]
    impl CallClient for FakeClient {
        async fn create_call(&self, request: &CreateCall) -> Result<CallRecord, VoiceError> {
            self.seen.lock().unwrap().push(request.clone());
            if self.fail {
                Err(VoiceError::Api {
                    status: 400,
                    message: "customer.number must be a valid phone number".to_string(),
                })
            } else {
                Ok(CallRecord {
                    id: "call-123".to_string(),
                })
            }
        }
    }

    fn config(demo_mode: bool) -> VoiceConfig {
        VoiceConfig {
            api_key: None,
            phone_number_id: "phone-1".to_string(),
            assistant_id: "assistant-1".to_string(),
            demo_mode,
            demo_delay: DEFAULT_DEMO_DELAY,
        }
    }

    fn overview_request() -> OutboundCallRequest {
        OutboundCallRequest {
            target_number: "+33600000000".to_string(),
            market_overview: "EV sales grew 20%".to_string(),
            name: "Ada".to_string(),
            action_to_take: "Approve budget".to_string(),
        }
    }

    #[test]
    fn test_requires_api_key() {
        assert!(matches!(
            VoiceService::new(config(false)),
            Err(VoiceError::NotConfigured(_))
        ));
    }

    #[tokio::test]
    async fn test_outbound_call_passes_variables() {
        let client = FakeClient::new(false);
        let service = VoiceService::with_client(config(false), client.clone());

        let response = service.make_outbound_call(&overview_request()).await;

        assert!(response.success);
        assert_eq!(response.call_id.as_deref(), Some("call-123"));
        assert_eq!(response.assistant_id, "assistant-1");
        assert_eq!(response.metadata["market_overview_length"], 17);

        let seen = client.seen.lock().unwrap();
        let overrides = seen[0].assistant_overrides.as_ref().unwrap();
        assert_eq!(overrides.variable_values["name"], "Ada");
        assert_eq!(seen[0].phone_number_id, "phone-1");
    }

    #[tokio::test]
    async fn test_simple_call_has_no_overrides() {
        let client = FakeClient::new(false);
        let service = VoiceService::with_client(config(false), client.clone());

        let response = service.make_simple_call("+33600000000").await;

        assert!(response.success);
        assert_eq!(response.metadata["call_type"], "simple");
        assert!(client.seen.lock().unwrap()[0].assistant_overrides.is_none());
    }

    #[tokio::test]
    async fn test_failure_is_reported_not_raised() {
        let service = VoiceService::with_client(config(false), FakeClient::new(true));

        let response = service.make_simple_call("not-a-number").await;

        assert!(!response.success);
        assert!(response.call_id.is_none());
        assert!(response.message.contains("valid phone number"));
        assert_eq!(response.metadata["call_type"], "simple");
        assert!(response.metadata["error"].is_string());
    }

    #[tokio::test(start_paused = true)]
    async fn test_demo_mode() {
        let service = VoiceService::new(config(true)).unwrap();
        let started = Instant::now();

        let outbound = service.make_outbound_call(&overview_request()).await;
        let simple = service.make_simple_call("+33600000000").await;

        assert!(started.elapsed() >= DEFAULT_DEMO_DELAY * 2);
        assert!(outbound.call_id.unwrap().starts_with("demo-call-"));
        assert!(simple.call_id.unwrap().starts_with("demo-simple-call-"));
    }
}
