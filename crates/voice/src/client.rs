//! Vapi REST client.

use std::collections::BTreeMap;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::VoiceError;

/// Vapi API base URL.
const VAPI_API_URL: &str = "https://api.vapi.ai";

/// Body of `POST /call`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCall {
    pub assistant_id: String,
    pub phone_number_id: String,
    pub customer: Customer,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assistant_overrides: Option<AssistantOverrides>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Customer {
    pub number: String,
}

/// Template variables substituted into the assistant prompt.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssistantOverrides {
    pub variable_values: BTreeMap<String, String>,
}

/// The part of Vapi's call object we use.
#[derive(Debug, Clone, Deserialize)]
pub struct CallRecord {
    pub id: String,
}

/// Anything that can place a call.
#[async_trait]
pub trait CallClient: Send + Sync {
    async fn create_call(&self, request: &CreateCall) -> Result<CallRecord, VoiceError>;
}

/// HTTP client for the Vapi API.
pub struct VapiClient {
    api_key: String,
    base_url: String,
    client: reqwest::Client,
}

impl VapiClient {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: VAPI_API_URL.to_string(),
            client: reqwest::Client::new(),
        }
    }

    /// Set a custom base URL.
    #[must_use]
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }
}

#[async_trait]
impl CallClient for VapiClient {
    async fn create_call(&self, request: &CreateCall) -> Result<CallRecord, VoiceError> {
        let url = format!("{}/call", self.base_url.trim_end_matches('/'));
        debug!(url = %url, "Creating Vapi call");

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(VoiceError::Api {
                status: status.as_u16(),
                message,
            });
        }

        Ok(response.json::<CallRecord>().await?)
    }
}
