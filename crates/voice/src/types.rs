//! Request and response payloads for outbound calls.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Call that reads a market overview to the listener.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutboundCallRequest {
    /// E.164 number to dial
    pub target_number: String,
    /// Overview the assistant summarises on the call
    pub market_overview: String,
    /// Listener's name
    pub name: String,
    /// Follow-up the assistant should mention
    pub action_to_take: String,
}

/// Call without any assistant variables.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimpleCallRequest {
    pub target_number: String,
}

/// Outcome of a call trigger. Failures are reported here, not raised.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutboundCallResponse {
    pub success: bool,
    pub call_id: Option<String>,
    pub message: String,
    pub assistant_id: String,
    pub execution_time: f64,
    pub metadata: Value,
}
