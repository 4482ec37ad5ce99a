//! Integration tests for the Vapi client.
//!
//! A local axum server stands in for the Vapi API so the real HTTP path,
//! headers and payload are exercised.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    routing::post,
    Json, Router,
};
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tokio::sync::RwLock;

use voice::{OutboundCallRequest, VapiClient, VoiceConfig, VoiceService};

// =============================================================================
// Mock Vapi Server
// =============================================================================

#[derive(Default)]
struct MockVapiState {
    /// Last `POST /call` body received.
    last_body: RwLock<Option<Value>>,
    /// Last `Authorization` header received.
    last_auth: RwLock<Option<String>>,
}

async fn mock_create_call(
    State(state): State<Arc<MockVapiState>>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> impl IntoResponse {
    *state.last_auth.write().await = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    *state.last_body.write().await = Some(body.clone());

    if body["customer"]["number"] == "invalid" {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "message": "customer.number must be a valid phone number" })),
        );
    }

    (StatusCode::CREATED, Json(json!({ "id": "call-abc", "status": "queued" })))
}

async fn start_mock_vapi() -> (SocketAddr, Arc<MockVapiState>) {
    let state = Arc::new(MockVapiState::default());

    let app = Router::new()
        .route("/call", post(mock_create_call))
        .with_state(state.clone());

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    tokio::time::sleep(Duration::from_millis(50)).await;

    (addr, state)
}

fn service(addr: SocketAddr) -> VoiceService {
    let client = VapiClient::new("vapi-secret").with_base_url(format!("http://{addr}"));
    VoiceService::with_client(
        VoiceConfig {
            api_key: Some("vapi-secret".to_string()),
            phone_number_id: "phone-1".to_string(),
            assistant_id: "assistant-1".to_string(),
            demo_mode: false,
            demo_delay: Duration::ZERO,
        },
        Arc::new(client),
    )
}

// =============================================================================
// Tests
// =============================================================================

#[tokio::test]
async fn test_outbound_call_reaches_vapi() {
    let (addr, state) = start_mock_vapi().await;

    let response = service(addr)
        .make_outbound_call(&OutboundCallRequest {
            target_number: "+33600000000".to_string(),
            market_overview: "EV sales grew 20%".to_string(),
            name: "Ada".to_string(),
            action_to_take: "Approve budget".to_string(),
        })
        .await;

    assert!(response.success, "{}", response.message);
    assert_eq!(response.call_id.as_deref(), Some("call-abc"));

    let body = state.last_body.read().await.clone().unwrap();
    assert_eq!(body["assistantId"], "assistant-1");
    assert_eq!(body["phoneNumberId"], "phone-1");
    assert_eq!(body["customer"]["number"], "+33600000000");
    assert_eq!(
        body["assistantOverrides"]["variableValues"]["action_to_take"],
        "Approve budget"
    );
    assert_eq!(
        state.last_auth.read().await.as_deref(),
        Some("Bearer vapi-secret")
    );
}

#[tokio::test]
async fn test_simple_call_sends_no_overrides() {
    let (addr, state) = start_mock_vapi().await;

    let response = service(addr).make_simple_call("+33600000000").await;

    assert!(response.success);
    let body = state.last_body.read().await.clone().unwrap();
    assert!(body.get("assistantOverrides").is_none());
}

#[tokio::test]
async fn test_rejected_call_reports_failure() {
    let (addr, _state) = start_mock_vapi().await;

    let response = service(addr).make_simple_call("invalid").await;

    assert!(!response.success);
    assert!(response.call_id.is_none());
    assert!(response.message.contains("400"));
    assert!(response.metadata["error"]
        .as_str()
        .unwrap()
        .contains("valid phone number"));
}
