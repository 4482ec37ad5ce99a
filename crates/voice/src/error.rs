//! Error types for the voice-call service.

use thiserror::Error;

/// Errors that can occur when triggering a call.
#[derive(Debug, Error)]
pub enum VoiceError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Service is not configured
    #[error("Voice service not configured: {0}")]
    NotConfigured(String),

    /// Vapi rejected the request
    #[error("Vapi API error ({status}): {message}")]
    Api { status: u16, message: String },
}
