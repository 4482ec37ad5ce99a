//! Error types for the cards crate.

use thiserror::Error;

/// Substrings that mark an upstream failure as overload or rate limiting.
const TRANSIENT_MARKERS: &[&str] = &["overloaded", "rate limit", "rate_limit", "429", "529"];

/// Ways a generated batch can break its dependency graph.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DependencyViolation {
    #[error("Invalid dependency graph: Card '{title}' depends on non-existent card_id '{dep_id}'.")]
    MissingCard { title: String, dep_id: String },

    #[error("Invalid dependency graph: card_id '{card_id}' is used by more than one card.")]
    DuplicateCardId { card_id: String },

    #[error("Invalid dependency graph: circular dependency {}", cycle.join(" -> "))]
    Cycle { cycle: Vec<String> },
}

/// Error taxonomy for card generation and the services around it.
#[derive(Error, Debug, Clone)]
pub enum CardsError {
    // Response-shape errors: deterministic, never retried
    #[error("No valid JSON object found in the AI response: {reason}")]
    Extraction { reason: String },

    #[error("AI model returned invalid data{}: {reason}", describe_record(*index, card_id.as_deref()))]
    SchemaValidation {
        index: Option<usize>,
        card_id: Option<String>,
        reason: String,
    },

    #[error(transparent)]
    Dependency(#[from] DependencyViolation),

    // Upstream errors
    #[error("Upstream error{}: {message}", status.map(|s| format!(" ({s})")).unwrap_or_default())]
    Upstream { status: Option<u16>, message: String },

    #[error("AI service is currently unavailable after {attempts} attempts: {reason}")]
    UpstreamUnavailable { attempts: u32, reason: String },

    #[error("AI provider not configured: {provider}")]
    ProviderNotConfigured { provider: String },

    #[error("Agent execution failed: {0}")]
    AgentExecution(String),

    // General errors
    #[error("Failed to parse JSON: {reason}")]
    JsonParseError { reason: String },
}

fn describe_record(index: Option<usize>, card_id: Option<&str>) -> String {
    match (index, card_id) {
        (Some(i), Some(id)) => format!(" in card #{i} ('{id}')"),
        (Some(i), None) => format!(" in card #{i}"),
        (None, _) => String::new(),
    }
}

impl CardsError {
    /// Build a schema error that is not tied to a single record.
    pub fn schema(reason: impl Into<String>) -> Self {
        Self::SchemaValidation {
            index: None,
            card_id: None,
            reason: reason.into(),
        }
    }

    /// Whether an upstream failure looks like overload or rate limiting.
    ///
    /// Only [`CardsError::Upstream`] can be transient; every other kind is
    /// either deterministic or already final.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Upstream { status, message } => {
                if matches!(status, Some(429 | 529)) {
                    return true;
                }
                let message = message.to_lowercase();
                TRANSIENT_MARKERS.iter().any(|m| message.contains(m))
            }
            _ => false,
        }
    }

    /// Whether the failure comes from the shape of the model's reply.
    pub fn is_caller_input(&self) -> bool {
        matches!(
            self,
            Self::Extraction { .. } | Self::SchemaValidation { .. } | Self::Dependency(_)
        )
    }
}

impl From<serde_json::Error> for CardsError {
    fn from(err: serde_json::Error) -> Self {
        Self::JsonParseError {
            reason: err.to_string(),
        }
    }
}

/// Result type alias for cards operations
pub type CardsResult<T> = Result<T, CardsError>;
