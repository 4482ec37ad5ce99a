//! Mapping of service errors onto HTTP responses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use cards::CardsError;
use serde_json::json;
use thiserror::Error;
use tracing::error;

/// Errors a handler can return.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Cards(#[from] CardsError),

    /// A service was not set up at startup
    #[error("{0} is not configured")]
    Unavailable(&'static str),
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Cards(e) if e.is_caller_input() => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Cards(CardsError::UpstreamUnavailable { .. }) => StatusCode::SERVICE_UNAVAILABLE,
            Self::Cards(CardsError::AgentExecution(_)) => StatusCode::BAD_GATEWAY,
            Self::Cards(_) | Self::Unavailable(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            error!(status = status.as_u16(), error = %self, "Request failed");
        }

        (
            status,
            Json(json!({
                "status": "error",
                "error": self.to_string(),
            })),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cards::DependencyViolation;

    #[test]
    fn test_status_codes() {
        let dependency: ApiError = CardsError::from(DependencyViolation::MissingCard {
            title: "Call".to_string(),
            dep_id: "task-9".to_string(),
        })
        .into();
        assert_eq!(dependency.status_code(), StatusCode::UNPROCESSABLE_ENTITY);

        let exhausted: ApiError = CardsError::UpstreamUnavailable {
            attempts: 3,
            reason: "overloaded".to_string(),
        }
        .into();
        assert_eq!(exhausted.status_code(), StatusCode::SERVICE_UNAVAILABLE);

        let agent: ApiError = CardsError::AgentExecution("boom".to_string()).into();
        assert_eq!(agent.status_code(), StatusCode::BAD_GATEWAY);

        assert_eq!(
            ApiError::Unavailable("Voice service").status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_message_is_kept() {
        let err: ApiError = CardsError::schema("missing field `task_type`").into();
        assert!(err.to_string().contains("missing field `task_type`"));
    }
}
