use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Body of every non-2xx response.
#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
pub struct ErrorBody {
    /// Human-readable description of the failure.
    pub error: String,
    /// HTTP status code, repeated for clients that only see the body.
    pub code: u16,
}

#[derive(Error, Debug)]
pub enum AnalyzerError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Payload too large: {0}")]
    PayloadTooLarge(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Upstream API timeout")]
    UpstreamTimeout,

    #[error("Upstream API error: {0}")]
    Upstream(String),

    #[error("Empty response from upstream API")]
    EmptyResponse,

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl AnalyzerError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            Self::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::UpstreamTimeout => StatusCode::GATEWAY_TIMEOUT,
            Self::Upstream(_) => StatusCode::BAD_GATEWAY,
            Self::EmptyResponse => StatusCode::BAD_GATEWAY,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn is_upstream(&self) -> bool {
        matches!(
            self,
            Self::UpstreamTimeout | Self::Upstream(_) | Self::EmptyResponse
        )
    }

    /// Collapse upstream failures into a plain 500, keeping the message.
    ///
    /// The JSON deployment reports every upstream failure this way; input and
    /// configuration errors pass through untouched.
    pub fn into_internal(self) -> Self {
        if self.is_upstream() {
            Self::Internal(format!("Error from upstream API: {}", self.message()))
        } else {
            self
        }
    }

    fn message(&self) -> String {
        match self {
            Self::Validation(msg)
            | Self::PayloadTooLarge(msg)
            | Self::Config(msg)
            | Self::Upstream(msg)
            | Self::Internal(msg) => msg.clone(),
            Self::UpstreamTimeout | Self::EmptyResponse => self.to_string(),
        }
    }
}

impl IntoResponse for AnalyzerError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(status = status.as_u16(), error = %self, "Request failed");
        }

        let body = Json(ErrorBody {
            error: self.message(),
            code: status.as_u16(),
        });

        (status, body).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AnalyzerError>;
