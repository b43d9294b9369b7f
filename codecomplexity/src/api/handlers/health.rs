use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::api::state::AppState;
use crate::llm::LlmBackend;

#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
pub struct HealthData {
    pub status: String,
    pub version: String,
    /// Response format served by the analysis endpoint (`markdown` or `json`).
    pub format: String,
    pub llm: LlmStatus,
}

#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
pub struct LlmStatus {
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
}

/// `GET /health`
///
/// Reports configuration only; the upstream provider is never contacted.
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses(
        (status = 200, description = "Service health status", body = HealthData),
    )
)]
pub async fn health_check(State(state): State<AppState>) -> Json<HealthData> {
    let llm = match state.llm.backend() {
        LlmBackend::OpenAICompatible { .. } => LlmStatus {
            status: "configured".to_string(),
            model: state.llm.model().map(str::to_string),
        },
        LlmBackend::Unavailable { .. } => LlmStatus {
            status: "unconfigured".to_string(),
            model: None,
        },
    };

    Json(HealthData {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        format: state.analysis.format().to_string(),
        llm,
    })
}
