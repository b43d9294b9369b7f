//! Analysis endpoints. A deployment mounts exactly one of them, matching
//! its configured response format.

use axum::extract::State;
use axum::Json;

use crate::analysis::{AnalysisRequest, ComplexityReport, MarkdownAnalysis};
use crate::api::extractors::AppJson;
use crate::api::state::AppState;
use crate::error::{ErrorBody, Result};

/// `POST /analyze-code`
///
/// Markdown analysis with five fixed sections. Missing sections trigger one
/// stricter retry; if that also fails the first answer is returned as-is.
#[utoipa::path(
    post,
    path = "/analyze-code",
    tag = "analysis",
    request_body = AnalysisRequest,
    responses(
        (status = 200, description = "Markdown analysis", body = MarkdownAnalysis),
        (status = 400, description = "Code missing or too short", body = ErrorBody),
        (status = 413, description = "Code too large", body = ErrorBody),
        (status = 500, description = "Provider credential not configured", body = ErrorBody),
        (status = 502, description = "Upstream error or empty response", body = ErrorBody),
        (status = 504, description = "Upstream timeout", body = ErrorBody),
    )
)]
pub async fn analyze_code(
    State(state): State<AppState>,
    AppJson(req): AppJson<AnalysisRequest>,
) -> Result<Json<MarkdownAnalysis>> {
    state.analysis.analyze_markdown(&req.code).await.map(Json)
}

/// `POST /analyze`
///
/// Structured analysis. Unparseable model output yields a constant fallback
/// report; upstream failures are reported as 500.
#[utoipa::path(
    post,
    path = "/analyze",
    tag = "analysis",
    request_body = AnalysisRequest,
    responses(
        (status = 200, description = "Complexity report (or the fallback report)", body = ComplexityReport),
        (status = 400, description = "Code missing", body = ErrorBody),
        (status = 413, description = "Code too large", body = ErrorBody),
        (status = 500, description = "Missing credential or upstream failure", body = ErrorBody),
    )
)]
pub async fn analyze(
    State(state): State<AppState>,
    AppJson(req): AppJson<AnalysisRequest>,
) -> Result<Json<ComplexityReport>> {
    state.analysis.analyze_json(&req.code).await.map(Json)
}
