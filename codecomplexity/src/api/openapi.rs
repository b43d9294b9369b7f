use axum::Json;
use utoipa::OpenApi;
use utoipa_redoc::{Redoc, Servable};

use super::handlers;
use crate::analysis;
use crate::error;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "CodeComplexity API",
        version = "0.2.0",
        description = "Big-O complexity analysis of code snippets, delegated to an LLM and structurally validated.",
    ),
    paths(
        handlers::health::health_check,
        handlers::analyze::analyze_code,
        handlers::analyze::analyze,
    ),
    components(schemas(
        error::ErrorBody,
        analysis::AnalysisRequest,
        analysis::ComplexityReport,
        analysis::MarkdownAnalysis,
        handlers::health::HealthData,
        handlers::health::LlmStatus,
    )),
    tags(
        (name = "health", description = "Health check"),
        (name = "analysis", description = "Code complexity analysis (one endpoint per deployment format)"),
    ),
)]
pub struct ApiDoc;

pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

pub fn redoc_router<S: Clone + Send + Sync + 'static>() -> axum::Router<S> {
    Redoc::with_url("/docs", ApiDoc::openapi()).into()
}
