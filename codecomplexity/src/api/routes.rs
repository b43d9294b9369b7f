use std::any::Any;

use axum::{
    extract::DefaultBodyLimit,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{self, CorsLayer};
use tower_http::trace::TraceLayer;

use super::handlers;
use super::openapi;
use super::AppState;
use crate::config::AnalysisFormat;
use crate::error::AnalyzerError;

pub fn create_router(state: AppState) -> Router {
    let format = state.config.analysis.format;
    let max_body_bytes = state.config.server.max_body_bytes;
    let analysis = match format {
        AnalysisFormat::Markdown => post(handlers::analyze_code),
        AnalysisFormat::Json => post(handlers::analyze),
    };

    let routes = Router::new()
        .route("/health", get(handlers::health_check))
        .route(format.endpoint(), analysis)
        .route("/openapi.json", get(openapi::openapi_json))
        .merge(openapi::redoc_router());

    with_middleware(routes, max_body_bytes).with_state(state)
}

fn with_middleware<S>(router: Router<S>, max_body_bytes: usize) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    // Development posture: any origin may call the API. Restrict for production.
    let cors = CorsLayer::new()
        .allow_origin(cors::Any)
        .allow_methods(cors::Any)
        .allow_headers(cors::Any);

    // Oversized bodies surface as a `JsonRejection`, so they get the JSON error body.
    router
        .layer(DefaultBodyLimit::max(max_body_bytes))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .layer(CatchPanicLayer::custom(handle_panic))
}

fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = err
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| err.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic");
    tracing::error!(panic = detail, "Handler panicked");

    AnalyzerError::Internal("An unexpected error occurred".to_string()).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    async fn boom() -> &'static str {
        panic!("handler blew up")
    }

    #[tokio::test]
    async fn panicking_handler_becomes_json_500() {
        let app = with_middleware(Router::new().route("/boom", get(boom)), 1024);

        let response = app
            .oneshot(Request::builder().uri("/boom").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(json["code"], 500);
        assert_eq!(json["error"], "An unexpected error occurred");
    }
}
