// Common test utilities for integration tests
#![allow(dead_code)]

use std::sync::Once;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use codecomplexity::api::{create_router, AppState};
use codecomplexity::config::{AnalysisConfig, AnalysisFormat, Config, LlmConfig, ServerConfig};
use codecomplexity::llm::prompts::REQUIRED_HEADINGS;
use codecomplexity::llm::LlmProvider;

pub use wiremock;

pub const TEST_API_KEY: &str = "test-key";
pub const COMPLETIONS_PATH: &str = "/v1/chat/completions";

static INIT: Once = Once::new();

/// Initialize tracing subscriber once for tests
pub fn init_test_logger() {
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .try_init();
    });
}

/// Config for `format` whose provider lives at `{server_uri}/v1`.
pub fn test_config(format: AnalysisFormat, server_uri: &str) -> Config {
    let mut llm = LlmConfig::for_format(format);
    llm.api_key = Some(TEST_API_KEY.to_string());
    llm.base_url = format!("{server_uri}/v1");
    llm.timeout_secs = 2;

    Config {
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
            max_body_bytes: 1024 * 1024,
        },
        analysis: AnalysisConfig::for_format(format),
        llm,
    }
}

pub fn app_for(config: Config) -> Router {
    init_test_logger();
    let llm = LlmProvider::new(&config.llm);
    create_router(AppState::new(config, llm))
}

pub fn completion_body(content: &str) -> Value {
    json!({
        "id": "chatcmpl-test",
        "object": "chat.completion",
        "created": 1,
        "model": "llama-3.3-70b-versatile",
        "choices": [
            {
                "index": 0,
                "message": {
                    "role": "assistant",
                    "content": content
                },
                "finish_reason": "stop"
            }
        ],
        "usage": {
            "prompt_tokens": 1,
            "completion_tokens": 1,
            "total_tokens": 2
        }
    })
}

pub fn api_error_body(message: &str, error_type: &str, code: &str) -> Value {
    json!({
        "error": {
            "message": message,
            "type": error_type,
            "param": Value::Null,
            "code": code
        }
    })
}

/// A snippet comfortably above every minimum length.
pub fn sample_code() -> String {
    r#"def find_duplicates(items):
    seen = set()
    dupes = []
    for item in items:
        if item in seen:
            dupes.append(item)
        seen.add(item)
    return dupes
"#
    .to_string()
}

pub fn markdown_with(headings: &[&str]) -> String {
    headings
        .iter()
        .map(|heading| format!("{heading}\nSome analysis text.\n"))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn complete_markdown() -> String {
    markdown_with(&REQUIRED_HEADINGS)
}

/// Markdown with the time complexity heading left out.
pub fn markdown_missing_time() -> String {
    let headings: Vec<&str> = REQUIRED_HEADINGS
        .iter()
        .copied()
        .filter(|heading| !heading.contains("Time Complexity"))
        .collect();
    markdown_with(&headings)
}

pub async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or_else(|_| {
            Value::String(String::from_utf8_lossy(&bytes).into_owned())
        })
    };
    (status, json)
}

pub async fn post_json(app: Router, uri: &str, body: Value) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

pub async fn get(app: Router, uri: &str) -> (StatusCode, Value) {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    send(app, request).await
}
