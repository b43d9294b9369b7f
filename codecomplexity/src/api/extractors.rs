use axum::extract::rejection::JsonRejection;
use axum::extract::FromRequest;
use axum::http::StatusCode;

use crate::error::AnalyzerError;

/// `axum::Json` whose rejections use the service's error body.
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(AnalyzerError))]
pub struct AppJson<T>(pub T);

impl From<JsonRejection> for AnalyzerError {
    fn from(rejection: JsonRejection) -> Self {
        map_json_rejection(rejection)
    }
}

fn map_json_rejection(rejection: JsonRejection) -> AnalyzerError {
    match rejection {
        JsonRejection::JsonDataError(err) => {
            let message = err.body_text();
            if let Some(field) = extract_missing_field(&message) {
                AnalyzerError::Validation(format!("Missing required field: {field}"))
            } else {
                AnalyzerError::Validation(format!("Invalid JSON: {message}"))
            }
        }
        JsonRejection::JsonSyntaxError(err) => {
            AnalyzerError::Validation(format!("JSON syntax error: {}", err.body_text()))
        }
        JsonRejection::MissingJsonContentType(_) => AnalyzerError::Validation(
            "Missing `Content-Type: application/json` header".to_string(),
        ),
        JsonRejection::BytesRejection(err) if err.status() == StatusCode::PAYLOAD_TOO_LARGE => {
            AnalyzerError::PayloadTooLarge("Request body too large".to_string())
        }
        JsonRejection::BytesRejection(_) => {
            AnalyzerError::Internal("Failed to read request body".to_string())
        }
        _ => AnalyzerError::Validation(rejection.body_text()),
    }
}

fn extract_missing_field(message: &str) -> Option<&str> {
    let prefix = "missing field `";
    let start = message.find(prefix)? + prefix.len();
    let remaining = message.get(start..)?;
    let end = remaining.find('`')?;
    remaining.get(..end)
}
