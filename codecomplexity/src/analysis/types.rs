use serde::{Deserialize, Serialize};

/// Body of the analysis endpoint.
#[derive(Debug, Clone, Deserialize, utoipa::ToSchema)]
pub struct AnalysisRequest {
    /// Source code to analyze. Must not be blank.
    pub code: String,
}

/// Structured analysis returned by the JSON deployment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct ComplexityReport {
    pub time_complexity: String,
    pub space_complexity: String,
    pub improvements: Vec<String>,
    pub explanation: String,
}

impl ComplexityReport {
    /// Constant result used when the model's answer cannot be parsed.
    pub fn fallback() -> Self {
        Self {
            time_complexity: "Unable to determine".to_string(),
            space_complexity: "Unable to determine".to_string(),
            improvements: vec!["Unable to analyze code".to_string()],
            explanation: "The system encountered an error while analyzing your code. \
                          Please try again with a clearer code snippet."
                .to_string(),
        }
    }
}

/// Markdown document returned by the Markdown deployment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct MarkdownAnalysis {
    pub analysis: String,
}

/// Result of one analysis request, in whichever shape the deployment serves.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum AnalysisOutcome {
    Report(ComplexityReport),
    Markdown(MarkdownAnalysis),
}

/// Outcome of checking model output against a response contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Validation<T> {
    Valid(T),
    Invalid(String),
}

impl<T> Validation<T> {
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fallback_matches_published_wording() {
        let fallback = ComplexityReport::fallback();
        assert_eq!(fallback.time_complexity, "Unable to determine");
        assert_eq!(fallback.space_complexity, "Unable to determine");
        assert_eq!(fallback.improvements, vec!["Unable to analyze code"]);
        assert_eq!(
            fallback.explanation,
            "The system encountered an error while analyzing your code. Please try again with a clearer code snippet."
        );
    }

    #[test]
    fn outcome_serializes_without_tag() {
        let markdown = AnalysisOutcome::Markdown(MarkdownAnalysis {
            analysis: "# Code Complexity Analysis".to_string(),
        });
        let json = serde_json::to_value(&markdown).expect("serialize");
        assert_eq!(json, serde_json::json!({ "analysis": "# Code Complexity Analysis" }));

        let report = AnalysisOutcome::Report(ComplexityReport::fallback());
        let json = serde_json::to_value(&report).expect("serialize");
        assert_eq!(json["time_complexity"], "Unable to determine");
        assert!(json.get("analysis").is_none());
    }
}
