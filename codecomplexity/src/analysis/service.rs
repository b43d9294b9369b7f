use std::sync::Arc;

use super::types::{AnalysisOutcome, ComplexityReport, MarkdownAnalysis, Validation};
use super::validator::{validate_json_report, validate_markdown};
use crate::config::{AnalysisConfig, AnalysisFormat};
use crate::error::{AnalyzerError, Result};
use crate::llm::prompts::{
    json_user_prompt, JSON_SYSTEM_PROMPT, MARKDOWN_RETRY_PROMPT, MARKDOWN_SYSTEM_PROMPT,
};
use crate::llm::CompletionClient;

/// Runs one analysis request end to end: input checks, upstream call,
/// structural validation, and the format's recovery path.
#[derive(Clone)]
pub struct AnalysisService {
    client: Arc<dyn CompletionClient>,
    settings: AnalysisConfig,
}

impl AnalysisService {
    pub fn new(client: Arc<dyn CompletionClient>, settings: AnalysisConfig) -> Self {
        Self { client, settings }
    }

    pub fn format(&self) -> AnalysisFormat {
        self.settings.format
    }

    pub fn settings(&self) -> &AnalysisConfig {
        &self.settings
    }

    /// Trim `code` and enforce the configured length bounds.
    ///
    /// Lengths are counted in characters after trimming. Nothing is sent
    /// upstream for input rejected here.
    pub fn validate_input<'a>(&self, code: &'a str) -> Result<&'a str> {
        let code = code.trim();
        let length = code.chars().count();

        if length == 0 {
            return Err(AnalyzerError::Validation(
                "Code snippet cannot be empty".to_string(),
            ));
        }

        if length < self.settings.min_code_length {
            return Err(AnalyzerError::Validation(format!(
                "Provide a code snippet of at least {} characters",
                self.settings.min_code_length
            )));
        }

        if length > self.settings.max_code_length {
            return Err(AnalyzerError::PayloadTooLarge(format!(
                "Code snippet too large (>{} chars)",
                self.settings.max_code_length
            )));
        }

        Ok(code)
    }

    /// Analyze `code` in the configured format.
    pub async fn analyze(&self, code: &str) -> Result<AnalysisOutcome> {
        match self.settings.format {
            AnalysisFormat::Markdown => self
                .analyze_markdown(code)
                .await
                .map(AnalysisOutcome::Markdown),
            AnalysisFormat::Json => self.analyze_json(code).await.map(AnalysisOutcome::Report),
        }
    }

    /// Markdown flow: one stricter retry on missing headings, then pass-through.
    ///
    /// A transport failure on the first call is surfaced. After a structural
    /// failure the retry's text is used only if it is itself valid; otherwise
    /// the first answer is returned unchanged, even if the retry call failed.
    pub async fn analyze_markdown(&self, code: &str) -> Result<MarkdownAnalysis> {
        let code = self.validate_input(code)?;

        let first = self
            .client
            .complete(MARKDOWN_SYSTEM_PROMPT, code)
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "LLM call failed on first attempt");
                e
            })?;

        let analysis = match validate_markdown(&first) {
            Validation::Valid(_) => first,
            Validation::Invalid(reason) => {
                tracing::info!(%reason, "Retrying completion with stricter prompt due to missing sections");
                self.retry_markdown(code, first).await
            }
        };

        if analysis.is_empty() {
            return Err(AnalyzerError::EmptyResponse);
        }

        Ok(MarkdownAnalysis { analysis })
    }

    async fn retry_markdown(&self, code: &str, original: String) -> String {
        match self.client.complete(MARKDOWN_RETRY_PROMPT, code).await {
            Ok(retried) => match validate_markdown(&retried) {
                Validation::Valid(_) => retried,
                Validation::Invalid(reason) => {
                    tracing::warn!(%reason, "Retry still missing sections; keeping first answer");
                    original
                }
            },
            Err(e) => {
                tracing::error!(error = %e, "LLM call failed on retry; keeping first answer");
                original
            }
        }
    }

    /// JSON flow: no retry. Unparseable output yields the constant fallback and
    /// every upstream failure is reported as a 500.
    ///
    /// Bounds apply to the trimmed snippet, but the fenced prompt carries the
    /// snippet exactly as submitted.
    pub async fn analyze_json(&self, code: &str) -> Result<ComplexityReport> {
        self.validate_input(code)?;

        let text = self
            .client
            .complete(JSON_SYSTEM_PROMPT, &json_user_prompt(code))
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "LLM call failed");
                e.into_internal()
            })?;

        if text.is_empty() {
            return Err(AnalyzerError::EmptyResponse.into_internal());
        }

        match validate_json_report(&text) {
            Validation::Valid(report) => Ok(report),
            Validation::Invalid(reason) => {
                tracing::warn!(%reason, "Failed to parse valid JSON from LLM response; using fallback");
                Ok(ComplexityReport::fallback())
            }
        }
    }
}
