use std::time::Duration;

use async_openai::{
    config::OpenAIConfig,
    error::OpenAIError,
    types::{
        ChatCompletionRequestSystemMessageArgs, ChatCompletionRequestUserMessageArgs,
        CreateChatCompletionRequest, CreateChatCompletionRequestArgs, CreateChatCompletionResponse,
    },
    Client,
};
use async_trait::async_trait;

use crate::{
    config::LlmConfig,
    error::{AnalyzerError, Result},
    llm::CompletionClient,
};

/// Longest slice of an upstream error body that is written to the log.
const ERROR_PREVIEW_CHARS: usize = 300;

#[derive(Clone)]
pub struct LlmApiClient {
    client: Client<OpenAIConfig>,
    model: String,
    base_url: String,
    temperature: f32,
    max_tokens: Option<u32>,
    timeout: Duration,
}

impl LlmApiClient {
    pub fn new(config: &LlmConfig, api_key: &str) -> Result<Self> {
        let timeout = Duration::from_secs(config.timeout_secs);

        let openai_config = OpenAIConfig::new()
            .with_api_base(config.base_url.trim_end_matches('/'))
            .with_api_key(api_key);

        let http_client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|error| {
                AnalyzerError::Internal(format!("Failed to create LLM HTTP client: {error}"))
            })?;

        // async-openai retries 429/5xx on its own with exponential backoff. The
        // analysis flow owns the only retry, so the library must give up at once.
        let backoff = backoff::ExponentialBackoff {
            max_elapsed_time: Some(Duration::ZERO),
            ..Default::default()
        };

        let client = Client::with_config(openai_config)
            .with_http_client(http_client)
            .with_backoff(backoff);

        Ok(Self {
            client,
            model: config.model.clone(),
            base_url: config.base_url.clone(),
            temperature: config.temperature,
            max_tokens: config.max_tokens,
            timeout,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    fn build_request(
        &self,
        system_prompt: &str,
        user_content: &str,
    ) -> Result<CreateChatCompletionRequest> {
        let messages = vec![
            ChatCompletionRequestSystemMessageArgs::default()
                .content(system_prompt)
                .build()
                .map_err(|error| {
                    AnalyzerError::Internal(format!("Invalid system prompt: {error}"))
                })?
                .into(),
            ChatCompletionRequestUserMessageArgs::default()
                .content(user_content)
                .build()
                .map_err(|error| AnalyzerError::Internal(format!("Invalid user prompt: {error}")))?
                .into(),
        ];

        let mut request = CreateChatCompletionRequestArgs::default();
        request
            .model(self.model.clone())
            .messages(messages)
            .temperature(self.temperature);

        if let Some(max_tokens) = self.max_tokens {
            request.max_tokens(max_tokens);
        }

        request.build().map_err(|error| {
            AnalyzerError::Internal(format!("Invalid LLM completion request: {error}"))
        })
    }

    /// First choice's text. A choice without content counts as empty text;
    /// a response without choices is malformed.
    fn extract_content(response: CreateChatCompletionResponse) -> Result<String> {
        let choice = response
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| AnalyzerError::Upstream("LLM response contained no choices".into()))?;

        Ok(choice.message.content.unwrap_or_default())
    }

    fn map_openai_error(error: OpenAIError) -> AnalyzerError {
        match error {
            OpenAIError::Reqwest(reqwest_error) if reqwest_error.is_timeout() => {
                AnalyzerError::UpstreamTimeout
            }
            OpenAIError::Reqwest(reqwest_error) => {
                AnalyzerError::Upstream(format!("LLM request failed: {reqwest_error}"))
            }
            OpenAIError::ApiError(api_error) => {
                tracing::error!(
                    error_type = api_error.r#type.as_deref().unwrap_or("unknown"),
                    code = api_error.code.as_deref().unwrap_or("unknown"),
                    body_preview = %preview(&api_error.message),
                    "LLM API returned an error"
                );
                AnalyzerError::Upstream(api_error.message)
            }
            OpenAIError::JSONDeserialize(error) => {
                AnalyzerError::Upstream(format!("Failed to parse LLM response: {error}"))
            }
            other => AnalyzerError::Upstream(other.to_string()),
        }
    }
}

#[async_trait]
impl CompletionClient for LlmApiClient {
    async fn complete(&self, system_prompt: &str, user_content: &str) -> Result<String> {
        let request = self.build_request(system_prompt, user_content)?;

        // reqwest enforces the same bound per request; this one also covers
        // anything the client library does around the call.
        let response = tokio::time::timeout(self.timeout, self.client.chat().create(request))
            .await
            .map_err(|_| AnalyzerError::UpstreamTimeout)?
            .map_err(Self::map_openai_error)?;

        let content = Self::extract_content(response)?;
        tracing::debug!(response_len = content.len(), "LLM response received");
        Ok(content)
    }
}

fn preview(text: &str) -> String {
    text.chars().take(ERROR_PREVIEW_CHARS).collect()
}
