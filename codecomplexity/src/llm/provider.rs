use async_trait::async_trait;

use crate::config::LlmConfig;
use crate::error::{AnalyzerError, Result};
use crate::llm::api::LlmApiClient;
use crate::llm::CompletionClient;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LlmBackend {
    OpenAICompatible { base_url: String },
    Unavailable { reason: String },
}

/// Completion client built once at startup from [`LlmConfig`].
///
/// Without a credential the provider stays unavailable and every call fails
/// with a configuration error before anything goes over the wire.
#[derive(Clone)]
pub struct LlmProvider {
    backend: LlmBackend,
    client: Option<LlmApiClient>,
}

impl LlmProvider {
    pub fn new(config: &LlmConfig) -> Self {
        let Some(api_key) = config.api_key.as_deref() else {
            return Self::unavailable("GROQ_API_KEY is not configured");
        };

        match LlmApiClient::new(config, api_key) {
            Ok(client) => Self {
                backend: LlmBackend::OpenAICompatible {
                    base_url: config.base_url.clone(),
                },
                client: Some(client),
            },
            Err(error) => Self::unavailable(&error.to_string()),
        }
    }

    pub fn unavailable(reason: &str) -> Self {
        Self {
            backend: LlmBackend::Unavailable {
                reason: reason.to_string(),
            },
            client: None,
        }
    }

    pub fn is_available(&self) -> bool {
        !matches!(self.backend, LlmBackend::Unavailable { .. })
    }

    pub fn backend(&self) -> &LlmBackend {
        &self.backend
    }

    pub fn model(&self) -> Option<&str> {
        self.client.as_ref().map(LlmApiClient::model)
    }

    fn unavailable_reason(&self) -> String {
        match &self.backend {
            LlmBackend::Unavailable { reason } => reason.clone(),
            _ => "LLM client is not initialized".to_string(),
        }
    }
}

#[async_trait]
impl CompletionClient for LlmProvider {
    async fn complete(&self, system_prompt: &str, user_content: &str) -> Result<String> {
        match &self.client {
            Some(client) => client.complete(system_prompt, user_content).await,
            None => Err(AnalyzerError::Config(self.unavailable_reason())),
        }
    }
}
