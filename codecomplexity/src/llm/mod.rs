mod api;
pub mod prompts;
mod provider;

use async_trait::async_trait;

use crate::error::Result;

pub use api::LlmApiClient;
pub use provider::{LlmBackend, LlmProvider};

/// One chat completion round trip: system instruction plus user content in,
/// raw text of the first choice out.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    async fn complete(&self, system_prompt: &str, user_content: &str) -> Result<String>;
}
