use async_trait::async_trait;

use super::ConfigError;

/// Single-shot text generation. No retries are attempted by implementations.
#[async_trait]
pub trait LlmClient: Send + Sync {
    async fn complete(&self, prompt: &str) -> Result<String, LlmClientError>;
}

#[derive(Debug, thiserror::Error)]
pub enum LlmClientError {
    #[error("api request failed: {0}")]
    ApiRequestFailed(String),
    #[error("rate limited")]
    RateLimited,
    #[error("invalid response: {0}")]
    InvalidResponse(String),
    #[error("model returned no content")]
    EmptyResponse,
    #[error("language model not configured: {0}")]
    NotConfigured(#[from] ConfigError),
}
