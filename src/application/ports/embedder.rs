use async_trait::async_trait;

use super::ConfigError;
use crate::domain::Embedding;

/// Maps text to vectors. Implementations must be deterministic: equal text
/// yields equal vectors for the lifetime of the process.
#[async_trait]
pub trait Embedder: Send + Sync {
    async fn embed(&self, text: &str) -> Result<Embedding, EmbedderError>;
    async fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Embedding>, EmbedderError>;
}

#[derive(Debug, thiserror::Error)]
pub enum EmbedderError {
    #[error("embedding api request failed: {0}")]
    ApiRequestFailed(String),
    #[error("embedding rate limited")]
    RateLimited,
    #[error("invalid embedding response: {0}")]
    InvalidResponse(String),
    #[error("model loading failed: {0}")]
    ModelLoadFailed(String),
    #[error("inference failed: {0}")]
    InferenceFailed(String),
    #[error("input of {tokens} tokens exceeds the model limit of {limit}")]
    InputTooLong { tokens: usize, limit: usize },
    #[error("embedder not configured: {0}")]
    NotConfigured(#[from] ConfigError),
}
