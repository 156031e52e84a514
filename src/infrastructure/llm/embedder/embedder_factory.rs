use std::sync::Arc;

use crate::application::ports::{ConfigError, Embedder, EmbedderError};
use crate::presentation::config::{EmbeddingProvider, EmbeddingsSettings};

use super::{LocalCandleEmbedder, OpenAiEmbedder};

pub struct EmbedderFactory;

impl EmbedderFactory {
    /// Builds the configured embedder. Loading a local model downloads and
    /// maps weights, so this blocks.
    pub fn create(settings: &EmbeddingsSettings) -> Result<Arc<dyn Embedder>, EmbedderError> {
        match settings.provider {
            EmbeddingProvider::Local => {
                tracing::info!(model = %settings.model, "Loading local Candle embedding model");
                let embedder = LocalCandleEmbedder::new(&settings.model)?;
                Ok(Arc::new(embedder))
            }
            EmbeddingProvider::OpenAi => {
                let key = settings
                    .api_key
                    .clone()
                    .filter(|k| !k.is_empty())
                    .ok_or_else(|| {
                        ConfigError::MissingCredential("OpenAI embedder requires an API key".into())
                    })?;
                tracing::info!(model = %settings.model, "Using OpenAI embedding model");
                let embedder = match settings.base_url.as_deref() {
                    Some(base_url) => {
                        OpenAiEmbedder::with_base_url(base_url, key, settings.model.clone())
                    }
                    None => OpenAiEmbedder::new(key, settings.model.clone()),
                };
                Ok(Arc::new(embedder))
            }
        }
    }
}
