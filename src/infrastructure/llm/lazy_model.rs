use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::OnceCell;

use crate::application::ports::{
    ConfigError, Embedder, EmbedderError, LlmClient, LlmClientError,
};
use crate::domain::Embedding;
use crate::presentation::config::{EmbeddingsSettings, LlmSettings};

use super::{EmbedderFactory, LlmClientFactory};

type EmbedderInit = dyn Fn() -> Result<Arc<dyn Embedder>, EmbedderError> + Send + Sync;
type LlmClientInit = dyn Fn() -> Result<Arc<dyn LlmClient>, ConfigError> + Send + Sync;

/// Process-wide embedder handle created on first use.
///
/// Loading runs in its own task, so it completes and is stored even when the
/// request that started it is cancelled (for example by a stage deadline).
/// Concurrent first calls wait on the same load. A failed initialization is
/// not stored, so a later call tries again.
pub struct LazyEmbedder {
    shared: Arc<SharedEmbedder>,
}

struct SharedEmbedder {
    cell: OnceCell<Arc<dyn Embedder>>,
    init: Arc<EmbedderInit>,
}

impl SharedEmbedder {
    async fn get_or_load(&self) -> Result<Arc<dyn Embedder>, EmbedderError> {
        self.cell
            .get_or_try_init(|| async {
                let init = Arc::clone(&self.init);
                // Model loading reads weights from disk and may download them.
                tokio::task::spawn_blocking(move || (*init)())
                    .await
                    .unwrap_or_else(|e| {
                        Err(EmbedderError::ModelLoadFailed(format!("task join error: {e}")))
                    })
            })
            .await
            .map(Arc::clone)
    }
}

impl LazyEmbedder {
    pub fn new<F>(init: F) -> Self
    where
        F: Fn() -> Result<Arc<dyn Embedder>, EmbedderError> + Send + Sync + 'static,
    {
        Self {
            shared: Arc::new(SharedEmbedder {
                cell: OnceCell::new(),
                init: Arc::new(init),
            }),
        }
    }

    pub fn from_settings(settings: EmbeddingsSettings) -> Self {
        Self::new(move || EmbedderFactory::create(&settings))
    }

    pub fn is_initialized(&self) -> bool {
        self.shared.cell.initialized()
    }

    async fn get(&self) -> Result<Arc<dyn Embedder>, EmbedderError> {
        if let Some(embedder) = self.shared.cell.get() {
            return Ok(Arc::clone(embedder));
        }

        let shared = Arc::clone(&self.shared);
        tokio::spawn(async move { shared.get_or_load().await })
            .await
            .map_err(|e| EmbedderError::ModelLoadFailed(format!("task join error: {e}")))?
    }
}

#[async_trait]
impl Embedder for LazyEmbedder {
    async fn embed(&self, text: &str) -> Result<Embedding, EmbedderError> {
        self.get().await?.embed(text).await
    }

    async fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Embedding>, EmbedderError> {
        self.get().await?.embed_batch(texts).await
    }
}

/// Process-wide language model handle created on first use. A missing
/// credential surfaces on the first generation call.
pub struct LazyLlmClient {
    cell: OnceCell<Arc<dyn LlmClient>>,
    init: Box<LlmClientInit>,
}

impl LazyLlmClient {
    pub fn new<F>(init: F) -> Self
    where
        F: Fn() -> Result<Arc<dyn LlmClient>, ConfigError> + Send + Sync + 'static,
    {
        Self {
            cell: OnceCell::new(),
            init: Box::new(init),
        }
    }

    pub fn from_settings(settings: LlmSettings) -> Self {
        Self::new(move || LlmClientFactory::create(&settings))
    }

    pub fn is_initialized(&self) -> bool {
        self.cell.initialized()
    }
}

#[async_trait]
impl LlmClient for LazyLlmClient {
    async fn complete(&self, prompt: &str) -> Result<String, LlmClientError> {
        let client = self
            .cell
            .get_or_try_init(|| async { (self.init)() })
            .await?;
        client.complete(prompt).await
    }
}
