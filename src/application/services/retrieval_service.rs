use std::marker::PhantomData;
use std::sync::Arc;

use crate::application::ports::{
    ConfigError, Embedder, EmbedderError, SearchResult, VectorIndex, VectorIndexError,
};
use crate::domain::Chunk;

/// Embeds the chunks of one document, indexes them and looks up the passages
/// closest to a question. The index lives only for the duration of a call.
pub struct RetrievalService<I>
where
    I: VectorIndex,
{
    embedder: Arc<dyn Embedder>,
    _index: PhantomData<fn() -> I>,
}

impl<I> RetrievalService<I>
where
    I: VectorIndex,
{
    pub fn new(embedder: Arc<dyn Embedder>) -> Self {
        Self {
            embedder,
            _index: PhantomData,
        }
    }

    #[tracing::instrument(skip(self, chunks, question), fields(chunk_count = chunks.len()))]
    pub async fn retrieve(
        &self,
        chunks: &[Chunk],
        question: &str,
        top_k: usize,
    ) -> Result<Vec<SearchResult>, RetrievalError> {
        if top_k == 0 {
            return Err(RetrievalError::Index(ConfigError::ZeroTopK.into()));
        }

        if chunks.is_empty() {
            return Ok(Vec::new());
        }

        let texts: Vec<&str> = chunks.iter().map(|c| c.text.as_str()).collect();
        let embeddings = self
            .embedder
            .embed_batch(&texts)
            .await
            .map_err(RetrievalError::Embedding)?;

        let query_embedding = self
            .embedder
            .embed(question)
            .await
            .map_err(RetrievalError::Embedding)?;

        let index = I::build(chunks.to_vec(), embeddings)?;
        let results = index.query(&query_embedding, top_k)?;

        tracing::debug!(
            indexed = index.len(),
            returned = results.len(),
            best_score = results.first().map(|r| r.score),
            "Retrieval complete"
        );

        Ok(results)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum RetrievalError {
    #[error("embedding: {0}")]
    Embedding(EmbedderError),
    #[error("index: {0}")]
    Index(#[from] VectorIndexError),
}
