use super::ConfigError;
use crate::domain::{Chunk, Embedding};

/// Nearest-neighbour lookup over the chunks of one document.
///
/// An index is built once from the complete chunk set and is never updated
/// afterwards.
pub trait VectorIndex: Sized + Send + Sync {
    fn build(chunks: Vec<Chunk>, embeddings: Vec<Embedding>) -> Result<Self, VectorIndexError>;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns up to `top_k` chunks, most similar first. Equal scores keep
    /// insertion order.
    fn query(
        &self,
        embedding: &Embedding,
        top_k: usize,
    ) -> Result<Vec<SearchResult>, VectorIndexError>;
}

/// A chunk paired with its cosine similarity to the query.
#[derive(Debug, Clone)]
pub struct SearchResult {
    pub chunk: Chunk,
    pub score: f32,
}

#[derive(Debug, thiserror::Error)]
pub enum VectorIndexError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("{chunks} chunks but {embeddings} embeddings")]
    LengthMismatch { chunks: usize, embeddings: usize },
    #[error("vector dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },
}
