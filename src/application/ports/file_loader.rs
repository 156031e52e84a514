use async_trait::async_trait;

use crate::domain::{Document, Page};

/// Extracts the pages of a document in reading order.
#[async_trait]
pub trait FileLoader: Send + Sync {
    async fn load(&self, data: &[u8], document: &Document) -> Result<Vec<Page>, FileLoaderError>;
}

#[derive(Debug, thiserror::Error)]
pub enum FileLoaderError {
    #[error("unsupported content type: {0}")]
    UnsupportedContentType(String),
    #[error("extraction failed: {0}")]
    ExtractionFailed(String),
    #[error("no text found in {0}")]
    NoTextFound(String),
}
