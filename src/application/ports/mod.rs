mod config_error;
mod embedder;
mod file_loader;
mod llm_client;
mod text_splitter;
mod vector_index;

pub use config_error::ConfigError;
pub use embedder::{Embedder, EmbedderError};
pub use file_loader::{FileLoader, FileLoaderError};
pub use llm_client::{LlmClient, LlmClientError};
pub use text_splitter::TextSplitter;
pub use vector_index::{SearchResult, VectorIndex, VectorIndexError};
