#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("chunk size must be greater than zero")]
    ZeroChunkSize,
    #[error("chunk overlap ({overlap}) must be smaller than chunk size ({chunk_size})")]
    OverlapTooLarge { chunk_size: usize, overlap: usize },
    #[error("retrieval count must be greater than zero")]
    ZeroTopK,
    #[error("missing credential: {0}")]
    MissingCredential(String),
    #[error("invalid setting: {0}")]
    InvalidSetting(String),
}
