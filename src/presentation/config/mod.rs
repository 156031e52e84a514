mod environment;
mod settings;

pub use environment::Environment;
pub use settings::{
    ChunkingSettings, EmbeddingProvider, EmbeddingsSettings, LlmProvider, LlmSettings,
    RetrievalSettings, ServerSettings, Settings, TimeoutSettings, UploadSettings,
};
