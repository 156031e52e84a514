use config::builder::DefaultState;
use config::{Config, ConfigBuilder, File};
use serde::Deserialize;

use crate::application::ports::ConfigError;
use crate::application::services::StageTimeouts;

use super::Environment;

const BYTES_PER_MB: usize = 1024 * 1024;

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub embeddings: EmbeddingsSettings,
    pub llm: LlmSettings,
    pub chunking: ChunkingSettings,
    pub retrieval: RetrievalSettings,
    pub timeouts: TimeoutSettings,
    pub upload: UploadSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EmbeddingsSettings {
    pub provider: EmbeddingProvider,
    pub model: String,
    pub api_key: Option<String>,
    pub base_url: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmbeddingProvider {
    Local,
    #[serde(rename = "openai")]
    OpenAi,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LlmSettings {
    pub provider: LlmProvider,
    pub chat_model: String,
    pub api_key: Option<String>,
    pub base_url: Option<String>,
    pub max_tokens: u32,
    pub temperature: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LlmProvider {
    Gemini,
    #[serde(rename = "openai")]
    OpenAi,
}

impl LlmProvider {
    /// Environment variable consulted when no key is configured.
    pub fn credential_env(&self) -> &'static str {
        match self {
            Self::Gemini => "GOOGLE_API_KEY",
            Self::OpenAi => "OPENAI_API_KEY",
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChunkingSettings {
    pub chunk_size: usize,
    pub chunk_overlap: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RetrievalSettings {
    pub top_k: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TimeoutSettings {
    pub load_secs: u64,
    pub embed_secs: u64,
    pub generate_secs: u64,
}

impl TimeoutSettings {
    pub fn stage_timeouts(&self) -> StageTimeouts {
        StageTimeouts::from_secs(self.load_secs, self.embed_secs, self.generate_secs)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct UploadSettings {
    pub max_file_size_mb: usize,
}

impl UploadSettings {
    pub fn max_bytes(&self) -> usize {
        self.max_file_size_mb.saturating_mul(BYTES_PER_MB)
    }
}

impl Settings {
    /// Built-in defaults, before any file or environment source is applied.
    pub fn default_builder() -> Result<ConfigBuilder<DefaultState>, config::ConfigError> {
        Config::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 3000_i64)?
            .set_default("embeddings.provider", "local")?
            .set_default("embeddings.model", "sentence-transformers/all-MiniLM-L6-v2")?
            .set_default("llm.provider", "gemini")?
            .set_default("llm.chat_model", "gemini-2.5-flash")?
            .set_default("llm.max_tokens", 2048_i64)?
            .set_default("llm.temperature", 0.2_f64)?
            .set_default("chunking.chunk_size", 500_i64)?
            .set_default("chunking.chunk_overlap", 100_i64)?
            .set_default("retrieval.top_k", 4_i64)?
            .set_default("timeouts.load_secs", 30_i64)?
            .set_default("timeouts.embed_secs", 120_i64)?
            .set_default("timeouts.generate_secs", 120_i64)?
            .set_default("upload.max_file_size_mb", 20_i64)
    }

    /// Defaults, then `appsettings.{environment}` if present, then `APP_*`
    /// variables (`APP_CHUNKING__CHUNK_SIZE=800`).
    pub fn load(environment: Environment) -> Result<Self, config::ConfigError> {
        let configuration = Self::default_builder()?
            .add_source(
                File::with_name(&format!("appsettings.{}", environment.as_str())).required(false),
            )
            .add_source(
                config::Environment::with_prefix("APP")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let settings = Self::from_config(configuration)?;
        Ok(settings.with_credentials_from_env())
    }

    pub fn from_config(configuration: Config) -> Result<Self, config::ConfigError> {
        configuration.try_deserialize()
    }

    /// Fills missing provider keys from the conventional variables
    /// (`GOOGLE_API_KEY`, `OPENAI_API_KEY`).
    pub fn with_credentials_from_env(self) -> Self {
        self.with_credentials_from(|name| std::env::var(name).ok())
    }

    pub fn with_credentials_from<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let resolve = |configured: Option<String>, env_name: &str| {
            configured
                .filter(|k| !k.trim().is_empty())
                .or_else(|| lookup(env_name).filter(|k| !k.trim().is_empty()))
        };

        self.llm.api_key = resolve(self.llm.api_key.take(), self.llm.provider.credential_env());
        if self.embeddings.provider == EmbeddingProvider::OpenAi {
            self.embeddings.api_key = resolve(self.embeddings.api_key.take(), "OPENAI_API_KEY");
        }
        self
    }

    /// Rejects values the pipeline cannot run with. Credentials are not
    /// checked here; a missing key surfaces on first use.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.chunking.chunk_size == 0 {
            return Err(ConfigError::ZeroChunkSize);
        }
        if self.chunking.chunk_overlap >= self.chunking.chunk_size {
            return Err(ConfigError::OverlapTooLarge {
                chunk_size: self.chunking.chunk_size,
                overlap: self.chunking.chunk_overlap,
            });
        }
        if self.retrieval.top_k == 0 {
            return Err(ConfigError::ZeroTopK);
        }
        if self.upload.max_file_size_mb == 0 {
            return Err(ConfigError::InvalidSetting(
                "upload.max_file_size_mb must be positive".to_string(),
            ));
        }
        if !(0.0..=2.0).contains(&self.llm.temperature) {
            return Err(ConfigError::InvalidSetting(format!(
                "llm.temperature must be within 0.0..=2.0, got {}",
                self.llm.temperature
            )));
        }
        Ok(())
    }
}
