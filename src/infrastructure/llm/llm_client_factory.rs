use std::sync::Arc;

use crate::application::ports::{ConfigError, LlmClient};
use crate::presentation::config::{LlmProvider, LlmSettings};

use super::embedder::OPENAI_BASE_URL;
use super::{GEMINI_BASE_URL, GeminiClient, OpenAiChatClient};

pub struct LlmClientFactory;

impl LlmClientFactory {
    pub fn create(settings: &LlmSettings) -> Result<Arc<dyn LlmClient>, ConfigError> {
        let api_key = settings
            .api_key
            .clone()
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| {
                ConfigError::MissingCredential(format!(
                    "{} is not set",
                    settings.provider.credential_env()
                ))
            })?;

        match settings.provider {
            LlmProvider::Gemini => {
                let base_url = settings.base_url.as_deref().unwrap_or(GEMINI_BASE_URL);
                tracing::info!(model = %settings.chat_model, "Using Gemini generation model");
                Ok(Arc::new(
                    GeminiClient::new(base_url, api_key, settings.chat_model.clone())
                        .with_generation(settings.max_tokens, settings.temperature),
                ))
            }
            LlmProvider::OpenAi => {
                let base_url = settings.base_url.as_deref().unwrap_or(OPENAI_BASE_URL);
                tracing::info!(model = %settings.chat_model, base_url, "Using OpenAI-compatible generation model");
                Ok(Arc::new(
                    OpenAiChatClient::new(base_url, api_key, settings.chat_model.clone())
                        .with_generation(settings.max_tokens, settings.temperature),
                ))
            }
        }
    }
}
