mod embedder;
mod gemini_client;
mod lazy_model;
mod llm_client_factory;
mod openai_chat_client;

pub use embedder::{EmbedderFactory, LocalCandleEmbedder, OPENAI_BASE_URL, OpenAiEmbedder};
pub use gemini_client::{GEMINI_BASE_URL, GeminiClient};
pub use lazy_model::{LazyEmbedder, LazyLlmClient};
pub use llm_client_factory::LlmClientFactory;
pub use openai_chat_client::OpenAiChatClient;
