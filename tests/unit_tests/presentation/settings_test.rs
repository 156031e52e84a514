use std::collections::HashMap;

use pagewise::application::ports::ConfigError;
use pagewise::presentation::config::{EmbeddingProvider, LlmProvider, Settings};
use pagewise::presentation::Environment;

fn settings_with(overrides: &[(&str, &str)]) -> Settings {
    let mut builder = Settings::default_builder().unwrap();
    for (key, value) in overrides {
        builder = builder.set_override(*key, *value).unwrap();
    }
    Settings::from_config(builder.build().unwrap()).unwrap()
}

#[test]
fn given_no_overrides_when_loading_defaults_then_matches_documented_values() {
    let settings = settings_with(&[]);

    assert_eq!(settings.server.port, 3000);
    assert_eq!(settings.embeddings.provider, EmbeddingProvider::Local);
    assert_eq!(settings.embeddings.model, "sentence-transformers/all-MiniLM-L6-v2");
    assert_eq!(settings.llm.provider, LlmProvider::Gemini);
    assert_eq!(settings.llm.chat_model, "gemini-2.5-flash");
    assert_eq!(settings.chunking.chunk_size, 500);
    assert_eq!(settings.chunking.chunk_overlap, 100);
    assert_eq!(settings.retrieval.top_k, 4);
    assert_eq!(settings.upload.max_bytes(), 20 * 1024 * 1024);
    assert!(settings.llm.api_key.is_none());
    assert!(settings.validate().is_ok());
}

#[test]
fn given_overlap_equal_to_size_when_validating_then_rejects() {
    let settings = settings_with(&[("chunking.chunk_size", "200"), ("chunking.chunk_overlap", "200")]);

    assert_eq!(
        settings.validate(),
        Err(ConfigError::OverlapTooLarge {
            chunk_size: 200,
            overlap: 200
        })
    );
}

#[test]
fn given_zero_top_k_when_validating_then_rejects() {
    let settings = settings_with(&[("retrieval.top_k", "0")]);

    assert_eq!(settings.validate(), Err(ConfigError::ZeroTopK));
}

#[test]
fn given_zero_chunk_size_when_validating_then_rejects() {
    let settings = settings_with(&[("chunking.chunk_size", "0"), ("chunking.chunk_overlap", "0")]);

    assert_eq!(settings.validate(), Err(ConfigError::ZeroChunkSize));
}

#[test]
fn given_openai_provider_names_when_loading_then_parses_lowercase_variants() {
    let settings = settings_with(&[("embeddings.provider", "openai"), ("llm.provider", "openai")]);

    assert_eq!(settings.embeddings.provider, EmbeddingProvider::OpenAi);
    assert_eq!(settings.llm.provider, LlmProvider::OpenAi);
}

#[test]
fn given_missing_key_when_resolving_credentials_then_uses_provider_variable() {
    let env: HashMap<&str, &str> = HashMap::from([("GOOGLE_API_KEY", "google-key")]);

    let settings =
        settings_with(&[]).with_credentials_from(|name| env.get(name).map(|v| v.to_string()));

    assert_eq!(settings.llm.api_key.as_deref(), Some("google-key"));
    assert!(settings.embeddings.api_key.is_none());
}

#[test]
fn given_configured_key_when_resolving_credentials_then_keeps_it() {
    let settings = settings_with(&[("llm.api_key", "configured")])
        .with_credentials_from(|_| Some("from-env".to_string()));

    assert_eq!(settings.llm.api_key.as_deref(), Some("configured"));
}

#[test]
fn given_zero_timeouts_when_converting_then_disables_deadlines() {
    let settings = settings_with(&[("timeouts.generate_secs", "0")]);

    let timeouts = settings.timeouts.stage_timeouts();

    assert!(timeouts.generate.is_none());
    assert_eq!(timeouts.load.map(|d| d.as_secs()), Some(30));
}

#[test]
fn given_environment_names_when_parsing_then_accepts_known_values() {
    assert_eq!(Environment::try_from("PROD".to_string()), Ok(Environment::Prod));
    assert_eq!(Environment::try_from("local".to_string()), Ok(Environment::Local));
    assert!(Environment::try_from("staging".to_string()).is_err());
}
