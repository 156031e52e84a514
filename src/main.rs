use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;

use pagewise::application::services::AnswerService;
use pagewise::infrastructure::llm::{LazyEmbedder, LazyLlmClient};
use pagewise::infrastructure::observability::{TracingConfig, init_tracing};
use pagewise::infrastructure::persistence::InMemoryVectorIndex;
use pagewise::infrastructure::text_processing::{CharacterWindowSplitter, CompositeFileLoader};
use pagewise::presentation::{AppState, Environment, Settings, create_router};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let environment = Environment::from_env().map_err(anyhow::Error::msg)?;
    let settings = Settings::load(environment).context("failed to load settings")?;
    settings.validate().context("invalid settings")?;

    let tracing_config = TracingConfig {
        environment: environment.to_string(),
        ..TracingConfig::from_env()
    };
    init_tracing(&tracing_config);
    tracing::info!(
        %environment,
        embeddings_provider = ?settings.embeddings.provider,
        embeddings_model = %settings.embeddings.model,
        llm_provider = ?settings.llm.provider,
        chat_model = %settings.llm.chat_model,
        chunk_size = settings.chunking.chunk_size,
        chunk_overlap = settings.chunking.chunk_overlap,
        top_k = settings.retrieval.top_k,
        "Settings loaded"
    );

    // Models are created on the first request and shared afterwards.
    let embedder = Arc::new(LazyEmbedder::from_settings(settings.embeddings.clone()));
    let llm_client = Arc::new(LazyLlmClient::from_settings(settings.llm.clone()));

    let text_splitter = Arc::new(CharacterWindowSplitter::new(
        settings.chunking.chunk_size,
        settings.chunking.chunk_overlap,
    )?);
    let file_loader = Arc::new(CompositeFileLoader::with_default_adapters());

    let answer_service = AnswerService::<InMemoryVectorIndex>::new(
        file_loader,
        text_splitter,
        embedder,
        llm_client,
        settings.retrieval.top_k,
    )?
    .with_timeouts(settings.timeouts.stage_timeouts());

    let state = AppState::new(answer_service, settings.upload.max_bytes());
    let router = create_router(state);

    let addr: SocketAddr = format!("{}:{}", settings.server.host, settings.server.port)
        .parse()
        .context("invalid server address")?;
    tracing::info!("Listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}
