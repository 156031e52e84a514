use std::fmt;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use crate::application::ports::{
    ConfigError, Embedder, EmbedderError, FileLoader, FileLoaderError, LlmClient, LlmClientError,
    TextSplitter, VectorIndex, VectorIndexError,
};
use crate::domain::{ContentType, Document};

use super::{PromptBuilder, RetrievalError, RetrievalService, count_tokens};

const DEFAULT_FILENAME: &str = "document";

/// Answers one question about one document: load, split, retrieve, prompt,
/// generate. Every stage runs in sequence and the first failure aborts the
/// request.
pub struct AnswerService<I>
where
    I: VectorIndex,
{
    file_loader: Arc<dyn FileLoader>,
    text_splitter: Arc<dyn TextSplitter>,
    retrieval_service: RetrievalService<I>,
    llm_client: Arc<dyn LlmClient>,
    prompt_builder: PromptBuilder,
    top_k: usize,
    timeouts: StageTimeouts,
}

impl<I> AnswerService<I>
where
    I: VectorIndex,
{
    pub fn new(
        file_loader: Arc<dyn FileLoader>,
        text_splitter: Arc<dyn TextSplitter>,
        embedder: Arc<dyn Embedder>,
        llm_client: Arc<dyn LlmClient>,
        top_k: usize,
    ) -> Result<Self, ConfigError> {
        if top_k == 0 {
            return Err(ConfigError::ZeroTopK);
        }

        Ok(Self {
            file_loader,
            text_splitter,
            retrieval_service: RetrievalService::new(embedder),
            llm_client,
            prompt_builder: PromptBuilder::new(),
            top_k,
            timeouts: StageTimeouts::default(),
        })
    }

    pub fn with_timeouts(mut self, timeouts: StageTimeouts) -> Self {
        self.timeouts = timeouts;
        self
    }

    pub async fn answer(&self, data: &[u8], question: &str) -> Result<String, AnswerError> {
        self.answer_named(data, DEFAULT_FILENAME, question).await
    }

    #[tracing::instrument(
        skip(self, data, question),
        fields(size_bytes = data.len(), question_chars = question.chars().count())
    )]
    pub async fn answer_named(
        &self,
        data: &[u8],
        filename: &str,
        question: &str,
    ) -> Result<String, AnswerError> {
        validate_input(data, question)?;

        let content_type = ContentType::sniff(data).ok_or_else(|| {
            FileLoaderError::UnsupportedContentType(format!("unrecognized format for {filename}"))
        })?;
        let document = Document::new(filename.to_string(), content_type, data.len() as u64);

        let pages = run_stage(
            self.timeouts.load,
            PipelineStage::Load,
            self.file_loader.load(data, &document),
        )
        .await?;

        let chunks = self.text_splitter.split(&pages, document.id);
        tracing::info!(
            page_count = pages.len(),
            chunk_count = chunks.len(),
            "Document split into chunks"
        );

        let results = run_stage(
            self.timeouts.embed,
            PipelineStage::Embed,
            self.retrieval_service
                .retrieve(&chunks, question, self.top_k),
        )
        .await?;

        let context: Vec<&str> = results.iter().map(|r| r.chunk.text.as_str()).collect();
        let prompt = self.prompt_builder.build(&context, question);
        tracing::debug!(
            context_chunks = context.len(),
            prompt_tokens = count_tokens(prompt.as_str()),
            "Prompt assembled"
        );

        let answer = run_stage(
            self.timeouts.generate,
            PipelineStage::Generate,
            self.llm_client.complete(prompt.as_str()),
        )
        .await?;

        if answer.trim().is_empty() {
            return Err(AnswerError::Generation(LlmClientError::EmptyResponse));
        }

        tracing::info!(answer_chars = answer.chars().count(), "Answer generated");
        Ok(answer)
    }
}

fn validate_input(data: &[u8], question: &str) -> Result<(), AnswerError> {
    if data.is_empty() {
        return Err(AnswerError::Validation("document is empty".to_string()));
    }
    if question.trim().is_empty() {
        return Err(AnswerError::Validation("question is empty".to_string()));
    }
    Ok(())
}

async fn run_stage<T, E, F>(
    deadline: Option<Duration>,
    stage: PipelineStage,
    stage_future: F,
) -> Result<T, AnswerError>
where
    F: Future<Output = Result<T, E>>,
    E: Into<AnswerError>,
{
    let outcome = match deadline {
        Some(limit) => tokio::time::timeout(limit, stage_future)
            .await
            .map_err(|_| {
                tracing::warn!(%stage, limit_ms = limit.as_millis() as u64, "Stage deadline elapsed");
                AnswerError::Timeout(stage)
            })?,
        None => stage_future.await,
    };

    outcome.map_err(Into::into)
}

/// Per-stage deadlines for the calls that leave the process or block on
/// inference. `None` waits indefinitely.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StageTimeouts {
    pub load: Option<Duration>,
    pub embed: Option<Duration>,
    pub generate: Option<Duration>,
}

impl StageTimeouts {
    pub fn none() -> Self {
        Self {
            load: None,
            embed: None,
            generate: None,
        }
    }

    /// Zero seconds disables the deadline for that stage.
    pub fn from_secs(load: u64, embed: u64, generate: u64) -> Self {
        let to_deadline = |secs: u64| (secs > 0).then(|| Duration::from_secs(secs));
        Self {
            load: to_deadline(load),
            embed: to_deadline(embed),
            generate: to_deadline(generate),
        }
    }
}

impl Default for StageTimeouts {
    fn default() -> Self {
        Self::from_secs(30, 120, 120)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineStage {
    Load,
    Embed,
    Generate,
}

impl PipelineStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Load => "load",
            Self::Embed => "embed",
            Self::Generate => "generate",
        }
    }
}

impl fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AnswerError {
    #[error("invalid input: {0}")]
    Validation(String),
    #[error("document loading: {0}")]
    Load(#[from] FileLoaderError),
    #[error("configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("embedding: {0}")]
    Embedding(EmbedderError),
    #[error("generation: {0}")]
    Generation(LlmClientError),
    #[error("{0} stage timed out")]
    Timeout(PipelineStage),
}

impl AnswerError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation(_) => ErrorKind::Validation,
            Self::Load(_) => ErrorKind::Load,
            Self::Config(_) => ErrorKind::Config,
            Self::Embedding(_) => ErrorKind::Embedding,
            Self::Generation(_) => ErrorKind::Generation,
            Self::Timeout(_) => ErrorKind::Timeout,
        }
    }
}

impl From<EmbedderError> for AnswerError {
    fn from(error: EmbedderError) -> Self {
        match error {
            EmbedderError::NotConfigured(config) => Self::Config(config),
            other => Self::Embedding(other),
        }
    }
}

impl From<LlmClientError> for AnswerError {
    fn from(error: LlmClientError) -> Self {
        match error {
            LlmClientError::NotConfigured(config) => Self::Config(config),
            other => Self::Generation(other),
        }
    }
}

impl From<RetrievalError> for AnswerError {
    fn from(error: RetrievalError) -> Self {
        match error {
            RetrievalError::Embedding(e) => e.into(),
            RetrievalError::Index(VectorIndexError::Config(config)) => Self::Config(config),
            // Inconsistent vectors can only come from the embedder.
            RetrievalError::Index(other) => {
                Self::Embedding(EmbedderError::InvalidResponse(other.to_string()))
            }
        }
    }
}

/// Failure category exposed to callers so they can pick a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Validation,
    Load,
    Config,
    Embedding,
    Generation,
    Timeout,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Validation => "validation",
            Self::Load => "load",
            Self::Config => "config",
            Self::Embedding => "embedding",
            Self::Generation => "generation",
            Self::Timeout => "timeout",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
