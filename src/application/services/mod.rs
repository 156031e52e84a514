mod answer_service;
mod prompt_builder;
mod retrieval_service;
mod token_counter;

pub use answer_service::{AnswerError, AnswerService, ErrorKind, PipelineStage, StageTimeouts};
pub use prompt_builder::PromptBuilder;
pub use retrieval_service::{RetrievalError, RetrievalService};
pub use token_counter::count_tokens;
