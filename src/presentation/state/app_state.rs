use std::sync::Arc;

use crate::application::services::AnswerService;
use crate::infrastructure::persistence::InMemoryVectorIndex;

#[derive(Clone)]
pub struct AppState {
    pub answer_service: Arc<AnswerService<InMemoryVectorIndex>>,
    pub max_upload_bytes: usize,
}

impl AppState {
    pub fn new(answer_service: AnswerService<InMemoryVectorIndex>, max_upload_bytes: usize) -> Self {
        Self {
            answer_service: Arc::new(answer_service),
            max_upload_bytes,
        }
    }
}
