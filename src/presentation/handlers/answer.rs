use axum::Json;
use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use crate::application::services::ErrorKind;
use crate::infrastructure::observability::sanitize_prompt;
use crate::presentation::state::AppState;

const FILE_FIELD: &str = "file";
const QUESTION_FIELD: &str = "question";

#[derive(Serialize)]
pub struct AnswerResponse {
    pub answer: String,
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub kind: &'static str,
}

/// Multipart form with a `file` part and a `question` part, in any order.
#[derive(Default)]
struct AnswerForm {
    filename: Option<String>,
    data: Vec<u8>,
    question: String,
}

#[tracing::instrument(skip(state, multipart))]
pub async fn answer_handler(State(state): State<AppState>, multipart: Multipart) -> Response {
    let form = match read_form(multipart).await {
        Ok(form) => form,
        Err(response) => return response,
    };

    if form.data.len() > state.max_upload_bytes {
        tracing::warn!(
            bytes = form.data.len(),
            limit = state.max_upload_bytes,
            "Upload exceeds size limit"
        );
        return error_response(
            StatusCode::PAYLOAD_TOO_LARGE,
            ErrorKind::Validation,
            format!("file exceeds {} bytes", state.max_upload_bytes),
        );
    }

    let filename = form.filename.as_deref().unwrap_or("document");
    tracing::debug!(
        filename = %filename,
        bytes = form.data.len(),
        question = %sanitize_prompt(&form.question),
        "Processing answer request"
    );

    match state
        .answer_service
        .answer_named(&form.data, filename, &form.question)
        .await
    {
        Ok(answer) => {
            tracing::info!(filename = %filename, "Answer request successful");
            (StatusCode::OK, Json(AnswerResponse { answer })).into_response()
        }
        Err(e) => {
            let kind = e.kind();
            let status = status_for(kind);
            if status.is_server_error() {
                tracing::error!(error = %e, %kind, "Answer request failed");
            } else {
                tracing::warn!(error = %e, %kind, "Answer request rejected");
            }
            error_response(status, kind, e.to_string())
        }
    }
}

async fn read_form(mut multipart: Multipart) -> Result<AnswerForm, Response> {
    let mut form = AnswerForm::default();

    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read multipart");
                return Err(error_response(
                    e.status(),
                    ErrorKind::Validation,
                    format!("Failed to read multipart: {e}"),
                ));
            }
        };

        match field.name() {
            Some(FILE_FIELD) => {
                form.filename = field.file_name().map(String::from);
                form.data = field
                    .bytes()
                    .await
                    .map_err(|e| {
                        error_response(
                            e.status(),
                            ErrorKind::Validation,
                            format!("Failed to read file: {e}"),
                        )
                    })?
                    .to_vec();
            }
            Some(QUESTION_FIELD) => {
                form.question = field.text().await.map_err(|e| {
                    error_response(
                        e.status(),
                        ErrorKind::Validation,
                        format!("Failed to read question: {e}"),
                    )
                })?;
            }
            other => {
                tracing::debug!(field = ?other, "Ignoring unknown multipart field");
            }
        }
    }

    Ok(form)
}

pub fn status_for(kind: ErrorKind) -> StatusCode {
    match kind {
        ErrorKind::Validation => StatusCode::BAD_REQUEST,
        ErrorKind::Load => StatusCode::UNPROCESSABLE_ENTITY,
        ErrorKind::Config => StatusCode::INTERNAL_SERVER_ERROR,
        ErrorKind::Embedding | ErrorKind::Generation => StatusCode::BAD_GATEWAY,
        ErrorKind::Timeout => StatusCode::GATEWAY_TIMEOUT,
    }
}

fn error_response(status: StatusCode, kind: ErrorKind, error: String) -> Response {
    (
        status,
        Json(ErrorResponse {
            error,
            kind: kind.as_str(),
        }),
    )
        .into_response()
}
