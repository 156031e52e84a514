use std::sync::{Arc, Mutex};

use axum::Router;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode, Uri};
use axum::response::IntoResponse;
use serde_json::Value;

#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub path: String,
    pub headers: HeaderMap,
    pub body: Value,
}

#[derive(Clone)]
struct Reply {
    status: StatusCode,
    body: Value,
    recorded: Arc<Mutex<Option<RecordedRequest>>>,
}

/// Local HTTP server that answers every request with one canned JSON reply
/// and keeps the last request it received.
pub struct StubModelServer {
    pub base_url: String,
    recorded: Arc<Mutex<Option<RecordedRequest>>>,
}

impl StubModelServer {
    pub async fn replying(status: StatusCode, body: Value) -> Self {
        let recorded = Arc::new(Mutex::new(None));
        let app = Router::new().fallback(reply).with_state(Reply {
            status,
            body,
            recorded: Arc::clone(&recorded),
        });

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let address = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url: format!("http://{address}"),
            recorded,
        }
    }

    pub fn last_request(&self) -> RecordedRequest {
        self.recorded
            .lock()
            .unwrap()
            .clone()
            .expect("server received no request")
    }
}

async fn reply(State(reply): State<Reply>, uri: Uri, headers: HeaderMap, body: Bytes) -> impl IntoResponse {
    *reply.recorded.lock().unwrap() = Some(RecordedRequest {
        path: uri.path().to_string(),
        headers,
        body: serde_json::from_slice(&body).unwrap_or(Value::Null),
    });

    (reply.status, axum::Json(reply.body))
}
