use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use tower::util::ServiceExt;
use tracing_subscriber::fmt::MakeWriter;

use emerald_chat::agent::CompletionAgent;
use emerald_chat::errors::AppError;
use emerald_chat::models::{ChatRequest, ChatResponse, ErrorBody, HistoryTurn};
use emerald_chat::routes::create_router;
use emerald_chat::service::chat_service::ChatService;

/// Upstream stand-in that records every call it receives.
#[derive(Default)]
struct StubAgent {
    reply: Option<String>,
    calls: AtomicUsize,
    seen: Mutex<Vec<(String, Vec<HistoryTurn>)>>,
}

impl StubAgent {
    fn replying(text: &str) -> Self {
        Self { reply: Some(text.to_string()), ..Default::default() }
    }

    fn failing() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CompletionAgent for StubAgent {
    async fn complete(&self, message: &str, history: &[HistoryTurn]) -> Result<String, AppError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.seen.lock().unwrap().push((message.to_string(), history.to_vec()));
        match &self.reply {
            Some(text) => Ok(text.clone()),
            None => {
                tracing::error!("stub completion failed");
                Err(AppError::upstream("connection reset by peer (secret-detail-42)"))
            }
        }
    }
}

fn app_with(agent: Option<Arc<StubAgent>>) -> Router {
    let agent = agent.map(|a| a as Arc<dyn CompletionAgent>);
    create_router(ChatService::new(agent), None)
}

fn chat_request(body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/chat")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn send(app: Router, req: Request<Body>) -> (StatusCode, Vec<u8>) {
    let response = app.oneshot(req).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, bytes.to_vec())
}

#[tokio::test]
async fn test_relays_upstream_text() {
    let agent = Arc::new(StubAgent::replying("Buenas"));
    let (status, body) = send(app_with(Some(agent.clone())), chat_request(r#"{"message": "Hola"}"#)).await;

    assert_eq!(status, StatusCode::OK);
    let resp: ChatResponse = serde_json::from_slice(&body).unwrap();
    assert_eq!(resp.text, "Buenas");
    assert_eq!(agent.calls.load(Ordering::SeqCst), 1);
    assert_eq!(agent.seen.lock().unwrap()[0].0, "Hola");
}

#[tokio::test]
async fn test_empty_and_missing_message_are_rejected() {
    for body in [r#"{"message": ""}"#, r#"{"message": "   "}"#, r#"{}"#, r#"{"message": null}"#] {
        let agent = Arc::new(StubAgent::replying("unused"));
        let (status, bytes) = send(app_with(Some(agent.clone())), chat_request(body)).await;

        assert_eq!(status, StatusCode::BAD_REQUEST, "body: {body}");
        let err: ErrorBody = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(err.error, "Falta el mensaje del usuario.");
        assert_eq!(agent.calls.load(Ordering::SeqCst), 0);
    }
}

#[tokio::test]
async fn test_unreadable_body_is_a_missing_message() {
    let agent = Arc::new(StubAgent::replying("unused"));
    let req = Request::builder()
        .method("POST")
        .uri("/api/chat")
        .header("content-type", "text/plain")
        .body(Body::from("Hola"))
        .unwrap();
    let (status, bytes) = send(app_with(Some(agent)), req).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let err: ErrorBody = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(err.error, "Falta el mensaje del usuario.");
}

#[tokio::test]
async fn test_missing_credential_is_a_server_error() {
    for body in [r#"{"message": "Hola"}"#, r#"{"message": ""}"#] {
        let (status, bytes) = send(app_with(None), chat_request(body)).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        let err: ErrorBody = serde_json::from_slice(&bytes).unwrap();
        assert!(err.error.contains("not configured"));
    }
}

#[tokio::test]
async fn test_upstream_failure_does_not_leak_detail() {
    let agent = Arc::new(StubAgent::failing());
    let (status, bytes) = send(app_with(Some(agent.clone())), chat_request(r#"{"message": "Hola"}"#)).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    let raw = String::from_utf8(bytes).unwrap();
    assert!(!raw.contains("secret-detail-42"));
    let err: ErrorBody = serde_json::from_str(&raw).unwrap();
    assert_eq!(err.error, "Error interno del servidor al generar la respuesta.");
    assert_eq!(agent.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_history_is_dropped_unless_forwarding_is_enabled() {
    let body = r#"{"message": "¿Y mañana?", "history": [
        {"text": "¿Qué tiempo hace?", "sender": "user"},
        {"text": "Soleado.", "sender": "bot"}
    ]}"#;

    let agent = Arc::new(StubAgent::replying("Lluvia"));
    let (status, _) = send(app_with(Some(agent.clone())), chat_request(body)).await;
    assert_eq!(status, StatusCode::OK);
    assert!(agent.seen.lock().unwrap()[0].1.is_empty());

    let agent = Arc::new(StubAgent::replying("Lluvia"));
    let svc = ChatService::new(Some(agent.clone() as Arc<dyn CompletionAgent>))
        .with_history_forwarding(true);
    let (status, _) = send(create_router(svc, None), chat_request(body)).await;
    assert_eq!(status, StatusCode::OK);
    let seen = agent.seen.lock().unwrap();
    assert_eq!(seen[0].1.len(), 2);
    assert_eq!(seen[0].1[1].text, "Soleado.");
}

#[tokio::test]
async fn test_cors_allows_any_origin() {
    let agent = Arc::new(StubAgent::replying("Buenas"));
    let req = Request::builder()
        .method("POST")
        .uri("/api/chat")
        .header("content-type", "application/json")
        .header("origin", "https://example.org")
        .body(Body::from(r#"{"message": "Hola"}"#))
        .unwrap();
    let response = app_with(Some(agent)).oneshot(req).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get("access-control-allow-origin").unwrap(),
        "*"
    );
}

#[tokio::test]
async fn test_health_endpoint() {
    let req = Request::builder().uri("/health").body(Body::empty()).unwrap();
    let (status, body) = send(app_with(None), req).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, b"OK");
}

/// Collects formatted log output in memory.
#[derive(Clone, Default)]
struct LogBuffer(Arc<Mutex<Vec<u8>>>);

impl std::io::Write for LogBuffer {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for LogBuffer {
    type Writer = LogBuffer;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

#[tokio::test]
async fn test_upstream_failure_is_logged_once_at_error() {
    let logs = LogBuffer::default();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(logs.clone())
        .with_ansi(false)
        .with_max_level(tracing::Level::DEBUG)
        .finish();
    let _guard = tracing::subscriber::set_default(subscriber);

    let agent = Arc::new(StubAgent::failing());
    let svc = ChatService::new(Some(agent as Arc<dyn CompletionAgent>));
    let result = svc.submit_message(ChatRequest::new("Hola")).await;
    assert!(matches!(result, Err(AppError::Upstream { .. })));

    let output = String::from_utf8(logs.0.lock().unwrap().clone()).unwrap();
    let error_lines = output.lines().filter(|l| l.contains("ERROR")).count();
    assert_eq!(error_lines, 1, "log output:\n{output}");
}
