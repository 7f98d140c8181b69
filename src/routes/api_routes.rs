use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use tracing::debug;

use crate::errors::AppError;
use crate::models::{ChatRequest, ChatResponse};
use crate::service::chat_service::ChatService;

/// POST `/api/chat` — relays one user message upstream.
///
/// A body that cannot be read as a chat request is treated the same as one
/// without a message, so the client always gets a JSON error body.
pub async fn chat_handler(
    State(svc): State<ChatService>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<ChatResponse>, AppError> {
    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => {
            debug!("unreadable chat request body: {rejection}");
            ChatRequest::default()
        }
    };

    svc.submit_message(request).await.map(Json)
}

/// GET `/health`
pub async fn health_handler() -> &'static str {
    "OK"
}
