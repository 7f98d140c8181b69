use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;

use crate::models::ErrorBody;

const MISSING_MESSAGE: &str = "Falta el mensaje del usuario.";
const MISSING_CREDENTIAL: &str = "Gemini API key is not configured in the server environment.";
const UPSTREAM_FAILURE: &str = "Error interno del servidor al generar la respuesta.";

/// Every way a relay call can fail.
///
/// The `Display` output is meant for logs and may carry upstream detail;
/// clients only ever see [`AppError::public_message`].
#[derive(Debug, Error)]
pub enum AppError {
    // ── Client input ─────────────────────────────────────────────────────────
    #[error("request is missing the user message")]
    MissingMessage,

    // ── Server configuration ─────────────────────────────────────────────────
    #[error("GEMINI_API_KEY is not set")]
    MissingCredential,

    // ── Upstream completion API ──────────────────────────────────────────────
    #[error("upstream completion failed: {message}")]
    Upstream { message: String },
}

impl AppError {
    pub fn upstream(message: impl Into<String>) -> Self {
        AppError::Upstream { message: message.into() }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::MissingMessage => StatusCode::BAD_REQUEST,
            AppError::MissingCredential | AppError::Upstream { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Text safe to put in a response body.
    pub fn public_message(&self) -> &'static str {
        match self {
            AppError::MissingMessage => MISSING_MESSAGE,
            AppError::MissingCredential => MISSING_CREDENTIAL,
            AppError::Upstream { .. } => UPSTREAM_FAILURE,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = ErrorBody { error: self.public_message().to_string() };
        (self.status(), Json(body)).into_response()
    }
}
