use gloo_net::http::Request;
use web_sys::AbortSignal;

use crate::config::ClientConfig;
use crate::models::{ChatReply, ChatRequest};

const NETWORK_ERROR: &str = "No se pudo conectar.";
const SERVER_ERROR: &str = "Error en la respuesta del servidor.";
const CANCELLED: &str = "Solicitud cancelada.";

/// Sends one message to the relay and returns the bot's reply text, or a
/// human-readable reason on failure.
pub async fn send_chat(
    config: &ClientConfig,
    request: &ChatRequest,
    abort: Option<&AbortSignal>,
) -> Result<String, String> {
    let resp = Request::post(&config.chat_url())
        .abort_signal(abort)
        .json(request)
        .map_err(|e| format!("Serialize error: {e}"))?
        .send()
        .await
        .map_err(|e| {
            let aborted = abort.is_some_and(AbortSignal::aborted);
            let (level, reason) = send_failure(aborted);
            log::log!(level, "Request to relay failed: {e}");
            reason.to_string()
        })?;

    let ok = resp.ok();
    let reply = resp.json::<ChatReply>().await.unwrap_or_else(|e| {
        log::error!("Parse error ({}): {e}", resp.status());
        ChatReply::default()
    });

    interpret(ok, reply)
}

/// An aborted fetch is the view going away, not a connectivity problem.
fn send_failure(aborted: bool) -> (log::Level, &'static str) {
    if aborted {
        (log::Level::Debug, CANCELLED)
    } else {
        (log::Level::Error, NETWORK_ERROR)
    }
}

fn interpret(ok: bool, reply: ChatReply) -> Result<String, String> {
    match (ok, reply) {
        (_, ChatReply { error: Some(error), .. }) => Err(error),
        (true, ChatReply { text: Some(text), .. }) => Ok(text),
        _ => Err(SERVER_ERROR.to_string()),
    }
}
