use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::agent::CompletionAgent;
use crate::errors::AppError;
use crate::models::{ChatRequest, ChatResponse, HistoryTurn};

/// The relay: validates a request, forwards it upstream, returns the text.
///
/// Holds no per-request state. The agent is shared by every clone, so
/// concurrent requests proceed independently.
#[derive(Clone)]
pub struct ChatService {
    agent: Option<Arc<dyn CompletionAgent>>,
    forward_history: bool,
}

impl ChatService {
    /// `agent` is `None` when no upstream credential is configured; every
    /// call then fails with [`AppError::MissingCredential`].
    pub fn new(agent: Option<Arc<dyn CompletionAgent>>) -> Self {
        Self { agent, forward_history: false }
    }

    pub fn with_history_forwarding(mut self, enabled: bool) -> Self {
        self.forward_history = enabled;
        self
    }

    pub async fn submit_message(&self, request: ChatRequest) -> Result<ChatResponse, AppError> {
        // ── Configuration ────────────────────────────────────────────────────
        let Some(agent) = self.agent.as_ref() else {
            warn!("rejecting chat request: upstream credential is not configured");
            return Err(AppError::MissingCredential);
        };

        // ── Validation ───────────────────────────────────────────────────────
        let message = match request.message {
            Some(m) if !m.trim().is_empty() => m,
            _ => return Err(AppError::MissingMessage),
        };

        let history: &[HistoryTurn] = if self.forward_history { request.history.as_slice() } else { &[] };

        // ── Upstream ─────────────────────────────────────────────────────────
        match agent.complete(&message, history).await {
            Ok(text) => {
                info!(reply_len = text.len(), "relayed chat message");
                Ok(ChatResponse { text })
            }
            Err(e) => {
                debug!("relay call ended with upstream error");
                Err(match e {
                    AppError::Upstream { .. } => e,
                    other => AppError::upstream(other.to_string()),
                })
            }
        }
    }
}
