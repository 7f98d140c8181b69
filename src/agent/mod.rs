use async_trait::async_trait;
use rig::completion::Chat;
use rig::message::Message as RigMessage;
use rig::prelude::CompletionClient;
use rig::providers::gemini;
use tracing::{debug, error};

use crate::errors::AppError;
use crate::models::{HistoryTurn, Sender};

pub const GEMINI_MODEL: &str = "gemini-2.5-flash";

/// An upstream text-generation endpoint.
///
/// The relay only depends on this trait, so tests can swap in a stub and
/// the real provider client stays a single long-lived instance.
#[async_trait]
pub trait CompletionAgent: Send + Sync {
    /// Generate a reply to `message`. `history` holds earlier turns, oldest
    /// first, and is empty for single-turn requests.
    ///
    /// Implementations log the failure cause themselves; callers only see
    /// the error.
    async fn complete(&self, message: &str, history: &[HistoryTurn]) -> Result<String, AppError>;
}

fn to_rig_history(history: &[HistoryTurn]) -> Vec<RigMessage> {
    history
        .iter()
        .map(|turn| match turn.sender {
            Sender::User => RigMessage::user(&turn.text),
            Sender::Bot => RigMessage::assistant(&turn.text),
        })
        .collect()
}

/// Sends chat turns to Gemini through the rig [`gemini::Client`].
#[derive(Clone)]
pub struct GeminiAgentService {
    client: gemini::Client,
    model: String,
}

impl GeminiAgentService {
    pub fn new(api_key: &str) -> Result<Self, AppError> {
        let client = gemini::Client::builder()
            .api_key(api_key)
            .build()
            .map_err(|e| AppError::upstream(format!("failed to build Gemini client: {e}")))?;
        Ok(Self { client, model: GEMINI_MODEL.to_string() })
    }
}

#[async_trait]
impl CompletionAgent for GeminiAgentService {
    async fn complete(&self, message: &str, history: &[HistoryTurn]) -> Result<String, AppError> {
        let agent = self.client.agent(&self.model).build();

        debug!(model = %self.model, history_len = history.len(), "sending completion request");

        agent
            .chat(message, to_rig_history(history))
            .await
            .map_err(|e| {
                error!("Gemini completion failed: {e}");
                AppError::upstream(e.to_string())
            })
    }
}
