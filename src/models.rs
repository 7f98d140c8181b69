use serde::{Deserialize, Serialize};

/// Who authored a prior turn the client chose to forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Bot,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryTurn {
    pub text: String,
    pub sender: Sender,
}

/// Body of `POST /api/chat`.
///
/// `message` is optional on the wire so that an absent field reports
/// `MissingMessage` instead of an extractor rejection.
#[derive(Debug, Default, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub history: Vec<HistoryTurn>,
}

impl ChatRequest {
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: Some(message.into()), history: Vec::new() }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatResponse {
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}
