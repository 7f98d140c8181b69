use serde::{Deserialize, Serialize};

/// Origin of a message. `System` marks notices the client synthesizes
/// itself; they never travel to or from the relay.
#[derive(Clone, Copy, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Bot,
    System,
}

impl Sender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Sender::User => "user",
            Sender::Bot => "bot",
            Sender::System => "system",
        }
    }

    /// Label shown above a message bubble.
    pub fn label(&self) -> &'static str {
        match self {
            Sender::User => "Tú:",
            Sender::Bot | Sender::System => "IA:",
        }
    }
}

/// One entry in the conversation display list.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct Message {
    pub text: String,
    pub sender: Sender,
}

impl Message {
    pub fn new(text: impl Into<String>, sender: Sender) -> Self {
        Self { text: text.into(), sender }
    }
}

/// A prior turn forwarded to the relay when history is enabled.
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct HistoryTurn {
    pub text: String,
    pub sender: Sender,
}

/// Request body for `POST /api/chat`.
#[derive(Clone, Debug, Serialize)]
pub struct ChatRequest {
    pub message: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub history: Vec<HistoryTurn>,
}

/// Either shape the relay may answer with.
#[derive(Clone, Debug, Deserialize, Default)]
pub struct ChatReply {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}
