//! Conversation state for the chat view, kept free of any browser types so
//! the transitions can be tested natively.

use crate::models::{HistoryTurn, Message, Sender};

pub const GREETING: &str = "¡Hola! Pregúntale a EmeraldAI.";

/// Identifies one outstanding relay call. A resolution carrying any other
/// ticket is stale and gets dropped.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RequestTicket(u64);

/// What `submit` hands to the transport layer.
#[derive(Clone, Debug, PartialEq)]
pub struct PendingRequest {
    pub ticket: RequestTicket,
    pub text: String,
    pub history: Vec<HistoryTurn>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ChatSession {
    messages: Vec<Message>,
    is_waiting: bool,
    in_flight: Option<RequestTicket>,
    next_ticket: u64,
}

impl Default for ChatSession {
    fn default() -> Self {
        Self::new()
    }
}

impl ChatSession {
    pub fn new() -> Self {
        Self {
            messages: vec![Message::new(GREETING, Sender::Bot)],
            is_waiting: false,
            in_flight: None,
            next_ticket: 0,
        }
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn is_waiting(&self) -> bool {
        self.is_waiting
    }

    pub fn can_submit(&self, input: &str) -> bool {
        !self.is_waiting && !input.trim().is_empty()
    }

    /// Moves Idle -> Waiting with the user's `input`. Returns `None` without
    /// touching anything when a call is already outstanding or the trimmed
    /// input is empty; the caller clears its input only on `Some`.
    pub fn submit(&mut self, input: &str, include_history: bool) -> Option<PendingRequest> {
        if !self.can_submit(input) {
            return None;
        }

        let history = if include_history { self.transcript() } else { Vec::new() };
        let text = input.trim().to_string();
        self.messages.push(Message::new(text.clone(), Sender::User));
        self.is_waiting = true;

        let ticket = RequestTicket(self.next_ticket);
        self.next_ticket += 1;
        self.in_flight = Some(ticket);

        Some(PendingRequest { ticket, text, history })
    }

    /// Moves Waiting -> Idle with the relay's outcome. Returns `false` when
    /// the ticket is stale (cancelled or superseded) and nothing changed.
    pub fn resolve(&mut self, ticket: RequestTicket, outcome: Result<String, String>) -> bool {
        if self.in_flight != Some(ticket) {
            return false;
        }

        let message = match outcome {
            Ok(text) => Message::new(text, Sender::Bot),
            Err(reason) => Message::new(format!("⚠️ Error: {reason}"), Sender::System),
        };
        self.messages.push(message);
        self.in_flight = None;
        self.is_waiting = false;
        true
    }

    /// Abandons the outstanding call; its eventual resolution is ignored.
    pub fn cancel(&mut self) {
        self.in_flight = None;
        self.is_waiting = false;
    }

    /// True while only the greeting placeholder exists.
    pub fn is_initial_screen(&self) -> bool {
        self.messages.len() == 1 && self.messages[0].sender == Sender::Bot
    }

    /// Messages to render: the greeting is a placeholder and disappears as
    /// soon as anything else has been added.
    pub fn visible_messages(&self) -> &[Message] {
        match self.messages.first() {
            Some(first) if first.sender == Sender::Bot && self.messages.len() > 1 => {
                &self.messages[1..]
            }
            _ => &self.messages,
        }
    }

    /// Visible messages paired with their position in the full list. The
    /// list is append-only, so the position is a stable render key.
    pub fn visible_entries(&self) -> Vec<(usize, Message)> {
        let offset = self.messages.len() - self.visible_messages().len();
        self.visible_messages()
            .iter()
            .cloned()
            .enumerate()
            .map(|(i, m)| (i + offset, m))
            .collect()
    }

    /// Prior user/bot turns after the greeting. System notices stay local.
    pub fn transcript(&self) -> Vec<HistoryTurn> {
        self.messages
            .iter()
            .skip(1)
            .filter_map(|m| match m.sender {
                Sender::User | Sender::Bot => Some(HistoryTurn {
                    text: m.text.clone(),
                    sender: m.sender,
                }),
                Sender::System => None,
            })
            .collect()
    }
}
