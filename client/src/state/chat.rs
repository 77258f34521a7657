#[cfg(test)]
#[path = "chat_test.rs"]
mod chat_test;

use crate::net::ask::AskError;

/// First message shown in an empty transcript.
pub const GREETING: &str = "Ciao! Sono pnAI002, il tuo assistente avanzato. Puoi farmi domande sui documenti caricati o sui dati nel database.";

/// Who authored a message. Decides bubble placement and avatar icon.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Sender {
    User,
    Bot,
}

/// A single transcript entry. Never mutated after it is appended.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChatMessage {
    pub text: String,
    pub sender: Sender,
    pub is_error: bool,
}

impl ChatMessage {
    pub fn user(text: impl Into<String>) -> Self {
        Self { text: text.into(), sender: Sender::User, is_error: false }
    }

    pub fn bot(text: impl Into<String>) -> Self {
        Self { text: text.into(), sender: Sender::Bot, is_error: false }
    }

    pub fn bot_error(text: impl Into<String>) -> Self {
        Self { text: text.into(), sender: Sender::Bot, is_error: true }
    }
}

/// Submission phase of the widget.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Phase {
    #[default]
    Idle,
    AwaitingResponse,
}

/// State for the chat widget, provided to components as `RwSignal<ChatState>`.
///
/// The transcript is append-only; only [`ChatState::clear`] shrinks it, and
/// always back to the greeting alone.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChatState {
    pub messages: Vec<ChatMessage>,
    pub phase: Phase,
}

impl Default for ChatState {
    fn default() -> Self {
        Self { messages: vec![ChatMessage::bot(GREETING)], phase: Phase::Idle }
    }
}

impl ChatState {
    /// `true` while a request is in flight. Drives the typing indicator.
    pub fn is_awaiting(&self) -> bool {
        self.phase == Phase::AwaitingResponse
    }

    /// Input, send and clear controls are disabled exactly while awaiting.
    pub fn controls_disabled(&self) -> bool {
        self.is_awaiting()
    }

    /// Start a submission from raw input.
    ///
    /// Returns the trimmed question to send, after appending it as a user
    /// message and entering [`Phase::AwaitingResponse`]. Returns `None` and
    /// leaves the state untouched for blank input or while a request is
    /// already in flight.
    pub fn submit(&mut self, raw: &str) -> Option<String> {
        if self.is_awaiting() {
            return None;
        }
        let question = raw.trim();
        if question.is_empty() {
            return None;
        }
        self.messages.push(ChatMessage::user(question));
        self.phase = Phase::AwaitingResponse;
        Some(question.to_owned())
    }

    /// Settle the in-flight request: append exactly one bot message and
    /// return to [`Phase::Idle`].
    ///
    /// Returns `false` (and appends nothing) when no request was pending.
    pub fn settle(&mut self, outcome: Result<String, AskError>) -> bool {
        if !self.is_awaiting() {
            return false;
        }
        let message = match outcome {
            Ok(reply) => ChatMessage::bot(reply),
            Err(e) => ChatMessage::bot_error(e.to_string()),
        };
        self.messages.push(message);
        self.phase = Phase::Idle;
        true
    }

    /// Reset the transcript to the greeting. Refused while awaiting a reply.
    pub fn clear(&mut self) -> bool {
        if self.is_awaiting() {
            return false;
        }
        *self = Self::default();
        true
    }
}
