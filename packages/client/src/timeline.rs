//! Conversation view state folded from session events.

use crate::domain::{ChatMessage, ConnectionState, ConversationDetail, ConversationUser, TypingEvent};

/// Messages and presence of one conversation as a screen would show them
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConversationTimeline {
    conversation_id: Option<i64>,
    own_user_id: Option<i64>,
    other_user: Option<ConversationUser>,
    messages: Vec<ChatMessage>,
    other_user_typing: bool,
    is_connected: bool,
    last_error: Option<String>,
}

impl ConversationTimeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the timeline with the history loaded over HTTP
    pub fn from_detail(detail: ConversationDetail) -> Self {
        Self {
            conversation_id: Some(detail.id),
            other_user: Some(detail.other_user),
            messages: detail.messages,
            ..Self::default()
        }
    }

    /// Ignore typing notifications about this user (our own echoes)
    pub fn with_own_user_id(mut self, user_id: i64) -> Self {
        self.own_user_id = Some(user_id);
        self
    }

    pub fn conversation_id(&self) -> Option<i64> {
        self.conversation_id
    }

    pub fn other_user(&self) -> Option<&ConversationUser> {
        self.other_user.as_ref()
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn other_user_typing(&self) -> bool {
        self.other_user_typing
    }

    pub fn is_connected(&self) -> bool {
        self.is_connected
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Append a message unless one with the same id is already present.
    ///
    /// Returns `true` if the message was appended.
    pub fn apply_message(&mut self, message: ChatMessage) -> bool {
        if self.messages.iter().any(|m| m.id == message.id) {
            tracing::debug!("Skipping duplicate message {}", message.id);
            return false;
        }
        self.messages.push(message);
        true
    }

    /// Returns `true` if the typing flag changed
    pub fn apply_typing(&mut self, event: TypingEvent) -> bool {
        if self.own_user_id == Some(event.user_id) {
            return false;
        }
        let changed = self.other_user_typing != event.is_typing;
        self.other_user_typing = event.is_typing;
        changed
    }

    pub fn apply_state(&mut self, state: &ConnectionState) {
        self.is_connected = state.is_connected();
        if !self.is_connected {
            self.other_user_typing = false;
        }
    }

    pub fn apply_error(&mut self, error: String) {
        self.last_error = Some(error);
    }
}
