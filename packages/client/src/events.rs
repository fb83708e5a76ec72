//! Event broadcast surface.
//!
//! Decoded inbound events fan out to any number of subscribers through three
//! independent broadcast channels. Subscribers only see events emitted after
//! they subscribed; a subscriber that falls more than the channel capacity
//! behind skips the oldest events. The connection state is a watch channel,
//! so a new observer reads the latest state immediately.

use tokio::sync::{broadcast, watch};

use crate::{
    codec::InboundEvent,
    domain::{ChatMessage, ConnectionState, TypingEvent},
};

/// Sending half of every event stream, shared by a session and its
/// connection tasks
#[derive(Debug, Clone)]
pub struct ChatEvents {
    messages: broadcast::Sender<ChatMessage>,
    typing: broadcast::Sender<TypingEvent>,
    errors: broadcast::Sender<String>,
    state: watch::Sender<ConnectionState>,
}

impl ChatEvents {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        let (messages, _) = broadcast::channel(capacity);
        let (typing, _) = broadcast::channel(capacity);
        let (errors, _) = broadcast::channel(capacity);
        let (state, _) = watch::channel(ConnectionState::Disconnected);
        Self {
            messages,
            typing,
            errors,
            state,
        }
    }

    pub fn subscribe_messages(&self) -> broadcast::Receiver<ChatMessage> {
        self.messages.subscribe()
    }

    pub fn subscribe_typing(&self) -> broadcast::Receiver<TypingEvent> {
        self.typing.subscribe()
    }

    pub fn subscribe_errors(&self) -> broadcast::Receiver<String> {
        self.errors.subscribe()
    }

    pub fn watch_state(&self) -> watch::Receiver<ConnectionState> {
        self.state.subscribe()
    }

    pub fn state(&self) -> ConnectionState {
        self.state.borrow().clone()
    }

    /// Publish a state; observers are only notified when it differs from the
    /// current one.
    pub(crate) fn set_state(&self, next: ConnectionState) {
        self.state.send_if_modified(|current| {
            if *current == next {
                return false;
            }
            tracing::debug!("Connection state: {} -> {}", current, next);
            *current = next;
            true
        });
    }

    /// Route a decoded event to its stream
    pub fn emit(&self, event: InboundEvent) {
        match event {
            InboundEvent::Message(message) => {
                if self.messages.send(message).is_err() {
                    tracing::trace!("No message subscribers, event dropped");
                }
            }
            InboundEvent::Typing(typing) => {
                if self.typing.send(typing).is_err() {
                    tracing::trace!("No typing subscribers, event dropped");
                }
            }
            InboundEvent::Error(error) => self.emit_error(error),
        }
    }

    pub fn emit_error(&self, error: String) {
        if self.errors.send(error).is_err() {
            tracing::trace!("No error subscribers, event dropped");
        }
    }
}
