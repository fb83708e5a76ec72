//! Envelope codec: outbound intents to text frames, text frames to events.

use voicevibe_shared::time::Clock;

use crate::{
    domain::{ChatMessage, TypingEvent},
    dto::websocket::{InboundEnvelope, OutboundIntent},
    error::ChatError,
};

/// A decoded inbound event, ready for broadcast
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InboundEvent {
    Message(ChatMessage),
    Typing(TypingEvent),
    Error(String),
}

/// Serialize an intent into its wire envelope
pub fn encode(intent: &OutboundIntent) -> Result<String, ChatError> {
    Ok(serde_json::to_string(intent)?)
}

/// Decode a text frame.
///
/// Returns `None` for envelopes with an unrecognized tag. A frame that cannot
/// be decoded becomes an [`InboundEvent::Error`] describing the failure.
pub fn decode(text: &str, clock: &dyn Clock) -> Option<InboundEvent> {
    match InboundEnvelope::parse(text) {
        Ok(InboundEnvelope::Chat(payload)) => {
            Some(InboundEvent::Message(payload.message.into_domain(clock)))
        }
        Ok(InboundEnvelope::Typing(payload)) => Some(InboundEvent::Typing(payload.into())),
        Ok(InboundEnvelope::Error(payload)) => Some(InboundEvent::Error(payload.into_text())),
        Ok(InboundEnvelope::Unknown(tag)) => {
            tracing::debug!("Dropping envelope with unrecognized type {:?}", tag);
            None
        }
        Err(e) => {
            tracing::warn!("Failed to parse inbound frame: {}", e);
            Some(InboundEvent::Error(format!("Failed to parse message: {}", e)))
        }
    }
}
