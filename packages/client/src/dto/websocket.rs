//! Realtime envelope DTOs.
//!
//! Every frame is a JSON object carrying a `type` discriminator. Outbound
//! intents are flat; inbound payloads are decoded in two stages: the
//! discriminator first, then the payload shape it names.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::http::MessageDto;

/// A user action to transmit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum OutboundIntent {
    /// `{"type":"message","text":"..."}`
    Message { text: String },
    /// `{"type":"typing","isTyping":true}`
    Typing {
        #[serde(rename = "isTyping")]
        is_typing: bool,
    },
    /// `{"type":"mark_read"}`
    MarkRead,
}

/// Inbound tag values
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageType {
    Message,
    Typing,
    Error,
}

impl MessageType {
    fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "message" => Some(Self::Message),
            "typing" => Some(Self::Typing),
            "error" => Some(Self::Error),
            _ => None,
        }
    }
}

/// First decoding stage: the discriminator only
#[derive(Debug, Deserialize)]
struct EnvelopeTag {
    #[serde(rename = "type", default)]
    r#type: Option<String>,
}

/// `{"type":"message","message":{...}}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatPayload {
    pub message: MessageDto,
}

/// `{"type":"typing","userId":7,"isTyping":true}`
///
/// Absent or `null` fields default to user `0` and not typing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypingPayload {
    #[serde(default)]
    pub user_id: Option<i64>,
    #[serde(default)]
    pub is_typing: Option<bool>,
}

/// `{"type":"error","message":"..."}`
///
/// `message` is kept untyped so that a non-string value is not a decode error.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ErrorPayload {
    #[serde(default)]
    pub message: Value,
}

/// A decoded server push
#[derive(Debug, Clone, PartialEq)]
pub enum InboundEnvelope {
    Chat(ChatPayload),
    Typing(TypingPayload),
    Error(ErrorPayload),
    /// Unrecognized or missing tag; carries the tag if there was one
    Unknown(Option<String>),
}

impl InboundEnvelope {
    /// Parse a text frame.
    ///
    /// # Errors
    ///
    /// Returns the `serde_json` error when the frame is not JSON, the tag is
    /// not a string, or the payload does not match the shape its tag names.
    pub fn parse(text: &str) -> Result<Self, serde_json::Error> {
        let value: Value = serde_json::from_str(text)?;
        let tag = EnvelopeTag::deserialize(&value)?;

        let Some(message_type) = tag.r#type.as_deref().and_then(MessageType::from_tag) else {
            return Ok(Self::Unknown(tag.r#type));
        };

        Ok(match message_type {
            MessageType::Message => Self::Chat(serde_json::from_value(value)?),
            MessageType::Typing => Self::Typing(serde_json::from_value(value)?),
            MessageType::Error => Self::Error(serde_json::from_value(value)?),
        })
    }
}
