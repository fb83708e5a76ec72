//! Conversion logic between DTOs and domain entities.
//!
//! Timestamps that cannot be parsed are replaced with the clock's "now"; the
//! `From` impls use the system clock.

use voicevibe_shared::time::{Clock, SystemClock, parse_timestamp_or_now, to_rfc3339_seconds};

use crate::domain::entity;
use crate::dto::http as dto;
use crate::dto::websocket::{ErrorPayload, TypingPayload};

/// Fallback text for error envelopes without a string message
pub const UNKNOWN_ERROR: &str = "Unknown error";

// ========================================
// DTO → Domain Entity
// ========================================

impl dto::MessageDto {
    /// A missing `created_at` is treated like an unparsable one
    pub fn into_domain(self, clock: &dyn Clock) -> entity::ChatMessage {
        entity::ChatMessage {
            id: self.id,
            text: self.text,
            sender_id: self.sender_id,
            sender_name: self.sender_name,
            sender_avatar: self.sender_avatar,
            created_at: parse_timestamp_or_now(
                self.created_at.as_deref().unwrap_or_default(),
                clock,
            ),
            read_at: self
                .read_at
                .as_deref()
                .map(|read_at| parse_timestamp_or_now(read_at, clock)),
            is_read: self.is_read,
        }
    }
}

impl From<dto::MessageDto> for entity::ChatMessage {
    fn from(dto: dto::MessageDto) -> Self {
        dto.into_domain(&SystemClock)
    }
}

impl From<dto::ConversationUserDto> for entity::ConversationUser {
    fn from(dto: dto::ConversationUserDto) -> Self {
        Self {
            id: dto.id,
            username: dto.username,
            display_name: dto.display_name,
            avatar_url: dto.avatar_url,
            is_online: dto.is_online == Some(true),
        }
    }
}

impl dto::ConversationDto {
    pub fn into_domain(self, clock: &dyn Clock) -> entity::Conversation {
        entity::Conversation {
            id: self.id,
            other_user: self.other_user.into(),
            last_message: self.last_message.map(|message| message.into_domain(clock)),
            unread_count: self.unread_count,
            created_at: parse_timestamp_or_now(&self.created_at, clock),
            updated_at: parse_timestamp_or_now(&self.updated_at, clock),
        }
    }
}

impl From<dto::ConversationDto> for entity::Conversation {
    fn from(dto: dto::ConversationDto) -> Self {
        dto.into_domain(&SystemClock)
    }
}

impl dto::ConversationDetailDto {
    pub fn into_domain(self, clock: &dyn Clock) -> entity::ConversationDetail {
        entity::ConversationDetail {
            id: self.id,
            other_user: self.other_user.into(),
            messages: self
                .messages
                .into_iter()
                .map(|message| message.into_domain(clock))
                .collect(),
            created_at: parse_timestamp_or_now(&self.created_at, clock),
            updated_at: parse_timestamp_or_now(&self.updated_at, clock),
        }
    }
}

impl From<dto::ConversationDetailDto> for entity::ConversationDetail {
    fn from(dto: dto::ConversationDetailDto) -> Self {
        dto.into_domain(&SystemClock)
    }
}

impl From<TypingPayload> for entity::TypingEvent {
    fn from(payload: TypingPayload) -> Self {
        Self {
            user_id: payload.user_id.unwrap_or(0),
            is_typing: payload.is_typing.unwrap_or(false),
        }
    }
}

impl ErrorPayload {
    /// The error text, or [`UNKNOWN_ERROR`] if the field is not a string
    pub fn into_text(self) -> String {
        match self.message {
            serde_json::Value::String(text) => text,
            _ => UNKNOWN_ERROR.to_string(),
        }
    }
}

// ========================================
// Domain Entity → DTO
// ========================================

impl From<entity::ChatMessage> for dto::MessageDto {
    fn from(model: entity::ChatMessage) -> Self {
        Self {
            id: model.id,
            text: model.text,
            sender_id: model.sender_id,
            sender_name: model.sender_name,
            sender_avatar: model.sender_avatar,
            created_at: Some(to_rfc3339_seconds(&model.created_at)),
            read_at: model.read_at.as_ref().map(to_rfc3339_seconds),
            is_read: model.is_read,
        }
    }
}

impl From<entity::ConversationUser> for dto::ConversationUserDto {
    fn from(model: entity::ConversationUser) -> Self {
        Self {
            id: model.id,
            username: model.username,
            display_name: model.display_name,
            avatar_url: model.avatar_url,
            is_online: Some(model.is_online),
        }
    }
}
