//! Messaging record DTOs.
//!
//! These mirror the backend's messaging resources. `MessageDto` is also the
//! payload nested in realtime `"message"` envelopes.

use serde::{Deserialize, Serialize};

/// Message as sent by the backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageDto {
    pub id: i64,
    pub text: String,
    pub sender_id: i64,
    pub sender_name: String,
    pub sender_avatar: Option<String>,
    /// Missing or `null` reads as the current time on conversion
    #[serde(default)]
    pub created_at: Option<String>,
    pub read_at: Option<String>,
    pub is_read: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversationUserDto {
    pub id: i64,
    pub username: String,
    pub display_name: String,
    pub avatar_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_online: Option<bool>,
}

/// Conversation preview
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversationDto {
    pub id: i64,
    pub other_user: ConversationUserDto,
    pub last_message: Option<MessageDto>,
    pub unread_count: u32,
    pub created_at: String,
    pub updated_at: String,
}

/// Conversation with all messages
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversationDetailDto {
    pub id: i64,
    pub other_user: ConversationUserDto,
    pub messages: Vec<MessageDto>,
    pub created_at: String,
    pub updated_at: String,
}

/// Request body for sending a message over HTTP
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendMessageRequest {
    pub recipient_id: i64,
    pub text: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnreadMessagesCountDto {
    pub unread_count: u32,
}
