//! Domain entities.

use chrono::{DateTime, Utc};

/// A delivered conversation message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    pub id: i64,
    pub text: String,
    pub sender_id: i64,
    pub sender_name: String,
    pub sender_avatar: Option<String>,
    pub created_at: DateTime<Utc>,
    pub read_at: Option<DateTime<Utc>>,
    pub is_read: bool,
}

/// A transient typing notification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypingEvent {
    pub user_id: i64,
    pub is_typing: bool,
}

/// The other participant of a conversation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversationUser {
    pub id: i64,
    pub username: String,
    pub display_name: String,
    pub avatar_url: Option<String>,
    pub is_online: bool,
}

/// Conversation preview, as listed in the inbox
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conversation {
    pub id: i64,
    pub other_user: ConversationUser,
    pub last_message: Option<ChatMessage>,
    pub unread_count: u32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Conversation with its full message history
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversationDetail {
    pub id: i64,
    pub other_user: ConversationUser,
    pub messages: Vec<ChatMessage>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
