//! Domain layer: conversation records and the transport lifecycle.

pub mod entity;
pub mod state;
pub mod value_object;

pub use entity::{ChatMessage, Conversation, ConversationDetail, ConversationUser, TypingEvent};
pub use state::ConnectionState;
pub use value_object::ConversationId;
