//! Message formatting utilities for client display.

use voicevibe_shared::time::to_rfc3339_seconds;

use crate::domain::{ChatMessage, ConnectionState};

const RULE: &str = "------------------------------------------------------------";

/// Message formatter for client display
pub struct MessageFormatter;

impl MessageFormatter {
    /// Format a chat message
    ///
    /// # Arguments
    ///
    /// * `message` - The delivered message
    /// * `own_user_id` - The current user's ID, to mark own messages as "me"
    pub fn format_chat_message(message: &ChatMessage, own_user_id: Option<i64>) -> String {
        let me_suffix = if own_user_id == Some(message.sender_id) {
            " (me)"
        } else {
            ""
        };
        let read_line = match &message.read_at {
            Some(read_at) => format!("read at {}\n", to_rfc3339_seconds(read_at)),
            None => String::new(),
        };
        format!(
            "\n\n{rule}\n@{}{}: {}\nsent at {}\n{}{rule}\n",
            message.sender_name,
            me_suffix,
            message.text,
            to_rfc3339_seconds(&message.created_at),
            read_line,
            rule = RULE,
        )
    }

    /// Format a typing notification
    pub fn format_typing(name: &str, is_typing: bool) -> String {
        if is_typing {
            format!("\n… {} is typing\n", name)
        } else {
            format!("\n… {} stopped typing\n", name)
        }
    }

    /// Format a connection state change
    pub fn format_state(state: &ConnectionState) -> String {
        match state {
            ConnectionState::Disconnected => "\n* Disconnected\n".to_string(),
            ConnectionState::Connecting => "\n* Connecting...\n".to_string(),
            ConnectionState::Connected => {
                "\n* Connected. Type messages and press Enter to send. /help for commands.\n"
                    .to_string()
            }
            ConnectionState::Error(reason) => format!("\n* Connection error: {}\n", reason),
        }
    }

    /// Format an error pushed by the server or raised while decoding
    pub fn format_error(error: &str) -> String {
        format!("\n! {}\n", error)
    }

    /// Format a local send failure
    pub fn format_send_failure(error: &dyn std::error::Error) -> String {
        format!("\n! Not sent: {}\n", error)
    }

    pub fn format_help() -> String {
        [
            "",
            "Commands:",
            "  /typing on|off  send a typing indicator",
            "  /read           mark the conversation as read",
            "  /quit           leave the conversation",
            "  //text          send text starting with '/'",
            "",
        ]
        .join("\n")
    }
}
