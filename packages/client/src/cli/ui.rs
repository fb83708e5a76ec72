//! UI utilities for the client.

use std::io::Write;

/// Prompt shown while typing in a conversation
pub fn prompt(conversation_id: i64) -> String {
    format!("#{}> ", conversation_id)
}

/// Redisplay the prompt after printing an event
pub fn redisplay_prompt(conversation_id: i64) {
    print!("{}", prompt(conversation_id));
    std::io::stdout().flush().ok();
}
