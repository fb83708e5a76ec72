//! Domain logic for the CLI.
//!
//! Pure functions for input parsing and the reconnection policy, kept free of
//! side effects so they are easy to test.

/// How a connected session ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEnd {
    /// The user quit (`/quit`, Ctrl+C or Ctrl+D)
    UserQuit,
    /// The connection failed or was closed by the server
    ConnectionLost(String),
}

/// A line typed by the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputCommand {
    Send(String),
    Typing(bool),
    MarkRead,
    Help,
    Quit,
    Unknown(String),
}

/// Parse one input line. Blank lines yield `None`.
///
/// Lines starting with `/` are commands; `//` escapes a literal slash.
pub fn parse_input(line: &str) -> Option<InputCommand> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }

    if let Some(escaped) = line.strip_prefix("//") {
        return Some(InputCommand::Send(format!("/{}", escaped)));
    }

    let Some(command) = line.strip_prefix('/') else {
        return Some(InputCommand::Send(line.to_string()));
    };

    let mut words = command.split_whitespace();
    let parsed = match (words.next(), words.next(), words.next()) {
        (Some("typing"), Some("on"), None) => InputCommand::Typing(true),
        (Some("typing"), Some("off"), None) => InputCommand::Typing(false),
        (Some("read"), None, None) => InputCommand::MarkRead,
        (Some("help"), None, None) => InputCommand::Help,
        (Some("quit" | "exit"), None, None) => InputCommand::Quit,
        _ => InputCommand::Unknown(line.to_string()),
    };
    Some(parsed)
}

/// Check if the client should attempt to reconnect.
///
/// # Arguments
///
/// * `end` - How the last session ended
/// * `current_attempt` - Failed attempts so far since the last successful connection
/// * `max_attempts` - The maximum number of reconnection attempts allowed
pub fn should_attempt_reconnect(end: &SessionEnd, current_attempt: u32, max_attempts: u32) -> bool {
    match end {
        SessionEnd::UserQuit => false,
        SessionEnd::ConnectionLost(_) => current_attempt < max_attempts,
    }
}
