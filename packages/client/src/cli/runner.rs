//! Client execution logic with reconnection support.

use std::time::Duration;

use rustyline::{DefaultEditor, error::ReadlineError};
use tokio::sync::{broadcast::error::RecvError, mpsc};

use crate::{
    config::ChatConfig,
    domain::{ConnectionState, ConversationId},
    error::ChatError,
    session::ChatSession,
    timeline::ConversationTimeline,
};

use super::{
    domain::{InputCommand, SessionEnd, parse_input, should_attempt_reconnect},
    formatter::MessageFormatter,
    ui::{prompt, redisplay_prompt},
};

/// Everything the CLI needs to join a conversation
#[derive(Debug, Clone)]
pub struct ClientOptions {
    pub conversation_id: ConversationId,
    pub token: String,
    /// Marks own messages and filters own typing echoes
    pub own_user_id: Option<i64>,
    pub config: ChatConfig,
    pub max_reconnect_attempts: u32,
    pub reconnect_interval: Duration,
}

/// Run the interactive client with reconnection logic
pub async fn run_client(options: ClientOptions) -> Result<(), Box<dyn std::error::Error>> {
    let session = ChatSession::new(options.config.clone());
    let mut timeline = ConversationTimeline::new();
    if let Some(user_id) = options.own_user_id {
        timeline = timeline.with_own_user_id(user_id);
    }

    let mut input_rx = spawn_readline(options.conversation_id.value());
    let mut reconnect_count = 0;

    loop {
        tracing::info!(
            "Joining conversation {} (attempt {}/{})",
            options.conversation_id,
            reconnect_count + 1,
            options.max_reconnect_attempts + 1
        );

        let end = run_session(
            &session,
            &options,
            &mut timeline,
            &mut input_rx,
            &mut reconnect_count,
        )
        .await;

        let reason = match &end {
            SessionEnd::UserQuit => {
                tracing::info!("Client session ended normally");
                session.disconnect();
                break;
            }
            SessionEnd::ConnectionLost(reason) => reason.clone(),
        };

        tracing::warn!("Connection lost: {}", reason);
        if !should_attempt_reconnect(&end, reconnect_count, options.max_reconnect_attempts) {
            tracing::error!(
                "Failed to reconnect after {} attempts. Exiting.",
                reconnect_count
            );
            return Err(Box::new(ChatError::Connection(reason)));
        }
        reconnect_count += 1;

        tracing::info!(
            "Reconnecting in {:?}... (attempt {}/{})",
            options.reconnect_interval,
            reconnect_count,
            options.max_reconnect_attempts
        );
        tokio::time::sleep(options.reconnect_interval).await;
    }

    Ok(())
}

/// Connect once and pump events until the connection ends or the user quits
async fn run_session(
    session: &ChatSession,
    options: &ClientOptions,
    timeline: &mut ConversationTimeline,
    input_rx: &mut mpsc::UnboundedReceiver<String>,
    reconnect_count: &mut u32,
) -> SessionEnd {
    let events = session.events();
    let mut states = events.watch_state();
    let mut messages = events.subscribe_messages();
    let mut typing = events.subscribe_typing();
    let mut errors = events.subscribe_errors();
    let conversation_id = options.conversation_id.value();

    session.connect(options.conversation_id, &options.token);

    loop {
        tokio::select! {
            changed = states.changed() => {
                if changed.is_err() {
                    return SessionEnd::ConnectionLost("session closed".to_string());
                }
                let state = states.borrow_and_update().clone();
                timeline.apply_state(&state);
                print!("{}", MessageFormatter::format_state(&state));
                redisplay_prompt(conversation_id);

                match state {
                    ConnectionState::Connected => *reconnect_count = 0,
                    ConnectionState::Error(reason) => return SessionEnd::ConnectionLost(reason),
                    ConnectionState::Disconnected => {
                        return SessionEnd::ConnectionLost("connection closed".to_string());
                    }
                    ConnectionState::Connecting => {}
                }
            }
            message = messages.recv() => match message {
                Ok(message) => {
                    if timeline.apply_message(message.clone()) {
                        print!(
                            "{}",
                            MessageFormatter::format_chat_message(&message, options.own_user_id)
                        );
                        redisplay_prompt(conversation_id);
                    }
                }
                Err(RecvError::Lagged(skipped)) => {
                    tracing::warn!("Display fell behind, {} messages skipped", skipped);
                }
                Err(RecvError::Closed) => {
                    return SessionEnd::ConnectionLost("session closed".to_string());
                }
            },
            event = typing.recv() => {
                if let Ok(event) = event
                    && timeline.apply_typing(event)
                {
                    let name = timeline
                        .other_user()
                        .map(|user| user.display_name.clone())
                        .unwrap_or_else(|| format!("user {}", event.user_id));
                    print!("{}", MessageFormatter::format_typing(&name, event.is_typing));
                    redisplay_prompt(conversation_id);
                }
            }
            error = errors.recv() => {
                if let Ok(error) = error {
                    print!("{}", MessageFormatter::format_error(&error));
                    redisplay_prompt(conversation_id);
                    timeline.apply_error(error);
                }
            }
            line = input_rx.recv() => {
                let Some(line) = line else {
                    return SessionEnd::UserQuit;
                };
                let result = match parse_input(&line) {
                    None => Ok(()),
                    Some(InputCommand::Send(text)) => session.send_message(text),
                    Some(InputCommand::Typing(is_typing)) => session.send_typing_indicator(is_typing),
                    Some(InputCommand::MarkRead) => session.mark_as_read(),
                    Some(InputCommand::Help) => {
                        print!("{}", MessageFormatter::format_help());
                        Ok(())
                    }
                    Some(InputCommand::Quit) => return SessionEnd::UserQuit,
                    Some(InputCommand::Unknown(command)) => {
                        print!("{}", MessageFormatter::format_error(&format!("Unknown command: {}", command)));
                        Ok(())
                    }
                };
                if let Err(e) = result {
                    print!("{}", MessageFormatter::format_send_failure(&e));
                }
                redisplay_prompt(conversation_id);
            }
        }
    }
}

/// Read lines on a blocking thread (rustyline is synchronous)
fn spawn_readline(conversation_id: i64) -> mpsc::UnboundedReceiver<String> {
    let (input_tx, input_rx) = mpsc::unbounded_channel::<String>();

    std::thread::spawn(move || {
        let mut rl = match DefaultEditor::new() {
            Ok(rl) => rl,
            Err(e) => {
                tracing::error!("Failed to initialize readline: {}", e);
                return;
            }
        };

        let prompt = prompt(conversation_id);
        loop {
            match rl.readline(&prompt) {
                Ok(line) => {
                    if !line.trim().is_empty() {
                        rl.add_history_entry(line.as_str()).ok();
                    }
                    if input_tx.send(line).is_err() {
                        break;
                    }
                }
                Err(ReadlineError::Interrupted) => {
                    tracing::info!("Interrupted");
                    break;
                }
                Err(ReadlineError::Eof) => {
                    tracing::info!("EOF");
                    break;
                }
                Err(err) => {
                    tracing::error!("Readline error: {}", err);
                    break;
                }
            }
        }
    });

    input_rx
}
