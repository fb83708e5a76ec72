//! Interactive VoiceVibe conversation client with reconnection support.
//!
//! Joins one conversation over WebSocket, prints incoming messages and typing
//! notifications, and sends each line typed at the prompt as a chat message.
//! Automatically reconnects on disconnection (max 5 attempts with 5 second interval by default).
//!
//! Run with:
//! ```not_rust
//! cargo run --bin voicevibe-chat -- --conversation-id 42 --token abc123
//! cargo run --bin voicevibe-chat -- -c 42 -t abc123 -u ws://127.0.0.1:8000/ws/ --user-id 4
//! ```

use std::time::Duration;

use clap::Parser;

use voicevibe_chat::{
    cli::{ClientOptions, run_client},
    config::{ChatConfig, DEFAULT_EVENT_CAPACITY, DEFAULT_WS_BASE_URL},
    domain::ConversationId,
};
use voicevibe_shared::logger::setup_logger;

#[derive(Parser, Debug)]
#[command(name = "voicevibe-chat")]
#[command(about = "Realtime conversation client for VoiceVibe", long_about = None)]
struct Args {
    /// Conversation to join
    #[arg(short = 'c', long)]
    conversation_id: i64,

    /// Auth token, sent as the `token` query parameter
    #[arg(short = 't', long)]
    token: String,

    /// WebSocket base URL
    #[arg(short = 'u', long, default_value = DEFAULT_WS_BASE_URL)]
    url: String,

    /// Own user ID, used to mark own messages
    #[arg(long)]
    user_id: Option<i64>,

    /// Keep-alive ping interval in seconds (0 disables pings)
    #[arg(long, default_value_t = 30)]
    ping_interval_secs: u64,

    /// Handshake timeout in seconds
    #[arg(long)]
    connect_timeout_secs: Option<u64>,

    /// Maximum number of reconnection attempts
    #[arg(long, default_value_t = 5)]
    max_reconnect_attempts: u32,

    /// Seconds to wait between reconnection attempts
    #[arg(long, default_value_t = 5)]
    reconnect_interval_secs: u64,
}

impl Args {
    fn into_options(self) -> ClientOptions {
        let config = ChatConfig {
            ws_base_url: self.url,
            ping_interval: (self.ping_interval_secs > 0)
                .then(|| Duration::from_secs(self.ping_interval_secs)),
            connect_timeout: self.connect_timeout_secs.map(Duration::from_secs),
            event_capacity: DEFAULT_EVENT_CAPACITY,
        };

        ClientOptions {
            conversation_id: ConversationId::new(self.conversation_id),
            token: self.token,
            own_user_id: self.user_id,
            config,
            max_reconnect_attempts: self.max_reconnect_attempts,
            reconnect_interval: Duration::from_secs(self.reconnect_interval_secs),
        }
    }
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), "info");

    let args = Args::parse();

    // Run the client
    if let Err(e) = run_client(args.into_options()).await {
        tracing::error!("Client error: {}", e);
        std::process::exit(1);
    }
}
