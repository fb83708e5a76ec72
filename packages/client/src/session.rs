//! Transport session: one realtime connection bound to one conversation.
//!
//! The session owns the connection slot behind a mutex. Each `connect()`
//! spawns a connection task that performs the handshake and then owns the
//! socket; the session talks to it through a command channel. Every
//! connect/disconnect bumps a generation counter, and a task may only publish
//! state while its generation is current, so a torn-down connection never
//! overwrites the state of its successor.

use std::{
    sync::{Arc, Mutex, MutexGuard, PoisonError},
    time::Duration,
};

use futures_util::{Sink, SinkExt, StreamExt};
use tokio::{
    sync::mpsc,
    time::{Instant, Interval, MissedTickBehavior},
};
use tokio_tungstenite::tungstenite::{
    Message,
    protocol::{CloseFrame, frame::coding::CloseCode},
};
use voicevibe_shared::time::{Clock, SystemClock};

use crate::{
    codec,
    config::ChatConfig,
    domain::{ConnectionState, ConversationId},
    dto::websocket::OutboundIntent,
    error::ChatError,
    events::ChatEvents,
    transport::{Connector, TungsteniteConnector, WsStream, redact_url},
};

/// Reason sent with the normal-closure frame on `disconnect()`
pub const CLOSE_REASON: &str = "User disconnected";

enum Command {
    Frame(String),
    Close,
}

struct ActiveConnection {
    conversation_id: ConversationId,
    commands: mpsc::UnboundedSender<Command>,
}

/// Present only while the connection is Connecting or Connected
#[derive(Default)]
struct Slot {
    generation: u64,
    active: Option<ActiveConnection>,
}

impl Slot {
    /// Ask the active connection task, if any, to close its socket
    fn teardown(&mut self) {
        if let Some(active) = self.active.take() {
            if active.commands.send(Command::Close).is_err() {
                tracing::debug!(
                    "Connection task for conversation {} already stopped",
                    active.conversation_id
                );
            }
            self.generation += 1;
        }
    }
}

struct Shared {
    slot: Mutex<Slot>,
    events: ChatEvents,
}

impl Shared {
    fn lock(&self) -> MutexGuard<'_, Slot> {
        self.slot.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Realtime chat session
///
/// All operations are non-blocking handoffs; `connect()` must be called from
/// within a Tokio runtime.
///
/// # Example
///
/// ```ignore
/// let session = ChatSession::new(ChatConfig::new("wss://host/ws/"));
/// let mut messages = session.events().subscribe_messages();
///
/// session.connect(ConversationId::new(42), &token);
/// session.send_message("hi")?;
/// ```
pub struct ChatSession {
    config: ChatConfig,
    connector: Arc<dyn Connector>,
    clock: Arc<dyn Clock>,
    shared: Arc<Shared>,
}

impl ChatSession {
    pub fn new(config: ChatConfig) -> Self {
        Self::with_parts(config, Arc::new(TungsteniteConnector), Arc::new(SystemClock))
    }

    /// Create a session with an explicit connector and clock
    pub fn with_parts(
        config: ChatConfig,
        connector: Arc<dyn Connector>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let events = ChatEvents::new(config.event_capacity);
        Self {
            config,
            connector,
            clock,
            shared: Arc::new(Shared {
                slot: Mutex::new(Slot::default()),
                events,
            }),
        }
    }

    /// Event streams and connection state of this session
    pub fn events(&self) -> &ChatEvents {
        &self.shared.events
    }

    pub fn state(&self) -> ConnectionState {
        self.shared.events.state()
    }

    /// Conversation the session is bound to, while Connecting or Connected
    pub fn conversation_id(&self) -> Option<ConversationId> {
        self.shared
            .lock()
            .active
            .as_ref()
            .map(|active| active.conversation_id)
    }

    /// Bind the session to a conversation.
    ///
    /// A no-op while already Connecting or Connected to the same conversation.
    /// Otherwise any existing connection is closed first.
    pub fn connect(&self, conversation_id: ConversationId, token: &str) {
        let (generation, commands) = {
            let mut slot = self.shared.lock();
            if let Some(active) = &slot.active
                && active.conversation_id == conversation_id
            {
                tracing::debug!("Already connected to conversation {}", conversation_id);
                return;
            }

            slot.teardown();
            slot.generation += 1;

            let (tx, rx) = mpsc::unbounded_channel();
            slot.active = Some(ActiveConnection {
                conversation_id,
                commands: tx,
            });
            self.shared.events.set_state(ConnectionState::Connecting);
            (slot.generation, rx)
        };

        let url = self.config.conversation_url(conversation_id, token);
        tracing::info!(
            "Connecting to conversation {} at {}",
            conversation_id,
            redact_url(&url)
        );

        let task = ConnectionTask {
            shared: self.shared.clone(),
            generation,
            conversation_id,
            connector: self.connector.clone(),
            clock: self.clock.clone(),
            ping_interval: self.config.ping_interval,
            connect_timeout: self.config.connect_timeout,
        };
        tokio::spawn(task.run(url, commands));
    }

    /// Close the active connection, if any, and move to Disconnected.
    ///
    /// Safe to call repeatedly; without a bound connection no socket
    /// operation happens and observers are not re-notified.
    pub fn disconnect(&self) {
        let mut slot = self.shared.lock();
        if let Some(conversation_id) = slot.active.as_ref().map(|a| a.conversation_id) {
            tracing::info!("Disconnecting from conversation {}", conversation_id);
            slot.teardown();
        }
        self.shared.events.set_state(ConnectionState::Disconnected);
    }

    /// Send a chat message
    pub fn send_message(&self, text: impl Into<String>) -> Result<(), ChatError> {
        self.send_intent(OutboundIntent::Message { text: text.into() })
    }

    pub fn send_typing_indicator(&self, is_typing: bool) -> Result<(), ChatError> {
        self.send_intent(OutboundIntent::Typing { is_typing })
    }

    /// Mark the bound conversation as read
    pub fn mark_as_read(&self) -> Result<(), ChatError> {
        self.send_intent(OutboundIntent::MarkRead)
    }

    fn send_intent(&self, intent: OutboundIntent) -> Result<(), ChatError> {
        let frame = codec::encode(&intent)?;
        let slot = self.shared.lock();

        let active = match &slot.active {
            Some(active) if self.shared.events.state().is_connected() => active,
            _ => {
                tracing::warn!("Failed to send frame, not connected: {}", frame);
                return Err(ChatError::NotConnected);
            }
        };

        active.commands.send(Command::Frame(frame)).map_err(|_| {
            tracing::warn!("Failed to send frame: connection task stopped");
            ChatError::SendFailed("connection task stopped".to_string())
        })
    }
}

impl Drop for ChatSession {
    fn drop(&mut self) {
        self.shared.lock().teardown();
    }
}

/// Owns one socket from handshake to close
struct ConnectionTask {
    shared: Arc<Shared>,
    generation: u64,
    conversation_id: ConversationId,
    connector: Arc<dyn Connector>,
    clock: Arc<dyn Clock>,
    ping_interval: Option<Duration>,
    connect_timeout: Option<Duration>,
}

impl ConnectionTask {
    async fn run(self, url: String, commands: mpsc::UnboundedReceiver<Command>) {
        let stream = match self.handshake(&url).await {
            Ok(stream) => stream,
            Err(e) => {
                self.fail(e.to_string());
                return;
            }
        };

        if !self.publish(ConnectionState::Connected) {
            tracing::debug!(
                "Connection to conversation {} superseded during handshake",
                self.conversation_id
            );
            let mut stream = stream;
            if let Err(e) = stream.close(None).await {
                tracing::debug!("Failed to close superseded socket: {}", e);
            }
            return;
        }

        tracing::info!("Connected to conversation {}", self.conversation_id);
        self.pump(stream, commands).await;
    }

    async fn handshake(&self, url: &str) -> Result<WsStream, ChatError> {
        match self.connect_timeout {
            Some(limit) => tokio::time::timeout(limit, self.connector.connect(url))
                .await
                .map_err(|_| ChatError::Timeout(limit))?,
            None => self.connector.connect(url).await,
        }
    }

    async fn pump(&self, stream: WsStream, mut commands: mpsc::UnboundedReceiver<Command>) {
        let (mut sink, mut source) = stream.split();
        let ping_period = self.ping_interval.filter(|period| !period.is_zero());
        let mut heartbeat = ping_period.map(|period| {
            let mut interval = tokio::time::interval_at(Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            interval
        });
        // A ping is outstanding until the peer answers with a pong
        let mut awaiting_pong = false;

        loop {
            tokio::select! {
                biased;

                command = commands.recv() => match command {
                    Some(Command::Frame(frame)) => {
                        tracing::debug!("Sending frame: {}", frame);
                        if let Err(e) = sink.send(Message::Text(frame.into())).await {
                            self.fail(format!("Failed to send frame: {}", e));
                            return;
                        }
                    }
                    Some(Command::Close) | None => {
                        send_close(&mut sink).await;
                        tracing::info!("Connection to conversation {} closed", self.conversation_id);
                        return;
                    }
                },
                frame = source.next() => match frame {
                    Some(Ok(Message::Text(text))) => {
                        tracing::debug!("Received frame: {}", text.as_str());
                        if !self.is_current() {
                            send_close(&mut sink).await;
                            return;
                        }
                        if let Some(event) = codec::decode(text.as_str(), self.clock.as_ref()) {
                            self.shared.events.emit(event);
                        }
                    }
                    Some(Ok(Message::Pong(_))) => awaiting_pong = false,
                    Some(Ok(Message::Close(frame))) => {
                        tracing::info!("Server closed the connection: {:?}", frame);
                        if let Err(e) = sink.close().await {
                            tracing::debug!("Close handshake not completed: {}", e);
                        }
                        self.finish(ConnectionState::Disconnected);
                        return;
                    }
                    Some(Ok(_)) => {}
                    Some(Err(e)) => {
                        self.fail(e.to_string());
                        return;
                    }
                    None => {
                        tracing::info!("Connection stream ended");
                        self.finish(ConnectionState::Disconnected);
                        return;
                    }
                },
                _ = next_tick(&mut heartbeat) => {
                    if awaiting_pong {
                        self.fail(format!(
                            "Sent ping but didn't receive pong within {:?}",
                            ping_period.unwrap_or_default()
                        ));
                        return;
                    }
                    if let Err(e) = sink.send(Message::Ping(Vec::new().into())).await {
                        self.fail(format!("Failed to send ping: {}", e));
                        return;
                    }
                    awaiting_pong = true;
                }
            }
        }
    }

    fn is_current(&self) -> bool {
        self.shared.lock().generation == self.generation
    }

    /// Publish a non-terminal state if this connection is still current
    fn publish(&self, state: ConnectionState) -> bool {
        let slot = self.shared.lock();
        if slot.generation != self.generation {
            return false;
        }
        self.shared.events.set_state(state);
        true
    }

    /// Publish a terminal state and release the slot if still current
    fn finish(&self, state: ConnectionState) -> bool {
        let mut slot = self.shared.lock();
        if slot.generation != self.generation {
            return false;
        }
        slot.active = None;
        self.shared.events.set_state(state);
        true
    }

    fn fail(&self, reason: String) {
        tracing::warn!(
            "Connection to conversation {} failed: {}",
            self.conversation_id,
            reason
        );
        if self.finish(ConnectionState::Error(reason.clone())) {
            self.shared.events.emit_error(reason);
        }
    }
}

/// Send a normal-closure frame; delivery is best effort
async fn send_close<S>(sink: &mut S)
where
    S: Sink<Message> + Unpin,
    S::Error: std::fmt::Display,
{
    let close = CloseFrame {
        code: CloseCode::Normal,
        reason: CLOSE_REASON.into(),
    };
    if let Err(e) = sink.send(Message::Close(Some(close))).await {
        tracing::debug!("Close frame not delivered: {}", e);
    }
}

async fn next_tick(heartbeat: &mut Option<Interval>) {
    match heartbeat {
        Some(interval) => {
            interval.tick().await;
        }
        None => std::future::pending().await,
    }
}
