//! Client configuration.

use std::time::Duration;

use crate::domain::ConversationId;

pub const DEFAULT_WS_BASE_URL: &str = "ws://127.0.0.1:8000/ws/";
pub const DEFAULT_PING_INTERVAL: Duration = Duration::from_secs(30);
pub const DEFAULT_EVENT_CAPACITY: usize = 64;

/// Settings for a [`ChatSession`](crate::session::ChatSession)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatConfig {
    /// Base URL of the realtime endpoint, e.g. `wss://host/ws/`
    pub ws_base_url: String,
    /// Keep-alive ping period; `None` disables pings
    pub ping_interval: Option<Duration>,
    /// Handshake deadline; `None` waits indefinitely
    pub connect_timeout: Option<Duration>,
    /// Per-stream buffer of the message/typing/error broadcast channels
    pub event_capacity: usize,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            ws_base_url: DEFAULT_WS_BASE_URL.to_string(),
            ping_interval: Some(DEFAULT_PING_INTERVAL),
            connect_timeout: None,
            event_capacity: DEFAULT_EVENT_CAPACITY,
        }
    }
}

impl ChatConfig {
    pub fn new(ws_base_url: impl Into<String>) -> Self {
        Self {
            ws_base_url: ws_base_url.into(),
            ..Self::default()
        }
    }

    /// Endpoint for one conversation, with the token as a query credential
    pub fn conversation_url(&self, conversation_id: ConversationId, token: &str) -> String {
        format!(
            "{}/messaging/conversation/{}/?token={}",
            self.ws_base_url.trim_end_matches('/'),
            conversation_id,
            token
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conversation_url_with_trailing_slash() {
        // テスト項目: ベース URL の末尾スラッシュがあっても正しい URL が組み立てられる
        // given (前提条件):
        let config = ChatConfig::new("wss://chat.example/ws/");

        // when (操作):
        let url = config.conversation_url(ConversationId::new(42), "tok");

        // then (期待する結果):
        assert_eq!(url, "wss://chat.example/ws/messaging/conversation/42/?token=tok");
    }

    #[test]
    fn test_conversation_url_without_trailing_slash() {
        // テスト項目: 末尾スラッシュがないベース URL でも同じ URL になる
        // given (前提条件):
        let config = ChatConfig::new("ws://127.0.0.1:9000/ws");

        // when (操作):
        let url = config.conversation_url(ConversationId::new(7), "abc.def");

        // then (期待する結果):
        assert_eq!(url, "ws://127.0.0.1:9000/ws/messaging/conversation/7/?token=abc.def");
    }

    #[test]
    fn test_default_config() {
        // テスト項目: デフォルト設定は 30 秒 ping・タイムアウトなし
        // given (前提条件) / when (操作):
        let config = ChatConfig::default();

        // then (期待する結果):
        assert_eq!(config.ping_interval, Some(Duration::from_secs(30)));
        assert_eq!(config.connect_timeout, None);
        assert_eq!(config.event_capacity, DEFAULT_EVENT_CAPACITY);
    }
}
