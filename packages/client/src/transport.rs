//! WebSocket transport: the handshake seam used by the session.

use async_trait::async_trait;
use tokio::net::TcpStream;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async};

use crate::error::ChatError;

/// An established client socket
pub type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// Opens realtime sockets
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Connector: Send + Sync {
    /// Perform the WebSocket handshake against `url`
    async fn connect(&self, url: &str) -> Result<WsStream, ChatError>;
}

/// [`Connector`] backed by `tokio-tungstenite`
#[derive(Debug, Clone, Copy, Default)]
pub struct TungsteniteConnector;

#[async_trait]
impl Connector for TungsteniteConnector {
    async fn connect(&self, url: &str) -> Result<WsStream, ChatError> {
        let (stream, response) = connect_async(url)
            .await
            .map_err(|e| ChatError::Connection(e.to_string()))?;

        tracing::debug!("Handshake completed with status {}", response.status());
        Ok(stream)
    }
}

/// Strip the query string so credentials never reach the logs
pub(crate) fn redact_url(url: &str) -> &str {
    url.split_once('?').map_or(url, |(base, _)| base)
}
