//! Push transport — the seam between the channel state machine and the wire.
//!
//! A transport opens one connection and hands back a stream of text
//! payloads. The stream ending means the connection closed; an `Err` item
//! means it failed. The channel never looks below this trait, so tests can
//! script connections without a socket.

use std::pin::Pin;

use futures_util::{SinkExt, Stream, StreamExt, stream};
use tokio::net::TcpStream;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async};
use tokio_tungstenite::tungstenite::{self, Message};

use crate::config::{ClientConfig, ConfigError};

/// Errors produced by a push connection.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ChannelError {
    /// The connection handshake did not complete.
    #[error("push connect failed: {0}")]
    Connect(String),
    /// The open connection failed while reading.
    #[error("push transport error: {0}")]
    Transport(String),
}

/// Payloads from one open connection.
pub type PushStream = Pin<Box<dyn Stream<Item = Result<String, ChannelError>> + Send>>;

#[async_trait::async_trait]
pub trait PushTransport: Send + Sync + 'static {
    /// Open a new connection.
    async fn connect(&self) -> Result<PushStream, ChannelError>;
}

/// WebSocket transport backed by `tokio-tungstenite`.
#[derive(Debug, Clone)]
pub struct WsTransport {
    url: String,
}

impl WsTransport {
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }

    /// # Errors
    ///
    /// Fails when the base URL has no HTTP scheme to swap for a WebSocket one.
    pub fn from_config(config: &ClientConfig) -> Result<Self, ConfigError> {
        Ok(Self::new(config.updates_url()?))
    }

    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait::async_trait]
impl PushTransport for WsTransport {
    async fn connect(&self) -> Result<PushStream, ChannelError> {
        let (socket, _) = connect_async(self.url.as_str())
            .await
            .map_err(|error| ChannelError::Connect(error.to_string()))?;

        let payloads = stream::unfold(OpenSocket { socket: Some(socket) }, next_payload);
        Ok(Box::pin(payloads))
    }
}

type WsSocket = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// Socket owned by a `PushStream`. Whichever way the stream ends, the peer
/// gets a close frame rather than a reset.
struct OpenSocket {
    socket: Option<WsSocket>,
}

impl Drop for OpenSocket {
    fn drop(&mut self) {
        // Stream dropped mid-connection (teardown or a read error).
        let Some(mut socket) = self.socket.take() else {
            return;
        };
        if let Ok(runtime) = tokio::runtime::Handle::try_current() {
            runtime.spawn(async move {
                let _ = socket.close(None).await;
            });
        }
    }
}

async fn next_payload(mut open: OpenSocket) -> Option<(Result<String, ChannelError>, OpenSocket)> {
    loop {
        let message = open.socket.as_mut()?.next().await;
        match message {
            None => {
                open.socket = None;
                return None;
            }
            Some(message) if ends_connection(&message) => {
                if let Some(mut socket) = open.socket.take() {
                    // The reply to the peer's close frame is queued, not yet written.
                    let _ = socket.flush().await;
                }
                return None;
            }
            Some(message) => {
                if let Some(item) = payload_of(message) {
                    return Some((item, open));
                }
            }
        }
    }
}

fn ends_connection(message: &Result<Message, tungstenite::Error>) -> bool {
    matches!(
        message,
        Ok(Message::Close(_)) | Err(tungstenite::Error::ConnectionClosed | tungstenite::Error::AlreadyClosed)
    )
}

fn payload_of(message: Result<Message, tungstenite::Error>) -> Option<Result<String, ChannelError>> {
    match message {
        Ok(Message::Text(text)) => Some(Ok(text.as_str().to_owned())),
        // Non-UTF-8 bytes fall through to the payload parser and get dropped there.
        Ok(Message::Binary(bytes)) => Some(Ok(String::from_utf8_lossy(&bytes).into_owned())),
        Ok(_) => None,
        Err(error) => Some(Err(ChannelError::Transport(error.to_string()))),
    }
}

#[cfg(test)]
#[path = "transport_test.rs"]
mod tests;
