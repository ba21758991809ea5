//! Live event stream from the collector.
//!
//! The collector pushes JSON frames over a WebSocket. This module types
//! those frames and exposes them as a `Stream`; the reconnect policy lives
//! with the consumer, which owns the status reporting.

use crate::rest::CollectorClient;
use color_eyre::eyre::{eyre, Context, Result};
use futures::StreamExt;
use hl7scope_core::MessageSummary;
use serde::Deserialize;
use std::pin::Pin;
use tokio_tungstenite::{connect_async, tungstenite::Message};
use tracing::warn;

/// Status of the stream connection, for the UI indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionStatus {
    Connecting,
    Connected,
    Disconnected,
}

impl ConnectionStatus {
    pub fn label(&self) -> &'static str {
        match self {
            ConnectionStatus::Connecting => "Connecting",
            ConnectionStatus::Connected => "Connected",
            ConnectionStatus::Disconnected => "Disconnected",
        }
    }

    pub fn is_connected(&self) -> bool {
        matches!(self, ConnectionStatus::Connected)
    }
}

/// One frame from the collector's stream.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StreamEvent {
    /// Sent on connect; carries the collector's current message count and
    /// triggers a full reload.
    Init { total: usize },
    /// One newly arrived message summary.
    NewMessage { data: Box<MessageSummary> },
    /// The collector dropped events for this client; the only correct
    /// reaction is a full reload, not patching gaps.
    Lagged { missed: u64 },
    /// The collector's store was cleared (by any client).
    Cleared,
}

/// Typed stream of collector events.
pub type EventStream = Pin<Box<dyn futures::Stream<Item = Result<StreamEvent>> + Send>>;

impl CollectorClient {
    /// Open the event stream. One call = one connection; the stream ends
    /// when the connection closes or errors.
    pub async fn stream_events(&self) -> Result<EventStream> {
        let (ws, _) = connect_async(self.ws_url())
            .await
            .context("Failed to connect event stream")?;

        let mapped = ws.filter_map(|frame| async move {
            match frame {
                Ok(Message::Text(text)) => match serde_json::from_str::<StreamEvent>(&text) {
                    Ok(event) => Some(Ok(event)),
                    Err(e) => {
                        warn!("Skipping undecodable stream frame: {}", e);
                        None
                    }
                },
                // Close is followed by the stream ending; pings are handled
                // by the transport.
                Ok(_) => None,
                Err(e) => Some(Err(eyre!("Stream error: {}", e))),
            }
        });

        Ok(Box::pin(mapped))
    }
}
