//! Application events

use crossterm::event::KeyEvent;
use hl7scope_client::{ConnectionStatus, StreamEvent};
use hl7scope_core::{CollectorStats, MessageDetail, MessageSummary};
use std::path::PathBuf;

/// Events that can occur in the application
#[derive(Debug)]
pub enum AppEvent {
    /// Keyboard input
    Key(KeyEvent),

    /// Frame from the collector's live stream
    Stream(StreamEvent),

    /// Stream connection status changed
    StreamStatus(ConnectionStatus),

    /// The coalescing timer fired; flush the pending buffer
    FlushTick,

    /// The search debounce timer fired for the given input generation
    SearchDebounce(u64),

    /// Full reload completed
    MessagesLoaded(Vec<MessageSummary>),

    /// Detail fetch resolved for the message it was issued for
    DetailLoaded {
        id: String,
        detail: Box<MessageDetail>,
    },

    /// Detail fetch failed or the message no longer exists server-side
    DetailUnavailable { id: String, reason: String },

    /// Stats poll completed
    StatsUpdated(Box<CollectorStats>),

    /// Clear request finished (error message on failure)
    ClearFinished(Result<(), String>),

    /// Export finished (path written on success, error message on failure)
    ExportFinished(Result<PathBuf, String>),

    /// Non-fatal background error (read paths)
    Error(String),
}
