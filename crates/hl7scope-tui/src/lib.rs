//! hl7scope - terminal live console for an HL7 MLLP collector
//!
//! A real-time terminal dashboard over the collector's WebSocket stream and
//! REST API: live message list with coalesced updates and pause, per-message
//! segment inspection, and a best-effort stats header.
//!
//! # Architecture
//!
//! Every event source (keyboard, stream, timers, fetch results) sends typed
//! [`AppEvent`]s into a single mpsc channel consumed by the [`App`] event
//! loop. All state mutation happens on that loop, so mutations are never
//! interleaved and no locking is needed.

pub mod app;
pub mod event;
pub mod input;
pub mod ui;

pub use app::{App, AppMode, DetailMode, Pane};
pub use event::AppEvent;
pub use ui::theme::Theme;
