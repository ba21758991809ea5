//! Client for communicating with the HL7 collector
//!
//! Two transports over one endpoint: REST for bulk reads, single-message
//! fetch, stats and clear; a WebSocket stream for live arrival events.

mod rest;
mod stream;

pub use rest::CollectorClient;
pub use stream::{ConnectionStatus, EventStream, StreamEvent};
