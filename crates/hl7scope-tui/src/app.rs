//! Application state and main event loop

use crate::event::AppEvent;
use crate::input::handle_key;
use crate::ui;
use crate::ui::theme::Theme;
use color_eyre::Result;
use crossterm::event::{Event, EventStream, KeyEventKind};
use futures::StreamExt;
use hl7scope_client::{CollectorClient, ConnectionStatus};
use hl7scope_client::StreamEvent;
use hl7scope_config::constants::DEFAULT_CONSOLE_LOG_CAPACITY;
use hl7scope_config::{CollapseScope, TuiConfig};
use hl7scope_core::{CollectorStats, MessageDetail, MessageSummary};
use ratatui::widgets::TableState;
use ratatui::DefaultTerminal;
use std::collections::{HashSet, VecDeque};
use std::time::{Duration, Instant};
use tokio::sync::mpsc;

/// Application mode
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppMode {
    /// Normal running mode
    Running,
    /// Showing a popup
    Popup(PopupType),
    /// Quitting the application
    Quitting,
}

/// Type of popup being shown
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PopupType {
    /// Help screen
    Help,
    /// Search input
    Search,
    /// Confirm clearing the collector store
    ConfirmClear,
    /// Clear request failed (blocking notice)
    ClearFailed(String),
}

/// Which pane has keyboard focus
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Pane {
    #[default]
    List,
    Detail,
}

/// Presentation mode of the detail pane
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DetailMode {
    #[default]
    Parsed,
    Raw,
    Json,
}

impl DetailMode {
    pub fn next(self) -> Self {
        match self {
            DetailMode::Parsed => DetailMode::Raw,
            DetailMode::Raw => DetailMode::Json,
            DetailMode::Json => DetailMode::Parsed,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            DetailMode::Parsed => DetailMode::Json,
            DetailMode::Raw => DetailMode::Parsed,
            DetailMode::Json => DetailMode::Raw,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            DetailMode::Parsed => "Parsed",
            DetailMode::Raw => "Raw",
            DetailMode::Json => "JSON",
        }
    }

    pub fn all() -> &'static [DetailMode] {
        &[DetailMode::Parsed, DetailMode::Raw, DetailMode::Json]
    }
}

/// Internal console log entry (shown in the status bar)
#[derive(Debug, Clone)]
pub struct ConsoleEntry {
    pub timestamp: Instant,
    pub level: LogLevel,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Info,
    Warn,
    Error,
}

/// Main application state
pub struct App {
    // Mode and navigation
    pub mode: AppMode,
    pub focus: Pane,
    pub detail_mode: DetailMode,

    // Message store: summaries newest-first, plus the resolved selection
    pub messages: VecDeque<MessageSummary>,
    pub selected_id: Option<String>,
    pub selected_detail: Option<MessageDetail>,

    // Ingestion buffer: arrivals not yet merged into the store
    pub pending: VecDeque<MessageSummary>,
    flush_scheduled: bool,
    pub paused: bool,

    // Total shown in the header: store + pending on arrival, snapshot size
    // on reload, collector value on stats poll
    pub displayed_total: u64,

    // List view state
    pub list_state: TableState,
    pub autoscroll: bool,

    // Search: the input being edited and the query actually applied
    pub search_input: String,
    pub applied_query: String,
    search_generation: u64,

    // Detail view state
    pub collapsed_segments: HashSet<String>,
    pub segment_cursor: usize,
    pub detail_scroll: u16,

    // Stream status and stats
    pub stream_status: ConnectionStatus,
    pub stats: Option<CollectorStats>,

    // Refresh control (hybrid mode)
    pub last_input_time: Instant,
    pub is_idle: bool,

    // Configuration
    pub config: TuiConfig,
    pub theme: Theme,

    // Collector client
    client: CollectorClient,

    // Event sender for async operations
    event_tx: Option<mpsc::UnboundedSender<AppEvent>>,

    // Internal console log
    pub console_log: VecDeque<ConsoleEntry>,
    pub last_error: Option<String>,
}

impl App {
    /// Create a new application instance
    pub fn new(config: TuiConfig, client: CollectorClient) -> Self {
        let theme = Theme::from_config(&config.theme);

        Self {
            mode: AppMode::Running,
            focus: Pane::List,
            detail_mode: DetailMode::Parsed,

            messages: VecDeque::new(),
            selected_id: None,
            selected_detail: None,

            pending: VecDeque::new(),
            flush_scheduled: false,
            paused: false,

            displayed_total: 0,

            list_state: TableState::default(),
            autoscroll: true,

            search_input: String::new(),
            applied_query: String::new(),
            search_generation: 0,

            collapsed_segments: HashSet::new(),
            segment_cursor: 0,
            detail_scroll: 0,

            stream_status: ConnectionStatus::Connecting,
            stats: None,

            last_input_time: Instant::now(),
            is_idle: false,

            config,
            theme,
            client,
            event_tx: None,

            console_log: VecDeque::with_capacity(DEFAULT_CONSOLE_LOG_CAPACITY),
            last_error: None,
        }
    }

    /// Add an info log entry
    pub fn log_info(&mut self, msg: impl Into<String>) {
        self.add_log(LogLevel::Info, msg.into());
    }

    /// Add a warning log entry
    pub fn log_warn(&mut self, msg: impl Into<String>) {
        self.add_log(LogLevel::Warn, msg.into());
    }

    /// Add an error log entry
    pub fn log_error(&mut self, msg: impl Into<String>) {
        self.add_log(LogLevel::Error, msg.into());
    }

    fn add_log(&mut self, level: LogLevel, message: String) {
        if self.console_log.len() >= DEFAULT_CONSOLE_LOG_CAPACITY {
            self.console_log.pop_back();
        }
        self.console_log.push_front(ConsoleEntry {
            timestamp: Instant::now(),
            level,
            message,
        });
    }

    /// Most recent console entry, for the status bar
    pub fn latest_log(&self) -> Option<&ConsoleEntry> {
        self.console_log.front()
    }

    /// Run the main application loop
    pub async fn run(mut self, mut terminal: DefaultTerminal) -> Result<()> {
        let (event_tx, mut event_rx) = mpsc::unbounded_channel::<AppEvent>();
        self.event_tx = Some(event_tx.clone());

        // Keyboard input
        let input_tx = event_tx.clone();
        tokio::spawn(async move {
            let mut events = EventStream::new();
            while let Some(Ok(event)) = events.next().await {
                if let Event::Key(key) = event {
                    if key.kind == KeyEventKind::Press && input_tx.send(AppEvent::Key(key)).is_err()
                    {
                        break;
                    }
                }
            }
        });

        self.spawn_stream_listener(event_tx.clone());
        self.spawn_stats_poller(event_tx.clone());

        let mut last_tick = Instant::now();

        while self.mode != AppMode::Quitting {
            terminal.draw(|frame| ui::render(frame, &mut self))?;

            let tick_rate = self.tick_rate();
            let timeout = tick_rate.saturating_sub(last_tick.elapsed());

            if let Ok(Some(event)) = tokio::time::timeout(timeout, event_rx.recv()).await {
                self.handle_event(event);
            }

            if last_tick.elapsed() >= tick_rate {
                self.on_tick();
                last_tick = Instant::now();
            }
        }

        Ok(())
    }

    /// Spawn the stream listener: one live connection at a time, reconnect
    /// forever with a fixed delay. Status transitions are reported as
    /// events; the task holds no UI state.
    fn spawn_stream_listener(&self, tx: mpsc::UnboundedSender<AppEvent>) {
        let client = self.client.clone();
        let reconnect_delay = Duration::from_millis(self.config.reconnect_delay_ms);

        tokio::spawn(async move {
            loop {
                if tx.send(AppEvent::StreamStatus(ConnectionStatus::Connecting)).is_err() {
                    return;
                }

                match client.stream_events().await {
                    Ok(mut stream) => {
                        if tx
                            .send(AppEvent::StreamStatus(ConnectionStatus::Connected))
                            .is_err()
                        {
                            return;
                        }
                        while let Some(result) = stream.next().await {
                            match result {
                                Ok(event) => {
                                    if tx.send(AppEvent::Stream(event)).is_err() {
                                        return;
                                    }
                                }
                                Err(e) => {
                                    let _ = tx.send(AppEvent::Error(format!("Stream: {}", e)));
                                    break;
                                }
                            }
                        }
                    }
                    Err(e) => {
                        let _ = tx.send(AppEvent::Error(format!("Stream connect: {}", e)));
                    }
                }

                if tx
                    .send(AppEvent::StreamStatus(ConnectionStatus::Disconnected))
                    .is_err()
                {
                    return;
                }

                tokio::time::sleep(reconnect_delay).await;
            }
        });
    }

    /// Spawn the best-effort stats poller. Failures are swallowed; the
    /// poller runs regardless of stream status or pause.
    fn spawn_stats_poller(&self, tx: mpsc::UnboundedSender<AppEvent>) {
        let client = self.client.clone();
        let interval = Duration::from_millis(self.config.stats_poll_interval_ms);

        tokio::spawn(async move {
            loop {
                tokio::time::sleep(interval).await;

                match client.stats().await {
                    Ok(stats) => {
                        if tx.send(AppEvent::StatsUpdated(Box::new(stats))).is_err() {
                            return;
                        }
                    }
                    Err(e) => {
                        tracing::debug!("Stats poll failed: {}", e);
                    }
                }

                if tx.is_closed() {
                    return;
                }
            }
        });
    }

    /// Get the current tick rate based on idle state
    pub fn tick_rate(&self) -> Duration {
        if self.is_idle {
            Duration::from_millis(self.config.refresh_rate_idle_ms)
        } else {
            Duration::from_millis(self.config.refresh_rate_active_ms)
        }
    }

    /// Called on user input to reset the idle timer
    pub fn on_input(&mut self) {
        self.last_input_time = Instant::now();
        self.is_idle = false;
    }

    fn check_idle(&mut self) {
        if self.last_input_time.elapsed() > Duration::from_millis(self.config.idle_timeout_ms) {
            self.is_idle = true;
        }
    }

    fn on_tick(&mut self) {
        self.check_idle();
    }

    /// Handle an application event
    pub fn handle_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::Key(key) => {
                self.on_input();
                handle_key(self, key);
            }
            AppEvent::Stream(stream_event) => self.handle_stream_event(stream_event),
            AppEvent::StreamStatus(status) => {
                if status != self.stream_status {
                    match status {
                        ConnectionStatus::Connected => {
                            self.log_info("Stream connected");
                            self.last_error = None;
                        }
                        ConnectionStatus::Disconnected => self.log_warn("Stream disconnected"),
                        ConnectionStatus::Connecting => {}
                    }
                    self.stream_status = status;
                }
            }
            AppEvent::FlushTick => {
                self.flush_scheduled = false;
                self.flush_pending();
            }
            AppEvent::SearchDebounce(generation) => {
                if generation == self.search_generation {
                    self.applied_query = self.search_input.clone();
                    self.sync_list_cursor();
                }
            }
            AppEvent::MessagesLoaded(summaries) => {
                self.messages = summaries.into();
                self.pending.clear();
                self.displayed_total = self.messages.len() as u64;
                self.sync_list_cursor();
            }
            AppEvent::DetailLoaded { id, detail } => {
                // Drop responses for anything but the current selection;
                // a slow fetch must never overwrite a newer one.
                if self.selected_id.as_deref() == Some(id.as_str()) {
                    self.segment_cursor = self
                        .segment_cursor
                        .min(detail.segments.len().saturating_sub(1));
                    self.selected_detail = Some(*detail);
                } else {
                    tracing::debug!(id = %id, "Discarding stale detail response");
                }
            }
            AppEvent::DetailUnavailable { id, reason } => {
                if self.selected_id.as_deref() == Some(id.as_str()) {
                    self.log_error(format!("Message {}: {}", id, reason));
                }
            }
            AppEvent::StatsUpdated(stats) => {
                self.displayed_total = stats.total_messages;
                self.stats = Some(*stats);
            }
            AppEvent::ClearFinished(result) => match result {
                Ok(()) => {
                    self.apply_cleared();
                    self.log_info("Collector store cleared");
                }
                Err(e) => {
                    self.log_error(format!("Clear failed: {}", e));
                    self.mode = AppMode::Popup(PopupType::ClearFailed(e));
                }
            },
            AppEvent::ExportFinished(result) => match result {
                Ok(path) => self.log_info(format!("Exported to {}", path.display())),
                Err(e) => self.log_error(format!("Export failed: {}", e)),
            },
            AppEvent::Error(message) => {
                // Don't spam the log with repeated errors
                if self.last_error.as_ref() != Some(&message) {
                    self.log_warn(&message);
                    self.last_error = Some(message);
                }
            }
        }
    }

    fn handle_stream_event(&mut self, event: StreamEvent) {
        match event {
            StreamEvent::Init { total } => {
                self.displayed_total = total as u64;
                self.reload();
            }
            StreamEvent::NewMessage { data } => self.on_arrival(*data),
            StreamEvent::Lagged { missed } => {
                self.log_warn(format!("Missed {} events, reloading", missed));
                self.reload();
            }
            StreamEvent::Cleared => {
                self.log_info("Collector cleared its store");
                self.apply_cleared();
            }
        }
    }

    // ------------------------------------------------------------------
    // Ingestion buffer
    // ------------------------------------------------------------------

    /// One message arrived on the stream. The pending buffer and displayed
    /// total update immediately, paused or not; merging into the store
    /// waits for the coalescing flush.
    fn on_arrival(&mut self, summary: MessageSummary) {
        self.pending.push_front(summary);
        self.displayed_total = (self.messages.len() + self.pending.len()) as u64;
        if !self.paused {
            self.schedule_flush();
        }
    }

    /// Schedule one flush, a fixed delay after the first unflushed arrival.
    /// At most one flush is outstanding; a burst does not push it out.
    fn schedule_flush(&mut self) {
        if self.flush_scheduled {
            return;
        }
        self.flush_scheduled = true;

        let Some(tx) = self.event_tx.clone() else {
            return;
        };
        let delay = Duration::from_millis(self.config.flush_interval_ms);
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let _ = tx.send(AppEvent::FlushTick);
        });
    }

    /// Merge the whole pending batch onto the store, preserving relative
    /// arrival order (newest stays first).
    pub fn flush_pending(&mut self) {
        for summary in self.pending.drain(..).rev() {
            self.messages.push_front(summary);
        }
        self.displayed_total = self.messages.len() as u64;
        self.sync_list_cursor();
    }

    /// Pause or resume live list updates. Arrivals keep accumulating while
    /// paused; resuming flushes immediately.
    pub fn toggle_pause(&mut self) {
        self.paused = !self.paused;
        if !self.paused {
            self.flush_pending();
        }
    }

    // ------------------------------------------------------------------
    // Store operations
    // ------------------------------------------------------------------

    /// Kick off a full reload of the summary list.
    pub fn reload(&self) {
        let Some(tx) = self.event_tx.clone() else {
            return;
        };
        let client = self.client.clone();
        let limit = self.config.reload_limit;

        tokio::spawn(async move {
            match client.list_messages(limit).await {
                Ok(summaries) => {
                    let _ = tx.send(AppEvent::MessagesLoaded(summaries));
                }
                Err(e) => {
                    let _ = tx.send(AppEvent::Error(format!("Reload: {}", e)));
                }
            }
        });
    }

    /// Select a message: the highlight moves synchronously, the detail is
    /// invalidated at once, and the fetch resolves in the background tagged
    /// with the id it was issued for.
    pub fn select(&mut self, id: String) {
        self.selected_id = Some(id.clone());
        self.selected_detail = None;
        self.segment_cursor = 0;
        self.detail_scroll = 0;
        self.sync_list_cursor();

        let Some(tx) = self.event_tx.clone() else {
            return;
        };
        let client = self.client.clone();

        tokio::spawn(async move {
            match client.get_message(&id).await {
                Ok(Some(detail)) => {
                    let _ = tx.send(AppEvent::DetailLoaded {
                        id,
                        detail: Box::new(detail),
                    });
                }
                Ok(None) => {
                    let _ = tx.send(AppEvent::DetailUnavailable {
                        id,
                        reason: "no longer exists on the collector".to_string(),
                    });
                }
                Err(e) => {
                    let _ = tx.send(AppEvent::DetailUnavailable {
                        id,
                        reason: e.to_string(),
                    });
                }
            }
        });
    }

    /// Ask the collector to clear its store. Local state is cleared when
    /// the request succeeds (the mirrored `cleared` stream event makes this
    /// idempotent).
    pub fn clear_all(&self) {
        let Some(tx) = self.event_tx.clone() else {
            return;
        };
        let client = self.client.clone();

        tokio::spawn(async move {
            let result = client.clear().await.map_err(|e| e.to_string());
            let _ = tx.send(AppEvent::ClearFinished(result));
        });
    }

    /// Empty store, pending buffer and selection in one step. Idempotent.
    pub fn apply_cleared(&mut self) {
        self.messages.clear();
        self.pending.clear();
        self.selected_id = None;
        self.selected_detail = None;
        self.displayed_total = 0;
        self.list_state.select(None);
        self.segment_cursor = 0;
        self.detail_scroll = 0;
    }

    /// Export the collector's full set to a timestamped JSON file next to
    /// the process working directory.
    pub fn export(&self) {
        let Some(tx) = self.event_tx.clone() else {
            return;
        };
        let client = self.client.clone();
        let limit = self.config.export_limit;

        tokio::spawn(async move {
            let result = async {
                let summaries = client
                    .list_messages(limit)
                    .await
                    .map_err(|e| e.to_string())?;
                let body =
                    serde_json::to_vec_pretty(&summaries).map_err(|e| e.to_string())?;
                let path = std::path::PathBuf::from(format!(
                    "hl7scope-export-{}.json",
                    chrono::Utc::now().format("%Y-%m-%dT%H-%M-%S")
                ));
                tokio::fs::write(&path, body)
                    .await
                    .map_err(|e| e.to_string())?;
                Ok(path)
            }
            .await;
            let _ = tx.send(AppEvent::ExportFinished(result));
        });
    }

    // ------------------------------------------------------------------
    // Search
    // ------------------------------------------------------------------

    /// Record a search input edit and start its debounce timer. Only the
    /// latest generation applies its query.
    pub fn search_edited(&mut self) -> u64 {
        self.search_generation += 1;
        let generation = self.search_generation;

        if let Some(tx) = self.event_tx.clone() {
            let delay = Duration::from_millis(self.config.search_debounce_ms);
            tokio::spawn(async move {
                tokio::time::sleep(delay).await;
                let _ = tx.send(AppEvent::SearchDebounce(generation));
            });
        }
        generation
    }

    /// Indices into `messages` of the rows visible under the applied query.
    /// Filtering never reorders; row order is always store order.
    pub fn visible_indices(&self) -> Vec<usize> {
        self.messages
            .iter()
            .enumerate()
            .filter(|(_, m)| m.matches_query(&self.applied_query))
            .map(|(i, _)| i)
            .collect()
    }

    /// Point the list cursor at the selected message's visible position
    /// (or nothing, if it is filtered out or gone).
    fn sync_list_cursor(&mut self) {
        let Some(selected) = self.selected_id.as_deref() else {
            self.list_state.select(None);
            return;
        };
        let position = self
            .visible_indices()
            .iter()
            .position(|&i| self.messages[i].id == selected);
        self.list_state.select(position);
    }

    /// Move the list cursor and select the message under it.
    pub fn move_cursor(&mut self, delta: isize) {
        let visible = self.visible_indices();
        if visible.is_empty() {
            return;
        }
        // No selection means no row is occupied yet; the first keypress in
        // either direction lands on the top row.
        let current = self.list_state.selected().map_or(-1, |i| i as isize);
        let next = (current + delta).clamp(0, visible.len() as isize - 1) as usize;
        let id = self.messages[visible[next]].id.clone();
        self.select(id);
    }

    /// Jump the cursor to the first or last visible row.
    pub fn jump_cursor(&mut self, to_end: bool) {
        let visible = self.visible_indices();
        if visible.is_empty() {
            return;
        }
        let index = if to_end { visible.len() - 1 } else { 0 };
        let id = self.messages[visible[index]].id.clone();
        self.select(id);
    }

    // ------------------------------------------------------------------
    // Detail view
    // ------------------------------------------------------------------

    /// Collapse key for a segment position, scoped per configuration.
    pub fn collapse_key(&self, detail: &MessageDetail, segment_index: usize) -> String {
        match self.config.collapse_scope {
            CollapseScope::Message => format!("{}#{}", detail.id, segment_index),
            CollapseScope::ControlId => {
                format!("{}-{}", detail.message_control_id, segment_index)
            }
        }
    }

    /// Toggle collapse of the segment under the detail cursor.
    pub fn toggle_selected_segment(&mut self) {
        let Some(detail) = &self.selected_detail else {
            return;
        };
        if detail.parse_error.is_some() || detail.segments.is_empty() {
            return;
        }
        let key = self.collapse_key(detail, self.segment_cursor);
        if !self.collapsed_segments.remove(&key) {
            self.collapsed_segments.insert(key);
        }
    }

    /// Move the segment cursor within the selected detail.
    pub fn move_segment_cursor(&mut self, delta: isize) {
        let Some(detail) = &self.selected_detail else {
            return;
        };
        if detail.segments.is_empty() {
            return;
        }
        let current = self.segment_cursor as isize;
        self.segment_cursor =
            (current + delta).clamp(0, detail.segments.len() as isize - 1) as usize;
    }

    /// Scroll the raw/json detail views.
    pub fn scroll_detail(&mut self, delta: i16) {
        self.detail_scroll = self.detail_scroll.saturating_add_signed(delta);
    }

    /// Client clone for async operations
    pub fn client(&self) -> CollectorClient {
        self.client.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use hl7scope_config::ClientConfig;
    use hl7scope_core::{Field, Segment};

    fn test_app() -> App {
        let client = CollectorClient::new(&ClientConfig::default()).unwrap();
        App::new(TuiConfig::default(), client)
    }

    fn summary(id: &str) -> MessageSummary {
        MessageSummary {
            id: id.to_string(),
            received_at: Utc::now(),
            source_addr: "127.0.0.1:4000".to_string(),
            message_type: "ADT^A01".to_string(),
            trigger_event: "A01".to_string(),
            message_control_id: format!("CTRL-{}", id),
            sending_facility: "Ward".to_string(),
            patient_name: Some("DOE^JANE".to_string()),
            patient_id: None,
            segment_count: 3,
            parse_error: None,
        }
    }

    fn detail(id: &str) -> MessageDetail {
        MessageDetail {
            id: id.to_string(),
            raw: "MSH|^~\\&|APP\rPID|1|P1".to_string(),
            received_at: Utc::now(),
            source_addr: "127.0.0.1:4000".to_string(),
            message_type: "ADT^A01".to_string(),
            trigger_event: "A01".to_string(),
            message_control_id: format!("CTRL-{}", id),
            sending_application: "APP".to_string(),
            sending_facility: "Ward".to_string(),
            receiving_application: "SCOPE".to_string(),
            receiving_facility: "Lab".to_string(),
            version: "2.5".to_string(),
            segments: vec![
                Segment {
                    name: "MSH".to_string(),
                    fields: vec![Field {
                        index: 1,
                        value: "^~\\&".to_string(),
                        components: vec!["^~\\&".to_string()],
                    }],
                    raw: "MSH|^~\\&|APP".to_string(),
                },
                Segment {
                    name: "PID".to_string(),
                    fields: vec![Field {
                        index: 1,
                        value: "P1".to_string(),
                        components: vec!["P1".to_string()],
                    }],
                    raw: "PID|1|P1".to_string(),
                },
            ],
            patient_name: Some("DOE^JANE".to_string()),
            patient_id: Some("P1".to_string()),
            parse_error: None,
        }
    }

    fn arrive(app: &mut App, id: &str) {
        app.handle_event(AppEvent::Stream(StreamEvent::NewMessage {
            data: Box::new(summary(id)),
        }));
    }

    fn ids(app: &App) -> Vec<&str> {
        app.messages.iter().map(|m| m.id.as_str()).collect()
    }

    #[test]
    fn arrivals_flush_newest_first() {
        let mut app = test_app();
        arrive(&mut app, "A");
        arrive(&mut app, "B");
        arrive(&mut app, "C");

        assert!(app.messages.is_empty());
        assert_eq!(app.pending.len(), 3);
        assert_eq!(app.displayed_total, 3);

        app.handle_event(AppEvent::FlushTick);
        assert_eq!(ids(&app), vec!["C", "B", "A"]);
        assert!(app.pending.is_empty());
    }

    #[test]
    fn flush_preserves_order_across_batches() {
        let mut app = test_app();
        arrive(&mut app, "A");
        app.handle_event(AppEvent::FlushTick);
        arrive(&mut app, "B");
        arrive(&mut app, "C");
        app.handle_event(AppEvent::FlushTick);
        assert_eq!(ids(&app), vec!["C", "B", "A"]);
    }

    #[test]
    fn pause_accumulates_without_loss() {
        let mut app = test_app();
        arrive(&mut app, "A");
        arrive(&mut app, "B");
        arrive(&mut app, "C");
        app.handle_event(AppEvent::FlushTick);

        app.toggle_pause();
        assert!(app.paused);

        arrive(&mut app, "D");
        arrive(&mut app, "E");
        assert_eq!(app.messages.len(), 3);
        assert_eq!(app.pending.len(), 2);
        // Displayed total still reflects everything that arrived
        assert_eq!(app.displayed_total, 5);

        // Resume flushes immediately
        app.toggle_pause();
        assert_eq!(ids(&app), vec!["E", "D", "C", "B", "A"]);
        assert!(app.pending.is_empty());
    }

    #[test]
    fn paused_arrivals_do_not_schedule_flushes() {
        let mut app = test_app();
        app.toggle_pause();
        arrive(&mut app, "A");
        assert!(!app.flush_scheduled);
    }

    #[test]
    fn at_most_one_flush_is_scheduled() {
        let mut app = test_app();
        arrive(&mut app, "A");
        assert!(app.flush_scheduled);
        arrive(&mut app, "B");
        arrive(&mut app, "C");
        assert!(app.flush_scheduled);
        app.handle_event(AppEvent::FlushTick);
        assert!(!app.flush_scheduled);
    }

    #[test]
    fn flush_with_empty_pending_is_harmless() {
        let mut app = test_app();
        arrive(&mut app, "A");
        app.handle_event(AppEvent::FlushTick);
        app.handle_event(AppEvent::FlushTick);
        assert_eq!(ids(&app), vec!["A"]);
    }

    #[test]
    fn clear_is_idempotent() {
        let mut app = test_app();
        arrive(&mut app, "A");
        app.handle_event(AppEvent::FlushTick);
        arrive(&mut app, "B");
        app.selected_id = Some("A".to_string());
        app.selected_detail = Some(detail("A"));

        app.apply_cleared();
        assert!(app.messages.is_empty());
        assert!(app.pending.is_empty());
        assert!(app.selected_id.is_none());
        assert!(app.selected_detail.is_none());
        assert_eq!(app.displayed_total, 0);

        app.apply_cleared();
        assert!(app.messages.is_empty());
        assert!(app.pending.is_empty());
        assert!(app.selected_id.is_none());
    }

    #[test]
    fn cleared_stream_event_resets_everything() {
        let mut app = test_app();
        arrive(&mut app, "A");
        app.handle_event(AppEvent::FlushTick);
        arrive(&mut app, "B");
        app.selected_id = Some("A".to_string());
        app.selected_detail = Some(detail("A"));

        app.handle_event(AppEvent::Stream(StreamEvent::Cleared));
        assert!(app.messages.is_empty());
        assert!(app.pending.is_empty());
        assert!(app.selected_id.is_none());
        assert!(app.selected_detail.is_none());
        assert_eq!(app.displayed_total, 0);
    }

    #[test]
    fn stale_detail_response_is_discarded() {
        let mut app = test_app();
        app.select("A".to_string());
        app.select("B".to_string());

        // A's slow fetch resolves after B was selected
        app.handle_event(AppEvent::DetailLoaded {
            id: "A".to_string(),
            detail: Box::new(detail("A")),
        });
        assert!(app.selected_detail.is_none());

        app.handle_event(AppEvent::DetailLoaded {
            id: "B".to_string(),
            detail: Box::new(detail("B")),
        });
        assert_eq!(app.selected_detail.as_ref().unwrap().id, "B");
    }

    #[test]
    fn selecting_invalidates_previous_detail_immediately() {
        let mut app = test_app();
        app.select("A".to_string());
        app.handle_event(AppEvent::DetailLoaded {
            id: "A".to_string(),
            detail: Box::new(detail("A")),
        });
        assert!(app.selected_detail.is_some());

        app.select("B".to_string());
        assert!(app.selected_detail.is_none());
        assert_eq!(app.selected_id.as_deref(), Some("B"));
    }

    #[test]
    fn failed_detail_fetch_leaves_detail_cleared() {
        let mut app = test_app();
        app.select("A".to_string());
        app.handle_event(AppEvent::DetailUnavailable {
            id: "A".to_string(),
            reason: "connection refused".to_string(),
        });
        assert!(app.selected_detail.is_none());
        assert_eq!(app.selected_id.as_deref(), Some("A"));
    }

    #[test]
    fn reload_replaces_store_and_clears_pending() {
        let mut app = test_app();
        arrive(&mut app, "old");
        app.handle_event(AppEvent::MessagesLoaded(vec![
            summary("n1"),
            summary("n2"),
        ]));
        assert_eq!(ids(&app), vec!["n1", "n2"]);
        assert!(app.pending.is_empty());
        assert_eq!(app.displayed_total, 2);
    }

    #[test]
    fn init_frame_sets_displayed_total() {
        let mut app = test_app();
        app.handle_event(AppEvent::Stream(StreamEvent::Init { total: 42 }));
        assert_eq!(app.displayed_total, 42);
    }

    #[test]
    fn stats_update_overrides_displayed_total() {
        let mut app = test_app();
        let stats = CollectorStats {
            total_messages: 99,
            active_connections: 1,
            parse_errors: 2,
            ..CollectorStats::default()
        };
        app.handle_event(AppEvent::StatsUpdated(Box::new(stats)));
        assert_eq!(app.displayed_total, 99);
        assert_eq!(app.stats.as_ref().unwrap().parse_errors, 2);
    }

    #[test]
    fn search_applies_only_after_matching_debounce() {
        let mut app = test_app();
        app.search_input = "lab".to_string();
        let stale = app.search_edited();
        app.search_input = "ward".to_string();
        let latest = app.search_edited();

        app.handle_event(AppEvent::SearchDebounce(stale));
        assert_eq!(app.applied_query, "");

        app.handle_event(AppEvent::SearchDebounce(latest));
        assert_eq!(app.applied_query, "ward");
    }

    #[test]
    fn filter_narrows_visible_rows_without_reordering() {
        let mut app = test_app();
        let mut odd = summary("odd");
        odd.sending_facility = "Radiology".to_string();
        app.handle_event(AppEvent::MessagesLoaded(vec![
            summary("m1"),
            odd,
            summary("m2"),
        ]));

        app.search_input = "radiology".to_string();
        let generation = app.search_edited();
        app.handle_event(AppEvent::SearchDebounce(generation));
        assert_eq!(app.visible_indices(), vec![1]);

        app.search_input = String::new();
        let generation = app.search_edited();
        app.handle_event(AppEvent::SearchDebounce(generation));
        assert_eq!(app.visible_indices(), vec![0, 1, 2]);
    }

    #[test]
    fn collapse_toggle_is_an_involution() {
        let mut app = test_app();
        app.selected_id = Some("A".to_string());
        app.selected_detail = Some(detail("A"));
        let before = app.collapsed_segments.clone();

        app.toggle_selected_segment();
        assert_ne!(app.collapsed_segments, before);
        app.toggle_selected_segment();
        assert_eq!(app.collapsed_segments, before);
    }

    #[test]
    fn collapse_state_survives_message_switch() {
        let mut app = test_app();
        app.selected_id = Some("A".to_string());
        app.selected_detail = Some(detail("A"));
        app.toggle_selected_segment();
        let keys = app.collapsed_segments.clone();

        app.select("B".to_string());
        app.handle_event(AppEvent::DetailLoaded {
            id: "B".to_string(),
            detail: Box::new(detail("B")),
        });
        assert_eq!(app.collapsed_segments, keys);
    }

    #[test]
    fn collapse_scope_controls_key_sharing() {
        let mut app = test_app();
        let mut a = detail("A");
        let mut b = detail("B");
        a.message_control_id = "SHARED".to_string();
        b.message_control_id = "SHARED".to_string();

        // Message scope: distinct keys
        assert_ne!(app.collapse_key(&a, 0), app.collapse_key(&b, 0));

        // Control-id scope: shared keys
        app.config.collapse_scope = CollapseScope::ControlId;
        assert_eq!(app.collapse_key(&a, 0), app.collapse_key(&b, 0));
    }

    #[test]
    fn segments_with_parse_error_cannot_be_toggled() {
        let mut app = test_app();
        let mut d = detail("A");
        d.parse_error = Some("missing MSH".to_string());
        app.selected_id = Some("A".to_string());
        app.selected_detail = Some(d);

        app.toggle_selected_segment();
        assert!(app.collapsed_segments.is_empty());
    }

    #[test]
    fn cursor_moves_track_selection() {
        let mut app = test_app();
        app.handle_event(AppEvent::MessagesLoaded(vec![
            summary("m1"),
            summary("m2"),
            summary("m3"),
        ]));

        app.move_cursor(1);
        assert_eq!(app.selected_id.as_deref(), Some("m1"));
        app.move_cursor(1);
        assert_eq!(app.selected_id.as_deref(), Some("m2"));
        app.jump_cursor(true);
        assert_eq!(app.selected_id.as_deref(), Some("m3"));
        app.jump_cursor(false);
        assert_eq!(app.selected_id.as_deref(), Some("m1"));
    }

    #[test]
    fn first_keypress_lands_on_top_row() {
        let mut app = test_app();
        app.handle_event(AppEvent::MessagesLoaded(vec![
            summary("m1"),
            summary("m2"),
        ]));
        assert!(app.selected_id.is_none());

        // Down from no selection picks the newest row, not the second one
        app.move_cursor(1);
        assert_eq!(app.selected_id.as_deref(), Some("m1"));

        app.handle_event(AppEvent::Stream(StreamEvent::Cleared));
        app.handle_event(AppEvent::MessagesLoaded(vec![
            summary("m1"),
            summary("m2"),
        ]));

        // Up from no selection also lands on the top row
        app.move_cursor(-1);
        assert_eq!(app.selected_id.as_deref(), Some("m1"));
    }

    #[test]
    fn detail_mode_cycle_is_closed() {
        let mut mode = DetailMode::Parsed;
        for _ in 0..3 {
            mode = mode.next();
        }
        assert_eq!(mode, DetailMode::Parsed);
        assert_eq!(DetailMode::Parsed.prev(), DetailMode::Json);
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #![proptest_config(ProptestConfig::with_cases(64))]

            /// After any interleaving of arrivals and flushes, the store is
            /// exactly the arrival sequence reversed (newest first).
            #[test]
            fn arrival_order_is_preserved(
                count in 1usize..40,
                flush_points in proptest::collection::vec(any::<bool>(), 40)
            ) {
                let mut app = test_app();
                let mut arrived = Vec::new();

                for i in 0..count {
                    let id = format!("msg-{}", i);
                    arrive(&mut app, &id);
                    arrived.push(id);
                    if flush_points[i] {
                        app.handle_event(AppEvent::FlushTick);
                    }
                }
                app.handle_event(AppEvent::FlushTick);

                let expected: Vec<&str> =
                    arrived.iter().rev().map(|s| s.as_str()).collect();
                prop_assert_eq!(ids(&app), expected);
                prop_assert!(app.pending.is_empty());
            }

            /// Pausing never loses messages: after resume the store holds
            /// everything that arrived before and during the pause.
            #[test]
            fn no_loss_under_pause(
                before in 0usize..20,
                during in 0usize..20
            ) {
                let mut app = test_app();
                for i in 0..before {
                    arrive(&mut app, &format!("pre-{}", i));
                }
                app.handle_event(AppEvent::FlushTick);
                let base = app.messages.len();

                app.toggle_pause();
                for i in 0..during {
                    arrive(&mut app, &format!("paused-{}", i));
                }
                prop_assert_eq!(app.messages.len(), base);
                app.toggle_pause();

                prop_assert_eq!(app.messages.len(), base + during);
                prop_assert!(app.pending.is_empty());
            }
        }
    }
}
