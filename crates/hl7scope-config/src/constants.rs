//! Default values for all configuration settings.

/// Delay between the first unflushed arrival and the pending-buffer flush.
/// Not a sliding window: a burst does not push the deadline out.
pub const DEFAULT_FLUSH_INTERVAL_MS: u64 = 250;

/// Debounce applied to search input before the filter takes effect.
pub const DEFAULT_SEARCH_DEBOUNCE_MS: u64 = 300;

/// Fixed delay before reconnecting a lost stream. No backoff, no retry cap;
/// availability is preferred over politeness toward a local collector.
pub const DEFAULT_RECONNECT_DELAY_MS: u64 = 2000;

/// Interval of the best-effort stats poller.
pub const DEFAULT_STATS_POLL_INTERVAL_MS: u64 = 3000;

/// How many summaries a full reload requests.
pub const DEFAULT_RELOAD_LIMIT: usize = 1000;

/// How many summaries an export requests.
pub const DEFAULT_EXPORT_LIMIT: usize = 100_000;

/// HTTP request timeout for REST calls.
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 5;

/// Collector host and port defaults.
pub const DEFAULT_COLLECTOR_HOST: &str = "127.0.0.1";
pub const DEFAULT_COLLECTOR_PORT: u16 = 8080;

/// Render tick while the operator is interacting (~60 FPS).
pub const DEFAULT_REFRESH_RATE_ACTIVE_MS: u64 = 16;

/// Render tick when idle (4 FPS, saves CPU).
pub const DEFAULT_REFRESH_RATE_IDLE_MS: u64 = 250;

/// Time without input before switching to the idle tick.
pub const DEFAULT_IDLE_TIMEOUT_MS: u64 = 500;

/// Rolling capacity of the internal console log.
pub const DEFAULT_CONSOLE_LOG_CAPACITY: usize = 100;
