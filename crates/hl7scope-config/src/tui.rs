//! Terminal UI configuration.

use crate::constants::{
    DEFAULT_EXPORT_LIMIT, DEFAULT_FLUSH_INTERVAL_MS, DEFAULT_IDLE_TIMEOUT_MS,
    DEFAULT_REFRESH_RATE_ACTIVE_MS, DEFAULT_REFRESH_RATE_IDLE_MS, DEFAULT_RELOAD_LIMIT,
    DEFAULT_RECONNECT_DELAY_MS, DEFAULT_SEARCH_DEBOUNCE_MS, DEFAULT_STATS_POLL_INTERVAL_MS,
};
use serde::{Deserialize, Serialize};

/// Scope of the per-segment collapse keys.
///
/// `Message` keys collapse state by message id, so two messages never share
/// a collapsed segment. `ControlId` reproduces the historical behavior of
/// sharing collapse state across messages with the same control id, which
/// some operators prefer for a stable layout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CollapseScope {
    #[default]
    Message,
    ControlId,
}

/// Terminal UI settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TuiConfig {
    /// Coalescing delay for arriving messages (milliseconds)
    #[serde(default = "default_flush_interval_ms")]
    pub flush_interval_ms: u64,

    /// Search input debounce (milliseconds)
    #[serde(default = "default_search_debounce_ms")]
    pub search_debounce_ms: u64,

    /// Delay before reconnecting a lost stream (milliseconds)
    #[serde(default = "default_reconnect_delay_ms")]
    pub reconnect_delay_ms: u64,

    /// Stats poll interval (milliseconds)
    #[serde(default = "default_stats_poll_interval_ms")]
    pub stats_poll_interval_ms: u64,

    /// How many summaries a full reload requests
    #[serde(default = "default_reload_limit")]
    pub reload_limit: usize,

    /// How many summaries an export requests
    #[serde(default = "default_export_limit")]
    pub export_limit: usize,

    /// Render tick while interacting (milliseconds)
    #[serde(default = "default_refresh_rate_active_ms")]
    pub refresh_rate_active_ms: u64,

    /// Render tick when idle (milliseconds)
    #[serde(default = "default_refresh_rate_idle_ms")]
    pub refresh_rate_idle_ms: u64,

    /// Time without input before the idle tick kicks in (milliseconds)
    #[serde(default = "default_idle_timeout_ms")]
    pub idle_timeout_ms: u64,

    /// Display timestamps in UTC instead of local time
    #[serde(default)]
    pub use_utc: bool,

    /// Scope of segment collapse keys
    #[serde(default)]
    pub collapse_scope: CollapseScope,

    /// Theme configuration
    #[serde(default)]
    pub theme: ThemeConfig,
}

fn default_flush_interval_ms() -> u64 {
    DEFAULT_FLUSH_INTERVAL_MS
}

fn default_search_debounce_ms() -> u64 {
    DEFAULT_SEARCH_DEBOUNCE_MS
}

fn default_reconnect_delay_ms() -> u64 {
    DEFAULT_RECONNECT_DELAY_MS
}

fn default_stats_poll_interval_ms() -> u64 {
    DEFAULT_STATS_POLL_INTERVAL_MS
}

fn default_reload_limit() -> usize {
    DEFAULT_RELOAD_LIMIT
}

fn default_export_limit() -> usize {
    DEFAULT_EXPORT_LIMIT
}

fn default_refresh_rate_active_ms() -> u64 {
    DEFAULT_REFRESH_RATE_ACTIVE_MS
}

fn default_refresh_rate_idle_ms() -> u64 {
    DEFAULT_REFRESH_RATE_IDLE_MS
}

fn default_idle_timeout_ms() -> u64 {
    DEFAULT_IDLE_TIMEOUT_MS
}

impl Default for TuiConfig {
    fn default() -> Self {
        Self {
            flush_interval_ms: default_flush_interval_ms(),
            search_debounce_ms: default_search_debounce_ms(),
            reconnect_delay_ms: default_reconnect_delay_ms(),
            stats_poll_interval_ms: default_stats_poll_interval_ms(),
            reload_limit: default_reload_limit(),
            export_limit: default_export_limit(),
            refresh_rate_active_ms: default_refresh_rate_active_ms(),
            refresh_rate_idle_ms: default_refresh_rate_idle_ms(),
            idle_timeout_ms: default_idle_timeout_ms(),
            use_utc: false,
            collapse_scope: CollapseScope::default(),
            theme: ThemeConfig::default(),
        }
    }
}

/// Theme selection plus optional color overrides.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThemeConfig {
    /// Theme name: "dark" or "light"
    #[serde(default = "default_theme_name")]
    pub name: String,

    /// Optional color overrides (hex strings or named colors)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub colors: Option<ThemeColors>,
}

fn default_theme_name() -> String {
    "dark".to_string()
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            name: default_theme_name(),
            colors: None,
        }
    }
}

/// Per-role color overrides applied on top of the base theme.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ThemeColors {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub foreground: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub header: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selection: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub border: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub connected: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disconnected: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accent: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
}
