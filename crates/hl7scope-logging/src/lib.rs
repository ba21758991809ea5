//! Centralized logging configuration for hl7scope
//!
//! Wraps `tracing` and `tracing-subscriber` so every binary initializes
//! logging the same way.
//!
//! ```rust,ignore
//! use hl7scope_logging::{init, LogConfig};
//!
//! // TUI mode: stdout belongs to the terminal UI, logs go to stderr
//! init(LogConfig::tui());
//! ```

use std::io::IsTerminal;
use tracing_subscriber::{fmt, EnvFilter};

// Re-export tracing macros for standardized imports
pub use tracing::{debug, error, info, trace, warn, Level};

/// Output destination for logs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogOutput {
    /// Write logs to stdout (default)
    #[default]
    Stdout,
    /// Write logs to stderr (required when stdout renders the TUI)
    Stderr,
}

/// Configuration for logging initialization.
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Enable debug-level logging (overrides default_level)
    pub debug: bool,
    /// Default log level when RUST_LOG is not set
    pub default_level: String,
    /// Output destination
    pub output: LogOutput,
    /// Show module target in log output
    pub show_target: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            debug: false,
            default_level: "info".to_string(),
            output: LogOutput::Stdout,
            show_target: false,
        }
    }
}

impl LogConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable debug-level logging
    pub fn debug(mut self, enabled: bool) -> Self {
        self.debug = enabled;
        self
    }

    /// Set the default log level (used when RUST_LOG is not set)
    pub fn default_level(mut self, level: impl Into<String>) -> Self {
        self.default_level = level.into();
        self
    }

    /// Set the output destination
    pub fn output(mut self, output: LogOutput) -> Self {
        self.output = output;
        self
    }

    /// Show or hide module target in log output
    pub fn show_target(mut self, show: bool) -> Self {
        self.show_target = show;
        self
    }

    /// Convenience: configure for TUI usage (minimal logging to stderr)
    pub fn tui() -> Self {
        Self::new().default_level("warn").output(LogOutput::Stderr)
    }

    /// Convenience: configure for tests
    pub fn test() -> Self {
        Self::new().default_level("debug")
    }

    fn build_filter(&self) -> EnvFilter {
        if self.debug {
            EnvFilter::new("debug")
        } else {
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&self.default_level))
        }
    }
}

/// Initialize the logging system with the given configuration.
///
/// Call once at startup. `RUST_LOG` overrides the configured level.
///
/// # Panics
///
/// Panics if called more than once (tracing can only be initialized once).
pub fn init(config: LogConfig) {
    let filter = config.build_filter();

    match config.output {
        LogOutput::Stdout => {
            fmt()
                .with_env_filter(filter)
                .with_target(config.show_target)
                .with_ansi(std::io::stdout().is_terminal())
                .init();
        }
        LogOutput::Stderr => {
            fmt()
                .with_env_filter(filter)
                .with_target(config.show_target)
                .with_writer(std::io::stderr)
                .with_ansi(std::io::stderr().is_terminal())
                .init();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_sets_fields() {
        let config = LogConfig::new()
            .debug(true)
            .default_level("trace")
            .output(LogOutput::Stderr)
            .show_target(true);
        assert!(config.debug);
        assert_eq!(config.default_level, "trace");
        assert_eq!(config.output, LogOutput::Stderr);
        assert!(config.show_target);
    }

    #[test]
    fn tui_preset_logs_to_stderr() {
        let config = LogConfig::tui();
        assert_eq!(config.output, LogOutput::Stderr);
        assert_eq!(config.default_level, "warn");
    }
}
