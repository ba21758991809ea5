//! hl7scope - Main entry point
//!
//! Starts the terminal console for a running HL7 collector.

use color_eyre::eyre::{Context, Result};
use hl7scope_client::CollectorClient;
use hl7scope_config::{
    load_config_or_default, DEFAULT_CONFIG, DEFAULT_CONFIG_FILENAME,
};
use hl7scope_logging::{info, init, LogConfig};
use hl7scope_tui::App;
use std::path::PathBuf;

#[tokio::main]
async fn main() -> Result<()> {
    // Install color-eyre error handler
    color_eyre::install()?;

    let args: Vec<String> = std::env::args().collect();

    if has_flag(&args, "--help") || has_flag(&args, "-h") {
        print_usage();
        return Ok(());
    }

    // Initialize tracing (logs to stderr so the TUI can use stdout)
    init(LogConfig::tui().debug(has_flag(&args, "--debug")));

    let config_path = parse_value_arg(&args, "--config")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILENAME));

    if has_flag(&args, "--write-config") {
        std::fs::write(&config_path, DEFAULT_CONFIG)
            .context(format!("Failed to write {}", config_path.display()))?;
        println!("Wrote {}", config_path.display());
        return Ok(());
    }

    // Config file is optional; flags override it
    let mut config = load_config_or_default(&config_path)
        .context(format!("Failed to load {}", config_path.display()))?;
    if let Some(host) = parse_value_arg(&args, "--host") {
        config.client.host = host;
    }
    if let Some(port) = parse_value_arg(&args, "--port") {
        config.client.port = port
            .parse()
            .context(format!("Invalid port: {}", port))?;
    }

    // Set UTC/local timestamp preference for formatting
    hl7scope_tui::ui::formatters::set_use_utc(config.tui.use_utc);

    info!("Watching collector at {}", config.client.http_base_url());

    // Does not connect yet; the stream listener owns connecting and retry
    let client = CollectorClient::new(&config.client)?;

    // Initialize terminal
    let terminal = ratatui::init();

    // Run the application
    let result = App::new(config.tui, client).run(terminal).await;

    // Restore terminal (important: do this before returning error)
    ratatui::restore();

    result
}

/// Parse a `--flag value` or `--flag=value` argument
fn parse_value_arg(args: &[String], flag: &str) -> Option<String> {
    let prefix = format!("{}=", flag);
    for (i, arg) in args.iter().enumerate() {
        if arg == flag {
            return args.get(i + 1).cloned();
        }
        if let Some(value) = arg.strip_prefix(&prefix) {
            return Some(value.to_string());
        }
    }
    None
}

fn has_flag(args: &[String], flag: &str) -> bool {
    args.iter().any(|a| a == flag)
}

fn print_usage() {
    println!(
        "hl7scope - terminal live console for an HL7 MLLP collector

Usage: hl7scope [options]

Options:
  --config <path>   Config file (default: {})
  --host <host>     Collector host (overrides config)
  --port <port>     Collector HTTP port (overrides config)
  --write-config    Write a commented starter config and exit
  --debug           Verbose logging to stderr
  -h, --help        Show this help",
        DEFAULT_CONFIG_FILENAME
    );
}
