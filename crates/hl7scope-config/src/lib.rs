//! Configuration types and loading for hl7scope
//!
//! - `client` - collector endpoint settings
//! - `tui` - terminal UI timing, collapse-scope and theme settings
//! - `constants` - defaults for every setting
//! - `loader` - TOML loading (strict and load-or-default)

pub mod constants;

mod client;
mod loader;
mod tui;

pub use client::ClientConfig;
pub use loader::{
    load_config, load_config_from_str, load_config_or_default, Config, ConfigError,
    DEFAULT_CONFIG, DEFAULT_CONFIG_FILENAME,
};
pub use tui::{CollapseScope, ThemeColors, ThemeConfig, TuiConfig};
