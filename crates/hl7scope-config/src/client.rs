//! Collector endpoint configuration.

use crate::constants::{
    DEFAULT_COLLECTOR_HOST, DEFAULT_COLLECTOR_PORT, DEFAULT_HTTP_TIMEOUT_SECS,
};
use serde::{Deserialize, Serialize};

/// Where the collector lives and how patiently we talk to it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Collector host
    #[serde(default = "default_host")]
    pub host: String,

    /// Collector HTTP port (serves both the REST API and the stream)
    #[serde(default = "default_port")]
    pub port: u16,

    /// REST request timeout in seconds
    #[serde(default = "default_http_timeout_secs")]
    pub http_timeout_secs: u64,
}

fn default_host() -> String {
    DEFAULT_COLLECTOR_HOST.to_string()
}

fn default_port() -> u16 {
    DEFAULT_COLLECTOR_PORT
}

fn default_http_timeout_secs() -> u64 {
    DEFAULT_HTTP_TIMEOUT_SECS
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            http_timeout_secs: default_http_timeout_secs(),
        }
    }
}

impl ClientConfig {
    /// Base URL for REST calls.
    pub fn http_base_url(&self) -> String {
        format!("http://{}:{}", self.host, self.port)
    }

    /// URL of the live event stream.
    pub fn ws_url(&self) -> String {
        format!("ws://{}:{}/ws", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn urls_are_derived_from_host_and_port() {
        let cfg = ClientConfig {
            host: "hl7.lab.local".to_string(),
            port: 9090,
            ..ClientConfig::default()
        };
        assert_eq!(cfg.http_base_url(), "http://hl7.lab.local:9090");
        assert_eq!(cfg.ws_url(), "ws://hl7.lab.local:9090/ws");
    }
}
