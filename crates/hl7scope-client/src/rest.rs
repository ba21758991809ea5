//! REST client for the collector's HTTP API.

use color_eyre::eyre::{bail, Context, Result};
use hl7scope_config::ClientConfig;
use hl7scope_core::{CollectorStats, MessageDetail, MessageSummary};
use reqwest::StatusCode;
use std::time::Duration;

/// Client for the collector's REST API. Cheap to clone; clones share the
/// underlying connection pool.
#[derive(Clone)]
pub struct CollectorClient {
    http: reqwest::Client,
    base_url: String,
    ws_url: String,
}

impl CollectorClient {
    /// Build a client from endpoint configuration. Does not connect.
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.http_timeout_secs))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            http,
            base_url: config.http_base_url(),
            ws_url: config.ws_url(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub(crate) fn ws_url(&self) -> &str {
        &self.ws_url
    }

    /// Fetch up to `limit` message summaries, newest first.
    pub async fn list_messages(&self, limit: usize) -> Result<Vec<MessageSummary>> {
        let url = format!("{}/api/messages?limit={}", self.base_url, limit);
        let response = self
            .http
            .get(&url)
            .send()
            .await
            .context("Failed to reach collector")?;

        if !response.status().is_success() {
            bail!("Message list request failed: {}", response.status());
        }

        response
            .json()
            .await
            .context("Failed to decode message list")
    }

    /// Fetch one full message. Returns `None` when the collector no longer
    /// holds the id (evicted or cleared between list and fetch).
    pub async fn get_message(&self, id: &str) -> Result<Option<MessageDetail>> {
        let url = format!("{}/api/messages/{}", self.base_url, id);
        let response = self
            .http
            .get(&url)
            .send()
            .await
            .context("Failed to reach collector")?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !response.status().is_success() {
            bail!("Message fetch failed: {}", response.status());
        }

        let detail = response
            .json()
            .await
            .context("Failed to decode message detail")?;
        Ok(Some(detail))
    }

    /// Fetch aggregate counters.
    pub async fn stats(&self) -> Result<CollectorStats> {
        let url = format!("{}/api/stats", self.base_url);
        let response = self
            .http
            .get(&url)
            .send()
            .await
            .context("Failed to reach collector")?;

        if !response.status().is_success() {
            bail!("Stats request failed: {}", response.status());
        }

        response.json().await.context("Failed to decode stats")
    }

    /// Clear the collector's message store. The collector answers with a
    /// `cleared` stream event to every client, including this one.
    pub async fn clear(&self) -> Result<()> {
        let url = format!("{}/api/clear", self.base_url);
        let response = self
            .http
            .post(&url)
            .send()
            .await
            .context("Failed to reach collector")?;

        if !response.status().is_success() {
            bail!("Clear request failed: {}", response.status());
        }
        Ok(())
    }
}
