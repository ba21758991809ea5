//! Aggregate counters reported by the collector's `/api/stats` endpoint.

use serde::{Deserialize, Serialize};

/// Best-effort dashboard counters. Supplementary fields default to zero so
/// older collectors that omit them still decode.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CollectorStats {
    pub total_messages: u64,
    pub active_connections: u64,
    pub parse_errors: u64,
    #[serde(default)]
    pub received: u64,
    #[serde(default)]
    pub parsed_ok: u64,
    /// MLLP listener port, if the collector reports one.
    #[serde(default)]
    pub mllp_port: Option<u16>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_full_stats_payload() {
        let json = r#"{
            "total_messages": 120,
            "received": 125,
            "parsed_ok": 118,
            "parse_errors": 7,
            "active_connections": 2,
            "mllp_port": 2575
        }"#;
        let stats: CollectorStats = serde_json::from_str(json).unwrap();
        assert_eq!(stats.total_messages, 120);
        assert_eq!(stats.parse_errors, 7);
        assert_eq!(stats.mllp_port, Some(2575));
    }

    #[test]
    fn decodes_minimal_stats_payload() {
        let json = r#"{"total_messages": 1, "active_connections": 0, "parse_errors": 0}"#;
        let stats: CollectorStats = serde_json::from_str(json).unwrap();
        assert_eq!(stats.received, 0);
        assert!(stats.mllp_port.is_none());
    }
}
