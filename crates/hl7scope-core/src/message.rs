//! Message summaries and full message details as served by the collector.
//!
//! Field names mirror the collector's JSON exactly; the console never
//! mutates a message after it arrives, it only replaces whole collections.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Lightweight list entry, delivered on the stream and by the bulk endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageSummary {
    pub id: String,
    pub received_at: DateTime<Utc>,
    pub source_addr: String,
    pub message_type: String,
    pub trigger_event: String,
    pub message_control_id: String,
    pub sending_facility: String,
    pub patient_name: Option<String>,
    pub patient_id: Option<String>,
    pub segment_count: usize,
    pub parse_error: Option<String>,
}

impl MessageSummary {
    /// Case-insensitive substring match over the six searchable fields:
    /// message type, sending facility, patient name, patient id,
    /// message control id and source address.
    pub fn matches_query(&self, query: &str) -> bool {
        if query.is_empty() {
            return true;
        }
        let q = query.to_lowercase();
        self.message_type.to_lowercase().contains(&q)
            || self.sending_facility.to_lowercase().contains(&q)
            || self
                .patient_name
                .as_deref()
                .unwrap_or("")
                .to_lowercase()
                .contains(&q)
            || self
                .patient_id
                .as_deref()
                .unwrap_or("")
                .to_lowercase()
                .contains(&q)
            || self.message_control_id.to_lowercase().contains(&q)
            || self.source_addr.to_lowercase().contains(&q)
    }

    /// Patient label for list rows: name, else id, else an em dash.
    pub fn patient_label(&self) -> &str {
        self.patient_name
            .as_deref()
            .or(self.patient_id.as_deref())
            .unwrap_or("—")
    }
}

/// Full message as returned by `GET /api/messages/{id}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageDetail {
    pub id: String,
    pub raw: String,
    pub received_at: DateTime<Utc>,
    pub source_addr: String,
    pub message_type: String,
    pub trigger_event: String,
    pub message_control_id: String,
    pub sending_application: String,
    pub sending_facility: String,
    pub receiving_application: String,
    pub receiving_facility: String,
    pub version: String,
    pub segments: Vec<Segment>,
    pub patient_name: Option<String>,
    pub patient_id: Option<String>,
    pub parse_error: Option<String>,
}

impl MessageDetail {
    /// Patient label for the detail header: name, else id, else "Unknown".
    pub fn patient_label(&self) -> &str {
        self.patient_name
            .as_deref()
            .or(self.patient_id.as_deref())
            .unwrap_or("Unknown")
    }
}

/// One named group of fields within a message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Segment {
    pub name: String,
    pub fields: Vec<Field>,
    #[serde(default)]
    pub raw: String,
}

/// One field within a segment, with its component breakdown.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Field {
    pub index: usize,
    pub value: String,
    pub components: Vec<String>,
}

impl Field {
    /// A field with at most one component has no meaningful sub-structure.
    pub fn has_components(&self) -> bool {
        self.components.len() > 1
    }
}

/// Split raw message text into non-blank lines, accepting any of the line
/// terminators HL7 senders produce (`\r`, `\n`, `\r\n`). Display transform
/// only; the stored raw text is never modified.
pub fn split_raw_lines(raw: &str) -> Vec<&str> {
    raw.split(['\r', '\n'])
        .map(str::trim_end)
        .filter(|l| !l.trim().is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn summary() -> MessageSummary {
        MessageSummary {
            id: "m-1".to_string(),
            received_at: Utc.with_ymd_and_hms(2026, 3, 14, 9, 26, 53).unwrap(),
            source_addr: "10.0.0.7:52110".to_string(),
            message_type: "ADT^A01".to_string(),
            trigger_event: "A01".to_string(),
            message_control_id: "MSG00042".to_string(),
            sending_facility: "GeneralHospital".to_string(),
            patient_name: Some("DOE^JANE".to_string()),
            patient_id: Some("PID12345".to_string()),
            segment_count: 5,
            parse_error: None,
        }
    }

    #[test]
    fn empty_query_matches_everything() {
        assert!(summary().matches_query(""));
    }

    #[test]
    fn query_matches_each_searchable_field() {
        let s = summary();
        assert!(s.matches_query("adt^a01"));
        assert!(s.matches_query("generalhosp"));
        assert!(s.matches_query("doe^jane"));
        assert!(s.matches_query("pid123"));
        assert!(s.matches_query("msg00042"));
        assert!(s.matches_query("10.0.0.7"));
    }

    #[test]
    fn query_is_case_insensitive() {
        let s = summary();
        assert!(s.matches_query("ADT"));
        assert!(s.matches_query("Doe^Jane"));
        assert!(s.matches_query("MSG00042"));
    }

    #[test]
    fn unmatched_query_is_excluded() {
        assert!(!summary().matches_query("ORU^R01"));
        assert!(!summary().matches_query("zzz"));
    }

    #[test]
    fn absent_patient_fields_do_not_match() {
        let mut s = summary();
        s.patient_name = None;
        s.patient_id = None;
        assert!(!s.matches_query("doe"));
        assert_eq!(s.patient_label(), "—");
    }

    #[test]
    fn patient_label_falls_back_to_id() {
        let mut s = summary();
        s.patient_name = None;
        assert_eq!(s.patient_label(), "PID12345");
    }

    #[test]
    fn summary_deserializes_from_collector_json() {
        let json = r#"{
            "id": "abc",
            "received_at": "2026-03-14T09:26:53Z",
            "source_addr": "127.0.0.1:5100",
            "message_type": "ORU^R01",
            "trigger_event": "R01",
            "message_control_id": "CTRL1",
            "sending_facility": "Lab",
            "patient_name": null,
            "patient_id": "P1",
            "segment_count": 3,
            "parse_error": null
        }"#;
        let s: MessageSummary = serde_json::from_str(json).unwrap();
        assert_eq!(s.id, "abc");
        assert_eq!(s.segment_count, 3);
        assert!(s.patient_name.is_none());
    }

    #[test]
    fn split_raw_lines_accepts_all_terminators() {
        let raw = "MSH|^~\\&|A\rPID|1|X\r\nOBX|1|Y\nNTE|1|Z";
        let lines = split_raw_lines(raw);
        assert_eq!(lines, vec!["MSH|^~\\&|A", "PID|1|X", "OBX|1|Y", "NTE|1|Z"]);
    }

    #[test]
    fn split_raw_lines_drops_blanks() {
        let raw = "MSH|^~\\&\r\r\n   \nPID|1";
        assert_eq!(split_raw_lines(raw), vec!["MSH|^~\\&", "PID|1"]);
    }

    #[test]
    fn field_component_structure() {
        let plain = Field {
            index: 3,
            value: "SINGLE".to_string(),
            components: vec!["SINGLE".to_string()],
        };
        let composite = Field {
            index: 5,
            value: "DOE^JANE^A".to_string(),
            components: vec!["DOE".into(), "JANE".into(), "A".into()],
        };
        assert!(!plain.has_components());
        assert!(composite.has_components());
    }
}
