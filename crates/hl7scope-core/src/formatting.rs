//! Timestamp display and sanitization of untrusted message text.

use chrono::{DateTime, Local, Utc};
use std::sync::atomic::{AtomicBool, Ordering};

static USE_UTC: AtomicBool = AtomicBool::new(false);

/// Set whether timestamps are displayed in UTC instead of local time.
pub fn set_use_utc(use_utc: bool) {
    USE_UTC.store(use_utc, Ordering::Relaxed);
}

/// Whether timestamps are displayed in UTC.
pub fn is_use_utc() -> bool {
    USE_UTC.load(Ordering::Relaxed)
}

/// Format an arrival timestamp as HH:MM:SS for list rows.
pub fn format_received_at(ts: DateTime<Utc>) -> String {
    if is_use_utc() {
        ts.format("%H:%M:%S").to_string()
    } else {
        ts.with_timezone(&Local).format("%H:%M:%S").to_string()
    }
}

/// Strip control characters from message-derived text before rendering.
///
/// Message payloads are untrusted operator/patient data; embedded escape
/// sequences must not reach the terminal. Tabs become single spaces, every
/// other control character is dropped.
pub fn sanitize(text: &str) -> String {
    text.chars()
        .filter_map(|c| {
            if c == '\t' {
                Some(' ')
            } else if c.is_control() {
                None
            } else {
                Some(c)
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitize_passes_plain_text() {
        assert_eq!(sanitize("ADT^A01|DOE^JANE"), "ADT^A01|DOE^JANE");
    }

    #[test]
    fn sanitize_strips_escape_sequences() {
        assert_eq!(sanitize("PID\x1b[2Jrm -rf"), "PID[2Jrm -rf");
        assert_eq!(sanitize("a\x07b\x00c"), "abc");
    }

    #[test]
    fn sanitize_converts_tabs() {
        assert_eq!(sanitize("a\tb"), "a b");
    }

    #[test]
    fn format_received_at_utc() {
        set_use_utc(true);
        let ts = chrono::TimeZone::with_ymd_and_hms(&Utc, 2026, 1, 2, 13, 4, 5).unwrap();
        assert_eq!(format_received_at(ts), "13:04:05");
        set_use_utc(false);
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn sanitize_never_emits_control_chars(s in ".*") {
                prop_assert!(!sanitize(&s).chars().any(|c| c.is_control()));
            }

            #[test]
            fn sanitize_is_idempotent(s in ".*") {
                let once = sanitize(&s);
                prop_assert_eq!(sanitize(&once), once.clone());
            }
        }
    }
}
