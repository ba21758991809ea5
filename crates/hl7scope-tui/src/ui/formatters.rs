//! Common formatting utilities for TUI rendering

// Re-export display helpers from hl7scope_core so rendering code has a
// single import path
pub use hl7scope_core::{format_received_at, sanitize, set_use_utc};

/// Truncate string with ellipsis (UTF-8 safe)
///
/// Returns the original string if it fits within max_len characters,
/// otherwise truncates and adds an ellipsis.
pub fn truncate(s: &str, max_len: usize) -> String {
    let char_count = s.chars().count();
    if char_count <= max_len {
        s.to_string()
    } else {
        let truncated: String = s.chars().take(max_len.saturating_sub(1)).collect();
        format!("{}…", truncated)
    }
}

/// Sanitize and truncate a value for a table cell in one step.
pub fn cell(s: &str, max_len: usize) -> String {
    truncate(&sanitize(s), max_len)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_short_string() {
        assert_eq!(truncate("hello", 10), "hello");
    }

    #[test]
    fn test_truncate_long_string() {
        assert_eq!(truncate("hello world", 8), "hello w…");
    }

    #[test]
    fn test_truncate_utf8() {
        // Multi-byte characters must not be split
        assert_eq!(truncate("こんにちは", 4), "こんに…");
    }

    #[test]
    fn test_cell_strips_control_characters() {
        assert_eq!(cell("AD\x0bT^A01", 20), "ADT^A01");
    }
}
