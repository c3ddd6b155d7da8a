//! Common display utilities and helpers

use chrono::{DateTime, NaiveDateTime, Utc};

/// Truncate string to max characters with ellipsis
pub fn truncate_string(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

/// Format a server timestamp as `YYYY-MM-DD HH:MM`.
///
/// Accepts zoned RFC 3339 and the server's zone-less local form, with or
/// without fractional seconds. Anything else is returned unchanged.
pub fn format_created_at(timestamp: &str) -> String {
    if let Ok(dt) = timestamp.parse::<DateTime<Utc>>() {
        return dt.format("%Y-%m-%d %H:%M").to_string();
    }

    if let Ok(dt) = NaiveDateTime::parse_from_str(timestamp, "%Y-%m-%dT%H:%M:%S%.f") {
        return dt.format("%Y-%m-%d %H:%M").to_string();
    }

    timestamp.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_string() {
        assert_eq!(truncate_string("short.pdf", 20), "short.pdf");
        assert_eq!(truncate_string("a-very-long-file-name.pdf", 10), "a-very-...");
    }

    #[test]
    fn test_format_created_at_local() {
        assert_eq!(format_created_at("2025-01-15T10:30:00"), "2025-01-15 10:30");
        assert_eq!(
            format_created_at("2025-01-15T10:30:00.123456"),
            "2025-01-15 10:30"
        );
    }

    #[test]
    fn test_format_created_at_zoned() {
        assert_eq!(format_created_at("2025-01-15T10:30:00Z"), "2025-01-15 10:30");
    }

    #[test]
    fn test_format_created_at_passthrough() {
        assert_eq!(format_created_at("yesterday"), "yesterday");
    }
}
