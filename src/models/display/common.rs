//! Common display utilities and helpers

use chrono::{DateTime, Utc};

/// Truncate string to max characters with ellipsis
pub fn truncate_string(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

/// Format an optional timestamp as `YYYY-MM-DD HH:MM`, or "--"
pub fn format_datetime(dt: Option<&DateTime<Utc>>) -> String {
    dt.map(|d| d.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| "--".to_string())
}

/// Format an optional count, or "--"
pub fn format_count(count: Option<u32>) -> String {
    count.map(|c| c.to_string()).unwrap_or_else(|| "--".to_string())
}
