//! Shared text helpers for terminal rendering

/// Truncate a string to max_len characters, adding "..." if truncated
pub fn truncate_str(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let truncate_at = max_len.saturating_sub(3);
        let truncated: String = s.chars().take(truncate_at).collect();
        format!("{}...", truncated)
    }
}

/// Truncates then left-aligns `s` in exactly `width` columns
pub fn fit(s: &str, width: usize) -> String {
    format!("{:<width$}", truncate_str(s, width), width = width)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_short_string() {
        assert_eq!(truncate_str("plan", 10), "plan");
    }

    #[test]
    fn truncate_long_title() {
        assert_eq!(truncate_str("Landing copy draft", 10), "Landing...");
    }

    #[test]
    fn truncate_counts_chars_not_bytes() {
        assert_eq!(truncate_str("café menu", 9), "café menu");
        assert_eq!(truncate_str("café menu", 6), "caf...");
    }

    #[test]
    fn fit_pads_and_truncates() {
        assert_eq!(fit("ab", 4), "ab  ");
        assert_eq!(fit("abcdefgh", 6), "abc...");
        assert_eq!(fit("", 3), "   ");
    }
}
