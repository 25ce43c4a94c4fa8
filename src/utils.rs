

/// Log preview of `s`: at most `max_chars` characters, with `...` when cut.
pub fn safe_truncate_ellipsis(s: &str, max_chars: usize) -> String {
    match s.char_indices().nth(max_chars) {
        Some((end, _)) => format!("{}...", &s[..end]),
        None => s.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncates_quote_preview() {
        assert_eq!(safe_truncate_ellipsis("Education is the passport", 9), "Education...");
        assert_eq!(safe_truncate_ellipsis("perseverance", 6), "persev...");
    }

    #[test]
    fn test_keeps_short_text() {
        assert_eq!(safe_truncate_ellipsis("queen", 5), "queen");
        assert_eq!(safe_truncate_ellipsis("reine", 10), "reine");
    }

    #[test]
    fn test_respects_code_points() {
        assert_eq!(safe_truncate_ellipsis("ملكة جميلة", 4), "ملكة...");
    }
}
