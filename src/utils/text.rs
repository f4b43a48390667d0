/// Format a price the way deal cards display it, two decimals and a euro
/// sign.
pub fn format_price(price: f64) -> String {
    format!("{price:.2}€")
}

/// Truncate to at most `max` characters, appending an ellipsis when
/// anything was cut.
pub fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let kept: String = text.chars().take(max.saturating_sub(1)).collect();
    format!("{kept}…")
}

/// Wrap body text to `width` columns for list rendering. Zero-width input
/// falls back to one column so the result is never empty for non-empty text.
pub fn wrap(text: &str, width: usize) -> Vec<String> {
    textwrap::wrap(text, width.max(1))
        .into_iter()
        .map(|line| line.into_owned())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_prices_with_two_decimals() {
        assert_eq!(format_price(899.0), "899.00€");
        assert_eq!(format_price(12.345), "12.35€");
    }

    #[test]
    fn truncate_keeps_short_strings() {
        assert_eq!(truncate("short", 10), "short");
    }

    #[test]
    fn truncate_cuts_long_strings_with_ellipsis() {
        let result = truncate("a very long deal title indeed", 10);
        assert_eq!(result.chars().count(), 10);
        assert!(result.ends_with('…'));
    }

    #[test]
    fn wrap_never_panics_on_zero_width() {
        assert!(!wrap("hello world", 0).is_empty());
    }

    #[test]
    fn wrap_splits_at_width() {
        let lines = wrap("one two three four", 9);
        assert!(lines.len() >= 2);
        assert!(lines.iter().all(|line| line.chars().count() <= 9));
    }
}
