//! Text utilities for TUI rendering.

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Truncates a string with ellipsis if it exceeds max_width (unicode-aware).
///
/// Uses unicode width for accurate terminal column calculation, handling
/// wide characters (CJK, emoji) correctly.
pub fn truncate_with_ellipsis(text: &str, max_width: usize) -> String {
    if text.width() <= max_width {
        return text.to_string();
    }
    if max_width <= 1 {
        return "…".to_string();
    }
    let mut truncated = String::new();
    let mut width = 0;
    for ch in text.chars() {
        let ch_width = ch.width().unwrap_or(0);
        if width + ch_width + 1 > max_width {
            break;
        }
        truncated.push(ch);
        width += ch_width;
    }
    truncated.push('…');
    truncated
}

/// Keeps the end of a string, with a leading ellipsis if it exceeds max_width.
///
/// Used for input fields, where the text being typed is at the end.
pub fn truncate_start_with_ellipsis(text: &str, max_width: usize) -> String {
    if text.width() <= max_width {
        return text.to_string();
    }
    if max_width <= 1 {
        return "…".to_string();
    }
    let mut kept = Vec::new();
    let mut width = 0;
    for ch in text.chars().rev() {
        let ch_width = ch.width().unwrap_or(0);
        if width + ch_width + 1 > max_width {
            break;
        }
        kept.push(ch);
        width += ch_width;
    }
    std::iter::once('…').chain(kept.into_iter().rev()).collect()
}

/// Replaces control characters so backend text cannot break the layout.
pub fn sanitize_for_display(text: &str) -> String {
    text.chars()
        .map(|c| match c {
            '\t' => ' ',
            c if c.is_control() => ' ',
            c => c,
        })
        .collect()
}

/// Masks a secret with one bullet per character.
pub fn mask(char_count: usize) -> String {
    "•".repeat(char_count)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_short_text_unchanged() {
        assert_eq!(truncate_with_ellipsis("Swift", 10), "Swift");
    }

    #[test]
    fn test_truncate_long_text() {
        assert_eq!(truncate_with_ellipsis("Objective-C", 6), "Objec…");
        assert_eq!(truncate_with_ellipsis("Objective-C", 1), "…");
    }

    #[test]
    fn test_truncate_wide_chars() {
        // Each CJK character is two columns wide.
        assert_eq!(truncate_with_ellipsis("培训课程", 5), "培训…");
    }

    #[test]
    fn test_truncate_start_keeps_tail() {
        assert_eq!(truncate_start_with_ellipsis("HE170", 10), "HE170");
        assert_eq!(truncate_start_with_ellipsis("Objective-C", 6), "…ve-C");
        assert_eq!(truncate_start_with_ellipsis("培训课程", 5), "…课程");
    }

    #[test]
    fn test_sanitize_replaces_controls() {
        assert_eq!(sanitize_for_display("a\tb\nc"), "a b c");
    }

    #[test]
    fn test_mask() {
        assert_eq!(mask(3), "•••");
        assert_eq!(mask(0), "");
    }
}
