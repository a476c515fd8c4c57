//! Small shared helpers: selector parsing and character-safe truncation.

use scraper::Selector;

/// Parses a CSS selector with a safe fallback.
///
/// If parsing fails, logs an error and returns a selector that matches
/// nothing (`*:not(*)`). This prevents panics while allowing the code to
/// continue.
pub fn parse_selector_with_fallback(selector_str: &str, context: &str) -> Selector {
    Selector::parse(selector_str).unwrap_or_else(|e| {
        log::error!(
            "Failed to parse CSS selector '{}' in {}: {}. Using fallback selector.",
            selector_str,
            context,
            e
        );
        Selector::parse("*:not(*)")
            .expect("Fallback selector '*:not(*)' should always parse - this is a programming error")
    })
}

/// Truncates a string to at most `max` characters.
///
/// Operates on characters, not bytes, so multi-byte input never panics.
pub fn truncate_chars(s: &str, max: usize) -> String {
    s.chars().take(max).collect()
}

/// Truncates a string to `max` characters, appending `"..."` when it was longer.
pub fn ellipsize(s: &str, max: usize) -> String {
    if s.chars().count() > max {
        let mut truncated = truncate_chars(s, max);
        truncated.push_str("...");
        truncated
    } else {
        s.to_string()
    }
}

/// Returns the last `n` characters of a string as a subslice.
pub fn char_tail(s: &str, n: usize) -> &str {
    let count = s.chars().count();
    if count <= n {
        return s;
    }
    match s.char_indices().nth(count - n) {
        Some((idx, _)) => &s[idx..],
        None => s,
    }
}
