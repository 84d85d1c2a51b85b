//! Character-safe output truncation.

/// Keep at most `max_chars` characters of `s`.
///
/// Counts `char`s, not bytes, so multi-byte text is never split.
///
/// # Examples
///
/// ```
/// use termpipe_tools::truncate_chars;
///
/// assert_eq!(truncate_chars("hello world", 5), "hello");
/// assert_eq!(truncate_chars("añ€🦀", 3), "añ€");
/// ```
#[must_use]
pub fn truncate_chars(s: &str, max_chars: usize) -> &str {
    match s.char_indices().nth(max_chars) {
        Some((byte_end, _)) => &s[..byte_end],
        None => s,
    }
}

/// Cap tool output at `max_chars` characters, noting the original size.
#[must_use]
pub fn truncate_output(output: String, max_chars: usize) -> String {
    let kept = truncate_chars(&output, max_chars);
    if kept.len() == output.len() {
        return output;
    }
    let total = output.chars().count();
    format!("{kept}\n\n[... truncated, {total} total chars]")
}
