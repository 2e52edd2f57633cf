//! String utilities for the domain layer.

/// Keep at most `max_chars` characters of `s`.
///
/// Counts Unicode scalar values rather than bytes, so a prompt cap never
/// splits a multi-byte character.
pub fn take_chars(s: &str, max_chars: usize) -> &str {
    match s.char_indices().nth(max_chars) {
        Some((end, _)) => &s[..end],
        None => s,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_take_chars_shorter_input_is_unchanged() {
        assert_eq!(take_chars("hello", 10), "hello");
        assert_eq!(take_chars("", 3), "");
    }

    #[test]
    fn test_take_chars_counts_characters_not_bytes() {
        assert_eq!(take_chars("héllo wörld", 7), "héllo w");
        assert_eq!(take_chars("日本語テキスト", 3), "日本語");
    }

    #[test]
    fn test_take_chars_exact_length() {
        assert_eq!(take_chars("abc", 3), "abc");
        assert_eq!(take_chars("abc", 0), "");
    }
}
