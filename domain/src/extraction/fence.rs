//! Markdown code-fence removal.

const FENCE: &str = "```";

/// Remove a markdown code fence wrapping the whole response.
///
/// Handles an optional language tag (` ```json `) and fences on the same
/// line as the payload. Text that is not fence-wrapped is only trimmed.
/// Fences inside the payload are left alone.
pub fn strip_code_fences(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix(FENCE) else {
        return trimmed;
    };

    let tag_len = rest
        .find(|c: char| !(c.is_ascii_alphanumeric() || c == '-' || c == '_'))
        .unwrap_or(rest.len());
    let body = &rest[tag_len..];
    let body = body.strip_suffix(FENCE).unwrap_or(body);

    body.trim()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unfenced_text_is_trimmed() {
        assert_eq!(strip_code_fences("  {\"a\": 1}\n"), "{\"a\": 1}");
    }

    #[test]
    fn test_json_tagged_fence() {
        let text = "```json\n{\"a\": 1}\n```";
        assert_eq!(strip_code_fences(text), "{\"a\": 1}");
    }

    #[test]
    fn test_untagged_fence() {
        let text = "```\n{\"a\": 1}\n```\n";
        assert_eq!(strip_code_fences(text), "{\"a\": 1}");
    }

    #[test]
    fn test_single_line_fence() {
        assert_eq!(strip_code_fences("```json{\"a\": 1}```"), "{\"a\": 1}");
        assert_eq!(strip_code_fences("```{\"a\": 1}```"), "{\"a\": 1}");
    }

    #[test]
    fn test_missing_closing_fence() {
        assert_eq!(strip_code_fences("```json\n{\"a\": 1}"), "{\"a\": 1}");
    }

    #[test]
    fn test_inner_backticks_survive() {
        let text = "```json\n{\"code\": \"use ``` here\"}\n```";
        assert_eq!(strip_code_fences(text), "{\"code\": \"use ``` here\"}");
    }
}
