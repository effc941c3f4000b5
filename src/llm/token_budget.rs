//! Token estimation for LLM requests.
//!
//! Provides a lightweight heuristic to estimate token counts from text,
//! used both to decide whether a diff needs summarization at all and to
//! size the batches sent to the model.

/// Approximate characters per token for heuristic estimation.
///
/// One token per four characters is a reasonable average for English
/// prose mixed with code.
const CHARS_PER_TOKEN: usize = 4;

/// Estimates the token count for a text string using a character-based
/// heuristic.
///
/// Deterministic and monotonic: longer input never estimates fewer tokens.
#[must_use]
pub fn estimate_tokens(text: &str) -> usize {
    text.len() / CHARS_PER_TOKEN
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn estimate_tokens_empty_string() {
        assert_eq!(estimate_tokens(""), 0);
    }

    #[test]
    fn estimate_tokens_four_chars_per_token() {
        assert_eq!(estimate_tokens("abcd"), 1);
        assert_eq!(estimate_tokens("x".repeat(400).as_str()), 100);
    }

    #[test]
    fn estimate_tokens_rounds_down() {
        assert_eq!(estimate_tokens("abc"), 0);
        assert_eq!(estimate_tokens("abcde"), 1);
    }

    #[test]
    fn estimate_tokens_monotonic_in_length() {
        let mut prev = 0;
        for len in 0..256 {
            let tokens = estimate_tokens(&"y".repeat(len));
            assert!(tokens >= prev, "estimate shrank at length {len}");
            prev = tokens;
        }
    }

    #[test]
    fn estimate_tokens_idempotent() {
        let text = "diff --git a/src/lib.rs b/src/lib.rs\n+fn foo() {}\n";
        assert_eq!(estimate_tokens(text), estimate_tokens(text));
    }
}
