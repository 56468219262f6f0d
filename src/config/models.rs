//! Model identifier to context-window-size mapping.

pub const DEFAULT_MAX_TOKENS: u64 = 200_000;

/// Ordered substring table; first match wins, so longer identifiers must
/// come before their prefixes.
const MODEL_TOKEN_TABLE: &[(&str, u64)] = &[
    ("claude-opus-4-6", 1_000_000),
    ("opus-4-6", 1_000_000),
    ("claude-3-5-sonnet", 200_000),
    ("sonnet", 200_000),
    ("opus", 200_000),
    ("haiku", 200_000),
];

/// Look up the context window for a model identifier by case-insensitive
/// substring match. Unknown models fall back to [`DEFAULT_MAX_TOKENS`].
pub fn max_tokens_for_model(model: &str) -> u64 {
    let needle = model.to_lowercase();
    MODEL_TOKEN_TABLE
        .iter()
        .find(|(key, _)| needle.contains(key))
        .map(|(_, max)| *max)
        .unwrap_or(DEFAULT_MAX_TOKENS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opus_4_6_has_million_token_window() {
        assert_eq!(max_tokens_for_model("claude-opus-4-6"), 1_000_000);
    }

    #[test]
    fn sonnet_3_5_has_default_window() {
        assert_eq!(max_tokens_for_model("claude-3-5-sonnet"), 200_000);
    }

    #[test]
    fn unknown_model_falls_back_to_default() {
        assert_eq!(max_tokens_for_model("totally-unknown"), DEFAULT_MAX_TOKENS);
    }

    #[test]
    fn match_is_case_insensitive() {
        assert_eq!(max_tokens_for_model("Claude-Opus-4-6 (beta)"), 1_000_000);
    }

    #[test]
    fn longer_keys_win_over_prefixes() {
        // "opus-4-6" must not be shadowed by the plain "opus" entry
        assert_eq!(max_tokens_for_model("anthropic/opus-4-6"), 1_000_000);
        assert_eq!(max_tokens_for_model("anthropic/opus-4-1"), 200_000);
    }
}
