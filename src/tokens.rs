//! Token counting heuristics and context-window usage.

/// Estimate the token count of a text blob.
///
/// Whitespace runs collapse to single spaces before counting; the estimate
/// is one token per four characters, rounded up. This is a coarse heuristic
/// used only when the host does not report authoritative counters.
pub fn estimate_tokens(text: &str) -> u64 {
    let collapsed = text.split_whitespace().collect::<Vec<_>>().join(" ");
    (collapsed.chars().count() as u64).div_ceil(4)
}

/// Context-window usage: current tokens against a configured maximum.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenUsage {
    pub current: u64,
    pub max: u64,
    pub percentage: u8,
}

impl TokenUsage {
    /// Compute usage from a raw token count.
    ///
    /// `current` is clamped to `max` before the percentage is computed, so
    /// the percentage is always in 0..=100. The config resolver guarantees
    /// a positive maximum; a zero is still defended against here.
    pub fn compute(current: u64, max: u64) -> Self {
        let max = max.max(1);
        let current = current.min(max);
        let percentage = ((current as f64 / max as f64) * 100.0).round() as u8;
        Self {
            current,
            max,
            percentage,
        }
    }

    /// Compute usage from a text blob via the character heuristic.
    pub fn from_text(text: &str, max: u64) -> Self {
        Self::compute(estimate_tokens(text), max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn estimate_empty_is_zero() {
        assert_eq!(estimate_tokens(""), 0);
        assert_eq!(estimate_tokens("   \n\t  "), 0);
    }

    #[test]
    fn estimate_rounds_up() {
        assert_eq!(estimate_tokens("abcd"), 1);
        assert_eq!(estimate_tokens("abcde"), 2);
        assert_eq!(estimate_tokens("a"), 1);
    }

    #[test]
    fn estimate_collapses_whitespace() {
        // "a    b" collapses to "a b" (3 chars) -> 1 token
        assert_eq!(estimate_tokens("a    b"), 1);
        assert_eq!(estimate_tokens("a\n\n\t b"), 1);
    }

    #[test]
    fn estimate_counts_chars_not_bytes() {
        // four multi-byte chars are still four chars -> 1 token
        assert_eq!(estimate_tokens("éééé"), 1);
    }

    #[test]
    fn compute_basic_percentage() {
        let usage = TokenUsage::compute(100_000, 200_000);
        assert_eq!(usage.percentage, 50);
    }

    #[test]
    fn compute_rounds_to_nearest() {
        // 1/3 -> 33.33 -> 33; 2/3 -> 66.67 -> 67
        assert_eq!(TokenUsage::compute(1, 3).percentage, 33);
        assert_eq!(TokenUsage::compute(2, 3).percentage, 67);
    }

    #[test]
    fn compute_clamps_over_max() {
        let usage = TokenUsage::compute(300_000, 200_000);
        assert_eq!(usage.current, 200_000);
        assert_eq!(usage.percentage, 100);
    }

    #[test]
    fn compute_zero_max_does_not_divide_by_zero() {
        let usage = TokenUsage::compute(10, 0);
        assert_eq!(usage.percentage, 100);
    }

    #[test]
    fn from_text_runs_estimator() {
        let usage = TokenUsage::from_text("abcdefgh", 2);
        assert_eq!(usage.current, 2);
        assert_eq!(usage.percentage, 100);
    }
}
