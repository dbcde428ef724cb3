//! # Diff Module - Character-level comparison
//!
//! Compares a target text against what has been typed so far. Comparison is
//! positional: the `i`-th typed character is checked against the `i`-th target
//! character, there is no alignment or edit-distance search.
//!
//! All lengths and indices are in `char`s, so multi-byte characters count once.
//!
//! ```rust
//! use quill::diff::{CharStatus, classify, count_errors};
//!
//! let statuses = classify("abc", "abd");
//! assert_eq!(statuses, [CharStatus::Correct, CharStatus::Correct, CharStatus::Incorrect]);
//! assert_eq!(count_errors("abc", "abd"), 1);
//! ```

use crate::config::ErrorCounting;

/// Correctness of one target character, given the input so far
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CharStatus {
    /// Not reached by the input yet
    #[default]
    Untyped,
    Correct,
    Incorrect,
}

impl CharStatus {
    /// Returns true if the character has been typed, correctly or not
    pub const fn is_typed(self) -> bool {
        !matches!(self, Self::Untyped)
    }
}

/// Classify every character of `target` against `typed`.
///
/// The result always has one entry per target character. Input beyond the end
/// of the target has no entry; it is accounted for by [`count_errors`].
pub fn classify(target: &str, typed: &str) -> Vec<CharStatus> {
    let target: Vec<char> = target.chars().collect();
    let typed: Vec<char> = typed.chars().collect();
    classify_chars(&target, &typed)
}

/// [`classify`] over pre-split characters
pub fn classify_chars(target: &[char], typed: &[char]) -> Vec<CharStatus> {
    target
        .iter()
        .enumerate()
        .map(|(index, expected)| match typed.get(index) {
            None => CharStatus::Untyped,
            Some(actual) if actual == expected => CharStatus::Correct,
            Some(_) => CharStatus::Incorrect,
        })
        .collect()
}

/// Count errors in `typed` using [`ErrorCounting::Overrun`].
///
/// A strict prefix of the target has no errors; every mismatch and every
/// character typed past the end of the target is one error.
pub fn count_errors(target: &str, typed: &str) -> usize {
    count_errors_with(target, typed, ErrorCounting::Overrun)
}

/// Count errors in `typed` with an explicit strategy
pub fn count_errors_with(target: &str, typed: &str, counting: ErrorCounting) -> usize {
    let target: Vec<char> = target.chars().collect();
    let typed: Vec<char> = typed.chars().collect();
    count_errors_chars(&target, &typed, counting)
}

/// [`count_errors_with`] over pre-split characters
pub fn count_errors_chars(target: &[char], typed: &[char], counting: ErrorCounting) -> usize {
    let mismatches = target
        .iter()
        .zip(typed)
        .filter(|(expected, actual)| expected != actual)
        .count();

    let length_errors = match counting {
        ErrorCounting::Overrun => typed.len().saturating_sub(target.len()),
        ErrorCounting::LengthDelta => target.len().abs_diff(typed.len()),
    };

    mismatches + length_errors
}

/// Number of positions in the overlapping prefix where `typed` matches `target`
pub fn correct_count(target: &[char], typed: &[char]) -> usize {
    target
        .iter()
        .zip(typed)
        .filter(|(expected, actual)| expected == actual)
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_lengths() {
        let cases = [
            ("", ""),
            ("abc", ""),
            ("abc", "a"),
            ("abc", "abc"),
            ("abc", "abcdef"),
            ("fn main() {\n}", "fn"),
        ];

        for (target, typed) in cases {
            assert_eq!(
                classify(target, typed).len(),
                target.chars().count(),
                "target {target:?} typed {typed:?}"
            );
        }
    }

    #[test]
    fn test_classify_statuses() {
        use CharStatus::*;

        assert_eq!(classify("abc", ""), [Untyped, Untyped, Untyped]);
        assert_eq!(classify("abc", "ab"), [Correct, Correct, Untyped]);
        assert_eq!(classify("abc", "xbz"), [Incorrect, Correct, Incorrect]);
        // Overrun has no target index to land on
        assert_eq!(classify("ab", "abcd"), [Correct, Correct]);
    }

    #[test]
    fn test_classify_unicode() {
        use CharStatus::*;

        assert_eq!(classify("café", "cafe"), [Correct, Correct, Correct, Incorrect]);
        assert_eq!(classify("🚀x", "🚀"), [Correct, Untyped]);
    }

    #[test]
    fn test_count_errors() {
        assert_eq!(count_errors("abc", "abc"), 0);
        assert_eq!(count_errors("abc", "abd"), 1);
        assert_eq!(count_errors("abc", "xyz"), 3);

        // Strict prefixes are error free
        assert_eq!(count_errors("abc", ""), 0);
        assert_eq!(count_errors("abc", "a"), 0);
        assert_eq!(count_errors("abc", "ab"), 0);

        // Overrun counts once per extra character
        assert_eq!(count_errors("abc", "abcde"), 2);
        assert_eq!(count_errors("abc", "abxde"), 3);
    }

    #[test]
    fn test_count_errors_length_delta() {
        let counting = ErrorCounting::LengthDelta;

        assert_eq!(count_errors_with("abc", "abc", counting), 0);
        // Untyped characters count while the input is short
        assert_eq!(count_errors_with("abc", "a", counting), 2);
        assert_eq!(count_errors_with("abc", "x", counting), 3);
        assert_eq!(count_errors_with("abc", "abcde", counting), 2);
    }

    #[test]
    fn test_strategies_agree_on_equal_lengths() {
        let cases = [("abc", "abd"), ("hello", "jello"), ("a\n  b", "a\n\tb")];

        for (target, typed) in cases {
            assert_eq!(
                count_errors_with(target, typed, ErrorCounting::Overrun),
                count_errors_with(target, typed, ErrorCounting::LengthDelta),
            );
        }
    }

    #[test]
    fn test_correct_count() {
        let target: Vec<char> = "hello".chars().collect();
        let typed: Vec<char> = "hxllo world".chars().collect();
        assert_eq!(correct_count(&target, &typed), 4);
        assert_eq!(correct_count(&target, &[]), 0);
    }
}
