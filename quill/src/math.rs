//! Speed, accuracy and consistency calculations.
//!
//! Everything here is a pure function of its arguments.

use crate::diff::correct_count;
use crate::{AVERAGE_WORD_LENGTH, Milliseconds, minutes};

/// Words Per Minute
///
/// * `typed_len` - How many characters are in the input, wrong ones included
/// * `elapsed_ms` - How many milliseconds have gone by
///
/// Returns 0 when no time has passed.
///
/// ```rust
/// assert_eq!(quill::wpm(25, 60_000), 5.0);
/// assert_eq!(quill::wpm(25, 0), 0.0);
/// ```
pub fn wpm(typed_len: usize, elapsed_ms: Milliseconds) -> f64 {
    let minutes = minutes(elapsed_ms);
    if minutes <= 0.0 {
        return 0.0;
    }

    let words = typed_len as f64 / AVERAGE_WORD_LENGTH as f64;
    words / minutes
}

/// Typing accuracy against the whole target
///
/// Correct characters over the overlapping prefix, divided by the target length,
/// as a percentage between 0.0 - 100.0. An empty target is 100% accurate.
pub fn accuracy(target: &str, typed: &str) -> f64 {
    let target: Vec<char> = target.chars().collect();
    let typed: Vec<char> = typed.chars().collect();
    accuracy_chars(&target, &typed)
}

/// [`accuracy`] over pre-split characters
pub fn accuracy_chars(target: &[char], typed: &[char]) -> f64 {
    if target.is_empty() {
        return 100.0;
    }

    (correct_count(target, typed) as f64 / target.len() as f64) * 100.0
}

/// Typing accuracy of what has been typed so far
///
/// Correct characters divided by the input length, as a percentage between
/// 0.0 - 100.0. Empty input is 100% accurate. Used for mid-session readings,
/// where dividing by the target length would punish characters not reached yet.
pub fn live_accuracy(target: &str, typed: &str) -> f64 {
    let target: Vec<char> = target.chars().collect();
    let typed: Vec<char> = typed.chars().collect();
    live_accuracy_chars(&target, &typed)
}

/// [`live_accuracy`] over pre-split characters
pub fn live_accuracy_chars(target: &[char], typed: &[char]) -> f64 {
    if typed.is_empty() {
        return 100.0;
    }

    (correct_count(target, typed) as f64 / typed.len() as f64) * 100.0
}

/// Typing consistency (standard deviation of WPM samples)
///
/// Consistency describes the stability of typing speed over time.
#[derive(Debug, Default, Clone, Copy, PartialEq, PartialOrd)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Consistency {
    /// Population standard deviation of the samples
    pub deviation: f64,
    /// Consistency as a percentage (0.0 - 100.0), higher is steadier
    pub percent: f64,
}

impl Consistency {
    /// Calculate typing consistency from WPM samples
    pub fn calculate(samples: &[f64]) -> Self {
        let deviation = Self::calculate_std_dev(samples);

        Self {
            deviation,
            percent: Self::cv_to_percentage(deviation, Self::calculate_mean(samples)),
        }
    }

    fn calculate_std_dev(values: &[f64]) -> f64 {
        if values.len() <= 1 {
            return 0.0;
        }

        // Welford's online algorithm
        let mut mean = 0.0;
        let mut m2 = 0.0;

        for (i, &value) in values.iter().enumerate() {
            let delta = value - mean;
            mean += delta / (i + 1) as f64;
            let delta2 = value - mean;
            m2 += delta * delta2;
        }

        let variance = m2 / values.len() as f64;
        variance.sqrt()
    }

    fn calculate_mean(values: &[f64]) -> f64 {
        if values.is_empty() {
            0.0
        } else {
            values.iter().sum::<f64>() / values.len() as f64
        }
    }

    fn cv_to_percentage(std_dev: f64, mean: f64) -> f64 {
        if mean == 0.0 {
            return 100.0;
        }
        let cv = std_dev / mean;
        ((1.0 - cv.min(1.0)) * 100.0).max(0.0)
    }
}
