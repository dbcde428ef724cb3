//! # Configuration Module - Runtime Behavior Settings
//!
//! Settings that change how a [`TypingSession`](crate::TypingSession) measures and
//! navigates. Every field has a default matching the behavior users of a typing
//! test expect.
//!
//! ## Usage
//!
//! ```rust
//! use std::time::Duration;
//! use quill::config::{Configuration, ErrorCounting};
//!
//! // Use default configuration
//! let config = Configuration::default();
//! assert_eq!(config.tick_interval, Duration::from_millis(500));
//!
//! // Custom configuration
//! let config = Configuration {
//!     tick_interval: Duration::from_millis(250),
//!     skip_blank_lines: false,
//!     error_counting: ErrorCounting::LengthDelta,
//! };
//! ```

use std::time::Duration;

use strum::{Display, EnumString};

/// How the error count treats a length difference between target and input
///
/// Both strategies count mismatches over the overlapping prefix. They only
/// disagree while the input is shorter than the target, so a completed session
/// reports the same count under either one.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ErrorCounting {
    /// Characters typed past the end of the target are errors, untyped ones are not
    #[default]
    Overrun,
    /// Any length difference counts, including characters not typed yet
    LengthDelta,
}

/// Runtime configuration for a typing session
#[derive(Debug, Clone, PartialEq)]
pub struct Configuration {
    /// Interval between live WPM/accuracy refreshes while a session is running
    ///
    /// **Default**: 500ms
    pub tick_interval: Duration,

    /// Whether a line break jumps over blank and whitespace-only lines
    ///
    /// **Default**: true
    pub skip_blank_lines: bool,

    /// Error counting strategy, see [`ErrorCounting`]
    ///
    /// **Default**: [`ErrorCounting::Overrun`]
    pub error_counting: ErrorCounting,
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            tick_interval: Duration::from_millis(500),
            skip_blank_lines: true,
            error_counting: ErrorCounting::default(),
        }
    }
}
