//! # Quill - measurement core for code typing-trainers
//!
//! Quill compares what a user types against a target code snippet and turns the
//! comparison into live and final speed/accuracy figures. It owns no UI: a shell
//! drives a [`TypingSession`] with input events and renders what the session
//! reports through the [`render`] projection.
//!
//! ## Components
//!
//! - [`diff`]: per-character classification and error counting
//! - [`math`]: words-per-minute, accuracy and consistency
//! - [`session`]: the Idle → Running → Completed state machine
//! - [`navigator`]: line table, caret lines and indentation-aware line breaks
//! - [`ticker`]: the cancellable live-stats refresh owned by a session
//! - [`provider`]: the collaborator seams (snippets, results, leaderboard, identity)
//!
//! ## Example
//!
//! ```rust
//! use std::sync::Arc;
//! use quill::{Difficulty, Phase, Snippet, TypingSession};
//!
//! let snippet = Arc::new(Snippet::new("js1", "javascript", Difficulty::Easy, "Demo", "abc"));
//! let mut session = TypingSession::new(snippet).unwrap();
//!
//! session.on_input("ab").unwrap();
//! assert_eq!(session.phase(), Phase::Running);
//!
//! session.on_input("abc").unwrap();
//! let result = session.result().unwrap();
//! assert_eq!(result.error_count, 0);
//! ```

pub mod config;
pub mod diff;
pub mod math;
pub mod navigator;
pub mod provider;
pub mod render;
pub mod session;
pub mod snippet;
pub mod ticker;

pub use config::{Configuration, ErrorCounting};
pub use diff::{CharStatus, classify, count_errors};
pub use math::{Consistency, accuracy, live_accuracy, wpm};
pub use navigator::{LineBreak, Navigator, find_next_content_line, line_for_offset};
pub use provider::{
    AuthEvent, Identity, IdentityProvider, Leaderboard, LeaderboardEntry, ResultSink,
    SnippetProvider,
};
pub use session::{LiveStats, Phase, SessionError, Transition, TypingResult, TypingSession};
pub use snippet::{Difficulty, Language, Snippet};

/// Characters per standardized "word"
pub const AVERAGE_WORD_LENGTH: usize = 5;

// Types for more general type-safety
type Minutes = f64;
type Milliseconds = u64;

// Get the minutes elapsed from a millisecond count
pub(crate) fn minutes(elapsed_ms: Milliseconds) -> Minutes {
    elapsed_ms as f64 / 60_000.0
}
