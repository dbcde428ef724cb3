//! # Session Module - One timed attempt at a snippet
//!
//! A [`TypingSession`] owns the input buffer for a single snippet and moves
//! through three phases. Every input recomputes the diff against the target;
//! the input that makes the buffer exactly as long as the target finishes the
//! session and produces its [`TypingResult`].
//!
//! ## Session Lifecycle
//!
#![doc = simple_mermaid::mermaid!("../diagrams/session_lifecycle.mmd")]
//!
//! ## Usage Examples
//!
//! ### Whole-buffer input
//!
//! Shells that own a text field hand the full field contents to the session:
//!
//! ```rust
//! use std::sync::Arc;
//! use quill::{Difficulty, Phase, Snippet, Transition, TypingSession};
//!
//! let snippet = Arc::new(Snippet::new("s", "rust", Difficulty::Easy, "s", "abc"));
//! let mut session = TypingSession::new(snippet).unwrap();
//!
//! assert!(matches!(session.on_input("a").unwrap(), Transition::Started));
//! assert!(matches!(session.on_input("ab").unwrap(), Transition::Progressed));
//! assert!(matches!(session.on_input("abc").unwrap(), Transition::Completed(_)));
//! assert_eq!(session.phase(), Phase::Completed);
//!
//! // A completed session refuses further input
//! assert!(session.on_input("abcd").is_err());
//! ```
//!
//! ### Keystrokes
//!
//! ```rust
//! use std::sync::Arc;
//! use quill::{Difficulty, Snippet, TypingSession};
//!
//! let snippet = Arc::new(Snippet::new("s", "rust", Difficulty::Easy, "s", "if x {\n    y\n}"));
//! let mut session = TypingSession::new(snippet).unwrap();
//!
//! for c in "if x {".chars() {
//!     session.type_char(c).unwrap();
//! }
//! // The line break supplies the indentation of the next line
//! session.line_break().unwrap();
//! assert_eq!(session.input_string(), "if x {\n    ");
//! assert_eq!(session.active_line(), 1);
//! ```

use std::sync::Arc;

use strum::Display;
use thiserror::Error;
use web_time::Instant;

use crate::config::Configuration;
use crate::diff::{CharStatus, classify_chars, count_errors_chars};
use crate::math::{Consistency, accuracy_chars, live_accuracy_chars, wpm};
use crate::navigator::Navigator;
use crate::render::{LineContext, RenderingContext, RenderingIterator};
use crate::snippet::Snippet;
use crate::ticker::Ticker;
use crate::Milliseconds;

/// Where a session is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum Phase {
    /// No input yet
    Idle,
    /// The first character was received and the clock is running
    Running,
    /// The input reached the length of the target
    Completed,
}

/// Illegal calls on a session
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("Snippet '{0}' has no code to type")]
    EmptyTarget(String),

    #[error("The session is completed and accepts no more input")]
    Completed,
}

/// What an accepted input did to the session
#[derive(Debug, Clone, PartialEq)]
pub enum Transition {
    /// Still idle, the input was empty
    Idle,
    /// The session started running with this input
    Started,
    /// The input was updated while running
    Progressed,
    /// The session completed with this input
    Completed(TypingResult),
}

/// Final figures of a completed session.
///
/// A value snapshot taken once at completion, with no link back to the session.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TypingResult {
    pub wpm: f64,
    /// Percentage between 0.0 - 100.0
    pub accuracy: f64,
    pub elapsed_ms: Milliseconds,
    pub error_count: usize,
    pub language: String,
    pub snippet_id: String,
    /// Steadiness of the live WPM samples, if any were taken
    #[cfg_attr(feature = "serde", serde(default))]
    pub consistency: Option<Consistency>,
}

/// A live reading of a running session
#[derive(Debug, Default, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LiveStats {
    pub wpm: f64,
    /// Accuracy of the input so far, see [`live_accuracy`](crate::live_accuracy)
    pub accuracy: f64,
    pub elapsed_ms: Milliseconds,
    pub error_count: usize,
}

/// A single attempt at typing a snippet
///
/// # Examples
///
/// ```rust
/// use std::sync::Arc;
/// use quill::{Difficulty, Snippet, TypingSession};
///
/// let snippet = Arc::new(Snippet::new("s", "go", Difficulty::Easy, "s", "hi"));
/// let mut session = TypingSession::new(snippet).unwrap();
///
/// session.type_char('h').unwrap();
/// session.type_char('o').unwrap();
///
/// let result = session.result().unwrap();
/// assert_eq!(result.error_count, 1);
/// assert_eq!(result.accuracy, 50.0);
/// ```
#[derive(Debug, Clone)]
pub struct TypingSession {
    snippet: Arc<Snippet>,
    /// The snippet code split into characters
    target: Vec<char>,
    navigator: Navigator,
    input: Vec<char>,
    statuses: Vec<CharStatus>,
    error_count: usize,
    started_at: Option<Instant>,
    ended_at: Option<Instant>,
    result: Option<TypingResult>,
    ticker: Ticker,
    /// Live readings taken on each tick
    samples: Vec<LiveStats>,
    config: Configuration,
}

impl TypingSession {
    /// Create a new idle session for the snippet
    ///
    /// Fails with [`SessionError::EmptyTarget`] if the snippet has no code.
    pub fn new(snippet: Arc<Snippet>) -> Result<Self, SessionError> {
        if snippet.code.is_empty() {
            return Err(SessionError::EmptyTarget(snippet.id.clone()));
        }

        let target: Vec<char> = snippet.code.chars().collect();
        let config = Configuration::default();

        Ok(Self {
            navigator: Navigator::new(&snippet.code),
            statuses: vec![CharStatus::Untyped; target.len()],
            target,
            snippet,
            input: Vec::new(),
            error_count: 0,
            started_at: None,
            ended_at: None,
            result: None,
            ticker: Ticker::new(config.tick_interval),
            samples: Vec::new(),
            config,
        })
    }

    /// Configure the session with custom settings (builder pattern)
    pub fn with_configuration(mut self, config: Configuration) -> Self {
        self.ticker = Ticker::new(config.tick_interval);
        self.config = config;
        self
    }

    pub fn snippet(&self) -> &Arc<Snippet> {
        &self.snippet
    }

    pub fn configuration(&self) -> &Configuration {
        &self.config
    }

    pub fn navigator(&self) -> &Navigator {
        &self.navigator
    }

    pub fn phase(&self) -> Phase {
        match (self.started_at, self.ended_at) {
            (_, Some(_)) => Phase::Completed,
            (Some(_), None) => Phase::Running,
            (None, None) => Phase::Idle,
        }
    }

    pub fn is_completed(&self) -> bool {
        self.ended_at.is_some()
    }

    pub fn target(&self) -> &[char] {
        &self.target
    }

    /// The number of characters in the target
    pub fn text_len(&self) -> usize {
        self.target.len()
    }

    pub fn input(&self) -> &[char] {
        &self.input
    }

    pub fn input_string(&self) -> String {
        self.input.iter().collect()
    }

    pub fn input_len(&self) -> usize {
        self.input.len()
    }

    /// Characters typed past the end of the target
    pub fn overrun(&self) -> &[char] {
        self.input.get(self.target.len()..).unwrap_or_default()
    }

    /// Status of each target character
    pub fn statuses(&self) -> &[CharStatus] {
        &self.statuses
    }

    pub const fn error_count(&self) -> usize {
        self.error_count
    }

    pub const fn started_at(&self) -> Option<Instant> {
        self.started_at
    }

    pub const fn ended_at(&self) -> Option<Instant> {
        self.ended_at
    }

    /// The result, once the session is completed
    pub fn result(&self) -> Option<&TypingResult> {
        self.result.as_ref()
    }

    /// Live readings taken so far
    pub fn samples(&self) -> &[LiveStats] {
        &self.samples
    }

    /// Line the caret is on
    pub fn active_line(&self) -> usize {
        self.navigator.line_for_offset(self.input.len())
    }

    /// How much of the target has been typed, between 0.0 and 100.0
    pub fn completion_percentage(&self) -> f64 {
        let percent = (self.input.len() as f64 / self.target.len() as f64) * 100.0;
        percent.min(100.0)
    }

    /// Milliseconds from the first input to completion, or to `now` while running
    pub fn elapsed_ms(&self, now: Instant) -> Milliseconds {
        let elapsed = match (self.started_at, self.ended_at) {
            (Some(start), Some(end)) => end.saturating_duration_since(start),
            (Some(start), None) => now.saturating_duration_since(start),
            (None, _) => return 0,
        };

        Milliseconds::try_from(elapsed.as_millis()).unwrap_or(Milliseconds::MAX)
    }

    /// Replace the input with `input`, timestamped now
    pub fn on_input(&mut self, input: &str) -> Result<Transition, SessionError> {
        self.on_input_at(input, Instant::now())
    }

    /// Replace the input with `input`, as of `now`
    pub fn on_input_at(&mut self, input: &str, now: Instant) -> Result<Transition, SessionError> {
        self.apply(input.chars().collect(), now)
    }

    pub fn type_char(&mut self, character: char) -> Result<Transition, SessionError> {
        self.type_char_at(character, Instant::now())
    }

    /// Append one character to the input
    pub fn type_char_at(&mut self, character: char, now: Instant) -> Result<Transition, SessionError> {
        let mut input = self.input.clone();
        input.push(character);
        self.apply(input, now)
    }

    pub fn backspace(&mut self) -> Result<Transition, SessionError> {
        self.backspace_at(Instant::now())
    }

    /// Remove the last character of the input. A no-op on empty input.
    pub fn backspace_at(&mut self, now: Instant) -> Result<Transition, SessionError> {
        let mut input = self.input.clone();
        input.pop();
        self.apply(input, now)
    }

    pub fn line_break(&mut self) -> Result<Transition, SessionError> {
        self.line_break_at(Instant::now())
    }

    /// Break the line like an auto-indenting editor would.
    ///
    /// At the end of a target line the input receives the newline, any skipped
    /// blank lines and the indentation of the landing line. Anywhere else the
    /// newline is typed literally and judged like any other character.
    pub fn line_break_at(&mut self, now: Instant) -> Result<Transition, SessionError> {
        let mut input = self.input.clone();
        match self
            .navigator
            .line_break(input.len(), self.config.skip_blank_lines)
        {
            Some(jump) => {
                tracing::trace!(line = jump.line, caret = jump.caret, "line break jump");
                input.extend(jump.insertion.chars());
            }
            None => input.push('\n'),
        }
        self.apply(input, now)
    }

    fn apply(&mut self, input: Vec<char>, now: Instant) -> Result<Transition, SessionError> {
        if self.is_completed() {
            tracing::trace!(snippet = %self.snippet.id, "input rejected after completion");
            return Err(SessionError::Completed);
        }

        let mut transition = Transition::Progressed;
        if self.started_at.is_none() {
            if input.is_empty() {
                transition = Transition::Idle;
            } else {
                self.started_at = Some(now);
                self.ticker.arm(now);
                transition = Transition::Started;
                tracing::debug!(snippet = %self.snippet.id, "session started");
            }
        }

        self.error_count = count_errors_chars(&self.target, &input, self.config.error_counting);
        self.statuses = classify_chars(&self.target, &input);
        self.input = input;

        if self.input.len() == self.target.len() {
            self.ended_at = Some(now);
            self.ticker.cancel();

            let result = self.make_result();
            tracing::info!(
                snippet = %result.snippet_id,
                wpm = result.wpm,
                accuracy = result.accuracy,
                errors = result.error_count,
                "session completed"
            );
            self.result = Some(result.clone());
            return Ok(Transition::Completed(result));
        }

        Ok(transition)
    }

    fn make_result(&self) -> TypingResult {
        let elapsed_ms = self.elapsed_ms(self.ended_at.unwrap_or_else(Instant::now));
        let consistency = (!self.samples.is_empty()).then(|| {
            let wpms: Vec<f64> = self.samples.iter().map(|sample| sample.wpm).collect();
            Consistency::calculate(&wpms)
        });

        TypingResult {
            wpm: wpm(self.input.len(), elapsed_ms),
            accuracy: accuracy_chars(&self.target, &self.input),
            elapsed_ms,
            error_count: self.error_count,
            language: self.snippet.language.clone(),
            snippet_id: self.snippet.id.clone(),
            consistency,
        }
    }

    /// Current speed and accuracy as of `now`
    pub fn live_stats_at(&self, now: Instant) -> LiveStats {
        let elapsed_ms = self.elapsed_ms(now);

        LiveStats {
            wpm: wpm(self.input.len(), elapsed_ms),
            accuracy: live_accuracy_chars(&self.target, &self.input),
            elapsed_ms,
            error_count: self.error_count,
        }
    }

    /// Poll the live-stats ticker.
    ///
    /// Returns a fresh reading when a tick is due and the session is running,
    /// and records it as a sample.
    pub fn poll_tick(&mut self, now: Instant) -> Option<LiveStats> {
        if self.phase() != Phase::Running || !self.ticker.poll(now) {
            return None;
        }

        let stats = self.live_stats_at(now);
        self.samples.push(stats);
        Some(stats)
    }

    /// Whether the live-stats ticker is currently armed
    pub fn is_ticking(&self) -> bool {
        self.ticker.is_armed()
    }

    /// Return to idle with an empty input, keeping the snippet
    pub fn reset(&mut self) {
        self.input.clear();
        self.statuses = vec![CharStatus::Untyped; self.target.len()];
        self.error_count = 0;
        self.started_at = None;
        self.ended_at = None;
        self.result = None;
        self.ticker.cancel();
        self.samples.clear();
        tracing::debug!(snippet = %self.snippet.id, "session reset");
    }
}

// Rendering
impl TypingSession {
    /// Render every target character with a generic renderer function
    pub fn render<Char, F: FnMut(RenderingContext) -> Char>(&self, renderer: F) -> Vec<Char> {
        self.render_iter().map(renderer).collect()
    }

    /// Create an iterator over rendering contexts
    pub fn render_iter(&self) -> RenderingIterator<'_> {
        self.into()
    }

    /// Render the target line by line.
    ///
    /// Lines break after each newline of the target, the newline being the last
    /// context of its line. Returning `None` from the renderer drops the line.
    pub fn render_lines<Line, F: FnMut(LineContext) -> Option<Line>>(
        &self,
        mut line_renderer: F,
    ) -> Vec<Line> {
        let cursor_line = self.active_line() as isize;
        let mut contexts = self.render_iter();
        let mut lines = Vec::with_capacity(self.navigator.line_count());

        for line_index in 0..self.navigator.line_count() {
            let mut contents = Vec::new();
            for context in contexts.by_ref() {
                let is_newline = context.character == '\n';
                contents.push(context);
                if is_newline {
                    break;
                }
            }

            let line_context = LineContext {
                line_index,
                active_line_offset: line_index as isize - cursor_line,
                contents,
            };

            if let Some(line) = line_renderer(line_context) {
                lines.push(line);
            }
        }

        lines
    }
}
