//! Collaborator seams.
//!
//! Quill does not store snippets, persist results or know who is typing. A shell
//! plugs those in by implementing the traits below; the session and metrics code
//! never calls them, so they behave the same with or without an identity.

use std::sync::Arc;

use crate::{Language, Snippet, TypingResult};

/// Source of snippets to type
pub trait SnippetProvider {
    /// All languages the provider can be asked for
    fn languages(&self) -> Vec<Language>;

    /// A snippet for the language tag, or `None` if the language has no content
    fn random_snippet(&self, language: &str) -> Option<Arc<Snippet>>;
}

/// Somewhere completed results go
pub trait ResultSink {
    type Error: std::error::Error;

    /// Persist a result. `identity` is `None` for anonymous results.
    fn submit(&self, result: &TypingResult, identity: Option<&Identity>) -> Result<(), Self::Error>;
}

/// Submit a result without letting a failure reach the caller.
///
/// Persistence problems are logged and dropped; the typing session that produced
/// the result is never affected by them.
pub fn submit_detached<S: ResultSink + ?Sized>(
    sink: &S,
    result: &TypingResult,
    identity: Option<&Identity>,
) {
    match sink.submit(result, identity) {
        Ok(()) => tracing::debug!(snippet = %result.snippet_id, "result submitted"),
        Err(error) => tracing::warn!(snippet = %result.snippet_id, %error, "failed to submit result"),
    }
}

/// Read access to the best results
pub trait Leaderboard {
    type Error: std::error::Error;

    /// Best players first, at most `limit` entries
    fn top(&self, limit: usize) -> Result<Vec<LeaderboardEntry>, Self::Error>;
}

/// One ranked player
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LeaderboardEntry {
    pub player: String,
    pub avatar_url: Option<String>,
    pub highest_wpm: f64,
    pub highest_accuracy: f64,
    pub games_played: usize,
}

/// A logged-in user
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Identity {
    pub id: String,
    pub display_name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub avatar_url: Option<String>,
}

/// Authentication state change
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthEvent {
    SignedIn(Identity),
    SignedOut,
}

/// Supplies the optional current identity and reports changes to it
pub trait IdentityProvider {
    fn current(&self) -> Option<&Identity>;

    /// Take the next pending authentication change, if any
    fn poll_event(&mut self) -> Option<AuthEvent>;
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::fmt;

    use super::*;

    #[derive(Debug)]
    struct Unreachable;

    impl fmt::Display for Unreachable {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("sink unreachable")
        }
    }

    impl std::error::Error for Unreachable {}

    #[derive(Default)]
    struct Sink {
        fail: bool,
        submitted: RefCell<Vec<(String, Option<String>)>>,
    }

    impl ResultSink for Sink {
        type Error = Unreachable;

        fn submit(&self, result: &TypingResult, identity: Option<&Identity>) -> Result<(), Unreachable> {
            if self.fail {
                return Err(Unreachable);
            }
            self.submitted
                .borrow_mut()
                .push((result.snippet_id.clone(), identity.map(|i| i.id.clone())));
            Ok(())
        }
    }

    fn result() -> TypingResult {
        TypingResult {
            wpm: 42.0,
            accuracy: 100.0,
            elapsed_ms: 1_000,
            error_count: 0,
            language: "rust".to_string(),
            snippet_id: "rust1".to_string(),
            consistency: None,
        }
    }

    #[test]
    fn test_submit_detached() {
        let sink = Sink::default();
        let identity = Identity {
            id: "u1".to_string(),
            display_name: "someone".to_string(),
            avatar_url: None,
        };

        submit_detached(&sink, &result(), Some(&identity));
        submit_detached(&sink, &result(), None);

        let submitted = sink.submitted.borrow();
        assert_eq!(submitted.len(), 2);
        assert_eq!(submitted[0], ("rust1".to_string(), Some("u1".to_string())));
        assert_eq!(submitted[1].1, None);
    }

    #[test]
    fn test_submit_detached_swallows_failures() {
        let sink = Sink {
            fail: true,
            ..Default::default()
        };

        submit_detached(&sink, &result(), None);
        assert!(sink.submitted.borrow().is_empty());
    }
}
