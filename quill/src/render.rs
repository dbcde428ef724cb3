//! Read-only projections of a session for display.
//!
//! Shells either walk [`RenderingContext`]s one target character at a time, take
//! whole lines through [`TypingSession::render_lines`], or collapse a status map
//! into styled [`Segment`]s.

use crate::TypingSession;
use crate::diff::CharStatus;

/// One target character as it should be displayed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderingContext {
    pub character: char,
    pub status: CharStatus,
    /// The caret sits before this character
    pub has_cursor: bool,
    pub index: usize,
}

/// One line of the target
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineContext {
    pub line_index: usize,
    /// Distance to the caret line. Negative above it, zero on it.
    pub active_line_offset: isize,
    pub contents: Vec<RenderingContext>,
}

impl LineContext {
    pub fn is_active(&self) -> bool {
        self.active_line_offset == 0
    }
}

/// Iterator for rendering contexts
pub struct RenderingIterator<'a> {
    typing_session: &'a TypingSession,
    index: usize,
    cursor_position: usize,
}

impl<'a> From<&'a TypingSession> for RenderingIterator<'a> {
    fn from(value: &'a TypingSession) -> Self {
        Self {
            cursor_position: value.input_len(),
            index: 0,
            typing_session: value,
        }
    }
}

impl ExactSizeIterator for RenderingIterator<'_> {}

impl std::iter::FusedIterator for RenderingIterator<'_> {}

impl Iterator for RenderingIterator<'_> {
    type Item = RenderingContext;

    fn next(&mut self) -> Option<Self::Item> {
        let character = *self.typing_session.target().get(self.index)?;
        let status = self
            .typing_session
            .statuses()
            .get(self.index)
            .copied()
            .unwrap_or_default();

        let context = RenderingContext {
            character,
            status,
            has_cursor: self.index == self.cursor_position,
            index: self.index,
        };

        self.index += 1;
        Some(context)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.typing_session.text_len().saturating_sub(self.index);
        (remaining, Some(remaining))
    }
}

/// A run of target characters sharing one status
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    pub status: CharStatus,
    pub text: String,
    /// Char offset of the run in the target
    pub start: usize,
}

/// Collapse a per-character status map into runs.
///
/// Characters without a status are untyped.
///
/// ```rust
/// use quill::CharStatus;
/// use quill::render::segments;
///
/// let target: Vec<char> = "hello".chars().collect();
/// let runs = segments(&target, &[CharStatus::Correct, CharStatus::Correct, CharStatus::Incorrect]);
///
/// assert_eq!(runs.len(), 3);
/// assert_eq!(runs[0].text, "he");
/// assert_eq!(runs[2].text, "lo");
/// assert_eq!(runs[2].status, CharStatus::Untyped);
/// ```
pub fn segments(target: &[char], statuses: &[CharStatus]) -> Vec<Segment> {
    let mut runs: Vec<Segment> = Vec::new();

    for (index, &character) in target.iter().enumerate() {
        let status = statuses.get(index).copied().unwrap_or_default();
        match runs.last_mut() {
            Some(run) if run.status == status => run.text.push(character),
            _ => runs.push(Segment {
                status,
                text: character.to_string(),
                start: index,
            }),
        }
    }

    runs
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_segments() {
        let target: Vec<char> = "abcdef".chars().collect();
        let statuses = [
            CharStatus::Correct,
            CharStatus::Incorrect,
            CharStatus::Incorrect,
            CharStatus::Correct,
        ];

        let runs = segments(&target, &statuses);
        assert_eq!(
            runs,
            [
                Segment {
                    status: CharStatus::Correct,
                    text: "a".to_string(),
                    start: 0
                },
                Segment {
                    status: CharStatus::Incorrect,
                    text: "bc".to_string(),
                    start: 1
                },
                Segment {
                    status: CharStatus::Correct,
                    text: "d".to_string(),
                    start: 3
                },
                Segment {
                    status: CharStatus::Untyped,
                    text: "ef".to_string(),
                    start: 4
                },
            ]
        );
    }

    #[test]
    fn test_segments_empty() {
        assert!(segments(&[], &[]).is_empty());
        // Statuses past the target are ignored
        assert_eq!(segments(&['a'], &[CharStatus::Correct; 3]).len(), 1);
    }
}
