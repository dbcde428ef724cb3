//! Snippets and language options as handed out by a [`SnippetProvider`](crate::SnippetProvider).

use std::fmt;

use strum::{Display, EnumIter, EnumString};

/// How demanding a snippet is to type
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter)]
#[strum(serialize_all = "lowercase")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Difficulty {
    #[default]
    Easy,
    Medium,
    Hard,
}

/// An immutable piece of code to be typed.
///
/// Snippets are shared as `Arc<Snippet>` between the provider that owns them and
/// the sessions that type them. Nothing in this crate mutates a snippet.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Snippet {
    pub id: String,
    /// Language tag, e.g. `rust` or `javascript`
    pub language: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub difficulty: Difficulty,
    pub title: String,
    /// The target text, including embedded newlines
    pub code: String,
}

impl Snippet {
    pub fn new(
        id: impl Into<String>,
        language: impl Into<String>,
        difficulty: Difficulty,
        title: impl Into<String>,
        code: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            language: language.into(),
            difficulty,
            title: title.into(),
            code: code.into(),
        }
    }

    /// Number of lines in the code (a trailing newline opens an empty last line)
    pub fn line_count(&self) -> usize {
        self.code.split('\n').count()
    }

    /// A display path for the snippet, like `python/list_comprehension.py`
    ///
    /// ```rust
    /// use quill::{Difficulty, Snippet};
    ///
    /// let snippet = Snippet::new("py1", "python", Difficulty::Easy, "List Comprehension", "");
    /// assert_eq!(snippet.file_name(), "python/list_comprehension.py");
    /// ```
    pub fn file_name(&self) -> String {
        let stem = self
            .title
            .to_lowercase()
            .split_whitespace()
            .collect::<Vec<_>>()
            .join("_");
        let extension = match self.language.as_str() {
            "python" => "py",
            other => other,
        };
        format!("{}/{stem}.{extension}", self.language)
    }
}

/// A selectable language
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Language {
    /// The tag snippets are filed under
    pub id: String,
    /// Human readable name
    pub name: String,
}

impl Language {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}
