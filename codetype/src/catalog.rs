use std::collections::HashMap;
use std::sync::Arc;

use quill::{Language, Snippet, SnippetProvider};
use rand::seq::IndexedRandom;

use crate::config::snippets::{SnippetError, SnippetFile};

/// All snippets known to the app, grouped by language
#[derive(Debug, Default)]
pub struct Catalog {
    /// In listing order
    languages: Vec<Language>,
    snippets: HashMap<String, Vec<Arc<Snippet>>>,
}

impl Catalog {
    /// The catalog shipped with the binary
    pub fn builtin() -> Result<Self, SnippetError> {
        let mut catalog = Self::default();
        catalog.extend(SnippetFile::builtin()?);
        Ok(catalog)
    }

    /// Merge a snippet file into the catalog.
    ///
    /// Languages keep their first listing position; a later name wins. A
    /// snippet replaces an earlier one with the same id in the same language.
    /// Snippets of unlisted languages list the language under its tag.
    pub fn extend(&mut self, file: SnippetFile) {
        for language in file.languages {
            self.add_language(language);
        }

        for snippet in file.snippets {
            if snippet.code.is_empty() {
                tracing::warn!(snippet = %snippet.id, "skipping snippet without code");
                continue;
            }

            if self.language(&snippet.language).is_none() {
                self.add_language(Language::new(&snippet.language, &snippet.language));
            }

            let snippets = self.snippets.entry(snippet.language.clone()).or_default();
            match snippets.iter_mut().find(|existing| existing.id == snippet.id) {
                Some(existing) => *existing = Arc::new(snippet),
                None => snippets.push(Arc::new(snippet)),
            }
        }
    }

    fn add_language(&mut self, language: Language) {
        match self.languages.iter_mut().find(|known| known.id == language.id) {
            Some(known) => known.name = language.name,
            None => self.languages.push(language),
        }
    }

    pub fn language(&self, id: &str) -> Option<&Language> {
        self.languages.iter().find(|language| language.id == id)
    }

    pub fn snippet_count(&self, language: &str) -> usize {
        self.snippets.get(language).map_or(0, Vec::len)
    }

    /// A random snippet for `language`, or one for `fallback` if it has none
    pub fn snippet_or_fallback(&self, language: &str, fallback: &str) -> Option<Arc<Snippet>> {
        self.random_snippet(language).or_else(|| {
            tracing::warn!(language, fallback, "no snippets for language, falling back");
            self.random_snippet(fallback)
        })
    }
}

impl SnippetProvider for Catalog {
    fn languages(&self) -> Vec<Language> {
        self.languages.clone()
    }

    fn random_snippet(&self, language: &str) -> Option<Arc<Snippet>> {
        self.snippets
            .get(language)?
            .choose(&mut rand::rng())
            .cloned()
    }
}
