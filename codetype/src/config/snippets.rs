use std::path::{Path, PathBuf};

use derive_more::From;
use quill::{Language, Snippet};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The catalog shipped with the binary
pub const BUILTIN_SNIPPETS: &str = include_str!("../../assets/snippets.toml");

#[derive(Debug, From, Error)]
pub enum SnippetError {
    #[error("Failed to read snippets directory '{directory}': {error}")]
    #[from(skip)]
    ReadDirectory {
        directory: PathBuf,
        error: std::io::Error,
    },

    #[error("Failed to read file: {0}")]
    ReadFile(std::io::Error),

    #[error("Failed to parse snippet file '{path}': {error}")]
    #[from(skip)]
    ParseFile {
        path: PathBuf,
        error: Box<toml::de::Error>,
    },

    #[error("Failed to parse built-in snippets: {0}")]
    Builtin(Box<toml::de::Error>),
}

/// One TOML file of languages and snippets
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct SnippetFile {
    #[serde(default)]
    pub languages: Vec<Language>,
    #[serde(default)]
    pub snippets: Vec<Snippet>,
}

impl SnippetFile {
    pub fn builtin() -> Result<Self, SnippetError> {
        toml::from_str(BUILTIN_SNIPPETS).map_err(|error| SnippetError::Builtin(Box::new(error)))
    }
}

/// Read every `*.toml` file in `from_dir`, creating the directory if it is missing
pub fn get_snippet_files(from_dir: &Path) -> Result<Vec<SnippetFile>, SnippetError> {
    if !from_dir.exists() {
        std::fs::create_dir_all(from_dir)?;
    }

    let entries = from_dir
        .read_dir()
        .map_err(|error| SnippetError::ReadDirectory {
            directory: from_dir.to_path_buf(),
            error,
        })?;

    let mut paths = Vec::new();
    for entry in entries {
        let path = entry?.path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == "toml") {
            paths.push(path);
        }
    }
    // Directory order is unspecified; later files override earlier ones by id
    paths.sort();

    let mut files = Vec::with_capacity(paths.len());
    for path in paths {
        let content = std::fs::read_to_string(&path)?;
        let file: SnippetFile = toml::from_str(&content).map_err(|error| SnippetError::ParseFile {
            path: path.clone(),
            error: Box::new(error),
        })?;
        tracing::debug!(
            path = %path.display(),
            snippets = file.snippets.len(),
            "loaded snippet file"
        );
        files.push(file);
    }

    Ok(files)
}
