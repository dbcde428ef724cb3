use std::path::{Path, PathBuf};
use std::time::Duration;

use derive_more::From;
use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use quill::{ErrorCounting, Identity};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::catalog::Catalog;

pub mod results;
pub mod snippets;
pub mod theme;

pub use results::ResultsConfig;

const SETTINGS_FILE: &str = "settings.toml";
const ENV_PREFIX: &str = "CODETYPE_";

#[derive(Debug, Deserialize, Serialize)]
#[serde(default)]
pub struct Settings {
    pub theme: theme::Theme,
    /// Language preselected in the menu
    pub default_language: String,
    /// Language used when the chosen one has no snippets
    pub fallback_language: String,
    pub tick_interval_ms: u64,
    pub skip_blank_lines: bool,
    pub error_counting: ErrorCounting,
    pub snippets_dir: Option<PathBuf>,
    pub results: ResultsConfig,
    /// Local profile used when signed in
    pub profile: Option<Identity>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            theme: theme::Theme::default(),
            default_language: "javascript".to_string(),
            fallback_language: "javascript".to_string(),
            tick_interval_ms: 500,
            skip_blank_lines: true,
            error_counting: ErrorCounting::default(),
            snippets_dir: None,
            results: ResultsConfig::default(),
            profile: None,
        }
    }
}

impl Settings {
    /// Defaults, then `settings.toml` in `directory`, then `CODETYPE_*` variables
    fn figment(directory: &Path) -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        let settings_toml = directory.join(SETTINGS_FILE);
        if settings_toml.exists() {
            figment = figment.merge(Toml::file(settings_toml));
        }

        figment.merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    /// Configuration for the typing sessions
    pub fn session_configuration(&self) -> quill::Configuration {
        quill::Configuration {
            tick_interval: Duration::from_millis(self.tick_interval_ms),
            skip_blank_lines: self.skip_blank_lines,
            error_counting: self.error_counting,
        }
    }
}

#[derive(Debug, From, Error)]
pub enum ConfigError {
    #[error(
        "Failed to get configuration directory. Please specify the location using the `--config <path>` flag"
    )]
    NoDirectory,

    #[error("Failed to create config directory: {0}")]
    CreateDirectory(std::io::Error),

    #[error("Failed to parse config: {0}")]
    Parse(Box<figment::Error>),

    #[error("Failed to load snippets: {0}")]
    Snippets(snippets::SnippetError),
}

/// The configuration directory, created if missing
pub fn directory(override_path: Option<PathBuf>) -> Result<PathBuf, ConfigError> {
    let config_dir = override_path
        .or_else(|| {
            ProjectDirs::from("com", "Codetype", "Codetype")
                .map(|dirs| dirs.config_dir().to_path_buf())
        })
        .ok_or(ConfigError::NoDirectory)?;

    if !config_dir.exists() {
        std::fs::create_dir_all(&config_dir)?;
    }

    Ok(config_dir)
}

#[derive(Debug)]
pub struct Config {
    pub settings: Settings,
    pub catalog: Catalog,
}

impl Config {
    /// Load settings and snippets from `directory`
    pub fn load(directory: PathBuf) -> Result<Self, ConfigError> {
        let mut settings: Settings = Settings::figment(&directory)
            .extract()
            .map_err(Box::new)?;

        let snippets_dir = settings
            .snippets_dir
            .clone()
            .unwrap_or_else(|| directory.join("snippets"));

        let mut catalog = Catalog::builtin()?;
        for file in snippets::get_snippet_files(&snippets_dir)? {
            catalog.extend(file);
        }
        settings.snippets_dir = Some(snippets_dir);

        if settings.results.directory.is_none() {
            settings.results.directory = Some(directory.join("results"));
        }

        tracing::debug!(directory = %directory.display(), "configuration loaded");

        Ok(Self { settings, catalog })
    }
}

#[cfg(test)]
mod tests {
    use quill::SnippetProvider;

    use super::*;

    #[test]
    fn test_defaults() {
        let directory = tempfile::tempdir().unwrap();
        let config = Config::load(directory.path().to_path_buf()).unwrap();

        assert_eq!(config.settings.default_language, "javascript");
        assert_eq!(config.settings.results.leaderboard_size, 25);
        assert_eq!(
            config.settings.snippets_dir,
            Some(directory.path().join("snippets"))
        );
        assert_eq!(
            config.settings.results.directory,
            Some(directory.path().join("results"))
        );
        assert!(directory.path().join("snippets").is_dir());
        assert!(config.catalog.random_snippet("rust").is_some());

        let session = config.settings.session_configuration();
        assert_eq!(session.tick_interval, Duration::from_millis(500));
        assert!(session.skip_blank_lines);
        assert_eq!(session.error_counting, ErrorCounting::Overrun);
    }

    #[test]
    fn test_settings_file() {
        let directory = tempfile::tempdir().unwrap();
        std::fs::write(
            directory.path().join(SETTINGS_FILE),
            r#"
default_language = "rust"
tick_interval_ms = 250
error_counting = "length_delta"

[results]
save_enabled = false

[profile]
id = "u1"
display_name = "Ferris"
"#,
        )
        .unwrap();

        let config = Config::load(directory.path().to_path_buf()).unwrap();
        let settings = &config.settings;

        assert_eq!(settings.default_language, "rust");
        assert_eq!(settings.fallback_language, "javascript");
        assert!(!settings.results.save_enabled);
        assert_eq!(settings.results.leaderboard_size, 25);
        assert_eq!(settings.error_counting, ErrorCounting::LengthDelta);
        assert_eq!(
            settings.session_configuration().tick_interval,
            Duration::from_millis(250)
        );

        let profile = settings.profile.as_ref().unwrap();
        assert_eq!(profile.display_name, "Ferris");
        assert_eq!(profile.avatar_url, None);
    }

    #[test]
    fn test_user_snippets_are_merged() {
        let directory = tempfile::tempdir().unwrap();
        let snippets_dir = directory.path().join("snippets");
        std::fs::create_dir_all(&snippets_dir).unwrap();
        std::fs::write(
            snippets_dir.join("zig.toml"),
            r#"
[[languages]]
id = "zig"
name = "Zig"

[[snippets]]
id = "zig1"
language = "zig"
title = "Hello"
code = 'const std = @import("std");'
"#,
        )
        .unwrap();

        let config = Config::load(directory.path().to_path_buf()).unwrap();
        let snippet = config.catalog.random_snippet("zig").unwrap();
        assert_eq!(snippet.id, "zig1");
        assert!(config.catalog.random_snippet("javascript").is_some());
    }

    #[test]
    fn test_invalid_settings() {
        let directory = tempfile::tempdir().unwrap();
        std::fs::write(
            directory.path().join(SETTINGS_FILE),
            "tick_interval_ms = \"soon\"",
        )
        .unwrap();

        assert!(matches!(
            Config::load(directory.path().to_path_buf()),
            Err(ConfigError::Parse(_))
        ));
    }
}
