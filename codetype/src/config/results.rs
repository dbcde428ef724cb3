use std::path::PathBuf;

use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize)]
#[serde(default)]
pub struct ResultsConfig {
    pub save_enabled: bool,
    /// Defaults to `results` in the config directory
    pub directory: Option<PathBuf>,
    pub leaderboard_size: usize,
}

impl Default for ResultsConfig {
    fn default() -> Self {
        Self {
            save_enabled: true,
            directory: None,
            leaderboard_size: 25,
        }
    }
}
