use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use quill::{Identity, Leaderboard, LeaderboardEntry, ResultSink, TypingResult};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use web_time::SystemTime;

/// Player name of results submitted without an identity
pub const ANONYMOUS: &str = "anonymous";

#[derive(Debug, Error)]
pub enum ResultStoreError {
    #[error("Failed to create results directory: {0}")]
    CreateDirectory(std::io::Error),

    #[error("Failed to read results: {0}")]
    ReadFile(std::io::Error),

    #[error("Failed to write results file: {0}")]
    WriteFile(std::io::Error),

    #[error("Failed to serialize result: {0}")]
    Serialize(serde_json::Error),
}

/// A result as written to disk
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredResult {
    pub timestamp: SystemTime,
    /// `None` for anonymous results
    pub player_id: Option<String>,
    pub player: String,
    #[serde(default)]
    pub avatar_url: Option<String>,
    pub result: TypingResult,
}

impl StoredResult {
    pub fn new(result: &TypingResult, identity: Option<&Identity>) -> Self {
        Self {
            timestamp: SystemTime::now(),
            player_id: identity.map(|identity| identity.id.clone()),
            player: identity.map_or_else(
                || ANONYMOUS.to_string(),
                |identity| identity.display_name.clone(),
            ),
            avatar_url: identity.and_then(|identity| identity.avatar_url.clone()),
            result: result.clone(),
        }
    }

    /// Results are grouped per player id, anonymous ones all together
    fn player_key(&self) -> &str {
        self.player_id.as_deref().unwrap_or(ANONYMOUS)
    }
}

/// Completed results as JSON files, one per result
#[derive(Debug)]
pub struct ResultStore {
    directory: PathBuf,
}

impl ResultStore {
    pub fn new(directory: PathBuf) -> Result<Self, ResultStoreError> {
        if !directory.exists() {
            fs::create_dir_all(&directory).map_err(ResultStoreError::CreateDirectory)?;
        }
        Ok(Self { directory })
    }

    /// Write a result, returning the path of the new file
    pub fn save(&self, stored: &StoredResult) -> Result<PathBuf, ResultStoreError> {
        let millis = stored
            .timestamp
            .duration_since(SystemTime::UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis();

        let mut file_path = self.directory.join(format!("result_{millis}.json"));
        let mut attempt = 1;
        while file_path.exists() {
            file_path = self
                .directory
                .join(format!("result_{millis}_{attempt}.json"));
            attempt += 1;
        }

        let json = serde_json::to_string_pretty(stored).map_err(ResultStoreError::Serialize)?;
        fs::write(&file_path, json).map_err(ResultStoreError::WriteFile)?;

        Ok(file_path)
    }

    /// Every stored result, oldest first. Unreadable files are skipped.
    pub fn load_all(&self) -> Result<Vec<StoredResult>, ResultStoreError> {
        let mut results = Vec::new();

        if !self.directory.exists() {
            return Ok(results);
        }

        let entries = fs::read_dir(&self.directory).map_err(ResultStoreError::ReadFile)?;

        for entry in entries {
            let path = entry.map_err(ResultStoreError::ReadFile)?.path();

            if path.is_file() && path.extension().is_some_and(|ext| ext == "json") {
                let content = fs::read_to_string(&path).map_err(ResultStoreError::ReadFile)?;
                match serde_json::from_str::<StoredResult>(&content) {
                    Ok(result) => results.push(result),
                    Err(error) => {
                        tracing::warn!(path = %path.display(), %error, "skipping unreadable result");
                    }
                }
            }
        }

        results.sort_by_key(|result| result.timestamp);
        Ok(results)
    }
}

impl ResultSink for ResultStore {
    type Error = ResultStoreError;

    fn submit(&self, result: &TypingResult, identity: Option<&Identity>) -> Result<(), Self::Error> {
        let path = self.save(&StoredResult::new(result, identity))?;
        tracing::debug!(path = %path.display(), "result saved");
        Ok(())
    }
}

impl Leaderboard for ResultStore {
    type Error = ResultStoreError;

    fn top(&self, limit: usize) -> Result<Vec<LeaderboardEntry>, Self::Error> {
        Ok(rank(&self.load_all()?, limit))
    }
}

/// Aggregate results per player, best WPM first, at most `limit` players
pub fn rank(results: &[StoredResult], limit: usize) -> Vec<LeaderboardEntry> {
    let mut players: HashMap<&str, LeaderboardEntry> = HashMap::new();

    for stored in results {
        let entry = players
            .entry(stored.player_key())
            .or_insert_with(|| LeaderboardEntry {
                player: stored.player.clone(),
                avatar_url: None,
                highest_wpm: 0.0,
                highest_accuracy: 0.0,
                games_played: 0,
            });

        // Newest name and avatar win
        entry.player.clone_from(&stored.player);
        if stored.avatar_url.is_some() {
            entry.avatar_url.clone_from(&stored.avatar_url);
        }
        entry.highest_wpm = entry.highest_wpm.max(stored.result.wpm);
        entry.highest_accuracy = entry.highest_accuracy.max(stored.result.accuracy);
        entry.games_played += 1;
    }

    let mut entries: Vec<LeaderboardEntry> = players.into_values().collect();
    entries.sort_by(|a, b| {
        b.highest_wpm
            .total_cmp(&a.highest_wpm)
            .then_with(|| b.highest_accuracy.total_cmp(&a.highest_accuracy))
            .then_with(|| a.player.cmp(&b.player))
    });
    entries.truncate(limit);
    entries
}
