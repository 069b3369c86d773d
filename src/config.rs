// Configuration loading and parsing (game.toml).

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::sim::ScoreField;
use crate::strategy::{Difficulty, DEFAULT_TOP_K};

/// Default number of picks: five players per side.
pub const DEFAULT_TOTAL_PICKS: usize = 10;

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("validation error for field `{field}`: {message}")]
    Validation { field: String, message: String },
}

// ---------------------------------------------------------------------------
// game.toml structs
// ---------------------------------------------------------------------------

/// Wrapper for the top-level `[game]` table in game.toml.
#[derive(Debug, Clone, Deserialize)]
struct GameFile {
    game: GameConfig,
}

/// Host-facing game settings.
#[derive(Debug, Clone, Deserialize)]
pub struct GameConfig {
    /// Total picks in the draft. Must be even (both sides receive the same
    /// number of players under the snake rule) and at least 2.
    #[serde(default = "default_total_picks")]
    pub total_picks: usize,
    /// Which AI strategy drives the opposing side.
    #[serde(default = "default_difficulty")]
    pub difficulty: Difficulty,
    /// Candidate window for the hard AI's randomized pick.
    #[serde(default = "default_top_k")]
    pub top_k: usize,
    /// Score column the match is settled on. Kept in sync with the column
    /// the chosen difficulty drafts by.
    #[serde(default = "default_score_field")]
    pub score_field: ScoreField,
}

fn default_total_picks() -> usize {
    DEFAULT_TOTAL_PICKS
}

fn default_difficulty() -> Difficulty {
    Difficulty::Easy
}

fn default_top_k() -> usize {
    DEFAULT_TOP_K
}

fn default_score_field() -> ScoreField {
    ScoreField::Actual
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            total_picks: default_total_picks(),
            difficulty: default_difficulty(),
            top_k: default_top_k(),
            score_field: default_score_field(),
        }
    }
}

impl GameConfig {
    /// Load and validate a config from a `game.toml` file.
    pub fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
            path: path.to_path_buf(),
        })?;
        let file: GameFile = toml::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        file.game.validate()?;
        Ok(file.game)
    }

    /// Parse and validate a config from an in-memory toml string.
    pub fn load_from_str(contents: &str) -> Result<Self, ConfigError> {
        let file: GameFile = toml::from_str(contents).map_err(|source| ConfigError::Parse {
            path: PathBuf::from("<inline>"),
            source,
        })?;
        file.game.validate()?;
        Ok(file.game)
    }

    /// Check the invariants the draft engine depends on, before any draft
    /// is constructed from this config.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.total_picks < 2 || self.total_picks % 2 != 0 {
            return Err(ConfigError::Validation {
                field: "total_picks".to_string(),
                message: format!("must be even and at least 2, got {}", self.total_picks),
            });
        }
        if self.top_k == 0 {
            return Err(ConfigError::Validation {
                field: "top_k".to_string(),
                message: "must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}
