//! Game configuration loaded from TOML.

use derive_getters::Getters;
use derive_more::{Display, Error};
use metaboard_core::{DEFAULT_DEPTH, DEFAULT_GRID, Geometry};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info, instrument};

/// Largest number of players a session supports.
pub const MAX_PLAYERS: u8 = 9;

/// Board shape and player count for a session.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct GameConfig {
    /// Side length of every grid.
    #[serde(default = "default_grid")]
    grid: usize,

    /// Number of sub-board levels below the root.
    #[serde(default = "default_depth")]
    depth: usize,

    /// Number of players taking turns.
    #[serde(default = "default_players")]
    players: u8,
}

fn default_grid() -> usize {
    DEFAULT_GRID
}

fn default_depth() -> usize {
    DEFAULT_DEPTH
}

fn default_players() -> u8 {
    2
}

impl GameConfig {
    /// Creates a configuration.
    pub fn new(grid: usize, depth: usize, players: u8) -> Self {
        Self {
            grid,
            depth,
            players,
        }
    }

    /// Loads configuration from a TOML file. Missing keys take defaults.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config: Self = toml::from_str(&content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;

        info!(grid = config.grid, depth = config.depth, players = config.players, "Config loaded");
        Ok(config)
    }

    /// Replaces any field given on the command line.
    pub fn with_overrides(mut self, grid: Option<usize>, depth: Option<usize>, players: Option<u8>) -> Self {
        if let Some(grid) = grid {
            self.grid = grid;
        }
        if let Some(depth) = depth {
            self.depth = depth;
        }
        if let Some(players) = players {
            self.players = players;
        }
        self
    }

    /// Validated board geometry.
    #[instrument(skip(self), fields(grid = self.grid, depth = self.depth))]
    pub fn geometry(&self) -> Result<Geometry, ConfigError> {
        Geometry::new(self.grid, self.depth).map_err(|e| ConfigError::new(format!("Invalid board shape: {}", e)))
    }

    /// Checks the whole configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(1..=MAX_PLAYERS).contains(&self.players) {
            return Err(ConfigError::new(format!(
                "Player count {} outside 1..={}",
                self.players, MAX_PLAYERS
            )));
        }
        self.geometry().map(|_| ())
    }

    /// Serializes the configuration back to TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string(self).map_err(|e| ConfigError::new(format!("Failed to serialize config: {}", e)))
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new(default_grid(), default_depth(), default_players())
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error at the caller's location.
    #[track_caller]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = GameConfig::default();
        assert_eq!(*config.grid(), 3);
        assert_eq!(*config.depth(), 2);
        assert_eq!(*config.players(), 2);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: GameConfig = toml::from_str("depth = 3").unwrap();
        assert_eq!(config, GameConfig::new(3, 3, 2));
    }

    #[test]
    fn test_overrides() {
        let config = GameConfig::default().with_overrides(Some(4), None, Some(3));
        assert_eq!(config, GameConfig::new(4, 2, 3));
    }

    #[test]
    fn test_rejects_bad_player_count() {
        let err = GameConfig::new(3, 2, 0).validate().unwrap_err();
        assert!(err.message.contains("Player count"));
        assert!(GameConfig::new(3, 2, 10).validate().is_err());
    }

    #[test]
    fn test_rejects_bad_geometry() {
        let err = GameConfig::new(1, 2, 2).validate().unwrap_err();
        assert!(err.message.contains("Invalid board shape"));
        let huge = GameConfig::default().with_overrides(Some(1 << 32), Some(1), None);
        assert!(huge.validate().unwrap_err().message.contains("needs more than"));
    }

    #[test]
    fn test_toml_round_trip() {
        let config = GameConfig::new(2, 4, 3);
        let text = config.to_toml().unwrap();
        assert_eq!(toml::from_str::<GameConfig>(&text).unwrap(), config);
    }
}
