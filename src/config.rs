use std::path::Path;

use crate::ai::DEFAULT_SEARCH_DEPTH;
use crate::error::ConfigError;
use crate::game::Player;

/// Which side takes the first turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FirstMover {
    Human,
    Computer,
}

/// Game-start parameters, loadable from TOML and overridable from the CLI.
///
/// Validation lives here, not in the engine: by the time a board or session
/// is built, `board_size` is in 3..=10, `run_length` in 2..=board_size and
/// `search_depth` at least 1.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Side length of the square board (N).
    pub board_size: usize,
    /// Connected pieces required to win (M).
    pub run_length: usize,
    /// Minimax search depth in plies.
    pub search_depth: usize,
    /// Who moves first.
    pub first: FirstMover,
    /// The color the computer plays; the human gets the other one.
    pub computer_plays: Player,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            board_size: 7,
            run_length: 4,
            search_depth: DEFAULT_SEARCH_DEPTH,
            first: FirstMover::Human,
            computer_plays: Player::Yellow,
        }
    }
}

impl GameConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        let config: GameConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file, falling back to defaults if the file
    /// does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            eprintln!(
                "Warning: config file '{}' not found, using defaults",
                path.display()
            );
            Ok(Self::default())
        }
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.board_size < 3 || self.board_size > 10 {
            return Err(ConfigError::Validation(
                "board_size must be in [3, 10]".into(),
            ));
        }
        if self.run_length < 2 {
            return Err(ConfigError::Validation("run_length must be >= 2".into()));
        }
        if self.run_length > self.board_size {
            return Err(ConfigError::Validation(
                "run_length must be <= board_size".into(),
            ));
        }
        if self.search_depth == 0 {
            return Err(ConfigError::Validation("search_depth must be >= 1".into()));
        }

        Ok(())
    }

    /// The player who takes the first turn.
    pub fn first_player(&self) -> Player {
        match self.first {
            FirstMover::Computer => self.computer_plays,
            FirstMover::Human => self.computer_plays.other(),
        }
    }

    /// Generate a TOML string with all default values (useful for creating
    /// example config files).
    pub fn default_toml() -> String {
        toml::to_string_pretty(&GameConfig::default()).expect("default config serializes")
    }
}
