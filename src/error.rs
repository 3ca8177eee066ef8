use std::path::PathBuf;

/// Errors that can occur when applying or probing a move.
///
/// `ColumnFull` is an expected, frequent condition: callers either pre-check
/// with `Board::is_column_full` or branch on the result. `InvalidColumn`
/// means the index itself is outside the board; correct orchestration never
/// produces it, but it stays a typed, recoverable failure rather than a
/// panic. `GameOver` is returned by the session once an outcome has been
/// recorded, never by the board itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum MoveError {
    #[error("column {0} is out of bounds")]
    InvalidColumn(usize),

    #[error("column {0} is full")]
    ColumnFull(usize),

    #[error("the game is already over")]
    GameOver,
}

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("config validation error: {0}")]
    Validation(String),
}
