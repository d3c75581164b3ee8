use std::path::PathBuf;

use crate::game::Cell;

/// Errors raised by board updates and by the game engine.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MoveError {
    #[error("coordinates ({row}, {col}) are outside the board")]
    OutOfBounds { row: u32, col: u32 },

    #[error("cell ({row}, {col}) is already occupied")]
    CellOccupied { row: u32, col: u32 },

    #[error("column {col} is full")]
    ColumnFull { col: u32 },

    #[error("it is {expected}'s turn, not {got}'s")]
    WrongSide { expected: Cell, got: Cell },

    #[error("no legal moves from the current position")]
    NoLegalMoves,

    #[error("game is already over")]
    GameOver,

    #[error("a mark in column {col} lands on row {landing_row}, not row {row}")]
    NotLanding { row: u32, col: u32, landing_row: u32 },

    #[error("cell index {idx} is out of range (board has {len} cells)")]
    IndexOutOfRange { idx: usize, len: usize },

    #[error("expected {expected} cells, got {got}")]
    SizeMismatch { expected: usize, got: usize },
}

/// Errors raised while decoding messages at the transport boundary.
#[derive(Debug, thiserror::Error)]
pub enum ProtocolError {
    #[error("malformed message: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid side value {0} (expected 0, 1 or 2)")]
    InvalidSide(u8),
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_move_error_display() {
        let err = MoveError::WrongSide {
            expected: Cell::X,
            got: Cell::O,
        };
        assert_eq!(err.to_string(), "it is X's turn, not O's");

        let err = MoveError::ColumnFull { col: 3 };
        assert_eq!(err.to_string(), "column 3 is full");
    }

    #[test]
    fn test_protocol_error_display() {
        let err = ProtocolError::InvalidSide(7);
        assert_eq!(err.to_string(), "invalid side value 7 (expected 0, 1 or 2)");
    }

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::Validation("tic_tac_toe.run_length must be > 0".to_string());
        assert_eq!(
            err.to_string(),
            "config validation error: tic_tac_toe.run_length must be > 0"
        );
    }
}
