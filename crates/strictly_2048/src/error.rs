//! Error types for the 2048 engine and session controller.

use derive_more::{Display, Error};
use tracing::instrument;

/// Error raised when a grid, direction or move is malformed.
///
/// Reaching a won or lost position is never an error; see
/// [`GameStatus`](crate::GameStatus) for that.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum GameError {
    /// The cell vector does not hold `size * size` entries.
    #[display("Grid has {actual} cells, expected {expected}")]
    InvalidGridLength {
        /// Required number of cells.
        expected: usize,
        /// Number of cells supplied.
        actual: usize,
    },

    /// A cell holds a value that is neither zero nor a power of two >= 2.
    #[display("Cell {index} holds {value}, which is not a tile value")]
    InvalidTile {
        /// Row-major cell index.
        index: usize,
        /// Offending value.
        value: u32,
    },

    /// A direction name could not be parsed.
    #[display("Unknown direction {:?}", _0)]
    UnknownDirection(String),

    /// A tile was requested on a grid with no empty cell.
    #[display("No empty cell available for a new tile")]
    NoEmptyCell,

    /// A postcondition failed after a state transition.
    #[display("Invariant violation: {}", _0)]
    InvariantViolation(String),
}

impl std::error::Error for GameError {}

/// Configuration error with location tracking.
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
    #[instrument(skip(message))]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        let err = GameError::InvalidGridLength {
            expected: 16,
            actual: 4,
        };
        assert_eq!(err.to_string(), "Grid has 4 cells, expected 16");

        let err = GameError::UnknownDirection("sideways".to_string());
        assert!(err.to_string().contains("sideways"));
    }

    #[test]
    fn test_config_error_records_location() {
        let err = ConfigError::new("bad size");
        assert!(err.file.ends_with("error.rs"));
        assert!(err.to_string().starts_with("Config error: bad size"));
    }
}
