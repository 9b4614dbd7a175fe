//! Move directions and the per-direction line traversal.

use crate::error::GameError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use strum::{Display, EnumIter};
use tracing::instrument;

/// Direction in which every tile on the board is shifted.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Direction {
    /// Tiles move toward row 0.
    Up,
    /// Tiles move toward the last row.
    Down,
    /// Tiles move toward column 0.
    Left,
    /// Tiles move toward the last column.
    Right,
}

impl Direction {
    /// All four directions, in a fixed order.
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Maps a position within a line to a row-major cell index.
    ///
    /// `line` selects the row (left/right) or column (up/down), and `step`
    /// walks that line starting from the edge tiles slide toward, so step 0
    /// is always the cell that receives the first compacted tile.
    pub fn cell_index(self, line: usize, step: usize, size: usize) -> usize {
        match self {
            Direction::Left => line * size + step,
            Direction::Right => line * size + (size - 1 - step),
            Direction::Up => step * size + line,
            Direction::Down => (size - 1 - step) * size + line,
        }
    }
}

impl FromStr for Direction {
    type Err = GameError;

    #[instrument]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "up" => Ok(Direction::Up),
            "down" => Ok(Direction::Down),
            "left" => Ok(Direction::Left),
            "right" => Ok(Direction::Right),
            _ => Err(GameError::UnknownDirection(s.to_string())),
        }
    }
}
