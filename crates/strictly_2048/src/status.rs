//! Derived game status.

use crate::engine::{has_winning_tile, is_game_over};
use crate::grid::Grid;
use serde::{Deserialize, Serialize};
use strum::Display;

/// Status of a game, always recomputed from the grid.
///
/// `Won` is advisory: play continues after reaching the target tile. `Lost`
/// is the only terminal status and takes precedence when both hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display)]
#[serde(rename_all = "lowercase")]
pub enum GameStatus {
    /// Moves are still possible and the target tile is absent.
    #[default]
    Playing,
    /// The target tile is on the board and moves are still possible.
    Won,
    /// No direction changes the grid.
    Lost,
}

impl GameStatus {
    /// Computes the status of `grid` for a winning tile of `target`.
    pub fn of(grid: &Grid, target: u32) -> Self {
        if is_game_over(grid) {
            GameStatus::Lost
        } else if has_winning_tile(grid, target) {
            GameStatus::Won
        } else {
            GameStatus::Playing
        }
    }

    /// Returns true only for `Lost`.
    pub fn is_terminal(self) -> bool {
        matches!(self, GameStatus::Lost)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lost_takes_precedence_over_won() {
        let cells = vec![2048, 4, 2, 4, 4, 2, 4, 2, 2, 4, 2, 4, 4, 2, 4, 2];
        let grid = Grid::from_cells(4, cells).unwrap();
        assert_eq!(GameStatus::of(&grid, 2048), GameStatus::Lost);
    }

    #[test]
    fn test_won_with_space_left() {
        let mut cells = vec![0; 16];
        cells[3] = 2048;
        let grid = Grid::from_cells(4, cells).unwrap();
        assert_eq!(GameStatus::of(&grid, 2048), GameStatus::Won);
        assert!(!GameStatus::Won.is_terminal());
    }

    #[test]
    fn test_empty_grid_is_playing() {
        assert_eq!(GameStatus::of(&Grid::new(4), 2048), GameStatus::Playing);
    }
}
