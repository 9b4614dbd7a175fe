//! Render-ready snapshots handed to the presentation layer.

use crate::status::GameStatus;
use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// Snapshot of a session after an operation.
///
/// Owns its data so the presentation layer can keep it while the session
/// moves on.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct GameState {
    /// Row-major cells, `size * size` long.
    grid: Vec<u32>,
    /// Board side length.
    size: usize,
    /// Score of the current game.
    score: u64,
    /// Best score seen in this process.
    best_score: u64,
    /// Derived status.
    status: GameStatus,
    /// Number of accepted moves in the current game.
    moves: usize,
}

impl GameState {
    pub(crate) fn new(
        grid: Vec<u32>,
        size: usize,
        score: u64,
        best_score: u64,
        status: GameStatus,
        moves: usize,
    ) -> Self {
        Self {
            grid,
            size,
            score,
            best_score,
            status,
            moves,
        }
    }

    /// Non-empty tiles as `(row, col, value)`, row-major.
    pub fn tiles(&self) -> Vec<(usize, usize, u32)> {
        self.grid
            .iter()
            .enumerate()
            .filter(|(_, v)| **v != 0)
            .map(|(i, &v)| (i / self.size, i % self.size, v))
            .collect()
    }

    /// Serializes the snapshot as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

/// What a directional input did.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct MoveOutcome {
    /// State after the input.
    state: GameState,
    /// False when the direction changed nothing; nothing needs redrawing.
    moved: bool,
    /// Points gained by this move.
    score_delta: u64,
    /// Cell that received the new tile, if any.
    spawned: Option<usize>,
}

impl MoveOutcome {
    pub(crate) fn new(
        state: GameState,
        moved: bool,
        score_delta: u64,
        spawned: Option<usize>,
    ) -> Self {
        Self {
            state,
            moved,
            score_delta,
            spawned,
        }
    }

    /// Consumes the outcome, returning the state.
    pub fn into_state(self) -> GameState {
        self.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tiles_lists_occupied_cells() {
        let mut grid = vec![0; 16];
        grid[5] = 2;
        grid[15] = 8;
        let state = GameState::new(grid, 4, 0, 0, GameStatus::Playing, 0);
        assert_eq!(state.tiles(), vec![(1, 1, 2), (3, 3, 8)]);
    }

    #[test]
    fn test_json_uses_lowercase_status() {
        let state = GameState::new(vec![0; 4], 2, 12, 40, GameStatus::Won, 3);
        let json = state.to_json().unwrap();
        assert!(json.contains("\"status\": \"won\""));
        assert!(json.contains("\"best_score\": 40"));

        let back: GameState = serde_json::from_str(&json).unwrap();
        assert_eq!(back, state);
    }
}
