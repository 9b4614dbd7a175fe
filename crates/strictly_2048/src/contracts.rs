//! Contract-based validation for engine transitions.
//!
//! Contracts define correctness through preconditions and postconditions:
//! `{P} action {Q}`. Preconditions are cheap and always checked by the
//! session; postconditions compare before/after grids and run in debug builds.

use crate::direction::Direction;
use crate::engine::MoveResult;
use crate::error::GameError;
use crate::grid::Grid;
use crate::invariants::{GridInvariants, InvariantSet, describe};
use tracing::{instrument, warn};

/// Preconditions and postconditions for a state transition.
pub trait Contract<S, A> {
    /// What the transition produces.
    type Output;

    /// Checks preconditions before applying the action.
    fn pre(state: &S, action: &A) -> Result<(), GameError>;

    /// Checks postconditions relating the input state to the output.
    fn post(before: &S, after: &Self::Output) -> Result<(), GameError>;
}

fn violation(message: String) -> GameError {
    warn!(%message, "Contract violated");
    GameError::InvariantViolation(message)
}

/// Checks every grid invariant, mapping violations to a [`GameError`].
#[instrument(skip(grid))]
pub fn check_grid(grid: &Grid) -> Result<(), GameError> {
    GridInvariants::check_all(grid).map_err(|violations| violation(describe(&violations)))
}

// ─────────────────────────────────────────────────────────────
//  Move Contract
// ─────────────────────────────────────────────────────────────

/// Contract for sliding the grid in a direction.
///
/// Preconditions:
/// - The grid is well-formed
///
/// Postconditions:
/// - The output grid is well-formed
/// - Tile count never increases and tile sum is conserved
/// - Score is gained exactly when tiles merged, at least 4 per merge
/// - An unmoved grid is identical to the input and scores nothing
pub struct MoveContract;

impl Contract<Grid, Direction> for MoveContract {
    type Output = MoveResult;

    fn pre(grid: &Grid, _direction: &Direction) -> Result<(), GameError> {
        check_grid(grid)
    }

    fn post(before: &Grid, after: &MoveResult) -> Result<(), GameError> {
        check_grid(&after.grid)?;

        let (count_before, count_after) = (before.tile_count(), after.grid.tile_count());
        if count_after > count_before {
            return Err(violation(format!(
                "Tile count grew from {} to {}",
                count_before, count_after
            )));
        }

        if before.sum() != after.grid.sum() {
            return Err(violation(format!(
                "Tile sum changed from {} to {}",
                before.sum(),
                after.grid.sum()
            )));
        }

        let merges = (count_before - count_after) as u64;
        if (merges == 0) != (after.score_delta == 0) || after.score_delta < 4 * merges {
            return Err(violation(format!(
                "Score delta {} inconsistent with {} merges",
                after.score_delta, merges
            )));
        }

        if !after.moved && (after.grid != *before || after.score_delta != 0) {
            return Err(violation("Unmoved grid differs from input".to_string()));
        }

        if after.moved && after.grid == *before {
            return Err(violation("Moved flag set on identical grid".to_string()));
        }

        Ok(())
    }
}

// ─────────────────────────────────────────────────────────────
//  Spawn Contract
// ─────────────────────────────────────────────────────────────

/// Contract for placing a random tile.
///
/// The action is the probability of spawning a 4.
///
/// Preconditions:
/// - At least one cell is empty
/// - The probability lies in `0.0..=1.0`
///
/// Postconditions:
/// - Exactly one previously empty cell changed, and it now holds 2 or 4
pub struct SpawnContract;

impl Contract<Grid, f64> for SpawnContract {
    type Output = Grid;

    fn pre(grid: &Grid, four_probability: &f64) -> Result<(), GameError> {
        if !(0.0..=1.0).contains(four_probability) {
            return Err(violation(format!(
                "Spawn probability {} outside 0.0..=1.0",
                four_probability
            )));
        }
        if grid.is_full() {
            warn!("Spawn requested on a full grid");
            return Err(GameError::NoEmptyCell);
        }
        Ok(())
    }

    fn post(before: &Grid, after: &Grid) -> Result<(), GameError> {
        check_grid(after)?;

        let changed: Vec<usize> = before
            .cells()
            .iter()
            .zip(after.cells())
            .enumerate()
            .filter(|(_, (b, a))| b != a)
            .map(|(i, _)| i)
            .collect();

        match changed.as_slice() {
            [index] if before.cells()[*index] == 0 && matches!(after.cells()[*index], 2 | 4) => {
                Ok(())
            }
            _ => Err(violation(format!(
                "Spawn changed cells {:?} instead of one empty cell",
                changed
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{apply_move, spawn_random_tile};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn grid(cells: [u32; 16]) -> Grid {
        Grid::from_cells(4, cells.to_vec()).unwrap()
    }

    #[test]
    fn test_move_postcondition_holds() {
        let g = grid([2, 2, 4, 4, 0, 8, 0, 8, 2, 0, 0, 0, 16, 16, 16, 0]);
        for dir in Direction::ALL {
            assert!(MoveContract::pre(&g, &dir).is_ok());
            let result = apply_move(&g, dir);
            assert!(MoveContract::post(&g, &result).is_ok(), "{dir} broke contract");
        }
    }

    #[test]
    fn test_move_postcondition_detects_corruption() {
        let g = grid([2, 2, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0]);
        let mut result = apply_move(&g, Direction::Left);
        result.grid.set(15, 2);
        assert!(matches!(
            MoveContract::post(&g, &result),
            Err(GameError::InvariantViolation(_))
        ));
    }

    #[test]
    fn test_move_postcondition_detects_bad_score() {
        let g = grid([2, 2, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0]);
        let mut result = apply_move(&g, Direction::Left);
        result.score_delta = 0;
        assert!(MoveContract::post(&g, &result).is_err());
    }

    #[test]
    fn test_move_precondition_rejects_bad_grid() {
        let mut g = Grid::new(4);
        g.set(0, 3);
        assert!(MoveContract::pre(&g, &Direction::Up).is_err());
    }

    #[test]
    fn test_spawn_contract() {
        let before = Grid::new(4);
        assert!(SpawnContract::pre(&before, &0.1).is_ok());
        assert!(SpawnContract::pre(&before, &1.1).is_err());

        let mut after = before.clone();
        let mut rng = StdRng::seed_from_u64(1);
        assert!(spawn_random_tile(&mut after, &mut rng));
        assert!(SpawnContract::post(&before, &after).is_ok());

        // Two new tiles is not one spawn.
        let mut twice = after.clone();
        assert!(spawn_random_tile(&mut twice, &mut rng));
        assert!(SpawnContract::post(&before, &twice).is_err());
    }

    #[test]
    fn test_spawn_precondition_on_full_grid() {
        let full = grid([2; 16]);
        assert_eq!(SpawnContract::pre(&full, &0.1), Err(GameError::NoEmptyCell));
    }
}
