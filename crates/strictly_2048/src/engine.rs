//! Board engine: slide/merge, random tile spawning and terminal detection.
//!
//! Every function here is pure over its inputs apart from the injected RNG.
//! The session controller composes them into a game.

use crate::direction::Direction;
use crate::grid::{Grid, MAX_TILE};
use rand::Rng;
use tracing::{debug, instrument, trace};

/// Tile that wins the game.
pub const WINNING_TILE: u32 = 2048;

/// Chance that a spawned tile is a 4 rather than a 2.
pub const FOUR_PROBABILITY: f64 = 0.1;

/// Result of applying a direction to a grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveResult {
    /// Grid after sliding and merging.
    pub grid: Grid,
    /// True iff any cell differs from the input grid.
    pub moved: bool,
    /// Sum of the values created by merges.
    pub score_delta: u64,
}

/// True if two neighbouring cells combine when slid together.
///
/// Tiles at [`MAX_TILE`] or above are frozen so a merge can never overflow.
fn can_merge(a: u32, b: u32) -> bool {
    a != 0 && a == b && a < MAX_TILE
}

/// Slides one line toward index 0, merging equal neighbours once.
///
/// Returns the new line, padded with trailing zeros to the input length, and
/// the sum of merged values. A tile produced by a merge never merges again in
/// the same call, and tiles at [`MAX_TILE`] never merge.
pub fn slide_line(line: &[u32]) -> (Vec<u32>, u64) {
    let mut tiles: Vec<u32> = line.iter().copied().filter(|&v| v != 0).collect();
    let mut score = 0u64;

    let mut i = 0;
    while i + 1 < tiles.len() {
        if can_merge(tiles[i], tiles[i + 1]) {
            tiles[i] *= 2;
            score += u64::from(tiles[i]);
            tiles[i + 1] = 0;
            i += 2;
        } else {
            i += 1;
        }
    }

    let mut out: Vec<u32> = tiles.into_iter().filter(|&v| v != 0).collect();
    out.resize(line.len(), 0);
    (out, score)
}

/// Shifts every line of `grid` in `direction`.
#[instrument(skip(grid), fields(size = grid.size()))]
pub fn apply_move(grid: &Grid, direction: Direction) -> MoveResult {
    let size = grid.size();
    let mut next = grid.clone();
    let mut moved = false;
    let mut score_delta = 0u64;
    let mut line = Vec::with_capacity(size);

    for l in 0..size {
        line.clear();
        line.extend((0..size).map(|s| grid.cells()[direction.cell_index(l, s, size)]));

        let (slid, gained) = slide_line(&line);
        score_delta += gained;

        for (s, &value) in slid.iter().enumerate() {
            let idx = direction.cell_index(l, s, size);
            if next.cells()[idx] != value {
                moved = true;
                next.set(idx, value);
            }
        }
    }

    debug!(%direction, moved, score_delta, "Applied move");
    MoveResult {
        grid: next,
        moved,
        score_delta,
    }
}

/// Places a 2 or a 4 on a uniformly chosen empty cell.
///
/// Returns `false` and leaves the grid untouched when it is full.
pub fn spawn_random_tile<R: Rng + ?Sized>(grid: &mut Grid, rng: &mut R) -> bool {
    spawn_tile_with(grid, rng, FOUR_PROBABILITY).is_some()
}

/// Places a tile that is a 4 with probability `four_probability`, else a 2.
///
/// Returns the index written, or `None` when the grid has no empty cell.
/// `four_probability` must lie in `0.0..=1.0`.
#[instrument(skip(grid, rng))]
pub fn spawn_tile_with<R: Rng + ?Sized>(
    grid: &mut Grid,
    rng: &mut R,
    four_probability: f64,
) -> Option<usize> {
    let empty = grid.empty_cells();
    if empty.is_empty() {
        debug!("No empty cell for new tile");
        return None;
    }

    let index = empty[rng.gen_range(0..empty.len())];
    let value = if rng.gen_bool(four_probability) { 4 } else { 2 };
    grid.set(index, value);
    trace!(index, value, "Spawned tile");
    Some(index)
}

/// True iff the grid is full and no two orthogonal neighbours can merge.
#[instrument(skip(grid))]
pub fn is_game_over(grid: &Grid) -> bool {
    if !grid.is_full() {
        return false;
    }

    let size = grid.size();
    let cells = grid.cells();
    for row in 0..size {
        for col in 0..size {
            let current = cells[row * size + col];
            if col + 1 < size && can_merge(current, cells[row * size + col + 1]) {
                return false;
            }
            if row + 1 < size && can_merge(current, cells[(row + 1) * size + col]) {
                return false;
            }
        }
    }
    true
}

/// True iff any cell equals `target`.
pub fn has_winning_tile(grid: &Grid, target: u32) -> bool {
    grid.cells().contains(&target)
}

/// True iff moving in `direction` would change the grid.
pub fn can_move(grid: &Grid, direction: Direction) -> bool {
    apply_move(grid, direction).moved
}

/// Directions that would change the grid, in [`Direction::ALL`] order.
#[instrument(skip(grid))]
pub fn legal_moves(grid: &Grid) -> Vec<Direction> {
    Direction::ALL
        .into_iter()
        .filter(|&d| can_move(grid, d))
        .collect()
}
