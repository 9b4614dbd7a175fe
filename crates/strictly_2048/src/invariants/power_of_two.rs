//! Tile value invariant: every occupied cell is a power of two >= 2.

use super::Invariant;
use crate::grid::{Grid, is_tile_value};

/// Invariant: every non-zero cell is a power of two no smaller than 2.
///
/// Merges double a power of two and spawns only write 2 or 4, so no
/// transition can break this on its own.
pub struct PowerOfTwoInvariant;

impl Invariant<Grid> for PowerOfTwoInvariant {
    fn holds(grid: &Grid) -> bool {
        grid.cells().iter().all(|&v| is_tile_value(v))
    }

    fn description() -> &'static str {
        "Occupied cells hold powers of two >= 2"
    }
}
