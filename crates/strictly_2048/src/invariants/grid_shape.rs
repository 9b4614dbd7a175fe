//! Grid shape invariant: the cell vector is exactly `size²` long.

use super::Invariant;
use crate::grid::Grid;

/// Invariant: a grid of side `n` holds `n * n` cells.
pub struct GridShapeInvariant;

impl Invariant<Grid> for GridShapeInvariant {
    fn holds(grid: &Grid) -> bool {
        grid.cells().len() == grid.size() * grid.size()
    }

    fn description() -> &'static str {
        "Grid holds size * size cells"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_grids_hold() {
        for n in [2, 4, 6] {
            assert!(GridShapeInvariant::holds(&Grid::new(n)));
        }
    }
}
