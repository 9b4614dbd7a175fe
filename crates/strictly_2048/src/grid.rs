//! Square grid of tiles.

use crate::error::GameError;
use serde::{Deserialize, Serialize};
use tracing::{instrument, warn};

/// Default board side length.
pub const DEFAULT_SIZE: usize = 4;

/// Largest tile a cell may hold. Two of these never merge.
pub const MAX_TILE: u32 = 1 << 30;

/// Returns true if `value` may appear in a cell: zero or a power of two
/// between 2 and [`MAX_TILE`].
pub fn is_tile_value(value: u32) -> bool {
    value == 0 || (value >= 2 && value <= MAX_TILE && value.is_power_of_two())
}

/// N×N board in row-major order.
///
/// Cell `(row, col)` lives at index `row * size + col`. Empty cells are 0.
/// Deserialization goes through [`Grid::from_cells`], so a decoded grid is
/// always well-formed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawGrid")]
pub struct Grid {
    size: usize,
    cells: Vec<u32>,
}

/// Unchecked wire form of a [`Grid`].
#[derive(Deserialize)]
struct RawGrid {
    size: usize,
    cells: Vec<u32>,
}

impl TryFrom<RawGrid> for Grid {
    type Error = GameError;

    fn try_from(raw: RawGrid) -> Result<Self, Self::Error> {
        Grid::from_cells(raw.size, raw.cells).inspect_err(|e| {
            warn!(error = %e, "Rejected malformed grid");
        })
    }
}

impl Grid {
    /// Creates an empty grid of `size * size` cells.
    #[instrument]
    pub fn new(size: usize) -> Self {
        Self {
            size,
            cells: vec![0; size * size],
        }
    }

    /// Creates a grid from raw row-major cells.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::InvalidGridLength`] if `cells` does not hold
    /// `size * size` values and [`GameError::InvalidTile`] for any value that
    /// is neither empty nor a power of two up to [`MAX_TILE`].
    #[instrument(skip(cells), fields(len = cells.len()))]
    pub fn from_cells(size: usize, cells: Vec<u32>) -> Result<Self, GameError> {
        let expected = size * size;
        if cells.len() != expected {
            return Err(GameError::InvalidGridLength {
                expected,
                actual: cells.len(),
            });
        }
        if let Some((index, &value)) = cells.iter().enumerate().find(|(_, v)| !is_tile_value(**v)) {
            return Err(GameError::InvalidTile { index, value });
        }
        Ok(Self { size, cells })
    }

    /// Side length.
    pub fn size(&self) -> usize {
        self.size
    }

    /// All cells, row-major.
    pub fn cells(&self) -> &[u32] {
        &self.cells
    }

    /// Value at `(row, col)`, or `None` outside the board.
    pub fn get(&self, row: usize, col: usize) -> Option<u32> {
        if row >= self.size || col >= self.size {
            return None;
        }
        self.cells.get(row * self.size + col).copied()
    }

    /// Value at a row-major index.
    pub fn at(&self, index: usize) -> Option<u32> {
        self.cells.get(index).copied()
    }

    /// Writes a raw value at a row-major index.
    ///
    /// Crate-internal: callers outside the engine go through `from_cells`.
    pub(crate) fn set(&mut self, index: usize, value: u32) {
        self.cells[index] = value;
    }

    /// One row as a slice, or `None` outside the board.
    pub fn row(&self, row: usize) -> Option<&[u32]> {
        if row >= self.size {
            return None;
        }
        let start = row * self.size;
        self.cells.get(start..start + self.size)
    }

    /// Indices of all empty cells in ascending order.
    pub fn empty_cells(&self) -> Vec<usize> {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, v)| **v == 0)
            .map(|(i, _)| i)
            .collect()
    }

    /// Returns true if no cell is empty.
    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|&v| v != 0)
    }

    /// Number of occupied cells.
    pub fn tile_count(&self) -> usize {
        self.cells.iter().filter(|&&v| v != 0).count()
    }

    /// Largest tile on the board, 0 if empty.
    pub fn max_tile(&self) -> u32 {
        self.cells.iter().copied().max().unwrap_or(0)
    }

    /// Sum of all tile values.
    pub fn sum(&self) -> u64 {
        self.cells.iter().map(|&v| u64::from(v)).sum()
    }

    /// Formats the grid as right-aligned columns, `.` for empty cells.
    pub fn display(&self) -> String {
        let width = self.max_tile().to_string().len().max(1);
        let mut result = String::new();
        for (row, cells) in self.cells.chunks(self.size.max(1)).enumerate() {
            let line = cells
                .iter()
                .map(|&v| {
                    if v == 0 {
                        format!("{:>width$}", ".")
                    } else {
                        format!("{v:>width$}")
                    }
                })
                .collect::<Vec<_>>()
                .join(" ");
            result.push_str(&line);
            if row + 1 < self.size {
                result.push('\n');
            }
        }
        result
    }
}

impl Default for Grid {
    fn default() -> Self {
        Self::new(DEFAULT_SIZE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_grid_is_empty() {
        let grid = Grid::new(4);
        assert_eq!(grid.cells().len(), 16);
        assert_eq!(grid.tile_count(), 0);
        assert_eq!(grid.empty_cells().len(), 16);
        assert!(!grid.is_full());
    }

    #[test]
    fn test_from_cells_rejects_wrong_length() {
        let err = Grid::from_cells(4, vec![0; 15]).unwrap_err();
        assert_eq!(
            err,
            GameError::InvalidGridLength {
                expected: 16,
                actual: 15
            }
        );
    }

    #[test]
    fn test_from_cells_rejects_non_tiles() {
        let mut cells = vec![0; 16];
        cells[5] = 6;
        let err = Grid::from_cells(4, cells).unwrap_err();
        assert_eq!(err, GameError::InvalidTile { index: 5, value: 6 });

        let mut cells = vec![0; 16];
        cells[0] = 1;
        assert!(Grid::from_cells(4, cells).is_err());
    }

    #[test]
    fn test_tile_values_are_capped() {
        assert!(is_tile_value(MAX_TILE));
        assert!(!is_tile_value(MAX_TILE << 1));

        let mut cells = vec![0; 16];
        cells[0] = 1 << 31;
        let err = Grid::from_cells(4, cells).unwrap_err();
        assert_eq!(
            err,
            GameError::InvalidTile {
                index: 0,
                value: 1 << 31
            }
        );
    }

    #[test]
    fn test_deserialize_checks_cells() {
        let grid: Grid = serde_json::from_str(r#"{"size":2,"cells":[2,0,4,8]}"#).unwrap();
        assert_eq!(grid.get(1, 1), Some(8));

        assert!(serde_json::from_str::<Grid>(r#"{"size":4,"cells":[3,0,0]}"#).is_err());
        assert!(serde_json::from_str::<Grid>(r#"{"size":2,"cells":[2,0,4,6]}"#).is_err());
    }

    #[test]
    fn test_serialize_round_trip() {
        let grid = Grid::from_cells(2, vec![2, 0, 16, 4]).unwrap();
        let json = serde_json::to_string(&grid).unwrap();
        assert_eq!(serde_json::from_str::<Grid>(&json).unwrap(), grid);
    }

    #[test]
    fn test_accessors() {
        let grid = Grid::from_cells(2, vec![2, 0, 4, 8]).unwrap();
        assert_eq!(grid.get(1, 0), Some(4));
        assert_eq!(grid.get(2, 0), None);
        assert_eq!(grid.row(1), Some(&[4, 8][..]));
        assert_eq!(grid.row(2), None);
        assert_eq!(grid.empty_cells(), vec![1]);
        assert_eq!(grid.max_tile(), 8);
        assert_eq!(grid.sum(), 14);
    }

    #[test]
    fn test_display() {
        let grid = Grid::from_cells(2, vec![2, 0, 16, 4]).unwrap();
        assert_eq!(grid.display(), " 2  .\n16  4");
    }
}
