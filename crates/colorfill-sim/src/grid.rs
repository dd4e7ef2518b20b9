//! The claimable-cell grid.

use colorfill_protocol::{CellState, Level};
use serde::{Deserialize, Serialize};

use crate::SimError;

/// Row-major cell storage, `index = x + y * width`.
///
/// The playfield is `width × height`. When the level sent by the server
/// has fewer cells than that, the tail is filled with `Solid`; cells past
/// the playfield are kept as they are (never truncated).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    cells: Vec<CellState>,
    width: usize,
    height: usize,
}

impl Grid {
    /// Builds a grid from a copy of `blocks`, padded with `Solid` up to
    /// `width * height` cells.
    pub fn new(
        blocks: &[CellState],
        width: usize,
        height: usize,
    ) -> Result<Self, SimError> {
        if width == 0 {
            return Err(SimError::ZeroWidth);
        }
        let mut cells = blocks.to_vec();
        let wanted = width * height;
        if wanted > cells.len() {
            cells.resize(wanted, CellState::Solid);
        }
        Ok(Self {
            cells,
            width,
            height,
        })
    }

    /// Builds a grid for `level` with a playfield `height` rows tall.
    pub fn from_level(level: &Level, height: usize) -> Result<Self, SimError> {
        Self::new(&level.blocks, level.width, height)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// All cells, including any beyond the playfield.
    pub fn cells(&self) -> &[CellState] {
        &self.cells
    }

    fn index(&self, x: usize, y: usize) -> Option<usize> {
        (x < self.width && y < self.height).then_some(x + y * self.width)
    }

    /// The cell at `(x, y)`, or `None` outside the playfield.
    pub fn get(&self, x: usize, y: usize) -> Option<CellState> {
        self.index(x, y).map(|i| self.cells[i])
    }

    /// Overwrites the cell at `(x, y)`. Returns `false` outside the
    /// playfield.
    pub fn set(&mut self, x: usize, y: usize, state: CellState) -> bool {
        match self.index(x, y) {
            Some(i) => {
                self.cells[i] = state;
                true
            }
            None => false,
        }
    }

    /// Number of cells in `state`.
    pub fn count(&self, state: CellState) -> usize {
        self.cells.iter().filter(|c| **c == state).count()
    }

    /// Whether any cell is still `Empty`.
    pub fn has_empty(&self) -> bool {
        self.cells.contains(&CellState::Empty)
    }

    /// The first `Empty` cell of the playfield in row-major order.
    pub fn first_empty(&self) -> Option<(usize, usize)> {
        (0..self.height)
            .flat_map(|y| (0..self.width).map(move |x| (x, y)))
            .find(|&(x, y)| self.get(x, y) == Some(CellState::Empty))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use CellState::{Empty as E, Filled as F, Solid as S};

    #[test]
    fn test_new_pads_with_solid() {
        let grid = Grid::new(&[E, F, E], 2, 3).unwrap();
        assert_eq!(grid.cells(), &[E, F, E, S, S, S]);
    }

    #[test]
    fn test_new_never_truncates() {
        let grid = Grid::new(&[E, E, E, E, E], 2, 2).unwrap();
        assert_eq!(grid.cells().len(), 5);
        // The fifth cell is outside the playfield but still counts.
        assert_eq!(grid.get(0, 2), None);
        assert!(grid.has_empty());
    }

    #[test]
    fn test_new_copies_instead_of_mutating_input() {
        let blocks = vec![E, E];
        let grid = Grid::new(&blocks, 2, 2).unwrap();
        assert_eq!(blocks.len(), 2);
        assert_eq!(grid.cells().len(), 4);
    }

    #[test]
    fn test_zero_width_is_rejected() {
        assert_eq!(Grid::new(&[E], 0, 1), Err(SimError::ZeroWidth));
    }

    #[test]
    fn test_get_and_set_respect_bounds() {
        let mut grid = Grid::new(&[E; 6], 3, 2).unwrap();
        assert!(grid.set(2, 1, F));
        assert_eq!(grid.get(2, 1), Some(F));
        assert_eq!(grid.cells()[5], F);
        assert!(!grid.set(3, 0, F));
        assert!(!grid.set(0, 2, F));
        assert_eq!(grid.get(3, 0), None);
    }

    #[test]
    fn test_first_empty_and_count() {
        let grid = Grid::new(&[S, F, S, E], 2, 2).unwrap();
        assert_eq!(grid.first_empty(), Some((1, 1)));
        assert_eq!(grid.count(S), 2);
        let full = Grid::new(&[S, F], 2, 1).unwrap();
        assert_eq!(full.first_empty(), None);
    }
}
