//! Bounded 2D grid geometry.

use rand::Rng;
use serde::{Deserialize, Serialize};
use shepherd_core::{Cell, Direction};

/// An obstacle-free, non-wrapping grid of `rows` x `cols` cells
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    pub rows: i32,
    pub cols: i32,
}

impl Grid {
    pub fn new(rows: i32, cols: i32) -> Self {
        Self { rows, cols }
    }

    pub fn contains(&self, cell: Cell) -> bool {
        (0..self.rows).contains(&cell.row) && (0..self.cols).contains(&cell.col)
    }

    /// Number of cells on the grid
    pub fn len(&self) -> usize {
        (self.rows.max(0) as usize) * (self.cols.max(0) as usize)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Center cell, rounded down on even dimensions
    pub fn center(&self) -> Cell {
        Cell::new(self.rows / 2, self.cols / 2)
    }

    /// In-bounds 4-neighbours of a cell, in search expansion order
    pub fn neighbors(&self, cell: Cell) -> impl Iterator<Item = Cell> + '_ {
        Direction::all()
            .into_iter()
            .map(move |direction| cell.offset(direction))
            .filter(move |neighbor| self.contains(*neighbor))
    }

    /// Uniformly random cell
    pub fn random_cell<R: Rng + ?Sized>(&self, rng: &mut R) -> Cell {
        Cell::new(rng.gen_range(0..self.rows), rng.gen_range(0..self.cols))
    }

    /// Row-major index of an in-bounds cell
    pub fn index_of(&self, cell: Cell) -> Option<usize> {
        if self.contains(cell) {
            Some((cell.row * self.cols + cell.col) as usize)
        } else {
            None
        }
    }

    /// Iterator over all cells in row-major order
    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        (0..self.rows).flat_map(move |row| (0..self.cols).map(move |col| Cell::new(row, col)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_grid_bounds() {
        let grid = Grid::new(10, 15);
        assert!(grid.contains(Cell::new(0, 0)));
        assert!(grid.contains(Cell::new(9, 14)));
        assert!(!grid.contains(Cell::new(10, 0)));
        assert!(!grid.contains(Cell::new(0, 15)));
        assert!(!grid.contains(Cell::new(-1, 3)));
        assert_eq!(grid.len(), 150);
    }

    #[test]
    fn test_center_uses_integer_division() {
        assert_eq!(Grid::new(10, 15).center(), Cell::new(5, 7));
        assert_eq!(Grid::new(3, 3).center(), Cell::new(1, 1));
        assert_eq!(Grid::new(1, 1).center(), Cell::new(0, 0));
    }

    #[test]
    fn test_neighbors() {
        let grid = Grid::new(3, 3);

        let middle: Vec<_> = grid.neighbors(Cell::new(1, 1)).collect();
        assert_eq!(
            middle,
            vec![
                Cell::new(0, 1),
                Cell::new(2, 1),
                Cell::new(1, 0),
                Cell::new(1, 2)
            ]
        );

        let corner: Vec<_> = grid.neighbors(Cell::new(0, 0)).collect();
        assert_eq!(corner, vec![Cell::new(1, 0), Cell::new(0, 1)]);
    }

    #[test]
    fn test_index_of() {
        let grid = Grid::new(4, 5);
        assert_eq!(grid.index_of(Cell::new(0, 0)), Some(0));
        assert_eq!(grid.index_of(Cell::new(2, 3)), Some(13));
        assert_eq!(grid.index_of(Cell::new(4, 0)), None);
        assert_eq!(grid.cells().count(), 20);
    }

    #[test]
    fn test_random_cell_in_bounds() {
        let grid = Grid::new(3, 7);
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        for _ in 0..200 {
            assert!(grid.contains(grid.random_cell(&mut rng)));
        }
    }
}
