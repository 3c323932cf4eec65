//! Core type definitions for the simulation.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A (row, column) coordinate on the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Cell {
    pub row: i32,
    pub col: i32,
}

impl Cell {
    pub fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    pub fn offset(&self, direction: Direction) -> Self {
        let (d_row, d_col) = direction.to_delta();
        Self {
            row: self.row + d_row,
            col: self.col + d_col,
        }
    }

    /// Manhattan distance to another cell
    pub fn manhattan_distance(&self, other: &Cell) -> i32 {
        (self.row - other.row).abs() + (self.col - other.col).abs()
    }
}

impl From<(i32, i32)> for Cell {
    fn from((row, col): (i32, i32)) -> Self {
        Self::new(row, col)
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Direction for a single step on the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// (row, col) delta of one step
    pub fn to_delta(&self) -> (i32, i32) {
        match self {
            Direction::Up => (-1, 0),
            Direction::Down => (1, 0),
            Direction::Left => (0, -1),
            Direction::Right => (0, 1),
        }
    }

    /// All directions in search expansion order.
    ///
    /// The order decides which of several equally short paths a search
    /// returns, so it must not change.
    pub fn all() -> [Direction; 4] {
        [
            Direction::Up,
            Direction::Down,
            Direction::Left,
            Direction::Right,
        ]
    }
}

/// Final result of a simulation run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    ShepherdWins,
    ShepherdLoses,
}

/// Why a simulation run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FinishReason {
    /// A wolf ended the tick on the shepherd's cell.
    WolfCaughtShepherd,
    /// Every sheep was eaten.
    AllSheepEaten,
    /// The step budget ran out with sheep still alive.
    StepBudgetExhausted,
}

impl FinishReason {
    pub fn outcome(&self) -> Outcome {
        match self {
            FinishReason::WolfCaughtShepherd => Outcome::ShepherdWins,
            FinishReason::AllSheepEaten | FinishReason::StepBudgetExhausted => {
                Outcome::ShepherdLoses
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manhattan_distance() {
        let a = Cell::new(0, 0);
        let b = Cell::new(3, 4);
        assert_eq!(a.manhattan_distance(&b), 7);
        assert_eq!(b.manhattan_distance(&a), 7);
    }

    #[test]
    fn test_direction_order() {
        let deltas: Vec<_> = Direction::all().iter().map(|d| d.to_delta()).collect();
        assert_eq!(deltas, vec![(-1, 0), (1, 0), (0, -1), (0, 1)]);
    }

    #[test]
    fn test_cell_offset() {
        let cell = Cell::new(2, 2);
        assert_eq!(cell.offset(Direction::Up), Cell::new(1, 2));
        assert_eq!(cell.offset(Direction::Left), Cell::new(2, 1));
    }

    #[test]
    fn test_finish_reason_outcome() {
        assert_eq!(
            FinishReason::WolfCaughtShepherd.outcome(),
            Outcome::ShepherdWins
        );
        assert_eq!(FinishReason::AllSheepEaten.outcome(), Outcome::ShepherdLoses);
        assert_eq!(
            FinishReason::StepBudgetExhausted.outcome(),
            Outcome::ShepherdLoses
        );
    }
}
