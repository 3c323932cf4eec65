//! Breadth-first shortest paths on the grid.
//!
//! Every in-bounds cell is walkable and moves are 4-directional, so BFS
//! gives shortest paths. Neighbours are expanded in [`Direction::all`]
//! order and a cell keeps the first predecessor that discovered it, which
//! makes the choice between equally short paths deterministic.
//!
//! [`Direction::all`]: shepherd_core::Direction::all

use crate::grid::Grid;
use shepherd_core::Cell;
use std::collections::{BTreeSet, VecDeque};

/// Shortest path from `start` to the nearest cell in `goals`.
///
/// The path includes both endpoints. It is `[start]` when `start` is itself
/// a goal and empty when `goals` is empty, no goal is reachable, or `start`
/// lies outside the grid.
pub fn shortest_path(grid: &Grid, start: Cell, goals: &BTreeSet<Cell>) -> Vec<Cell> {
    let Some(start_index) = grid.index_of(start) else {
        return Vec::new();
    };
    if goals.is_empty() {
        return Vec::new();
    }

    // prev[i] = predecessor of cell i; visited[i] marks discovered cells
    let mut visited = vec![false; grid.len()];
    let mut prev: Vec<Option<Cell>> = vec![None; grid.len()];
    let mut queue = VecDeque::new();

    visited[start_index] = true;
    queue.push_back(start);

    while let Some(current) = queue.pop_front() {
        if goals.contains(&current) {
            return reconstruct(grid, &prev, current);
        }

        for neighbor in grid.neighbors(current) {
            // neighbors() only yields in-bounds cells
            let Some(index) = grid.index_of(neighbor) else {
                continue;
            };
            if !visited[index] {
                visited[index] = true;
                prev[index] = Some(current);
                queue.push_back(neighbor);
            }
        }
    }

    Vec::new()
}

/// The cell an agent at `start` should step to next, if it should move at all.
pub fn next_step(grid: &Grid, start: Cell, goals: &BTreeSet<Cell>) -> Option<Cell> {
    shortest_path(grid, start, goals).get(1).copied()
}

fn reconstruct(grid: &Grid, prev: &[Option<Cell>], goal: Cell) -> Vec<Cell> {
    let mut path = vec![goal];
    let mut current = goal;

    while let Some(previous) = grid.index_of(current).and_then(|index| prev[index]) {
        path.push(previous);
        current = previous;
    }

    path.reverse();
    path
}
