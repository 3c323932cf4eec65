//! Random agent placement by bounded rejection sampling.

use crate::grid::Grid;
use rand::Rng;
use shepherd_core::{Cell, Error, Result};
use std::collections::BTreeSet;

/// Draws allowed per requested cell before placement gives up
pub const ATTEMPTS_PER_CELL: usize = 1000;

/// Draw `count` distinct uniform cells, none of which is in `exclude`.
///
/// Cells are returned in the order they were first drawn.
pub fn random_distinct_cells<R: Rng + ?Sized>(
    grid: &Grid,
    count: usize,
    exclude: &BTreeSet<Cell>,
    rng: &mut R,
) -> Result<Vec<Cell>> {
    let free = grid.cells().filter(|cell| !exclude.contains(cell)).count();
    if count > free {
        return Err(Error::InvalidConfig(format!(
            "cannot place {} agents on {} free cells",
            count, free
        )));
    }

    let mut taken = BTreeSet::new();
    let mut placed = Vec::with_capacity(count);
    let budget = count.saturating_mul(ATTEMPTS_PER_CELL);

    for _ in 0..budget {
        if placed.len() == count {
            break;
        }

        let cell = grid.random_cell(rng);
        if !exclude.contains(&cell) && taken.insert(cell) {
            placed.push(cell);
        }
    }

    if placed.len() < count {
        return Err(Error::PlacementExhausted {
            requested: count,
            placed: placed.len(),
        });
    }

    Ok(placed)
}
