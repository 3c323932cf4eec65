//! Simulation state and the per-tick rules.

use crate::grid::Grid;
use crate::pathfinding::next_step;
use crate::placement::random_distinct_cells;
use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use shepherd_core::{Cell, Error, FinishReason, Outcome, Result, SimulationConfig};
use std::collections::BTreeSet;
use tracing::{debug, info, instrument};

/// Positions of every agent plus the tick counter and terminal status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimulationState {
    grid: Grid,
    shepherd: Cell,
    sheep: BTreeSet<Cell>,
    wolves: Vec<Cell>,
    tick: u64,
    max_steps: u64,
    finish: Option<FinishReason>,
}

/// What happened during one tick
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickSummary {
    pub tick: u64,
    pub shepherd_from: Cell,
    pub shepherd_to: Cell,
    /// (from, to) per wolf, in wolf order
    pub wolf_moves: Vec<(Cell, Cell)>,
    pub sheep_eaten: Vec<Cell>,
    pub finish: Option<FinishReason>,
}

/// Read-only view of the state for presentation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub rows: i32,
    pub cols: i32,
    pub tick: u64,
    pub max_steps: u64,
    pub shepherd: Cell,
    pub sheep: Vec<Cell>,
    pub wolves: Vec<Cell>,
    pub outcome: Option<Outcome>,
    pub finish_reason: Option<FinishReason>,
}

/// Summary of a run played to its end
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunReport {
    pub ticks: u64,
    pub sheep_at_start: usize,
    pub sheep_remaining: usize,
    pub sheep_eaten: usize,
    pub outcome: Outcome,
    pub finish_reason: FinishReason,
}

impl SimulationState {
    /// Fresh state: shepherd at the grid center, then sheep, then wolves on
    /// random distinct cells that avoid every agent placed before them.
    pub fn reset<R: Rng + ?Sized>(config: &SimulationConfig, rng: &mut R) -> Result<Self> {
        config.validate()?;

        let grid = Grid::new(config.rows, config.cols);
        let shepherd = grid.center();

        let mut occupied = BTreeSet::from([shepherd]);
        let sheep: BTreeSet<Cell> = random_distinct_cells(&grid, config.num_sheep, &occupied, rng)?
            .into_iter()
            .collect();
        occupied.extend(sheep.iter().copied());
        let wolves = random_distinct_cells(&grid, config.num_wolves, &occupied, rng)?;

        info!(
            event = "reset",
            rows = grid.rows,
            cols = grid.cols,
            shepherd = %shepherd,
            sheep = sheep.len(),
            wolves = wolves.len(),
            "Simulation reset"
        );

        Ok(Self {
            grid,
            shepherd,
            sheep,
            wolves,
            tick: 0,
            max_steps: config.max_steps,
            finish: None,
        })
    }

    /// Build a state from explicit positions.
    pub fn from_positions(
        grid: Grid,
        shepherd: Cell,
        sheep: impl IntoIterator<Item = Cell>,
        wolves: Vec<Cell>,
        max_steps: u64,
    ) -> Result<Self> {
        if grid.is_empty() {
            return Err(Error::InvalidConfig("grid has no cells".to_string()));
        }
        if max_steps == 0 {
            return Err(Error::InvalidConfig("max_steps must be at least 1".to_string()));
        }

        let out_of_bounds = |cell: &Cell| {
            Error::InvalidConfig(format!(
                "cell {} is outside the {}x{} grid",
                cell, grid.rows, grid.cols
            ))
        };

        if !grid.contains(shepherd) {
            return Err(out_of_bounds(&shepherd));
        }

        let mut sheep_set = BTreeSet::new();
        for cell in sheep {
            if !grid.contains(cell) {
                return Err(out_of_bounds(&cell));
            }
            if cell == shepherd {
                return Err(Error::InvalidConfig(format!(
                    "sheep at {} shares the shepherd's cell",
                    cell
                )));
            }
            if !sheep_set.insert(cell) {
                return Err(Error::InvalidConfig(format!("duplicate sheep at {}", cell)));
            }
        }

        if let Some(cell) = wolves.iter().find(|cell| !grid.contains(**cell)) {
            return Err(out_of_bounds(cell));
        }

        Ok(Self {
            grid,
            shepherd,
            sheep: sheep_set,
            wolves,
            tick: 0,
            max_steps,
            finish: None,
        })
    }

    /// Advance one tick. Returns `None` without touching the state once the
    /// run has finished.
    pub fn advance_tick(&mut self) -> Option<TickSummary> {
        if self.finish.is_some() {
            return None;
        }

        self.tick += 1;

        // Shepherd heads for the nearest sheep
        let shepherd_from = self.shepherd;
        if let Some(step) = next_step(&self.grid, self.shepherd, &self.sheep) {
            self.shepherd = step;
        }

        // Every wolf targets the same snapshot: sheep plus the moved shepherd
        let mut targets = self.sheep.clone();
        targets.insert(self.shepherd);

        let wolf_moves: Vec<(Cell, Cell)> = self
            .wolves
            .iter()
            .map(|&wolf| {
                let to = next_step(&self.grid, wolf, &targets).unwrap_or(wolf);
                (wolf, to)
            })
            .collect();
        self.wolves = wolf_moves.iter().map(|&(_, to)| to).collect();

        let sheep_eaten: Vec<Cell> = self
            .sheep
            .iter()
            .filter(|sheep| self.wolves.contains(*sheep))
            .copied()
            .collect();
        for sheep in &sheep_eaten {
            self.sheep.remove(sheep);
        }

        self.finish = self.check_for_finish();

        debug!(
            event = "tick",
            tick = self.tick,
            shepherd = %self.shepherd,
            sheep_remaining = self.sheep.len(),
            sheep_eaten = sheep_eaten.len(),
            "Tick advanced"
        );

        if let Some(reason) = self.finish {
            info!(
                event = "finished",
                tick = self.tick,
                reason = ?reason,
                outcome = ?reason.outcome(),
                sheep_remaining = self.sheep.len(),
                "Simulation finished"
            );
        }

        Some(TickSummary {
            tick: self.tick,
            shepherd_from,
            shepherd_to: self.shepherd,
            wolf_moves,
            sheep_eaten,
            finish: self.finish,
        })
    }

    /// Advance until the run finishes and summarise it.
    pub fn run_to_completion(&mut self) -> RunReport {
        let sheep_at_start = self.sheep.len();

        let finish_reason = loop {
            if let Some(reason) = self.finish {
                break reason;
            }
            self.advance_tick();
        };

        RunReport {
            ticks: self.tick,
            sheep_at_start,
            sheep_remaining: self.sheep.len(),
            sheep_eaten: sheep_at_start - self.sheep.len(),
            outcome: finish_reason.outcome(),
            finish_reason,
        }
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            rows: self.grid.rows,
            cols: self.grid.cols,
            tick: self.tick,
            max_steps: self.max_steps,
            shepherd: self.shepherd,
            sheep: self.sheep.iter().copied().collect(),
            wolves: self.wolves.clone(),
            outcome: self.outcome(),
            finish_reason: self.finish,
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn shepherd(&self) -> Cell {
        self.shepherd
    }

    pub fn sheep(&self) -> &BTreeSet<Cell> {
        &self.sheep
    }

    pub fn wolves(&self) -> &[Cell] {
        &self.wolves
    }

    pub fn tick(&self) -> u64 {
        self.tick
    }

    pub fn is_terminal(&self) -> bool {
        self.finish.is_some()
    }

    pub fn outcome(&self) -> Option<Outcome> {
        self.finish.map(|reason| reason.outcome())
    }

    pub fn finish_reason(&self) -> Option<FinishReason> {
        self.finish
    }

    fn check_for_finish(&self) -> Option<FinishReason> {
        if self.wolves.contains(&self.shepherd) {
            Some(FinishReason::WolfCaughtShepherd)
        } else if self.sheep.is_empty() {
            Some(FinishReason::AllSheepEaten)
        } else if self.tick >= self.max_steps {
            Some(FinishReason::StepBudgetExhausted)
        } else {
            None
        }
    }
}

/// A simulation together with the configuration and RNG that reset it.
pub struct Simulation {
    config: SimulationConfig,
    rng: ChaCha8Rng,
    state: SimulationState,
}

impl Simulation {
    pub fn new(config: SimulationConfig) -> Result<Self> {
        let mut rng = match config.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };
        let state = SimulationState::reset(&config, &mut rng)?;

        Ok(Self { config, rng, state })
    }

    /// Replace the state with a freshly placed one.
    pub fn reset(&mut self) -> Result<()> {
        self.state = SimulationState::reset(&self.config, &mut self.rng)?;
        Ok(())
    }

    pub fn advance_tick(&mut self) -> Option<TickSummary> {
        self.state.advance_tick()
    }

    /// Play the current state to the end
    #[instrument(skip(self), fields(max_steps = self.config.max_steps))]
    pub fn run(&mut self) -> RunReport {
        info!("Running simulation to completion");
        let report = self.state.run_to_completion();
        info!(
            event = "run_complete",
            ticks = report.ticks,
            sheep_eaten = report.sheep_eaten,
            outcome = ?report.outcome,
            "Run complete"
        );
        report
    }

    pub fn state(&self) -> &SimulationState {
        &self.state
    }
}
