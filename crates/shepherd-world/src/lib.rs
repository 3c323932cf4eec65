//! Simulation core.
//!
//! The grid geometry, the breadth-first path search that steers every agent,
//! and the tick rules that move the shepherd and wolves and decide the outcome.

pub mod grid;
pub mod pathfinding;
pub mod placement;
pub mod simulation;

pub use grid::Grid;
pub use pathfinding::{next_step, shortest_path};
pub use simulation::{RunReport, Simulation, SimulationState, Snapshot, TickSummary};
