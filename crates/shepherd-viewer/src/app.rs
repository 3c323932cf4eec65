//! App controller: owns the simulation and the running/paused flag.

use crate::controls::Intent;
use shepherd_core::{Result, SimulationConfig};
use shepherd_world::{Simulation, Snapshot, TickSummary};
use tracing::{debug, info};

pub struct App {
    simulation: Simulation,
    running: bool,
    quit: bool,
}

impl App {
    pub fn new(config: SimulationConfig) -> Result<Self> {
        Ok(Self {
            simulation: Simulation::new(config)?,
            running: false,
            quit: false,
        })
    }

    pub fn apply(&mut self, intent: Intent) -> Result<()> {
        info!(event = "intent", intent = ?intent, tick = self.simulation.state().tick());

        match intent {
            Intent::Start => self.running = true,
            Intent::Pause => self.running = false,
            Intent::Reset => {
                self.running = false;
                self.simulation.reset()?;
            }
            Intent::Quit => self.quit = true,
        }

        Ok(())
    }

    /// Advance at most one tick, and only while running.
    pub fn on_frame(&mut self) -> Option<TickSummary> {
        if !self.running {
            return None;
        }

        let summary = self.simulation.advance_tick()?;
        if !summary.sheep_eaten.is_empty() {
            debug!(
                event = "sheep_eaten",
                tick = summary.tick,
                cells = ?summary.sheep_eaten,
                "Wolves ate sheep"
            );
        }
        Some(summary)
    }

    pub fn snapshot(&self) -> Snapshot {
        self.simulation.state().snapshot()
    }

    pub fn simulation(&self) -> &Simulation {
        &self.simulation
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn should_quit(&self) -> bool {
        self.quit
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn app() -> App {
        App::new(SimulationConfig {
            seed: Some(42),
            ..Default::default()
        })
        .unwrap()
    }

    #[test]
    fn test_paused_app_does_not_advance() {
        let mut app = app();
        assert!(!app.is_running());
        assert!(app.on_frame().is_none());
        assert_eq!(app.snapshot().tick, 0);
    }

    #[test]
    fn test_start_and_pause() {
        let mut app = app();

        app.apply(Intent::Start).unwrap();
        assert!(app.on_frame().is_some());
        assert_eq!(app.snapshot().tick, 1);

        app.apply(Intent::Pause).unwrap();
        assert!(app.on_frame().is_none());
        assert_eq!(app.snapshot().tick, 1);
    }

    #[test]
    fn test_reset_stops_and_replaces_state() {
        let mut app = app();
        app.apply(Intent::Start).unwrap();
        app.on_frame();

        app.apply(Intent::Reset).unwrap();

        assert!(!app.is_running());
        let snapshot = app.snapshot();
        assert_eq!(snapshot.tick, 0);
        assert_eq!(snapshot.sheep.len(), 10);
        assert_eq!(snapshot.wolves.len(), 3);
        assert!(snapshot.outcome.is_none());
    }

    #[test]
    fn test_finished_run_stops_advancing() {
        let mut app = app();
        app.apply(Intent::Start).unwrap();

        while app.on_frame().is_some() {}

        let snapshot = app.snapshot();
        assert!(snapshot.outcome.is_some());
        assert!(snapshot.tick <= 100);
        assert!(app.on_frame().is_none());
    }

    #[test]
    fn test_quit() {
        let mut app = app();
        assert!(!app.should_quit());
        app.apply(Intent::Quit).unwrap();
        assert!(app.should_quit());
    }
}
