//! Terminal drawing.

use crate::controls::Layout;
use crossterm::{
    cursor::MoveTo,
    queue,
    style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    terminal::{Clear, ClearType},
};
use shepherd_core::{FinishReason, Outcome};
use shepherd_world::Snapshot;
use std::io::{self, Write};

const SHEEP: (char, Color) = ('o', Color::Green);
const WOLF: (char, Color) = ('W', Color::Red);
const SHEPHERD: (char, Color) = ('S', Color::Blue);
const EMPTY: (char, Color) = ('·', Color::DarkGrey);

/// Redraw the whole screen from a snapshot.
pub fn draw<W: Write>(
    out: &mut W,
    layout: &Layout,
    snapshot: &Snapshot,
    running: bool,
) -> io::Result<()> {
    queue!(out, Clear(ClearType::All))?;

    // Grid
    for row in 0..layout.grid_rows {
        queue!(out, MoveTo(0, row), SetForegroundColor(EMPTY.1))?;
        for _ in 0..layout.grid_cols {
            queue!(out, Print(EMPTY.0), Print(' '))?;
        }
    }

    // Wolves over sheep, shepherd on top
    let agents = snapshot
        .sheep
        .iter()
        .map(|cell| (cell, SHEEP))
        .chain(snapshot.wolves.iter().map(|cell| (cell, WOLF)))
        .chain(std::iter::once((&snapshot.shepherd, SHEPHERD)));
    for (cell, (glyph, color)) in agents {
        let (column, row) = layout.cell_position(*cell);
        queue!(out, MoveTo(column, row), SetForegroundColor(color), Print(glyph))?;
    }
    queue!(out, ResetColor)?;

    // Buttons
    for button in &layout.buttons {
        queue!(
            out,
            MoveTo(button.rect.x, button.rect.y),
            SetBackgroundColor(Color::Grey),
            SetForegroundColor(Color::Black),
            Print(format!("{:^width$}", button.label, width = button.rect.width as usize)),
            ResetColor
        )?;
    }

    queue!(
        out,
        MoveTo(0, layout.status_row),
        Print(status_line(snapshot, running))
    )?;

    if let Some(message) = result_message(snapshot) {
        queue!(
            out,
            MoveTo(0, layout.result_row),
            SetForegroundColor(Color::Yellow),
            Print(message),
            ResetColor
        )?;
    }

    out.flush()
}

pub fn status_line(snapshot: &Snapshot, running: bool) -> String {
    let mode = match (snapshot.outcome, running) {
        (Some(_), _) => "finished",
        (None, true) => "running",
        (None, false) => "paused",
    };
    format!(
        "Sheep: {}  Step: {}/{}  [{}]",
        snapshot.sheep.len(),
        snapshot.tick,
        snapshot.max_steps,
        mode
    )
}

pub fn result_message(snapshot: &Snapshot) -> Option<&'static str> {
    match (snapshot.outcome?, snapshot.finish_reason) {
        (Outcome::ShepherdWins, _) => Some("Shepherd wins!"),
        (Outcome::ShepherdLoses, Some(FinishReason::StepBudgetExhausted)) => {
            Some("Defeat. Out of steps.")
        }
        (Outcome::ShepherdLoses, _) => Some("Defeat. All sheep eaten."),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shepherd_core::Cell;
    use shepherd_world::{Grid, SimulationState};

    fn snapshot(wolves: Vec<Cell>, sheep: Vec<Cell>) -> Snapshot {
        SimulationState::from_positions(Grid::new(3, 3), Cell::new(2, 2), sheep, wolves, 100)
            .unwrap()
            .snapshot()
    }

    #[test]
    fn test_status_line() {
        let snapshot = snapshot(vec![Cell::new(0, 0)], vec![Cell::new(0, 2), Cell::new(1, 0)]);
        assert_eq!(status_line(&snapshot, false), "Sheep: 2  Step: 0/100  [paused]");
        assert_eq!(status_line(&snapshot, true), "Sheep: 2  Step: 0/100  [running]");
    }

    #[test]
    fn test_result_messages() {
        assert_eq!(result_message(&snapshot(vec![], vec![Cell::new(0, 0)])), None);

        let mut state = SimulationState::from_positions(
            Grid::new(3, 3),
            Cell::new(2, 2),
            vec![],
            vec![Cell::new(0, 0)],
            100,
        )
        .unwrap();
        state.advance_tick();
        assert_eq!(result_message(&state.snapshot()), Some("Defeat. All sheep eaten."));

        let mut state = SimulationState::from_positions(
            Grid::new(1, 10),
            Cell::new(0, 0),
            vec![Cell::new(0, 9)],
            vec![],
            1,
        )
        .unwrap();
        state.advance_tick();
        assert_eq!(result_message(&state.snapshot()), Some("Defeat. Out of steps."));

        let mut state = SimulationState::from_positions(
            Grid::new(1, 3),
            Cell::new(0, 0),
            vec![Cell::new(0, 1)],
            vec![Cell::new(0, 2)],
            100,
        )
        .unwrap();
        state.advance_tick();
        assert_eq!(result_message(&state.snapshot()), Some("Shepherd wins!"));
    }

    #[test]
    fn test_draw_writes_buttons_and_status() {
        let snapshot = snapshot(vec![Cell::new(0, 0)], vec![Cell::new(0, 2)]);
        let layout = Layout::new(3, 3);
        let mut out = Vec::new();

        draw(&mut out, &layout, &snapshot, false).unwrap();

        let screen = String::from_utf8_lossy(&out);
        assert!(screen.contains("Start"));
        assert!(screen.contains("Pause"));
        assert!(screen.contains("Reset"));
        assert!(screen.contains("Sheep: 1  Step: 0/100"));
        assert!(screen.contains('S'));
        assert!(screen.contains('W'));
        assert!(!screen.contains("Shepherd wins!"));
    }
}
