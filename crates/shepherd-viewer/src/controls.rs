//! Screen layout, buttons, and input → intent translation.

use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use shepherd_core::Cell;

/// Terminal columns used by one grid cell
pub const CELL_WIDTH: u16 = 2;

const BUTTON_WIDTH: u16 = 9;
const BUTTON_GAP: u16 = 2;

/// A user command, independent of how it was entered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    Start,
    Pause,
    Reset,
    Quit,
}

/// Screen rectangle in terminal cells
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x: u16,
    pub y: u16,
    pub width: u16,
    pub height: u16,
}

impl Rect {
    pub fn contains(&self, column: u16, row: u16) -> bool {
        column >= self.x
            && column < self.x.saturating_add(self.width)
            && row >= self.y
            && row < self.y.saturating_add(self.height)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Button {
    pub label: &'static str,
    pub rect: Rect,
    pub intent: Intent,
}

/// Where everything goes on screen for a grid of a given size.
///
/// Shared by the renderer and hit-testing so clicks always line up with
/// what was drawn.
#[derive(Debug, Clone)]
pub struct Layout {
    pub grid_rows: u16,
    pub grid_cols: u16,
    pub buttons: Vec<Button>,
    pub status_row: u16,
    pub result_row: u16,
}

impl Layout {
    pub fn new(rows: i32, cols: i32) -> Self {
        let grid_rows = rows.clamp(0, u16::MAX as i32) as u16;
        let grid_cols = cols.clamp(0, u16::MAX as i32) as u16;
        let button_row = grid_rows.saturating_add(1);

        let buttons = [
            ("Start", Intent::Start),
            ("Pause", Intent::Pause),
            ("Reset", Intent::Reset),
        ]
        .into_iter()
        .enumerate()
        .map(|(i, (label, intent))| Button {
            label,
            rect: Rect {
                x: i as u16 * (BUTTON_WIDTH + BUTTON_GAP),
                y: button_row,
                width: BUTTON_WIDTH,
                height: 1,
            },
            intent,
        })
        .collect();

        Self {
            grid_rows,
            grid_cols,
            buttons,
            status_row: button_row.saturating_add(2),
            result_row: button_row.saturating_add(3),
        }
    }

    /// Top-left terminal position of a grid cell
    pub fn cell_position(&self, cell: Cell) -> (u16, u16) {
        let column = (cell.col.max(0) as u16).saturating_mul(CELL_WIDTH);
        let row = cell.row.max(0) as u16;
        (column, row)
    }

    pub fn button_at(&self, column: u16, row: u16) -> Option<&Button> {
        self.buttons
            .iter()
            .find(|button| button.rect.contains(column, row))
    }
}

/// Translate a terminal event into an intent, if it carries one.
pub fn intent_for_event(event: &Event, layout: &Layout) -> Option<Intent> {
    match event {
        Event::Key(key) => intent_for_key(key),
        Event::Mouse(mouse) => intent_for_mouse(mouse, layout),
        _ => None,
    }
}

fn intent_for_key(key: &KeyEvent) -> Option<Intent> {
    if key.kind != KeyEventKind::Press {
        return None;
    }

    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => Some(Intent::Quit),
        KeyCode::Char('s') | KeyCode::Char(' ') => Some(Intent::Start),
        KeyCode::Char('p') => Some(Intent::Pause),
        KeyCode::Char('r') => Some(Intent::Reset),
        KeyCode::Char('q') | KeyCode::Esc => Some(Intent::Quit),
        _ => None,
    }
}

fn intent_for_mouse(mouse: &MouseEvent, layout: &Layout) -> Option<Intent> {
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => layout
            .button_at(mouse.column, mouse.row)
            .map(|button| button.intent),
        _ => None,
    }
}
