//! Input handling for the terminal frontend

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use glam::Vec2;
use ratatui::layout::Rect;

use crate::entities::Axis;

/// Keyboard action that can be triggered by the player
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputAction {
    /// Move along an axis at full speed; `direction` is -1 or 1
    Steer { axis: Axis, direction: f32 },
    /// Key for an axis was released
    Stop(Axis),
    SlowDown,
    ToggleInventory,
    ToggleStationInventories,
    /// Log the player's state
    Snapshot,
    Quit,
}

/// Pointer action in viewport pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerAction {
    Down(Vec2),
    Up(Vec2),
    Move(Vec2),
}

impl PointerAction {
    pub fn position(&self) -> Vec2 {
        match *self {
            PointerAction::Down(p) | PointerAction::Up(p) | PointerAction::Move(p) => p,
        }
    }
}

/// Map a key event to an action
pub fn key_action(key: &KeyEvent) -> Option<InputAction> {
    let code = match key.code {
        KeyCode::Char(c) => KeyCode::Char(c.to_ascii_lowercase()),
        other => other,
    };

    if key.kind == KeyEventKind::Release {
        return match code {
            KeyCode::Char('w') | KeyCode::Char('s') => Some(InputAction::Stop(Axis::Vertical)),
            KeyCode::Char('a') | KeyCode::Char('d') => Some(InputAction::Stop(Axis::Horizontal)),
            _ => None,
        };
    }

    // Movement repeats while held
    match code {
        KeyCode::Char('w') => return Some(InputAction::Steer { axis: Axis::Vertical, direction: -1.0 }),
        KeyCode::Char('s') => return Some(InputAction::Steer { axis: Axis::Vertical, direction: 1.0 }),
        KeyCode::Char('a') => return Some(InputAction::Steer { axis: Axis::Horizontal, direction: -1.0 }),
        KeyCode::Char('d') => return Some(InputAction::Steer { axis: Axis::Horizontal, direction: 1.0 }),
        _ => {}
    }

    if key.kind != KeyEventKind::Press {
        return None;
    }

    match code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => Some(InputAction::Quit),
        KeyCode::Char(' ') => Some(InputAction::SlowDown),
        KeyCode::Char('e') => Some(InputAction::ToggleInventory),
        KeyCode::Char('v') => Some(InputAction::ToggleStationInventories),
        KeyCode::Char('b') => Some(InputAction::Snapshot),
        KeyCode::Char('q') | KeyCode::Esc => Some(InputAction::Quit),
        _ => None,
    }
}

/// Convert a terminal cell to the viewport pixel at its center
///
/// Cells outside `area` are clamped to its edge so a drag that leaves the
/// scene still resolves somewhere on screen.
pub fn cell_to_pixel(column: u16, row: u16, area: Rect, viewport: Vec2) -> Vec2 {
    if area.width == 0 || area.height == 0 {
        return Vec2::ZERO;
    }
    let col = column.clamp(area.x, area.x + area.width - 1) - area.x;
    let row = row.clamp(area.y, area.y + area.height - 1) - area.y;

    Vec2::new(
        (col as f32 + 0.5) * viewport.x / area.width as f32,
        (row as f32 + 0.5) * viewport.y / area.height as f32,
    )
}

/// Map a mouse event over the scene area to a pointer action
pub fn pointer_action(mouse: &MouseEvent, area: Rect, viewport: Vec2) -> Option<PointerAction> {
    let pos = cell_to_pixel(mouse.column, mouse.row, area, viewport);
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => Some(PointerAction::Down(pos)),
        MouseEventKind::Up(MouseButton::Left) => Some(PointerAction::Up(pos)),
        MouseEventKind::Drag(MouseButton::Left) | MouseEventKind::Moved => Some(PointerAction::Move(pos)),
        _ => None,
    }
}
