//! Input mapping for the terminal host.
//!
//! Translates crossterm key and mouse events into host actions. Mouse
//! positions stay in terminal cells here; the viewport turns them into world
//! coordinates.

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, MouseButton, MouseEvent, MouseEventKind};

/// Walking direction on the map.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Unit step in world axes (y grows downward).
    pub fn delta(self) -> (f64, f64) {
        match self {
            Direction::Up => (0.0, -1.0),
            Direction::Down => (0.0, 1.0),
            Direction::Left => (-1.0, 0.0),
            Direction::Right => (1.0, 0.0),
        }
    }
}

/// Something the host should do in response to an input event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostAction {
    PointerMoved { column: u16, row: u16 },
    PrimaryClick { column: u16, row: u16 },
    Reel,
    Cancel,
    ToggleRod,
    Walk(Direction),
    Quit,
}

/// Maps a terminal event to a host action, if it has one.
pub fn map_event(event: &Event) -> Option<HostAction> {
    match event {
        Event::Key(key) => map_key(key),
        Event::Mouse(mouse) => map_mouse(mouse),
        _ => None,
    }
}

fn map_key(key: &KeyEvent) -> Option<HostAction> {
    // Windows reports releases too
    if key.kind == KeyEventKind::Release {
        return None;
    }
    match key.code {
        KeyCode::Char('q') | KeyCode::Char('Q') => Some(HostAction::Quit),
        KeyCode::Esc => Some(HostAction::Cancel),
        KeyCode::Char('r') | KeyCode::Char('R') | KeyCode::Char(' ') => Some(HostAction::Reel),
        KeyCode::Char('e') | KeyCode::Char('E') => Some(HostAction::ToggleRod),
        KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('W') => {
            Some(HostAction::Walk(Direction::Up))
        }
        KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('S') => {
            Some(HostAction::Walk(Direction::Down))
        }
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => {
            Some(HostAction::Walk(Direction::Left))
        }
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => {
            Some(HostAction::Walk(Direction::Right))
        }
        _ => None,
    }
}

fn map_mouse(mouse: &MouseEvent) -> Option<HostAction> {
    let (column, row) = (mouse.column, mouse.row);
    match mouse.kind {
        MouseEventKind::Moved | MouseEventKind::Drag(MouseButton::Left) => {
            Some(HostAction::PointerMoved { column, row })
        }
        MouseEventKind::Down(MouseButton::Left) => Some(HostAction::PrimaryClick { column, row }),
        MouseEventKind::Down(MouseButton::Right) => Some(HostAction::Reel),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn mouse(kind: MouseEventKind) -> Event {
        Event::Mouse(MouseEvent {
            kind,
            column: 12,
            row: 7,
            modifiers: KeyModifiers::NONE,
        })
    }

    #[test]
    fn test_keys() {
        assert_eq!(map_event(&key(KeyCode::Char('q'))), Some(HostAction::Quit));
        assert_eq!(map_event(&key(KeyCode::Esc)), Some(HostAction::Cancel));
        assert_eq!(map_event(&key(KeyCode::Char('r'))), Some(HostAction::Reel));
        assert_eq!(map_event(&key(KeyCode::Char('e'))), Some(HostAction::ToggleRod));
        assert_eq!(
            map_event(&key(KeyCode::Char('a'))),
            Some(HostAction::Walk(Direction::Left))
        );
        assert_eq!(map_event(&key(KeyCode::Char('x'))), None);
    }

    #[test]
    fn test_mouse() {
        assert_eq!(
            map_event(&mouse(MouseEventKind::Moved)),
            Some(HostAction::PointerMoved { column: 12, row: 7 })
        );
        assert_eq!(
            map_event(&mouse(MouseEventKind::Down(MouseButton::Left))),
            Some(HostAction::PrimaryClick { column: 12, row: 7 })
        );
        assert_eq!(
            map_event(&mouse(MouseEventKind::Down(MouseButton::Right))),
            Some(HostAction::Reel)
        );
        assert_eq!(map_event(&mouse(MouseEventKind::ScrollUp)), None);
    }
}
