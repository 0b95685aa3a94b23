//! Terminal events reduced to the handful of inputs a game reacts to.
//!
//! The engine reads crossterm events and hands games an [`InputEvent`]
//! instead, so game code never matches on raw terminal structures and tests
//! can drive it without a terminal.

use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Primary button pressed; position is the centre of the cell under it.
    PointerDown { column: f64, row: f64 },
    /// Pointer moved, with or without a button held.
    PointerMove { column: f64, row: f64 },
    PointerUp,
    Resize { width: u16, height: u16 },
    Key(char),
    Quit,
}

/// Map a crossterm event onto an [`InputEvent`], or `None` if nobody cares.
pub fn translate(event: Event) -> Option<InputEvent> {
    match event {
        Event::Key(key) => translate_key(key),
        Event::Mouse(mouse) => translate_mouse(mouse),
        Event::Resize(width, height) => Some(InputEvent::Resize { width, height }),
        _ => None,
    }
}

fn translate_key(key: KeyEvent) -> Option<InputEvent> {
    // Windows reports releases too
    if key.kind != KeyEventKind::Press {
        return None;
    }
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') => Some(InputEvent::Quit),
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            Some(InputEvent::Quit)
        }
        KeyCode::Char(c) => Some(InputEvent::Key(c)),
        _ => None,
    }
}

fn translate_mouse(mouse: MouseEvent) -> Option<InputEvent> {
    let column = mouse.column as f64 + 0.5;
    let row = mouse.row as f64 + 0.5;
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => Some(InputEvent::PointerDown { column, row }),
        MouseEventKind::Drag(MouseButton::Left) | MouseEventKind::Moved => {
            Some(InputEvent::PointerMove { column, row })
        }
        MouseEventKind::Up(MouseButton::Left) => Some(InputEvent::PointerUp),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> Event {
        Event::Mouse(MouseEvent { kind, column, row, modifiers: KeyModifiers::NONE })
    }

    #[test]
    fn test_left_button_lifecycle() {
        assert_eq!(
            translate(mouse(MouseEventKind::Down(MouseButton::Left), 3, 4)),
            Some(InputEvent::PointerDown { column: 3.5, row: 4.5 })
        );
        assert_eq!(
            translate(mouse(MouseEventKind::Drag(MouseButton::Left), 10, 0)),
            Some(InputEvent::PointerMove { column: 10.5, row: 0.5 })
        );
        assert_eq!(
            translate(mouse(MouseEventKind::Up(MouseButton::Left), 10, 0)),
            Some(InputEvent::PointerUp)
        );
    }

    #[test]
    fn test_other_buttons_and_scroll_are_ignored() {
        assert_eq!(translate(mouse(MouseEventKind::Down(MouseButton::Right), 1, 1)), None);
        assert_eq!(translate(mouse(MouseEventKind::ScrollDown, 1, 1)), None);
    }

    #[test]
    fn test_quit_keys() {
        let key = |code| translate(Event::Key(KeyEvent::from(code)));
        assert_eq!(key(KeyCode::Esc), Some(InputEvent::Quit));
        assert_eq!(key(KeyCode::Char('q')), Some(InputEvent::Quit));
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(translate(Event::Key(ctrl_c)), Some(InputEvent::Quit));
    }

    #[test]
    fn test_plain_characters_pass_through() {
        let key = |code| translate(Event::Key(KeyEvent::from(code)));
        assert_eq!(key(KeyCode::Char('s')), Some(InputEvent::Key('s')));
        assert_eq!(key(KeyCode::Enter), None);
    }

    #[test]
    fn test_resize() {
        assert_eq!(
            translate(Event::Resize(120, 40)),
            Some(InputEvent::Resize { width: 120, height: 40 })
        );
    }
}
