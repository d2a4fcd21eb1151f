use crate::input::InputEvent;
use crate::input::KeyCode;
use crate::input::KeyEvent;
use crate::input::KeyModifiers;
use crate::input::MouseButton;
use crate::input::MouseEvent;
use crate::input::MouseEventKind;

/// Converts a crossterm event into an [`InputEvent`].
///
/// Key releases, focus changes and resize events yield `None`. Key repeats are treated as
/// presses so holding `j` keeps the table cursor moving.
pub fn input_event_from_crossterm(ev: crossterm::event::Event) -> Option<InputEvent> {
    use crossterm::event::Event;
    use crossterm::event::KeyEventKind;

    match ev {
        Event::Key(key) => {
            if key.kind == KeyEventKind::Release {
                return None;
            }
            Some(InputEvent::Key(key_event_from_crossterm(key)?))
        }
        Event::Paste(s) => Some(InputEvent::Paste(s)),
        Event::Mouse(m) => Some(InputEvent::Mouse(mouse_event_from_crossterm(m)?)),
        _ => None,
    }
}

pub fn key_event_from_crossterm(key: crossterm::event::KeyEvent) -> Option<KeyEvent> {
    use crossterm::event::KeyCode as Ck;

    let code = match key.code {
        Ck::Char(c) => KeyCode::Char(c),
        Ck::Enter => KeyCode::Enter,
        Ck::Backspace => KeyCode::Backspace,
        Ck::Delete => KeyCode::Delete,
        Ck::Tab => KeyCode::Tab,
        Ck::BackTab => KeyCode::BackTab,
        Ck::Esc => KeyCode::Esc,
        Ck::Left => KeyCode::Left,
        Ck::Right => KeyCode::Right,
        Ck::Up => KeyCode::Up,
        Ck::Down => KeyCode::Down,
        Ck::Home => KeyCode::Home,
        Ck::End => KeyCode::End,
        Ck::PageUp => KeyCode::PageUp,
        Ck::PageDown => KeyCode::PageDown,
        _ => return None,
    };

    Some(KeyEvent {
        code,
        modifiers: modifiers_from_crossterm(key.modifiers),
    })
}

pub fn mouse_event_from_crossterm(m: crossterm::event::MouseEvent) -> Option<MouseEvent> {
    use crossterm::event::MouseEventKind as Cm;

    let kind = match m.kind {
        Cm::Down(b) => MouseEventKind::Down(mouse_button_from_crossterm(b)),
        Cm::Drag(b) => MouseEventKind::Drag(mouse_button_from_crossterm(b)),
        Cm::Up(b) => MouseEventKind::Up(mouse_button_from_crossterm(b)),
        Cm::Moved => MouseEventKind::Moved,
        Cm::ScrollUp => MouseEventKind::ScrollUp,
        Cm::ScrollDown => MouseEventKind::ScrollDown,
        Cm::ScrollLeft => MouseEventKind::ScrollLeft,
        Cm::ScrollRight => MouseEventKind::ScrollRight,
    };

    Some(MouseEvent {
        x: m.column,
        y: m.row,
        kind,
        modifiers: modifiers_from_crossterm(m.modifiers),
    })
}

fn modifiers_from_crossterm(m: crossterm::event::KeyModifiers) -> KeyModifiers {
    use crossterm::event::KeyModifiers as Cmod;

    KeyModifiers {
        shift: m.contains(Cmod::SHIFT),
        ctrl: m.contains(Cmod::CONTROL),
        alt: m.contains(Cmod::ALT),
    }
}

fn mouse_button_from_crossterm(b: crossterm::event::MouseButton) -> MouseButton {
    match b {
        crossterm::event::MouseButton::Left => MouseButton::Left,
        crossterm::event::MouseButton::Right => MouseButton::Right,
        crossterm::event::MouseButton::Middle => MouseButton::Middle,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn release_events_are_dropped() {
        let key = crossterm::event::KeyEvent::new_with_kind(
            crossterm::event::KeyCode::Char('j'),
            crossterm::event::KeyModifiers::NONE,
            crossterm::event::KeyEventKind::Release,
        );
        assert_eq!(
            input_event_from_crossterm(crossterm::event::Event::Key(key)),
            None
        );
    }

    #[test]
    fn mouse_drag_keeps_coordinates() {
        let m = crossterm::event::MouseEvent {
            kind: crossterm::event::MouseEventKind::Drag(crossterm::event::MouseButton::Left),
            column: 12,
            row: 3,
            modifiers: crossterm::event::KeyModifiers::NONE,
        };
        assert_eq!(
            mouse_event_from_crossterm(m),
            Some(MouseEvent::left_drag(12, 3))
        );
    }
}
