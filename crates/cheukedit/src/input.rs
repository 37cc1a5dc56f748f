//! Terminal key event translation

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use editcore::Key;

/// Converts a crossterm key event into an editor key.
///
/// Returns `None` for release events. Characters typed with Control or Alt
/// held are never treated as text.
pub fn key_from_event(event: KeyEvent) -> Option<Key> {
    if !matches!(event.kind, KeyEventKind::Press | KeyEventKind::Repeat) {
        return None;
    }

    let key = match event.code {
        KeyCode::Home => Key::Home,
        KeyCode::End => Key::End,
        KeyCode::Left => Key::Left,
        KeyCode::Right => Key::Right,
        KeyCode::Up => Key::Up,
        KeyCode::Down => Key::Down,
        KeyCode::Esc => Key::Escape,
        KeyCode::Backspace => Key::Backspace,
        KeyCode::Delete => Key::Delete,
        KeyCode::Enter => Key::Enter,
        KeyCode::Tab => Key::Tab,
        KeyCode::Char(c) => {
            if event
                .modifiers
                .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
            {
                Key::Other
            } else {
                Key::Char(c)
            }
        }
        _ => Key::Other,
    };

    Some(key)
}
