//! Key mapping from terminal events to engine keys.

use crate::types::{ControlKey, Key};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, ModifierKeyCode};

/// Map a terminal key event to an engine key.
///
/// Characters typed with Ctrl or Alt held are chords, not text, and map to
/// [`Key::Unrecognized`]. Shift is part of the character itself.
pub fn map_key_event(key: KeyEvent) -> Key {
    match key.code {
        KeyCode::Char(c) => {
            if key
                .modifiers
                .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT | KeyModifiers::SUPER)
            {
                Key::Unrecognized
            } else {
                Key::Char(c)
            }
        }
        KeyCode::Enter => Key::Enter,
        KeyCode::Backspace => Key::Backspace,

        KeyCode::Left => Key::Control(ControlKey::ArrowLeft),
        KeyCode::Right => Key::Control(ControlKey::ArrowRight),
        KeyCode::Up => Key::Control(ControlKey::ArrowUp),
        KeyCode::Down => Key::Control(ControlKey::ArrowDown),
        KeyCode::Home => Key::Control(ControlKey::Home),
        KeyCode::End => Key::Control(ControlKey::End),
        KeyCode::PageUp => Key::Control(ControlKey::PageUp),
        KeyCode::PageDown => Key::Control(ControlKey::PageDown),
        KeyCode::Tab | KeyCode::BackTab => Key::Control(ControlKey::Tab),
        KeyCode::Esc => Key::Control(ControlKey::Escape),
        KeyCode::CapsLock => Key::Control(ControlKey::CapsLock),

        KeyCode::Modifier(m) => Key::Control(match m {
            ModifierKeyCode::LeftShift | ModifierKeyCode::RightShift => ControlKey::Shift,
            ModifierKeyCode::LeftControl | ModifierKeyCode::RightControl => ControlKey::Control,
            ModifierKeyCode::LeftAlt | ModifierKeyCode::RightAlt => ControlKey::Alt,
            _ => ControlKey::Meta,
        }),

        _ => Key::Unrecognized,
    }
}

/// Check if key should leave the play screen.
///
/// Every printable character is typeable, so only Ctrl+C quits.
pub fn should_quit(key: KeyEvent) -> bool {
    key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL)
}
