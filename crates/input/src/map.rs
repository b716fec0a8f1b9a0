//! Key mapping from terminal events to control protocol bytes.

use crate::types::ControlSymbol;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Map a key press to the control symbol it stands for.
///
/// The keyboard speaks the same alphabet as the TCP protocol, so letters are
/// accepted in either case and arrows double as WASD.
pub fn handle_key_event(key: KeyEvent) -> Option<ControlSymbol> {
    match key.code {
        KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('W') => Some(ControlSymbol::Up),
        KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('S') => Some(ControlSymbol::Down),
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => Some(ControlSymbol::Left),
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => Some(ControlSymbol::Right),

        KeyCode::Char(' ') | KeyCode::Char('p') | KeyCode::Char('P') => Some(ControlSymbol::Pause),
        KeyCode::Char('q') | KeyCode::Char('Q') => Some(ControlSymbol::Quit),

        _ => None,
    }
}

/// Check if key should leave the program (not just the round).
pub fn should_exit(key: KeyEvent) -> bool {
    key.code == KeyCode::Esc
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}
