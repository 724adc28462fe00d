//! Key mapping from terminal events to simulator intents.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// What a key press asks the simulated hardware to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyIntent {
    /// Tilt the board to the left (negative roll)
    TiltLeft,
    /// Tilt the board to the right (positive roll)
    TiltRight,
    /// Flick the board towards the player (drop-axis rate spike)
    Flick,
    /// Press the user button
    Button,
}

/// Map keyboard input to simulator intents.
pub fn handle_key_event(key: KeyEvent) -> Option<KeyIntent> {
    match key.code {
        KeyCode::Left
        | KeyCode::Char('h')
        | KeyCode::Char('H')
        | KeyCode::Char('a')
        | KeyCode::Char('A') => Some(KeyIntent::TiltLeft),

        KeyCode::Right
        | KeyCode::Char('l')
        | KeyCode::Char('L')
        | KeyCode::Char('d')
        | KeyCode::Char('D') => Some(KeyIntent::TiltRight),

        KeyCode::Up
        | KeyCode::Down
        | KeyCode::Char('k')
        | KeyCode::Char('K')
        | KeyCode::Char('w')
        | KeyCode::Char('W') => Some(KeyIntent::Flick),

        KeyCode::Char(' ') | KeyCode::Enter => Some(KeyIntent::Button),

        _ => None,
    }
}

/// Check if key should quit the game.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q'))
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}
