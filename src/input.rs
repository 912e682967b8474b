//! Keyboard-to-command translation for the terminal front end.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::types::Command;

/// Map a key press to a game command.
///
/// Arrow keys, WASD and vi-style HJKL all work; releases and repeats from
/// terminals that report them are ignored.
pub fn map_key(key: KeyEvent) -> Option<Command> {
    if key.kind == KeyEventKind::Release {
        return None;
    }

    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return Some(Command::Quit);
    }

    match key.code {
        KeyCode::Enter => Some(Command::Start),
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('h') => Some(Command::MoveLeft),
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('l') => Some(Command::MoveRight),
        KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('j') => Some(Command::MoveDown),
        KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('k') | KeyCode::Char(' ') => {
            Some(Command::Rotate)
        }
        KeyCode::Char('p') => Some(Command::TogglePause),
        KeyCode::Char('q') | KeyCode::Esc => Some(Command::Quit),
        _ => None,
    }
}
