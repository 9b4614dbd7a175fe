//! Key bindings.

use crossterm::event::KeyCode;
use strictly_2048::Direction;

/// What a key press asks the app to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    /// Shift the board.
    Move(Direction),
    /// Start over, keeping the best score.
    NewGame,
    /// Leave the app.
    Quit,
    /// Unbound key.
    Ignore,
}

/// Maps a key to an action: arrows, WASD and hjkl move; `n` restarts; `q`/Esc quit.
pub fn action_for(key: KeyCode) -> KeyAction {
    match key {
        KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('k') => KeyAction::Move(Direction::Up),
        KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('j') => {
            KeyAction::Move(Direction::Down)
        }
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('h') => {
            KeyAction::Move(Direction::Left)
        }
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('l') => {
            KeyAction::Move(Direction::Right)
        }
        KeyCode::Char('n') | KeyCode::Char('r') => KeyAction::NewGame,
        KeyCode::Char('q') | KeyCode::Esc => KeyAction::Quit,
        _ => KeyAction::Ignore,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arrow_and_letter_bindings_agree() {
        assert_eq!(action_for(KeyCode::Up), action_for(KeyCode::Char('w')));
        assert_eq!(action_for(KeyCode::Left), action_for(KeyCode::Char('h')));
        assert_eq!(action_for(KeyCode::Right), KeyAction::Move(Direction::Right));
    }

    #[test]
    fn test_control_keys() {
        assert_eq!(action_for(KeyCode::Char('q')), KeyAction::Quit);
        assert_eq!(action_for(KeyCode::Esc), KeyAction::Quit);
        assert_eq!(action_for(KeyCode::Char('n')), KeyAction::NewGame);
        assert_eq!(action_for(KeyCode::Enter), KeyAction::Ignore);
    }
}
