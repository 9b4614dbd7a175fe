//! Application state and logic.

use anyhow::Result;
use strictly_2048::{Direction, GameConfig, GameState, GameStatus, Session, legal_moves};
use tracing::{debug, info, instrument};

use crate::keys::KeyAction;

/// Main application state.
pub struct App {
    session: Session,
    state: GameState,
    status_message: String,
    won_announced: bool,
    should_quit: bool,
}

impl App {
    /// Creates the app and starts the first game.
    #[instrument(skip(config))]
    pub fn new(config: GameConfig) -> Result<Self> {
        let mut session = Session::new(config);
        let state = session.new_game()?;
        Ok(Self {
            session,
            state,
            status_message: Self::playing_message(),
            won_announced: false,
            should_quit: false,
        })
    }

    /// Latest snapshot to render.
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Gets the current status message.
    pub fn status_message(&self) -> &str {
        &self.status_message
    }

    /// True once the user asked to quit.
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Directions that would change the board, for the hint line.
    pub fn legal_moves(&self) -> Vec<Direction> {
        legal_moves(self.session.grid())
    }

    /// Applies a key action.
    pub fn handle_action(&mut self, action: KeyAction) -> Result<()> {
        match action {
            KeyAction::Move(direction) => self.make_move(direction),
            KeyAction::NewGame => self.restart(),
            KeyAction::Quit => {
                self.should_quit = true;
                Ok(())
            }
            KeyAction::Ignore => Ok(()),
        }
    }

    /// Makes a move in the given direction.
    #[instrument(skip(self))]
    pub fn make_move(&mut self, direction: Direction) -> Result<()> {
        let outcome = self.session.handle_directional_input(direction)?;
        if !*outcome.moved() {
            debug!(%direction, "Nothing moved");
            return Ok(());
        }

        self.state = outcome.into_state();
        let status = *self.state.status();
        let target = *self.session.config().target();
        self.status_message = match status {
            GameStatus::Lost => {
                info!(score = self.state.score(), "Game over");
                format!(
                    "Game over! Final score {}. Press 'n' for a new game or 'q' to quit.",
                    self.state.score()
                )
            }
            GameStatus::Won if !self.won_announced => {
                self.won_announced = true;
                info!(score = self.state.score(), "Reached the target tile");
                format!("You reached {target}! Keep going, or press 'n' for a new game.")
            }
            GameStatus::Won | GameStatus::Playing => {
                if self.won_announced {
                    format!("Still going past {target}. Arrows/WASD/hjkl to move.")
                } else {
                    Self::playing_message()
                }
            }
        };
        Ok(())
    }

    /// Restarts the game, keeping the best score.
    #[instrument(skip(self))]
    pub fn restart(&mut self) -> Result<()> {
        debug!("Restarting game");
        self.state = self.session.new_game()?;
        self.status_message = Self::playing_message();
        self.won_announced = false;
        Ok(())
    }

    fn playing_message() -> String {
        "Arrows/WASD/hjkl to move, 'n' new game, 'q' quit.".to_string()
    }
}
