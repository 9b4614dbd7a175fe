//! Session controller: score, best score and game lifecycle.

use crate::config::GameConfig;
use crate::contracts::{Contract, MoveContract, SpawnContract};
use crate::direction::Direction;
use crate::engine::{apply_move, spawn_tile_with};
use crate::error::GameError;
use crate::grid::Grid;
use crate::input::Swipe;
use crate::state::{GameState, MoveOutcome};
use crate::status::GameStatus;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info, instrument};

/// Number of tiles placed on a fresh board.
pub const STARTING_TILES: usize = 2;

/// One independent game instance.
///
/// Owns the grid, score, best score and random source. Nothing is shared
/// between sessions, so any number can run side by side.
#[derive(Debug, Clone)]
pub struct Session<R = StdRng> {
    config: GameConfig,
    grid: Grid,
    score: u64,
    best_score: u64,
    history: Vec<Direction>,
    status: GameStatus,
    rng: R,
}

impl Session<StdRng> {
    /// Creates a session seeded from `config.seed`, or from entropy when unset.
    ///
    /// The board is empty until [`Session::new_game`] is called.
    #[instrument(skip(config), fields(seed = ?config.seed()))]
    pub fn new(config: GameConfig) -> Self {
        let rng = match config.seed() {
            Some(seed) => StdRng::seed_from_u64(*seed),
            None => StdRng::from_entropy(),
        };
        Self::with_rng(config, rng)
    }
}

impl Default for Session<StdRng> {
    fn default() -> Self {
        Self::new(GameConfig::default())
    }
}

impl<R: Rng> Session<R> {
    /// Creates a session drawing randomness from `rng`.
    pub fn with_rng(config: GameConfig, rng: R) -> Self {
        let grid = Grid::new(*config.size());
        Self {
            config,
            grid,
            score: 0,
            best_score: 0,
            history: Vec::new(),
            status: GameStatus::Playing,
            rng,
        }
    }

    /// Replaces the board with `grid`, keeping score and best score.
    ///
    /// Used to resume a position or set one up in tests.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::InvalidGridLength`] when the grid size differs
    /// from the configured size.
    #[instrument(skip(self, grid))]
    pub fn with_grid(mut self, grid: Grid) -> Result<Self, GameError> {
        let size = *self.config.size();
        if grid.size() != size {
            return Err(GameError::InvalidGridLength {
                expected: size * size,
                actual: grid.cells().len(),
            });
        }
        crate::contracts::check_grid(&grid)?;
        self.status = GameStatus::of(&grid, *self.config.target());
        self.grid = grid;
        Ok(self)
    }

    /// Starts a new game: clears score and board, then places two tiles.
    ///
    /// The best score is kept.
    #[instrument(skip(self), fields(best_score = self.best_score))]
    pub fn new_game(&mut self) -> Result<GameState, GameError> {
        self.grid = Grid::new(*self.config.size());
        self.score = 0;
        self.history.clear();

        for _ in 0..STARTING_TILES {
            self.spawn()?;
        }

        self.status = GameStatus::of(&self.grid, *self.config.target());
        info!(grid = %self.grid.display(), "New game started");
        Ok(self.state())
    }

    /// Applies a direction.
    ///
    /// A direction that changes nothing is a no-op: no tile is spawned, the
    /// score is untouched and no randomness is consumed. Otherwise the merge
    /// score is added, one tile is spawned and the status is recomputed.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::InvariantViolation`] if a contract fails, which
    /// indicates a bug in the engine rather than bad input.
    #[instrument(skip(self), fields(score = self.score))]
    pub fn handle_directional_input(
        &mut self,
        direction: Direction,
    ) -> Result<MoveOutcome, GameError> {
        MoveContract::pre(&self.grid, &direction)?;
        let result = apply_move(&self.grid, direction);

        #[cfg(debug_assertions)]
        MoveContract::post(&self.grid, &result)?;

        if !result.moved {
            debug!(%direction, "Move changed nothing");
            return Ok(MoveOutcome::new(self.state(), false, 0, None));
        }

        // A changed grid always has a free cell: merges remove tiles, and a
        // pure slide leaves the cell it vacated.
        if result.grid.is_full() {
            return Err(GameError::InvariantViolation(format!(
                "Move {} changed the grid but left no empty cell",
                direction
            )));
        }

        let score_delta = result.score_delta;
        self.grid = result.grid;
        self.add_score(score_delta);
        let spawned = self.spawn()?;
        self.history.push(direction);

        let previous = self.status;
        self.status = GameStatus::of(&self.grid, *self.config.target());
        if self.status != previous {
            info!(from = %previous, to = %self.status, score = self.score, "Status changed");
        }

        Ok(MoveOutcome::new(self.state(), true, score_delta, Some(spawned)))
    }

    /// Parses a direction name and applies it.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::UnknownDirection`] for names other than
    /// up, down, left and right.
    #[instrument(skip(self))]
    pub fn handle_input(&mut self, name: &str) -> Result<MoveOutcome, GameError> {
        let direction = name.parse::<Direction>()?;
        self.handle_directional_input(direction)
    }

    /// Classifies a swipe with the configured threshold and applies it.
    ///
    /// Returns `Ok(None)` when the swipe is too short to count as a move.
    #[instrument(skip(self))]
    pub fn handle_swipe(&mut self, swipe: Swipe) -> Result<Option<MoveOutcome>, GameError> {
        match self.config.swipe_direction(&swipe) {
            Some(direction) => self.handle_directional_input(direction).map(Some),
            None => {
                debug!("Swipe below threshold");
                Ok(None)
            }
        }
    }

    /// Snapshot of the current game.
    pub fn state(&self) -> GameState {
        GameState::new(
            self.grid.cells().to_vec(),
            self.grid.size(),
            self.score,
            self.best_score,
            self.status,
            self.history.len(),
        )
    }

    /// Current grid.
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Score of the current game.
    pub fn score(&self) -> u64 {
        self.score
    }

    /// Best score seen by this session.
    pub fn best_score(&self) -> u64 {
        self.best_score
    }

    /// Status after the last operation.
    pub fn status(&self) -> GameStatus {
        self.status
    }

    /// Directions accepted in the current game, oldest first.
    pub fn history(&self) -> &[Direction] {
        &self.history
    }

    /// Configuration this session was created with.
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    fn add_score(&mut self, delta: u64) {
        self.score += delta;
        if self.score > self.best_score {
            self.best_score = self.score;
        }
    }

    fn spawn(&mut self) -> Result<usize, GameError> {
        let probability = *self.config.four_probability();
        SpawnContract::pre(&self.grid, &probability)?;

        #[cfg(debug_assertions)]
        let before = self.grid.clone();

        let index = spawn_tile_with(&mut self.grid, &mut self.rng, probability)
            .ok_or(GameError::NoEmptyCell)?;

        #[cfg(debug_assertions)]
        SpawnContract::post(&before, &self.grid)?;

        Ok(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded(seed: u64) -> Session {
        Session::new(GameConfig::default().with_seed(Some(seed)))
    }

    #[test]
    fn test_new_game_places_two_tiles() {
        let mut session = seeded(1);
        let state = session.new_game().unwrap();
        assert_eq!(state.grid().iter().filter(|&&v| v != 0).count(), 2);
        assert_eq!(*state.score(), 0);
        assert_eq!(*state.status(), GameStatus::Playing);
        assert!(session.history().is_empty());
    }

    #[test]
    fn test_same_seed_same_game() {
        let mut a = seeded(42);
        let mut b = seeded(42);
        assert_eq!(a.new_game().unwrap(), b.new_game().unwrap());
        for dir in [Direction::Left, Direction::Up, Direction::Right] {
            assert_eq!(
                a.handle_directional_input(dir).unwrap(),
                b.handle_directional_input(dir).unwrap()
            );
        }
    }

    #[test]
    fn test_unknown_input_name_is_rejected() {
        let mut session = seeded(2);
        session.new_game().unwrap();
        let before = session.state();
        assert_eq!(
            session.handle_input("north").unwrap_err(),
            GameError::UnknownDirection("north".to_string())
        );
        assert_eq!(session.state(), before);
    }
}
