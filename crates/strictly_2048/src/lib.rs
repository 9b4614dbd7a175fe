//! Strictly 2048 - pure game logic for the 2048 sliding-tile puzzle
//!
//! Two layers, the second built on the first:
//!
//! - **Board engine** ([`apply_move`], [`spawn_random_tile`],
//!   [`is_game_over`], [`has_winning_tile`]): pure functions over a [`Grid`].
//! - **Session controller** ([`Session`]): score, best score, lifecycle and
//!   status, handing [`GameState`] snapshots to whatever renders them.
//!
//! Rendering and raw input capture live outside this crate; [`input`] only
//! translates key names and swipe displacements into [`Direction`]s.
//!
//! # Example
//!
//! ```
//! use strictly_2048::{Direction, GameConfig, GameStatus, Session};
//!
//! # fn example() -> Result<(), strictly_2048::GameError> {
//! let mut session = Session::new(GameConfig::default().with_seed(Some(7)));
//! let state = session.new_game()?;
//! assert_eq!(*state.status(), GameStatus::Playing);
//!
//! let outcome = session.handle_directional_input(Direction::Left)?;
//! if *outcome.moved() {
//!     println!("score: {}", outcome.state().score());
//! }
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod config;
mod direction;
mod engine;
mod error;
mod grid;
mod session;
mod state;
mod status;

pub mod contracts;
pub mod input;
pub mod invariants;

// Crate-level exports - Board engine
pub use direction::Direction;
pub use engine::{
    FOUR_PROBABILITY, MoveResult, WINNING_TILE, apply_move, can_move, has_winning_tile,
    is_game_over, legal_moves, slide_line, spawn_random_tile, spawn_tile_with,
};
pub use grid::{DEFAULT_SIZE, Grid, MAX_TILE, is_tile_value};

// Crate-level exports - Session controller
pub use session::{STARTING_TILES, Session};
pub use state::{GameState, MoveOutcome};
pub use status::GameStatus;

// Crate-level exports - Configuration and errors
pub use config::GameConfig;
pub use error::{ConfigError, GameError};
