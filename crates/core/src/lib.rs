//! Core game logic - pure, deterministic, and testable
//!
//! This crate holds the falling-block rules for a 17x16 field. It has no
//! dependencies on sensors, timing or terminals: everything that happens
//! on screen is reported through the [`Renderer`] and [`ScoreDisplay`]
//! traits, and randomness comes in through [`RandomSource`].
//!
//! # Module Structure
//!
//! - [`bits`]: bit record access for shape patterns
//! - [`board`]: the field, collision checks and row collapse
//! - [`pieces`]: the seven-shape catalog and clockwise rotation
//! - [`game_state`]: the session state machine driven by [`GameAction`]s
//! - [`rng`]: random sources and no-repeat spawn selection
//! - [`scoring`]: 1 point per landing, 100 per collapsed row
//! - [`display`]: output traits the engine notifies
//! - [`snapshot`]: copyable view of a session for rendering and logs
//!
//! # Example
//!
//! ```
//! use gyro_tetris_core::GameSession;
//! use gyro_tetris_types::{ActionOutcome, GameAction, ShapeKind, Color};
//!
//! let mut game = GameSession::with_seed(12345);
//! game.start(&mut ());
//!
//! game.apply_action(GameAction::Rotate);
//! game.apply_action(GameAction::Drop);
//! let outcome = game.apply_action(GameAction::Down);
//! assert!(matches!(outcome, ActionOutcome::Locked { .. }));
//! assert!(game.score() >= 1);
//! ```
//!
//! [`GameAction`]: types::GameAction

pub mod bits;
pub mod board;
pub mod display;
pub mod game_state;
pub mod pieces;
pub mod rng;
pub mod scoring;
pub mod snapshot;

pub use gyro_tetris_types as types;

// Re-export commonly used types for convenience
pub use bits::{BitField, ShapeBits};
pub use board::Board;
pub use display::{Renderer, ScoreDisplay};
pub use game_state::GameSession;
pub use pieces::{rotate_cw, shape_def, Shape, ShapeDef, CATALOG};
pub use rng::{RandomSource, SimpleRng, SpawnChoice, SpawnPicker};
pub use scoring::ScoreTracker;
pub use snapshot::{GameSnapshot, ShapeSnapshot};
