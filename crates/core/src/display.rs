//! Output collaborators the engine notifies
//!
//! The engine never draws pixels itself. It reports every changed cell as a
//! `paint_cell` call and every score change as a `show_score` call; how those
//! land on a panel or a terminal is up to the implementor.

use crate::types::Color;

/// Receives score updates.
pub trait ScoreDisplay {
    fn show_score(&mut self, score: u32);
}

/// Receives cell-level paint calls.
///
/// Calls must be idempotent: painting the same color twice is harmless.
pub trait Renderer: ScoreDisplay {
    fn paint_cell(&mut self, row: u8, col: u8, color: Color);
}

/// Discards all output. Used when a caller only needs the game state.
impl ScoreDisplay for () {
    fn show_score(&mut self, _score: u32) {}
}

impl Renderer for () {
    fn paint_cell(&mut self, _row: u8, _col: u8, _color: Color) {}
}
