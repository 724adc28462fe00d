//! Scoring module - score accumulation
//!
//! Scoring is deliberately flat:
//!
//! | Event | Points |
//! |-------|--------|
//! | Shape lands (locks) | `LANDING_POINTS` (1) |
//! | Each collapsed row | `ROW_CLEAR_POINTS` (100) |
//!
//! Every change is pushed to the [`ScoreDisplay`] immediately, one call per
//! award, so a double row clear shows two intermediate totals.

use crate::display::ScoreDisplay;
use crate::types::{LANDING_POINTS, ROW_CLEAR_POINTS};

/// Running score for one session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScoreTracker {
    score: u32,
}

impl ScoreTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    /// Add points and show the new total
    pub fn add<D: ScoreDisplay + ?Sized>(&mut self, points: u32, display: &mut D) -> u32 {
        self.score = self.score.saturating_add(points);
        display.show_score(self.score);
        self.score
    }

    /// Zero the score and show it
    pub fn reset<D: ScoreDisplay + ?Sized>(&mut self, display: &mut D) {
        self.score = 0;
        display.show_score(0);
    }

    pub fn award_landing<D: ScoreDisplay + ?Sized>(&mut self, display: &mut D) -> u32 {
        self.add(LANDING_POINTS, display)
    }

    pub fn award_row<D: ScoreDisplay + ?Sized>(&mut self, display: &mut D) -> u32 {
        self.add(ROW_CLEAR_POINTS, display)
    }
}
