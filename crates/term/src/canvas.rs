//! PaintedCanvas: a host-side stand-in for the LCD panel.
//!
//! The engine only ever calls `paint_cell` and `show_score`; the canvas keeps
//! the latest color of every cell and the latest score, exactly as a panel
//! would show them, and counts revisions so the view can skip idle frames.

use crate::core::{Renderer, ScoreDisplay};
use crate::types::{Color, COLS, ROWS};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaintedCanvas {
    cells: [[Color; COLS as usize]; ROWS as usize],
    score: u32,
    revision: u64,
    paint_calls: u64,
}

impl PaintedCanvas {
    pub fn new() -> Self {
        Self {
            cells: [[Color::Empty; COLS as usize]; ROWS as usize],
            score: 0,
            revision: 0,
            paint_calls: 0,
        }
    }

    pub fn get(&self, row: u8, col: u8) -> Color {
        self.cells
            .get(row as usize)
            .and_then(|r| r.get(col as usize))
            .copied()
            .unwrap_or(Color::Empty)
    }

    pub fn cells(&self) -> &[[Color; COLS as usize]; ROWS as usize] {
        &self.cells
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    /// Bumped whenever a visible cell or the score changes
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Every `paint_cell` call, including repaints of the same color
    pub fn paint_calls(&self) -> u64 {
        self.paint_calls
    }
}

impl Default for PaintedCanvas {
    fn default() -> Self {
        Self::new()
    }
}

impl ScoreDisplay for PaintedCanvas {
    fn show_score(&mut self, score: u32) {
        if self.score != score {
            self.score = score;
            self.revision += 1;
        }
    }
}

impl Renderer for PaintedCanvas {
    fn paint_cell(&mut self, row: u8, col: u8, color: Color) {
        self.paint_calls += 1;
        let Some(cell) = self
            .cells
            .get_mut(row as usize)
            .and_then(|r| r.get_mut(col as usize))
        else {
            return;
        };
        if *cell != color {
            *cell = color;
            self.revision += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repainting_same_color_keeps_revision() {
        let mut canvas = PaintedCanvas::new();
        canvas.paint_cell(3, 4, Color::Blue);
        let rev = canvas.revision();
        canvas.paint_cell(3, 4, Color::Blue);
        assert_eq!(canvas.revision(), rev);
        assert_eq!(canvas.paint_calls(), 2);
        assert_eq!(canvas.get(3, 4), Color::Blue);
    }

    #[test]
    fn out_of_range_paint_is_ignored() {
        let mut canvas = PaintedCanvas::new();
        canvas.paint_cell(ROWS, 0, Color::Red);
        canvas.paint_cell(0, COLS, Color::Red);
        assert_eq!(canvas.revision(), 0);
    }

    #[test]
    fn score_changes_bump_revision() {
        let mut canvas = PaintedCanvas::new();
        canvas.show_score(0);
        assert_eq!(canvas.revision(), 0);
        canvas.show_score(101);
        assert_eq!(canvas.score(), 101);
        assert_eq!(canvas.revision(), 1);
    }
}
