//! Board module - manages the playing field
//!
//! The board is a 17x16 grid where each cell holds a [`Color`]; `Color::Empty`
//! marks a free cell. Uses a flat array for cache locality and zero allocation.
//! Coordinates: (row, col) where row ranges 0..16 (top to bottom) and col
//! ranges 0..15 (left to right).

use arrayvec::ArrayVec;

use crate::bits::BitField;
use crate::display::Renderer;
use crate::pieces::Shape;
use crate::types::{Color, COLS, ROWS};

/// Total number of cells on the board
const BOARD_SIZE: usize = (ROWS as usize) * (COLS as usize);

/// Row indices cleared by one collapse pass, in scan order (top to bottom)
pub type ClearedRows = ArrayVec<u8, { ROWS as usize }>;

/// The playing field - 17 rows x 16 columns using flat array storage
#[derive(Debug, Clone, PartialEq)]
pub struct Board {
    /// Flat array of cells, row-major order (row * COLS + col)
    cells: [Color; BOARD_SIZE],
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Self {
            cells: [Color::Empty; BOARD_SIZE],
        }
    }

    /// Calculate flat index from (row, col)
    #[inline(always)]
    fn index(row: i8, col: i8) -> Option<usize> {
        if row < 0 || row >= ROWS as i8 || col < 0 || col >= COLS as i8 {
            return None;
        }
        Some((row as usize) * (COLS as usize) + (col as usize))
    }

    pub fn rows(&self) -> u8 {
        ROWS
    }

    pub fn cols(&self) -> u8 {
        COLS
    }

    /// Get cell at (row, col)
    /// Returns None if out of bounds
    pub fn get(&self, row: i8, col: i8) -> Option<Color> {
        Self::index(row, col).map(|idx| self.cells[idx])
    }

    /// Set cell at (row, col)
    /// Returns false if out of bounds
    pub fn set(&mut self, row: i8, col: i8, color: Color) -> bool {
        match Self::index(row, col) {
            Some(idx) => {
                self.cells[idx] = color;
                true
            }
            None => false,
        }
    }

    /// Check if position is within bounds and holds a color
    pub fn is_occupied(&self, row: i8, col: i8) -> bool {
        matches!(self.get(row, col), Some(c) if !c.is_empty())
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, row: usize) -> bool {
        self.row(row)
            .map(|cells| cells.iter().all(|c| !c.is_empty()))
            .unwrap_or(false)
    }

    /// Borrow one row of cells
    pub fn row(&self, row: usize) -> Option<&[Color]> {
        if row >= ROWS as usize {
            return None;
        }
        let start = row * COLS as usize;
        Some(&self.cells[start..start + COLS as usize])
    }

    /// Check whether a shape overlaps the boundary or an occupied cell.
    ///
    /// Bounds are tested before occupancy, so no cell outside the board is
    /// ever read.
    pub fn conflict<B: BitField + Clone>(&self, shape: &Shape<B>) -> bool {
        shape.cells().iter().any(|&(row, col)| match self.get(row, col) {
            None => true,
            Some(color) => !color.is_empty(),
        })
    }

    /// Write every set cell of `shape` into the board in the shape's color.
    ///
    /// Returns the number of cells written. Cells outside the board are skipped.
    pub fn lock_shape<B: BitField + Clone>(&mut self, shape: &Shape<B>) -> usize {
        let mut written = 0;
        for (row, col) in shape.cells() {
            if self.set(row, col, shape.color) {
                written += 1;
            }
        }
        written
    }

    /// Collapse every full row, painting each changed cell.
    ///
    /// Rows are scanned top to bottom. When a row is full, every row above it
    /// moves down by one and the top row is cleared; the scan then continues
    /// at the next index. Returns the indices of the rows that were collapsed.
    pub fn collapse_full_rows<R: Renderer + ?Sized>(&mut self, out: &mut R) -> ClearedRows {
        let mut cleared = ClearedRows::new();
        let width = COLS as usize;

        for row in 0..ROWS as usize {
            if !self.is_row_full(row) {
                continue;
            }

            for r in (1..=row).rev() {
                let src_start = (r - 1) * width;
                let dst_start = r * width;
                self.cells
                    .copy_within(src_start..src_start + width, dst_start);
                for col in 0..width {
                    out.paint_cell(r as u8, col as u8, self.cells[dst_start + col]);
                }
            }

            for col in 0..width {
                self.cells[col] = Color::Empty;
                out.paint_cell(0, col as u8, Color::Empty);
            }

            cleared.push(row as u8);
        }

        cleared
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[Color] {
        &self.cells
    }

    /// Number of non-empty cells
    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|c| !c.is_empty()).count()
    }

    /// Copy the board into a row-major 2D array
    pub fn write_grid(&self, out: &mut [[Color; COLS as usize]; ROWS as usize]) {
        for (row, chunk) in self.cells.chunks_exact(COLS as usize).enumerate() {
            out[row].copy_from_slice(chunk);
        }
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}
