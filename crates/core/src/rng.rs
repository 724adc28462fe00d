//! RNG module - random sources and spawn selection
//!
//! The engine draws randomness through the [`RandomSource`] trait so a device
//! can plug in its hardware generator. [`SimpleRng`] is a deterministic LCG for
//! host play and tests. [`SpawnPicker`] turns raw numbers into the next shape
//! kind, color and column, never repeating the previous kind or color.

use crate::types::{Color, ShapeKind, COLS};

/// Source of uniform 32-bit random numbers.
pub trait RandomSource {
    fn next_u32(&mut self) -> u32;
}

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        // Avoid 0 seed which would produce all zeros
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Current generator state; reseeding with it continues the sequence
    pub fn state(&self) -> u32 {
        self.state
    }
}

impl RandomSource for SimpleRng {
    fn next_u32(&mut self) -> u32 {
        // LCG formula: (a * state + c) mod m
        // Using Numerical Recipes constants: a=1664525, c=1013904223, m=2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        // The low bits of a power-of-two LCG cycle with short periods.
        self.state >> 8
    }
}

impl Default for SimpleRng {
    fn default() -> Self {
        Self::new(1)
    }
}

/// Kind, color and column chosen for the next spawn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpawnChoice {
    pub kind: ShapeKind,
    pub color: Color,
    pub col: i8,
}

/// Picks spawns uniformly while excluding immediate repeats.
///
/// The previous kind and color outlive a single game, so the first shape of a
/// new game also differs from the last shape of the previous one.
#[derive(Debug, Clone, Default)]
pub struct SpawnPicker {
    prev_kind: Option<usize>,
    prev_color: Option<usize>,
}

impl SpawnPicker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Draw the next spawn.
    pub fn pick<R: RandomSource + ?Sized>(&mut self, rng: &mut R) -> SpawnChoice {
        let kind_idx = draw_excluding(rng, ShapeKind::ALL.len(), self.prev_kind);
        self.prev_kind = Some(kind_idx);
        let kind = ShapeKind::ALL[kind_idx];

        let color_idx = draw_excluding(rng, Color::PALETTE.len(), self.prev_color);
        self.prev_color = Some(color_idx);
        let color = Color::PALETTE[color_idx];

        let size = crate::pieces::shape_def(kind).size;
        let span = u32::from(COLS - size + 1);
        let col = (rng.next_u32() % span) as i8;

        SpawnChoice { kind, color, col }
    }

    /// Record a spawn that did not come from [`SpawnPicker::pick`].
    pub fn note(&mut self, kind: ShapeKind, color: Color) {
        self.prev_kind = Some(kind.index());
        self.prev_color = Color::PALETTE.iter().position(|&c| c == color);
    }
}

/// Redraw until the value differs from `prev`.
fn draw_excluding<R: RandomSource + ?Sized>(rng: &mut R, n: usize, prev: Option<usize>) -> usize {
    loop {
        let v = (rng.next_u32() % n as u32) as usize;
        if Some(v) != prev {
            return v;
        }
    }
}
