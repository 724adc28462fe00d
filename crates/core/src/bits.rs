//! Bit record access for shape patterns
//!
//! A shape's pattern is a small record of bits addressed by (row, col) with a
//! fixed row stride of `SHAPE_ROW_STRIDE` bits, whatever the shape's size.
//! Everything above this module reads and writes patterns only through the
//! [`BitField`] trait, so alternative storage (e.g. a bit-banded alias region
//! on real hardware) can be swapped in.

use crate::types::SHAPE_ROW_STRIDE;

/// Single-bit read/write access addressed by (row, col).
pub trait BitField {
    fn get_bit(&self, row: u32, col: u32) -> bool;
    fn put_bit(&mut self, value: bool, row: u32, col: u32);
}

/// Four nibbles, one per shape row; bit `4*row + col`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ShapeBits(pub u16);

impl ShapeBits {
    pub const fn new(bits: u16) -> Self {
        Self(bits)
    }

    pub fn raw(&self) -> u16 {
        self.0
    }

    #[inline(always)]
    fn mask(row: u32, col: u32) -> u16 {
        1 << (SHAPE_ROW_STRIDE * row + col)
    }
}

impl BitField for ShapeBits {
    #[inline]
    fn get_bit(&self, row: u32, col: u32) -> bool {
        self.0 & Self::mask(row, col) != 0
    }

    #[inline]
    fn put_bit(&mut self, value: bool, row: u32, col: u32) {
        if value {
            self.0 |= Self::mask(row, col);
        } else {
            self.0 &= !Self::mask(row, col);
        }
    }
}
