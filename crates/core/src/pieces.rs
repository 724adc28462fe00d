//! Pieces module - shape catalog and clockwise rotation
//!
//! Shapes are square windows of size 2, 3 or 4 stored in a 4x4 bit record
//! (see [`crate::bits`]). Rotation is computed from the bits instead of looked
//! up from per-orientation tables, so every catalog entry (and any custom
//! pattern) rotates the same way.

use arrayvec::ArrayVec;

use crate::bits::{BitField, ShapeBits};
use crate::types::{Color, ShapeKind, MAX_SHAPE_SIZE};

/// Board-relative cell of a shape, as (row, col)
pub type CellPos = (i8, i8);

/// Set cells of a shape; a 4x4 window holds at most 16.
pub type ShapeCells = ArrayVec<CellPos, 16>;

/// Static definition of one catalog entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShapeDef {
    pub kind: ShapeKind,
    pub bits: u16,
    pub size: u8,
}

/// The seven catalog shapes, indexed by [`ShapeKind::index`].
pub const CATALOG: [ShapeDef; 7] = [
    ShapeDef { kind: ShapeKind::S, bits: 0x0063, size: 3 },
    ShapeDef { kind: ShapeKind::Z, bits: 0x0036, size: 3 },
    ShapeDef { kind: ShapeKind::T, bits: 0x0072, size: 3 },
    ShapeDef { kind: ShapeKind::L, bits: 0x0017, size: 3 },
    ShapeDef { kind: ShapeKind::J, bits: 0x0074, size: 3 },
    ShapeDef { kind: ShapeKind::O, bits: 0x0033, size: 2 },
    ShapeDef { kind: ShapeKind::I, bits: 0x00F0, size: 4 },
];

/// Get the catalog definition for a shape kind
pub fn shape_def(kind: ShapeKind) -> ShapeDef {
    CATALOG[kind.index()]
}

/// Rotate the `size`x`size` window of `pattern` 90° clockwise in place.
///
/// Reads come from a snapshot, so the write order does not matter. The new bit
/// at (r, c) is the old bit at (size-1-c, r). Bits outside the window are left
/// untouched.
pub fn rotate_cw<B: BitField + Clone>(pattern: &mut B, size: u8) {
    let k = u32::from(size.min(MAX_SHAPE_SIZE));
    let snapshot = pattern.clone();
    for r in 0..k {
        for c in 0..k {
            let value = snapshot.get_bit(k - 1 - c, r);
            pattern.put_bit(value, r, c);
        }
    }
}

/// A shape in play: pattern, size, color and board anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Shape<B = ShapeBits> {
    pub kind: ShapeKind,
    pub bits: B,
    pub size: u8,
    pub color: Color,
    /// Board row of the window's top-left cell
    pub row: i8,
    /// Board column of the window's top-left cell
    pub col: i8,
}

impl Shape<ShapeBits> {
    /// Create a catalog shape anchored at row 0 and the given column
    pub fn spawn(kind: ShapeKind, color: Color, col: i8) -> Self {
        let def = shape_def(kind);
        Self {
            kind,
            bits: ShapeBits::new(def.bits),
            size: def.size,
            color,
            row: 0,
            col,
        }
    }
}

impl<B: BitField + Clone> Shape<B> {
    /// Board cells covered by the set bits of the window, row-major
    pub fn cells(&self) -> ShapeCells {
        let mut out = ShapeCells::new();
        let k = self.size.min(MAX_SHAPE_SIZE);
        for r in 0..k {
            for c in 0..k {
                if self.bits.get_bit(u32::from(r), u32::from(c)) {
                    out.push((self.row + r as i8, self.col + c as i8));
                }
            }
        }
        out
    }

    /// Copy moved by (drow, dcol)
    pub fn shifted(&self, drow: i8, dcol: i8) -> Self {
        Self {
            row: self.row + drow,
            col: self.col + dcol,
            ..self.clone()
        }
    }

    /// Copy rotated 90° clockwise about its window
    pub fn rotated(&self) -> Self {
        let mut next = self.clone();
        rotate_cw(&mut next.bits, next.size);
        next
    }

    /// Rotate this shape in place
    pub fn rotate(&mut self) {
        rotate_cw(&mut self.bits, self.size);
    }
}
