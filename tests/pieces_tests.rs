//! Pieces tests - catalog and bit rotation

use gyro_tetris::core::{rotate_cw, shape_def, BitField, Shape, ShapeBits, CATALOG};
use gyro_tetris::types::{Color, ShapeKind};

#[test]
fn test_catalog_patterns() {
    let expected = [
        (ShapeKind::S, 0x0063, 3),
        (ShapeKind::Z, 0x0036, 3),
        (ShapeKind::T, 0x0072, 3),
        (ShapeKind::L, 0x0017, 3),
        (ShapeKind::J, 0x0074, 3),
        (ShapeKind::O, 0x0033, 2),
        (ShapeKind::I, 0x00F0, 4),
    ];
    for (kind, bits, size) in expected {
        let def = shape_def(kind);
        assert_eq!(def.bits, bits, "{:?}", kind);
        assert_eq!(def.size, size, "{:?}", kind);
    }
}

#[test]
fn test_t_rotated_four_times_is_unchanged() {
    let mut bits = ShapeBits::new(0x0072);
    for _ in 0..4 {
        rotate_cw(&mut bits, 3);
    }
    assert_eq!(bits.raw(), 0x0072);
}

#[test]
fn test_rotation_has_order_four_for_every_shape() {
    for def in CATALOG {
        let mut bits = ShapeBits::new(def.bits);
        let mut seen = Vec::new();
        for _ in 0..4 {
            seen.push(bits.raw());
            rotate_cw(&mut bits, def.size);
        }
        assert_eq!(bits.raw(), def.bits, "{:?}", def.kind);
        // Every orientation keeps all four cells inside the window.
        for raw in seen {
            assert_eq!(raw.count_ones(), 4, "{:?}", def.kind);
        }
    }
}

#[test]
fn test_o_is_rotation_invariant() {
    let mut bits = ShapeBits::new(0x0033);
    rotate_cw(&mut bits, 2);
    assert_eq!(bits.raw(), 0x0033);
}

#[test]
fn test_rotation_maps_cells_clockwise() {
    // L: row 0 has ###, row 1 has #..
    let mut bits = ShapeBits::new(0x0017);
    rotate_cw(&mut bits, 3);
    // new(r, c) = old(2 - c, r)
    let old = ShapeBits::new(0x0017);
    for r in 0..3 {
        for c in 0..3 {
            assert_eq!(bits.get_bit(r, c), old.get_bit(2 - c, r), "({r}, {c})");
        }
    }
}

#[test]
fn test_put_bit_round_trips() {
    let mut bits = ShapeBits::default();
    bits.put_bit(true, 3, 2);
    assert!(bits.get_bit(3, 2));
    assert_eq!(bits.raw(), 1 << 14);
    bits.put_bit(false, 3, 2);
    assert_eq!(bits.raw(), 0);
}

#[test]
fn test_shape_rotate_keeps_anchor_and_color() {
    let shape = Shape::spawn(ShapeKind::J, Color::Yellow, 5).shifted(3, 0);
    let rotated = shape.rotated();
    assert_eq!((rotated.row, rotated.col), (3, 5));
    assert_eq!(rotated.color, Color::Yellow);
    assert_ne!(rotated.bits, shape.bits);
}
