use crate::pieces::Shape;
use crate::types::{Color, ShapeKind, COLS, ROWS};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ShapeSnapshot {
    pub kind: ShapeKind,
    pub color: Color,
    pub bits: u16,
    pub size: u8,
    pub row: i8,
    pub col: i8,
}

impl From<Shape> for ShapeSnapshot {
    fn from(value: Shape) -> Self {
        Self {
            kind: value.kind,
            color: value.color,
            bits: value.bits.raw(),
            size: value.size,
            row: value.row,
            col: value.col,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GameSnapshot {
    pub board: [[Color; COLS as usize]; ROWS as usize],
    pub current: Option<ShapeSnapshot>,
    /// Row the falling shape would reach with a drop
    pub landing_row: Option<i8>,
    pub score: u32,
    pub game_over: bool,
    pub session_id: u32,
    pub shapes_spawned: u32,
    pub rows_cleared: u32,
}

impl GameSnapshot {
    /// Color at (row, col) with the falling shape drawn over the board
    pub fn cell_with_current(&self, row: u8, col: u8) -> Color {
        if let Some(shape) = self.current {
            let r = row as i16 - shape.row as i16;
            let c = col as i16 - shape.col as i16;
            let k = shape.size as i16;
            if (0..k).contains(&r) && (0..k).contains(&c) && shape.bits & (1 << (r * 4 + c)) != 0 {
                return shape.color;
            }
        }
        self.board
            .get(row as usize)
            .and_then(|cells| cells.get(col as usize))
            .copied()
            .unwrap_or(Color::Empty)
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            board: [[Color::Empty; COLS as usize]; ROWS as usize],
            current: None,
            landing_row: None,
            score: 0,
            game_over: false,
            session_id: 0,
            shapes_spawned: 0,
            rows_cleared: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cell_with_current_overlays_shape() {
        let mut snap = GameSnapshot::default();
        snap.board[16][0] = Color::Green;
        snap.current = Some(ShapeSnapshot::from(Shape::spawn(
            ShapeKind::O,
            Color::Red,
            4,
        )));
        assert_eq!(snap.cell_with_current(0, 4), Color::Red);
        assert_eq!(snap.cell_with_current(1, 5), Color::Red);
        assert_eq!(snap.cell_with_current(2, 4), Color::Empty);
        assert_eq!(snap.cell_with_current(16, 0), Color::Green);
    }
}
