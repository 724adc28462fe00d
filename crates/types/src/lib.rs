//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the workspace.
//! All types are pure data with no external dependencies, so they can be used
//! by the engine core, the tilt input layer, the terminal simulator and the
//! session journal alike.
//!
//! # Playing Field
//!
//! - **Rows**: 17 (indexed 0-16, top to bottom)
//! - **Columns**: 16 (indexed 0-15, left to right)
//! - **Spawn row**: 0; spawn column is random so the shape fits the width
//!
//! # Timing Constants
//!
//! Periods are expressed in milliseconds and converted to cycles of the
//! device's free-running cycle counter:
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `CPU_SPEED_MHZ` | 168 | Cycle counter frequency |
//! | `MSEC_PER_TILT` | 150 | How often tilt is evaluated |
//! | `MSEC_PER_DOWN` | 500 | How often the shape falls one row |
//! | `GYRO_SAMPLES_PER_SEC` | 760 | Sensor output data rate |
//!
//! # Examples
//!
//! ```
//! use gyro_tetris_types::{Color, GameAction, ShapeKind, COLS, ROWS};
//!
//! assert_eq!(ShapeKind::from_str("t"), Some(ShapeKind::T));
//! assert_eq!(GameAction::from_str("drop"), Some(GameAction::Drop));
//! assert!(Color::Empty.is_empty());
//! assert_eq!((ROWS, COLS), (17, 16));
//! ```

/// Number of rows in the playing field
pub const ROWS: u8 = 17;

/// Number of columns in the playing field
pub const COLS: u8 = 16;

/// Bits per row in a shape's bit record, independent of the shape's size.
pub const SHAPE_ROW_STRIDE: u32 = 4;

/// Largest shape size (the record holds a 4x4 window).
pub const MAX_SHAPE_SIZE: u8 = 4;

/// Frequency of the cycle counter in MHz.
pub const CPU_SPEED_MHZ: u32 = 168;

/// Tilt evaluation period in milliseconds.
pub const MSEC_PER_TILT: u32 = 150;

/// Automatic fall period in milliseconds.
pub const MSEC_PER_DOWN: u32 = 500;

/// Tilt evaluation period in cycles at `CPU_SPEED_MHZ`.
pub const CYCLES_PER_TILT: u32 = MSEC_PER_TILT * CPU_SPEED_MHZ * 1000;

/// Automatic fall period in cycles at `CPU_SPEED_MHZ`.
pub const CYCLES_PER_DOWN: u32 = MSEC_PER_DOWN * CPU_SPEED_MHZ * 1000;

/// Gyroscope output data rate (samples per second).
pub const GYRO_SAMPLES_PER_SEC: u32 = 760;

/// Gyroscope sensitivity at the 250 dps full-scale range, in mdps per digit.
pub const SENSITIVITY_250DPS: f32 = 8.75;

/// Number of resting samples averaged into the gyro bias.
pub const CALIBRATION_SAMPLES: u32 = 1000;

/// Accumulated roll (degrees) beyond which the shape moves sideways.
pub const ROLL_THRESHOLD_DEG: f32 = 5.0;

/// Drop-axis angular rate (degrees/second) above which the shape drops.
pub const DROP_RATE_THRESHOLD_DPS: f32 = 40.0;

/// Points for landing a shape.
pub const LANDING_POINTS: u32 = 1;

/// Points for each collapsed row.
pub const ROW_CLEAR_POINTS: u32 = 100;

/// The seven shapes of the catalog, in catalog order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    S,
    Z,
    T,
    L,
    J,
    O,
    I,
}

impl ShapeKind {
    /// All kinds in catalog order.
    pub const ALL: [ShapeKind; 7] = [
        ShapeKind::S,
        ShapeKind::Z,
        ShapeKind::T,
        ShapeKind::L,
        ShapeKind::J,
        ShapeKind::O,
        ShapeKind::I,
    ];

    /// Position of this kind in the catalog
    pub fn index(&self) -> usize {
        match self {
            ShapeKind::S => 0,
            ShapeKind::Z => 1,
            ShapeKind::T => 2,
            ShapeKind::L => 3,
            ShapeKind::J => 4,
            ShapeKind::O => 5,
            ShapeKind::I => 6,
        }
    }

    /// Parse shape kind from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use gyro_tetris_types::ShapeKind;
    ///
    /// assert_eq!(ShapeKind::from_str("O"), Some(ShapeKind::O));
    /// assert_eq!(ShapeKind::from_str("x"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "s" => Some(ShapeKind::S),
            "z" => Some(ShapeKind::Z),
            "t" => Some(ShapeKind::T),
            "l" => Some(ShapeKind::L),
            "j" => Some(ShapeKind::J),
            "o" => Some(ShapeKind::O),
            "i" => Some(ShapeKind::I),
            _ => None,
        }
    }

    /// Convert to lowercase string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            ShapeKind::S => "s",
            ShapeKind::Z => "z",
            ShapeKind::T => "t",
            ShapeKind::L => "l",
            ShapeKind::J => "j",
            ShapeKind::O => "o",
            ShapeKind::I => "i",
        }
    }
}

/// Cell color
///
/// `Empty` is the reserved sentinel for an unoccupied cell; displays paint it
/// as the white background. The remaining variants form the spawn palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Color {
    #[default]
    Empty,
    Red,
    Blue,
    Orange,
    Yellow,
    Magenta,
    Cyan,
    Green,
}

impl Color {
    /// Colors a spawned shape may take, in palette order.
    pub const PALETTE: [Color; 7] = [
        Color::Red,
        Color::Blue,
        Color::Orange,
        Color::Yellow,
        Color::Magenta,
        Color::Cyan,
        Color::Green,
    ];

    pub fn is_empty(&self) -> bool {
        matches!(self, Color::Empty)
    }

    /// Lowercase name, used by the session journal
    pub fn as_str(&self) -> &'static str {
        match self {
            Color::Empty => "empty",
            Color::Red => "red",
            Color::Blue => "blue",
            Color::Orange => "orange",
            Color::Yellow => "yellow",
            Color::Magenta => "magenta",
            Color::Cyan => "cyan",
            Color::Green => "green",
        }
    }
}

/// Actions accepted by the game session
///
/// Tilt produces `Left`, `Right` and `Drop`; the fall timer produces `Down`;
/// the push button produces `Rotate`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameAction {
    /// Move one row down; locks the shape when it cannot move
    Down,
    /// Rotate 90° clockwise
    Rotate,
    /// Move one column right
    Right,
    /// Move one column left
    Left,
    /// Slide down to the lowest free row without locking
    Drop,
}

impl GameAction {
    pub const ALL: [GameAction; 5] = [
        GameAction::Down,
        GameAction::Rotate,
        GameAction::Right,
        GameAction::Left,
        GameAction::Drop,
    ];

    /// Parse action from string (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "down" => Some(GameAction::Down),
            "rotate" => Some(GameAction::Rotate),
            "right" => Some(GameAction::Right),
            "left" => Some(GameAction::Left),
            "drop" => Some(GameAction::Drop),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GameAction::Down => "down",
            GameAction::Rotate => "rotate",
            GameAction::Right => "right",
            GameAction::Left => "left",
            GameAction::Drop => "drop",
        }
    }
}

/// Result of applying one action to the session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionOutcome {
    /// The shape moved or rotated.
    Moved,
    /// The move would conflict; nothing changed.
    Rejected,
    /// The shape locked into the board and a new shape spawned (or the game ended).
    Locked { rows_cleared: u8 },
    /// The session is over or has no shape; the action was not processed.
    Ignored,
}

impl ActionOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActionOutcome::Moved => "moved",
            ActionOutcome::Rejected => "rejected",
            ActionOutcome::Locked { .. } => "locked",
            ActionOutcome::Ignored => "ignored",
        }
    }
}
