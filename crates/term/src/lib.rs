//! Terminal "game renderer" module.
//!
//! Plays the part of the LCD panel on a host. The engine paints cells into a
//! [`PaintedCanvas`]; [`GameView`] turns the canvas plus a few HUD values into
//! a [`FrameBuffer`]; [`TerminalRenderer`] flushes frames with diff encoding.
//! Nothing here feeds back into the game.

pub mod canvas;
pub mod fb;
pub mod game_view;
pub mod render_throttle;
pub mod renderer;

pub use gyro_tetris_core as core;
pub use gyro_tetris_types as types;

pub use canvas::PaintedCanvas;
pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{color_rgb, AnchorY, GameView, HudState, Viewport};
pub use render_throttle::RenderThrottle;
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
