//! Gyro Tetris (workspace facade crate).
//!
//! Re-exports the workspace crates under one roof so the binary, the
//! integration tests and the benchmarks can use
//! `gyro_tetris::{core,engine,input,term,types}`.

pub use gyro_tetris_core as core;
pub use gyro_tetris_engine as engine;
pub use gyro_tetris_input as input;
pub use gyro_tetris_term as term;
pub use gyro_tetris_types as types;
