//! Engine module - the device loop around the core rules.
//!
//! Ties the core session to the input crate's sensor, button and deadlines,
//! and adds the ambient pieces a running game needs: configuration from the
//! environment, bias calibration, and an optional JSONL session journal.

pub mod calibrate;
pub mod config;
pub mod controller;
pub mod journal;

pub use gyro_tetris_core as core;
pub use gyro_tetris_input as input;
pub use gyro_tetris_types as types;

pub use calibrate::calibrate_bias;
pub use config::{EngineConfig, USAGE};
pub use controller::{Controller, Devices, Platform, PollReport};
pub use journal::{Entry, InputSource, Journal, JournalRecord, ShapeRecord};
