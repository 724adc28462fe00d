//! Input side of the engine (sensor-facing).
//!
//! This crate is independent of the game rules. It defines the device seams
//! ([`SensorDriver`], [`InputDevice`], [`Clock`]), turns gyro samples into
//! [`crate::types::GameAction`]s, keeps the two soft deadlines, and provides
//! keyboard-driven stand-ins for the hardware so the game runs in a terminal.

pub mod device;
pub mod map;
pub mod sim;
pub mod tilt;
pub mod timing;

pub use gyro_tetris_types as types;

pub use device::{scale_raw_rates, InputDevice, SensorDriver};
pub use map::{handle_key_event, should_quit, KeyIntent};
pub use sim::{KeyboardButton, KeyboardGyro};
pub use tilt::{Axis, BiasCalibrator, TiltCommands, TiltConfig, TiltInputAdapter};
pub use timing::{
    cycles_from_ms, Clock, Deadline, HostClock, TimingController, MAX_PERIOD_CYCLES,
};
