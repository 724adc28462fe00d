//! Keyboard-driven stand-ins for the gyroscope and the button.
//!
//! A tilt key adds a short roll-rate pulse; integrated over its duration the
//! pulse tilts the board by [`TILT_STEP_DEG`]. The board stays tilted until
//! the opposite key levels it or a rotate resets the roll. A flick key spikes
//! the drop axis for slightly longer than one tilt period so the next tilt
//! tick sees it.

use std::time::{Duration, Instant};

use crate::device::{InputDevice, SensorDriver};
use crate::map::KeyIntent;
use crate::types::{DROP_RATE_THRESHOLD_DPS, GYRO_SAMPLES_PER_SEC, MSEC_PER_TILT};

/// Roll added by one tilt key press, in degrees.
pub const TILT_STEP_DEG: f32 = 6.0;

const TILT_PULSE: Duration = Duration::from_millis(100);
const FLICK_PULSE: Duration = Duration::from_millis(MSEC_PER_TILT as u64 + 50);
const FLICK_RATE_DPS: f32 = DROP_RATE_THRESHOLD_DPS * 3.0;

/// Samples owed after a stall are capped at one second's worth.
const MAX_BACKLOG: u64 = GYRO_SAMPLES_PER_SEC as u64;

/// Simulated gyroscope fed by key intents.
#[derive(Debug, Clone)]
pub struct KeyboardGyro {
    origin: Instant,
    sample_rate_hz: u32,
    bias: [f32; 3],
    /// Samples handed out so far
    emitted: u64,
    /// Roll rate and the elapsed time at which the pulse ends
    roll_pulse: Option<(f32, Duration)>,
    flick_until: Option<Duration>,
}

impl KeyboardGyro {
    pub fn new(sample_rate_hz: u32, bias: [f32; 3]) -> Self {
        Self {
            origin: Instant::now(),
            sample_rate_hz: sample_rate_hz.max(1),
            bias,
            emitted: 0,
            roll_pulse: None,
            flick_until: None,
        }
    }

    /// Apply a key intent now. Button intents are ignored.
    pub fn apply(&mut self, intent: KeyIntent) {
        let elapsed = self.origin.elapsed();
        self.apply_at(intent, elapsed);
    }

    /// Apply a key intent at `elapsed` since the gyro was created.
    pub fn apply_at(&mut self, intent: KeyIntent, elapsed: Duration) {
        let rate = TILT_STEP_DEG / TILT_PULSE.as_secs_f32();
        match intent {
            KeyIntent::TiltLeft => self.roll_pulse = Some((-rate, elapsed + TILT_PULSE)),
            KeyIntent::TiltRight => self.roll_pulse = Some((rate, elapsed + TILT_PULSE)),
            KeyIntent::Flick => self.flick_until = Some(elapsed + FLICK_PULSE),
            KeyIntent::Button => {}
        }
    }

    /// True if a sample is owed at `elapsed`.
    pub fn ready_at(&mut self, elapsed: Duration) -> bool {
        let due = elapsed.as_nanos() * u128::from(self.sample_rate_hz) / 1_000_000_000;
        let due = due as u64;
        if due.saturating_sub(self.emitted) > MAX_BACKLOG {
            self.emitted = due - MAX_BACKLOG;
        }
        due > self.emitted
    }

    /// Take the sample owed at `elapsed`.
    pub fn sample_at(&mut self, elapsed: Duration) -> [f32; 3] {
        // Pulses are judged at the sample's own time, not at read time.
        let sample_time =
            Duration::from_nanos(self.emitted * 1_000_000_000 / u64::from(self.sample_rate_hz))
                .min(elapsed);
        self.emitted += 1;

        let mut rates = self.bias;
        if let Some((rate, until)) = self.roll_pulse {
            if sample_time < until {
                rates[1] += rate;
            } else {
                self.roll_pulse = None;
            }
        }
        if let Some(until) = self.flick_until {
            if sample_time < until {
                rates[0] += FLICK_RATE_DPS;
            } else {
                self.flick_until = None;
            }
        }
        rates
    }
}

impl SensorDriver for KeyboardGyro {
    fn data_ready(&mut self) -> bool {
        let elapsed = self.origin.elapsed();
        self.ready_at(elapsed)
    }

    fn read_angular_rate(&mut self) -> [f32; 3] {
        let elapsed = self.origin.elapsed();
        self.sample_at(elapsed)
    }

    fn wait_for_data(&mut self) {
        while !self.data_ready() {
            std::thread::sleep(Duration::from_micros(200));
        }
    }
}

/// Simulated push button.
///
/// Terminals do not report key releases, so a press is released at once.
#[derive(Debug, Clone, Default)]
pub struct KeyboardButton {
    pending: bool,
}

impl KeyboardButton {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn press(&mut self) {
        self.pending = true;
    }
}

impl InputDevice for KeyboardButton {
    fn button_pressed(&mut self) -> bool {
        std::mem::take(&mut self.pending)
    }

    fn wait_for_release(&mut self) {}
}
