//! Engine configuration

use anyhow::anyhow;

use crate::input::cycles_from_ms;
use crate::types::{
    CALIBRATION_SAMPLES, CPU_SPEED_MHZ, CYCLES_PER_DOWN, CYCLES_PER_TILT, MSEC_PER_DOWN,
    MSEC_PER_TILT,
};

/// Engine configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    pub seed: u32,
    pub cpu_mhz: u32,
    pub msec_per_down: u32,
    pub msec_per_tilt: u32,
    pub calibration_samples: u32,
    pub journal_path: Option<String>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            seed: 1,
            cpu_mhz: CPU_SPEED_MHZ,
            msec_per_down: MSEC_PER_DOWN,
            msec_per_tilt: MSEC_PER_TILT,
            calibration_samples: CALIBRATION_SAMPLES,
            journal_path: None,
        }
    }
}

/// Command-line help for the terminal binary
pub const USAGE: &str = "\
usage: gyro-tetris [--seed N] [--journal PATH]

Tilt with the arrow keys, flick with up, space rotates (and restarts after
game over), q quits.

environment:
  GYRO_TETRIS_SEED                 RNG seed (default 1)
  GYRO_TETRIS_CPU_MHZ              cycle counter rate (default 168)
  GYRO_TETRIS_DOWN_MS              fall period (default 500)
  GYRO_TETRIS_TILT_MS              tilt period (default 150)
  GYRO_TETRIS_CALIBRATION_SAMPLES  bias samples (default 1000)
  GYRO_TETRIS_JOURNAL              JSONL journal path
  RUST_LOG                         log filter (default warn)
";

impl EngineConfig {
    /// Create from environment variables; unset, unparseable or out-of-range
    /// values keep defaults
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Create from any key lookup (the environment, or a map in tests)
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let number = |key: &str, default: u32| -> u32 {
            lookup(key)
                .and_then(|s| s.trim().parse().ok())
                .unwrap_or(default)
        };

        let journal_path = lookup("GYRO_TETRIS_JOURNAL")
            .map(|s| s.trim().to_string())
            .and_then(|s| if s.is_empty() { None } else { Some(s) });

        let mut config = Self {
            seed: number("GYRO_TETRIS_SEED", defaults.seed),
            cpu_mhz: number("GYRO_TETRIS_CPU_MHZ", defaults.cpu_mhz),
            msec_per_down: number("GYRO_TETRIS_DOWN_MS", defaults.msec_per_down),
            msec_per_tilt: number("GYRO_TETRIS_TILT_MS", defaults.msec_per_tilt),
            calibration_samples: number(
                "GYRO_TETRIS_CALIBRATION_SAMPLES",
                defaults.calibration_samples,
            ),
            journal_path,
        };
        config.check_periods();
        config
    }

    /// Reset a clock rate or period that gives no usable deadline.
    ///
    /// Periods must be non-zero and below 2^31 cycles for the wrapping
    /// deadline comparison to order them.
    fn check_periods(&mut self) {
        let defaults = Self::default();
        if cycles_from_ms(defaults.msec_per_down, self.cpu_mhz).is_none() {
            log::warn!(
                "GYRO_TETRIS_CPU_MHZ={} is out of range, using {}",
                self.cpu_mhz,
                defaults.cpu_mhz
            );
            self.cpu_mhz = defaults.cpu_mhz;
        }
        if cycles_from_ms(self.msec_per_down, self.cpu_mhz).is_none() {
            log::warn!(
                "GYRO_TETRIS_DOWN_MS={} is out of range at {} MHz, using {}",
                self.msec_per_down,
                self.cpu_mhz,
                defaults.msec_per_down
            );
            self.msec_per_down = defaults.msec_per_down;
        }
        if cycles_from_ms(self.msec_per_tilt, self.cpu_mhz).is_none() {
            log::warn!(
                "GYRO_TETRIS_TILT_MS={} is out of range at {} MHz, using {}",
                self.msec_per_tilt,
                self.cpu_mhz,
                defaults.msec_per_tilt
            );
            self.msec_per_tilt = defaults.msec_per_tilt;
        }
    }

    /// Apply command-line flags on top of this config.
    ///
    /// Returns `Ok(None)` when help was requested.
    pub fn with_args<I, S>(mut self, args: I) -> anyhow::Result<Option<Self>>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut args = args.into_iter().map(Into::into);
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "-h" | "--help" => return Ok(None),
                "--seed" => {
                    let value = args.next().ok_or_else(|| anyhow!("--seed needs a value"))?;
                    self.seed = value
                        .parse()
                        .map_err(|_| anyhow!("invalid seed: {value}"))?;
                }
                "--journal" => {
                    let value = args
                        .next()
                        .ok_or_else(|| anyhow!("--journal needs a path"))?;
                    self.journal_path = Some(value);
                }
                other => return Err(anyhow!("unknown argument: {other}")),
            }
        }
        Ok(Some(self))
    }

    /// Fall period in counter cycles; the firmware period if out of range
    pub fn down_cycles(&self) -> u32 {
        cycles_from_ms(self.msec_per_down, self.cpu_mhz).unwrap_or(CYCLES_PER_DOWN)
    }

    /// Tilt period in counter cycles; the firmware period if out of range
    pub fn tilt_cycles(&self) -> u32 {
        cycles_from_ms(self.msec_per_tilt, self.cpu_mhz).unwrap_or(CYCLES_PER_TILT)
    }
}
