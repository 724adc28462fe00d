//! Tilt input: gyro samples in, game actions out.
//!
//! Every sample is bias corrected and the roll-axis rate is integrated into a
//! roll angle. On each tilt tick [`TiltInputAdapter::evaluate`] turns the roll
//! angle and the latest drop-axis rate into at most one sideways move and at
//! most one drop, in that order.

use arrayvec::ArrayVec;

use crate::types::{
    GameAction, DROP_RATE_THRESHOLD_DPS, GYRO_SAMPLES_PER_SEC, ROLL_THRESHOLD_DEG,
};

/// Actions produced by one tilt tick.
pub type TiltCommands = ArrayVec<GameAction, 2>;

/// One of the three gyro axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    /// Position of this axis in a `[x, y, z]` sample
    pub const fn index(self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
        }
    }
}

/// Axis assignment and thresholds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TiltConfig {
    /// Seconds between sensor samples
    pub sample_period_s: f32,
    /// Axis whose rate integrates into the roll angle
    pub roll_axis: Axis,
    /// Axis whose instantaneous rate triggers a drop
    pub drop_axis: Axis,
    pub roll_threshold_deg: f32,
    pub drop_rate_threshold_dps: f32,
}

impl Default for TiltConfig {
    fn default() -> Self {
        Self {
            sample_period_s: 1.0 / GYRO_SAMPLES_PER_SEC as f32,
            roll_axis: Axis::Y,
            drop_axis: Axis::X,
            roll_threshold_deg: ROLL_THRESHOLD_DEG,
            drop_rate_threshold_dps: DROP_RATE_THRESHOLD_DPS,
        }
    }
}

/// Bias-corrected rates and the integrated roll angle.
#[derive(Debug, Clone, Default)]
pub struct TiltInputAdapter {
    config: TiltConfig,
    bias: [f32; 3],
    rates: [f32; 3],
    roll_deg: f32,
    samples: u64,
}

impl TiltInputAdapter {
    pub fn new(config: TiltConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    pub fn config(&self) -> &TiltConfig {
        &self.config
    }

    pub fn set_bias(&mut self, bias: [f32; 3]) {
        self.bias = bias;
    }

    pub fn bias(&self) -> [f32; 3] {
        self.bias
    }

    pub fn roll_deg(&self) -> f32 {
        self.roll_deg
    }

    /// Latest bias-corrected rates
    pub fn rates(&self) -> [f32; 3] {
        self.rates
    }

    pub fn samples(&self) -> u64 {
        self.samples
    }

    /// Feed one raw sample.
    pub fn integrate(&mut self, raw: [f32; 3]) {
        for (rate, (value, bias)) in self.rates.iter_mut().zip(raw.iter().zip(self.bias)) {
            *rate = value - bias;
        }
        self.roll_deg += self.config.sample_period_s * self.rates[self.config.roll_axis.index()];
        self.samples = self.samples.wrapping_add(1);
    }

    /// Decide this tick's actions. The roll angle is left as is.
    pub fn evaluate(&self) -> TiltCommands {
        let mut out = TiltCommands::new();
        if self.roll_deg < -self.config.roll_threshold_deg {
            out.push(GameAction::Left);
        } else if self.roll_deg > self.config.roll_threshold_deg {
            out.push(GameAction::Right);
        }
        if self.rates[self.config.drop_axis.index()] > self.config.drop_rate_threshold_dps {
            out.push(GameAction::Drop);
        }
        out
    }

    /// Level the board again; called on rotate.
    pub fn reset_roll(&mut self) {
        self.roll_deg = 0.0;
    }

    /// Forget the roll angle and the latest rates; called at session start.
    pub fn reset(&mut self) {
        self.roll_deg = 0.0;
        self.rates = [0.0; 3];
    }

    /// Overwrite the roll angle. Replays and tests only.
    pub fn set_roll_deg(&mut self, roll_deg: f32) {
        self.roll_deg = roll_deg;
    }
}

/// Averages resting samples into a per-axis bias.
#[derive(Debug, Clone, PartialEq)]
pub struct BiasCalibrator {
    target: u32,
    count: u32,
    sum: [f64; 3],
}

impl BiasCalibrator {
    pub fn new(target: u32) -> Self {
        Self {
            target,
            count: 0,
            sum: [0.0; 3],
        }
    }

    /// Add one sample; returns true once `target` samples are in.
    pub fn add_sample(&mut self, rates: [f32; 3]) -> bool {
        if !self.is_complete() {
            for (sum, rate) in self.sum.iter_mut().zip(rates) {
                *sum += f64::from(rate);
            }
            self.count += 1;
        }
        self.is_complete()
    }

    pub fn is_complete(&self) -> bool {
        self.count >= self.target
    }

    pub fn count(&self) -> u32 {
        self.count
    }

    pub fn target(&self) -> u32 {
        self.target
    }

    /// Mean of the samples so far; zero before the first one.
    pub fn bias(&self) -> [f32; 3] {
        if self.count == 0 {
            return [0.0; 3];
        }
        let n = f64::from(self.count);
        self.sum.map(|s| (s / n) as f32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn adapter_with_roll(roll: f32) -> TiltInputAdapter {
        let mut tilt = TiltInputAdapter::default();
        tilt.set_roll_deg(roll);
        tilt
    }

    #[test]
    fn test_default_config_uses_firmware_axes() {
        let config = TiltConfig::default();
        assert_eq!(config.roll_axis, Axis::Y);
        assert_eq!(config.drop_axis, Axis::X);
        assert!((config.sample_period_s - 1.0 / 760.0).abs() < 1e-9);
    }

    #[test]
    fn test_roll_past_threshold_moves_left() {
        let tilt = adapter_with_roll(-6.0);
        assert_eq!(tilt.evaluate().as_slice(), &[GameAction::Left]);
    }

    #[test]
    fn test_roll_at_threshold_does_nothing() {
        assert!(adapter_with_roll(5.0).evaluate().is_empty());
        assert!(adapter_with_roll(-5.0).evaluate().is_empty());
        assert_eq!(adapter_with_roll(5.5).evaluate().as_slice(), &[GameAction::Right]);
    }

    #[test]
    fn test_evaluate_keeps_roll() {
        let tilt = adapter_with_roll(7.0);
        tilt.evaluate();
        tilt.evaluate();
        assert_eq!(tilt.roll_deg(), 7.0);
    }

    #[test]
    fn test_flick_drops_alongside_move() {
        let mut tilt = adapter_with_roll(9.0);
        tilt.integrate([45.0, 0.0, 0.0]);
        assert_eq!(
            tilt.evaluate().as_slice(),
            &[GameAction::Right, GameAction::Drop]
        );
    }

    #[test]
    fn test_integration_subtracts_bias() {
        let mut tilt = TiltInputAdapter::default();
        tilt.set_bias([1.0, 2.0, 3.0]);
        // 760 samples of 10 dps above bias is 10 degrees of roll.
        for _ in 0..760 {
            tilt.integrate([1.0, 12.0, 3.0]);
        }
        assert!((tilt.roll_deg() - 10.0).abs() < 1e-2);
        assert_eq!(tilt.rates(), [0.0, 10.0, 0.0]);
        assert_eq!(tilt.samples(), 760);
    }

    #[test]
    fn test_reset_roll_levels_board() {
        let mut tilt = adapter_with_roll(-12.0);
        tilt.reset_roll();
        assert!(tilt.evaluate().is_empty());
    }

    #[test]
    fn test_calibrator_averages_samples() {
        let mut cal = BiasCalibrator::new(4);
        assert_eq!(cal.bias(), [0.0; 3]);
        assert!(!cal.add_sample([1.0, -1.0, 0.5]));
        assert!(!cal.add_sample([3.0, -3.0, 0.5]));
        assert!(!cal.add_sample([1.0, -1.0, 0.5]));
        assert!(cal.add_sample([3.0, -3.0, 0.5]));
        assert_eq!(cal.bias(), [2.0, -2.0, 0.5]);
        // Extra samples are ignored once complete.
        assert!(cal.add_sample([100.0, 100.0, 100.0]));
        assert_eq!(cal.count(), 4);
    }
}
