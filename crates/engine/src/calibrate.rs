use crate::input::{BiasCalibrator, SensorDriver};

/// Average `samples` resting readings into a per-axis bias.
///
/// Blocks on the sensor for every sample. The device must be held still.
pub fn calibrate_bias<S: SensorDriver + ?Sized>(sensor: &mut S, samples: u32) -> [f32; 3] {
    let mut calibrator = BiasCalibrator::new(samples);
    while !calibrator.is_complete() {
        sensor.wait_for_data();
        calibrator.add_sample(sensor.read_angular_rate());
    }
    let bias = calibrator.bias();
    log::info!(
        "gyro bias from {} samples: x={:.3} y={:.3} z={:.3}",
        calibrator.count(),
        bias[0],
        bias[1],
        bias[2]
    );
    bias
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Alternating {
        reads: u32,
        waits: u32,
    }

    impl SensorDriver for Alternating {
        fn data_ready(&mut self) -> bool {
            true
        }

        fn read_angular_rate(&mut self) -> [f32; 3] {
            self.reads += 1;
            if self.reads % 2 == 0 {
                [1.0, 3.0, -1.0]
            } else {
                [3.0, 1.0, -3.0]
            }
        }

        fn wait_for_data(&mut self) {
            self.waits += 1;
        }
    }

    #[test]
    fn test_calibrate_waits_before_every_read() {
        let mut sensor = Alternating { reads: 0, waits: 0 };
        let bias = calibrate_bias(&mut sensor, 10);
        assert_eq!(sensor.reads, 10);
        assert_eq!(sensor.waits, 10);
        assert_eq!(bias, [2.0, 2.0, -2.0]);
    }

    #[test]
    fn test_zero_samples_gives_zero_bias() {
        let mut sensor = Alternating { reads: 0, waits: 0 };
        assert_eq!(calibrate_bias(&mut sensor, 0), [0.0; 3]);
        assert_eq!(sensor.reads, 0);
    }
}
