//! Device seams the engine polls.
//!
//! On hardware these wrap the gyroscope and the user button; on a host they
//! are played by the keyboard simulator in [`crate::sim`] or by scripted
//! fakes in tests.

/// Three-axis angular rate sensor.
pub trait SensorDriver {
    /// True when a fresh sample can be read.
    fn data_ready(&mut self) -> bool;

    /// Latest angular rate in degrees per second, X/Y/Z, not bias corrected.
    fn read_angular_rate(&mut self) -> [f32; 3];

    /// Block until a sample is ready.
    fn wait_for_data(&mut self) {
        while !self.data_ready() {
            std::hint::spin_loop();
        }
    }
}

/// The single push button.
pub trait InputDevice {
    /// Press edge, debounced by the device.
    fn button_pressed(&mut self) -> bool;

    /// Block until the button is released.
    fn wait_for_release(&mut self);
}

/// Convert raw register counts to degrees per second.
///
/// `sensitivity_mdps` is the full-scale sensitivity in millidegrees per
/// second per digit, e.g. [`crate::types::SENSITIVITY_250DPS`].
pub fn scale_raw_rates(raw: [i16; 3], sensitivity_mdps: f32) -> [f32; 3] {
    let scale = sensitivity_mdps / 1000.0;
    raw.map(|v| f32::from(v) * scale)
}

impl<S: SensorDriver + ?Sized> SensorDriver for &mut S {
    fn data_ready(&mut self) -> bool {
        (**self).data_ready()
    }

    fn read_angular_rate(&mut self) -> [f32; 3] {
        (**self).read_angular_rate()
    }

    fn wait_for_data(&mut self) {
        (**self).wait_for_data()
    }
}
