//! Soft periodic deadlines over a wrapping cycle counter.
//!
//! The counter is a free-running `u32` that wraps every 2^32 cycles (about
//! 25.6 s at 168 MHz). Deadlines compare with a signed difference, so they keep
//! working across the wrap as long as a period is shorter than 2^31 cycles.

use std::time::Instant;

/// Monotonic cycle counter, wrapping at 2^32.
pub trait Clock {
    fn now(&self) -> u32;
}

/// Longest period a signed deadline comparison can still order.
pub const MAX_PERIOD_CYCLES: u32 = i32::MAX as u32;

/// Convert milliseconds to counter cycles at `cpu_mhz`.
///
/// `None` when the period is zero or longer than [`MAX_PERIOD_CYCLES`].
pub fn cycles_from_ms(ms: u32, cpu_mhz: u32) -> Option<u32> {
    ms.checked_mul(cpu_mhz)?
        .checked_mul(1000)
        .filter(|&cycles| cycles > 0 && cycles <= MAX_PERIOD_CYCLES)
}

/// One periodic deadline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Deadline {
    at: u32,
    period: u32,
}

impl Deadline {
    /// First expiry one period after `now`
    pub fn new(now: u32, period: u32) -> Self {
        Self {
            at: now.wrapping_add(period),
            period,
        }
    }

    pub fn at(&self) -> u32 {
        self.at
    }

    pub fn period(&self) -> u32 {
        self.period
    }

    #[inline]
    pub fn expired(&self, now: u32) -> bool {
        (self.at.wrapping_sub(now) as i32) < 0
    }

    /// Move the deadline one period forward, independent of `now`.
    pub fn advance(&mut self) {
        self.at = self.at.wrapping_add(self.period);
    }

    /// Advance and return true if expired at `now`.
    ///
    /// A poll that is several periods late fires once; later polls catch up
    /// one period at a time.
    pub fn poll(&mut self, now: u32) -> bool {
        if self.expired(now) {
            self.advance();
            true
        } else {
            false
        }
    }

    pub fn rebase(&mut self, now: u32) {
        self.at = now.wrapping_add(self.period);
    }
}

/// The fall deadline and the tilt deadline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimingController {
    down: Deadline,
    tilt: Deadline,
}

impl TimingController {
    pub fn new(now: u32, down_period: u32, tilt_period: u32) -> Self {
        Self {
            down: Deadline::new(now, down_period),
            tilt: Deadline::new(now, tilt_period),
        }
    }

    /// Re-base both deadlines on `now`. Used at session start.
    pub fn reset(&mut self, now: u32) {
        self.down.rebase(now);
        self.tilt.rebase(now);
    }

    pub fn poll_down(&mut self, now: u32) -> bool {
        self.down.poll(now)
    }

    pub fn poll_tilt(&mut self, now: u32) -> bool {
        self.tilt.poll(now)
    }

    pub fn down(&self) -> &Deadline {
        &self.down
    }

    pub fn tilt(&self) -> &Deadline {
        &self.tilt
    }
}

/// Host clock: elapsed wall time scaled to a cycle rate.
#[derive(Debug, Clone)]
pub struct HostClock {
    origin: Instant,
    cpu_mhz: u32,
}

impl HostClock {
    pub fn new(cpu_mhz: u32) -> Self {
        Self {
            origin: Instant::now(),
            cpu_mhz,
        }
    }
}

impl Clock for HostClock {
    fn now(&self) -> u32 {
        let cycles = self.origin.elapsed().as_nanos() * u128::from(self.cpu_mhz) / 1000;
        // Truncation wraps like the hardware counter.
        cycles as u32
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now(&self) -> u32 {
        (**self).now()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{
        CPU_SPEED_MHZ, CYCLES_PER_DOWN, CYCLES_PER_TILT, MSEC_PER_DOWN, MSEC_PER_TILT,
    };

    #[test]
    fn test_cycles_from_ms_matches_constants() {
        assert_eq!(cycles_from_ms(MSEC_PER_TILT, CPU_SPEED_MHZ), Some(CYCLES_PER_TILT));
        assert_eq!(cycles_from_ms(MSEC_PER_DOWN, CPU_SPEED_MHZ), Some(CYCLES_PER_DOWN));
    }

    #[test]
    fn test_cycles_from_ms_rejects_unorderable_periods() {
        assert_eq!(cycles_from_ms(0, CPU_SPEED_MHZ), None);
        assert_eq!(cycles_from_ms(MSEC_PER_DOWN, 0), None);
        // 2_184_000_000 cycles: past 2^31
        assert_eq!(cycles_from_ms(13_000, CPU_SPEED_MHZ), None);
        // overflows u32 entirely
        assert_eq!(cycles_from_ms(30_000, CPU_SPEED_MHZ), None);
        assert_eq!(cycles_from_ms(12_000, CPU_SPEED_MHZ), Some(2_016_000_000));
    }

    #[test]
    fn test_deadline_not_expired_at_its_own_time() {
        let d = Deadline::new(0, 100);
        assert!(!d.expired(99));
        assert!(!d.expired(100));
        assert!(d.expired(101));
    }

    #[test]
    fn test_deadline_across_wrap() {
        let mut d = Deadline::new(u32::MAX - 10, 100);
        assert_eq!(d.at(), 89);
        assert!(!d.expired(u32::MAX));
        assert!(!d.expired(50));
        assert!(d.poll(90));
        assert_eq!(d.at(), 189);
    }

    #[test]
    fn test_late_poll_does_not_drift() {
        let mut d = Deadline::new(0, 100);
        assert!(d.poll(350));
        assert_eq!(d.at(), 200);
        assert!(d.poll(350));
        assert!(d.poll(350));
        assert!(!d.poll(350));
        assert_eq!(d.at(), 400);
    }

    #[test]
    fn test_controller_deadlines_are_independent() {
        let mut t = TimingController::new(0, 500, 150);
        assert!(!t.poll_down(151));
        assert!(t.poll_tilt(151));
        assert!(t.poll_down(501));
        t.reset(1000);
        assert_eq!(t.down().at(), 1500);
        assert_eq!(t.tilt().at(), 1150);
    }
}
