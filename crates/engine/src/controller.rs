//! The polling loop.
//!
//! A [`Controller`] owns everything that changes during play: the session,
//! the tilt state, the two deadlines and the optional journal. One call to
//! [`Controller::poll`] is one pass of the device loop:
//!
//! 1. integrate fresh gyro samples
//! 2. on the tilt deadline, apply the tilt adapter's actions
//! 3. on the down deadline, apply `Down`
//! 4. on a button edge, apply `Rotate` and level the roll angle
//!
//! After game over only the button is watched; a press starts a new session.

use crate::config::EngineConfig;
use crate::core::{GameSession, RandomSource, Renderer, ScoreDisplay, SimpleRng};
use crate::input::{
    Clock, InputDevice, SensorDriver, TiltConfig, TiltInputAdapter, TimingController,
};
use crate::journal::{Entry, InputSource, Journal};
use crate::types::{ActionOutcome, Color, GameAction};

/// Upper bound on samples integrated by one poll.
const MAX_SAMPLES_PER_POLL: u32 = 64;

/// Everything the loop talks to.
pub trait Platform: SensorDriver + InputDevice + Clock + Renderer {}

impl<T: SensorDriver + InputDevice + Clock + Renderer + ?Sized> Platform for T {}

/// Separate devices bundled into one [`Platform`].
#[derive(Debug, Clone, Default)]
pub struct Devices<S, B, C, O> {
    pub sensor: S,
    pub button: B,
    pub clock: C,
    pub out: O,
}

impl<S: SensorDriver, B, C, O> SensorDriver for Devices<S, B, C, O> {
    fn data_ready(&mut self) -> bool {
        self.sensor.data_ready()
    }

    fn read_angular_rate(&mut self) -> [f32; 3] {
        self.sensor.read_angular_rate()
    }

    fn wait_for_data(&mut self) {
        self.sensor.wait_for_data()
    }
}

impl<S, B: InputDevice, C, O> InputDevice for Devices<S, B, C, O> {
    fn button_pressed(&mut self) -> bool {
        self.button.button_pressed()
    }

    fn wait_for_release(&mut self) {
        self.button.wait_for_release()
    }
}

impl<S, B, C: Clock, O> Clock for Devices<S, B, C, O> {
    fn now(&self) -> u32 {
        self.clock.now()
    }
}

impl<S, B, C, O: ScoreDisplay> ScoreDisplay for Devices<S, B, C, O> {
    fn show_score(&mut self, score: u32) {
        self.out.show_score(score)
    }
}

impl<S, B, C, O: Renderer> Renderer for Devices<S, B, C, O> {
    fn paint_cell(&mut self, row: u8, col: u8, color: Color) {
        self.out.paint_cell(row, col, color)
    }
}

/// What one poll did
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PollReport {
    pub samples: u32,
    pub actions: u8,
    pub restarted: bool,
}

pub struct Controller<R = SimpleRng> {
    config: EngineConfig,
    session: GameSession<R>,
    tilt: TiltInputAdapter,
    timing: TimingController,
    journal: Option<Journal>,
    reported_over: bool,
}

impl Controller<SimpleRng> {
    /// Controller with the built-in LCG seeded from `config.seed`
    pub fn new(config: EngineConfig) -> Self {
        let rng = SimpleRng::new(config.seed);
        Self::with_rng(config, rng)
    }

    /// Like [`Controller::new`], also opening the configured journal.
    pub fn from_config(config: EngineConfig) -> anyhow::Result<Self> {
        let journal = match config.journal_path.as_deref() {
            Some(path) => Some(Journal::open(path)?),
            None => None,
        };
        let mut controller = Self::new(config);
        controller.journal = journal;
        Ok(controller)
    }
}

impl<R: RandomSource> Controller<R> {
    pub fn with_rng(config: EngineConfig, rng: R) -> Self {
        let timing = TimingController::new(0, config.down_cycles(), config.tilt_cycles());
        Self {
            config,
            session: GameSession::new(rng),
            tilt: TiltInputAdapter::new(TiltConfig::default()),
            timing,
            journal: None,
            reported_over: false,
        }
    }

    pub fn set_journal(&mut self, journal: Journal) {
        self.journal = Some(journal);
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn session(&self) -> &GameSession<R> {
        &self.session
    }

    pub fn tilt(&self) -> &TiltInputAdapter {
        &self.tilt
    }

    pub fn tilt_mut(&mut self) -> &mut TiltInputAdapter {
        &mut self.tilt
    }

    pub fn timing(&self) -> &TimingController {
        &self.timing
    }

    pub fn journal(&self) -> Option<&Journal> {
        self.journal.as_ref()
    }

    /// Measure the gyro bias and use it from now on.
    pub fn calibrate<S: SensorDriver + ?Sized>(&mut self, sensor: &mut S) -> [f32; 3] {
        let bias = crate::calibrate::calibrate_bias(sensor, self.config.calibration_samples);
        self.tilt.set_bias(bias);
        bias
    }

    /// Start (or restart) a session and re-base the deadlines on now.
    pub fn start<P: Clock + Renderer + ?Sized>(&mut self, p: &mut P) {
        if self.session.started() {
            self.session.restart(p);
        } else {
            self.session.start(p);
        }
        self.tilt.reset();
        self.timing.reset(p.now());
        self.reported_over = false;
        log::info!(
            "session {} started (seed {})",
            self.session.session_id(),
            self.config.seed
        );
        self.report_game_over();
    }

    /// One pass of the device loop.
    pub fn poll<P: Platform + ?Sized>(&mut self, p: &mut P) -> PollReport {
        let mut report = PollReport::default();

        if self.session.game_over() {
            if p.button_pressed() {
                p.wait_for_release();
                self.start(p);
                report.restarted = true;
            }
            return report;
        }

        while report.samples < MAX_SAMPLES_PER_POLL && p.data_ready() {
            let rates = p.read_angular_rate();
            self.tilt.integrate(rates);
            report.samples += 1;
        }

        let now = p.now();

        if self.timing.poll_tilt(now) {
            for action in self.tilt.evaluate() {
                self.apply(action, InputSource::Tilt, now, p);
                report.actions += 1;
            }
        }

        if self.timing.poll_down(now) {
            self.apply(GameAction::Down, InputSource::Timer, now, p);
            report.actions += 1;
        }

        if p.button_pressed() {
            p.wait_for_release();
            self.apply(GameAction::Rotate, InputSource::Button, now, p);
            self.tilt.reset_roll();
            report.actions += 1;
        }

        report
    }

    /// Poll until the session ends or `max_polls` passes have run.
    ///
    /// Returns true if the session ended.
    pub fn run_until_game_over<P: Platform + ?Sized>(&mut self, p: &mut P, max_polls: u64) -> bool {
        for _ in 0..max_polls {
            if self.session.game_over() {
                return true;
            }
            self.poll(p);
        }
        self.session.game_over()
    }

    fn apply<O: Renderer + ?Sized>(
        &mut self,
        action: GameAction,
        source: InputSource,
        cycle: u32,
        out: &mut O,
    ) -> ActionOutcome {
        let outcome = self.session.apply_action_with(action, out);

        if let ActionOutcome::Locked { rows_cleared } = outcome {
            if rows_cleared > 0 {
                log::debug!(
                    "{} row(s) cleared, score {}",
                    rows_cleared,
                    self.session.score()
                );
            } else {
                log::debug!("shape locked, score {}", self.session.score());
            }
        }

        if let Some(journal) = self.journal.as_mut() {
            journal.record(Entry {
                cycle,
                source,
                action,
                outcome,
                score: self.session.score(),
                game_over: self.session.game_over(),
                roll_deg: self.tilt.roll_deg(),
                shape: self.session.current(),
            });
        }

        self.report_game_over();
        outcome
    }

    fn report_game_over(&mut self) {
        if self.session.game_over() && !self.reported_over {
            self.reported_over = true;
            log::info!(
                "session {} over: score {}, {} shapes, {} rows",
                self.session.session_id(),
                self.session.score(),
                self.session.shapes_spawned(),
                self.session.rows_cleared()
            );
        }
    }
}

impl<R> std::fmt::Debug for Controller<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Controller")
            .field("config", &self.config)
            .field("tilt", &self.tilt)
            .field("timing", &self.timing)
            .field("journal", &self.journal)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    /// Always-ready sensor with a fixed reading
    struct Steady([f32; 3]);

    impl SensorDriver for Steady {
        fn data_ready(&mut self) -> bool {
            true
        }

        fn read_angular_rate(&mut self) -> [f32; 3] {
            self.0
        }
    }

    #[derive(Default)]
    struct Presses(u32);

    impl InputDevice for Presses {
        fn button_pressed(&mut self) -> bool {
            if self.0 > 0 {
                self.0 -= 1;
                true
            } else {
                false
            }
        }

        fn wait_for_release(&mut self) {}
    }

    #[derive(Default)]
    struct Manual(Cell<u32>);

    impl Clock for Manual {
        fn now(&self) -> u32 {
            self.0.get()
        }
    }

    fn config() -> EngineConfig {
        EngineConfig {
            cpu_mhz: 1,
            msec_per_down: 500,
            msec_per_tilt: 150,
            ..EngineConfig::default()
        }
    }

    fn rig(rates: [f32; 3]) -> Devices<Steady, Presses, Manual, ()> {
        Devices {
            sensor: Steady(rates),
            button: Presses::default(),
            clock: Manual::default(),
            out: (),
        }
    }

    #[test]
    fn test_start_spawns_and_rebases() {
        let mut p = rig([0.0; 3]);
        p.clock.0.set(1_000);
        let mut controller = Controller::new(config());
        controller.start(&mut p);
        assert!(controller.session().current().is_some());
        assert_eq!(controller.timing().down().at(), 1_000 + 500_000);
        assert_eq!(controller.timing().tilt().at(), 1_000 + 150_000);
    }

    #[test]
    fn test_down_deadline_moves_shape() {
        let mut p = rig([0.0; 3]);
        let mut controller = Controller::new(config());
        controller.start(&mut p);
        let row = controller.session().current().unwrap().row;

        p.clock.0.set(500_001);
        let report = controller.poll(&mut p);
        assert_eq!(report.actions, 1);
        assert_eq!(controller.session().current().unwrap().row, row + 1);
    }

    #[test]
    fn test_button_rotates_and_levels_roll() {
        let mut p = rig([0.0; 3]);
        let mut controller = Controller::new(config());
        controller.start(&mut p);
        controller.tilt_mut().set_roll_deg(3.0);

        p.button.0 = 1;
        let report = controller.poll(&mut p);
        assert_eq!(report.actions, 1);
        assert_eq!(controller.tilt().roll_deg(), 0.0);
    }

    #[test]
    fn test_sample_drain_is_bounded() {
        let mut p = rig([0.0, 1.0, 0.0]);
        let mut controller = Controller::new(config());
        controller.start(&mut p);
        let report = controller.poll(&mut p);
        assert_eq!(report.samples, MAX_SAMPLES_PER_POLL);
    }

    #[test]
    fn test_game_runs_to_completion_and_restarts() {
        let mut p = rig([0.0; 3]);
        let mut controller = Controller::new(config());
        controller.start(&mut p);

        let mut polls = 0u64;
        while !controller.session().game_over() && polls < 100_000 {
            p.clock.0.set(p.clock.0.get().wrapping_add(500_001));
            controller.poll(&mut p);
            polls += 1;
        }
        assert!(controller.session().game_over());

        p.button.0 = 1;
        let report = controller.poll(&mut p);
        assert!(report.restarted);
        assert!(!controller.session().game_over());
        assert_eq!(controller.session().session_id(), 1);
        assert_eq!(controller.session().score(), 0);
    }
}
