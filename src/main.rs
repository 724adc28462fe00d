//! Terminal runner for the tilt-controlled game.
//!
//! The keyboard stands in for the gyroscope and the button, the terminal for
//! the LCD panel. Everything between them is the same polling loop a device
//! would run.

use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{self, Event, KeyEventKind};

use gyro_tetris::engine::{Controller, Devices, EngineConfig, USAGE};
use gyro_tetris::input::{
    handle_key_event, should_quit, HostClock, KeyIntent, KeyboardButton, KeyboardGyro,
};
use gyro_tetris::term::{
    FrameBuffer, GameView, HudState, PaintedCanvas, RenderThrottle, TerminalRenderer, Viewport,
};
use gyro_tetris::types::GYRO_SAMPLES_PER_SEC;

/// Resting offset of the simulated gyro, removed again by calibration.
const SIM_BIAS: [f32; 3] = [0.4, -0.7, 0.2];

type HostRig = Devices<KeyboardGyro, KeyboardButton, HostClock, PaintedCanvas>;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let Some(config) = EngineConfig::from_env().with_args(std::env::args().skip(1))? else {
        print!("{USAGE}");
        return Ok(());
    };

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, config);

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

fn run(term: &mut TerminalRenderer, config: EngineConfig) -> Result<()> {
    let mut rig: HostRig = Devices {
        sensor: KeyboardGyro::new(GYRO_SAMPLES_PER_SEC, SIM_BIAS),
        button: KeyboardButton::new(),
        clock: HostClock::new(config.cpu_mhz),
        out: PaintedCanvas::new(),
    };
    let mut controller = Controller::from_config(config)?;

    let view = GameView::default();
    let mut fb = FrameBuffer::new(0, 0);
    let mut throttle = RenderThrottle::new(16, 100);
    let epoch = Instant::now();

    let calibrating = HudState {
        status: Some("calibrating gyro, keep still"),
        ..HudState::default()
    };
    draw(term, &view, &rig.out, &calibrating, &mut fb)?;
    controller.calibrate(&mut rig.sensor);
    controller.start(&mut rig);

    loop {
        while event::poll(Duration::ZERO)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if should_quit(key) {
                        log::info!(
                            "quit during session {} with score {}",
                            controller.session().session_id(),
                            controller.session().score()
                        );
                        return Ok(());
                    }
                    match handle_key_event(key) {
                        Some(KeyIntent::Button) => rig.button.press(),
                        Some(intent) => rig.sensor.apply(intent),
                        None => {}
                    }
                }
                Event::Resize(_, _) => {
                    term.invalidate();
                    throttle.force();
                }
                _ => {}
            }
        }

        controller.poll(&mut rig);

        let now_ms = epoch.elapsed().as_millis() as u64;
        if throttle.should_render(now_ms, rig.out.revision()) {
            let session = controller.session();
            let hud = HudState {
                roll_deg: controller.tilt().roll_deg(),
                game_over: session.game_over(),
                session_id: session.session_id(),
                status: None,
            };
            draw(term, &view, &rig.out, &hud, &mut fb)?;
        }

        std::thread::sleep(Duration::from_millis(1));
    }
}

fn draw(
    term: &mut TerminalRenderer,
    view: &GameView,
    canvas: &PaintedCanvas,
    hud: &HudState,
    fb: &mut FrameBuffer,
) -> Result<()> {
    let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
    view.render_into(canvas, hud, Viewport::new(w, h), fb);
    term.draw_swap(fb)
}
