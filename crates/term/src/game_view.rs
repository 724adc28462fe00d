//! GameView: maps a [`PaintedCanvas`] and a few HUD values into a terminal
//! framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::canvas::PaintedCanvas;
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::{Color, COLS, ROLL_THRESHOLD_DEG, ROWS};

/// Roll shown at either end of the gauge, in degrees.
const GAUGE_RANGE_DEG: f32 = 15.0;
/// Gauge cells on each side of level.
const GAUGE_HALF: i16 = 10;

const PAPER: Rgb = Rgb::new(235, 235, 235);
const INK: Rgb = Rgb::new(220, 220, 220);
const SCREEN: Rgb = Rgb::new(0, 0, 0);

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

/// Values drawn beside the board that the canvas does not carry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HudState {
    pub roll_deg: f32,
    pub game_over: bool,
    pub session_id: u32,
    /// One-line message under the board, e.g. while calibrating
    pub status: Option<&'static str>,
}

impl Default for HudState {
    fn default() -> Self {
        Self {
            roll_deg: 0.0,
            game_over: false,
            session_id: 0,
            status: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorY {
    Center,
    Top,
}

/// Board renderer with a configurable cell aspect.
#[derive(Debug, Clone)]
pub struct GameView {
    /// Board cell width in terminal columns.
    cell_w: u16,
    /// Board cell height in terminal rows.
    cell_h: u16,
    anchor_y: AnchorY,
}

impl Default for GameView {
    fn default() -> Self {
        // 2x1 helps compensate for typical terminal glyph aspect ratio.
        Self::new(2, 1)
    }
}

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
            cell_h: cell_h.max(1),
            anchor_y: AnchorY::Center,
        }
    }

    pub fn with_anchor_y(mut self, anchor_y: AnchorY) -> Self {
        self.anchor_y = anchor_y;
        self
    }

    /// Terminal size of the bordered board
    pub fn frame_size(&self) -> (u16, u16) {
        (
            (COLS as u16) * self.cell_w + 2,
            (ROWS as u16) * self.cell_h + 2,
        )
    }

    /// Top-left corner of the board border inside `viewport`
    pub fn frame_origin(&self, viewport: Viewport) -> (u16, u16) {
        let (frame_w, frame_h) = self.frame_size();
        let x = viewport.width.saturating_sub(frame_w) / 2;
        let y = match self.anchor_y {
            AnchorY::Center => viewport.height.saturating_sub(frame_h) / 2,
            AnchorY::Top => 0,
        };
        (x, y)
    }

    /// Render into an existing framebuffer, resizing it to the viewport.
    pub fn render_into(
        &self,
        canvas: &PaintedCanvas,
        hud: &HudState,
        viewport: Viewport,
        fb: &mut FrameBuffer,
    ) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::default().cell(' '));

        let (frame_w, frame_h) = self.frame_size();
        let (start_x, start_y) = self.frame_origin(viewport);

        self.draw_border(fb, start_x, start_y, frame_w, frame_h);

        for row in 0..ROWS {
            for col in 0..COLS {
                self.draw_board_cell(fb, start_x, start_y, row, col, canvas.get(row, col));
            }
        }

        self.draw_side_panel(fb, canvas, hud, viewport, start_x, start_y, frame_w);

        let below = start_y.saturating_add(frame_h);
        if let Some(status) = hud.status {
            fb.put_str(start_x, below, status, CellStyle::new(INK, SCREEN).bold());
        } else {
            fb.put_str(
                start_x,
                below,
                "←/→ tilt  ↑ drop  space rotate  q quit",
                CellStyle::new(INK, SCREEN).dim(),
            );
        }

        if hud.game_over {
            let mid = start_y.saturating_add(frame_h / 2);
            self.draw_overlay_text(fb, start_x, mid, frame_w, "GAME OVER");
            self.draw_overlay_text(fb, start_x, mid.saturating_add(1), frame_w, "press space");
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(
        &self,
        canvas: &PaintedCanvas,
        hud: &HudState,
        viewport: Viewport,
    ) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(canvas, hud, viewport, &mut fb);
        fb
    }

    fn draw_border(&self, fb: &mut FrameBuffer, x: u16, y: u16, w: u16, h: u16) {
        let style = CellStyle::new(Rgb::new(200, 200, 200), SCREEN);

        fb.put_char(x, y, '┌', style);
        fb.put_char(x + w - 1, y, '┐', style);
        fb.put_char(x, y + h - 1, '└', style);
        fb.put_char(x + w - 1, y + h - 1, '┘', style);

        for dx in 1..w - 1 {
            fb.put_char(x + dx, y, '─', style);
            fb.put_char(x + dx, y + h - 1, '─', style);
        }
        for dy in 1..h - 1 {
            fb.put_char(x, y + dy, '│', style);
            fb.put_char(x + w - 1, y + dy, '│', style);
        }
    }

    fn draw_board_cell(
        &self,
        fb: &mut FrameBuffer,
        start_x: u16,
        start_y: u16,
        row: u8,
        col: u8,
        color: Color,
    ) {
        let (ch, style) = match color_rgb(color) {
            Some(fg) => ('█', CellStyle::new(fg, PAPER)),
            None => (' ', CellStyle::new(PAPER, PAPER)),
        };
        let px = start_x + 1 + (col as u16) * self.cell_w;
        let py = start_y + 1 + (row as u16) * self.cell_h;
        fb.fill_rect(px, py, self.cell_w, self.cell_h, ch, style);
    }

    #[allow(clippy::too_many_arguments)]
    fn draw_side_panel(
        &self,
        fb: &mut FrameBuffer,
        canvas: &PaintedCanvas,
        hud: &HudState,
        viewport: Viewport,
        start_x: u16,
        start_y: u16,
        frame_w: u16,
    ) {
        let panel_x = start_x.saturating_add(frame_w).saturating_add(2);
        if panel_x >= viewport.width || viewport.width - panel_x < (2 * GAUGE_HALF + 1) as u16 {
            return;
        }

        let label = CellStyle::new(INK, SCREEN).bold();
        let value = CellStyle::new(Rgb::new(200, 200, 200), SCREEN);

        let mut y = start_y;
        fb.put_str(panel_x, y, "SCORE", label);
        y = y.saturating_add(1);
        fb.put_u32(panel_x, y, canvas.score(), value);
        y = y.saturating_add(2);

        fb.put_str(panel_x, y, "GAME", label);
        y = y.saturating_add(1);
        fb.put_u32(panel_x, y, hud.session_id + 1, value);
        y = y.saturating_add(2);

        fb.put_str(panel_x, y, "ROLL", label);
        y = y.saturating_add(1);
        let degrees = hud.roll_deg.round();
        let mut x = panel_x;
        if degrees < 0.0 {
            x = fb.put_str(x, y, "-", value);
        }
        x = fb.put_u32(x, y, degrees.abs().min(999.0) as u32, value);
        fb.put_char(x, y, '°', value);
        y = y.saturating_add(1);
        draw_gauge(fb, panel_x, y, hud.roll_deg);
    }

    fn draw_overlay_text(
        &self,
        fb: &mut FrameBuffer,
        start_x: u16,
        y: u16,
        frame_w: u16,
        text: &str,
    ) {
        let text_w = text.chars().count() as u16;
        let x = start_x.saturating_add(frame_w.saturating_sub(text_w) / 2);
        let style = CellStyle::new(Rgb::new(255, 255, 255), SCREEN).bold();
        fb.put_str(x, y, text, style);
    }
}

/// Offset of `deg` from the gauge centre, in cells
fn gauge_offset(deg: f32) -> i16 {
    let cells = (deg / GAUGE_RANGE_DEG * GAUGE_HALF as f32).round();
    (cells as i16).clamp(-GAUGE_HALF, GAUGE_HALF)
}

/// `[----|--+--|----]` with `●` at the current roll
fn draw_gauge(fb: &mut FrameBuffer, x: u16, y: u16, roll_deg: f32) {
    let track = CellStyle::new(Rgb::new(120, 120, 120), SCREEN);
    let mark = CellStyle::new(Rgb::new(230, 200, 40), SCREEN);
    let centre = x + GAUGE_HALF as u16;
    let threshold = gauge_offset(ROLL_THRESHOLD_DEG);

    for i in -GAUGE_HALF..=GAUGE_HALF {
        let ch = if i == 0 {
            '+'
        } else if i.abs() == threshold {
            '|'
        } else {
            '-'
        };
        fb.put_char((centre as i16 + i) as u16, y, ch, track);
    }
    let pos = (centre as i16 + gauge_offset(roll_deg)) as u16;
    let style = if roll_deg.abs() > ROLL_THRESHOLD_DEG {
        mark.bold()
    } else {
        mark
    };
    fb.put_char(pos, y, '●', style);
}

/// Foreground for a painted cell; `None` for empty paper.
pub fn color_rgb(color: Color) -> Option<Rgb> {
    match color {
        Color::Empty => None,
        Color::Red => Some(Rgb::new(220, 60, 60)),
        Color::Blue => Some(Rgb::new(60, 90, 220)),
        Color::Orange => Some(Rgb::new(255, 150, 30)),
        Color::Yellow => Some(Rgb::new(230, 200, 40)),
        Color::Magenta => Some(Rgb::new(200, 60, 200)),
        Color::Cyan => Some(Rgb::new(40, 190, 210)),
        Color::Green => Some(Rgb::new(60, 180, 80)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Renderer;

    const VIEW: Viewport = Viewport {
        width: 80,
        height: 24,
    };

    fn find(fb: &FrameBuffer, needle: &str) -> Option<(u16, u16)> {
        (0..fb.height()).find_map(|y| {
            fb.line_string(y)
                .find(needle)
                .map(|byte| (fb.line_string(y)[..byte].chars().count() as u16, y))
        })
    }

    #[test]
    fn painted_cells_show_in_color() {
        let view = GameView::default();
        let mut canvas = PaintedCanvas::new();
        canvas.paint_cell(16, 0, Color::Green);

        let fb = view.render(&canvas, &HudState::default(), VIEW);
        let (x0, y0) = view.frame_origin(VIEW);
        let cell = fb.get(x0 + 1, y0 + 17).unwrap();
        assert_eq!(cell.ch, '█');
        assert_eq!(Some(cell.style.fg), color_rgb(Color::Green));
        let empty = fb.get(x0 + 3, y0 + 17).unwrap();
        assert_eq!(empty.ch, ' ');
        assert_eq!(empty.style.bg, PAPER);
    }

    #[test]
    fn score_is_shown_in_panel() {
        let view = GameView::default();
        let mut canvas = PaintedCanvas::new();
        crate::core::ScoreDisplay::show_score(&mut canvas, 301);
        let fb = view.render(&canvas, &HudState::default(), VIEW);
        assert!(find(&fb, "SCORE").is_some());
        assert!(find(&fb, "301").is_some());
    }

    #[test]
    fn game_over_overlay() {
        let view = GameView::default();
        let canvas = PaintedCanvas::new();
        let hud = HudState {
            game_over: true,
            ..HudState::default()
        };
        let fb = view.render(&canvas, &hud, VIEW);
        assert!(find(&fb, "GAME OVER").is_some());
        assert!(find(&view.render(&canvas, &HudState::default(), VIEW), "GAME OVER").is_none());
    }

    #[test]
    fn gauge_marker_follows_roll() {
        assert_eq!(gauge_offset(0.0), 0);
        assert_eq!(gauge_offset(-6.0), -4);
        assert_eq!(gauge_offset(90.0), GAUGE_HALF);

        let view = GameView::default();
        let canvas = PaintedCanvas::new();
        let left = view.render(
            &canvas,
            &HudState {
                roll_deg: -12.0,
                ..HudState::default()
            },
            VIEW,
        );
        let (mx, _) = find(&left, "●").unwrap();
        let (px, _) = find(&left, "+").unwrap();
        assert!(mx < px);
        assert!(find(&left, "-12°").is_some());
    }

    #[test]
    fn status_replaces_help_line() {
        let view = GameView::default();
        let canvas = PaintedCanvas::new();
        let hud = HudState {
            status: Some("calibrating, keep still"),
            ..HudState::default()
        };
        let fb = view.render(&canvas, &hud, VIEW);
        assert!(find(&fb, "calibrating").is_some());
        assert!(find(&fb, "rotate").is_none());
    }
}
