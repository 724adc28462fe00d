/// Decides when the terminal loop should redraw.
///
/// Canvas changes are drawn at most once per `min_interval_ms`. Without
/// changes a frame is still drawn every `idle_interval_ms` so the roll gauge,
/// which the canvas does not track, stays current.
#[derive(Debug, Clone)]
pub struct RenderThrottle {
    min_interval_ms: u64,
    idle_interval_ms: u64,
    last_render_ms: u64,
    last_revision: Option<u64>,
}

impl RenderThrottle {
    pub fn new(min_interval_ms: u64, idle_interval_ms: u64) -> Self {
        Self {
            min_interval_ms,
            idle_interval_ms,
            last_render_ms: 0,
            last_revision: None,
        }
    }

    pub fn should_render(&mut self, now_ms: u64, revision: u64) -> bool {
        let since = now_ms.saturating_sub(self.last_render_ms);
        let render = match self.last_revision {
            None => true,
            Some(last) if last != revision => since >= self.min_interval_ms,
            Some(_) => since >= self.idle_interval_ms,
        };
        if render {
            self.last_render_ms = now_ms;
            self.last_revision = Some(revision);
        }
        render
    }

    /// Make the next call render regardless of timing.
    pub fn force(&mut self) {
        self.last_revision = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_frame_always_renders() {
        let mut t = RenderThrottle::new(16, 100);
        assert!(t.should_render(0, 0));
    }

    #[test]
    fn changes_are_rate_limited() {
        let mut t = RenderThrottle::new(16, 100);
        assert!(t.should_render(0, 0));
        assert!(!t.should_render(5, 1));
        assert!(t.should_render(16, 1));
    }

    #[test]
    fn idle_frames_refresh_slowly() {
        let mut t = RenderThrottle::new(16, 100);
        assert!(t.should_render(0, 7));
        assert!(!t.should_render(50, 7));
        assert!(t.should_render(100, 7));
        t.force();
        assert!(t.should_render(101, 7));
    }
}
