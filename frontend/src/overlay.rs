use std::time::{Duration, Instant};

use realms_core::hud::font;
use realms_core::render_loop::Overlay;
use realms_core::video::{Color, Framebuffer, Rect};

/// How often the displayed rate is recomputed.
const SAMPLE_WINDOW: Duration = Duration::from_millis(500);

/// Frames-per-second over a sliding sample window.
pub struct FpsCounter {
    window_start: Instant,
    frames: u32,
    fps: f64,
}

impl FpsCounter {
    pub fn new(now: Instant) -> Self {
        Self {
            window_start: now,
            frames: 0,
            fps: 0.0,
        }
    }

    /// Count one frame at `now`; returns the latest rate.
    pub fn tick(&mut self, now: Instant) -> f64 {
        self.frames += 1;
        let elapsed = now.saturating_duration_since(self.window_start);
        if elapsed >= SAMPLE_WINDOW {
            self.fps = self.frames as f64 / elapsed.as_secs_f64();
            self.frames = 0;
            self.window_start = now;
        }
        self.fps
    }
}

/// Draws the frame rate (e.g. "60.0") at the top-left corner with 2px
/// padding, above the health pips.
pub struct FpsOverlay {
    counter: FpsCounter,
}

impl FpsOverlay {
    pub fn new() -> Self {
        Self {
            counter: FpsCounter::new(Instant::now()),
        }
    }
}

impl Overlay for FpsOverlay {
    fn draw(&mut self, surface: &mut Framebuffer) {
        let text = format!("{:.1}", self.counter.tick(Instant::now()));
        let width = font::text_width(&text, 1);
        let mut region = surface.region(Rect::new(2, 2, width, font::GLYPH_H));
        font::draw_text(&mut region, 2, 2, &text, 1, Color::WHITE);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fps_zero_until_window_elapses() {
        let t0 = Instant::now();
        let mut counter = FpsCounter::new(t0);
        assert_eq!(counter.tick(t0 + Duration::from_millis(100)), 0.0);
    }

    #[test]
    fn fps_over_half_second() {
        let t0 = Instant::now();
        let mut counter = FpsCounter::new(t0);
        let mut fps = 0.0;
        for i in 1..=30 {
            fps = counter.tick(t0 + Duration::from_micros(i * 16_667));
        }
        assert!((fps - 60.0).abs() < 0.5, "fps={fps}");
    }

    #[test]
    fn draws_inside_top_left_corner() {
        let mut fb = Framebuffer::new();
        fb.fill(Color::BLACK);
        FpsOverlay::new().draw(&mut fb);
        // "0.0": first glyph row 0 is 0x60, so columns 1 and 2 lit
        assert_eq!(fb.pixel(3, 2), Some(Color::WHITE));
        assert_eq!(fb.pixel(10, 10), Some(Color::BLACK));
    }
}
