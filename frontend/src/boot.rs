//! Boot screen shown before the render loop takes over.

use realms_core::hud::font;
use realms_core::video::{Color, FrameSource, Framebuffer, Rgba8};

pub const BACKGROUND: Color = Color::from_rgba8(Rgba8::rgb(0, 16, 48));
const BANNER: &str = "BOOT OK";
const BANNER_X: i32 = 16;
const BANNER_Y: i32 = 16;
const BANNER_SCALE: u32 = 2;

/// Dark-blue fill with the banner in white at the top-left.
pub fn draw(surface: &mut Framebuffer) {
    surface.fill(BACKGROUND);
    let bounds = surface.bounds();
    font::draw_text(
        &mut surface.region(bounds),
        BANNER_X,
        BANNER_Y,
        BANNER,
        BANNER_SCALE,
        Color::WHITE,
    );
}

/// Present the boot screen for `frames` consecutive frames.
pub fn show<S: FrameSource>(source: &mut S, frames: u32) {
    for _ in 0..frames {
        let mut frame = source.acquire();
        draw(&mut frame);
        source.present(frame);
    }
}
