use std::time::{Duration, Instant};

use realms_core::video::{Framebuffer, SCREEN_HEIGHT, SCREEN_WIDTH, Scanout};
use sdl2::pixels::PixelFormatEnum;
use sdl2::render::{Canvas, TextureCreator};
use sdl2::video::{Window, WindowContext};
use tracing::warn;

use crate::config::DisplayConfig;
use crate::error::FrontendError;

/// Refresh period used when vsync is off.
const FRAME_PERIOD: Duration = Duration::from_nanos(1_000_000_000 / 60);

/// Sleeps out the rest of each refresh period.
struct Pacer {
    next: Instant,
}

impl Pacer {
    fn new() -> Self {
        Self {
            next: Instant::now(),
        }
    }

    fn wait(&mut self) {
        let now = Instant::now();
        if self.next > now {
            std::thread::sleep(self.next - now);
        }
        self.next = self.next.max(now) + FRAME_PERIOD;
    }
}

/// SDL window presenting 320×240 RGBA5551 surfaces at an integer scale.
pub struct SdlScanout {
    canvas: Canvas<Window>,
    texture_creator: TextureCreator<WindowContext>,
    bytes: Vec<u8>,
    /// `None` when the renderer's vsync does the waiting inside `present`.
    pacer: Option<Pacer>,
}

impl SdlScanout {
    /// Create an SDL window and renderer for the native resolution.
    pub fn new(
        sdl_video: &sdl2::VideoSubsystem,
        display: &DisplayConfig,
    ) -> Result<Self, FrontendError> {
        let window = sdl_video
            .window(
                &display.title,
                SCREEN_WIDTH as u32 * display.scale,
                SCREEN_HEIGHT as u32 * display.scale,
            )
            .position_centered()
            .build()
            .map_err(FrontendError::sdl)?;

        let mut builder = window.into_canvas().accelerated();
        if display.vsync {
            builder = builder.present_vsync();
        }
        let canvas = builder.build().map_err(FrontendError::sdl)?;
        let texture_creator = canvas.texture_creator();

        Ok(Self {
            canvas,
            texture_creator,
            bytes: Vec::with_capacity(SCREEN_WIDTH * SCREEN_HEIGHT * 2),
            pacer: (!display.vsync).then(Pacer::new),
        })
    }

    /// Upload a surface to a streaming texture and present it.
    fn upload(&mut self, surface: &Framebuffer) -> Result<(), FrontendError> {
        surface.write_native_bytes(&mut self.bytes);

        let mut texture = self
            .texture_creator
            .create_texture_streaming(
                PixelFormatEnum::RGBA5551,
                SCREEN_WIDTH as u32,
                SCREEN_HEIGHT as u32,
            )
            .map_err(FrontendError::sdl)?;

        texture
            .update(None, &self.bytes, SCREEN_WIDTH * 2)
            .map_err(FrontendError::sdl)?;

        self.canvas.clear();
        self.canvas
            .copy(&texture, None, None)
            .map_err(FrontendError::Sdl)?;
        self.canvas.present();
        Ok(())
    }
}

impl Scanout for SdlScanout {
    fn wait_vblank(&mut self) {
        if let Some(pacer) = &mut self.pacer {
            pacer.wait();
        }
    }

    fn scan_out(&mut self, surface: &Framebuffer) {
        if let Err(e) = self.upload(surface) {
            warn!(error = %e, "dropping frame");
        }
    }
}
