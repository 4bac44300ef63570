use realms_core::hud::HudCompositor;
use realms_core::render_loop::{FrameObserver, RenderLoop, Stage, StopToken};
use realms_core::video::{Framebuffer, SwapChain};
use tracing::info;

use crate::boot;
use crate::config::Config;
use crate::error::FrontendError;
use crate::input::{self, SdlInput};
use crate::overlay::FpsOverlay;
use crate::screenshot::Screenshotter;
use crate::video::SdlScanout;

/// Host-side hooks: screenshots and the optional frame limit.
struct HostObserver {
    screenshots: Screenshotter,
    frame_limit: Option<u64>,
    stop: StopToken,
}

impl FrameObserver for HostObserver {
    fn stage(&mut self, frame: u64, stage: Stage) {
        if stage == Stage::Presented && self.frame_limit.is_some_and(|limit| frame + 1 >= limit) {
            self.stop.request_stop();
        }
    }

    fn before_present(&mut self, frame: u64, surface: &Framebuffer) {
        self.screenshots.before_present(frame, surface);
    }
}

/// Bring up SDL, build the render loop from `config` and run it until the
/// window closes, Escape is pressed, or `frame_limit` frames are shown.
/// Returns the number of frames rendered.
pub fn run(config: &Config, frame_limit: Option<u64>) -> Result<u64, FrontendError> {
    // Resolve everything configurable before touching SDL, so a bad config
    // never opens a window.
    let diag = config.diagnostic_state()?;
    let key_map = input::key_map(&config.input)?;
    let hud = HudCompositor::new(config.hud_layout());

    let sdl_context = sdl2::init().map_err(FrontendError::Sdl)?;
    let sdl_video = sdl_context.video().map_err(FrontendError::Sdl)?;
    let controllers = sdl_context.game_controller().map_err(FrontendError::Sdl)?;
    let event_pump = sdl_context.event_pump().map_err(FrontendError::Sdl)?;

    let scanout = SdlScanout::new(&sdl_video, &config.display)?;
    let mut chain = SwapChain::new(scanout, config.display.buffers)?;
    boot::show(&mut chain, config.display.boot_frames);

    let stop = StopToken::new();
    if frame_limit == Some(0) {
        stop.request_stop();
    }
    let screenshots = Screenshotter::new(config.screenshot_dir());
    let device = SdlInput::new(
        event_pump,
        controllers,
        key_map,
        config.input.keyboard,
        stop.clone(),
        screenshots.request_handle(),
    );

    let mut render_loop = RenderLoop::new(chain, device, diag, hud);
    *render_loop.hud_state_mut() = config.hud_state();
    if config.debug.show_fps {
        render_loop.add_overlay(Box::new(FpsOverlay::new()));
    }

    info!(
        scale = config.display.scale,
        buffers = config.display.buffers,
        vsync = config.display.vsync,
        "Shattered Realms booted"
    );

    let mut observer = HostObserver {
        screenshots,
        frame_limit,
        stop: stop.clone(),
    };
    Ok(render_loop.run(&stop, &mut observer))
}
