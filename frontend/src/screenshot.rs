//! PNG snapshots of the frame about to be presented.

use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use realms_core::render_loop::FrameObserver;
use realms_core::video::Framebuffer;
use tracing::{info, warn};

use crate::error::FrontendError;

/// Write `surface` as an 8-bit RGB PNG.
pub fn write_png(path: &Path, surface: &Framebuffer) -> Result<(), FrontendError> {
    let file = File::create(path)?;
    let mut encoder = png::Encoder::new(
        BufWriter::new(file),
        surface.width() as u32,
        surface.height() as u32,
    );
    encoder.set_color(png::ColorType::Rgb);
    encoder.set_depth(png::BitDepth::Eight);
    let mut writer = encoder.write_header()?;
    writer.write_image_data(&surface.to_rgb24())?;
    writer.finish()?;
    Ok(())
}

/// Saves the next finished frame whenever a request flag is raised.
pub struct Screenshotter {
    request: Arc<AtomicBool>,
    dir: PathBuf,
}

impl Screenshotter {
    pub fn new(dir: PathBuf) -> Self {
        Self {
            request: Arc::new(AtomicBool::new(false)),
            dir,
        }
    }

    /// Flag to raise (from the input side) to capture the next frame.
    pub fn request_handle(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.request)
    }

    pub fn path_for(&self, frame: u64) -> PathBuf {
        self.dir.join(format!("realms-{frame:06}.png"))
    }
}

impl FrameObserver for Screenshotter {
    fn before_present(&mut self, frame: u64, surface: &Framebuffer) {
        if !self.request.swap(false, Ordering::Relaxed) {
            return;
        }
        let path = self.path_for(frame);
        match write_png(&path, surface) {
            Ok(()) => info!(path = %path.display(), "screenshot saved"),
            Err(e) => warn!(path = %path.display(), error = %e, "screenshot failed"),
        }
    }
}
