pub mod diag;
pub mod error;
pub mod hud;
pub mod input;
pub mod render_loop;
pub mod video;

pub mod prelude {
    pub use crate::diag::{DiagnosticState, Palette};
    pub use crate::error::StartupError;
    pub use crate::hud::{HudCompositor, HudLayout, HudState};
    pub use crate::input::{Button, ButtonState, InputDevice, InputSampler, InputSnapshot};
    pub use crate::render_loop::{FrameObserver, Overlay, RenderLoop, Stage, StopToken};
    pub use crate::video::{Color, Frame, FrameSource, Framebuffer, Rgba8, Scanout, SwapChain};
}
