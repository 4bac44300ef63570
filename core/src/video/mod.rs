pub mod color;
pub mod framebuffer;
pub mod swap_chain;

pub use color::{Color, Rgba8};
pub use framebuffer::{Framebuffer, Rect, Region, SCREEN_HEIGHT, SCREEN_WIDTH};
pub use swap_chain::{Frame, FrameSource, MIN_SURFACES, Scanout, SwapChain};
