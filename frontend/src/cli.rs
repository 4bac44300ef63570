use std::path::PathBuf;

use clap::Parser;

/// Shattered Realms presentation loop.
#[derive(Parser, Debug)]
#[command(name = "realms", version, about)]
pub struct Cli {
    /// Configuration file (default: <config dir>/shattered-realms/config.toml)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Integer window scale
    #[arg(long)]
    pub scale: Option<u32>,

    /// Stop after rendering this many frames
    #[arg(long)]
    pub frames: Option<u64>,

    /// Draw the FPS counter
    #[arg(long)]
    pub show_fps: bool,

    /// Log filter, e.g. "debug" or "realms_core=trace"
    #[arg(long)]
    pub log_level: Option<String>,
}
