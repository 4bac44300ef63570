use std::path::PathBuf;

use realms_core::error::StartupError;
use thiserror::Error;

/// Everything that can stop the frontend from starting.
#[derive(Debug, Error)]
pub enum FrontendError {
    #[error("SDL error: {0}")]
    Sdl(String),

    #[error("failed to read config {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid config: {0}")]
    InvalidConfig(String),

    #[error("invalid color literal {0:?} (expected #rrggbb or #rrggbbaa)")]
    InvalidColor(String),

    #[error("unknown key name {0:?}")]
    UnknownKey(String),

    #[error("PNG encoding failed: {0}")]
    Png(#[from] png::EncodingError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("logging setup failed: {0}")]
    Logging(String),

    #[error(transparent)]
    Startup(#[from] StartupError),
}

impl FrontendError {
    /// Wrap any SDL error that only offers `Display`.
    pub fn sdl(e: impl std::fmt::Display) -> Self {
        Self::Sdl(e.to_string())
    }
}
