/// Fatal preconditions checked once before the render loop starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StartupError {
    /// The swap chain was configured with too few backing surfaces.
    InsufficientSurfaces { requested: usize, minimum: usize },

    /// The diagnostic palette has no entries.
    EmptyPalette,

    /// The configured start index does not address a palette entry.
    StartIndexOutOfRange { index: usize, len: usize },

    /// A button name did not match any controller button.
    UnknownButton(String),
}

impl std::fmt::Display for StartupError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InsufficientSurfaces { requested, minimum } => write!(
                f,
                "swap chain needs at least {minimum} surfaces, got {requested}"
            ),
            Self::EmptyPalette => write!(f, "diagnostic palette is empty"),
            Self::StartIndexOutOfRange { index, len } => write!(
                f,
                "palette start index {index} out of range for {len} entries"
            ),
            Self::UnknownButton(name) => write!(f, "unknown controller button: {name}"),
        }
    }
}

impl std::error::Error for StartupError {}
