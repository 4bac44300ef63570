//! Background color cycling: the diagnostic state machine.

use tracing::debug;

use crate::error::StartupError;
use crate::input::{Button, InputSnapshot};
use crate::video::Color;

/// Ordered, non-empty table of background colors.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Palette {
    colors: Vec<Color>,
}

impl Palette {
    pub fn new(colors: Vec<Color>) -> Result<Self, StartupError> {
        if colors.is_empty() {
            return Err(StartupError::EmptyPalette);
        }
        Ok(Self { colors })
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// Never true for a palette built through [`Palette::new`].
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<Color> {
        self.colors.get(index).copied()
    }

    pub fn colors(&self) -> &[Color] {
        &self.colors
    }
}

impl Default for Palette {
    /// Black, blue, green, red, yellow.
    fn default() -> Self {
        Self {
            colors: vec![
                Color::BLACK,
                Color::BLUE,
                Color::GREEN,
                Color::RED,
                Color::YELLOW,
            ],
        }
    }
}

/// Palette index advanced by one press of a designated button.
///
/// Each press edge moves exactly one step; holding the button does nothing
/// further. The index wraps and has no terminal state.
#[derive(Clone, Debug)]
pub struct DiagnosticState {
    palette: Palette,
    index: usize,
    button: Button,
}

impl DiagnosticState {
    pub fn new(palette: Palette, button: Button) -> Self {
        Self {
            palette,
            index: 0,
            button,
        }
    }

    /// Start somewhere other than entry 0.
    pub fn with_start_index(
        palette: Palette,
        button: Button,
        index: usize,
    ) -> Result<Self, StartupError> {
        if index >= palette.len() {
            return Err(StartupError::StartIndexOutOfRange {
                index,
                len: palette.len(),
            });
        }
        Ok(Self {
            palette,
            index,
            button,
        })
    }

    /// Apply this frame's input. Returns true if the index moved.
    pub fn advance(&mut self, input: &InputSnapshot) -> bool {
        if !input.pressed(self.button) {
            return false;
        }
        self.index = (self.index + 1) % self.palette.len();
        debug!(index = self.index, "palette advanced");
        true
    }

    pub fn index(&self) -> usize {
        self.index
    }

    /// Background color for the current index.
    pub fn color(&self) -> Color {
        // index < len holds from construction and the modulo in `advance`
        self.palette.colors[self.index]
    }

    pub fn button(&self) -> Button {
        self.button
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }
}

impl Default for DiagnosticState {
    fn default() -> Self {
        Self::new(Palette::default(), Button::Start)
    }
}
