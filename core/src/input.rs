//! Controller sampling with per-frame edge detection.
//!
//! [`InputSampler::poll`] is the only place input enters a frame. It freezes
//! the device reading into an [`InputSnapshot`] that every consumer in the
//! frame shares, so nothing observes a button change mid-frame.

use std::fmt;
use std::str::FromStr;

use tracing::{info, warn};

use crate::error::StartupError;

/// Physical buttons on the console controller.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Button {
    A,
    B,
    Z,
    Start,
    DUp,
    DDown,
    DLeft,
    DRight,
    L,
    R,
    CUp,
    CDown,
    CLeft,
    CRight,
}

impl Button {
    pub const ALL: [Button; 14] = [
        Button::A,
        Button::B,
        Button::Z,
        Button::Start,
        Button::DUp,
        Button::DDown,
        Button::DLeft,
        Button::DRight,
        Button::L,
        Button::R,
        Button::CUp,
        Button::CDown,
        Button::CLeft,
        Button::CRight,
    ];

    pub const fn mask(self) -> u16 {
        1 << self as u16
    }

    /// Lowercase name used in configuration files.
    pub const fn name(self) -> &'static str {
        match self {
            Button::A => "a",
            Button::B => "b",
            Button::Z => "z",
            Button::Start => "start",
            Button::DUp => "d_up",
            Button::DDown => "d_down",
            Button::DLeft => "d_left",
            Button::DRight => "d_right",
            Button::L => "l",
            Button::R => "r",
            Button::CUp => "c_up",
            Button::CDown => "c_down",
            Button::CLeft => "c_left",
            Button::CRight => "c_right",
        }
    }
}

impl fmt::Display for Button {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Button {
    type Err = StartupError;

    /// Case-insensitive; `-` and `_` are interchangeable.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase().replace('-', "_");
        Button::ALL
            .into_iter()
            .find(|b| b.name() == wanted)
            .ok_or_else(|| StartupError::UnknownButton(s.to_string()))
    }
}

/// Set of held buttons from one device read.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct ButtonState(u16);

impl ButtonState {
    pub const NONE: ButtonState = ButtonState(0);

    pub const fn from_bits(bits: u16) -> Self {
        Self(bits)
    }

    pub const fn bits(self) -> u16 {
        self.0
    }

    pub const fn contains(self, button: Button) -> bool {
        self.0 & button.mask() != 0
    }

    /// Copy with `button` held.
    pub const fn with(self, button: Button) -> Self {
        Self(self.0 | button.mask())
    }

    pub fn set(&mut self, button: Button, held: bool) {
        if held {
            self.0 |= button.mask();
        } else {
            self.0 &= !button.mask();
        }
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl FromIterator<Button> for ButtonState {
    fn from_iter<I: IntoIterator<Item = Button>>(iter: I) -> Self {
        iter.into_iter().fold(ButtonState::NONE, ButtonState::with)
    }
}

/// Source of raw controller readings.
pub trait InputDevice {
    /// Perform one hardware read. `None` means no controller is attached.
    fn read(&mut self) -> Option<ButtonState>;
}

/// Frozen view of input for one frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct InputSnapshot {
    current: ButtonState,
    previous: ButtonState,
}

impl InputSnapshot {
    pub fn new(previous: ButtonState, current: ButtonState) -> Self {
        Self { current, previous }
    }

    pub fn held(&self, button: Button) -> bool {
        self.current.contains(button)
    }

    /// Released last frame, held this frame.
    pub fn pressed(&self, button: Button) -> bool {
        self.current.contains(button) && !self.previous.contains(button)
    }

    /// Held last frame, released this frame.
    pub fn released(&self, button: Button) -> bool {
        !self.current.contains(button) && self.previous.contains(button)
    }

    pub fn buttons(&self) -> ButtonState {
        self.current
    }
}

/// Polls an [`InputDevice`] once per frame and keeps the previous reading
/// for edge detection.
pub struct InputSampler<D> {
    device: D,
    snapshot: InputSnapshot,
    connected: Option<bool>,
}

impl<D: InputDevice> InputSampler<D> {
    pub fn new(device: D) -> Self {
        Self {
            device,
            snapshot: InputSnapshot::default(),
            connected: None,
        }
    }

    /// Read the device once and freeze the result for this frame.
    /// A missing controller reads as nothing held.
    pub fn poll(&mut self) -> InputSnapshot {
        let reading = self.device.read();
        let connected = reading.is_some();
        if self.connected != Some(connected) {
            if connected {
                info!("controller connected");
            } else {
                warn!("no controller attached, treating all buttons as released");
            }
            self.connected = Some(connected);
        }
        self.snapshot = InputSnapshot::new(self.snapshot.current, reading.unwrap_or_default());
        self.snapshot
    }

    /// The snapshot taken by the last [`poll`](Self::poll).
    pub fn snapshot(&self) -> InputSnapshot {
        self.snapshot
    }

    pub fn pressed(&self, button: Button) -> bool {
        self.snapshot.pressed(button)
    }

    pub fn held(&self, button: Button) -> bool {
        self.snapshot.held(button)
    }

    pub fn released(&self, button: Button) -> bool {
        self.snapshot.released(button)
    }

    /// Whether the last poll found a controller. False before the first poll.
    pub fn is_connected(&self) -> bool {
        self.connected.unwrap_or(false)
    }

    pub fn device(&self) -> &D {
        &self.device
    }

    pub fn device_mut(&mut self) -> &mut D {
        &mut self.device
    }
}
