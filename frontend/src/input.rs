use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use realms_core::input::{Button, ButtonState, InputDevice};
use realms_core::render_loop::StopToken;
use sdl2::EventPump;
use sdl2::GameControllerSubsystem;
use sdl2::controller::{Axis, Button as PadButton, GameController};
use sdl2::event::Event;
use sdl2::keyboard::Scancode;
use tracing::{info, warn};

use crate::config::InputConfig;
use crate::error::FrontendError;

/// Analog deflection that counts as a digital press (half travel).
const AXIS_THRESHOLD: i16 = 16_384;

/// Maps SDL scancodes to console buttons.
pub struct KeyMap {
    map: HashMap<Scancode, Button>,
}

impl KeyMap {
    pub fn new() -> Self {
        Self {
            map: HashMap::new(),
        }
    }

    /// Bind a scancode to a button.
    pub fn bind(&mut self, scancode: Scancode, button: Button) {
        self.map.insert(scancode, button);
    }

    /// Drop every binding for `button`.
    pub fn unbind(&mut self, button: Button) {
        self.map.retain(|_, b| *b != button);
    }

    /// Look up the button for a scancode.
    pub fn get(&self, scancode: Scancode) -> Option<Button> {
        self.map.get(&scancode).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Scancode, Button)> + '_ {
        self.map.iter().map(|(&sc, &b)| (sc, b))
    }
}

impl Default for KeyMap {
    fn default() -> Self {
        default_key_map()
    }
}

/// Keyboard layout used when nothing is configured.
pub fn default_key_map() -> KeyMap {
    let mut km = KeyMap::new();

    for button in Button::ALL {
        let scancode = match button {
            Button::Start => Scancode::Return,
            Button::A => Scancode::X,
            Button::B => Scancode::C,
            Button::Z => Scancode::Z,
            Button::L => Scancode::A,
            Button::R => Scancode::S,

            Button::DUp => Scancode::Up,
            Button::DDown => Scancode::Down,
            Button::DLeft => Scancode::Left,
            Button::DRight => Scancode::Right,

            Button::CUp => Scancode::I,
            Button::CDown => Scancode::K,
            Button::CLeft => Scancode::J,
            Button::CRight => Scancode::L,
        };
        km.bind(scancode, button);
    }

    km
}

/// Default layout with the configured overrides applied. Each override
/// replaces every default binding of that button.
pub fn key_map(config: &InputConfig) -> Result<KeyMap, FrontendError> {
    let mut km = default_key_map();
    for (button_name, key_name) in &config.keys {
        let button: Button = button_name.parse()?;
        let scancode = Scancode::from_name(key_name)
            .ok_or_else(|| FrontendError::UnknownKey(key_name.clone()))?;
        km.unbind(button);
        if let Some(previous) = km.get(scancode).filter(|&b| b != button) {
            warn!(key = %key_name, from = %previous, to = %button, "key rebound");
        }
        km.bind(scancode, button);
    }
    Ok(km)
}

const PAD_BUTTONS: &[(PadButton, Button)] = &[
    (PadButton::A, Button::A),
    (PadButton::B, Button::B),
    (PadButton::Start, Button::Start),
    (PadButton::LeftShoulder, Button::L),
    (PadButton::RightShoulder, Button::R),
    (PadButton::DPadUp, Button::DUp),
    (PadButton::DPadDown, Button::DDown),
    (PadButton::DPadLeft, Button::DLeft),
    (PadButton::DPadRight, Button::DRight),
];

/// Right stick directions stand in for the C buttons; the left trigger is Z.
fn pad_axes(pad: &GameController, state: &mut ButtonState) {
    let rx = pad.axis(Axis::RightX);
    let ry = pad.axis(Axis::RightY);
    state.set(Button::CLeft, rx <= -AXIS_THRESHOLD);
    state.set(Button::CRight, rx >= AXIS_THRESHOLD);
    state.set(Button::CUp, ry <= -AXIS_THRESHOLD);
    state.set(Button::CDown, ry >= AXIS_THRESHOLD);
    state.set(Button::Z, pad.axis(Axis::TriggerLeft) >= AXIS_THRESHOLD);
}

/// SDL keyboard and game controller as one console controller.
///
/// Each [`read`](InputDevice::read) drains the SDL event queue first, so it
/// also handles window close (stop request), F12 (screenshot request) and
/// controller hot-plug.
pub struct SdlInput {
    event_pump: EventPump,
    controllers: GameControllerSubsystem,
    pad: Option<GameController>,
    key_map: KeyMap,
    keyboard: bool,
    stop: StopToken,
    screenshot: Arc<AtomicBool>,
}

impl SdlInput {
    pub fn new(
        event_pump: EventPump,
        controllers: GameControllerSubsystem,
        key_map: KeyMap,
        keyboard: bool,
        stop: StopToken,
        screenshot: Arc<AtomicBool>,
    ) -> Self {
        let mut input = Self {
            event_pump,
            controllers,
            pad: None,
            key_map,
            keyboard,
            stop,
            screenshot,
        };
        input.open_first_pad();
        input
    }

    fn open_first_pad(&mut self) {
        let count = match self.controllers.num_joysticks() {
            Ok(count) => count,
            Err(e) => {
                warn!(error = %e, "cannot enumerate joysticks");
                return;
            }
        };
        if let Some(index) = (0..count).find(|&i| self.controllers.is_game_controller(i)) {
            self.open_pad(index);
        }
    }

    fn open_pad(&mut self, index: u32) {
        match self.controllers.open(index) {
            Ok(pad) => {
                info!(name = %pad.name(), "game controller attached");
                self.pad = Some(pad);
            }
            Err(e) => warn!(index, error = %e, "failed to open game controller"),
        }
    }

    fn handle_events(&mut self) {
        let events: Vec<Event> = self.event_pump.poll_iter().collect();
        for event in events {
            match event {
                Event::Quit { .. }
                | Event::KeyDown {
                    scancode: Some(Scancode::Escape),
                    ..
                } => self.stop.request_stop(),

                Event::KeyDown {
                    scancode: Some(Scancode::F12),
                    repeat: false,
                    ..
                } => self.screenshot.store(true, Ordering::Relaxed),

                Event::ControllerDeviceAdded { which, .. } if self.pad.is_none() => {
                    self.open_pad(which);
                }

                Event::ControllerDeviceRemoved { which, .. }
                    if self.pad.as_ref().is_some_and(|p| p.instance_id() == which) =>
                {
                    info!("game controller detached");
                    self.pad = None;
                    self.open_first_pad();
                }

                _ => {}
            }
        }
    }
}

impl InputDevice for SdlInput {
    fn read(&mut self) -> Option<ButtonState> {
        self.handle_events();

        if self.pad.is_none() && !self.keyboard {
            return None;
        }

        let mut state = ButtonState::NONE;
        if self.keyboard {
            let keys = self.event_pump.keyboard_state();
            for (scancode, button) in self.key_map.iter() {
                if keys.is_scancode_pressed(scancode) {
                    state.set(button, true);
                }
            }
        }
        if let Some(pad) = &self.pad {
            let mut from_pad = ButtonState::NONE;
            for &(pad_button, button) in PAD_BUTTONS {
                from_pad.set(button, pad.button(pad_button));
            }
            pad_axes(pad, &mut from_pad);
            state = ButtonState::from_bits(state.bits() | from_pad.bits());
        }
        Some(state)
    }
}
