#![allow(dead_code)]

use std::collections::VecDeque;

use realms_core::input::{Button, ButtonState, InputDevice};
use realms_core::render_loop::{FrameObserver, Stage};
use realms_core::video::{Color, Framebuffer, Scanout};

/// Input device that replays a fixed script of readings, then reports
/// nothing held (or disconnected, if the script entry says so).
pub struct ScriptedInput {
    script: VecDeque<Option<ButtonState>>,
    pub reads: usize,
}

impl ScriptedInput {
    pub fn new(script: Vec<Option<ButtonState>>) -> Self {
        Self {
            script: script.into(),
            reads: 0,
        }
    }

    /// `frames` readings where `button` is held on the frames marked true.
    pub fn from_levels(button: Button, levels: &[bool]) -> Self {
        Self::new(
            levels
                .iter()
                .map(|&held| {
                    let mut s = ButtonState::NONE;
                    s.set(button, held);
                    Some(s)
                })
                .collect(),
        )
    }

    /// `presses` separate press/release cycles of `button` (2 frames each).
    pub fn taps(button: Button, presses: usize) -> Self {
        let levels: Vec<bool> = (0..presses).flat_map(|_| [true, false]).collect();
        Self::from_levels(button, &levels)
    }
}

impl InputDevice for ScriptedInput {
    fn read(&mut self) -> Option<ButtonState> {
        self.reads += 1;
        self.script.pop_front().unwrap_or(Some(ButtonState::NONE))
    }
}

/// Scanout that records the top-left pixel of everything shown.
#[derive(Default)]
pub struct RecordingScanout {
    pub vblanks: usize,
    pub shown: Vec<Color>,
}

impl Scanout for RecordingScanout {
    fn wait_vblank(&mut self) {
        self.vblanks += 1;
    }

    fn scan_out(&mut self, surface: &Framebuffer) {
        self.shown.push(surface.pixel(0, 0).unwrap_or_default());
    }
}

/// Observer that records every stage and a copy of each finished frame's
/// background pixel.
#[derive(Default)]
pub struct RecordingObserver {
    pub stages: Vec<(u64, Stage)>,
    pub backgrounds: Vec<Color>,
}

impl FrameObserver for RecordingObserver {
    fn stage(&mut self, frame: u64, stage: Stage) {
        self.stages.push((frame, stage));
    }

    fn before_present(&mut self, _frame: u64, surface: &Framebuffer) {
        self.backgrounds.push(surface.pixel(160, 120).unwrap_or_default());
    }
}

/// Count pixels of `color` inside `rect`.
pub fn count_in(fb: &Framebuffer, x0: i32, y0: i32, x1: i32, y1: i32, color: Color) -> usize {
    let mut n = 0;
    for y in y0..y1 {
        for x in x0..x1 {
            if fb.pixel(x, y) == Some(color) {
                n += 1;
            }
        }
    }
    n
}
